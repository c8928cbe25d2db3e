//! Gauge configuration surface and its YAML form.
//!
//! # Examples
//!
//! ```
//! use arcgauge_core::{GaugeConfig, ValuePolicy};
//!
//! let config = GaugeConfig::from_yaml_str("value: 70\nvalue_policy: clamp\n").unwrap();
//! assert_eq!(config.value, 70);
//! assert_eq!(config.value_policy, ValuePolicy::Clamp);
//! assert_eq!(config.start_position, -150.0);
//! ```

use crate::animation::Easing;
use crate::error::{GaugeError, Result};
use crate::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Lower bound of the nominal value scale.
pub const VALUE_MIN: i32 = 0;
/// Upper bound of the nominal value scale.
pub const VALUE_MAX: i32 = 100;
/// Accepted magnitude for start/end positions, in degrees.
pub const ANGLE_LIMIT: f64 = 360.0;

/// What to do with values outside `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuePolicy {
    /// Keep the value as given; stroke fractions may leave `[0, 1]`.
    #[default]
    AllowOvershoot,
    /// Clamp the value into `[0, 100]`.
    Clamp,
}

impl ValuePolicy {
    /// Apply the policy to a raw value.
    #[must_use]
    pub fn apply(self, value: i32) -> i32 {
        match self {
            Self::AllowOvershoot => value,
            Self::Clamp => value.clamp(VALUE_MIN, VALUE_MAX),
        }
    }
}

/// Value transition settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationConfig {
    /// Transition duration in seconds
    pub duration: f64,
    /// Easing curve
    pub easing: Easing,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration: 1.0,
            easing: Easing::Linear,
        }
    }
}

/// Externally settable gauge inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GaugeConfig {
    /// Current value, nominally 0..=100
    pub value: i32,
    /// Arc start in degrees, 0 = 12 o'clock, clockwise positive
    pub start_position: f64,
    /// Arc end in degrees
    pub end_position: f64,
    /// Value arc and marker color
    pub value_color: Color,
    /// Dashed track color
    pub track_color: Color,
    /// Background ring color
    pub circle_color: Color,
    /// Label text color
    pub label_color: Color,
    /// Out-of-range value handling
    pub value_policy: ValuePolicy,
    /// Value transition settings
    pub animation: AnimationConfig,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            value: 30,
            start_position: -150.0,
            end_position: 150.0,
            value_color: Color::BLACK,
            track_color: Color::LIGHT_GRAY,
            circle_color: Color::LIGHT_GRAY.with_alpha(0.5),
            label_color: Color::BLACK,
            value_policy: ValuePolicy::AllowOvershoot,
            animation: AnimationConfig::default(),
        }
    }
}

impl GaugeConfig {
    /// Parse a YAML document. Missing fields take their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&text)?;
        debug!(path = %path.display(), value = config.value, "loaded gauge config");
        Ok(config)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check angle bounds and animation settings.
    pub fn validate(&self) -> Result<()> {
        check_angle("start_position", self.start_position)?;
        check_angle("end_position", self.end_position)?;

        let duration = self.animation.duration;
        if !duration.is_finite() || duration < 0.0 {
            return Err(GaugeError::InvalidAnimation(format!(
                "duration must be a non-negative number of seconds, got {duration}"
            )));
        }
        Ok(())
    }
}

fn check_angle(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value.abs() <= ANGLE_LIMIT {
        Ok(())
    } else {
        Err(GaugeError::AngleOutOfRange { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let c = GaugeConfig::default();
        assert_eq!(c.value, 30);
        assert_eq!(c.start_position, -150.0);
        assert_eq!(c.end_position, 150.0);
        assert_eq!(c.value_color, Color::BLACK);
        assert_eq!(c.track_color, Color::LIGHT_GRAY);
        assert_eq!(c.circle_color.a, 0.5);
        assert_eq!(c.label_color, Color::BLACK);
        assert_eq!(c.value_policy, ValuePolicy::AllowOvershoot);
        assert_eq!(c.animation.duration, 1.0);
        assert_eq!(c.animation.easing, Easing::Linear);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_value_policy_apply() {
        assert_eq!(ValuePolicy::AllowOvershoot.apply(130), 130);
        assert_eq!(ValuePolicy::AllowOvershoot.apply(-5), -5);
        assert_eq!(ValuePolicy::Clamp.apply(130), 100);
        assert_eq!(ValuePolicy::Clamp.apply(-5), 0);
        assert_eq!(ValuePolicy::Clamp.apply(42), 42);
    }

    #[test]
    fn test_from_yaml_full_document() {
        let yaml = r##"
value: 55
start_position: -120
end_position: 120
value_color: "#ff0000"
track_color: "#cccccc"
circle_color: "#cccccc40"
label_color: "#333333"
value_policy: clamp
animation:
  duration: 0.5
  easing: ease_out
"##;
        let c = GaugeConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(c.value, 55);
        assert_eq!(c.start_position, -120.0);
        assert_eq!(c.value_color, Color::rgb(1.0, 0.0, 0.0));
        assert!((c.circle_color.a - 0.251).abs() < 0.01);
        assert_eq!(c.value_policy, ValuePolicy::Clamp);
        assert_eq!(c.animation.duration, 0.5);
        assert_eq!(c.animation.easing, Easing::EaseOut);
    }

    #[test]
    fn test_from_yaml_empty_mapping_is_default() {
        let c = GaugeConfig::from_yaml_str("{}").unwrap();
        assert_eq!(c, GaugeConfig::default());
    }

    #[test]
    fn test_from_yaml_rejects_unknown_field() {
        let err = GaugeConfig::from_yaml_str("valu: 3").unwrap_err();
        assert!(matches!(err, GaugeError::Yaml(_)));
    }

    #[test]
    fn test_from_yaml_rejects_bad_color() {
        let err = GaugeConfig::from_yaml_str("value_color: \"#zzzzzz\"").unwrap_err();
        assert!(matches!(err, GaugeError::Yaml(_)));
        assert!(err.to_string().contains("invalid hex"));
    }

    #[test]
    fn test_validate_rejects_out_of_range_angles() {
        let c = GaugeConfig {
            end_position: 400.0,
            ..Default::default()
        };
        match c.validate() {
            Err(GaugeError::AngleOutOfRange { field, value }) => {
                assert_eq!(field, "end_position");
                assert_eq!(value, 400.0);
            }
            other => panic!("expected AngleOutOfRange, got {other:?}"),
        }

        let c = GaugeConfig {
            start_position: f64::NAN,
            ..Default::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_angle_limits() {
        let c = GaugeConfig {
            start_position: -360.0,
            end_position: 360.0,
            ..Default::default()
        };
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_duration() {
        let mut c = GaugeConfig::default();
        c.animation.duration = -1.0;
        assert!(matches!(c.validate(), Err(GaugeError::InvalidAnimation(_))));
    }

    #[test]
    fn test_yaml_roundtrip_preserves_config() {
        let c = GaugeConfig {
            value: 80,
            value_policy: ValuePolicy::Clamp,
            ..Default::default()
        };
        let yaml = c.to_yaml().unwrap();
        assert!(yaml.contains("value_policy: clamp"));
        let back = GaugeConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(back.value, 80);
        assert_eq!(back.value_policy, ValuePolicy::Clamp);
        assert_eq!(back.track_color.to_hex(), c.track_color.to_hex());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = GaugeConfig::load("/nonexistent/arcgauge.yaml").unwrap_err();
        assert!(matches!(err, GaugeError::Io(_)));
    }
}
