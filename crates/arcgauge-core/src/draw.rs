//! Draw commands and stroke styles.
//!
//! All gauge rendering reduces to these primitives.

use crate::widget::TextStyle;
use crate::{Color, CornerRadius, Point, Rect};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// A circular arc path from `start_angle` to `end_angle`.
///
/// The direction follows the sign of [`ArcPath::sweep`]: positive runs
/// clockwise in screen space (y down), negative runs counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcPath {
    /// Center point
    pub center: Point,
    /// Radius
    pub radius: f32,
    /// Start angle in radians
    pub start_angle: f32,
    /// End angle in radians
    pub end_angle: f32,
}

impl ArcPath {
    /// Create a new arc path.
    #[must_use]
    pub const fn new(center: Point, radius: f32, start_angle: f32, end_angle: f32) -> Self {
        Self {
            center,
            radius,
            start_angle,
            end_angle,
        }
    }

    /// Full circle starting at 3 o'clock.
    #[must_use]
    pub const fn circle(center: Point, radius: f32) -> Self {
        Self::new(center, radius, 0.0, TAU)
    }

    /// Signed angular extent (`end - start`).
    #[must_use]
    pub fn sweep(&self) -> f32 {
        self.end_angle - self.start_angle
    }

    /// Signed path length (`sweep * radius`).
    #[must_use]
    pub fn length(&self) -> f32 {
        self.sweep() * self.radius
    }

    /// Angle reached after `fraction` of the path.
    #[must_use]
    pub fn angle_at(&self, fraction: f32) -> f32 {
        self.sweep().mul_add(fraction, self.start_angle)
    }

    /// Point reached after `fraction` of the path.
    #[must_use]
    pub fn point_at(&self, fraction: f32) -> Point {
        self.center.on_circle(self.radius, self.angle_at(fraction))
    }
}

/// Painted portion of a path, as fractions of its total length.
///
/// Values are kept as given; render targets clamp them to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeWindow {
    /// Fraction where painting starts
    pub start: f32,
    /// Fraction where painting ends
    pub end: f32,
}

impl StrokeWindow {
    /// The whole path.
    pub const FULL: Self = Self::new(0.0, 1.0);

    /// Create a new window.
    #[must_use]
    pub const fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    /// Window clamped to the path, `start <= end`.
    #[must_use]
    pub fn clamped(&self) -> Self {
        let start = self.start.clamp(0.0, 1.0);
        let end = self.end.clamp(0.0, 1.0);
        Self::new(start.min(end), end)
    }

    /// Whether nothing of the path would be painted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let c = self.clamped();
        c.end - c.start <= f32::EPSILON
    }
}

impl Default for StrokeWindow {
    fn default() -> Self {
        Self::FULL
    }
}

/// Dash pattern: `dash` painted, `gap` skipped, repeated along the path
/// starting `phase` units into the pattern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashPattern {
    /// Painted length
    pub dash: f32,
    /// Gap length
    pub gap: f32,
    /// Offset into the pattern at the path start
    pub phase: f32,
}

impl DashPattern {
    /// Create a dash pattern.
    #[must_use]
    pub const fn new(dash: f32, gap: f32, phase: f32) -> Self {
        Self { dash, gap, phase }
    }

    /// Length of one dash + gap period.
    #[must_use]
    pub fn period(&self) -> f32 {
        self.dash + self.gap
    }
}

/// Stroke style for path rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Stroke color
    pub color: Color,
    /// Stroke width in pixels
    pub width: f32,
    /// Line cap style
    pub cap: LineCap,
    /// Dash pattern (None = solid)
    pub dash: Option<DashPattern>,
}

impl StrokeStyle {
    /// Solid stroke of the given color and width.
    #[must_use]
    pub const fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            cap: LineCap::Butt,
            dash: None,
        }
    }

    /// Set the dash pattern.
    #[must_use]
    pub fn with_dash(mut self, dash: Option<DashPattern>) -> Self {
        self.dash = dash;
        self
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(Color::BLACK, 1.0)
    }
}

/// Line cap style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineCap {
    /// Flat cap at endpoint
    #[default]
    Butt,
    /// Rounded cap
    Round,
    /// Square cap extending beyond endpoint
    Square,
}

/// Box style for rectangles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxStyle {
    /// Fill color (None = no fill)
    pub fill: Option<Color>,
    /// Stroke style (None = no stroke)
    pub stroke: Option<StrokeStyle>,
}

impl BoxStyle {
    /// Create a box with only fill color.
    #[must_use]
    pub const fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
        }
    }

    /// Create a box with only stroke.
    #[must_use]
    pub const fn stroke(style: StrokeStyle) -> Self {
        Self {
            fill: None,
            stroke: Some(style),
        }
    }
}

/// Drawing primitive - all rendering reduces to these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Stroke part of an arc
    Arc {
        /// Arc path
        path: ArcPath,
        /// Painted window of the path
        window: StrokeWindow,
        /// Stroke style
        style: StrokeStyle,
    },

    /// Draw a rectangle
    Rect {
        /// Rectangle bounds
        bounds: Rect,
        /// Corner radius
        radius: CornerRadius,
        /// Box style
        style: BoxStyle,
    },

    /// Draw text
    Text {
        /// Text content
        content: String,
        /// Anchor position (meaning depends on the style's alignment)
        position: Point,
        /// Text style
        style: TextStyle,
    },
}

impl DrawCommand {
    /// Create a filled rectangle.
    #[must_use]
    pub const fn filled_rect(bounds: Rect, color: Color) -> Self {
        Self::Rect {
            bounds,
            radius: CornerRadius::ZERO,
            style: BoxStyle::fill(color),
        }
    }

    /// Create a stroked rectangle.
    #[must_use]
    pub const fn stroked_rect(bounds: Rect, stroke: StrokeStyle) -> Self {
        Self::Rect {
            bounds,
            radius: CornerRadius::ZERO,
            style: BoxStyle::stroke(stroke),
        }
    }

    /// Create a windowed arc stroke.
    #[must_use]
    pub const fn arc(path: ArcPath, window: StrokeWindow, style: StrokeStyle) -> Self {
        Self::Arc {
            path,
            window,
            style,
        }
    }
}
