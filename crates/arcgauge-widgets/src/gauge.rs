//! Ring gauge widget.
//!
//! The gauge is a small scene of four stroked arcs and one label, painted
//! in this order:
//!
//! 1. background circle (full ring)
//! 2. dashed track along the start..end span
//! 3. dashed value arc, painted from 0 to `value / 100` of the span
//! 4. marker, a short thick arc centered on `value / 100`
//! 5. label with the decimal value
//!
//! Value changes tween the value arc end and the marker window. The gauge
//! never reads a clock: the host calls [`Gauge::advance_to`] with the
//! current time and paints afterwards.

use crate::geometry::{GaugeGeometry, MARKER_SIZE};
use arcgauge_core::{
    config::{VALUE_MAX, VALUE_MIN},
    AccessibleRole, AnimationConfig, ArcPath, Canvas, Color, Constraints, Event, FontWeight,
    GaugeConfig, LayoutResult, Rect, Size, StrokeStyle, StrokeWindow, TextAlign, TextStyle, Tween,
    TypeId, ValuePolicy, Widget,
};
use serde::{Deserialize, Serialize};
use std::any::Any;
use tracing::{debug, trace, warn};

/// Preferred side length when the parent leaves the size open.
pub const DEFAULT_SIDE: f32 = 200.0;

/// Which arc of the gauge a primitive draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GaugeLayer {
    /// Full ring behind everything
    BackgroundCircle,
    /// Dashed start..end span
    Track,
    /// Dashed arc up to the current value
    ValueArc,
    /// Thick tick at the current value
    Marker,
}

/// One stroked arc of the gauge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcPrimitive {
    /// Layer this arc belongs to
    pub layer: GaugeLayer,
    /// Path geometry
    pub path: ArcPath,
    /// Stroke paint
    pub stroke: StrokeStyle,
}

/// Value label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelPrimitive {
    /// Decimal value text
    pub text: String,
    /// Box the text is centered in
    pub frame: Rect,
    /// Text paint
    pub style: TextStyle,
}

/// Animation state of the gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GaugeState {
    /// All windows sit at their targets
    Idle,
    /// A value transition is in flight
    Transitioning,
}

/// Circular gauge showing an integer value on a dashed arc.
#[derive(Debug, Clone)]
pub struct Gauge {
    /// Current (target) value
    value: i32,
    /// Span start in degrees
    start_position: f64,
    /// Span end in degrees
    end_position: f64,
    /// Value arc and marker color
    value_color: Color,
    /// Track color
    track_color: Color,
    /// Background ring color
    circle_color: Color,
    /// Label color
    label_color: Color,
    /// Out-of-range handling
    value_policy: ValuePolicy,
    /// Transition settings
    animation: AnimationConfig,
    /// Accessible name
    accessible_name: Option<String>,
    /// Allocated bounds
    bounds: Rect,
    /// Geometry derived from bounds and span
    geometry: GaugeGeometry,
    background_circle: ArcPrimitive,
    track: ArcPrimitive,
    value_arc: ArcPrimitive,
    marker: ArcPrimitive,
    label: LabelPrimitive,
    /// Value arc end fraction
    value_end: Tween,
    /// Marker window start fraction
    marker_start: Tween,
    /// Marker window end fraction
    marker_end: Tween,
    /// Last time passed to `advance_to`
    clock: f64,
}

impl Default for Gauge {
    fn default() -> Self {
        Self::new()
    }
}

impl Gauge {
    /// Create a gauge with default settings (value 30, span -150..150).
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&GaugeConfig::default())
    }

    /// Create a gauge from a config. The initial value is shown at rest.
    #[must_use]
    pub fn from_config(config: &GaugeConfig) -> Self {
        let value = config.value_policy.apply(config.value);
        let geometry = GaugeGeometry::new(Rect::default(), config.start_position, config.end_position);
        let empty_arc = |layer| ArcPrimitive {
            layer,
            path: geometry.span(),
            stroke: StrokeStyle::default(),
        };

        let mut gauge = Self {
            value,
            start_position: config.start_position,
            end_position: config.end_position,
            value_color: config.value_color,
            track_color: config.track_color,
            circle_color: config.circle_color,
            label_color: config.label_color,
            value_policy: config.value_policy,
            animation: config.animation,
            accessible_name: None,
            bounds: Rect::default(),
            geometry,
            background_circle: empty_arc(GaugeLayer::BackgroundCircle),
            track: empty_arc(GaugeLayer::Track),
            value_arc: empty_arc(GaugeLayer::ValueArc),
            marker: empty_arc(GaugeLayer::Marker),
            label: LabelPrimitive {
                text: value.to_string(),
                frame: Rect::default(),
                style: TextStyle::default(),
            },
            value_end: Tween::at_rest(0.0),
            marker_start: Tween::at_rest(0.0),
            marker_end: Tween::at_rest(0.0),
            clock: 0.0,
        };
        gauge.snap_to_value();
        gauge.rebuild();
        gauge
    }

    // ===== Builder =====

    /// Set the value without animating.
    #[must_use]
    pub fn value(mut self, value: i32) -> Self {
        self.value = self.value_policy.apply(value);
        self.label.text = self.value.to_string();
        self.snap_to_value();
        self
    }

    /// Set the span start in degrees.
    #[must_use]
    pub fn start_position(mut self, degrees: f64) -> Self {
        self.set_start_position(degrees);
        self
    }

    /// Set the span end in degrees.
    #[must_use]
    pub fn end_position(mut self, degrees: f64) -> Self {
        self.set_end_position(degrees);
        self
    }

    /// Set the value arc and marker color.
    #[must_use]
    pub fn value_color(mut self, color: Color) -> Self {
        self.set_value_color(color);
        self
    }

    /// Set the track color.
    #[must_use]
    pub fn track_color(mut self, color: Color) -> Self {
        self.set_track_color(color);
        self
    }

    /// Set the background ring color.
    #[must_use]
    pub fn circle_color(mut self, color: Color) -> Self {
        self.set_circle_color(color);
        self
    }

    /// Set the label color.
    #[must_use]
    pub fn label_color(mut self, color: Color) -> Self {
        self.set_label_color(color);
        self
    }

    /// Set the out-of-range policy. Applies to later values.
    #[must_use]
    pub fn value_policy(mut self, policy: ValuePolicy) -> Self {
        self.value_policy = policy;
        self
    }

    /// Set transition duration and easing.
    #[must_use]
    pub fn animation(mut self, animation: AnimationConfig) -> Self {
        self.animation = animation;
        self
    }

    /// Set accessible name.
    #[must_use]
    pub fn with_accessible_name(mut self, name: impl Into<String>) -> Self {
        self.accessible_name = Some(name.into());
        self
    }

    // ===== Operations =====

    /// Set a new value and start a transition towards it.
    ///
    /// The transition starts from the currently displayed windows at the
    /// last time passed to [`Gauge::advance_to`]. The label switches at once.
    pub fn set_value(&mut self, value: i32) {
        let applied = self.value_policy.apply(value);
        if applied != value {
            warn!(value, clamped = applied, "gauge value outside [0, 100], clamping");
        } else if !(VALUE_MIN..=VALUE_MAX).contains(&value) {
            debug!(value, "gauge value outside [0, 100], arc will overshoot");
        }

        self.value = applied;
        self.label.text = applied.to_string();

        let now = self.clock;
        let (duration, easing) = (self.animation.duration, self.animation.easing);
        let (end, marker_start, marker_end) = targets(applied);
        self.value_end = Tween::new(self.value_end.sample(now), end, now, duration).with_easing(easing);
        self.marker_start =
            Tween::new(self.marker_start.sample(now), marker_start, now, duration).with_easing(easing);
        self.marker_end =
            Tween::new(self.marker_end.sample(now), marker_end, now, duration).with_easing(easing);

        debug!(value = applied, at = now, duration, "gauge value set");
    }

    /// Move the span start. Geometry is rebuilt and windows jump to their
    /// targets without a transition.
    pub fn set_start_position(&mut self, degrees: f64) {
        self.start_position = degrees;
        self.settle();
        self.rebuild();
        debug!(start = degrees, "gauge start position set");
    }

    /// Move the span end. Geometry is rebuilt and windows jump to their
    /// targets without a transition.
    pub fn set_end_position(&mut self, degrees: f64) {
        self.end_position = degrees;
        self.settle();
        self.rebuild();
        debug!(end = degrees, "gauge end position set");
    }

    /// Set the value arc and marker color.
    pub fn set_value_color(&mut self, color: Color) {
        self.value_color = color;
        self.value_arc.stroke.color = color;
        self.marker.stroke.color = color;
    }

    /// Set the track color.
    pub fn set_track_color(&mut self, color: Color) {
        self.track_color = color;
        self.track.stroke.color = color;
    }

    /// Set the background ring color.
    pub fn set_circle_color(&mut self, color: Color) {
        self.circle_color = color;
        self.background_circle.stroke.color = color;
    }

    /// Set the label color.
    pub fn set_label_color(&mut self, color: Color) {
        self.label_color = color;
        self.label.style.color = color;
    }

    /// Set all four colors at once.
    pub fn set_colors(&mut self, value: Color, track: Color, circle: Color, label: Color) {
        self.set_value_color(value);
        self.set_track_color(track);
        self.set_circle_color(circle);
        self.set_label_color(label);
    }

    /// Recompute geometry for new bounds. An in-flight transition keeps
    /// running against the new geometry.
    pub fn on_bounds_changed(&mut self, bounds: Rect) {
        if bounds == self.bounds {
            return;
        }
        self.bounds = bounds;
        self.rebuild();
        trace!(
            width = bounds.width,
            height = bounds.height,
            radius = self.geometry.radius,
            "gauge bounds changed"
        );
    }

    /// Advance the gauge clock to `now` (seconds). Time never runs backwards.
    pub fn advance_to(&mut self, now: f64) {
        if now.is_finite() && now > self.clock {
            self.clock = now;
        }
    }

    /// Current animation state.
    #[must_use]
    pub fn state(&self) -> GaugeState {
        let now = self.clock;
        if self.value_end.is_finished(now)
            && self.marker_start.is_finished(now)
            && self.marker_end.is_finished(now)
        {
            GaugeState::Idle
        } else {
            GaugeState::Transitioning
        }
    }

    /// Value arc window at the current clock.
    #[must_use]
    pub fn value_window(&self) -> StrokeWindow {
        StrokeWindow::new(0.0, self.value_end.sample(self.clock) as f32)
    }

    /// Marker window at the current clock.
    #[must_use]
    pub fn marker_window(&self) -> StrokeWindow {
        StrokeWindow::new(
            self.marker_start.sample(self.clock) as f32,
            self.marker_end.sample(self.clock) as f32,
        )
    }

    /// Value arc window once the transition settles.
    #[must_use]
    pub fn target_value_window(&self) -> StrokeWindow {
        StrokeWindow::new(0.0, self.value_end.to as f32)
    }

    /// Marker window once the transition settles.
    #[must_use]
    pub fn target_marker_window(&self) -> StrokeWindow {
        StrokeWindow::new(self.marker_start.to as f32, self.marker_end.to as f32)
    }

    // ===== Accessors =====

    /// Get current value.
    #[must_use]
    pub const fn get_value(&self) -> i32 {
        self.value
    }

    /// Get span start in degrees.
    #[must_use]
    pub const fn get_start_position(&self) -> f64 {
        self.start_position
    }

    /// Get span end in degrees.
    #[must_use]
    pub const fn get_end_position(&self) -> f64 {
        self.end_position
    }

    /// Get value arc and marker color.
    #[must_use]
    pub const fn get_value_color(&self) -> Color {
        self.value_color
    }

    /// Get track color.
    #[must_use]
    pub const fn get_track_color(&self) -> Color {
        self.track_color
    }

    /// Get background ring color.
    #[must_use]
    pub const fn get_circle_color(&self) -> Color {
        self.circle_color
    }

    /// Get label color.
    #[must_use]
    pub const fn get_label_color(&self) -> Color {
        self.label_color
    }

    /// Get the out-of-range policy.
    #[must_use]
    pub const fn get_value_policy(&self) -> ValuePolicy {
        self.value_policy
    }

    /// Get the current clock in seconds.
    #[must_use]
    pub const fn clock(&self) -> f64 {
        self.clock
    }

    /// Derived geometry.
    #[must_use]
    pub const fn geometry(&self) -> &GaugeGeometry {
        &self.geometry
    }

    /// Label primitive.
    #[must_use]
    pub const fn label(&self) -> &LabelPrimitive {
        &self.label
    }

    /// Label text.
    #[must_use]
    pub fn label_text(&self) -> &str {
        &self.label.text
    }

    /// Arc primitives in paint order.
    #[must_use]
    pub const fn layers(&self) -> [&ArcPrimitive; 4] {
        [
            &self.background_circle,
            &self.track,
            &self.value_arc,
            &self.marker,
        ]
    }

    /// Painted window of a layer at the current clock.
    #[must_use]
    pub fn window(&self, layer: GaugeLayer) -> StrokeWindow {
        match layer {
            GaugeLayer::BackgroundCircle | GaugeLayer::Track => StrokeWindow::FULL,
            GaugeLayer::ValueArc => self.value_window(),
            GaugeLayer::Marker => self.marker_window(),
        }
    }

    // ===== Internals =====

    fn snap_to_value(&mut self) {
        let (end, marker_start, marker_end) = targets(self.value);
        self.value_end = Tween::at_rest(end);
        self.marker_start = Tween::at_rest(marker_start);
        self.marker_end = Tween::at_rest(marker_end);
    }

    fn settle(&mut self) {
        self.value_end = self.value_end.settled();
        self.marker_start = self.marker_start.settled();
        self.marker_end = self.marker_end.settled();
    }

    fn rebuild(&mut self) {
        let geometry = GaugeGeometry::new(self.bounds, self.start_position, self.end_position);
        let dash = geometry.dash_pattern();
        if dash.is_none() && geometry.radius > 0.0 {
            warn!(
                start = self.start_position,
                end = self.end_position,
                "gauge span has no usable length, drawing track solid"
            );
        }

        let span = geometry.span();
        self.background_circle.path = geometry.full_circle();
        self.background_circle.stroke = StrokeStyle::solid(self.circle_color, geometry.circle_width());
        self.track.path = span;
        self.track.stroke = StrokeStyle::solid(self.track_color, geometry.line_width).with_dash(dash);
        self.value_arc.path = span;
        self.value_arc.stroke = StrokeStyle::solid(self.value_color, geometry.line_width).with_dash(dash);
        self.marker.path = span;
        self.marker.stroke = StrokeStyle::solid(self.value_color, geometry.marker_width());

        self.label.style = TextStyle {
            size: geometry.label_font_size(),
            color: self.label_color,
            weight: FontWeight::Thin,
            align: TextAlign::Center,
        };
        self.label.frame = geometry.label_frame(&self.label.style);
        self.geometry = geometry;
    }
}

/// Value arc end and marker window for a value on the 0..100 scale.
fn targets(value: i32) -> (f64, f64, f64) {
    let value = f64::from(value);
    (
        value / 100.0,
        (value - MARKER_SIZE) / 100.0,
        (value + MARKER_SIZE) / 100.0,
    )
}

impl Widget for Gauge {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(Size::new(DEFAULT_SIDE, DEFAULT_SIDE))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.on_bounds_changed(bounds);
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        for arc in self.layers() {
            canvas.stroke_arc(&arc.path, self.window(arc.layer), &arc.stroke);
        }
        canvas.draw_text(&self.label.text, self.label.frame.center(), &self.label.style);
    }

    fn event(&mut self, _event: &Event) -> Option<Box<dyn Any + Send>> {
        None
    }

    fn accessible_name(&self) -> Option<&str> {
        self.accessible_name.as_deref().or(Some(&self.label.text))
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Meter
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
