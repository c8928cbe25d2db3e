//! Gauge layout math: ring size, stroke widths, angles, dash tiling and
//! label placement, all derived from the bounding box and angle span.

use arcgauge_core::{ArcPath, DashPattern, Point, Rect, Size, TextStyle};
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

/// Ring radius relative to half the shorter side.
pub const RADIUS_TO_SIZE: f32 = 0.8;
/// Base line width relative to the shorter side.
pub const LINE_WIDTH_TO_SIZE: f32 = 1.0 / 20.0;
/// Background ring width relative to the base line width.
pub const CIRCLE_WIDTH_TO_LINE_WIDTH: f32 = 1.2;
/// Marker width relative to the base line width.
pub const MARKER_WIDTH_TO_LINE_WIDTH: f32 = 1.8;
/// Dash length relative to the base line width.
pub const DASH_SIZE_TO_LINE_WIDTH: f32 = 0.25;
/// Preferred gap between dashes relative to the base line width.
pub const DASH_SPACING_TO_LINE_WIDTH: f32 = 0.25;
/// Marker width on the 0..100 value scale.
pub const MARKER_SIZE: f64 = 0.5;
/// Label font size relative to the radius.
pub const FONT_SIZE_TO_RADIUS: f32 = 0.8;
/// Label box width relative to the radius.
pub const LABEL_WIDTH_TO_RADIUS: f32 = 2.0;
/// Longest span in degrees.
pub const MAX_SPAN: f64 = 360.0;

/// Convert a position in degrees (0 = 12 o'clock, clockwise) to a screen
/// angle in radians (0 = 3 o'clock, clockwise).
#[must_use]
pub fn position_to_angle(degrees: f64) -> f32 {
    degrees.to_radians() as f32 - FRAC_PI_2
}

/// Derived ring geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaugeGeometry {
    /// Center of the bounding box
    pub center: Point,
    /// Ring radius
    pub radius: f32,
    /// Base stroke width
    pub line_width: f32,
    /// Span start, radians
    pub start_angle: f32,
    /// Span end, radians
    pub end_angle: f32,
}

/// Intermediate values of the dash tiling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashLayout {
    /// Painted length of each dash
    pub dash_size: f32,
    /// Gap the tiling aims for
    pub expected_spacing: f32,
    /// Length of the span (absolute)
    pub arc_length: f32,
    /// Whole number of dash periods along the span, at least one
    pub number_of_dashes: f32,
    /// Gap that makes the dashes tile the span exactly
    pub actual_spacing: f32,
    /// Pattern phase
    pub phase: f32,
}

impl DashLayout {
    /// The resulting dash pattern.
    #[must_use]
    pub const fn pattern(&self) -> DashPattern {
        DashPattern::new(self.dash_size, self.actual_spacing, self.phase)
    }
}

impl GaugeGeometry {
    /// Compute the geometry for `bounds` and a span in degrees.
    ///
    /// The span is capped at one full turn in either direction so the
    /// ring never overlaps itself.
    #[must_use]
    pub fn new(bounds: Rect, start_position: f64, end_position: f64) -> Self {
        let side = bounds.size().min_side().max(0.0);
        let sweep = (end_position - start_position).clamp(-MAX_SPAN, MAX_SPAN);
        Self {
            center: bounds.center(),
            radius: side / 2.0 * RADIUS_TO_SIZE,
            line_width: side * LINE_WIDTH_TO_SIZE,
            start_angle: position_to_angle(start_position),
            end_angle: position_to_angle(start_position + sweep),
        }
    }

    /// The start..end arc shared by track, value arc and marker.
    #[must_use]
    pub const fn span(&self) -> ArcPath {
        ArcPath::new(self.center, self.radius, self.start_angle, self.end_angle)
    }

    /// The full ring behind everything.
    #[must_use]
    pub const fn full_circle(&self) -> ArcPath {
        ArcPath::circle(self.center, self.radius)
    }

    /// Background ring stroke width.
    #[must_use]
    pub fn circle_width(&self) -> f32 {
        self.line_width * CIRCLE_WIDTH_TO_LINE_WIDTH
    }

    /// Marker stroke width.
    #[must_use]
    pub fn marker_width(&self) -> f32 {
        self.line_width * MARKER_WIDTH_TO_LINE_WIDTH
    }

    /// Dash tiling for the span, so dashes fit a whole number of times
    /// instead of leaving a truncated dash at the end.
    ///
    /// Returns `None` for a zero-length or non-finite span (the caller
    /// strokes solid). A span shorter than one period still gets one dash.
    #[must_use]
    pub fn dash_layout(&self) -> Option<DashLayout> {
        let dash_size = self.line_width * DASH_SIZE_TO_LINE_WIDTH;
        let expected_spacing = self.line_width * DASH_SPACING_TO_LINE_WIDTH;
        let arc_length = self.span().length().abs();

        if !arc_length.is_finite() || arc_length <= 0.0 || dash_size <= 0.0 {
            return None;
        }

        let number_of_dashes = (arc_length / (dash_size + expected_spacing))
            .round()
            .max(1.0);
        let actual_spacing = (arc_length / number_of_dashes - dash_size).max(0.0);

        Some(DashLayout {
            dash_size,
            expected_spacing,
            arc_length,
            number_of_dashes,
            actual_spacing,
            phase: self.line_width,
        })
    }

    /// Dash pattern for the span, if it has one.
    #[must_use]
    pub fn dash_pattern(&self) -> Option<DashPattern> {
        self.dash_layout().map(|layout| layout.pattern())
    }

    /// Label font size.
    #[must_use]
    pub fn label_font_size(&self) -> f32 {
        self.radius * FONT_SIZE_TO_RADIUS
    }

    /// Label box: `2 × radius` wide, one line high, centered on the ring.
    #[must_use]
    pub fn label_frame(&self, style: &TextStyle) -> Rect {
        Rect::centered(
            self.center,
            Size::new(self.radius * LABEL_WIDTH_TO_RADIUS, style.line_height()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::{PI, TAU};

    fn square(side: f32) -> Rect {
        Rect::new(0.0, 0.0, side, side)
    }

    #[test]
    fn test_position_to_angle() {
        assert!((position_to_angle(0.0) + FRAC_PI_2).abs() < 1e-6);
        assert!(position_to_angle(90.0).abs() < 1e-6);
        assert!((position_to_angle(180.0) - FRAC_PI_2).abs() < 1e-6);
        assert!((position_to_angle(-150.0) - (-150f32.to_radians() - FRAC_PI_2)).abs() < 1e-6);
    }

    #[test]
    fn test_geometry_from_square_bounds() {
        let g = GaugeGeometry::new(square(200.0), -150.0, 150.0);
        assert_eq!(g.center, Point::new(100.0, 100.0));
        assert!((g.radius - 80.0).abs() < 1e-4);
        assert!((g.line_width - 10.0).abs() < 1e-4);
        assert!((g.circle_width() - 12.0).abs() < 1e-4);
        assert!((g.marker_width() - 18.0).abs() < 1e-4);
    }

    #[test]
    fn test_geometry_uses_shorter_side_and_offset_center() {
        let g = GaugeGeometry::new(Rect::new(10.0, 20.0, 300.0, 100.0), -150.0, 150.0);
        assert_eq!(g.center, Point::new(160.0, 70.0));
        assert!((g.radius - 40.0).abs() < 1e-4);
        assert!((g.line_width - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_span_shares_center_and_radius_with_circle() {
        let g = GaugeGeometry::new(square(120.0), -90.0, 90.0);
        let span = g.span();
        let circle = g.full_circle();
        assert_eq!(span.center, circle.center);
        assert_eq!(span.radius, circle.radius);
        assert!((span.sweep() - PI).abs() < 1e-5);
    }

    #[test]
    fn test_dash_layout_default_span() {
        // 200x200: radius 80, line width 10, span 300 degrees
        let g = GaugeGeometry::new(square(200.0), -150.0, 150.0);
        let d = g.dash_layout().unwrap();

        let arc_length = 300f32.to_radians() * 80.0;
        assert!((d.arc_length - arc_length).abs() < 1e-2);
        assert_eq!(d.dash_size, 2.5);
        assert_eq!(d.expected_spacing, 2.5);
        assert_eq!(d.number_of_dashes, (arc_length / 5.0).round());
        assert!(
            (d.number_of_dashes * (d.dash_size + d.actual_spacing) - d.arc_length).abs() < 1e-2,
            "dashes must tile the span exactly"
        );
        assert_eq!(d.phase, 10.0);

        let p = g.dash_pattern().unwrap();
        assert_eq!(p.dash, d.dash_size);
        assert_eq!(p.gap, d.actual_spacing);
        assert_eq!(p.phase, g.line_width);
    }

    #[test]
    fn test_dash_layout_zero_span_is_solid() {
        let g = GaugeGeometry::new(square(200.0), 45.0, 45.0);
        assert!(g.dash_layout().is_none());
        assert!(g.dash_pattern().is_none());
    }

    #[test]
    fn test_dash_layout_empty_bounds_is_solid() {
        let g = GaugeGeometry::new(Rect::default(), -150.0, 150.0);
        assert!(g.dash_layout().is_none());
    }

    #[test]
    fn test_dash_layout_tiny_span_gets_one_dash() {
        let g = GaugeGeometry::new(square(200.0), 0.0, 0.5);
        let d = g.dash_layout().unwrap();
        assert_eq!(d.number_of_dashes, 1.0);
        assert!(d.actual_spacing >= 0.0);
    }

    #[test]
    fn test_dash_layout_reversed_span_uses_length_magnitude() {
        let forward = GaugeGeometry::new(square(200.0), -60.0, 60.0);
        let reversed = GaugeGeometry::new(square(200.0), 60.0, -60.0);
        let f = forward.dash_layout().unwrap();
        let r = reversed.dash_layout().unwrap();
        assert_eq!(f.number_of_dashes, r.number_of_dashes);
        assert!((f.actual_spacing - r.actual_spacing).abs() < 1e-4);
    }

    #[test]
    fn test_span_capped_at_one_turn() {
        let g = GaugeGeometry::new(square(200.0), -360.0, 360.0);
        assert!((g.span().sweep() - TAU).abs() < 1e-5);
        assert!((g.start_angle - position_to_angle(-360.0)).abs() < 1e-6);

        let g = GaugeGeometry::new(square(200.0), 300.0, -300.0);
        assert!((g.span().sweep() + TAU).abs() < 1e-5);

        // half the value scale lands half way round, not a full ring
        let g = GaugeGeometry::new(square(200.0), -360.0, 360.0);
        let half = g.span().angle_at(0.5) - g.start_angle;
        assert!((half - PI).abs() < 1e-5);
    }

    #[test]
    fn test_label_frame_centered() {
        let g = GaugeGeometry::new(square(200.0), -150.0, 150.0);
        assert!((g.label_font_size() - 64.0).abs() < 1e-4);

        let style = TextStyle {
            size: g.label_font_size(),
            ..Default::default()
        };
        let frame = g.label_frame(&style);
        assert!((frame.width - 160.0).abs() < 1e-4);
        assert!((frame.height - 64.0 * TextStyle::LINE_HEIGHT).abs() < 1e-3);
        assert!((frame.center().x - 100.0).abs() < 1e-4);
        assert!((frame.center().y - 100.0).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_dashes_tile_any_forward_span(
            start in -360.0f64..360.0,
            extent in 0.01f64..720.0,
            side in 10.0f32..2000.0,
        ) {
            let end = (start + extent).min(360.0);
            prop_assume!(end > start);
            let g = GaugeGeometry::new(square(side), start, end);
            let d = g.dash_layout().unwrap();
            prop_assert!(d.number_of_dashes >= 1.0);
            prop_assert!(d.actual_spacing >= 0.0);
            prop_assert!(d.actual_spacing.is_finite());
        }

        #[test]
        fn prop_radius_and_line_width_scale_with_shorter_side(w in 1.0f32..2000.0, h in 1.0f32..2000.0) {
            let g = GaugeGeometry::new(Rect::new(0.0, 0.0, w, h), -150.0, 150.0);
            let side = w.min(h);
            prop_assert!((g.radius - side * 0.4).abs() < 1e-2);
            prop_assert!((g.line_width - side / 20.0).abs() < 1e-3);
        }
    }
}
