//! Host screen: one gauge above an "Increase" / "Decrease" button row.

use crate::button::{Button, ButtonClicked};
use crate::gauge::Gauge;
use arcgauge_core::{
    AccessibleRole, Canvas, Constraints, Event, GaugeConfig, Key, LayoutResult, Rect, Size, TypeId,
    Widget,
};
use std::any::Any;
use tracing::info;

/// Value applied by the Increase button.
pub const INCREASE_VALUE: i32 = 70;
/// Value applied by the Decrease button.
pub const DECREASE_VALUE: i32 = 10;
/// Height of the button row.
pub const BUTTON_ROW_HEIGHT: f32 = 64.0;
/// Gap around and between buttons.
pub const BUTTON_SPACING: f32 = 12.0;

/// Message emitted when the screen pushed a new value into the gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueRequested {
    /// Value passed to the gauge
    pub value: i32,
}

/// Gauge plus two buttons that set fixed values.
#[derive(Debug, Clone)]
pub struct GaugeScreen {
    gauge: Gauge,
    increase: Button,
    decrease: Button,
    bounds: Rect,
}

impl Default for GaugeScreen {
    fn default() -> Self {
        Self::new(Gauge::new())
    }
}

impl GaugeScreen {
    /// Wrap an existing gauge.
    #[must_use]
    pub fn new(gauge: Gauge) -> Self {
        Self {
            gauge,
            increase: Button::new("Increase"),
            decrease: Button::new("Decrease"),
            bounds: Rect::default(),
        }
    }

    /// Build the screen around a gauge created from `config`.
    #[must_use]
    pub fn from_config(config: &GaugeConfig) -> Self {
        Self::new(Gauge::from_config(config))
    }

    /// Press "Increase": the gauge moves to 70.
    pub fn increase(&mut self) -> ValueRequested {
        self.request(INCREASE_VALUE)
    }

    /// Press "Decrease": the gauge moves to 10.
    pub fn decrease(&mut self) -> ValueRequested {
        self.request(DECREASE_VALUE)
    }

    /// Advance the gauge clock.
    pub fn advance_to(&mut self, now: f64) {
        self.gauge.advance_to(now);
    }

    /// The hosted gauge.
    #[must_use]
    pub const fn gauge(&self) -> &Gauge {
        &self.gauge
    }

    /// The hosted gauge, mutably.
    pub fn gauge_mut(&mut self) -> &mut Gauge {
        &mut self.gauge
    }

    /// The Increase button.
    #[must_use]
    pub const fn increase_button(&self) -> &Button {
        &self.increase
    }

    /// The Decrease button.
    #[must_use]
    pub const fn decrease_button(&self) -> &Button {
        &self.decrease
    }

    fn request(&mut self, value: i32) -> ValueRequested {
        info!(value, "gauge screen requested value");
        self.gauge.set_value(value);
        ValueRequested { value }
    }

    fn button_bounds(&self) -> (Rect, Rect) {
        let row_y = self.bounds.y + (self.bounds.height - BUTTON_ROW_HEIGHT).max(0.0);
        let row_height = BUTTON_ROW_HEIGHT.min(self.bounds.height);
        let width = ((self.bounds.width - BUTTON_SPACING * 3.0) / 2.0).max(0.0);
        let height = (row_height - BUTTON_SPACING * 2.0).max(0.0);
        let y = row_y + BUTTON_SPACING;

        let decrease = Rect::new(self.bounds.x + BUTTON_SPACING, y, width, height);
        let increase = Rect::new(
            self.bounds.x + BUTTON_SPACING * 2.0 + width,
            y,
            width,
            height,
        );
        (decrease, increase)
    }
}

impl Widget for GaugeScreen {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let gauge = self.gauge.measure(Constraints::unbounded());
        constraints.constrain(Size::new(
            gauge.width,
            gauge.height + BUTTON_ROW_HEIGHT,
        ))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        let gauge_height = (bounds.height - BUTTON_ROW_HEIGHT).max(0.0);
        let side = bounds.width.min(gauge_height);
        let region = Rect::new(bounds.x, bounds.y, bounds.width, gauge_height);
        self.gauge
            .layout(Rect::centered(region.center(), Size::new(side, side)));

        let (decrease, increase) = self.button_bounds();
        self.decrease.layout(decrease);
        self.increase.layout(increase);

        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        self.gauge.paint(canvas);
        self.decrease.paint(canvas);
        self.increase.paint(canvas);
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        match event {
            Event::KeyDown { key: Key::Up } => Some(Box::new(self.increase())),
            Event::KeyDown { key: Key::Down } => Some(Box::new(self.decrease())),
            Event::Resize { width, height } => {
                self.layout(Rect::new(0.0, 0.0, *width, *height));
                None
            }
            Event::MouseMove { .. } | Event::MouseDown { .. } | Event::MouseUp { .. } => {
                let increased = clicked(self.increase.event(event));
                let decreased = clicked(self.decrease.event(event));
                if increased {
                    Some(Box::new(self.increase()))
                } else if decreased {
                    Some(Box::new(self.decrease()))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn accessible_name(&self) -> Option<&str> {
        Some("Gauge")
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Group
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

fn clicked(message: Option<Box<dyn Any + Send>>) -> bool {
    message.is_some_and(|m| m.downcast_ref::<ButtonClicked>().is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gauge::GaugeState;
    use arcgauge_core::{MouseButton, Point, RecordingCanvas};

    fn screen() -> GaugeScreen {
        let mut s = GaugeScreen::default();
        s.layout(Rect::new(0.0, 0.0, 320.0, 400.0));
        s
    }

    fn click(s: &mut GaugeScreen, at: Point) -> Option<Box<dyn Any + Send>> {
        s.event(&Event::MouseDown {
            position: at,
            button: MouseButton::Left,
        });
        s.event(&Event::MouseUp {
            position: at,
            button: MouseButton::Left,
        })
    }

    #[test]
    fn test_screen_layout_splits_gauge_and_buttons() {
        let s = screen();
        assert_eq!(Widget::bounds(s.gauge()), Rect::new(0.0, 8.0, 320.0, 320.0));

        let dec = Widget::bounds(s.decrease_button());
        let inc = Widget::bounds(s.increase_button());
        assert!(dec.x < inc.x);
        assert_eq!(dec.width, inc.width);
        assert!(dec.y >= 336.0);
        assert!(inc.x + inc.width <= 320.0);
    }

    #[test]
    fn test_increase_sets_seventy() {
        let mut s = screen();
        let msg = s.increase();
        assert_eq!(msg.value, 70);
        assert_eq!(s.gauge().get_value(), 70);
        assert_eq!(s.gauge().label_text(), "70");
        assert_eq!(s.gauge().state(), GaugeState::Transitioning);
    }

    #[test]
    fn test_decrease_sets_ten() {
        let mut s = screen();
        s.decrease();
        s.advance_to(1.0);
        assert_eq!(s.gauge().get_value(), 10);
        assert!((s.gauge().value_window().end - 0.1).abs() < 1e-5);
        let marker = s.gauge().marker_window();
        assert!((marker.start - 0.095).abs() < 1e-5);
        assert!((marker.end - 0.105).abs() < 1e-5);
        assert_eq!(s.gauge().label_text(), "10");
    }

    #[test]
    fn test_click_increase_button() {
        let mut s = screen();
        let center = Widget::bounds(s.increase_button()).center();
        let msg = click(&mut s, center).expect("value message");
        assert_eq!(
            msg.downcast_ref::<ValueRequested>(),
            Some(&ValueRequested { value: 70 })
        );
        assert_eq!(s.gauge().get_value(), 70);
    }

    #[test]
    fn test_click_decrease_button() {
        let mut s = screen();
        let center = Widget::bounds(s.decrease_button()).center();
        let msg = click(&mut s, center).expect("value message");
        assert_eq!(
            msg.downcast_ref::<ValueRequested>(),
            Some(&ValueRequested { value: 10 })
        );
    }

    #[test]
    fn test_click_on_gauge_does_nothing() {
        let mut s = screen();
        assert!(click(&mut s, Point::new(160.0, 160.0)).is_none());
        assert_eq!(s.gauge().get_value(), 30);
    }

    #[test]
    fn test_arrow_keys_are_shortcuts() {
        let mut s = screen();
        s.event(&Event::KeyDown { key: Key::Up });
        assert_eq!(s.gauge().get_value(), 70);
        s.event(&Event::KeyDown { key: Key::Down });
        assert_eq!(s.gauge().get_value(), 10);
    }

    #[test]
    fn test_resize_relayouts() {
        let mut s = screen();
        s.event(&Event::Resize {
            width: 640.0,
            height: 800.0,
        });
        assert_eq!(Widget::bounds(&s), Rect::new(0.0, 0.0, 640.0, 800.0));
        assert!((s.gauge().geometry().radius - 256.0).abs() < 1e-3);
    }

    #[test]
    fn test_screen_paints_gauge_then_buttons() {
        let s = screen();
        let mut canvas = RecordingCanvas::new();
        s.paint(&mut canvas);
        // 4 arcs + label, then background + label per button
        assert_eq!(canvas.command_count(), 9);
    }

    #[test]
    fn test_screen_from_config() {
        let config = GaugeConfig {
            value: 42,
            ..Default::default()
        };
        let s = GaugeScreen::from_config(&config);
        assert_eq!(s.gauge().get_value(), 42);
        assert_eq!(Widget::accessible_role(&s), AccessibleRole::Group);
    }
}
