//! Widgets for the arcgauge ring gauge.
//!
//! - [`Gauge`]: the ring gauge itself
//! - [`GaugeGeometry`]: layout math shared by the gauge layers
//! - [`Button`] and [`GaugeScreen`]: the host screen with Increase / Decrease

pub mod button;
pub mod gauge;
pub mod geometry;
pub mod screen;

pub use button::{Button, ButtonClicked};
pub use gauge::{ArcPrimitive, Gauge, GaugeLayer, GaugeState, LabelPrimitive};
pub use geometry::{DashLayout, GaugeGeometry};
pub use screen::{GaugeScreen, ValueRequested, DECREASE_VALUE, INCREASE_VALUE};
