//! Core types and traits for the arcgauge ring gauge.
//!
//! This crate provides the pieces a gauge is built from:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Color representation: [`Color`] with hex parsing
//! - Draw commands: [`DrawCommand`], [`ArcPath`], [`StrokeWindow`], [`DashPattern`]
//! - Render targets: [`RecordingCanvas`], [`SvgCanvas`]
//! - Explicit tweening: [`Tween`], [`Easing`]
//! - Configuration: [`GaugeConfig`] loaded from YAML

pub mod animation;
mod canvas;
mod color;
pub mod config;
mod constraints;
pub mod draw;
mod error;
mod event;
mod geometry;
pub mod widget;

pub use animation::{Easing, Tween};
pub use canvas::{RecordingCanvas, SvgCanvas};
pub use color::{Color, ColorParseError};
pub use config::{AnimationConfig, GaugeConfig, ValuePolicy};
pub use constraints::Constraints;
pub use draw::{ArcPath, BoxStyle, DashPattern, DrawCommand, LineCap, StrokeStyle, StrokeWindow};
pub use error::{GaugeError, Result};
pub use event::{Event, Key, MouseButton};
pub use geometry::{CornerRadius, Point, Rect, Size};
pub use widget::{
    AccessibleRole, Canvas, FontWeight, LayoutResult, TextAlign, TextStyle, TypeId, Widget,
};
