//! Canvas implementations for rendering.

use crate::draw::{ArcPath, DrawCommand, StrokeStyle, StrokeWindow};
use crate::widget::{Canvas, TextAlign, TextStyle};
use crate::{Color, Point, Rect, Size};
use std::f32::consts::PI;
use std::fmt::Write as _;

/// A Canvas implementation that records draw operations as `DrawCommand`s.
///
/// This is useful for:
/// - Testing (verify what was painted)
/// - Serialization (dump a frame as JSON)
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    /// Create a new empty recording canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the recorded draw commands.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take ownership of the recorded commands, clearing the canvas.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Get the number of recorded commands.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Check if no commands have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Clear all recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Replay the recorded commands onto another canvas.
    pub fn replay(&self, target: &mut dyn Canvas) {
        for command in &self.commands {
            match command {
                DrawCommand::Arc {
                    path,
                    window,
                    style,
                } => target.stroke_arc(path, *window, style),
                DrawCommand::Rect { bounds, style, .. } => {
                    if let Some(fill) = style.fill {
                        target.fill_rect(*bounds, fill);
                    }
                    if let Some(stroke) = &style.stroke {
                        target.stroke_rect(*bounds, stroke.color, stroke.width);
                    }
                }
                DrawCommand::Text {
                    content,
                    position,
                    style,
                } => target.draw_text(content, *position, style),
            }
        }
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::filled_rect(rect, color));
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        self.commands.push(DrawCommand::stroked_rect(
            rect,
            StrokeStyle::solid(color, width),
        ));
    }

    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            content: text.to_string(),
            position,
            style: style.clone(),
        });
    }

    fn stroke_arc(&mut self, path: &ArcPath, window: StrokeWindow, style: &StrokeStyle) {
        self.commands
            .push(DrawCommand::arc(*path, window, style.clone()));
    }
}

/// A Canvas that writes an SVG document.
///
/// Stroke windows are clamped to the path before rasterizing, and dash
/// offsets are shifted by the clamped window start so dashes stay aligned
/// with the full arc.
#[derive(Debug)]
pub struct SvgCanvas {
    size: Size,
    background: Option<Color>,
    body: String,
}

impl SvgCanvas {
    /// Create an empty SVG canvas of the given size.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            background: None,
            body: String::new(),
        }
    }

    /// Fill the whole canvas with a color before any other element.
    #[must_use]
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Finish the document.
    #[must_use]
    pub fn finish(self) -> String {
        let Size { width, height } = self.size;
        let mut out = String::with_capacity(self.body.len() + 256);
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            fmt_num(width),
            fmt_num(height),
            fmt_num(width),
            fmt_num(height)
        );
        if let Some(bg) = self.background {
            let _ = writeln!(
                out,
                r#"  <rect x="0" y="0" width="100%" height="100%"{}/>"#,
                paint_attr("fill", bg)
            );
        }
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }

    /// Path data for the clamped `window` of `path`, split into segments
    /// shorter than half a turn so every SVG arc flag is unambiguous.
    fn arc_data(path: &ArcPath, window: StrokeWindow) -> String {
        let a0 = path.angle_at(window.start);
        let a1 = path.angle_at(window.end);
        let delta = a1 - a0;
        let segments = (delta.abs() / PI).ceil().max(1.0) as usize;
        let sweep_flag = u8::from(delta >= 0.0);

        let start = path.center.on_circle(path.radius, a0);
        let mut d = format!("M {} {}", fmt_num(start.x), fmt_num(start.y));
        for i in 1..=segments {
            let angle = delta.mul_add(i as f32 / segments as f32, a0);
            let p = path.center.on_circle(path.radius, angle);
            let _ = write!(
                d,
                " A {r} {r} 0 0 {sweep_flag} {} {}",
                fmt_num(p.x),
                fmt_num(p.y),
                r = fmt_num(path.radius)
            );
        }
        d
    }
}

impl Canvas for SvgCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let _ = writeln!(
            self.body,
            r#"  <rect x="{}" y="{}" width="{}" height="{}"{}/>"#,
            fmt_num(rect.x),
            fmt_num(rect.y),
            fmt_num(rect.width),
            fmt_num(rect.height),
            paint_attr("fill", color)
        );
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        let _ = writeln!(
            self.body,
            r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="none"{} stroke-width="{}"/>"#,
            fmt_num(rect.x),
            fmt_num(rect.y),
            fmt_num(rect.width),
            fmt_num(rect.height),
            paint_attr("stroke", color),
            fmt_num(width)
        );
    }

    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle) {
        let (anchor, baseline) = match style.align {
            TextAlign::Start => ("start", "hanging"),
            TextAlign::Center => ("middle", "central"),
        };
        let _ = writeln!(
            self.body,
            r#"  <text x="{}" y="{}" font-size="{}" font-weight="{}" text-anchor="{anchor}" dominant-baseline="{baseline}"{}>{}</text>"#,
            fmt_num(position.x),
            fmt_num(position.y),
            fmt_num(style.size),
            style.weight.numeric(),
            paint_attr("fill", style.color),
            escape(text)
        );
    }

    fn stroke_arc(&mut self, path: &ArcPath, window: StrokeWindow, style: &StrokeStyle) {
        let window = window.clamped();
        if window.is_empty() || path.radius <= 0.0 {
            return;
        }

        let mut attrs = format!(
            r#" fill="none"{} stroke-width="{}""#,
            paint_attr("stroke", style.color),
            fmt_num(style.width)
        );
        match style.cap {
            crate::LineCap::Butt => {}
            crate::LineCap::Round => attrs.push_str(r#" stroke-linecap="round""#),
            crate::LineCap::Square => attrs.push_str(r#" stroke-linecap="square""#),
        }
        if let Some(dash) = style.dash {
            let offset = window.start.mul_add(path.length().abs(), dash.phase);
            let _ = write!(
                attrs,
                r#" stroke-dasharray="{} {}" stroke-dashoffset="{}""#,
                fmt_num(dash.dash),
                fmt_num(dash.gap),
                fmt_num(offset)
            );
        }

        let _ = writeln!(
            self.body,
            r#"  <path d="{}"{attrs}/>"#,
            Self::arc_data(path, window)
        );
    }
}

/// `name="#rrggbb"` plus `name-opacity` when the color is translucent.
fn paint_attr(name: &str, color: Color) -> String {
    if color.is_opaque() {
        format!(r#" {name}="{}""#, color.to_hex())
    } else {
        format!(
            r#" {name}="{}" {name}-opacity="{}""#,
            color.to_hex(),
            fmt_num(color.a)
        )
    }
}

/// Compact number formatting: at most three decimals, no trailing zeros.
fn fmt_num(v: f32) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
