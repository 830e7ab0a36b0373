use std::fmt::Write;

use crate::renderer::{RenderCommand, RenderFrame, Surface};
use crate::style::Color;

/// Paints frames into a standalone SVG document.
///
/// Each `paint` replaces the previous document, like a canvas repaint.
#[derive(Debug, Default)]
pub struct SvgSurface {
    document: String,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn into_document(self) -> String {
        self.document
    }
}

impl Surface for SvgSurface {
    fn paint(&mut self, frame: &RenderFrame) {
        let mut out = String::new();
        // `write!` into a String cannot fail.
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = frame.width,
            h = frame.height,
        );
        for command in &frame.commands {
            let _ = write_command(&mut out, frame, command);
        }
        out.push_str("</svg>\n");
        self.document = out;
    }
}

fn write_command(out: &mut String, frame: &RenderFrame, command: &RenderCommand) -> std::fmt::Result {
    match command {
        RenderCommand::Clear => writeln!(
            out,
            r#"  <rect x="0" y="0" width="{}" height="{}" fill="white"/>"#,
            frame.width, frame.height
        ),
        RenderCommand::Line { from, to, stroke } => writeln!(
            out,
            r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-opacity="{}" stroke-width="1"/>"#,
            from.x,
            from.y,
            to.x,
            to.y,
            rgb(*stroke),
            stroke.a
        ),
        RenderCommand::Circle {
            center,
            radius,
            fill,
            stroke,
        } => {
            write!(
                out,
                r#"  <circle cx="{}" cy="{}" r="{}" fill="{}" fill-opacity="{}""#,
                center.x,
                center.y,
                radius,
                rgb(*fill),
                fill.a
            )?;
            if let Some(stroke) = stroke {
                write!(out, r#" stroke="{}" stroke-opacity="{}" stroke-width="1""#, rgb(*stroke), stroke.a)?;
            }
            writeln!(out, "/>")
        }
        RenderCommand::Polygon {
            points,
            fill,
            stroke,
        } => {
            out.push_str(r#"  <polygon points=""#);
            for (i, p) in points.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                write!(out, "{},{}", p.x, p.y)?;
            }
            writeln!(
                out,
                r#"" fill="{}" fill-opacity="{}" stroke="{}" stroke-opacity="{}" stroke-width="1"/>"#,
                rgb(*fill),
                fill.a,
                rgb(*stroke),
                stroke.a
            )
        }
    }
}

fn rgb(c: Color) -> String {
    format!("rgb({},{},{})", c.r, c.g, c.b)
}
