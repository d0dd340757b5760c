//! Minimal typed SVG builder.
//!
//! The renderers assemble a list of shape records and serialize them to
//! markup in one place, instead of concatenating strings inline. Text
//! content is the only operand that can carry markup metacharacters, so
//! escaping lives in exactly one function.

use std::fmt::Write;

/// One SVG shape record.
#[derive(Clone, Debug)]
pub enum Element {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: String,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        fill: String,
        opacity: Option<f64>,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: String,
        stroke_width: f64,
        opacity: Option<f64>,
    },
    Path {
        d: String,
        fill: String,
    },
    Text {
        x: f64,
        y: f64,
        content: String,
        fill: String,
        font_size: f64,
    },
}

/// An SVG document: a fixed viewport plus an ordered list of elements.
/// Elements render in insertion order (later elements paint on top).
#[derive(Clone, Debug)]
pub struct Document {
    width: u32,
    height: u32,
    elements: Vec<Element>,
}

impl Document {
    pub fn new(width: u32, height: u32) -> Self {
        Document {
            width,
            height,
            elements: Vec::new(),
        }
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Serialize the document to standalone SVG markup.
    ///
    /// Coordinates are written with enough precision to round-trip the
    /// renderer's geometry while keeping output byte-stable: plain `{}`
    /// formatting of f64 is exact and deterministic in Rust.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(64 + self.elements.len() * 80);
        let _ = write!(
            out,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
            w = self.width,
            h = self.height
        );
        for element in &self.elements {
            self.render_element(&mut out, element);
        }
        out.push_str("</svg>");
        out
    }

    fn render_element(&self, out: &mut String, element: &Element) {
        match element {
            Element::Rect {
                x,
                y,
                width,
                height,
                fill,
            } => {
                let _ = write!(
                    out,
                    "<rect x=\"{x}\" y=\"{y}\" width=\"{width}\" height=\"{height}\" fill=\"{fill}\"/>"
                );
            }
            Element::Circle {
                cx,
                cy,
                r,
                fill,
                opacity,
            } => {
                let _ = write!(out, "<circle cx=\"{cx}\" cy=\"{cy}\" r=\"{r}\" fill=\"{fill}\"");
                if let Some(opacity) = opacity {
                    let _ = write!(out, " opacity=\"{opacity}\"");
                }
                out.push_str("/>");
            }
            Element::Line {
                x1,
                y1,
                x2,
                y2,
                stroke,
                stroke_width,
                opacity,
            } => {
                let _ = write!(
                    out,
                    "<line x1=\"{x1}\" y1=\"{y1}\" x2=\"{x2}\" y2=\"{y2}\" stroke=\"{stroke}\" stroke-width=\"{stroke_width}\""
                );
                if let Some(opacity) = opacity {
                    let _ = write!(out, " opacity=\"{opacity}\"");
                }
                out.push_str("/>");
            }
            Element::Path { d, fill } => {
                let _ = write!(out, "<path d=\"{d}\" fill=\"{fill}\"/>");
            }
            Element::Text {
                x,
                y,
                content,
                fill,
                font_size,
            } => {
                let _ = write!(
                    out,
                    "<text x=\"{x}\" y=\"{y}\" fill=\"{fill}\" font-size=\"{font_size}\" font-family=\"sans-serif\">{}</text>",
                    escape_text(content)
                );
            }
        }
    }
}

/// Escape the three characters with meaning in XML text content.
fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
