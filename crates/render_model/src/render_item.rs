//! Render item types

use crate::FontBook;
use charts::RenderedChart;
use serde::{Deserialize, Serialize};
use teaser_model::ImageSource;

pub use teaser_model::Color;

/// A rectangle in render coordinates (CSS pixels)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Shrink by the same amount on every side
    pub fn inset(&self, padding: f64) -> Self {
        Self {
            x: self.x + padding,
            y: self.y + padding,
            width: (self.width - 2.0 * padding).max(0.0),
            height: (self.height - 2.0 * padding).max(0.0),
        }
    }

    /// Same rectangle with a different height
    pub fn with_height(&self, height: f64) -> Self {
        Self { height, ..*self }
    }

    /// Whether `other` lies entirely inside this rectangle
    pub fn contains(&self, other: &Rect) -> bool {
        const EPS: f64 = 1e-6;
        other.x >= self.x - EPS
            && other.y >= self.y - EPS
            && other.right() <= self.right() + EPS
            && other.bottom() <= self.bottom() + EPS
    }
}

/// Horizontal alignment of a glyph run relative to its x position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Start,
    Middle,
    End,
}

/// A glyph run for rendering text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphRun {
    /// The text to render
    pub text: String,
    /// Font family (CSS list)
    pub font_family: String,
    /// Font size in CSS pixels
    pub font_size: f64,
    /// Whether bold
    pub bold: bool,
    /// Whether italic
    pub italic: bool,
    /// Text color
    pub color: Color,
    /// Position (baseline start, or baseline center/end per `align`)
    pub x: f64,
    pub y: f64,
    pub align: TextAlign,
    /// Extra space between letters in CSS pixels
    pub letter_spacing: f64,
}

/// How an image fills its box
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFit {
    /// Scale to cover the box, cropping overflow
    #[default]
    Cover,
    /// Scale to fit inside the box, keeping the whole image
    Contain,
}

/// Image render information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRenderInfo {
    /// Where the pixels come from
    pub source: ImageSource,
    /// Bounds where the image should be rendered
    pub bounds: Rect,
    pub fit: ImageFit,
    /// Alternative text
    pub alt_text: Option<String>,
}

impl ImageRenderInfo {
    pub fn new(source: ImageSource, bounds: Rect, fit: ImageFit) -> Self {
        Self {
            source,
            bounds,
            fit,
            alt_text: None,
        }
    }

    pub fn with_alt_text(mut self, alt_text: impl Into<String>) -> Self {
        self.alt_text = Some(alt_text.into());
        self
    }
}

/// Render item types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RenderItem {
    /// A glyph run (text)
    GlyphRun(GlyphRun),
    /// A filled and/or stroked rectangle
    Rectangle {
        bounds: Rect,
        fill: Option<Color>,
        stroke: Option<Color>,
        stroke_width: f64,
        corner_radius: f64,
    },
    /// A line
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Color,
        width: f64,
    },
    /// An image
    Image(ImageRenderInfo),
    /// A chart placed at `bounds`; primitives are relative to its origin
    Chart {
        bounds: Rect,
        chart: RenderedChart,
    },
}

impl RenderItem {
    /// A filled rectangle without stroke
    pub fn filled(bounds: Rect, fill: Color) -> Self {
        RenderItem::Rectangle {
            bounds,
            fill: Some(fill),
            stroke: None,
            stroke_width: 0.0,
            corner_radius: 0.0,
        }
    }

    /// A stroked rectangle without fill
    pub fn outlined(bounds: Rect, stroke: Color, stroke_width: f64) -> Self {
        RenderItem::Rectangle {
            bounds,
            fill: None,
            stroke: Some(stroke),
            stroke_width,
            corner_radius: 0.0,
        }
    }

    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64, color: Color, width: f64) -> Self {
        RenderItem::Line {
            x1,
            y1,
            x2,
            y2,
            color,
            width,
        }
    }

    /// Horizontal rule starting at `(x, y)`
    pub fn hrule(x: f64, y: f64, length: f64, color: Color, width: f64) -> Self {
        Self::line(x, y, x + length, y, color, width)
    }

    /// Vertical rule starting at `(x, y)`
    pub fn vrule(x: f64, y: f64, length: f64, color: Color, width: f64) -> Self {
        Self::line(x, y, x, y + length, color, width)
    }

    /// Bounding box of the item; text is measured with `fonts`
    pub fn bounds(&self, fonts: &FontBook) -> Rect {
        match self {
            RenderItem::GlyphRun(run) => {
                let width = crate::text::measure_run(fonts, run);
                let x = match run.align {
                    TextAlign::Start => run.x,
                    TextAlign::Middle => run.x - width / 2.0,
                    TextAlign::End => run.x - width,
                };
                Rect::new(x, run.y - run.font_size * 0.8, width, run.font_size)
            }
            RenderItem::Rectangle { bounds, .. } => *bounds,
            RenderItem::Line { x1, y1, x2, y2, .. } => Rect::new(
                x1.min(*x2),
                y1.min(*y2),
                (x2 - x1).abs(),
                (y2 - y1).abs(),
            ),
            RenderItem::Image(info) => info.bounds,
            RenderItem::Chart { bounds, .. } => *bounds,
        }
    }
}
