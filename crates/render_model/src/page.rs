//! Fixed-size pages and their SVG form

use crate::render_item::*;
use charts::escape_xml;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use teaser_model::ImageSource;

/// CSS reference resolution
pub const CSS_DPI: f64 = 96.0;

/// Millimetres to CSS pixels
pub fn mm_to_px(mm: f64) -> f64 {
    mm * CSS_DPI / 25.4
}

/// A4 width in CSS pixels (210 mm)
pub const A4_WIDTH_PX: f64 = 210.0 * CSS_DPI / 25.4;
/// A4 height in CSS pixels (297 mm)
pub const A4_HEIGHT_PX: f64 = 297.0 * CSS_DPI / 25.4;

/// A rendered page
///
/// Items are painted in order; later items draw over earlier ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderPage {
    pub width: f64,
    pub height: f64,
    pub background: Color,
    pub items: Vec<RenderItem>,
}

impl RenderPage {
    /// An empty A4 page
    pub fn a4(background: Color) -> Self {
        Self {
            width: A4_WIDTH_PX,
            height: A4_HEIGHT_PX,
            background,
            items: Vec::new(),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    pub fn push(&mut self, item: RenderItem) {
        self.items.push(item);
    }

    pub fn extend(&mut self, items: impl IntoIterator<Item = RenderItem>) {
        self.items.extend(items);
    }

    /// All glyph runs in paint order
    pub fn glyph_runs(&self) -> impl Iterator<Item = &GlyphRun> {
        self.items.iter().filter_map(|item| match item {
            RenderItem::GlyphRun(run) => Some(run),
            _ => None,
        })
    }

    /// All text on the page, one run per line
    pub fn text_content(&self) -> String {
        self.glyph_runs()
            .map(|run| run.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// All images on the page
    pub fn images(&self) -> impl Iterator<Item = &ImageRenderInfo> {
        self.items.iter().filter_map(|item| match item {
            RenderItem::Image(info) => Some(info),
            _ => None,
        })
    }

    /// Number of charts on the page
    pub fn chart_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item, RenderItem::Chart { .. }))
            .count()
    }

    /// Serialize to SVG, referencing images by their own href
    pub fn to_svg(&self) -> String {
        match self.to_svg_with(|source| Ok::<_, Infallible>(source.to_href())) {
            Ok(svg) => svg,
            Err(never) => match never {},
        }
    }

    /// Serialize to SVG, asking `href` for each image's link target
    ///
    /// The first error from `href` aborts serialization.
    pub fn to_svg_with<E>(
        &self,
        mut href: impl FnMut(&ImageSource) -> Result<String, E>,
    ) -> Result<String, E> {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );
        svg.push('\n');
        svg.push_str(&format!(
            r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
            self.width,
            self.height,
            self.background.to_css()
        ));
        svg.push('\n');

        for item in &self.items {
            match item {
                RenderItem::Image(info) => {
                    let target = href(&info.source)?;
                    svg.push_str(&image_to_svg(info, &target));
                }
                other => svg.push_str(&item_to_svg(other)),
            }
            svg.push('\n');
        }

        svg.push_str("</svg>");
        Ok(svg)
    }
}

fn item_to_svg(item: &RenderItem) -> String {
    match item {
        RenderItem::GlyphRun(run) => {
            let anchor = match run.align {
                TextAlign::Start => "start",
                TextAlign::Middle => "middle",
                TextAlign::End => "end",
            };
            let mut attrs = format!(
                r#"<text x="{}" y="{}" font-size="{}" font-family="{}" fill="{}" text-anchor="{}""#,
                run.x,
                run.y,
                run.font_size,
                escape_xml(&run.font_family),
                run.color.to_css(),
                anchor
            );
            if run.bold {
                attrs.push_str(r#" font-weight="bold""#);
            }
            if run.italic {
                attrs.push_str(r#" font-style="italic""#);
            }
            if run.letter_spacing != 0.0 {
                attrs.push_str(&format!(r#" letter-spacing="{}""#, run.letter_spacing));
            }
            format!("{}>{}</text>", attrs, escape_xml(&run.text))
        }
        RenderItem::Rectangle {
            bounds,
            fill,
            stroke,
            stroke_width,
            corner_radius,
        } => {
            let fill = fill.map(|c| c.to_css()).unwrap_or_else(|| "none".to_string());
            let mut attrs = format!(
                r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}""#,
                bounds.x, bounds.y, bounds.width, bounds.height, fill
            );
            if let Some(stroke) = stroke {
                attrs.push_str(&format!(
                    r#" stroke="{}" stroke-width="{}""#,
                    stroke.to_css(),
                    stroke_width
                ));
            }
            if *corner_radius > 0.0 {
                attrs.push_str(&format!(r#" rx="{}" ry="{}""#, corner_radius, corner_radius));
            }
            attrs.push_str("/>");
            attrs
        }
        RenderItem::Line {
            x1,
            y1,
            x2,
            y2,
            color,
            width,
        } => format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
            x1,
            y1,
            x2,
            y2,
            color.to_css(),
            width
        ),
        RenderItem::Chart { bounds, chart } => format!(
            "<g transform=\"translate({} {})\">\n{}</g>",
            bounds.x,
            bounds.y,
            chart.svg_body()
        ),
        RenderItem::Image(info) => image_to_svg(info, &info.source.to_href()),
    }
}

fn image_to_svg(info: &ImageRenderInfo, href: &str) -> String {
    let aspect = match info.fit {
        ImageFit::Cover => "xMidYMid slice",
        ImageFit::Contain => "xMidYMid meet",
    };
    format!(
        r#"<image x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="{}" xlink:href="{}"/>"#,
        info.bounds.x,
        info.bounds.y,
        info.bounds.width,
        info.bounds.height,
        aspect,
        escape_xml(href)
    )
}
