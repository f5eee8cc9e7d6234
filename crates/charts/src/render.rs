//! Chart rendering
//!
//! This module renders charts to render primitives that can be placed on a
//! page or serialized to SVG.

use crate::layout::*;
use crate::model::*;
use serde::{Deserialize, Serialize};
use teaser_model::Color;

/// Distance in pixels within which a point answers a tooltip query
pub const TOOLTIP_HIT_RADIUS: f64 = 8.0;

/// A render primitive for chart elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ChartRenderPrimitive {
    /// A filled rectangle
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: String,
    },
    /// A line
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: String,
        stroke_width: f64,
    },
    /// A polyline (multiple connected line segments)
    Polyline {
        points: Vec<(f64, f64)>,
        stroke: String,
        stroke_width: f64,
        dash: Option<[f64; 2]>,
    },
    /// A circle
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        fill: String,
    },
    /// Text
    Text {
        x: f64,
        y: f64,
        text: String,
        font_size: f64,
        font_family: String,
        fill: String,
        anchor: TextAnchor,
        baseline: TextBaseline,
    },
}

/// Text anchor position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// Text baseline position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TextBaseline {
    Top,
    Middle,
    Alphabetic,
}

/// What a tooltip shows for one plotted value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartTooltip {
    pub x: f64,
    pub y: f64,
    /// Category label, untruncated
    pub category: String,
    /// Dataset label
    pub series: String,
    pub value: f64,
}

impl ChartTooltip {
    /// Body line, e.g. "Projected: 115"
    pub fn body(&self) -> String {
        format!("{}: {}", self.series, format_tick_value(self.value))
    }
}

/// Rendered chart output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedChart {
    /// Width of the chart
    pub width: f64,
    /// Height of the chart
    pub height: f64,
    /// Render primitives
    pub primitives: Vec<ChartRenderPrimitive>,
    /// One hover target per plotted value
    pub tooltips: Vec<ChartTooltip>,
}

impl RenderedChart {
    /// Find the tooltip for the point nearest to `(x, y)`, if any is in range
    pub fn tooltip_at(&self, x: f64, y: f64) -> Option<&ChartTooltip> {
        self.tooltips
            .iter()
            .map(|t| (t, LayoutPoint::new(t.x, t.y).distance_to(x, y)))
            .filter(|(_, d)| *d <= TOOLTIP_HIT_RADIUS)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(t, _)| t)
    }

    /// Serialize to a standalone SVG document
    pub fn to_svg(&self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            self.width, self.height, self.width, self.height
        );
        svg.push('\n');
        svg.push_str(&self.svg_body());
        svg.push_str("</svg>");
        svg
    }

    /// Serialize the primitives only, for embedding in a larger SVG
    pub fn svg_body(&self) -> String {
        let mut body = String::new();
        for primitive in &self.primitives {
            body.push_str(&primitive_to_svg(primitive));
            body.push('\n');
        }
        body
    }
}

/// Chart renderer
pub struct ChartRenderer {
    /// Background color
    pub background_color: Option<Color>,
    /// Gridline width
    pub gridline_width: f64,
    /// Font family for text
    pub font_family: String,
    /// Tick label font size
    pub label_font_size: f64,
    /// Tick label color
    pub text_color: Color,
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self {
            background_color: None,
            gridline_width: 1.0,
            font_family: "sans-serif".to_string(),
            label_font_size: 8.0,
            text_color: Color::GRAY_500,
        }
    }
}

impl ChartRenderer {
    /// Create a new renderer
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different font for tick labels
    pub fn with_font_family(mut self, font_family: impl Into<String>) -> Self {
        self.font_family = font_family.into();
        self
    }

    /// Lay out and render a chart into a `width` x `height` box
    pub fn render_chart(
        &self,
        chart: &LineChart,
        palette: &ChartPalette,
        width: f64,
        height: f64,
    ) -> RenderedChart {
        let calculator = ChartLayoutCalculator {
            axis_label_font_size: self.label_font_size,
            ..ChartLayoutCalculator::default()
        };
        let layout = calculator.calculate(chart, width, height);
        self.render(chart, palette, &layout)
    }

    /// Render a chart to primitives
    pub fn render(&self, chart: &LineChart, palette: &ChartPalette, layout: &ChartLayout) -> RenderedChart {
        let mut primitives = Vec::new();

        if let Some(bg) = self.background_color {
            primitives.push(ChartRenderPrimitive::Rect {
                x: 0.0,
                y: 0.0,
                width: layout.total_bounds.width,
                height: layout.total_bounds.height,
                fill: bg.to_css(),
            });
        }

        self.render_gridlines(&mut primitives, layout, palette.grid);
        self.render_axes(&mut primitives, layout, palette.grid);
        self.render_lines(&mut primitives, layout);
        self.render_markers(&mut primitives, layout);

        let tooltips = layout
            .series
            .iter()
            .flat_map(|series| series.points.iter())
            .map(|point| ChartTooltip {
                x: point.center.x,
                y: point.center.y,
                category: chart
                    .categories
                    .get(point.category_index)
                    .cloned()
                    .unwrap_or_default(),
                series: chart
                    .series
                    .get(point.series_index)
                    .map(|s| s.name.clone())
                    .unwrap_or_default(),
                value: point.value,
            })
            .collect();

        RenderedChart {
            width: layout.total_bounds.width,
            height: layout.total_bounds.height,
            primitives,
            tooltips,
        }
    }

    fn render_gridlines(&self, primitives: &mut Vec<ChartRenderPrimitive>, layout: &ChartLayout, color: Color) {
        let plot = &layout.plot_area;
        let stroke = color.to_css();

        // Horizontal only; the category axis has no grid
        for &y in &layout.horizontal_gridlines {
            primitives.push(ChartRenderPrimitive::Line {
                x1: plot.x,
                y1: y,
                x2: plot.right(),
                y2: y,
                stroke: stroke.clone(),
                stroke_width: self.gridline_width,
            });
        }
    }

    fn render_axes(&self, primitives: &mut Vec<ChartRenderPrimitive>, layout: &ChartLayout, color: Color) {
        let stroke = color.to_css();
        let fill = self.text_color.to_css();

        let axis = &layout.category_axis;
        primitives.push(ChartRenderPrimitive::Line {
            x1: axis.line_start.x,
            y1: axis.line_start.y,
            x2: axis.line_end.x,
            y2: axis.line_end.y,
            stroke: stroke.clone(),
            stroke_width: self.gridline_width,
        });
        for tick in &axis.ticks {
            primitives.push(ChartRenderPrimitive::Text {
                x: tick.position,
                y: axis.line_start.y + 4.0,
                text: tick.label.clone(),
                font_size: self.label_font_size,
                font_family: self.font_family.clone(),
                fill: fill.clone(),
                anchor: TextAnchor::Middle,
                baseline: TextBaseline::Top,
            });
        }

        let axis = &layout.value_axis;
        primitives.push(ChartRenderPrimitive::Line {
            x1: axis.line_start.x,
            y1: axis.line_start.y,
            x2: axis.line_end.x,
            y2: axis.line_end.y,
            stroke,
            stroke_width: self.gridline_width,
        });
        for tick in &axis.ticks {
            primitives.push(ChartRenderPrimitive::Text {
                x: axis.line_start.x - 4.0,
                y: tick.position,
                text: tick.label.clone(),
                font_size: self.label_font_size,
                font_family: self.font_family.clone(),
                fill: fill.clone(),
                anchor: TextAnchor::End,
                baseline: TextBaseline::Middle,
            });
        }
    }

    fn render_lines(&self, primitives: &mut Vec<ChartRenderPrimitive>, layout: &ChartLayout) {
        for series in &layout.series {
            for segment in series.segments.iter().filter(|s| s.len() > 1) {
                primitives.push(ChartRenderPrimitive::Polyline {
                    points: segment.iter().map(|p| (p.x, p.y)).collect(),
                    stroke: series.color.to_css(),
                    stroke_width: series.line_width,
                    dash: series.dash,
                });
            }
        }
    }

    fn render_markers(&self, primitives: &mut Vec<ChartRenderPrimitive>, layout: &ChartLayout) {
        for series in &layout.series {
            for point in &series.points {
                primitives.push(ChartRenderPrimitive::Circle {
                    cx: point.center.x,
                    cy: point.center.y,
                    r: series.point_radius,
                    fill: series.color.to_css(),
                });
            }
        }
    }
}

fn primitive_to_svg(primitive: &ChartRenderPrimitive) -> String {
    match primitive {
        ChartRenderPrimitive::Rect {
            x,
            y,
            width,
            height,
            fill,
        } => format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            x, y, width, height, fill
        ),
        ChartRenderPrimitive::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
            stroke_width,
        } => format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
            x1, y1, x2, y2, stroke, stroke_width
        ),
        ChartRenderPrimitive::Polyline {
            points,
            stroke,
            stroke_width,
            dash,
        } => {
            let points_str: String = points
                .iter()
                .map(|(x, y)| format!("{},{}", x, y))
                .collect::<Vec<_>>()
                .join(" ");
            let mut attrs = format!(
                r#"<polyline points="{}" stroke="{}" stroke-width="{}" fill="none" stroke-linejoin="round""#,
                points_str, stroke, stroke_width
            );
            if let Some([on, off]) = dash {
                attrs.push_str(&format!(r#" stroke-dasharray="{},{}""#, on, off));
            }
            attrs.push_str("/>");
            attrs
        }
        ChartRenderPrimitive::Circle { cx, cy, r, fill } => {
            format!(r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#, cx, cy, r, fill)
        }
        ChartRenderPrimitive::Text {
            x,
            y,
            text,
            font_size,
            font_family,
            fill,
            anchor,
            baseline,
        } => {
            let anchor_str = match anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            let baseline_str = match baseline {
                TextBaseline::Top => "hanging",
                TextBaseline::Middle => "middle",
                TextBaseline::Alphabetic => "alphabetic",
            };
            format!(
                r#"<text x="{}" y="{}" font-size="{}" font-family="{}" fill="{}" text-anchor="{}" dominant-baseline="{}">{}</text>"#,
                x,
                y,
                font_size,
                escape_xml(font_family),
                fill,
                anchor_str,
                baseline_str,
                escape_xml(text)
            )
        }
    }
}

/// Escape text for use in SVG content and attribute values
pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use teaser_model::DataPoint;

    fn sample_chart() -> LineChart {
        let historical = vec![
            DataPoint::new("2021", 42.0),
            DataPoint::new("2022", 58.0),
            DataPoint::new("2023", 73.0),
            DataPoint::new("2024", 92.0),
        ];
        let projected = vec![
            DataPoint::new("2025", 115.0),
            DataPoint::new("2026", 140.0),
            DataPoint::new("2027", 168.0),
        ];
        LineChart::from_series(&historical, &projected, &ChartPalette::default())
    }

    fn render(chart: &LineChart) -> RenderedChart {
        ChartRenderer::new().render_chart(chart, &ChartPalette::default(), 300.0, 200.0)
    }

    #[test]
    fn test_render_line_chart() {
        let rendered = render(&sample_chart());

        assert_eq!(rendered.width, 300.0);
        assert_eq!(rendered.height, 200.0);

        let polylines: Vec<_> = rendered
            .primitives
            .iter()
            .filter_map(|p| match p {
                ChartRenderPrimitive::Polyline { points, dash, .. } => Some((points.len(), *dash)),
                _ => None,
            })
            .collect();
        assert_eq!(polylines, vec![(4, None), (3, Some(PROJECTED_DASH))]);

        let markers = rendered
            .primitives
            .iter()
            .filter(|p| matches!(p, ChartRenderPrimitive::Circle { r, .. } if *r == 3.0))
            .count();
        assert_eq!(markers, 7);
    }

    #[test]
    fn test_render_to_svg() {
        let svg = render(&sample_chart()).to_svg();

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("polyline"));
        assert!(svg.contains(r#"stroke-dasharray="5,5""#));
        assert!(svg.contains(">2021</text>"));
    }

    #[test]
    fn test_no_legend_is_drawn() {
        let svg = render(&sample_chart()).to_svg();
        assert!(!svg.contains("Historical"));
        assert!(!svg.contains("Projected"));
    }

    #[test]
    fn test_empty_chart_renders_axes_only() {
        let chart = LineChart::from_series(&[], &[], &ChartPalette::default());
        let rendered = render(&chart);

        assert!(rendered.tooltips.is_empty());
        assert!(rendered
            .primitives
            .iter()
            .all(|p| !matches!(p, ChartRenderPrimitive::Polyline { .. } | ChartRenderPrimitive::Circle { .. })));
        assert!(rendered
            .primitives
            .iter()
            .any(|p| matches!(p, ChartRenderPrimitive::Line { .. })));
    }

    #[test]
    fn test_single_point_has_marker_but_no_line() {
        let chart = LineChart::from_series(&[DataPoint::new("2024", 5.0)], &[], &ChartPalette::default());
        let rendered = render(&chart);

        assert_eq!(rendered.tooltips.len(), 1);
        assert!(!rendered.to_svg().contains("polyline"));
    }

    #[test]
    fn test_tooltip_at_nearest_point() {
        let rendered = render(&sample_chart());
        let target = rendered.tooltips[4].clone();

        let hit = rendered.tooltip_at(target.x + 2.0, target.y - 1.0).unwrap();
        assert_eq!(hit.category, "2025");
        assert_eq!(hit.series, "Projected");
        assert_eq!(hit.value, 115.0);
        assert_eq!(hit.body(), "Projected: 115");

        assert!(rendered.tooltip_at(-100.0, -100.0).is_none());
    }

    #[test]
    fn test_value_axis_labels_are_truncated() {
        let historical = vec![DataPoint::new("2021", 20000.0)];
        let chart = LineChart::from_series(&historical, &[], &ChartPalette::default());
        let rendered = render(&chart);

        let labels: Vec<_> = rendered
            .primitives
            .iter()
            .filter_map(|p| match p {
                ChartRenderPrimitive::Text { text, anchor: TextAnchor::End, .. } => Some(text.clone()),
                _ => None,
            })
            .collect();
        assert!(labels.iter().all(|l| l.chars().count() <= 7));
        assert!(labels.iter().any(|l| l.ends_with("...")));
    }

    #[test]
    fn test_escape_xml() {
        let escaped = escape_xml("<test & \"value\">");
        assert_eq!(escaped, "&lt;test &amp; &quot;value&quot;&gt;");
    }

    #[test]
    fn test_font_family_quotes_are_escaped() {
        let renderer = ChartRenderer::new().with_font_family("'Open Sans', sans-serif");
        let chart = LineChart::from_series(&[DataPoint::new("2021", 1.0)], &[], &ChartPalette::default());
        let svg = renderer
            .render_chart(&chart, &ChartPalette::default(), 200.0, 120.0)
            .to_svg();
        assert!(svg.contains("font-family=\"&apos;Open Sans&apos;, sans-serif\""));
    }
}
