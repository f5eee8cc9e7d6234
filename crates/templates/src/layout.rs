//! Shared page-building helpers
//!
//! Every template stacks sections down one or more columns. A `Column` is a
//! cursor that advances as content is placed; `PageBuilder` owns the page
//! being produced and knows the template's font and palette.
//!
//! Body content flows down to the footer band and no further. Text past
//! that line is cut at the last line that fits, and other body items that
//! would cross it are left out, like content clipped by a fixed-size sheet.

use charts::{ChartPalette, ChartRenderer, LineChart};
use render_model::{
    wrap_text, Color, FontBook, ImageFit, ImageRenderInfo, Rect, RenderItem, RenderPage, TextAlign, TextBlock,
    TextStyle, CSS_DPI,
};
use std::sync::Arc;
use teaser_model::{FinancialSeries, ImageSource, Template};
use tracing::debug;

/// Chart colors for a template: historical in secondary, projected in
/// accent, neutral grid
pub fn chart_palette(template: &Template) -> ChartPalette {
    ChartPalette::new(template.secondary_color, template.accent_color, Color::GRAY_200)
}

/// Outer page padding (15 mm)
pub const PAGE_MARGIN: f64 = 15.0 * CSS_DPI / 25.4;
/// Vertical space between sections
pub const SECTION_GAP: f64 = 14.0;
/// Horizontal space between grid columns
pub const COLUMN_GAP: f64 = 18.0;
/// Space kept clear above the footer band
pub const FOOTER_GAP: f64 = 6.0;

pub const TITLE_SIZE: f64 = 20.0;
pub const HEADING_SIZE: f64 = 11.0;
pub const SUBHEADING_SIZE: f64 = 9.5;
pub const BODY_SIZE: f64 = 8.0;
pub const SMALL_SIZE: f64 = 6.5;
pub const KPI_VALUE_SIZE: f64 = 14.0;

/// Chart slots keep a 3:2 shape
pub const CHART_ASPECT_RATIO: f64 = 1.5;

/// Logo slot height in the header
pub const LOGO_HEIGHT: f64 = 36.0;
/// Logo slot width (placeholder width, and the limit for real logos)
pub const LOGO_WIDTH: f64 = 96.0;

pub const LOGO_PLACEHOLDER: &str = "No logo";
pub const LOCATION_PLACEHOLDER: &str = "Location Image";

/// A vertical cursor inside a fixed-width column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub x: f64,
    pub y: f64,
    pub width: f64,
}

impl Column {
    pub fn new(x: f64, y: f64, width: f64) -> Self {
        Self { x, y, width }
    }

    pub fn advance(&mut self, dy: f64) {
        self.y += dy;
    }

    /// A rectangle of `height` at the cursor, without advancing
    pub fn rect(&self, height: f64) -> Rect {
        Rect::new(self.x, self.y, self.width, height)
    }

    /// A rectangle of `height` at the cursor; the cursor moves past it
    pub fn take(&mut self, height: f64) -> Rect {
        let rect = self.rect(height);
        self.y += height;
        rect
    }

    /// Narrower column sharing this one's top
    pub fn indented(&self, left: f64, right: f64) -> Self {
        Self::new(self.x + left, self.y, (self.width - left - right).max(0.0))
    }
}

/// Split `width` into columns of a `total`-unit grid
///
/// Returns `(x, width)` per span, left to right.
pub fn grid(x: f64, width: f64, gap: f64, total: usize, spans: &[usize]) -> Vec<(f64, f64)> {
    let total = total.max(1);
    let unit = (width - gap * (total - 1) as f64) / total as f64;
    let mut cursor = x;
    spans
        .iter()
        .map(|&span| {
            let span = span.max(1);
            let w = unit * span as f64 + gap * (span - 1) as f64;
            let column = (cursor, w);
            cursor += w + gap;
            column
        })
        .collect()
}

/// How list entries are marked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMarker {
    /// Small filled circle
    Disc,
    /// Small filled square
    Square,
    /// Filled circle with the 1-based index inside
    Numbered,
    /// "A.", "B.", ...
    Letter,
}

impl ListMarker {
    fn indent(&self) -> f64 {
        match self {
            ListMarker::Disc | ListMarker::Square => 10.0,
            ListMarker::Numbered => 16.0,
            ListMarker::Letter => 13.0,
        }
    }
}

/// Builds one page for one template
pub struct PageBuilder<'a> {
    template: &'a Template,
    fonts: Arc<FontBook>,
    page: RenderPage,
    /// Body content may not extend below this line
    flow_limit: f64,
    clipped: usize,
}

impl<'a> PageBuilder<'a> {
    /// Builder measuring text with the installed system fonts
    pub fn new(template: &'a Template) -> Self {
        Self::with_fonts(template, FontBook::system())
    }

    pub fn with_fonts(template: &'a Template, fonts: Arc<FontBook>) -> Self {
        let page = RenderPage::a4(template.background_color);
        Self {
            template,
            fonts,
            flow_limit: page.height,
            page,
            clipped: 0,
        }
    }

    pub fn template(&self) -> &'a Template {
        self.template
    }

    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }

    /// Lowest y body content may reach
    pub fn flow_limit(&self) -> f64 {
        self.flow_limit
    }

    /// Reserve a footer band of `height` at the bottom of the content area
    /// and stop body content above it. Returns the band.
    pub fn reserve_footer(&mut self, height: f64) -> Rect {
        let band = self.footer_band(height);
        self.flow_limit = band.y - FOOTER_GAP;
        band
    }

    fn footer_band(&self, height: f64) -> Rect {
        let content = self.content_rect();
        Rect::new(content.x, content.bottom() - height, content.width, height)
    }

    /// Width of `text` in `style`
    pub fn measure(&self, style: &TextStyle, text: &str) -> f64 {
        style.measure(&self.fonts, text)
    }

    /// Lines `text` wraps into at `width`
    pub fn wrap(&self, text: &str, width: f64, style: &TextStyle) -> Vec<String> {
        wrap_text(&self.fonts, text, width, style)
    }

    /// Page area inside the outer padding
    pub fn content_rect(&self) -> Rect {
        self.page.bounds().inset(PAGE_MARGIN)
    }

    /// Text style in the template's font
    pub fn style(&self, font_size: f64, color: Color) -> TextStyle {
        TextStyle::new(self.template.font_family, font_size, color)
    }

    /// Body text in the primary color
    pub fn body(&self) -> TextStyle {
        self.style(BODY_SIZE, self.template.primary_color)
    }

    /// Whether `rect` ends above the flow limit
    pub fn fits(&self, rect: &Rect) -> bool {
        rect.bottom() <= self.flow_limit + 1e-6
    }

    /// Add a body item; items reaching below the flow limit are left out
    pub fn push(&mut self, item: RenderItem) {
        if self.fits(&item.bounds(&self.fonts)) {
            self.page.push(item);
        } else {
            self.clipped += 1;
        }
    }

    /// Add a header, footer or page decoration regardless of the flow limit
    pub fn decorate(&mut self, item: RenderItem) {
        self.page.push(item);
    }

    /// Wrap text into the column and advance past it
    pub fn text(&mut self, column: &mut Column, text: &str, style: &TextStyle) {
        let rect = Rect::new(column.x, column.y, column.width, 0.0);
        let height = self.text_in(rect, text, style, None);
        column.advance(height);
    }

    /// Wrap text into `rect`, cutting it at `max_lines` and at the flow
    /// limit; returns the height used
    pub fn text_in(&mut self, rect: Rect, text: &str, style: &TextStyle, max_lines: Option<usize>) -> f64 {
        let room = self.lines_above(rect.y, self.flow_limit, style);
        let max_lines = Some(max_lines.map_or(room, |max| max.min(room)));
        self.place_text(rect, text, style, max_lines)
    }

    /// Whole lines of `style` that fit between `top` and `limit`
    fn lines_above(&self, top: f64, limit: f64, style: &TextStyle) -> usize {
        let advance = style.line_advance();
        if advance <= 0.0 || limit <= top {
            return 0;
        }
        ((limit - top) / advance + 1e-9).floor() as usize
    }

    /// Wrap text into `rect` regardless of the flow limit, for headers and
    /// footers; returns the height used
    pub fn decorate_text(&mut self, rect: Rect, text: &str, style: &TextStyle, max_lines: Option<usize>) -> f64 {
        self.place_text(rect, text, style, max_lines)
    }

    fn place_text(&mut self, rect: Rect, text: &str, style: &TextStyle, max_lines: Option<usize>) -> f64 {
        let block = TextBlock::layout(&self.fonts, text, rect.x, rect.y, rect.width, style, max_lines);
        if block.items.is_empty() && !text.trim().is_empty() {
            self.clipped += 1;
        }
        let height = block.height;
        self.page.extend(block.items);
        height
    }

    /// Text vertically centred in `rect` on a single line
    pub fn label(&mut self, rect: Rect, text: &str, style: &TextStyle) {
        let top = rect.center_y() - style.line_advance() / 2.0;
        self.text_in(Rect::new(rect.x, top, rect.width, rect.height), text, style, Some(1));
    }

    /// Heading with an optional rule underneath
    pub fn heading(&mut self, column: &mut Column, text: &str, style: &TextStyle, rule: Option<(Color, f64)>) {
        self.text(column, text, style);
        if let Some((color, width)) = rule {
            column.advance(3.0);
            self.push(RenderItem::hrule(column.x, column.y, column.width, color, width));
            column.advance(width);
        }
        column.advance(6.0);
    }

    /// Heading inside a filled bar spanning the column
    pub fn banner(&mut self, column: &mut Column, text: &str, fill: Color, style: &TextStyle) {
        let height = style.line_advance() + 8.0;
        let bar = column.take(height);
        if !self.fits(&bar) {
            self.clipped += 1;
            return;
        }
        self.push(RenderItem::filled(bar, fill));
        self.label(Rect::new(bar.x + 8.0, bar.y, bar.width - 16.0, bar.height), text, style);
        column.advance(6.0);
    }

    /// Lay out content inside a padded box; the box is painted beneath it
    pub fn boxed(
        &mut self,
        column: &mut Column,
        padding: f64,
        fill: Option<Color>,
        stroke: Option<Color>,
        content: impl FnOnce(&mut Self, &mut Column),
    ) {
        let insert_at = self.page.items.len();
        let top = column.y;
        let mut inner = Column::new(column.x + padding, top + padding, (column.width - 2.0 * padding).max(0.0));
        content(self, &mut inner);

        let height = (inner.y - top + padding)
            .max(2.0 * padding)
            .min(self.flow_limit - top);
        if height <= 0.0 {
            self.clipped += 1;
            column.y = top;
            return;
        }
        self.page.items.insert(
            insert_at,
            RenderItem::Rectangle {
                bounds: Rect::new(column.x, top, column.width, height),
                fill,
                stroke,
                stroke_width: if stroke.is_some() { 1.0 } else { 0.0 },
                corner_radius: 0.0,
            },
        );
        column.y = top + height;
    }

    /// Paint a list; each entry wraps under its marker
    pub fn list(
        &mut self,
        column: &mut Column,
        items: &[String],
        marker: ListMarker,
        style: &TextStyle,
        marker_color: Color,
        item_gap: f64,
    ) {
        let indent = marker.indent();
        for (idx, item) in items.iter().enumerate() {
            let top = column.y;
            if self.lines_above(top, self.flow_limit, style) == 0 {
                self.clipped += items.len() - idx;
                break;
            }
            let first_line_mid = top + style.line_advance() / 2.0;
            self.list_marker(marker, idx, column.x, first_line_mid, style, marker_color);

            let text_col = Rect::new(column.x + indent, top, column.width - indent, 0.0);
            let used = self.text_in(text_col, item, style, None);
            column.advance(used.max(style.line_advance()) + item_gap);
        }
    }

    fn list_marker(&mut self, marker: ListMarker, idx: usize, x: f64, mid_y: f64, style: &TextStyle, color: Color) {
        match marker {
            ListMarker::Disc => {
                let r = 1.8;
                self.push(RenderItem::Rectangle {
                    bounds: Rect::new(x + 2.0, mid_y - r, 2.0 * r, 2.0 * r),
                    fill: Some(color),
                    stroke: None,
                    stroke_width: 0.0,
                    corner_radius: r,
                });
            }
            ListMarker::Square => {
                self.push(RenderItem::filled(Rect::new(x + 1.0, mid_y - 2.5, 5.0, 5.0), color));
            }
            ListMarker::Numbered => {
                let r = 5.5;
                let circle = Rect::new(x, mid_y - r, 2.0 * r, 2.0 * r);
                self.push(RenderItem::Rectangle {
                    bounds: circle,
                    fill: Some(color),
                    stroke: None,
                    stroke_width: 0.0,
                    corner_radius: r,
                });
                let digits = self
                    .style(SMALL_SIZE, Color::WHITE)
                    .bold()
                    .align(TextAlign::Middle)
                    .line_height(1.0);
                self.label(circle, &(idx + 1).to_string(), &digits);
            }
            ListMarker::Letter => {
                let letter = char::from_u32('A' as u32 + (idx % 26) as u32).unwrap_or('A');
                let style = style.clone().bold().color(color);
                let top = mid_y - style.line_advance() / 2.0;
                self.text_in(Rect::new(x, top, 14.0, 0.0), &format!("{}.", letter), &style, Some(1));
            }
        }
    }

    /// A numbered circle beside wrapped text, centred against it
    pub fn numbered_item(&mut self, column: &mut Column, number: usize, text: &str, style: &TextStyle, color: Color) {
        let r = 6.0;
        let text_left = column.x + 2.0 * r + 6.0;
        let text_rect = Rect::new(text_left, column.y, column.x + column.width - text_left, 0.0);
        let used = self.text_in(text_rect, text, style, None).max(2.0 * r);

        let circle = Rect::new(column.x, column.y + used / 2.0 - r, 2.0 * r, 2.0 * r);
        self.push(RenderItem::Rectangle {
            bounds: circle,
            fill: Some(color),
            stroke: None,
            stroke_width: 0.0,
            corner_radius: r,
        });
        let digits = self
            .style(SMALL_SIZE, Color::WHITE)
            .bold()
            .align(TextAlign::Middle)
            .line_height(1.0);
        self.label(circle, &number.to_string(), &digits);
        column.advance(used);
    }

    /// An image, or a grey placeholder box with a caption when absent
    pub fn image_or_placeholder(
        &mut self,
        rect: Rect,
        source: Option<&ImageSource>,
        fit: ImageFit,
        placeholder: &str,
        alt_text: &str,
    ) {
        if !self.fits(&rect) {
            self.clipped += 1;
            return;
        }
        match source {
            Some(source) => {
                self.push(RenderItem::Image(
                    ImageRenderInfo::new(source.clone(), rect, fit).with_alt_text(alt_text),
                ));
            }
            None => {
                self.push(RenderItem::filled(rect, Color::GRAY_200));
                let caption = self
                    .style(BODY_SIZE, Color::GRAY_400)
                    .align(TextAlign::Middle)
                    .line_height(1.0);
                self.label(rect, placeholder, &caption);
            }
        }
    }

    /// Company logo at the header's logo slot; returns the width used
    pub fn logo(&mut self, x: f64, y: f64, source: Option<&ImageSource>, placeholder_fill: Color) -> f64 {
        let rect = Rect::new(x, y, LOGO_WIDTH, LOGO_HEIGHT);
        match source {
            Some(source) => {
                self.push(RenderItem::Image(
                    ImageRenderInfo::new(source.clone(), rect, ImageFit::Contain).with_alt_text("Company Logo"),
                ));
            }
            None => {
                self.push(RenderItem::filled(rect, placeholder_fill));
                let caption = self
                    .style(BODY_SIZE, Color::GRAY_400)
                    .align(TextAlign::Middle)
                    .line_height(1.0);
                self.label(rect, LOGO_PLACEHOLDER, &caption);
            }
        }
        LOGO_WIDTH
    }

    /// Place a financial chart filling `width` at the column cursor
    pub fn chart(&mut self, column: &mut Column, series: &FinancialSeries) {
        let rect = column.take(column.width / CHART_ASPECT_RATIO);
        let palette = self.chart_palette();
        let chart = LineChart::from_series(&series.historical, &series.projected, &palette);
        let rendered = ChartRenderer::new()
            .with_font_family(self.template.font_family)
            .render_chart(&chart, &palette, rect.width, rect.height);
        self.push(RenderItem::Chart {
            bounds: rect,
            chart: rendered,
        });
    }

    pub fn chart_palette(&self) -> ChartPalette {
        chart_palette(self.template)
    }

    /// Footer band at the bottom of the content area: a label on the left
    /// and the disclaimer wrapped on the right, both inset by `padding`.
    /// Returns the band rectangle.
    pub fn footer(
        &mut self,
        height: f64,
        padding: f64,
        label: &str,
        label_style: &TextStyle,
        disclaimer: &str,
        disclaimer_style: &TextStyle,
    ) -> Rect {
        let band = self.footer_band(height);
        let inner = Rect::new(band.x + padding, band.y, (band.width - 2.0 * padding).max(0.0), band.height);
        let label_width = self.measure(label_style, label).ceil() + 12.0;

        let label_top = inner.center_y() - label_style.line_advance() / 2.0;
        self.place_text(
            Rect::new(inner.x, label_top, label_width, 0.0),
            label,
            label_style,
            Some(1),
        );

        let text_rect = Rect::new(inner.x + label_width, inner.y, (inner.width - label_width).max(0.0), inner.height);
        let style = disclaimer_style.clone().align(TextAlign::End);
        let lines = self.wrap(disclaimer, text_rect.width, &style).len().clamp(1, 3);
        let top = band.center_y() - lines as f64 * style.line_advance() / 2.0;
        self.place_text(Rect::new(text_rect.x, top, text_rect.width, 0.0), disclaimer, &style, Some(3));
        band
    }

    pub fn finish(self) -> RenderPage {
        if self.clipped > 0 {
            debug!(
                template = %self.template.id,
                clipped = self.clipped,
                "Content past the footer was left out"
            );
        }
        self.page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teaser_model::{DataPoint, TemplateId};

    #[test]
    fn test_grid_spans_fill_width() {
        let cols = grid(0.0, 120.0, 6.0, 12, &[4, 8]);
        assert_eq!(cols.len(), 2);
        let (x2, w2) = cols[1];
        assert!((x2 + w2 - 120.0).abs() < 1e-9);
        assert!((cols[0].1 + 6.0 - x2).abs() < 1e-9);
    }

    #[test]
    fn test_column_take_advances() {
        let mut column = Column::new(10.0, 20.0, 100.0);
        let rect = column.take(30.0);
        assert_eq!(rect, Rect::new(10.0, 20.0, 100.0, 30.0));
        assert_eq!(column.y, 50.0);
    }

    #[test]
    fn test_boxed_paints_box_beneath_content() {
        let template = Template::get(TemplateId::Goldman);
        let mut builder = PageBuilder::new(template);
        let mut column = Column::new(0.0, 0.0, 200.0);
        let body = builder.body();
        builder.boxed(&mut column, 8.0, Some(Color::GRAY_50), None, |b, inner| {
            b.text(inner, "Boxed text", &body);
        });

        let page = builder.finish();
        assert!(matches!(page.items[0], RenderItem::Rectangle { .. }));
        assert!(matches!(page.items[1], RenderItem::GlyphRun(_)));
        assert!(column.y > 16.0);
    }

    #[test]
    fn test_missing_image_uses_placeholder() {
        let template = Template::get(TemplateId::Bofa);
        let mut builder = PageBuilder::new(template);
        builder.image_or_placeholder(
            Rect::new(0.0, 0.0, 100.0, 60.0),
            None,
            ImageFit::Cover,
            LOCATION_PLACEHOLDER,
            "Brazil",
        );
        builder.logo(0.0, 100.0, None, Color::GRAY_100);

        let page = builder.finish();
        assert_eq!(page.images().count(), 0);
        assert!(page.text_content().contains("Location Image"));
        assert!(page.text_content().contains("No logo"));
    }

    #[test]
    fn test_numbered_list_marks_each_item() {
        let template = Template::get(TemplateId::JpMorgan);
        let mut builder = PageBuilder::new(template);
        let mut column = Column::new(0.0, 0.0, 300.0);
        let body = builder.body();
        let items = vec!["First".to_string(), "Second".to_string()];
        builder.list(&mut column, &items, ListMarker::Numbered, &body, Color::BLACK, 4.0);

        let text = builder.finish().text_content();
        assert!(text.contains("1"));
        assert!(text.contains("2"));
        assert!(text.contains("Second"));
    }

    fn estimating_builder(template: &Template) -> PageBuilder<'_> {
        PageBuilder::with_fonts(template, Arc::new(FontBook::empty()))
    }

    #[test]
    fn test_text_stops_at_footer() {
        let template = Template::get(TemplateId::Goldman);
        let mut builder = estimating_builder(template);
        let band = builder.reserve_footer(26.0);
        assert_eq!(builder.flow_limit(), band.y - FOOTER_GAP);

        let body = builder.body();
        let mut column = Column::new(PAGE_MARGIN, band.y - 60.0, 200.0);
        builder.text(&mut column, &"overflowing text ".repeat(200), &body);
        assert!(column.y <= builder.flow_limit());

        let fonts = FontBook::empty();
        let limit = builder.flow_limit();
        let page = builder.finish();
        let runs: Vec<_> = page.items.iter().filter(|item| matches!(item, RenderItem::GlyphRun(_))).collect();
        assert!(!runs.is_empty());
        for run in runs {
            assert!(run.bounds(&fonts).bottom() <= limit + 1e-6);
        }
    }

    #[test]
    fn test_body_items_past_footer_are_left_out() {
        let template = Template::get(TemplateId::JpMorgan);
        let mut builder = estimating_builder(template);
        let band = builder.reserve_footer(26.0);

        builder.push(RenderItem::filled(Rect::new(0.0, band.y - 20.0, 50.0, 10.0), Color::BLACK));
        builder.push(RenderItem::filled(Rect::new(0.0, band.y - 4.0, 50.0, 10.0), Color::BLACK));
        builder.decorate(RenderItem::hrule(band.x, band.y, band.width, Color::BLACK, 1.0));

        let mut column = Column::new(0.0, band.y - 10.0, 150.0);
        let series = FinancialSeries::new(vec![DataPoint::new("2024", 1.0)], vec![]);
        builder.chart(&mut column, &series);

        let page = builder.finish();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.chart_count(), 0);
    }

    #[test]
    fn test_boxed_is_cut_at_footer() {
        let template = Template::get(TemplateId::MorganStanley);
        let mut builder = estimating_builder(template);
        let band = builder.reserve_footer(26.0);
        let limit = builder.flow_limit();

        let body = builder.body();
        let mut column = Column::new(0.0, band.y - 80.0, 120.0);
        builder.boxed(&mut column, 8.0, Some(Color::GRAY_50), None, |b, inner| {
            b.text(inner, &"boxed ".repeat(100), &body);
        });

        assert!(column.y <= limit + 1e-6);
        match &builder.finish().items[0] {
            RenderItem::Rectangle { bounds, .. } => assert!(bounds.bottom() <= limit + 1e-6),
            other => panic!("unexpected item {:?}", other),
        }
    }

    #[test]
    fn test_list_stops_when_out_of_room() {
        let template = Template::get(TemplateId::Bofa);
        let mut builder = estimating_builder(template);
        let band = builder.reserve_footer(30.0);

        let body = builder.body();
        let mut column = Column::new(0.0, band.y - 40.0, 300.0);
        let items: Vec<String> = (0..10).map(|i| format!("Strength {}", i)).collect();
        builder.list(&mut column, &items, ListMarker::Square, &body, Color::BLACK, 2.0);

        let text = builder.finish().text_content();
        assert!(text.contains("Strength 0"));
        assert!(!text.contains("Strength 9"));
    }

    #[test]
    fn test_footer_label_clears_disclaimer() {
        let template = Template::get(TemplateId::Goldman);
        let mut builder = PageBuilder::new(template);
        let label = builder.style(SMALL_SIZE, template.secondary_color);
        let disclaimer = builder.style(SMALL_SIZE, template.primary_color);
        let text = "This document is for discussion purposes only and does not constitute an offer. ".repeat(2);
        builder.reserve_footer(26.0);
        builder.footer(26.0, 0.0, "CONFIDENTIAL INVESTMENT TEASER", &label, &text, &disclaimer);

        let fonts = FontBook::system();
        let page = builder.finish();
        let label_run = page
            .glyph_runs()
            .find(|run| run.text == "CONFIDENTIAL INVESTMENT TEASER")
            .unwrap();
        let label_right = label_run.x + render_model::measure_run(&fonts, label_run);

        let disclaimer_runs: Vec<_> = page.glyph_runs().filter(|run| run.align == TextAlign::End).collect();
        assert!(!disclaimer_runs.is_empty());
        for run in disclaimer_runs {
            assert!(run.x - render_model::measure_run(&fonts, run) > label_right, "{}", run.text);
        }
    }

    #[test]
    fn test_chart_keeps_aspect_ratio() {
        let template = Template::get(TemplateId::MorganStanley);
        let mut builder = PageBuilder::new(template);
        let mut column = Column::new(0.0, 0.0, 150.0);
        let series = FinancialSeries::new(vec![DataPoint::new("2024", 1.0)], vec![]);
        builder.chart(&mut column, &series);

        assert_eq!(column.y, 100.0);
        assert_eq!(builder.finish().chart_count(), 1);
    }
}
