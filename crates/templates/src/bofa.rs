//! Bank of America-inspired layout: banner headings over bordered boxes

use crate::layout::*;
use crate::TeaserRenderer;
use render_model::{Color, ImageFit, Rect, RenderItem, RenderPage, TextAlign};
use teaser_model::{CompanyData, Metric, Template, TemplateId};

const FOOTER_HEIGHT: f64 = 30.0;

const DISCLAIMER: &str = "This document is for informational purposes only and does not constitute an offer to sell or solicitation of an offer to buy any securities.";

const HEADER_HEIGHT: f64 = 64.0;
const IMAGE_HEIGHT: f64 = 150.0;

pub struct BofaRenderer;

impl TeaserRenderer for BofaRenderer {
    fn id(&self) -> TemplateId {
        TemplateId::Bofa
    }

    fn render(&self, template: &Template, data: &CompanyData) -> RenderPage {
        let mut b = PageBuilder::new(template);
        let content = b.content_rect();
        b.reserve_footer(FOOTER_HEIGHT);

        let body_top = header(&mut b, data, content);
        let columns = grid(content.x, content.width, COLUMN_GAP, 12, &[5, 7]);

        let mut left = Column::new(columns[0].0, body_top, columns[0].1);
        left_column(&mut b, &mut left, data);

        let mut right = Column::new(columns[1].0, body_top, columns[1].1);
        right_column(&mut b, &mut right, data);

        footer(&mut b);
        b.finish()
    }
}

fn banner(b: &mut PageBuilder<'_>, column: &mut Column, text: &str) {
    let t = b.template();
    let style = b.style(BODY_SIZE, Color::WHITE).bold();
    b.banner(column, text, t.secondary_color, &style);
}

/// Accent-bordered box holding wrapped body text
fn text_box(b: &mut PageBuilder<'_>, column: &mut Column, text: &str) {
    let t = b.template();
    let body = b.body();
    b.boxed(column, 10.0, None, Some(t.accent_color), |b, inner| {
        b.text(inner, text, &body);
    });
}

fn header(b: &mut PageBuilder<'_>, data: &CompanyData, content: Rect) -> f64 {
    let t = b.template();
    let band = Rect::new(content.x, content.y, content.width, HEADER_HEIGHT);
    b.push(RenderItem::filled(band, t.secondary_color));

    let logo_y = band.center_y() - LOGO_HEIGHT / 2.0;
    let logo_width = b.logo(band.x + 12.0, logo_y, data.logo.as_ref(), Color::WHITE);

    let pill_style = b
        .style(BODY_SIZE, t.secondary_color)
        .bold()
        .align(TextAlign::Middle);
    let pill_width = b.measure(&pill_style, "CONFIDENTIAL OPPORTUNITY") + 20.0;
    let pill = Rect::new(band.right() - 12.0 - pill_width, band.center_y() - 10.0, pill_width, 20.0);
    b.push(RenderItem::Rectangle {
        bounds: pill,
        fill: Some(Color::WHITE),
        stroke: None,
        stroke_width: 0.0,
        corner_radius: 3.0,
    });
    b.label(pill, "CONFIDENTIAL OPPORTUNITY", &pill_style);

    let title = b.style(TITLE_SIZE, Color::WHITE).bold();
    let title_x = band.x + 12.0 + logo_width + 12.0;
    b.label(
        Rect::new(title_x, band.y, pill.x - title_x - 12.0, band.height),
        &data.company_name,
        &title,
    );

    band.bottom() + SECTION_GAP + 4.0
}

fn left_column(b: &mut PageBuilder<'_>, column: &mut Column, data: &CompanyData) {
    let t = b.template();

    banner(b, column, &data.location.to_uppercase());
    let image = column.take(IMAGE_HEIGHT);
    b.image_or_placeholder(
        image,
        data.location_image.as_ref(),
        ImageFit::Cover,
        LOCATION_PLACEHOLDER,
        &data.location,
    );
    b.push(RenderItem::outlined(image, t.accent_color, 1.0));
    column.advance(SECTION_GAP);

    banner(b, column, "MARKET OVERVIEW");
    text_box(b, column, &data.market_info);
    column.advance(SECTION_GAP);

    banner(b, column, "TRANSACTION OBJECTIVE");
    text_box(b, column, &data.transaction_objective);
}

fn right_column(b: &mut PageBuilder<'_>, column: &mut Column, data: &CompanyData) {
    let t = b.template();
    let body = b.body();

    banner(b, column, "COMPANY PROFILE");
    text_box(b, column, &data.company_description);
    column.advance(SECTION_GAP);

    banner(b, column, "KEY STRENGTHS");
    b.boxed(column, 10.0, None, Some(t.accent_color), |b, inner| {
        b.list(inner, &data.company_strengths, ListMarker::Disc, &body, t.secondary_color, 4.0);
    });
    column.advance(SECTION_GAP);

    banner(b, column, "FINANCIAL HIGHLIGHTS");
    b.boxed(column, 10.0, None, Some(t.accent_color), |b, inner| {
        kpi_tiles(b, inner, data);
        inner.advance(6.0);
        charts(b, inner, data);
    });
    column.advance(SECTION_GAP);

    banner(b, column, "TRANSACTION OPTIONS");
    b.boxed(column, 10.0, None, Some(t.accent_color), |b, inner| {
        for (idx, suggestion) in data.transaction_suggestions.iter().enumerate() {
            if idx > 0 {
                inner.advance(6.0);
            }
            b.boxed(inner, 5.0, None, Some(Color::GRAY_200), |b, row| {
                b.numbered_item(row, idx + 1, suggestion, &body, t.secondary_color);
            });
        }
    });
}

fn kpi_tiles(b: &mut PageBuilder<'_>, column: &mut Column, data: &CompanyData) {
    let t = b.template();
    let cells = grid(column.x, column.width, 10.0, 2, &[1, 1]);
    let value = b
        .style(KPI_VALUE_SIZE, t.secondary_color)
        .bold()
        .align(TextAlign::Middle)
        .line_height(1.2);
    let name = b.style(SMALL_SIZE, t.primary_color).align(TextAlign::Middle);

    for row in data.kpis.chunks(2) {
        let mut bottom = column.y;
        for (kpi, &(x, width)) in row.iter().zip(&cells) {
            let mut cell = Column::new(x, column.y, width);
            b.boxed(&mut cell, 6.0, None, Some(t.secondary_color), |b, inner| {
                b.text(inner, &kpi.value, &value);
                inner.advance(2.0);
                b.text(inner, &kpi.name, &name);
            });
            bottom = bottom.max(cell.y);
        }
        column.y = bottom + 8.0;
    }
}

fn charts(b: &mut PageBuilder<'_>, column: &mut Column, data: &CompanyData) {
    let t = b.template();
    let halves = grid(column.x, column.width, 12.0, 2, &[1, 1]);
    let title = b
        .style(BODY_SIZE, t.primary_color)
        .bold()
        .align(TextAlign::Middle);
    let mut bottom = column.y;
    for (metric, (x, width)) in [Metric::Revenue, Metric::Ebitda].into_iter().zip(halves) {
        let mut slot = Column::new(x, column.y, width);
        b.text(&mut slot, metric.chart_title(), &title);
        slot.advance(4.0);
        b.chart(&mut slot, data.series(metric));
        bottom = bottom.max(slot.y);
    }
    column.y = bottom;
}

fn footer(b: &mut PageBuilder<'_>) {
    let t = b.template();
    let content = b.content_rect();
    b.decorate(RenderItem::filled(
        Rect::new(content.x, content.bottom() - FOOTER_HEIGHT, content.width, FOOTER_HEIGHT),
        t.secondary_color,
    ));

    let label = b.style(SMALL_SIZE, Color::WHITE);
    b.footer(FOOTER_HEIGHT, 12.0, "CONFIDENTIAL INVESTMENT OPPORTUNITY", &label, DISCLAIMER, &label);
}
