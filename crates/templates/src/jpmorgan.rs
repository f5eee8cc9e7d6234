//! JP Morgan-inspired layout: 4/8 split on a twelve-column grid

use crate::layout::*;
use crate::TeaserRenderer;
use render_model::{Color, ImageFit, Rect, RenderItem, RenderPage, TextAlign};
use teaser_model::{CompanyData, Metric, Template, TemplateId};

const FOOTER_HEIGHT: f64 = 26.0;

const DISCLAIMER: &str = "For qualified investors only. This document does not constitute an offer to sell or solicitation of an offer to buy.";

const KPI_EVEN_FILL: Color = Color::rgb(0xF8, 0xF9, 0xFA);
const IMAGE_HEIGHT: f64 = 140.0;

pub struct JpMorganRenderer;

impl TeaserRenderer for JpMorganRenderer {
    fn id(&self) -> TemplateId {
        TemplateId::JpMorgan
    }

    fn render(&self, template: &Template, data: &CompanyData) -> RenderPage {
        let mut b = PageBuilder::new(template);
        let content = b.content_rect();
        b.reserve_footer(FOOTER_HEIGHT);

        let body_top = header(&mut b, data, content);
        let columns = grid(content.x, content.width, COLUMN_GAP, 12, &[4, 8]);

        let mut left = Column::new(columns[0].0, body_top, columns[0].1);
        sidebar(&mut b, &mut left, data);

        let mut right = Column::new(columns[1].0, body_top, columns[1].1);
        main_column(&mut b, &mut right, data);

        footer(&mut b);
        b.finish()
    }
}

fn section_heading(b: &mut PageBuilder<'_>, column: &mut Column, text: &str) {
    let t = b.template();
    let style = b.style(HEADING_SIZE, t.secondary_color).bold();
    b.heading(column, text, &style, Some((t.secondary_color, 2.0)));
}

fn header(b: &mut PageBuilder<'_>, data: &CompanyData, content: Rect) -> f64 {
    let t = b.template();
    let logo_width = b.logo(content.x, content.y, data.logo.as_ref(), Color::GRAY_100);

    let badge_style = b.style(BODY_SIZE, Color::WHITE).bold().align(TextAlign::Middle);
    let badge_width = b.measure(&badge_style, "CONFIDENTIAL") + 24.0;
    let badge = Rect::new(content.right() - badge_width, content.y + 8.0, badge_width, LOGO_HEIGHT - 16.0);
    b.push(RenderItem::filled(badge, t.primary_color));
    b.label(badge, "CONFIDENTIAL", &badge_style);

    let title = b.style(TITLE_SIZE, t.primary_color).bold();
    let title_x = content.x + logo_width + 12.0;
    b.label(
        Rect::new(title_x, content.y, badge.x - title_x - 12.0, LOGO_HEIGHT),
        &data.company_name,
        &title,
    );

    let bar_y = content.y + LOGO_HEIGHT + 12.0;
    b.push(RenderItem::filled(Rect::new(content.x, bar_y, content.width, 4.0), t.secondary_color));
    bar_y + 4.0 + SECTION_GAP
}

fn sidebar(b: &mut PageBuilder<'_>, column: &mut Column, data: &CompanyData) {
    let t = b.template();
    let body = b.body();

    b.boxed(column, 10.0, None, Some(t.secondary_color), |b, inner| {
        section_heading(b, inner, "MARKET OVERVIEW");
        b.text(inner, &data.market_info, &body);
    });
    column.advance(SECTION_GAP);

    section_heading(b, column, &data.location.to_uppercase());
    let image = column.take(IMAGE_HEIGHT);
    b.image_or_placeholder(
        image,
        data.location_image.as_ref(),
        ImageFit::Cover,
        LOCATION_PLACEHOLDER,
        &data.location,
    );
    column.advance(SECTION_GAP);

    b.boxed(column, 10.0, None, Some(t.accent_color), |b, inner| {
        section_heading(b, inner, "TRANSACTION OBJECTIVE");
        b.text(inner, &data.transaction_objective, &body);
    });
}

fn main_column(b: &mut PageBuilder<'_>, column: &mut Column, data: &CompanyData) {
    let t = b.template();
    let body = b.body();

    section_heading(b, column, "COMPANY PROFILE");
    b.text(column, &data.company_description, &body);
    column.advance(8.0);

    let sub = b.style(SUBHEADING_SIZE, t.primary_color).bold();
    b.heading(column, "KEY STRENGTHS", &sub, None);
    let mut strengths = column.indented(8.0, 0.0);
    b.list(&mut strengths, &data.company_strengths, ListMarker::Disc, &body, t.secondary_color, 4.0);
    column.y = strengths.y + SECTION_GAP;

    section_heading(b, column, "FINANCIAL HIGHLIGHTS");
    kpi_row(b, column, data);
    column.advance(SECTION_GAP);

    let halves = grid(column.x, column.width, COLUMN_GAP, 2, &[1, 1]);
    let chart_title = b
        .style(SUBHEADING_SIZE, t.primary_color)
        .bold()
        .align(TextAlign::Middle);
    let mut bottom = column.y;
    for (metric, (x, width)) in [Metric::Revenue, Metric::Ebitda].into_iter().zip(halves) {
        let mut slot = Column::new(x, column.y, width);
        b.text(&mut slot, metric.chart_title(), &chart_title);
        slot.advance(4.0);
        b.chart(&mut slot, data.series(metric));
        bottom = bottom.max(slot.y);
    }
    column.y = bottom + SECTION_GAP;

    section_heading(b, column, "SUGGESTED TRANSACTION OPTIONS");
    let mut options = column.indented(8.0, 0.0);
    b.list(&mut options, &data.transaction_suggestions, ListMarker::Numbered, &body, t.secondary_color, 5.0);
    column.y = options.y;
}

/// Four tiles per row with alternating fills
fn kpi_row(b: &mut PageBuilder<'_>, column: &mut Column, data: &CompanyData) {
    let t = b.template();
    let cells = grid(column.x, column.width, 8.0, 4, &[1, 1, 1, 1]);
    let value = b
        .style(KPI_VALUE_SIZE, t.secondary_color)
        .bold()
        .align(TextAlign::Middle)
        .line_height(1.2);
    let name = b.style(SMALL_SIZE, t.primary_color).align(TextAlign::Middle);

    for (row_idx, row) in data.kpis.chunks(4).enumerate() {
        let mut bottom = column.y;
        for (col_idx, (kpi, &(x, width))) in row.iter().zip(&cells).enumerate() {
            let fill = if (row_idx * 4 + col_idx) % 2 == 0 { KPI_EVEN_FILL } else { Color::WHITE };
            let mut cell = Column::new(x, column.y, width);
            b.boxed(&mut cell, 6.0, Some(fill), Some(t.secondary_color), |b, inner| {
                b.text(inner, &kpi.value, &value);
                inner.advance(2.0);
                b.text(inner, &kpi.name, &name);
            });
            bottom = bottom.max(cell.y);
        }
        column.y = bottom + 8.0;
    }
}

fn footer(b: &mut PageBuilder<'_>) {
    let t = b.template();
    let label = b.style(SMALL_SIZE, t.secondary_color);
    let disclaimer = b.style(SMALL_SIZE, t.primary_color);
    let band = b.footer(FOOTER_HEIGHT, 0.0, "STRICTLY PRIVATE AND CONFIDENTIAL", &label, DISCLAIMER, &disclaimer);
    b.decorate(RenderItem::hrule(band.x, band.y, band.width, t.secondary_color, 1.0));
}
