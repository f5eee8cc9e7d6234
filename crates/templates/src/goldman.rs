//! Goldman-inspired layout: a one-third sidebar and a two-thirds main column

use crate::layout::*;
use crate::TeaserRenderer;
use render_model::{Color, ImageFit, Rect, RenderItem, RenderPage, TextAlign};
use teaser_model::{CompanyData, Metric, Template, TemplateId};

const FOOTER_HEIGHT: f64 = 26.0;

const DISCLAIMER: &str = "This document is for discussion purposes only and does not constitute an offer to sell or a solicitation of an offer to purchase any security.";

pub struct GoldmanRenderer;

impl TeaserRenderer for GoldmanRenderer {
    fn id(&self) -> TemplateId {
        TemplateId::Goldman
    }

    fn render(&self, template: &Template, data: &CompanyData) -> RenderPage {
        let mut b = PageBuilder::new(template);
        let content = b.content_rect();
        b.reserve_footer(FOOTER_HEIGHT);

        let body_top = header(&mut b, data, content);
        let columns = grid(content.x, content.width, COLUMN_GAP, 3, &[1, 2]);

        let mut left = Column::new(columns[0].0, body_top, columns[0].1);
        sidebar(&mut b, &mut left, data);

        let mut main = Column::new(columns[1].0, body_top, columns[1].1);
        main_column(&mut b, &mut main, data);

        footer(&mut b);
        b.finish()
    }
}

fn section_heading(b: &mut PageBuilder<'_>, column: &mut Column, text: &str) {
    let t = b.template();
    let style = b.style(HEADING_SIZE, t.primary_color).bold();
    b.heading(column, text, &style, Some((t.accent_color, 1.0)));
}

fn header(b: &mut PageBuilder<'_>, data: &CompanyData, content: Rect) -> f64 {
    let t = b.template();
    let logo_width = b.logo(content.x, content.y, data.logo.as_ref(), Color::GRAY_100);

    let title = b.style(TITLE_SIZE, t.primary_color).bold();
    let title_x = content.x + logo_width + 12.0;
    let tag_width = 130.0;
    b.label(
        Rect::new(title_x, content.y, content.right() - tag_width - title_x, LOGO_HEIGHT),
        &data.company_name,
        &title,
    );

    let tag = b.style(BODY_SIZE, t.secondary_color).align(TextAlign::End);
    let tag_rect = Rect::new(content.right() - tag_width, content.y + 6.0, tag_width, 0.0);
    b.text_in(tag_rect, "STRICTLY CONFIDENTIAL\nINVESTMENT OPPORTUNITY", &tag, None);

    let rule_y = content.y + LOGO_HEIGHT + 10.0;
    b.push(RenderItem::hrule(content.x, rule_y, content.width, t.primary_color, 2.0));
    rule_y + 2.0 + SECTION_GAP
}

fn sidebar(b: &mut PageBuilder<'_>, column: &mut Column, data: &CompanyData) {
    let t = b.template();
    let body = b.body();

    b.boxed(column, 10.0, Some(Color::GRAY_50), Some(t.accent_color), |b, inner| {
        section_heading(b, inner, "MARKET");
        b.text(inner, &data.market_info, &body);
    });
    column.advance(SECTION_GAP);

    let location = b.style(HEADING_SIZE, t.primary_color).bold();
    b.heading(column, &data.location, &location, None);
    let image = column.take(column.width * 9.0 / 16.0);
    b.image_or_placeholder(
        image,
        data.location_image.as_ref(),
        ImageFit::Cover,
        LOCATION_PLACEHOLDER,
        &data.location,
    );
    column.advance(SECTION_GAP);

    section_heading(b, column, "OBJECTIVE");
    b.text(column, &data.transaction_objective, &body);
}

fn main_column(b: &mut PageBuilder<'_>, column: &mut Column, data: &CompanyData) {
    let t = b.template();
    let body = b.body();

    section_heading(b, column, "COMPANY");
    b.text(column, &data.company_description, &body);
    column.advance(8.0);

    let sub = b.style(SUBHEADING_SIZE, t.secondary_color).bold();
    b.heading(column, "KEY STRENGTHS", &sub, None);
    b.list(column, &data.company_strengths, ListMarker::Disc, &body, t.primary_color, 2.0);
    column.advance(SECTION_GAP);

    section_heading(b, column, "HIGHLIGHTS");
    kpi_tiles(b, column, data);
    column.advance(SECTION_GAP);

    let halves = grid(column.x, column.width, COLUMN_GAP, 2, &[1, 1]);
    let chart_title = b
        .style(SUBHEADING_SIZE, t.secondary_color)
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

    section_heading(b, column, "TRANSACTION STRUCTURE");
    b.list(column, &data.transaction_suggestions, ListMarker::Disc, &body, t.primary_color, 2.0);
}

fn kpi_tiles(b: &mut PageBuilder<'_>, column: &mut Column, data: &CompanyData) {
    let t = b.template();
    let cells = grid(column.x, column.width, 10.0, 2, &[1, 1]);
    let value = b
        .style(KPI_VALUE_SIZE, t.secondary_color)
        .bold()
        .align(TextAlign::Middle)
        .line_height(1.2);
    let name = b.style(BODY_SIZE, t.primary_color).align(TextAlign::Middle);

    for row in data.kpis.chunks(2) {
        let mut bottom = column.y;
        for (kpi, &(x, width)) in row.iter().zip(&cells) {
            let mut cell = Column::new(x, column.y, width);
            b.boxed(&mut cell, 6.0, Some(Color::GRAY_50), Some(t.accent_color), |b, inner| {
                b.text(inner, &kpi.value, &value);
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
    let band = b.footer(FOOTER_HEIGHT, 0.0, "CONFIDENTIAL INVESTMENT TEASER", &label, DISCLAIMER, &disclaimer);
    b.decorate(RenderItem::hrule(band.x, band.y, band.width, t.accent_color, 1.0));
}
