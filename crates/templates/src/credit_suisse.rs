//! Credit Suisse-inspired layout: 1/2/1 split on a four-column grid

use crate::layout::*;
use crate::TeaserRenderer;
use render_model::{Color, ImageFit, Rect, RenderItem, RenderPage, TextAlign};
use teaser_model::{CompanyData, Metric, Template, TemplateId};

const DISCLAIMER: &str = "This document does not constitute an offer to sell or a solicitation of an offer to buy securities in any jurisdiction.";
const BADGE_TEXT: &str = "CONFIDENTIAL INVESTMENT OPPORTUNITY";

const IMAGE_HEIGHT: f64 = 110.0;
const FOOTER_HEIGHT: f64 = 30.0;

pub struct CreditSuisseRenderer;

impl TeaserRenderer for CreditSuisseRenderer {
    fn id(&self) -> TemplateId {
        TemplateId::CreditSuisse
    }

    fn render(&self, template: &Template, data: &CompanyData) -> RenderPage {
        let mut b = PageBuilder::new(template);
        let content = b.content_rect();
        b.reserve_footer(FOOTER_HEIGHT);

        let body_top = header(&mut b, data, content);
        let columns = grid(content.x, content.width, COLUMN_GAP, 4, &[1, 2, 1]);

        let mut left = Column::new(columns[0].0, body_top, columns[0].1);
        market_column(&mut b, &mut left, data);

        let mut middle = Column::new(columns[1].0, body_top, columns[1].1);
        company_column(&mut b, &mut middle, data);

        let mut right = Column::new(columns[2].0, body_top, columns[2].1);
        transaction_column(&mut b, &mut right, data);

        footer(&mut b, content);
        b.finish()
    }
}

fn section_heading(b: &mut PageBuilder<'_>, column: &mut Column, text: &str) {
    let t = b.template();
    let style = b.style(BODY_SIZE, t.secondary_color).bold().letter_spacing(0.3);
    b.heading(column, &text.to_uppercase(), &style, Some((t.accent_color, 2.0)));
}

fn header(b: &mut PageBuilder<'_>, data: &CompanyData, content: Rect) -> f64 {
    let t = b.template();
    let logo_width = b.logo(content.x, content.y, data.logo.as_ref(), Color::GRAY_100);

    let badge_style = b.style(SMALL_SIZE, Color::WHITE).align(TextAlign::Middle);
    let badge_width = b.measure(&badge_style, BADGE_TEXT) + 24.0;
    let badge = Rect::new(content.right() - badge_width, content.y + 8.0, badge_width, LOGO_HEIGHT - 16.0);
    b.push(RenderItem::filled(badge, t.secondary_color));
    b.label(badge, BADGE_TEXT, &badge_style);

    let rule_x = content.x + logo_width + 14.0;
    b.push(RenderItem::vrule(rule_x, content.y, LOGO_HEIGHT, t.secondary_color, 2.0));

    let title_x = rule_x + 12.0;
    let mut title_block = Column::new(title_x, content.y, badge.x - title_x - 12.0);
    let title = b.style(TITLE_SIZE, t.primary_color).bold().line_height(1.2);
    let location = b.style(BODY_SIZE, t.secondary_color);
    let title_height = b.text_in(title_block.rect(0.0), &data.company_name, &title, Some(1));
    title_block.advance(title_height);
    b.text_in(title_block.rect(0.0), &data.location, &location, Some(1));

    let rule_y = content.y + LOGO_HEIGHT + 16.0;
    b.push(RenderItem::hrule(content.x, rule_y, content.width, t.secondary_color, 2.0));
    rule_y + 2.0 + SECTION_GAP
}

fn market_column(b: &mut PageBuilder<'_>, column: &mut Column, data: &CompanyData) {
    let t = b.template();
    let body = b.body();

    section_heading(b, column, "Market Analysis");
    b.text(column, &data.market_info, &body);
    column.advance(SECTION_GAP);

    section_heading(b, column, "Geographic Presence");
    let image = column.take(IMAGE_HEIGHT);
    b.image_or_placeholder(
        image,
        data.location_image.as_ref(),
        ImageFit::Cover,
        LOCATION_PLACEHOLDER,
        &data.location,
    );
    column.advance(SECTION_GAP);

    section_heading(b, column, "Key Performance Metrics");
    let name = b.style(SMALL_SIZE, t.primary_color);
    let value = b
        .style(SUBHEADING_SIZE, t.secondary_color)
        .bold()
        .align(TextAlign::End);
    for (idx, kpi) in data.kpis.iter().enumerate() {
        if idx > 0 {
            column.advance(6.0);
        }
        let row = column.take(24.0);
        if !b.fits(&row) {
            break;
        }
        b.push(RenderItem::filled(row, Color::GRAY_50));
        let inner = Rect::new(row.x + 6.0, row.y, row.width - 12.0, row.height);
        let value_width = b.measure(&value, &kpi.value).min(inner.width / 2.0);
        b.label(
            Rect::new(inner.x, inner.y, inner.width - value_width - 4.0, inner.height),
            &kpi.name,
            &name,
        );
        b.label(inner, &kpi.value, &value);
    }
}

fn company_column(b: &mut PageBuilder<'_>, column: &mut Column, data: &CompanyData) {
    let t = b.template();
    let body = b.body();

    section_heading(b, column, "Company Overview");
    b.text(column, &data.company_description, &body);
    column.advance(SECTION_GAP);

    section_heading(b, column, "Strategic Advantages");
    let cells = grid(column.x, column.width, 8.0, 2, &[1, 1]);
    let tile_text = b.style(BODY_SIZE, t.primary_color);
    for (row_idx, row) in data.company_strengths.chunks(2).enumerate() {
        let mut bottom = column.y;
        for (col_idx, (strength, &(x, width))) in row.iter().zip(&cells).enumerate() {
            let number = row_idx * 2 + col_idx + 1;
            let mut cell = Column::new(x, column.y, width);
            b.boxed(&mut cell, 6.0, Some(Color::GRAY_50), None, |b, inner| {
                b.numbered_item(inner, number, strength, &tile_text, t.secondary_color);
            });
            bottom = bottom.max(cell.y);
        }
        column.y = bottom + 8.0;
    }
    column.advance(SECTION_GAP);

    let halves = grid(column.x, column.width, 12.0, 2, &[1, 1]);
    let mut bottom = column.y;
    for (metric, (x, width)) in [Metric::Revenue, Metric::Ebitda].into_iter().zip(halves) {
        let mut slot = Column::new(x, column.y, width);
        section_heading(b, &mut slot, development_title(metric));
        b.chart(&mut slot, data.series(metric));
        bottom = bottom.max(slot.y);
    }
    column.y = bottom;
}

fn development_title(metric: Metric) -> &'static str {
    match metric {
        Metric::Revenue => "Revenue Development (M$)",
        Metric::Ebitda => "EBITDA Development (M$)",
    }
}

fn transaction_column(b: &mut PageBuilder<'_>, column: &mut Column, data: &CompanyData) {
    let t = b.template();
    let body = b.body();

    section_heading(b, column, "Transaction Objective");
    b.boxed(column, 8.0, Some(Color::GRAY_50), None, |b, inner| {
        b.text(inner, &data.transaction_objective, &body);
    });
    column.advance(SECTION_GAP);

    section_heading(b, column, "Transaction Alternatives");
    for (idx, suggestion) in data.transaction_suggestions.iter().enumerate() {
        if idx > 0 {
            column.advance(6.0);
        }
        let top = column.y;
        let mut boxed = column.indented(3.0, 0.0);
        b.boxed(&mut boxed, 8.0, Some(Color::GRAY_50), None, |b, inner| {
            b.text(inner, suggestion, &body);
        });
        column.y = boxed.y;
        b.push(RenderItem::filled(Rect::new(column.x, top, 3.0, column.y - top), t.secondary_color));
    }
}

/// Label, brand square, and disclaimer in three equal columns
fn footer(b: &mut PageBuilder<'_>, content: Rect) {
    let t = b.template();
    let band = Rect::new(content.x, content.bottom() - FOOTER_HEIGHT, content.width, FOOTER_HEIGHT);
    b.decorate(RenderItem::hrule(band.x, band.y, band.width, t.secondary_color, 2.0));

    let thirds = grid(band.x, band.width, 0.0, 3, &[1, 1, 1]);
    let inner_top = band.y + 6.0;
    let inner_height = band.height - 6.0;

    let label = b.style(SMALL_SIZE, t.secondary_color);
    let label_top = inner_top + (inner_height - label.line_advance()) / 2.0;
    b.decorate_text(Rect::new(thirds[0].0, label_top, thirds[0].1, 0.0), "CONFIDENTIAL", &label, Some(1));

    let square = 14.0;
    let center_x = thirds[1].0 + thirds[1].1 / 2.0;
    let center_y = inner_top + inner_height / 2.0;
    b.decorate(RenderItem::filled(
        Rect::new(center_x - square / 2.0, center_y - square / 2.0, square, square),
        t.secondary_color,
    ));

    let disclaimer = b.style(SMALL_SIZE, t.primary_color).align(TextAlign::End).line_height(1.3);
    let lines = b.wrap(DISCLAIMER, thirds[2].1, &disclaimer).len().clamp(1, 2);
    let top = center_y - lines as f64 * disclaimer.line_advance() / 2.0;
    b.decorate_text(Rect::new(thirds[2].0, top, thirds[2].1, 0.0), DISCLAIMER, &disclaimer, Some(2));
}
