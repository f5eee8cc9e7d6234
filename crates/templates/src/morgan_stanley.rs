//! Morgan Stanley-inspired layout: three equal columns between double rules

use crate::layout::*;
use crate::TeaserRenderer;
use render_model::{Color, ImageFit, Rect, RenderItem, RenderPage, TextAlign};
use teaser_model::{CompanyData, Metric, Template, TemplateId};

const FOOTER_HEIGHT: f64 = 26.0;

const DISCLAIMER: &str = "This material is provided for information purposes only and does not constitute an offer to sell or a solicitation of an offer to buy any securities.";

const IMAGE_HEIGHT: f64 = 120.0;
const METRIC_ROW_HEIGHT: f64 = 26.0;

pub struct MorganStanleyRenderer;

impl TeaserRenderer for MorganStanleyRenderer {
    fn id(&self) -> TemplateId {
        TemplateId::MorganStanley
    }

    fn render(&self, template: &Template, data: &CompanyData) -> RenderPage {
        let mut b = PageBuilder::new(template);
        let content = b.content_rect();
        b.reserve_footer(FOOTER_HEIGHT);

        let body_top = header(&mut b, data, content);
        let columns = grid(content.x, content.width, COLUMN_GAP, 3, &[1, 1, 1]);

        let mut first = Column::new(columns[0].0, body_top, columns[0].1);
        market_column(&mut b, &mut first, data);

        let mut second = Column::new(columns[1].0, body_top, columns[1].1);
        company_column(&mut b, &mut second, data);

        let mut third = Column::new(columns[2].0, body_top, columns[2].1);
        transaction_column(&mut b, &mut third, data);

        footer(&mut b);
        b.finish()
    }
}

fn section_heading(b: &mut PageBuilder<'_>, column: &mut Column, text: &str) {
    let t = b.template();
    let style = b.style(HEADING_SIZE, t.secondary_color).bold();
    b.heading(column, text, &style, None);
}

fn header(b: &mut PageBuilder<'_>, data: &CompanyData, content: Rect) -> f64 {
    let t = b.template();
    b.push(RenderItem::filled(Rect::new(content.x, content.y, content.width, 4.0), t.secondary_color));

    let row_top = content.y + 4.0 + 12.0;
    let logo_width = b.logo(content.x, row_top, data.logo.as_ref(), Color::GRAY_100);

    let badge_style = b.style(BODY_SIZE, Color::WHITE).align(TextAlign::Middle);
    let badge_width = b.measure(&badge_style, "CONFIDENTIAL") + 24.0;
    let badge = Rect::new(content.right() - badge_width, row_top + 8.0, badge_width, LOGO_HEIGHT - 16.0);
    b.push(RenderItem::filled(badge, t.primary_color));
    b.label(badge, "CONFIDENTIAL", &badge_style);

    let title_x = content.x + logo_width + 12.0;
    let mut title_block = Column::new(title_x, row_top, badge.x - title_x - 12.0);
    let title = b.style(TITLE_SIZE, t.primary_color).bold().line_height(1.2);
    let location = b.style(BODY_SIZE, t.secondary_color).bold();
    let title_height = b.text_in(title_block.rect(0.0), &data.company_name, &title, Some(1));
    title_block.advance(title_height);
    b.text_in(title_block.rect(0.0), &data.location, &location, Some(1));

    let rule_y = row_top + LOGO_HEIGHT + 12.0;
    b.push(RenderItem::filled(Rect::new(content.x, rule_y, content.width, 4.0), t.secondary_color));
    rule_y + 4.0 + SECTION_GAP + 4.0
}

/// Accent-bordered box holding wrapped body text
fn text_box(b: &mut PageBuilder<'_>, column: &mut Column, text: &str) {
    let t = b.template();
    let body = b.body();
    b.boxed(column, 10.0, None, Some(t.accent_color), |b, inner| {
        b.text(inner, text, &body);
    });
}

fn market_column(b: &mut PageBuilder<'_>, column: &mut Column, data: &CompanyData) {
    let t = b.template();

    section_heading(b, column, "MARKET");
    text_box(b, column, &data.market_info);
    column.advance(SECTION_GAP);

    section_heading(b, column, "LOCATION");
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

    section_heading(b, column, "KEY METRICS");
    let name = b.style(BODY_SIZE, t.primary_color);
    let value = b
        .style(HEADING_SIZE, t.secondary_color)
        .bold()
        .align(TextAlign::End);
    for (idx, kpi) in data.kpis.iter().enumerate() {
        if idx > 0 {
            column.advance(5.0);
        }
        let row = column.take(METRIC_ROW_HEIGHT);
        if !b.fits(&row) {
            break;
        }
        b.push(RenderItem::outlined(row, t.accent_color, 1.0));
        let inner = Rect::new(row.x + 8.0, row.y, row.width - 16.0, row.height);
        let value_width = b.measure(&value, &kpi.value).min(inner.width / 2.0);
        b.label(
            Rect::new(inner.x, inner.y, inner.width - value_width - 6.0, inner.height),
            &kpi.name,
            &name,
        );
        b.label(inner, &kpi.value, &value);
    }
}

fn company_column(b: &mut PageBuilder<'_>, column: &mut Column, data: &CompanyData) {
    let t = b.template();
    let body = b.body();

    section_heading(b, column, "COMPANY");
    text_box(b, column, &data.company_description);
    column.advance(SECTION_GAP);

    section_heading(b, column, "STRENGTHS");
    b.boxed(column, 10.0, None, Some(t.accent_color), |b, inner| {
        b.list(inner, &data.company_strengths, ListMarker::Numbered, &body, t.accent_color, 6.0);
    });
    column.advance(SECTION_GAP);

    chart_box(b, column, data, Metric::Revenue);
}

fn transaction_column(b: &mut PageBuilder<'_>, column: &mut Column, data: &CompanyData) {
    let t = b.template();
    let body = b.body();

    chart_box(b, column, data, Metric::Ebitda);
    column.advance(SECTION_GAP);

    section_heading(b, column, "OBJECTIVE");
    text_box(b, column, &data.transaction_objective);
    column.advance(SECTION_GAP);

    section_heading(b, column, "TRANSACTION OPTIONS");
    b.boxed(column, 10.0, None, Some(t.accent_color), |b, inner| {
        b.list(inner, &data.transaction_suggestions, ListMarker::Letter, &body, t.secondary_color, 6.0);
    });
}

fn chart_box(b: &mut PageBuilder<'_>, column: &mut Column, data: &CompanyData, metric: Metric) {
    let t = b.template();
    section_heading(b, column, &metric.chart_title().to_uppercase());
    b.boxed(column, 8.0, None, Some(t.accent_color), |b, inner| {
        b.chart(inner, data.series(metric));
    });
}

fn footer(b: &mut PageBuilder<'_>) {
    let t = b.template();
    let label = b.style(SMALL_SIZE, t.secondary_color);
    let disclaimer = b.style(SMALL_SIZE, t.primary_color);
    let band = b.footer(FOOTER_HEIGHT, 0.0, "STRICTLY CONFIDENTIAL", &label, DISCLAIMER, &disclaimer);
    b.decorate(RenderItem::filled(Rect::new(band.x, band.y - 4.0, band.width, 4.0), t.secondary_color));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(data: &CompanyData) -> RenderPage {
        MorganStanleyRenderer.render(Template::get(TemplateId::MorganStanley), data)
    }

    #[test]
    fn test_sections_present() {
        let text = render(&CompanyData::default()).text_content();
        for heading in [
            "CONFIDENTIAL",
            "MARKET",
            "LOCATION",
            "KEY METRICS",
            "COMPANY",
            "STRENGTHS",
            "REVENUE (M$)",
            "EBITDA (M$)",
            "OBJECTIVE",
            "TRANSACTION OPTIONS",
            "STRICTLY CONFIDENTIAL",
        ] {
            assert!(text.contains(heading), "missing {}", heading);
        }
    }

    #[test]
    fn test_location_under_title() {
        let page = render(&CompanyData::default());
        let title = page.glyph_runs().find(|run| run.text == "EcoWind Services").map(|run| run.y);
        let location = page.glyph_runs().find(|run| run.text == "Brazil").map(|run| run.y);
        match (title, location) {
            (Some(title), Some(location)) => assert!(location > title),
            other => panic!("header text missing: {:?}", other),
        }
    }

    #[test]
    fn test_options_are_lettered() {
        let page = render(&CompanyData::default());
        let letters: Vec<_> = page
            .glyph_runs()
            .filter(|run| run.text.len() == 2 && run.text.ends_with('.'))
            .map(|run| run.text.clone())
            .collect();
        assert_eq!(letters, vec!["A.", "B.", "C.", "D."]);
    }

    #[test]
    fn test_metric_rows_match_kpis() {
        let data = CompanyData::default();
        let page = render(&data);
        let values = page
            .glyph_runs()
            .filter(|run| run.align == TextAlign::End && data.kpis.iter().any(|k| k.value == run.text))
            .count();
        assert_eq!(values, data.kpis.len());
    }

    #[test]
    fn test_empty_record_renders() {
        let page = render(&CompanyData::empty());
        assert_eq!(page.chart_count(), 2);
        assert!(page.text_content().contains("Location Image"));
    }
}
