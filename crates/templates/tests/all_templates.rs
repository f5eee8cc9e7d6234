//! Checks shared by every template layout

use proptest::prelude::*;
use render_model::{FontBook, RenderItem};
use teaser_model::{catalog, CompanyData, DataPoint, Kpi};
use templates::layout::{FOOTER_GAP, PAGE_MARGIN};
use templates::RendererRegistry;

/// Smallest footer band any template reserves
const MIN_FOOTER_HEIGHT: f64 = 26.0;

#[test]
fn default_record_stays_on_the_page() {
    let registry = RendererRegistry::new();
    let fonts = FontBook::system();
    let data = CompanyData::default();

    for template in catalog() {
        let page = registry.render(template, &data);
        let bounds = page.bounds();
        for item in &page.items {
            assert!(
                bounds.contains(&item.bounds(&fonts)),
                "{}: item outside page: {:?}",
                template.id,
                item.bounds(&fonts)
            );
        }
    }
}

#[test]
fn default_record_is_not_cut_short() {
    let registry = RendererRegistry::new();
    let data = CompanyData::default();

    for template in catalog() {
        let text = registry.render(template, &data).text_content();
        for entry in data.company_strengths.iter().chain(&data.transaction_suggestions) {
            let first_word = entry.split_whitespace().next().unwrap_or_default();
            assert!(text.contains(first_word), "{}: missing {}", template.id, entry);
        }
        for kpi in &data.kpis {
            assert!(text.contains(&kpi.value), "{}: missing {}", template.id, kpi.value);
        }
    }
}

#[test]
fn long_text_never_reaches_the_footer() {
    let registry = RendererRegistry::new();
    let fonts = FontBook::system();
    let mut data = CompanyData::default();
    data.market_info = "overflowing ".repeat(400);
    data.company_description = "overflowing ".repeat(400);
    data.transaction_objective = "overflowing ".repeat(400);

    for template in catalog() {
        let page = registry.render(template, &data);
        let limit = page.height - PAGE_MARGIN - MIN_FOOTER_HEIGHT - FOOTER_GAP;
        for run in page.glyph_runs().filter(|run| run.text.contains("overflowing")) {
            let bottom = RenderItem::GlyphRun(run.clone()).bounds(&fonts).bottom();
            assert!(bottom <= limit + 1e-6, "{}: {} below {}", template.id, bottom, limit);
        }
    }
}

#[test]
fn every_template_draws_two_charts_and_the_location_image() {
    let registry = RendererRegistry::new();
    let data = CompanyData::default();

    for template in catalog() {
        let page = registry.render(template, &data);
        assert_eq!(page.chart_count(), 2, "{}", template.id);
        assert_eq!(page.images().count(), 1, "{}", template.id);
        assert!(page.text_content().contains("EcoWind Services"), "{}", template.id);
    }
}

#[test]
fn rendering_is_deterministic() {
    let registry = RendererRegistry::new();
    let data = CompanyData::default();

    for template in catalog() {
        assert_eq!(registry.render(template, &data), registry.render(template, &data));
    }
}

#[test]
fn page_uses_template_background_and_font() {
    let registry = RendererRegistry::new();
    let data = CompanyData::default();

    for template in catalog() {
        let page = registry.render(template, &data);
        assert_eq!(page.background, template.background_color);
        assert!(page.glyph_runs().all(|run| run.font_family == template.font_family));
    }
}

#[test]
fn charts_use_template_palette() {
    let registry = RendererRegistry::new();
    let data = CompanyData::default();

    for template in catalog() {
        let page = registry.render(template, &data);
        let svg = page.to_svg();
        assert!(svg.contains(&template.secondary_color.to_css()), "{}", template.id);
        assert!(svg.contains(&template.accent_color.to_css()), "{}", template.id);
        assert!(page.items.iter().any(|item| matches!(item, RenderItem::Chart { .. })));
    }
}

fn arb_record() -> impl Strategy<Value = CompanyData> {
    (
        "[A-Za-z ]{0,40}",
        "[A-Za-z ]{0,20}",
        "[A-Za-z0-9 ,.%]{0,400}",
        prop::collection::vec("[A-Za-z ]{0,80}", 0..6),
        prop::collection::vec(("[A-Za-z ]{0,20}", "[0-9%$]{0,6}"), 0..6),
        prop::collection::vec(0.0f64..500.0, 0..6),
    )
        .prop_map(|(name, location, text, items, kpis, values)| {
            let mut data = CompanyData::empty();
            data.company_name = name;
            data.location = location;
            data.market_info = text.clone();
            data.company_description = text.clone();
            data.transaction_objective = text;
            data.company_strengths = items.clone();
            data.transaction_suggestions = items;
            data.kpis = kpis.into_iter().map(|(n, v)| Kpi::new(n, v)).collect();
            let split = values.len() / 2;
            data.revenue.historical = values[..split]
                .iter()
                .enumerate()
                .map(|(i, v)| DataPoint::new(format!("{}", 2020 + i), *v))
                .collect();
            data.revenue.projected = values[split..]
                .iter()
                .enumerate()
                .map(|(i, v)| DataPoint::new(format!("{}", 2030 + i), *v))
                .collect();
            data
        })
}

proptest! {
    #[test]
    fn any_record_renders_on_every_template(data in arb_record()) {
        let registry = RendererRegistry::new();
        let fonts = FontBook::system();
        for template in catalog() {
            let page = registry.render(template, &data);
            prop_assert!(page.chart_count() <= 2);
            let bounds = page.bounds();
            for item in &page.items {
                let item_bounds = item.bounds(&fonts);
                prop_assert!(item_bounds.x >= bounds.x - 1e-6);
                prop_assert!(item_bounds.right() <= bounds.right() + 1e-6);
                prop_assert!(item_bounds.y >= bounds.y - 1e-6);
                prop_assert!(item_bounds.bottom() <= bounds.bottom() + 1e-6);
            }
        }
    }
}
