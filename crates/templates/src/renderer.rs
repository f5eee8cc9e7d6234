//! Renderer trait and registry

use crate::{BofaRenderer, CreditSuisseRenderer, GoldmanRenderer, JpMorganRenderer, MorganStanleyRenderer};
use render_model::RenderPage;
use teaser_model::{CompanyData, Template, TemplateId};
use tracing::debug;

/// Lays out one template style
pub trait TeaserRenderer: Send + Sync {
    /// The template this renderer draws
    fn id(&self) -> TemplateId;

    /// Produce the page for `data` using `template`'s palette and font
    ///
    /// Rendering never fails: missing images and empty lists produce
    /// placeholders or empty sections.
    fn render(&self, template: &Template, data: &CompanyData) -> RenderPage;
}

/// All renderers, keyed by template id
pub struct RendererRegistry {
    renderers: Vec<Box<dyn TeaserRenderer>>,
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RendererRegistry {
    /// Registry with the five built-in renderers; Goldman is the fallback
    pub fn new() -> Self {
        Self {
            renderers: vec![
                Box::new(GoldmanRenderer),
                Box::new(JpMorganRenderer),
                Box::new(BofaRenderer),
                Box::new(MorganStanleyRenderer),
                Box::new(CreditSuisseRenderer),
            ],
        }
    }

    pub fn get(&self, id: TemplateId) -> &dyn TeaserRenderer {
        self.renderers
            .iter()
            .find(|renderer| renderer.id() == id)
            .unwrap_or(&self.renderers[0])
            .as_ref()
    }

    pub fn find(&self, id: &str) -> Option<&dyn TeaserRenderer> {
        let id = id.parse::<TemplateId>().ok()?;
        Some(self.get(id))
    }

    pub fn render(&self, template: &Template, data: &CompanyData) -> RenderPage {
        self.get(template.id).render(template, data)
    }

    /// Render by string id, using the Goldman layout and palette for
    /// unknown ids
    pub fn render_by_id(&self, id: &str, data: &CompanyData) -> RenderPage {
        match Template::find(id) {
            Some(template) => self.render(template, data),
            None => {
                debug!(template_id = id, "Unknown template, using default layout");
                self.render(Template::get(TemplateId::Goldman), data)
            }
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = TemplateId> + '_ {
        self.renderers.iter().map(|renderer| renderer.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_covers_catalog() {
        let registry = RendererRegistry::new();
        let ids: Vec<_> = registry.ids().collect();
        assert_eq!(ids, TemplateId::ALL.to_vec());
        for id in TemplateId::ALL {
            assert_eq!(registry.get(id).id(), id);
        }
    }

    #[test]
    fn test_find_by_string_id() {
        let registry = RendererRegistry::new();
        let renderer = registry.find("morgan-stanley-inspired").map(|r| r.id());
        assert_eq!(renderer, Some(TemplateId::MorganStanley));
        assert!(registry.find("citi-inspired").is_none());
    }

    #[test]
    fn test_unknown_id_falls_back_to_goldman() {
        let registry = RendererRegistry::new();
        let data = CompanyData::default();
        let fallback = registry.render_by_id("not-a-template", &data);
        let goldman = registry.render_by_id("goldman-inspired", &data);
        assert_eq!(fallback, goldman);
    }

    #[test]
    fn test_templates_differ() {
        let registry = RendererRegistry::new();
        let data = CompanyData::default();
        let pages: Vec<_> = TemplateId::ALL
            .iter()
            .map(|id| registry.render(Template::get(*id), &data))
            .collect();
        for (i, a) in pages.iter().enumerate() {
            for b in pages.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
