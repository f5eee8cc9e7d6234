//! Page rasterization
//!
//! A page is serialized to SVG with every image inlined, parsed with usvg
//! and drawn by resvg into a pixmap. The pixmap size comes only from the
//! page's fixed A4 viewport and the configured scale.

use crate::{ExportError, ExportSettings, ImageResolver, Result};
use render_model::{FontBook, RenderPage};
use resvg::tiny_skia::{self, Pixmap, Transform};
use resvg::usvg::{self, fontdb};
use std::sync::Arc;
use tracing::debug;

/// Pixel dimensions of `page` rendered at `scale`
pub fn pixel_size(page: &RenderPage, scale: f64) -> (u32, u32) {
    let width = (page.width * scale).ceil().max(1.0) as u32;
    let height = (page.height * scale).ceil().max(1.0) as u32;
    (width, height)
}

/// A rasterized page
pub struct RasterPage {
    pixmap: Pixmap,
}

impl RasterPage {
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn encode_png(&self) -> Result<Vec<u8>> {
        self.pixmap
            .encode_png()
            .map_err(|e| ExportError::PngEncode(e.to_string()))
    }

    /// Straight RGB bytes, alpha dropped
    pub fn to_rgb(&self) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.pixmap.pixels().len() * 3);
        for pixel in self.pixmap.pixels() {
            let color = pixel.demultiply();
            rgb.extend_from_slice(&[color.red(), color.green(), color.blue()]);
        }
        rgb
    }
}

/// Renders pages to pixmaps
#[derive(Clone)]
pub struct Rasterizer {
    fontdb: Arc<fontdb::Database>,
    scale: f64,
    dpi: f64,
    fallback_font_family: String,
}

impl Rasterizer {
    /// Create a rasterizer drawing with the system font book
    ///
    /// Layout measures with the same book, so wrapped lines fit once drawn.
    pub fn new(settings: &ExportSettings) -> Self {
        Self::with_fonts(settings, &FontBook::system())
    }

    pub fn with_fonts(settings: &ExportSettings, fonts: &FontBook) -> Self {
        Self::with_fontdb(settings, fonts.database())
    }

    pub fn with_fontdb(settings: &ExportSettings, fontdb: Arc<fontdb::Database>) -> Self {
        Self {
            fontdb,
            scale: settings.scale,
            dpi: settings.dpi,
            fallback_font_family: settings.fallback_font_family.clone(),
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    fn options(&self) -> usvg::Options<'static> {
        let mut options = usvg::Options::default();
        options.dpi = self.dpi as f32;
        options.font_family = self.fallback_font_family.clone();
        options.fontdb = Arc::clone(&self.fontdb);
        options
    }

    /// Serialize `page` to SVG with images resolved through `resolver`
    pub fn page_svg(&self, page: &RenderPage, resolver: &dyn ImageResolver) -> Result<String> {
        page.to_svg_with(|source| resolver.resolve(source))
    }

    pub fn rasterize(&self, page: &RenderPage, resolver: &dyn ImageResolver) -> Result<RasterPage> {
        let svg = self.page_svg(page, resolver)?;
        let tree = usvg::Tree::from_str(&svg, &self.options())?;

        let (width, height) = pixel_size(page, self.scale);
        let mut pixmap = Pixmap::new(width, height).ok_or(ExportError::Pixmap { width, height })?;
        pixmap.fill(tiny_skia::Color::WHITE);

        let scale = self.scale as f32;
        resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());
        debug!(width, height, scale = self.scale, "Rasterized page");

        Ok(RasterPage { pixmap })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LocalImageResolver;
    use render_model::{Rect, RenderItem, TextStyle};
    use teaser_model::{Color, ImageSource};

    fn ink_pixels(raster: &RasterPage) -> usize {
        raster
            .pixmap()
            .pixels()
            .iter()
            .filter(|pixel| {
                let pixel = pixel.demultiply();
                (pixel.red(), pixel.green(), pixel.blue()) != (255, 255, 255)
            })
            .count()
    }

    fn rasterizer(scale: f64) -> Rasterizer {
        let settings = ExportSettings {
            scale,
            ..ExportSettings::default()
        };
        Rasterizer::with_fontdb(&settings, Arc::new(fontdb::Database::new()))
    }

    #[test]
    fn test_pixel_size_is_a4_at_scale() {
        let page = RenderPage::a4(Color::WHITE);
        assert_eq!(pixel_size(&page, 1.0), (794, 1123));
        assert_eq!(pixel_size(&page, 2.0), (1588, 2246));
    }

    #[test]
    fn test_fills_land_at_scaled_positions() {
        let mut page = RenderPage::a4(Color::WHITE);
        page.push(RenderItem::filled(
            Rect::new(10.0, 10.0, 20.0, 20.0),
            Color::rgb(255, 0, 0),
        ));

        let raster = rasterizer(2.0).rasterize(&page, &LocalImageResolver).unwrap();
        assert_eq!((raster.width(), raster.height()), (1588, 2246));

        let inside = raster.pixmap().pixel(40, 40).unwrap().demultiply();
        assert_eq!((inside.red(), inside.green(), inside.blue()), (255, 0, 0));
        let outside = raster.pixmap().pixel(100, 100).unwrap().demultiply();
        assert_eq!((outside.red(), outside.green(), outside.blue()), (255, 255, 255));
    }

    #[test]
    fn test_background_color() {
        let page = RenderPage::a4(Color::rgb(10, 35, 81));
        let raster = rasterizer(1.0).rasterize(&page, &LocalImageResolver).unwrap();
        let rgb = raster.to_rgb();
        assert_eq!(rgb.len(), 794 * 1123 * 3);
        assert_eq!(&rgb[..3], &[10, 35, 81]);
    }

    #[test]
    fn test_png_signature() {
        let page = RenderPage::a4(Color::WHITE);
        let png = rasterizer(1.0)
            .rasterize(&page, &LocalImageResolver)
            .unwrap()
            .encode_png()
            .unwrap();
        assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
    }

    #[test]
    fn test_text_is_drawn_with_system_fonts() {
        if FontBook::system().is_empty() {
            return;
        }
        let mut page = RenderPage::a4(Color::WHITE);
        let style = TextStyle::new("'Helvetica Neue', Helvetica, Arial, sans-serif", 40.0, Color::BLACK);
        page.push(style.run("Revenue", 40.0, 100.0));
        page.push(style.clone().bold().run("Growth", 40.0, 160.0));

        let raster = Rasterizer::new(&ExportSettings::default())
            .rasterize(&page, &LocalImageResolver)
            .unwrap();
        assert!(ink_pixels(&raster) > 500);
    }

    #[test]
    fn test_text_without_fonts_draws_nothing() {
        let mut page = RenderPage::a4(Color::WHITE);
        page.push(TextStyle::new("sans-serif", 40.0, Color::BLACK).run("Revenue", 40.0, 100.0));

        let raster = rasterizer(1.0).rasterize(&page, &LocalImageResolver).unwrap();
        assert_eq!(ink_pixels(&raster), 0);
    }

    #[test]
    fn test_remote_image_aborts() {
        let mut page = RenderPage::a4(Color::WHITE);
        page.push(RenderItem::Image(render_model::ImageRenderInfo::new(
            ImageSource::Url("https://images.pexels.com/photos/1.jpeg".to_string()),
            Rect::new(0.0, 0.0, 100.0, 100.0),
            render_model::ImageFit::Cover,
        )));

        let result = rasterizer(1.0).rasterize(&page, &LocalImageResolver);
        assert!(matches!(result, Err(ExportError::RemoteImage { .. })));
    }
}
