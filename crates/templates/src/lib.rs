//! Templates - Bank-inspired teaser layouts
//!
//! Each template turns a [`CompanyData`](teaser_model::CompanyData) record
//! into a single A4 [`RenderPage`](render_model::RenderPage). The five
//! layouts share their building blocks in [`layout`]; the
//! [`RendererRegistry`] maps template ids to renderers.

pub mod layout;
mod renderer;

mod bofa;
mod credit_suisse;
mod goldman;
mod jpmorgan;
mod morgan_stanley;

pub use bofa::BofaRenderer;
pub use credit_suisse::CreditSuisseRenderer;
pub use goldman::GoldmanRenderer;
pub use jpmorgan::JpMorganRenderer;
pub use morgan_stanley::MorganStanleyRenderer;
pub use layout::chart_palette;
pub use renderer::*;
