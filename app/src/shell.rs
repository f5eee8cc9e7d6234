//! The select / edit / preview state machine
//!
//! The shell owns the one canonical [`CompanyData`]. Renderers get shared
//! references to it, and edits arrive as [`EditCommand`] values that
//! replace the whole record. The active template only exists outside
//! selection mode, so the state carries it.

use crate::{Result, ShellError};
use charts::{ChartCanvas, ChartTooltip, RenderedChart};
use edit_engine::{load_image_file_async, EditCommand, ImageField};
use render_model::RenderPage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use store::{ExportFormat, ExportOutput, Exporter};
use teaser_model::{catalog, CompanyData, Metric, Template, TemplateSummary};
use templates::{chart_palette, RendererRegistry};
use tracing::{debug, info};

/// Width of the on-screen chart slots
pub const CHART_SLOT_WIDTH: f64 = 360.0;
/// Height of the on-screen chart slots
pub const CHART_SLOT_HEIGHT: f64 = 240.0;

/// Which screen the user is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Select,
    Edit,
    Preview,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Select => write!(f, "select"),
            Mode::Edit => write!(f, "edit"),
            Mode::Preview => write!(f, "preview"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Select,
    Edit(&'static Template),
    Preview(&'static Template),
}

impl State {
    fn mode(&self) -> Mode {
        match self {
            State::Select => Mode::Select,
            State::Edit(_) => Mode::Edit,
            State::Preview(_) => Mode::Preview,
        }
    }

    fn template(&self) -> Option<&'static Template> {
        match self {
            State::Select => None,
            State::Edit(template) | State::Preview(template) => Some(template),
        }
    }
}

/// A blocking message for the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub struct Shell {
    state: State,
    data: CompanyData,
    registry: RendererRegistry,
    exporter: Exporter,
    notices: Vec<Notice>,
    revenue_chart: ChartCanvas,
    ebitda_chart: ChartCanvas,
}

impl Shell {
    /// Start in selection mode with the sample record
    pub fn new(exporter: Exporter) -> Self {
        Self::with_data(CompanyData::default(), exporter)
    }

    pub fn with_data(data: CompanyData, exporter: Exporter) -> Self {
        Self {
            state: State::Select,
            data,
            registry: RendererRegistry::new(),
            exporter,
            notices: Vec::new(),
            revenue_chart: ChartCanvas::new(CHART_SLOT_WIDTH, CHART_SLOT_HEIGHT),
            ebitda_chart: ChartCanvas::new(CHART_SLOT_WIDTH, CHART_SLOT_HEIGHT),
        }
    }

    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    /// The active template; `None` in selection mode
    pub fn template(&self) -> Option<&'static Template> {
        self.state.template()
    }

    pub fn data(&self) -> &CompanyData {
        &self.data
    }

    /// Cards for the template selection screen
    pub fn gallery(&self) -> Vec<TemplateSummary> {
        catalog().iter().map(Template::summary).collect()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Remove and return pending notices
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn invalid(&self, action: &'static str) -> ShellError {
        ShellError::InvalidTransition {
            mode: self.mode(),
            action,
        }
    }

    fn editing(&self, action: &'static str) -> Result<&'static Template> {
        match self.state {
            State::Edit(template) => Ok(template),
            _ => Err(self.invalid(action)),
        }
    }

    fn previewing(&self, action: &'static str) -> Result<&'static Template> {
        match self.state {
            State::Preview(template) => Ok(template),
            _ => Err(self.invalid(action)),
        }
    }

    fn transition(&mut self, to: State) {
        info!(from = %self.mode(), to = %to.mode(), "Mode transition");
        self.state = to;
    }

    /// Select → Edit with the template whose id is `id`
    pub fn select_template(&mut self, id: &str) -> Result<&'static Template> {
        if self.state != State::Select {
            return Err(self.invalid("select a template"));
        }
        let template = Template::find(id).ok_or_else(|| ShellError::UnknownTemplate(id.to_string()))?;
        self.transition(State::Edit(template));
        self.refresh_charts();
        Ok(template)
    }

    /// Edit → Preview
    pub fn preview(&mut self) -> Result<()> {
        let template = self.editing("preview")?;
        self.transition(State::Preview(template));
        Ok(())
    }

    /// Edit → Select; a new selection is required afterwards
    pub fn back_to_templates(&mut self) -> Result<()> {
        self.editing("go back to templates")?;
        self.transition(State::Select);
        self.revenue_chart.clear();
        self.ebitda_chart.clear();
        Ok(())
    }

    /// Preview → Edit, keeping template and data
    pub fn back_to_edit(&mut self) -> Result<()> {
        let template = self.previewing("go back to edit")?;
        self.transition(State::Edit(template));
        Ok(())
    }

    /// Apply an edit by replacing the record
    ///
    /// On error the record is left as it was.
    pub fn apply(&mut self, command: EditCommand) -> Result<()> {
        self.editing("edit data")?;
        let updated = command.apply(&self.data)?;
        debug!(field = command.field().name(), "Applied edit");
        self.data = updated;
        self.refresh_charts();
        Ok(())
    }

    /// Replace the whole record, e.g. with one loaded from JSON
    ///
    /// Allowed while selecting or editing, never in preview.
    pub fn replace_data(&mut self, data: CompanyData) -> Result<()> {
        if matches!(self.state, State::Preview(_)) {
            return Err(self.invalid("replace data"));
        }
        self.data = data;
        self.refresh_charts();
        Ok(())
    }

    /// Read a local image file into `field`
    pub async fn load_image(&mut self, field: ImageField, path: impl AsRef<Path>) -> Result<()> {
        self.editing("load an image")?;
        let image = load_image_file_async(path).await?;
        self.apply(EditCommand::SetImage { field, image })
    }

    /// The teaser page for the active template
    pub fn render_preview(&self) -> Result<RenderPage> {
        let template = self.previewing("render the preview")?;
        Ok(self.registry.render(template, &self.data))
    }

    /// SVG markup of the preview page
    pub fn preview_svg(&self) -> Result<String> {
        Ok(self.render_preview()?.to_svg())
    }

    /// Export the preview page
    ///
    /// A failure records a [`Notice`] and is returned; template, mode and
    /// data stay as they were.
    pub async fn export(&mut self, format: ExportFormat) -> Result<ExportOutput> {
        let page = self.render_preview()?;
        let company_name = self.data.company_name.clone();
        match self.exporter.export_async(page, company_name, format).await {
            Ok(output) => Ok(output),
            Err(e) => {
                self.notices.push(Notice::new(e.user_notice(format)));
                Err(e.into())
            }
        }
    }

    fn canvas(&self, metric: Metric) -> &ChartCanvas {
        match metric {
            Metric::Revenue => &self.revenue_chart,
            Metric::Ebitda => &self.ebitda_chart,
        }
    }

    /// The chart currently shown for `metric`
    pub fn chart(&self, metric: Metric) -> Option<&RenderedChart> {
        self.canvas(metric).current()
    }

    /// Tooltip under the pointer at `(x, y)` in chart coordinates
    pub fn chart_tooltip(&self, metric: Metric, x: f64, y: f64) -> Option<&ChartTooltip> {
        self.chart(metric)?.tooltip_at(x, y)
    }

    /// How many times the chart for `metric` has been rebuilt
    pub fn chart_generation(&self, metric: Metric) -> u64 {
        self.canvas(metric).generation()
    }

    fn refresh_charts(&mut self) {
        let Some(template) = self.template() else {
            return;
        };
        let palette = chart_palette(template);
        let revenue = &self.data.revenue;
        self.revenue_chart
            .update(&revenue.historical, &revenue.projected, &palette);
        let ebitda = &self.data.ebitda;
        self.ebitda_chart
            .update(&ebitda.historical, &ebitda.projected, &palette);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edit_engine::{TextField, TextList};
    use resvg::usvg::fontdb;
    use std::sync::Arc;
    use store::{ExportSettings, LocalImageResolver, Rasterizer};
    use teaser_model::TemplateId;

    fn shell() -> Shell {
        let settings = ExportSettings::default();
        let rasterizer = Rasterizer::with_fontdb(&settings, Arc::new(fontdb::Database::new()));
        Shell::new(Exporter::with_parts(settings, rasterizer, Arc::new(LocalImageResolver)))
    }

    #[test]
    fn test_starts_in_select_mode() {
        let shell = shell();
        assert_eq!(shell.mode(), Mode::Select);
        assert!(shell.template().is_none());
        assert_eq!(shell.data(), &CompanyData::default());
        assert_eq!(shell.gallery().len(), 5);
    }

    #[test]
    fn test_full_cycle() {
        let mut shell = shell();
        let template = shell.select_template("jpmorgan-inspired").unwrap();
        assert_eq!(template.id, TemplateId::JpMorgan);
        assert_eq!(shell.mode(), Mode::Edit);

        shell.preview().unwrap();
        assert_eq!(shell.mode(), Mode::Preview);

        shell.back_to_edit().unwrap();
        assert_eq!(shell.mode(), Mode::Edit);
        assert_eq!(shell.template().map(|t| t.id), Some(TemplateId::JpMorgan));

        shell.back_to_templates().unwrap();
        assert_eq!(shell.mode(), Mode::Select);
        assert!(shell.template().is_none());
    }

    #[test]
    fn test_invalid_transitions_change_nothing() {
        let mut shell = shell();
        assert!(matches!(
            shell.preview(),
            Err(ShellError::InvalidTransition { mode: Mode::Select, .. })
        ));
        assert!(shell.back_to_edit().is_err());
        assert!(shell.back_to_templates().is_err());
        assert!(shell.render_preview().is_err());
        assert_eq!(shell.mode(), Mode::Select);

        shell.select_template("bofa-inspired").unwrap();
        assert!(shell.select_template("goldman-inspired").is_err());
        assert!(shell.back_to_edit().is_err());
        assert_eq!(shell.template().map(|t| t.id), Some(TemplateId::Bofa));

        shell.preview().unwrap();
        assert!(shell.preview().is_err());
        assert!(shell.back_to_templates().is_err());
        assert_eq!(shell.mode(), Mode::Preview);
    }

    #[test]
    fn test_unknown_template_is_rejected() {
        let mut shell = shell();
        assert!(matches!(
            shell.select_template("lehman-inspired"),
            Err(ShellError::UnknownTemplate(_))
        ));
        assert_eq!(shell.mode(), Mode::Select);
    }

    #[test]
    fn test_edits_only_in_edit_mode() {
        let mut shell = shell();
        let rename = EditCommand::SetText {
            field: TextField::CompanyName,
            value: "Acme".to_string(),
        };
        assert!(shell.apply(rename.clone()).is_err());

        shell.select_template("goldman-inspired").unwrap();
        shell.apply(rename.clone()).unwrap();
        assert_eq!(shell.data().company_name, "Acme");

        shell.preview().unwrap();
        assert!(shell.apply(rename).is_err());
        assert!(shell.replace_data(CompanyData::empty()).is_err());
        assert_eq!(shell.data().company_name, "Acme");
    }

    #[test]
    fn test_failed_edit_keeps_record() {
        let mut shell = shell();
        shell.select_template("goldman-inspired").unwrap();
        let before = shell.data().clone();

        let result = shell.apply(EditCommand::RemoveItem {
            list: TextList::Strengths,
            index: 99,
        });
        assert!(matches!(result, Err(ShellError::Edit(_))));
        assert_eq!(shell.data(), &before);
    }

    #[test]
    fn test_charts_rebuild_on_series_change_only() {
        let mut shell = shell();
        assert!(shell.chart(Metric::Revenue).is_none());

        shell.select_template("morgan-stanley-inspired").unwrap();
        assert_eq!(shell.chart_generation(Metric::Revenue), 1);
        assert_eq!(shell.chart_generation(Metric::Ebitda), 1);

        shell
            .apply(EditCommand::SetText {
                field: TextField::Location,
                value: "Chile".to_string(),
            })
            .unwrap();
        assert_eq!(shell.chart_generation(Metric::Revenue), 1);

        shell
            .apply(EditCommand::EditPointValue {
                metric: Metric::Revenue,
                period: teaser_model::Period::Projected,
                index: 0,
                input: "120".to_string(),
            })
            .unwrap();
        assert_eq!(shell.chart_generation(Metric::Revenue), 2);
        assert_eq!(shell.chart_generation(Metric::Ebitda), 1);

        shell.back_to_templates().unwrap();
        assert!(shell.chart(Metric::Revenue).is_none());
    }

    #[test]
    fn test_chart_tooltip_at_a_point() {
        let mut shell = shell();
        shell.select_template("credit-suisse-inspired").unwrap();

        let chart = shell.chart(Metric::Ebitda).unwrap();
        let target = chart.tooltips[0].clone();
        let hit = shell
            .chart_tooltip(Metric::Ebitda, target.x, target.y)
            .unwrap();
        assert_eq!(hit, &target);
        assert!(shell.chart_tooltip(Metric::Ebitda, -100.0, -100.0).is_none());
    }
}
