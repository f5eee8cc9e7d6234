//! On-screen chart slot
//!
//! A canvas owns at most one rendered chart. When its inputs change the old
//! chart is discarded and a new one is built from scratch.

use crate::model::*;
use crate::render::*;
use teaser_model::DataPoint;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
struct CanvasInputs {
    historical: Vec<DataPoint>,
    projected: Vec<DataPoint>,
    palette: ChartPalette,
}

/// A fixed-size chart slot that rebuilds on input change
#[derive(Debug)]
pub struct ChartCanvas {
    width: f64,
    height: f64,
    font_family: String,
    inputs: Option<CanvasInputs>,
    chart: Option<RenderedChart>,
    generation: u64,
}

impl ChartCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            font_family: "sans-serif".to_string(),
            inputs: None,
            chart: None,
            generation: 0,
        }
    }

    /// Set the font used for tick labels; forces a rebuild on next update
    pub fn with_font_family(mut self, font_family: impl Into<String>) -> Self {
        self.font_family = font_family.into();
        self.inputs = None;
        self
    }

    /// Show the given series, rebuilding only if they differ from last time
    pub fn update(
        &mut self,
        historical: &[DataPoint],
        projected: &[DataPoint],
        palette: &ChartPalette,
    ) -> &RenderedChart {
        let unchanged = self.inputs.as_ref().is_some_and(|inputs| {
            inputs.historical == historical && inputs.projected == projected && inputs.palette == *palette
        });

        let chart = match self.chart.take() {
            Some(chart) if unchanged => chart,
            stale => {
                // Drop the previous chart before building its replacement
                drop(stale);
                self.rebuild(historical, projected, palette)
            }
        };
        self.chart.insert(chart)
    }

    fn rebuild(
        &mut self,
        historical: &[DataPoint],
        projected: &[DataPoint],
        palette: &ChartPalette,
    ) -> RenderedChart {
        let model = LineChart::from_series(historical, projected, palette);
        let rendered = ChartRenderer::new()
            .with_font_family(self.font_family.clone())
            .render_chart(&model, palette, self.width, self.height);

        self.generation += 1;
        debug!(
            generation = self.generation,
            points = historical.len() + projected.len(),
            "Rebuilt chart"
        );

        self.inputs = Some(CanvasInputs {
            historical: historical.to_vec(),
            projected: projected.to_vec(),
            palette: *palette,
        });
        rendered
    }

    /// The chart currently shown, if any
    pub fn current(&self) -> Option<&RenderedChart> {
        self.chart.as_ref()
    }

    /// Number of times a chart has been built on this canvas
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Release the current chart
    pub fn clear(&mut self) {
        self.chart = None;
        self.inputs = None;
    }
}
