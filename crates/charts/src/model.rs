//! Chart model types
//!
//! A teaser chart is always a line chart with two datasets over one shared
//! category axis: the historical values followed by the projected ones.
//! Each dataset is padded with gaps (`None`) under the other's labels so the
//! two lines never overlap.

use serde::{Deserialize, Serialize};
use teaser_model::{Color, DataPoint};

/// Colors applied to one chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPalette {
    /// Stroke and marker color of the historical line
    pub historical: Color,
    /// Stroke and marker color of the projected line
    pub projected: Color,
    /// Horizontal gridline color
    pub grid: Color,
}

impl ChartPalette {
    pub fn new(historical: Color, projected: Color, grid: Color) -> Self {
        Self {
            historical,
            projected,
            grid,
        }
    }
}

impl Default for ChartPalette {
    fn default() -> Self {
        Self {
            historical: Color::rgb(0x0A, 0x23, 0x51),
            projected: Color::rgb(0xE8, 0xC0, 0x52),
            grid: Color::GRAY_200,
        }
    }
}

/// Dash pattern for projected values
pub const PROJECTED_DASH: [f64; 2] = [5.0, 5.0];

/// Headroom factor applied to the data maximum
pub const SUGGESTED_MAX_FACTOR: f64 = 1.2;

/// One dataset of a line chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    /// Dataset label ("Historical" / "Projected")
    pub name: String,
    /// One entry per category; `None` leaves a gap
    pub values: Vec<Option<f64>>,
    pub color: Color,
    /// Stroke dash pattern, solid when `None`
    pub dash: Option<[f64; 2]>,
    pub line_width: f64,
    pub point_radius: f64,
}

impl LineSeries {
    /// Create a solid series with the default stroke
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>, color: Color) -> Self {
        Self {
            name: name.into(),
            values,
            color,
            dash: None,
            line_width: 2.0,
            point_radius: 3.0,
        }
    }

    /// Use a dashed stroke
    pub fn dashed(mut self, dash: [f64; 2]) -> Self {
        self.dash = Some(dash);
        self
    }

    /// Iterate over present values with their category index
    pub fn points(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(idx, value)| value.map(|v| (idx, v)))
    }
}

/// A line chart over a shared category axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChart {
    /// Category labels in display order
    pub categories: Vec<String>,
    pub series: Vec<LineSeries>,
    /// Preferred top of the value axis; the axis may extend past it
    pub suggested_max: Option<f64>,
}

impl LineChart {
    /// Build the two-dataset chart for a historical/projected split
    ///
    /// Labels keep their input order: historical labels first, then
    /// projected ones. Duplicate labels are kept as separate categories.
    pub fn from_series(
        historical: &[DataPoint],
        projected: &[DataPoint],
        palette: &ChartPalette,
    ) -> Self {
        let categories: Vec<String> = historical
            .iter()
            .chain(projected.iter())
            .map(|p| p.year.clone())
            .collect();

        let historical_values = historical
            .iter()
            .map(|p| Some(p.value))
            .chain(std::iter::repeat(None).take(projected.len()))
            .collect();

        let projected_values = std::iter::repeat(None)
            .take(historical.len())
            .chain(projected.iter().map(|p| Some(p.value)))
            .collect();

        let mut chart = Self {
            categories,
            series: vec![
                LineSeries::new("Historical", historical_values, palette.historical),
                LineSeries::new("Projected", projected_values, palette.projected)
                    .dashed(PROJECTED_DASH),
            ],
            suggested_max: None,
        };
        chart.suggested_max = chart.max_value().map(|max| max * SUGGESTED_MAX_FACTOR);
        chart
    }

    /// Number of categories on the shared axis
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Whether no series has any value
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points().next().is_none())
    }

    /// Smallest present value across all series
    pub fn min_value(&self) -> Option<f64> {
        self.series
            .iter()
            .flat_map(|s| s.points().map(|(_, v)| v))
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.min(v))))
    }

    /// Largest present value across all series
    pub fn max_value(&self) -> Option<f64> {
        self.series
            .iter()
            .flat_map(|s| s.points().map(|(_, v)| v))
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))
    }
}
