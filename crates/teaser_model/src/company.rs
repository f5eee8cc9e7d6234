//! Company and financial data shown on a teaser

use crate::image::optional_image;
use crate::{ImageSource, Result};
use serde::{Deserialize, Serialize};

/// All facts rendered on a teaser document
///
/// List order is display order. Time series keep the label order they were
/// entered in; nothing here sorts or deduplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyData {
    pub company_name: String,
    #[serde(default, with = "optional_image")]
    pub logo: Option<ImageSource>,
    pub location: String,
    #[serde(default, with = "optional_image")]
    pub location_image: Option<ImageSource>,
    pub market_info: String,
    pub company_description: String,
    #[serde(default)]
    pub company_strengths: Vec<String>,
    #[serde(default)]
    pub kpis: Vec<Kpi>,
    #[serde(rename = "revenueData", default)]
    pub revenue: FinancialSeries,
    #[serde(rename = "ebitdaData", default)]
    pub ebitda: FinancialSeries,
    pub transaction_objective: String,
    #[serde(default)]
    pub transaction_suggestions: Vec<String>,
}

impl CompanyData {
    /// A record with every field empty
    pub fn empty() -> Self {
        Self {
            company_name: String::new(),
            logo: None,
            location: String::new(),
            location_image: None,
            market_info: String::new(),
            company_description: String::new(),
            company_strengths: Vec::new(),
            kpis: Vec::new(),
            revenue: FinancialSeries::default(),
            ebitda: FinancialSeries::default(),
            transaction_objective: String::new(),
            transaction_suggestions: Vec::new(),
        }
    }

    /// Parse a record from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the record to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Get a financial series by metric
    pub fn series(&self, metric: Metric) -> &FinancialSeries {
        match metric {
            Metric::Revenue => &self.revenue,
            Metric::Ebitda => &self.ebitda,
        }
    }

    /// Get a financial series by metric, mutably
    pub fn series_mut(&mut self, metric: Metric) -> &mut FinancialSeries {
        match metric {
            Metric::Revenue => &mut self.revenue,
            Metric::Ebitda => &mut self.ebitda,
        }
    }
}

/// A named key performance indicator; the value is display text ("42%")
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kpi {
    pub name: String,
    pub value: String,
}

impl Kpi {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One labelled point of a financial time series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub year: String,
    pub value: f64,
}

impl DataPoint {
    pub fn new(year: impl Into<String>, value: f64) -> Self {
        Self {
            year: year.into(),
            value,
        }
    }
}

/// Historical and projected values of one metric
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialSeries {
    #[serde(default)]
    pub historical: Vec<DataPoint>,
    #[serde(default)]
    pub projected: Vec<DataPoint>,
}

impl FinancialSeries {
    pub fn new(historical: Vec<DataPoint>, projected: Vec<DataPoint>) -> Self {
        Self {
            historical,
            projected,
        }
    }

    /// Get one half of the series
    pub fn period(&self, period: Period) -> &[DataPoint] {
        match period {
            Period::Historical => &self.historical,
            Period::Projected => &self.projected,
        }
    }

    /// Get one half of the series, mutably
    pub fn period_mut(&mut self, period: Period) -> &mut Vec<DataPoint> {
        match period {
            Period::Historical => &mut self.historical,
            Period::Projected => &mut self.projected,
        }
    }

    /// Total number of points across both halves
    pub fn len(&self) -> usize {
        self.historical.len() + self.projected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.historical.is_empty() && self.projected.is_empty()
    }
}

/// Which financial metric a series describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Revenue,
    Ebitda,
}

impl Metric {
    /// Chart caption used on the teaser
    pub fn chart_title(&self) -> &'static str {
        match self {
            Metric::Revenue => "Revenue (M$)",
            Metric::Ebitda => "EBITDA (M$)",
        }
    }
}

/// Historical (actuals) or projected (forecast) half of a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Historical,
    Projected,
}
