//! The sample record the editor starts from

use crate::{CompanyData, DataPoint, FinancialSeries, ImageSource, Kpi};

fn points(values: &[(&str, f64)]) -> Vec<DataPoint> {
    values
        .iter()
        .map(|(year, value)| DataPoint::new(*year, *value))
        .collect()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

impl CompanyData {
    /// The pre-populated sample company (a Brazilian wind-farm servicer)
    pub fn default_record() -> Self {
        Self {
            company_name: "EcoWind Services".to_string(),
            logo: None,
            location: "Brazil".to_string(),
            location_image: Some(ImageSource::Url(
                "https://images.pexels.com/photos/2310713/pexels-photo-2310713.jpeg".to_string(),
            )),
            market_info: "The Brazilian wind energy market has grown by 15% annually over the last \
                five years, with installed capacity reaching 17.5 GW. Northeast Brazil accounts for \
                80% of all wind farms, with significant growth expected in offshore installations by 2030."
                .to_string(),
            company_description: "EcoWind Services is a leading provider of maintenance solutions for \
                wind farms across Brazil. Founded in 2010, the company has established itself as a \
                trusted partner for both onshore and offshore wind installations, serving over 40% of \
                Brazil's operational wind farms."
                .to_string(),
            company_strengths: strings(&[
                "Proprietary predictive maintenance technology reducing downtime by 35%",
                "Specialized drone inspection capabilities for hard-to-reach turbine components",
                "Certified technicians with 50,000+ hours of combined experience",
                "Strategic partnerships with major turbine manufacturers",
            ]),
            kpis: vec![
                Kpi::new("Market Share", "42%"),
                Kpi::new("Annual Growth", "22%"),
                Kpi::new("Customer Retention", "96%"),
                Kpi::new("Service Contracts", "215"),
            ],
            revenue: FinancialSeries::new(
                points(&[("2021", 42.0), ("2022", 58.0), ("2023", 73.0), ("2024", 92.0)]),
                points(&[("2025", 115.0), ("2026", 140.0), ("2027", 168.0)]),
            ),
            ebitda: FinancialSeries::new(
                points(&[("2021", 12.0), ("2022", 18.0), ("2023", 24.0), ("2024", 31.0)]),
                points(&[("2025", 39.0), ("2026", 48.0), ("2027", 58.0)]),
            ),
            transaction_objective: "EcoWind Services is seeking strategic investment to expand its \
                operational capacity and develop new proprietary maintenance technologies for the \
                growing offshore wind market in Brazil."
                .to_string(),
            transaction_suggestions: strings(&[
                "Partial acquisition (30-49%) by strategic partner",
                "Full acquisition by industry leader seeking Brazilian market entry",
                "Private equity investment to fund 3-year expansion plan",
                "Joint venture with complementary renewable service provider",
            ]),
        }
    }
}

impl Default for CompanyData {
    fn default() -> Self {
        Self::default_record()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_contents() {
        let data = CompanyData::default_record();
        assert_eq!(data.company_name, "EcoWind Services");
        assert_eq!(data.company_strengths.len(), 4);
        assert_eq!(data.kpis[3], Kpi::new("Service Contracts", "215"));
        assert_eq!(data.revenue.historical.len(), 4);
        assert_eq!(data.revenue.projected.last().map(|p| p.value), Some(168.0));
        assert_eq!(data.ebitda.projected[0], DataPoint::new("2025", 39.0));
        assert!(data.logo.is_none());
    }

    #[test]
    fn test_default_text_has_single_spaces() {
        let data = CompanyData::default_record();
        assert!(!data.market_info.contains("  "));
        assert!(data.market_info.ends_with("by 2030."));
        assert!(data.company_description.contains("Founded in 2010, the company"));
    }
}
