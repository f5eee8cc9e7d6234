//! Editor tabs and the fields each one owns

use serde::{Deserialize, Serialize};

/// A tab of the editing form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorTab {
    Company,
    Market,
    Financials,
    Transaction,
}

/// A single editable field of a company record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    CompanyName,
    Location,
    Logo,
    LocationImage,
    CompanyDescription,
    CompanyStrengths,
    MarketInfo,
    Kpis,
    RevenueData,
    EbitdaData,
    TransactionObjective,
    TransactionSuggestions,
}

impl EditorTab {
    /// Tabs in display order
    pub const ALL: [EditorTab; 4] = [
        EditorTab::Company,
        EditorTab::Market,
        EditorTab::Financials,
        EditorTab::Transaction,
    ];

    /// Tab caption
    pub fn label(&self) -> &'static str {
        match self {
            EditorTab::Company => "Company Information",
            EditorTab::Market => "Market Information",
            EditorTab::Financials => "Financials Information",
            EditorTab::Transaction => "Transaction Information",
        }
    }

    /// Fields shown on this tab
    pub fn fields(&self) -> &'static [Field] {
        match self {
            EditorTab::Company => &[
                Field::CompanyName,
                Field::Location,
                Field::Logo,
                Field::LocationImage,
                Field::CompanyDescription,
                Field::CompanyStrengths,
            ],
            EditorTab::Market => &[Field::MarketInfo],
            EditorTab::Financials => &[Field::Kpis, Field::RevenueData, Field::EbitdaData],
            EditorTab::Transaction => &[Field::TransactionObjective, Field::TransactionSuggestions],
        }
    }
}

impl Field {
    /// The tab that owns this field
    pub fn tab(&self) -> EditorTab {
        match self {
            Field::CompanyName
            | Field::Location
            | Field::Logo
            | Field::LocationImage
            | Field::CompanyDescription
            | Field::CompanyStrengths => EditorTab::Company,
            Field::MarketInfo => EditorTab::Market,
            Field::Kpis | Field::RevenueData | Field::EbitdaData => EditorTab::Financials,
            Field::TransactionObjective | Field::TransactionSuggestions => EditorTab::Transaction,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Field::CompanyName => "companyName",
            Field::Location => "location",
            Field::Logo => "logo",
            Field::LocationImage => "locationImage",
            Field::CompanyDescription => "companyDescription",
            Field::CompanyStrengths => "companyStrengths",
            Field::MarketInfo => "marketInfo",
            Field::Kpis => "kpis",
            Field::RevenueData => "revenueData",
            Field::EbitdaData => "ebitdaData",
            Field::TransactionObjective => "transactionObjective",
            Field::TransactionSuggestions => "transactionSuggestions",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_tab_labels() {
        let labels: Vec<_> = EditorTab::ALL.iter().map(|tab| tab.label()).collect();
        assert_eq!(
            labels,
            vec![
                "Company Information",
                "Market Information",
                "Financials Information",
                "Transaction Information"
            ]
        );
    }

    #[test]
    fn test_fields_are_disjoint_and_consistent() {
        let mut seen = HashSet::new();
        for tab in EditorTab::ALL {
            for field in tab.fields() {
                assert!(seen.insert(*field), "{:?} on two tabs", field);
                assert_eq!(field.tab(), tab);
            }
        }
        assert_eq!(seen.len(), 12);
    }
}
