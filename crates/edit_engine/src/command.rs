//! Edit commands for company data
//!
//! Every change the editor can make is an [`EditCommand`] value. Applying a
//! command never mutates its input: it returns a new record, and the owner
//! of the canonical record swaps it in.

use crate::{parse_lenient, EditError, EditorTab, Field, Result};
use serde::{Deserialize, Serialize};
use teaser_model::{CompanyData, DataPoint, InlineImage, ImageSource, Kpi, Metric, Period};

/// A free-text field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextField {
    CompanyName,
    Location,
    MarketInfo,
    CompanyDescription,
    TransactionObjective,
}

/// An image field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageField {
    Logo,
    LocationImage,
}

/// A list of statements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextList {
    Strengths,
    Suggestions,
}

/// Which half of a KPI pair to edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KpiPart {
    Name,
    Value,
}

/// One editing action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EditCommand {
    SetText { field: TextField, value: String },
    SetImage { field: ImageField, image: InlineImage },
    ClearImage { field: ImageField },

    AppendItem { list: TextList },
    EditItem { list: TextList, index: usize, value: String },
    RemoveItem { list: TextList, index: usize },

    AppendKpi,
    EditKpi { index: usize, part: KpiPart, value: String },
    RemoveKpi { index: usize },

    AppendPoint { metric: Metric, period: Period },
    EditPointYear { metric: Metric, period: Period, index: usize, year: String },
    /// `input` is raw form text and is parsed leniently
    EditPointValue { metric: Metric, period: Period, index: usize, input: String },
    RemovePoint { metric: Metric, period: Period, index: usize },
}

impl TextField {
    pub fn field(&self) -> Field {
        match self {
            TextField::CompanyName => Field::CompanyName,
            TextField::Location => Field::Location,
            TextField::MarketInfo => Field::MarketInfo,
            TextField::CompanyDescription => Field::CompanyDescription,
            TextField::TransactionObjective => Field::TransactionObjective,
        }
    }

    fn slot<'a>(&self, data: &'a mut CompanyData) -> &'a mut String {
        match self {
            TextField::CompanyName => &mut data.company_name,
            TextField::Location => &mut data.location,
            TextField::MarketInfo => &mut data.market_info,
            TextField::CompanyDescription => &mut data.company_description,
            TextField::TransactionObjective => &mut data.transaction_objective,
        }
    }
}

impl ImageField {
    pub fn field(&self) -> Field {
        match self {
            ImageField::Logo => Field::Logo,
            ImageField::LocationImage => Field::LocationImage,
        }
    }

    fn slot<'a>(&self, data: &'a mut CompanyData) -> &'a mut Option<ImageSource> {
        match self {
            ImageField::Logo => &mut data.logo,
            ImageField::LocationImage => &mut data.location_image,
        }
    }
}

impl TextList {
    pub fn field(&self) -> Field {
        match self {
            TextList::Strengths => Field::CompanyStrengths,
            TextList::Suggestions => Field::TransactionSuggestions,
        }
    }

    fn slot<'a>(&self, data: &'a mut CompanyData) -> &'a mut Vec<String> {
        match self {
            TextList::Strengths => &mut data.company_strengths,
            TextList::Suggestions => &mut data.transaction_suggestions,
        }
    }
}

fn series_field(metric: Metric) -> Field {
    match metric {
        Metric::Revenue => Field::RevenueData,
        Metric::Ebitda => Field::EbitdaData,
    }
}

fn checked_index<T>(items: &[T], index: usize, field: Field) -> Result<usize> {
    if index < items.len() {
        Ok(index)
    } else {
        Err(EditError::IndexOutOfRange {
            field: field.name(),
            index,
            len: items.len(),
        })
    }
}

impl EditCommand {
    /// The field this command changes
    pub fn field(&self) -> Field {
        match self {
            EditCommand::SetText { field, .. } => field.field(),
            EditCommand::SetImage { field, .. } | EditCommand::ClearImage { field } => field.field(),
            EditCommand::AppendItem { list }
            | EditCommand::EditItem { list, .. }
            | EditCommand::RemoveItem { list, .. } => list.field(),
            EditCommand::AppendKpi | EditCommand::EditKpi { .. } | EditCommand::RemoveKpi { .. } => Field::Kpis,
            EditCommand::AppendPoint { metric, .. }
            | EditCommand::EditPointYear { metric, .. }
            | EditCommand::EditPointValue { metric, .. }
            | EditCommand::RemovePoint { metric, .. } => series_field(*metric),
        }
    }

    /// The tab this command belongs to
    pub fn tab(&self) -> EditorTab {
        self.field().tab()
    }

    /// Apply to `data`, returning the updated record
    ///
    /// On error `data` is untouched and no record is produced.
    pub fn apply(&self, data: &CompanyData) -> Result<CompanyData> {
        let mut next = data.clone();
        self.apply_in_place(&mut next)?;
        Ok(next)
    }

    fn apply_in_place(&self, data: &mut CompanyData) -> Result<()> {
        match self {
            EditCommand::SetText { field, value } => {
                *field.slot(data) = value.clone();
            }
            EditCommand::SetImage { field, image } => {
                *field.slot(data) = Some(ImageSource::Inline(image.clone()));
            }
            EditCommand::ClearImage { field } => {
                *field.slot(data) = None;
            }

            EditCommand::AppendItem { list } => {
                list.slot(data).push(String::new());
            }
            EditCommand::EditItem { list, index, value } => {
                let items = list.slot(data);
                let index = checked_index(items, *index, list.field())?;
                items[index] = value.clone();
            }
            EditCommand::RemoveItem { list, index } => {
                let items = list.slot(data);
                let index = checked_index(items, *index, list.field())?;
                items.remove(index);
            }

            EditCommand::AppendKpi => {
                data.kpis.push(Kpi::new("", ""));
            }
            EditCommand::EditKpi { index, part, value } => {
                let index = checked_index(&data.kpis, *index, Field::Kpis)?;
                let kpi = &mut data.kpis[index];
                match part {
                    KpiPart::Name => kpi.name = value.clone(),
                    KpiPart::Value => kpi.value = value.clone(),
                }
            }
            EditCommand::RemoveKpi { index } => {
                let index = checked_index(&data.kpis, *index, Field::Kpis)?;
                data.kpis.remove(index);
            }

            EditCommand::AppendPoint { metric, period } => {
                data.series_mut(*metric).period_mut(*period).push(DataPoint::new("", 0.0));
            }
            EditCommand::EditPointYear {
                metric,
                period,
                index,
                year,
            } => {
                let points = data.series_mut(*metric).period_mut(*period);
                let index = checked_index(points, *index, series_field(*metric))?;
                points[index].year = year.clone();
            }
            EditCommand::EditPointValue {
                metric,
                period,
                index,
                input,
            } => {
                let points = data.series_mut(*metric).period_mut(*period);
                let index = checked_index(points, *index, series_field(*metric))?;
                points[index].value = parse_lenient(input);
            }
            EditCommand::RemovePoint { metric, period, index } => {
                let points = data.series_mut(*metric).period_mut(*period);
                let index = checked_index(points, *index, series_field(*metric))?;
                points.remove(index);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_text_returns_new_record() {
        let data = CompanyData::default();
        let cmd = EditCommand::SetText {
            field: TextField::CompanyName,
            value: "Acme Wind".to_string(),
        };
        let next = cmd.apply(&data).unwrap();
        assert_eq!(next.company_name, "Acme Wind");
        assert_eq!(data.company_name, "EcoWind Services");
        assert_eq!(cmd.tab(), EditorTab::Company);
    }

    #[test]
    fn test_set_and_clear_image() {
        let data = CompanyData::empty();
        let image = InlineImage::new("image/png", vec![0x89, 0x50]);
        let with_logo = EditCommand::SetImage {
            field: ImageField::Logo,
            image: image.clone(),
        }
        .apply(&data)
        .unwrap();
        assert_eq!(with_logo.logo, Some(ImageSource::Inline(image)));

        let cleared = EditCommand::ClearImage { field: ImageField::Logo }
            .apply(&with_logo)
            .unwrap();
        assert_eq!(cleared.logo, None);
    }

    #[test]
    fn test_append_adds_blank_entry_at_end() {
        let data = CompanyData::default();
        let next = EditCommand::AppendItem { list: TextList::Suggestions }
            .apply(&data)
            .unwrap();
        assert_eq!(next.transaction_suggestions.len(), data.transaction_suggestions.len() + 1);
        assert_eq!(next.transaction_suggestions.last().map(String::as_str), Some(""));

        let next = EditCommand::AppendKpi.apply(&data).unwrap();
        assert_eq!(next.kpis.last(), Some(&Kpi::new("", "")));
    }

    #[test]
    fn test_remove_closes_gap() {
        let data = CompanyData::default();
        let next = EditCommand::RemoveItem {
            list: TextList::Strengths,
            index: 1,
        }
        .apply(&data)
        .unwrap();

        let mut expected = data.company_strengths.clone();
        expected.remove(1);
        assert_eq!(next.company_strengths, expected);
    }

    #[test]
    fn test_out_of_range_is_an_error() {
        let data = CompanyData::default();
        let err = EditCommand::RemoveKpi { index: 4 }.apply(&data).unwrap_err();
        assert!(matches!(
            err,
            EditError::IndexOutOfRange {
                field: "kpis",
                index: 4,
                len: 4
            }
        ));

        let err = EditCommand::EditPointValue {
            metric: Metric::Ebitda,
            period: Period::Projected,
            index: 9,
            input: "1".to_string(),
        }
        .apply(&data)
        .unwrap_err();
        assert!(matches!(err, EditError::IndexOutOfRange { field: "ebitdaData", .. }));
    }

    #[test]
    fn test_point_value_is_parsed_leniently() {
        let data = CompanyData::default();
        let edit = |input: &str| EditCommand::EditPointValue {
            metric: Metric::Revenue,
            period: Period::Historical,
            index: 0,
            input: input.to_string(),
        };

        let next = edit("55.5").apply(&data).unwrap();
        assert_eq!(next.revenue.historical[0].value, 55.5);

        let next = edit("abc").apply(&data).unwrap();
        assert_eq!(next.revenue.historical[0].value, 0.0);
        assert_eq!(next.revenue.historical[0].year, "2021");
    }

    #[test]
    fn test_point_year_and_append() {
        let data = CompanyData::default();
        let next = EditCommand::EditPointYear {
            metric: Metric::Revenue,
            period: Period::Projected,
            index: 2,
            year: "2028E".to_string(),
        }
        .apply(&data)
        .unwrap();
        assert_eq!(next.revenue.projected[2].year, "2028E");

        let next = EditCommand::AppendPoint {
            metric: Metric::Ebitda,
            period: Period::Historical,
        }
        .apply(&next)
        .unwrap();
        assert_eq!(next.ebitda.historical.len(), 5);
        assert_eq!(next.ebitda.historical[4], DataPoint::new("", 0.0));
    }

    #[test]
    fn test_command_tabs() {
        assert_eq!(EditCommand::AppendKpi.tab(), EditorTab::Financials);
        assert_eq!(
            EditCommand::SetText {
                field: TextField::MarketInfo,
                value: String::new()
            }
            .tab(),
            EditorTab::Market
        );
        assert_eq!(
            EditCommand::RemoveItem {
                list: TextList::Suggestions,
                index: 0
            }
            .tab(),
            EditorTab::Transaction
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn record_with(strengths: Vec<String>) -> CompanyData {
            CompanyData {
                company_strengths: strengths,
                ..CompanyData::empty()
            }
        }

        proptest! {
            #[test]
            fn append_then_remove_last_restores(items in prop::collection::vec(".{0,12}", 0..8)) {
                let data = record_with(items.clone());
                let appended = EditCommand::AppendItem { list: TextList::Strengths }.apply(&data).unwrap();
                let restored = EditCommand::RemoveItem { list: TextList::Strengths, index: items.len() }
                    .apply(&appended)
                    .unwrap();
                prop_assert_eq!(restored.company_strengths, items);
            }

            #[test]
            fn remove_shifts_later_items_down(
                items in prop::collection::vec("[a-z]{1,6}", 1..10),
                pick in any::<prop::sample::Index>(),
            ) {
                let index = pick.index(items.len());
                let data = record_with(items.clone());
                let next = EditCommand::RemoveItem { list: TextList::Strengths, index }.apply(&data).unwrap();

                prop_assert_eq!(next.company_strengths.len(), items.len() - 1);
                prop_assert_eq!(&next.company_strengths[..index], &items[..index]);
                prop_assert_eq!(&next.company_strengths[index..], &items[index + 1..]);
            }

            #[test]
            fn out_of_range_never_changes_data(
                items in prop::collection::vec("[a-z]{1,6}", 0..6),
                extra in 0usize..5,
            ) {
                let data = record_with(items.clone());
                let index = items.len() + extra;
                let result = EditCommand::EditItem {
                    list: TextList::Strengths,
                    index,
                    value: "x".to_string(),
                }
                .apply(&data);
                prop_assert!(result.is_err());
                prop_assert_eq!(data.company_strengths, items);
            }
        }
    }
}
