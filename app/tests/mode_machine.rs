//! Random action sequences against the shell's mode rules

use edit_engine::{EditCommand, TextField, TextList};
use proptest::prelude::*;
use resvg::usvg::fontdb;
use std::sync::Arc;
use store::{ExportSettings, Exporter, LocalImageResolver, Rasterizer};
use teaser_gen::{Mode, Shell};
use teaser_model::{catalog, CompanyData, Metric};

#[derive(Debug, Clone)]
enum Action {
    Select(String),
    Preview,
    BackToEdit,
    BackToTemplates,
    Rename(String),
    RemoveStrength(usize),
    ReplaceData,
}

fn arb_action() -> impl Strategy<Value = Action> {
    let ids: Vec<String> = catalog()
        .iter()
        .map(|t| t.id.as_str().to_string())
        .chain(std::iter::once("lehman-inspired".to_string()))
        .collect();
    prop_oneof![
        prop::sample::select(ids).prop_map(Action::Select),
        Just(Action::Preview),
        Just(Action::BackToEdit),
        Just(Action::BackToTemplates),
        "[A-Za-z ]{0,12}".prop_map(Action::Rename),
        (0usize..8).prop_map(Action::RemoveStrength),
        Just(Action::ReplaceData),
    ]
}

fn shell() -> Shell {
    let settings = ExportSettings::default();
    let rasterizer = Rasterizer::with_fontdb(&settings, Arc::new(fontdb::Database::new()));
    Shell::new(Exporter::with_parts(settings, rasterizer, Arc::new(LocalImageResolver)))
}

/// Mode after `action`, or `None` when the action is not allowed
fn expected_mode(mode: Mode, action: &Action, data: &CompanyData) -> Option<Mode> {
    match (mode, action) {
        (Mode::Select, Action::Select(id)) if id != "lehman-inspired" => Some(Mode::Edit),
        (Mode::Edit, Action::Preview) => Some(Mode::Preview),
        (Mode::Preview, Action::BackToEdit) => Some(Mode::Edit),
        (Mode::Edit, Action::BackToTemplates) => Some(Mode::Select),
        (Mode::Edit, Action::Rename(_)) => Some(Mode::Edit),
        (Mode::Edit, Action::RemoveStrength(index)) if *index < data.company_strengths.len() => {
            Some(Mode::Edit)
        }
        (Mode::Select | Mode::Edit, Action::ReplaceData) => Some(mode),
        _ => None,
    }
}

fn perform(shell: &mut Shell, action: &Action) -> bool {
    match action {
        Action::Select(id) => shell.select_template(id).is_ok(),
        Action::Preview => shell.preview().is_ok(),
        Action::BackToEdit => shell.back_to_edit().is_ok(),
        Action::BackToTemplates => shell.back_to_templates().is_ok(),
        Action::Rename(name) => shell
            .apply(EditCommand::SetText {
                field: TextField::CompanyName,
                value: name.clone(),
            })
            .is_ok(),
        Action::RemoveStrength(index) => shell
            .apply(EditCommand::RemoveItem {
                list: TextList::Strengths,
                index: *index,
            })
            .is_ok(),
        Action::ReplaceData => shell.replace_data(CompanyData::default()).is_ok(),
    }
}

proptest! {
    #[test]
    fn shell_follows_the_mode_rules(actions in prop::collection::vec(arb_action(), 1..40)) {
        let mut shell = shell();
        for action in &actions {
            let mode = shell.mode();
            let data = shell.data().clone();
            let template = shell.template().map(|t| t.id);

            let expected = expected_mode(mode, action, &data);
            let accepted = perform(&mut shell, action);
            prop_assert_eq!(accepted, expected.is_some(), "{:?} in {}", action, mode);

            match expected {
                Some(next) => prop_assert_eq!(shell.mode(), next),
                None => {
                    prop_assert_eq!(shell.mode(), mode);
                    prop_assert_eq!(shell.data(), &data);
                    prop_assert_eq!(shell.template().map(|t| t.id), template);
                }
            }

            // Select has no template and no charts; the other modes have both
            let in_select = shell.mode() == Mode::Select;
            prop_assert_eq!(shell.template().is_none(), in_select);
            prop_assert_eq!(shell.chart(Metric::Revenue).is_none(), in_select);
            prop_assert_eq!(shell.chart(Metric::Ebitda).is_none(), in_select);
        }
    }
}
