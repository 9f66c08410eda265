use std::sync::Once;

use profile_core::{update, Affiliation, AppState, CareerStage, Msg};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

#[test]
fn unchanged_edits_leave_state_clean() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::NameChanged("Jane".to_string()));
    let (mut state, _) = update(state, Msg::AffiliationChanged(Affiliation::Laurier));
    assert!(state.consume_dirty());

    let before = state.clone();
    let (state, effects) = update(state, Msg::NameChanged("Jane".to_string()));
    let (state, more) = update(state, Msg::AffiliationChanged(Affiliation::Laurier));
    let (mut state, stage) = update(state, Msg::StageChanged(CareerStage::PhD));

    assert!(effects.is_empty() && more.is_empty() && stage.is_empty());
    assert!(!state.consume_dirty());
    assert_eq!(state, before);
}

#[test]
fn edits_never_issue_lookups() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::NameChanged("Jane".to_string()));
    assert!(effects.is_empty());
    let (mut state, effects) = update(state, Msg::StageChanged(CareerStage::Alumni));
    assert!(effects.is_empty());
    assert!(state.consume_dirty());
    assert_eq!(state.inputs().stage, CareerStage::Alumni);
    assert!(!state.is_lookup_pending());
}
