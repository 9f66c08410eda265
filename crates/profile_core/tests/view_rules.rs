use pretty_assertions::assert_eq;
use profile_core::{
    update, AppState, CandidateSummary, DetailPanel, Effect, LookupFailure, LookupFailureKind,
    Msg, Phase, ProfileDetail, SEARCH_LABEL_BUSY, SEARCH_LABEL_IDLE,
};

const URL_A: &str = "https://www.linkedin.com/in/a";
const URL_B: &str = "https://www.linkedin.com/in/b";

fn searching() -> (AppState, u64) {
    let (state, _) = update(AppState::new(), Msg::NameChanged("Jane Doe".to_string()));
    let (state, effects) = update(state, Msg::SearchSubmitted);
    match effects.as_slice() {
        [Effect::SearchProfiles { request_id, .. }] => (state, *request_id),
        other => panic!("unexpected effects {other:?}"),
    }
}

fn with_results() -> AppState {
    let (state, request_id) = searching();
    let results = [URL_A, URL_B]
        .iter()
        .map(|url| CandidateSummary {
            url: url.to_string(),
            title: format!("Title of {url}"),
        })
        .collect();
    update(
        state,
        Msg::SearchCompleted {
            request_id,
            result: Ok(results),
        },
    )
    .0
}

fn fetching(url: &str) -> (AppState, u64) {
    let (state, effects) = update(
        with_results(),
        Msg::CandidateSelected {
            url: url.to_string(),
        },
    );
    match effects.as_slice() {
        [Effect::FetchDetail { request_id, .. }] => (state, *request_id),
        other => panic!("unexpected effects {other:?}"),
    }
}

#[test]
fn idle_view_enables_search_and_hides_panels() {
    let view = AppState::new().view();
    assert_eq!(view.phase, Phase::Idle);
    assert!(view.search_enabled);
    assert_eq!(view.search_label, SEARCH_LABEL_IDLE);
    assert!(view.candidates.is_empty());
    assert_eq!(view.detail, DetailPanel::Hidden);
    assert!(view.error_message.is_none());
}

#[test]
fn search_button_disabled_while_searching() {
    let (state, _) = searching();
    let view = state.view();
    assert!(!view.search_enabled);
    assert_eq!(view.search_label, SEARCH_LABEL_BUSY);
    assert!(!view.selection_enabled);
}

#[test]
fn results_are_listed_in_order_and_selectable() {
    let view = with_results().view();
    assert!(view.search_enabled);
    assert!(view.selection_enabled);
    let urls: Vec<_> = view.candidates.iter().map(|row| row.url.as_str()).collect();
    assert_eq!(urls, vec![URL_A, URL_B]);
    assert_eq!(view.candidates[0].index, 1);
    assert!(view.candidates.iter().all(|row| !row.selected));
}

#[test]
fn selection_disabled_and_loading_shown_while_fetching_detail() {
    let (state, _) = fetching(URL_B);
    let view = state.view();
    assert!(!view.selection_enabled);
    assert!(!view.search_enabled);
    assert_eq!(
        view.detail,
        DetailPanel::Loading {
            url: URL_B.to_string()
        }
    );
    assert!(view.candidates[1].selected);
}

#[test]
fn detail_panel_rendered_only_when_ready() {
    let (state, request_id) = fetching(URL_A);
    let (state, _) = update(
        state,
        Msg::DetailCompleted {
            request_id,
            url: URL_A.to_string(),
            result: Ok(ProfileDetail {
                summary: "ML engineer".to_string(),
                links: vec!["https://github.com/a".to_string()],
            }),
        },
    );
    assert_eq!(
        state.view().detail,
        DetailPanel::Ready {
            url: URL_A.to_string(),
            summary: "ML engineer".to_string(),
            links: vec!["https://github.com/a".to_string()],
        }
    );
}

#[test]
fn error_view_surfaces_message_and_allows_retry() {
    let (state, request_id) = fetching(URL_A);
    let (state, _) = update(
        state,
        Msg::DetailCompleted {
            request_id,
            url: URL_A.to_string(),
            result: Err(LookupFailure::new(
                LookupFailureKind::MalformedResponse,
                "missing field `summary`",
            )),
        },
    );
    let view = state.view();
    assert_eq!(view.phase, Phase::Error);
    assert_eq!(
        view.error_message.as_deref(),
        Some("Profile details error: malformed response: missing field `summary`")
    );
    assert_eq!(view.detail, DetailPanel::Hidden);
    assert_eq!(view.candidates.len(), 2);
    assert!(view.search_enabled);
    assert!(view.selection_enabled);
}

#[test]
fn form_fields_are_reflected() {
    let (state, _) = update(
        AppState::new(),
        Msg::AffiliationChanged(profile_core::Affiliation::Guelph),
    );
    let (state, _) = update(state, Msg::StageChanged(profile_core::CareerStage::Alumni));
    let (state, _) = update(state, Msg::NameChanged("Jo".to_string()));
    let view = state.view();
    assert_eq!(view.name, "Jo");
    assert_eq!(view.affiliation, profile_core::Affiliation::Guelph);
    assert_eq!(view.stage, profile_core::CareerStage::Alumni);
}
