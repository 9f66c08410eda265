use std::sync::Once;

use pretty_assertions::assert_eq;
use profile_core::{
    update, AppState, CandidateSummary, Effect, LookupFailure, LookupFailureKind, Msg, Phase,
    ProfileDetail, RequestId,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn url(n: usize) -> String {
    format!("https://www.linkedin.com/in/person-{n}")
}

fn detail_for(url: &str) -> ProfileDetail {
    ProfileDetail {
        summary: format!("Summary of {url}"),
        links: vec![format!("{url}/github")],
    }
}

/// State with three candidates loaded and no selection.
fn with_results() -> AppState {
    let (state, _) = update(AppState::new(), Msg::NameChanged("Jane Doe".to_string()));
    let (state, effects) = update(state, Msg::SearchSubmitted);
    let request_id = match effects.as_slice() {
        [Effect::SearchProfiles { request_id, .. }] => *request_id,
        other => panic!("unexpected effects {other:?}"),
    };
    let results = (1..=3)
        .map(|n| CandidateSummary {
            url: url(n),
            title: format!("Person {n}"),
        })
        .collect();
    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            request_id,
            result: Ok(results),
        },
    );
    state
}

fn select(state: AppState, url: &str) -> (AppState, Option<RequestId>) {
    let (state, effects) = update(
        state,
        Msg::CandidateSelected {
            url: url.to_string(),
        },
    );
    let request_id = effects.iter().find_map(|effect| match effect {
        Effect::FetchDetail { request_id, .. } => Some(*request_id),
        _ => None,
    });
    (state, request_id)
}

fn complete(
    state: AppState,
    request_id: RequestId,
    url: &str,
    result: Result<ProfileDetail, LookupFailure>,
) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::DetailCompleted {
            request_id,
            url: url.to_string(),
            result,
        },
    )
}

#[test]
fn selection_enters_fetching_detail_without_stale_detail() {
    init_logging();
    let (state, first) = select(with_results(), &url(1));
    let (state, _) = complete(state, first.unwrap(), &url(1), Ok(detail_for(&url(1))));
    assert_eq!(state.phase(), Phase::DetailReady);

    let (state, second) = select(state, &url(2));
    assert!(second.is_some());
    assert_eq!(state.phase(), Phase::FetchingDetail);
    assert_eq!(state.last_selected_url(), Some(url(2).as_str()));
    assert!(state.selected_detail().is_none());
}

#[test]
fn successful_detail_is_stored() {
    init_logging();
    let (state, request_id) = select(with_results(), &url(2));
    let (state, effects) = complete(state, request_id.unwrap(), &url(2), Ok(detail_for(&url(2))));

    assert!(effects.is_empty());
    assert_eq!(state.phase(), Phase::DetailReady);
    assert_eq!(state.selected_detail(), Some(&detail_for(&url(2))));
}

#[test]
fn detail_http_500_enters_error_and_keeps_candidates() {
    init_logging();
    let state = with_results();
    let before = state.candidates().to_vec();

    let (state, request_id) = select(state, &url(1));
    let (state, effects) = complete(
        state,
        request_id.unwrap(),
        &url(1),
        Err(LookupFailure::new(
            LookupFailureKind::HttpStatus(500),
            "500 Internal Server Error",
        )),
    );

    let expected = "Profile details error: HTTP error! status: 500";
    assert_eq!(state.phase(), Phase::Error);
    assert!(state.selected_detail().is_none());
    assert_eq!(state.candidates(), &before[..]);
    assert_eq!(state.error_message(), Some(expected));
    assert_eq!(
        effects,
        vec![Effect::Notify {
            message: expected.to_string()
        }]
    );

    // Still interactive: the operator can retry another candidate.
    let (state, retry) = select(state, &url(2));
    assert!(retry.is_some());
    assert_eq!(state.phase(), Phase::FetchingDetail);
    assert!(state.error_message().is_none());
}

#[test]
fn slow_response_for_superseded_selection_is_discarded() {
    init_logging();
    let (state, slow) = select(with_results(), &url(1));
    let (state, fast) = select(state, &url(2));
    let (slow, fast) = (slow.unwrap(), fast.unwrap());
    assert_ne!(slow, fast);

    let (state, _) = complete(state, fast, &url(2), Ok(detail_for(&url(2))));
    assert_eq!(state.phase(), Phase::DetailReady);

    let (state, effects) = complete(state, slow, &url(1), Ok(detail_for(&url(1))));
    assert!(effects.is_empty());
    assert_eq!(state.phase(), Phase::DetailReady);
    assert_eq!(state.last_selected_url(), Some(url(2).as_str()));
    assert_eq!(state.selected_detail(), Some(&detail_for(&url(2))));
    assert_eq!(state.stale_discarded(), 1);
}

#[test]
fn superseded_failure_does_not_surface_error() {
    init_logging();
    let (state, slow) = select(with_results(), &url(1));
    let (state, _fast) = select(state, &url(2));

    let (state, effects) = complete(
        state,
        slow.unwrap(),
        &url(1),
        Err(LookupFailure::new(LookupFailureKind::Timeout, "timeout")),
    );
    assert!(effects.is_empty());
    assert_eq!(state.phase(), Phase::FetchingDetail);
    assert!(state.error_message().is_none());
}

#[test]
fn completion_with_mismatched_url_is_discarded() {
    init_logging();
    let (state, request_id) = select(with_results(), &url(1));
    let (state, _) = complete(state, request_id.unwrap(), &url(3), Ok(detail_for(&url(3))));

    assert_eq!(state.phase(), Phase::FetchingDetail);
    assert!(state.selected_detail().is_none());
}

#[test]
fn reselecting_loaded_candidate_refetches() {
    init_logging();
    let (state, first) = select(with_results(), &url(1));
    let (state, _) = complete(state, first.unwrap(), &url(1), Ok(detail_for(&url(1))));
    let first_detail = state.selected_detail().cloned();

    let (state, second) = select(state, &url(1));
    assert!(second.is_some());
    assert_ne!(first, second);
    assert!(state.selected_detail().is_none());

    let (state, _) = complete(state, second.unwrap(), &url(1), Ok(detail_for(&url(1))));
    assert_eq!(state.selected_detail().cloned(), first_detail);
}

#[test]
fn duplicate_selection_while_in_flight_is_ignored() {
    init_logging();
    let (state, first) = select(with_results(), &url(1));
    let (state, again) = select(state, &url(1));
    assert!(first.is_some());
    assert!(again.is_none());

    let (state, _) = complete(state, first.unwrap(), &url(1), Ok(detail_for(&url(1))));
    assert_eq!(state.phase(), Phase::DetailReady);
}

#[test]
fn unknown_candidate_is_ignored() {
    init_logging();
    let state = with_results();
    let (state, request_id) = select(state, "https://www.linkedin.com/in/stranger");
    assert!(request_id.is_none());
    assert_eq!(state.phase(), Phase::ResultsReady);
}

#[test]
fn selection_is_ignored_while_searching() {
    init_logging();
    let state = with_results();
    let (state, _) = update(state, Msg::SearchSubmitted);
    let (state, request_id) = select(state, &url(1));
    assert!(request_id.is_none());
    assert_eq!(state.phase(), Phase::Searching);
}

#[test]
fn submit_is_ignored_while_detail_pending() {
    init_logging();
    let (state, _) = select(with_results(), &url(1));
    let (state, effects) = update(state, Msg::SearchSubmitted);
    assert!(effects.is_empty());
    assert_eq!(state.phase(), Phase::FetchingDetail);
    assert_eq!(state.candidates().len(), 3);
}
