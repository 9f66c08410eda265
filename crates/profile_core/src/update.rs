use engine_logging::{engine_debug, engine_warn};

use crate::state::PendingLookup;
use crate::{AppState, Effect, Msg, Phase, ServiceStatus};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::NameChanged(name) => {
            state.set_name(name);
            Vec::new()
        }
        Msg::AffiliationChanged(affiliation) => {
            state.set_affiliation(affiliation);
            Vec::new()
        }
        Msg::StageChanged(stage) => {
            state.set_stage(stage);
            Vec::new()
        }
        Msg::SearchSubmitted => submit_search(&mut state),
        Msg::SearchCompleted { request_id, result } => {
            let applied = state.apply_search_result(request_id, result);
            failure_notification(&state, applied)
        }
        Msg::CandidateSelected { url } => select_candidate(&mut state, url),
        Msg::DetailCompleted {
            request_id,
            url,
            result,
        } => {
            let applied = state.apply_detail_result(request_id, &url, result);
            failure_notification(&state, applied)
        }
        Msg::Started => vec![Effect::CheckHealth],
        Msg::HealthChecked { result } => {
            let status = match result {
                Ok(()) => ServiceStatus::Available,
                Err(failure) => ServiceStatus::Unavailable(failure.to_string()),
            };
            state.set_service_status(status);
            Vec::new()
        }
    };

    (state, effects)
}

fn submit_search(state: &mut AppState) -> Vec<Effect> {
    // One remote call at a time: the search control is disabled while any
    // lookup is outstanding.
    if state.is_lookup_pending() {
        engine_debug!("Search submit ignored; lookup pending in {:?}", state.phase());
        return Vec::new();
    }

    match state.inputs().validate() {
        Ok(query) => {
            let request_id = state.begin_search();
            vec![Effect::SearchProfiles { request_id, query }]
        }
        Err(err) => {
            let message = err.to_string();
            state.reject_submission(message.clone());
            vec![Effect::Notify { message }]
        }
    }
}

fn select_candidate(state: &mut AppState, url: String) -> Vec<Effect> {
    if matches!(state.pending_lookup(), Some(PendingLookup::Search { .. })) {
        engine_debug!("Selection of {} ignored while searching", url);
        return Vec::new();
    }
    if !state.has_candidate(&url) {
        engine_warn!("Selection of unknown candidate {} ignored", url);
        return Vec::new();
    }
    if state.detail_pending_for(&url) {
        engine_debug!("Detail for {} already in flight", url);
        return Vec::new();
    }

    let request_id = state.begin_detail(url.clone());
    vec![Effect::FetchDetail { request_id, url }]
}

fn failure_notification(state: &AppState, applied: bool) -> Vec<Effect> {
    if !applied {
        return Vec::new();
    }
    match state.error_message() {
        Some(message) if state.phase() == Phase::Error => vec![Effect::Notify {
            message: message.to_string(),
        }],
        _ => Vec::new(),
    }
}
