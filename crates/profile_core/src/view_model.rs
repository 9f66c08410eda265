use crate::{Affiliation, AppState, CareerStage, Phase, ServiceStatus};

pub const SEARCH_LABEL_IDLE: &str = "Search LinkedIn";
pub const SEARCH_LABEL_BUSY: &str = "Searching...";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub phase: Phase,
    pub name: String,
    pub affiliation: Affiliation,
    pub stage: CareerStage,
    pub search_enabled: bool,
    pub search_label: &'static str,
    pub candidates: Vec<CandidateRowView>,
    pub selection_enabled: bool,
    pub detail: DetailPanel,
    pub error_message: Option<String>,
    pub validation_message: Option<String>,
    pub service_status: ServiceStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRowView {
    /// 1-based position as shown to the operator.
    pub index: usize,
    pub url: String,
    pub title: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetailPanel {
    #[default]
    Hidden,
    Loading {
        url: String,
    },
    Ready {
        url: String,
        summary: String,
        links: Vec<String>,
    },
}

pub(crate) fn build(state: &AppState) -> AppViewModel {
    let phase = state.phase();
    let searching = phase == Phase::Searching;
    let fetching_detail = phase == Phase::FetchingDetail;
    let selected_url = state.last_selected_url();

    let candidates = state
        .candidates()
        .iter()
        .enumerate()
        .map(|(i, candidate)| CandidateRowView {
            index: i + 1,
            url: candidate.url.clone(),
            title: candidate.title.clone(),
            selected: selected_url == Some(candidate.url.as_str()),
        })
        .collect();

    let detail = match (phase, state.selected_detail(), selected_url) {
        (Phase::DetailReady, Some(detail), Some(url)) => DetailPanel::Ready {
            url: url.to_string(),
            summary: detail.summary.clone(),
            links: detail.links.clone(),
        },
        (Phase::FetchingDetail, _, Some(url)) => DetailPanel::Loading {
            url: url.to_string(),
        },
        _ => DetailPanel::Hidden,
    };

    let inputs = state.inputs();
    AppViewModel {
        phase,
        name: inputs.name.clone(),
        affiliation: inputs.affiliation,
        stage: inputs.stage,
        search_enabled: !state.is_lookup_pending(),
        search_label: if searching {
            SEARCH_LABEL_BUSY
        } else {
            SEARCH_LABEL_IDLE
        },
        candidates,
        selection_enabled: !searching && !fetching_detail,
        detail,
        error_message: if phase == Phase::Error {
            state.error_message().map(ToOwned::to_owned)
        } else {
            None
        },
        validation_message: state.validation_message().map(ToOwned::to_owned),
        service_status: state.service_status().clone(),
    }
}
