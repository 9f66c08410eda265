use std::fmt;

use engine_logging::{engine_debug, engine_info, engine_warn};

use crate::query::{Affiliation, CareerStage, SearchInputs};
use crate::view_model::{self, AppViewModel};

pub type RequestId = u64;

/// Hard cap on the number of candidates kept from a search response.
pub const MAX_CANDIDATES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Searching,
    ResultsReady,
    FetchingDetail,
    DetailReady,
    Error,
}

/// One search hit, identified by its profile url.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSummary {
    pub url: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDetail {
    pub summary: String,
    pub links: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupFailureKind {
    HttpStatus(u16),
    Timeout,
    Network,
    MalformedResponse,
    InvalidServiceUrl,
}

/// A failed remote lookup as seen by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupFailure {
    pub kind: LookupFailureKind,
    pub message: String,
}

impl LookupFailure {
    pub fn new(kind: LookupFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for LookupFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LookupFailureKind::HttpStatus(code) => write!(f, "HTTP error! status: {code}"),
            LookupFailureKind::Timeout => write!(f, "request timed out"),
            LookupFailureKind::Network => write!(f, "network error: {}", self.message),
            LookupFailureKind::MalformedResponse => {
                write!(f, "malformed response: {}", self.message)
            }
            LookupFailureKind::InvalidServiceUrl => {
                write!(f, "invalid service url: {}", self.message)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ServiceStatus {
    #[default]
    Unknown,
    Available,
    Unavailable(String),
}

/// The lookup currently awaiting a completion message, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingLookup {
    Search { request_id: RequestId },
    Detail { request_id: RequestId, url: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    inputs: SearchInputs,
    candidates: Vec<CandidateSummary>,
    selected_detail: Option<ProfileDetail>,
    phase: Phase,
    last_selected_url: Option<String>,
    error_message: Option<String>,
    validation_message: Option<String>,
    service_status: ServiceStatus,
    pending: Option<PendingLookup>,
    last_request_id: RequestId,
    stale_discarded: u64,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        view_model::build(self)
    }

    pub fn inputs(&self) -> &SearchInputs {
        &self.inputs
    }

    pub fn candidates(&self) -> &[CandidateSummary] {
        &self.candidates
    }

    pub fn selected_detail(&self) -> Option<&ProfileDetail> {
        self.selected_detail.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn last_selected_url(&self) -> Option<&str> {
        self.last_selected_url.as_deref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn validation_message(&self) -> Option<&str> {
        self.validation_message.as_deref()
    }

    pub fn service_status(&self) -> &ServiceStatus {
        &self.service_status
    }

    /// Number of completions dropped because a newer lookup superseded them.
    pub fn stale_discarded(&self) -> u64 {
        self.stale_discarded
    }

    pub fn is_lookup_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn pending_lookup(&self) -> Option<&PendingLookup> {
        self.pending.as_ref()
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_name(&mut self, name: String) {
        if self.inputs.name != name {
            self.inputs.name = name;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_affiliation(&mut self, affiliation: Affiliation) {
        if self.inputs.affiliation != affiliation {
            self.inputs.affiliation = affiliation;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_stage(&mut self, stage: CareerStage) {
        if self.inputs.stage != stage {
            self.inputs.stage = stage;
            self.mark_dirty();
        }
    }

    pub(crate) fn reject_submission(&mut self, message: String) {
        self.validation_message = Some(message);
        self.mark_dirty();
    }

    fn next_request_id(&mut self) -> RequestId {
        self.last_request_id += 1;
        self.last_request_id
    }

    /// Enters `Searching`, dropping previous results and any drilled-down detail.
    pub(crate) fn begin_search(&mut self) -> RequestId {
        let request_id = self.next_request_id();
        self.candidates.clear();
        self.selected_detail = None;
        self.last_selected_url = None;
        self.error_message = None;
        self.validation_message = None;
        self.phase = Phase::Searching;
        self.pending = Some(PendingLookup::Search { request_id });
        self.mark_dirty();
        engine_info!("Search started request_id={}", request_id);
        request_id
    }

    /// Applies a search completion. Returns `false` when the completion does
    /// not belong to the pending search and was discarded.
    pub(crate) fn apply_search_result(
        &mut self,
        request_id: RequestId,
        result: Result<Vec<CandidateSummary>, LookupFailure>,
    ) -> bool {
        if self.pending != Some(PendingLookup::Search { request_id }) {
            self.discard_stale("search", request_id);
            return false;
        }
        self.pending = None;
        match result {
            Ok(mut candidates) => {
                let received = candidates.len();
                candidates.truncate(MAX_CANDIDATES);
                engine_info!(
                    "Search completed request_id={} received={} kept={}",
                    request_id,
                    received,
                    candidates.len()
                );
                self.candidates = candidates;
                self.phase = Phase::ResultsReady;
            }
            Err(failure) => {
                engine_warn!("Search failed request_id={}: {}", request_id, failure);
                self.candidates.clear();
                self.error_message = Some(format!("Search error: {failure}"));
                self.phase = Phase::Error;
            }
        }
        self.mark_dirty();
        true
    }

    pub(crate) fn has_candidate(&self, url: &str) -> bool {
        self.candidates.iter().any(|candidate| candidate.url == url)
    }

    pub(crate) fn detail_pending_for(&self, url: &str) -> bool {
        matches!(&self.pending, Some(PendingLookup::Detail { url: pending, .. }) if pending == url)
    }

    /// Enters `FetchingDetail` for `url`. Any previous detail is dropped so
    /// the panel shows a loading indicator instead of stale data.
    pub(crate) fn begin_detail(&mut self, url: String) -> RequestId {
        let request_id = self.next_request_id();
        if let Some(PendingLookup::Detail {
            request_id: superseded,
            url: previous,
        }) = &self.pending
        {
            engine_debug!(
                "Detail request_id={} for {} superseded by request_id={}",
                superseded,
                previous,
                request_id
            );
        }
        self.selected_detail = None;
        self.error_message = None;
        self.validation_message = None;
        self.last_selected_url = Some(url.clone());
        self.phase = Phase::FetchingDetail;
        self.pending = Some(PendingLookup::Detail {
            request_id,
            url: url.clone(),
        });
        self.mark_dirty();
        engine_info!("Detail started request_id={} url={}", request_id, url);
        request_id
    }

    /// Applies a detail completion if it matches both the pending request and
    /// the currently selected url. Returns `false` when discarded.
    pub(crate) fn apply_detail_result(
        &mut self,
        request_id: RequestId,
        url: &str,
        result: Result<ProfileDetail, LookupFailure>,
    ) -> bool {
        let expected = PendingLookup::Detail {
            request_id,
            url: url.to_string(),
        };
        if self.pending.as_ref() != Some(&expected)
            || self.last_selected_url.as_deref() != Some(url)
        {
            self.discard_stale("detail", request_id);
            return false;
        }
        self.pending = None;
        match result {
            Ok(detail) => {
                engine_info!(
                    "Detail completed request_id={} links={}",
                    request_id,
                    detail.links.len()
                );
                self.selected_detail = Some(detail);
                self.phase = Phase::DetailReady;
            }
            Err(failure) => {
                engine_warn!("Detail failed request_id={}: {}", request_id, failure);
                self.selected_detail = None;
                self.error_message = Some(format!("Profile details error: {failure}"));
                self.phase = Phase::Error;
            }
        }
        self.mark_dirty();
        true
    }

    pub(crate) fn set_service_status(&mut self, status: ServiceStatus) {
        if self.service_status != status {
            self.service_status = status;
            self.mark_dirty();
        }
    }

    fn discard_stale(&mut self, lookup: &str, request_id: RequestId) {
        self.stale_discarded += 1;
        engine_debug!(
            "Discarded stale {} completion request_id={} (pending={:?})",
            lookup,
            request_id,
            self.pending
        );
    }
}
