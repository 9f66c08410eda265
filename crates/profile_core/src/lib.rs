//! Profile search core: pure interaction state machine and view-model helpers.
mod effect;
mod msg;
mod query;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use query::{Affiliation, CareerStage, SearchInputs, SearchQuery, ValidationError};
pub use state::{
    AppState, CandidateSummary, LookupFailure, LookupFailureKind, Phase, ProfileDetail,
    RequestId, ServiceStatus, MAX_CANDIDATES,
};
pub use update::update;
pub use view_model::{
    AppViewModel, CandidateRowView, DetailPanel, SEARCH_LABEL_BUSY, SEARCH_LABEL_IDLE,
};
