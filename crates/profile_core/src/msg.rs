use crate::{Affiliation, CandidateSummary, CareerStage, LookupFailure, ProfileDetail, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Operator edited the name field.
    NameChanged(String),
    /// Operator picked an affiliation.
    AffiliationChanged(Affiliation),
    /// Operator picked a career stage.
    StageChanged(CareerStage),
    /// Operator submitted the search form.
    SearchSubmitted,
    /// Search lookup finished.
    SearchCompleted {
        request_id: RequestId,
        result: Result<Vec<CandidateSummary>, LookupFailure>,
    },
    /// Operator picked a candidate from the result list.
    CandidateSelected { url: String },
    /// Detail lookup finished for `url`.
    DetailCompleted {
        request_id: RequestId,
        url: String,
        result: Result<ProfileDetail, LookupFailure>,
    },
    /// Front end is up and ready to talk to the service.
    Started,
    /// Service health probe finished.
    HealthChecked { result: Result<(), LookupFailure> },
}
