use crate::{RequestId, SearchQuery};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SearchProfiles {
        request_id: RequestId,
        query: SearchQuery,
    },
    FetchDetail {
        request_id: RequestId,
        url: String,
    },
    /// Show a message the operator must acknowledge.
    Notify { message: String },
    CheckHealth,
}
