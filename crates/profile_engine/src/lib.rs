//! Profile engine: remote lookups against the profile service.
mod client;
mod engine;
mod types;
mod wire;

pub use client::{ProfileService, ReqwestProfileService, ServiceSettings};
pub use engine::{EngineCommands, EngineError, EngineEvents, EngineHandle};
pub use types::{EngineEvent, FailureKind, FetchError, RequestId};
pub use wire::{CandidateRecord, ProfileRecord, SearchParams};
