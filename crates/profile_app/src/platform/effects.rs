use std::sync::mpsc;
use std::thread;

use engine_logging::{engine_debug, engine_info, engine_warn};
use profile_core::{
    CandidateSummary, Effect, LookupFailure, LookupFailureKind, Msg, ProfileDetail, SearchQuery,
};
use profile_engine::{
    EngineCommands, EngineEvent, EngineEvents, EngineHandle, FailureKind, FetchError,
    SearchParams,
};

use super::notifier::Notifier;

/// Events feeding the cooperative event loop.
pub enum LoopEvent {
    Msg(Msg),
    Line(String),
    InputClosed,
}

pub struct EffectRunner {
    engine: EngineCommands,
    notifier: Box<dyn Notifier>,
}

impl EffectRunner {
    pub fn new(
        engine: EngineHandle,
        notifier: Box<dyn Notifier>,
        loop_tx: mpsc::Sender<LoopEvent>,
    ) -> Self {
        let (commands, events) = engine.split();
        spawn_event_pump(events, loop_tx);
        Self {
            engine: commands,
            notifier,
        }
    }

    pub fn enqueue(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SearchProfiles { request_id, query } => {
                    engine_info!(
                        "SearchProfiles request_id={} affiliation={} stage={}",
                        request_id,
                        query.affiliation,
                        query.stage
                    );
                    self.engine.search(request_id, to_search_params(&query));
                }
                Effect::FetchDetail { request_id, url } => {
                    engine_info!("FetchDetail request_id={} url={}", request_id, url);
                    self.engine.fetch_detail(request_id, url);
                }
                Effect::Notify { message } => {
                    engine_debug!("Notify: {}", message);
                    self.notifier.notify(&message);
                }
                Effect::CheckHealth => self.engine.check_health(),
            }
        }
    }

    pub fn notification_pending(&self) -> bool {
        self.notifier.is_blocking()
    }

    pub fn acknowledge_notification(&mut self) {
        self.notifier.acknowledge();
    }

}

/// Forwards engine completions into the event loop until either side closes.
fn spawn_event_pump(events: EngineEvents, loop_tx: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || {
        while let Some(event) = events.recv() {
            if loop_tx.send(LoopEvent::Msg(map_event(event))).is_err() {
                break;
            }
        }
        engine_debug!("Engine event pump stopped");
    });
}

fn to_search_params(query: &SearchQuery) -> SearchParams {
    SearchParams {
        name: query.name.clone(),
        university: query.affiliation.wire_value().to_string(),
        degree_status: query.stage.wire_value().to_string(),
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::SearchCompleted { request_id, result } => Msg::SearchCompleted {
            request_id,
            result: result
                .map(|records| {
                    records
                        .into_iter()
                        .map(|record| CandidateSummary {
                            url: record.url,
                            title: record.title,
                        })
                        .collect()
                })
                .map_err(map_failure),
        },
        EngineEvent::DetailCompleted {
            request_id,
            url,
            result,
        } => Msg::DetailCompleted {
            request_id,
            url,
            result: result
                .map(|record| ProfileDetail {
                    summary: record.summary,
                    links: record.links,
                })
                .map_err(map_failure),
        },
        EngineEvent::HealthChecked { result } => Msg::HealthChecked {
            result: result.map_err(map_failure),
        },
    }
}

fn map_failure(err: FetchError) -> LookupFailure {
    engine_warn!("Lookup failed: {}", err);
    let kind = match err.kind {
        FailureKind::HttpStatus(code) => LookupFailureKind::HttpStatus(code),
        FailureKind::Timeout => LookupFailureKind::Timeout,
        FailureKind::Network => LookupFailureKind::Network,
        FailureKind::MalformedResponse | FailureKind::TooLarge { .. } => {
            LookupFailureKind::MalformedResponse
        }
        FailureKind::InvalidUrl | FailureKind::InvalidRequest => {
            LookupFailureKind::InvalidServiceUrl
        }
    };
    LookupFailure::new(kind, err.message)
}
