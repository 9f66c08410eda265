use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_debug, engine_info};

use crate::client::{ProfileService, ReqwestProfileService, ServiceSettings};
use crate::wire::SearchParams;
use crate::{EngineEvent, FetchError, RequestId};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start lookup runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build http client: {0}")]
    Client(#[from] FetchError),
}

enum EngineCommand {
    Search {
        request_id: RequestId,
        params: SearchParams,
    },
    Detail {
        request_id: RequestId,
        url: String,
    },
    Health,
}

/// Runs lookups on a background tokio runtime and reports each completion as
/// an `EngineEvent`. Lookups are never cancelled; callers decide whether a
/// late completion still matters.
pub struct EngineHandle {
    commands: EngineCommands,
    events: EngineEvents,
}

/// Cloneable sending side of an engine.
#[derive(Clone)]
pub struct EngineCommands {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

/// Single-owner receiving side of an engine.
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ServiceSettings) -> Result<Self, EngineError> {
        engine_info!("Profile service at {}", settings.base_url);
        let service = ReqwestProfileService::new(settings)?;
        Self::with_service(Arc::new(service))
    }

    pub fn with_service(service: Arc<dyn ProfileService>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("profile-lookup")
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("profile-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let service = service.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        let event = handle_command(service.as_ref(), command).await;
                        let _ = event_tx.send(event);
                    });
                }
                engine_debug!("Engine command channel closed");
            })?;

        Ok(Self {
            commands: EngineCommands { cmd_tx },
            events: EngineEvents { event_rx },
        })
    }

    /// Separates the command side from the event side so they can live on
    /// different threads.
    pub fn split(self) -> (EngineCommands, EngineEvents) {
        (self.commands, self.events)
    }

    pub fn search(&self, request_id: RequestId, params: SearchParams) {
        self.commands.search(request_id, params);
    }

    pub fn fetch_detail(&self, request_id: RequestId, url: impl Into<String>) {
        self.commands.fetch_detail(request_id, url);
    }

    pub fn check_health(&self) {
        self.commands.check_health();
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.events.try_recv()
    }

    pub fn recv(&self) -> Option<EngineEvent> {
        self.events.recv()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.events.recv_timeout(timeout)
    }
}

impl EngineCommands {
    pub fn search(&self, request_id: RequestId, params: SearchParams) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::Search { request_id, params });
    }

    pub fn fetch_detail(&self, request_id: RequestId, url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Detail {
            request_id,
            url: url.into(),
        });
    }

    pub fn check_health(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Health);
    }
}

impl EngineEvents {
    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks until the next event, or `None` once the engine is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(service: &dyn ProfileService, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::Search { request_id, params } => {
            engine_debug!("Search request_id={} name_len={}", request_id, params.name.len());
            let result = service.search(&params).await;
            EngineEvent::SearchCompleted { request_id, result }
        }
        EngineCommand::Detail { request_id, url } => {
            engine_debug!("Detail request_id={} url={}", request_id, url);
            let result = service.profile_details(&url).await;
            EngineEvent::DetailCompleted {
                request_id,
                url,
                result,
            }
        }
        EngineCommand::Health => EngineEvent::HealthChecked {
            result: service.health().await,
        },
    }
}
