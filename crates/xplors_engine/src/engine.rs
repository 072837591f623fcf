use std::collections::HashMap;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use thiserror::Error;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use xplors_logging::{xplors_trace, xplors_warn};

use crate::identity::IdentityProvider;
use crate::upload::{ReqwestUploader, Uploader};
use crate::{
    ApiSettings, DelayToken, EngineEvent, FailureKind, Generation, Submission, UploadError,
    UploadRequest,
};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

enum EngineCommand {
    Upload {
        generation: Generation,
        submission: Submission,
    },
    StartTicker {
        generation: Generation,
        cadence: Duration,
    },
    StopTicker { generation: Generation },
    Delay { token: DelayToken, after: Duration },
}

/// Runs uploads, progress tickers and delays on a background tokio runtime.
/// Results come back as [`EngineEvent`]s in the order they happen.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(
        settings: ApiSettings,
        identity: Arc<dyn IdentityProvider>,
    ) -> Result<Self, EngineError> {
        let uploader = Arc::new(ReqwestUploader::new(settings)?);
        Self::with_uploader(uploader, identity)
    }

    pub fn with_uploader(
        uploader: Arc<dyn Uploader>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            let mut tickers: HashMap<Generation, CancellationToken> = HashMap::new();
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Upload {
                        generation,
                        submission,
                    } => {
                        let uploader = uploader.clone();
                        let identity = identity.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            let result =
                                run_upload(uploader.as_ref(), identity.as_ref(), submission).await;
                            let _ = event_tx.send(EngineEvent::UploadCompleted { generation, result });
                        });
                    }
                    EngineCommand::StartTicker {
                        generation,
                        cadence,
                    } => {
                        let token = CancellationToken::new();
                        if let Some(previous) = tickers.insert(generation, token.clone()) {
                            previous.cancel();
                        }
                        xplors_trace!("ticker {} started every {:?}", generation, cadence);
                        runtime.spawn(run_ticker(generation, cadence, token, event_tx.clone()));
                    }
                    EngineCommand::StopTicker { generation } => {
                        if let Some(token) = tickers.remove(&generation) {
                            token.cancel();
                            xplors_trace!("ticker {} stopped", generation);
                        }
                    }
                    EngineCommand::Delay { token, after } => {
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            tokio::time::sleep(after).await;
                            let _ = event_tx.send(EngineEvent::DelayElapsed { token });
                        });
                    }
                }
            }
            for token in tickers.into_values() {
                token.cancel();
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn upload(&self, generation: Generation, submission: Submission) {
        self.send(EngineCommand::Upload {
            generation,
            submission,
        });
    }

    pub fn start_ticker(&self, generation: Generation, cadence: Duration) {
        self.send(EngineCommand::StartTicker {
            generation,
            cadence,
        });
    }

    pub fn stop_ticker(&self, generation: Generation) {
        self.send(EngineCommand::StopTicker { generation });
    }

    pub fn delay(&self, token: DelayToken, after: Duration) {
        self.send(EngineCommand::Delay { token, after });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks until the next event. `None` once the engine thread is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            xplors_warn!("engine thread is gone; command dropped");
        }
    }
}

async fn run_upload(
    uploader: &dyn Uploader,
    identity: &dyn IdentityProvider,
    submission: Submission,
) -> Result<crate::AnalysisReport, UploadError> {
    let Some(user) = identity.current_user().await else {
        return Err(UploadError::new(
            FailureKind::SignedOut,
            "no signed-in user",
        ));
    };
    let request = UploadRequest {
        submission,
        user_id: user.id,
    };
    uploader.upload(&request).await
}

async fn run_ticker(
    generation: Generation,
    cadence: Duration,
    token: CancellationToken,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let mut interval = interval_at(Instant::now() + cadence, cadence);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            _ = interval.tick() => {
                if event_tx.send(EngineEvent::Tick { generation }).is_err() {
                    break;
                }
            }
        }
    }
}
