use xplors_core::{AnalysisKind, AnalysisResult, Effect, ErrorKind, Msg, QuotaStatus, UploadRequest};
use xplors_engine::{AnalysisReport, EngineEvent, EngineHandle, FailureKind, Submission};
use xplors_logging::{xplors_info, xplors_trace, xplors_warn};

/// Turns core effects into engine commands and engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartUpload {
                    generation,
                    request,
                } => {
                    xplors_info!(
                        "StartUpload generation={} kind={} name={} bytes={} context={}",
                        generation,
                        request.kind,
                        request.artifact.name,
                        request.artifact.byte_len(),
                        request.context.is_some()
                    );
                    self.engine.upload(generation, to_submission(request));
                }
                Effect::StartProgressTicker {
                    generation,
                    cadence,
                } => self.engine.start_ticker(generation, cadence),
                Effect::StopProgressTicker { generation } => self.engine.stop_ticker(generation),
                Effect::ScheduleToastExpiry { id, after } => {
                    xplors_trace!("toast {} expires in {:?}", id, after);
                    self.engine.delay(id, after);
                }
            }
        }
    }

    /// Blocks for the next engine event, already translated. `None` if the engine died.
    pub fn next_msg(&self) -> Option<Msg> {
        self.engine.recv().map(to_msg)
    }
}

pub fn to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Tick { generation } => Msg::ProgressTick { generation },
        EngineEvent::UploadCompleted { generation, result } => Msg::UploadFinished {
            generation,
            result: match result {
                Ok(report) => Ok(to_result(report)),
                Err(err) => {
                    xplors_warn!("Upload {} failed: {}", generation, err);
                    Err(map_failure(err.kind))
                }
            },
        },
        EngineEvent::DelayElapsed { token } => Msg::ToastExpired(token),
    }
}

fn to_submission(request: UploadRequest) -> Submission {
    Submission {
        kind: map_kind(request.kind),
        file_name: request.artifact.name,
        media_type: request.artifact.media_type,
        bytes: request.artifact.bytes,
        context: request.context,
    }
}

fn to_result(report: AnalysisReport) -> AnalysisResult {
    AnalysisResult {
        cost_usd: report.cost_usd,
        total_lines: report.total_lines,
        pdf_url: report.pdf_url,
        analysis_text: report.analysis_text,
        analysis_type: report.analysis_type,
        quota: report.quota.map(|quota| QuotaStatus {
            alert: quota.alert,
            percent: quota.percent,
        }),
    }
}

fn map_kind(kind: AnalysisKind) -> xplors_engine::AnalysisKind {
    match kind {
        AnalysisKind::Spreadsheet => xplors_engine::AnalysisKind::Spreadsheet,
        AnalysisKind::Merchandising => xplors_engine::AnalysisKind::Merchandising,
    }
}

fn map_failure(kind: FailureKind) -> ErrorKind {
    match kind {
        FailureKind::QuotaExceeded => ErrorKind::QuotaExceeded,
        FailureKind::BadArtifact => ErrorKind::BadArtifact,
        FailureKind::Transient => ErrorKind::Transient,
        FailureKind::SignedOut => ErrorKind::SignedOut,
    }
}
