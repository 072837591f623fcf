use std::time::Duration;

use crate::{AnalysisKind, Artifact, Generation, ToastId};

/// What the orchestrator asks the uploader to send. The user id is resolved
/// by whoever runs the effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub kind: AnalysisKind,
    pub artifact: Artifact,
    pub context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    StartUpload {
        generation: Generation,
        request: UploadRequest,
    },
    StartProgressTicker {
        generation: Generation,
        cadence: Duration,
    },
    StopProgressTicker { generation: Generation },
    ScheduleToastExpiry { id: ToastId, after: Duration },
}
