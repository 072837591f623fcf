use std::time::Duration;

use crate::progress::{ProgressDriver, ProgressFrame, StageSchedule};
use crate::toast::{Toast, ToastId, ToastLevel, ToastQueue};
use crate::{AnalysisKind, Artifact, ErrorKind};

/// Monotonic per-upload counter. Engine events carrying any other value are dropped.
pub type Generation = u64;

/// Usage warning attached by the analysis service to successful responses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuotaStatus {
    pub alert: bool,
    pub percent: f64,
}

/// A completed analysis. Fields are whatever the service reported.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalysisResult {
    pub cost_usd: Option<f64>,
    pub total_lines: Option<u64>,
    pub pdf_url: Option<String>,
    pub analysis_text: Option<String>,
    pub analysis_type: Option<String>,
    pub quota: Option<QuotaStatus>,
}

impl AnalysisResult {
    pub fn quota_alert(&self) -> Option<f64> {
        self.quota
            .filter(|quota| quota.alert)
            .map(|quota| quota.percent)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub(crate) generation: Generation,
    pub(crate) kind: AnalysisKind,
    pub(crate) driver: ProgressDriver,
    /// Successful result waiting for the driver to reach 100.
    pub(crate) outcome: Option<AnalysisResult>,
}

impl Upload {
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn kind(&self) -> AnalysisKind {
        self.kind
    }

    pub fn frame(&self) -> ProgressFrame {
        self.driver.frame()
    }

    pub fn has_response(&self) -> bool {
        self.outcome.is_some()
    }
}

/// `Failed` is idle with the artifact still selected plus the last error.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Uploading(Upload),
    Result(AnalysisResult),
    Failed(ErrorKind),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    kind: AnalysisKind,
    artifact: Option<Artifact>,
    context: String,
    phase: Phase,
    generation: Generation,
    toasts: ToastQueue,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kind(kind: AnalysisKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn kind(&self) -> AnalysisKind {
        self.kind
    }

    pub fn artifact(&self) -> Option<&Artifact> {
        self.artifact.as_ref()
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_uploading(&self) -> bool {
        matches!(self.phase, Phase::Uploading(_))
    }

    /// Generation of the upload in flight, if any.
    pub fn active_generation(&self) -> Option<Generation> {
        match &self.phase {
            Phase::Uploading(upload) => Some(upload.generation),
            _ => None,
        }
    }

    pub fn toasts(&self) -> &[Toast] {
        self.toasts.as_slice()
    }

    /// Returns whether anything visible changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_kind(&mut self, kind: AnalysisKind) {
        self.kind = kind;
    }

    pub(crate) fn set_artifact(&mut self, artifact: Artifact) {
        self.artifact = Some(artifact);
    }

    pub(crate) fn set_context(&mut self, context: String) {
        self.context = context;
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(crate) fn upload_mut(&mut self, generation: Generation) -> Option<&mut Upload> {
        match &mut self.phase {
            Phase::Uploading(upload) if upload.generation == generation => Some(upload),
            _ => None,
        }
    }

    /// Enters `Uploading` under a fresh generation; returns it with the tick cadence.
    pub(crate) fn begin_upload(&mut self) -> (Generation, Duration) {
        self.generation += 1;
        let schedule = StageSchedule::for_kind(self.kind);
        let cadence = schedule.cadence();
        self.phase = Phase::Uploading(Upload {
            generation: self.generation,
            kind: self.kind,
            driver: ProgressDriver::new(schedule),
            outcome: None,
        });
        (self.generation, cadence)
    }

    /// Moves a finished upload into `Result`, dropping the artifact.
    pub(crate) fn complete_upload(&mut self, result: AnalysisResult) {
        self.artifact = None;
        self.phase = Phase::Result(result);
    }

    /// Back to a blank idle form. Returns whether anything changed.
    pub(crate) fn clear(&mut self) -> bool {
        let changed = self.artifact.is_some()
            || !self.context.is_empty()
            || self.phase != Phase::Idle;
        self.artifact = None;
        self.context.clear();
        self.phase = Phase::Idle;
        changed
    }

    pub(crate) fn push_toast(&mut self, level: ToastLevel, message: impl Into<String>) -> ToastId {
        self.toasts.push(level, message)
    }

    pub(crate) fn remove_toast(&mut self, id: ToastId) -> bool {
        self.toasts.remove(id)
    }
}
