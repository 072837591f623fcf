use std::fmt;

use bytes::Bytes;
use thiserror::Error;

/// Identifies one upload run. Ticks and results are tagged with it.
pub type Generation = u64;

/// Token for a one-shot delay requested through the engine.
pub type DelayToken = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisKind {
    Spreadsheet,
    Merchandising,
}

impl AnalysisKind {
    /// Path of the analysis endpoint, relative to `API_BASE`.
    pub fn endpoint_path(self) -> &'static str {
        match self {
            AnalysisKind::Spreadsheet => "upload",
            AnalysisKind::Merchandising => "upload-imagem",
        }
    }
}

/// A validated artifact handed to the engine, before the user is known.
#[derive(Clone, PartialEq, Eq)]
pub struct Submission {
    pub kind: AnalysisKind,
    pub file_name: String,
    pub media_type: String,
    pub bytes: Bytes,
    pub context: Option<String>,
}

impl fmt::Debug for Submission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Submission")
            .field("kind", &self.kind)
            .field("file_name", &self.file_name)
            .field("media_type", &self.media_type)
            .field("byte_len", &self.bytes.len())
            .field("context", &self.context)
            .finish()
    }
}

/// What goes over the wire: the submission plus the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub submission: Submission,
    pub user_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuotaTelemetry {
    pub alert: bool,
    pub percent: f64,
}

/// Interpreted success body of the analysis service.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalysisReport {
    pub cost_usd: Option<f64>,
    pub total_lines: Option<u64>,
    pub pdf_url: Option<String>,
    pub analysis_text: Option<String>,
    pub analysis_type: Option<String>,
    pub quota: Option<QuotaTelemetry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    QuotaExceeded,
    BadArtifact,
    Transient,
    SignedOut,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::QuotaExceeded => write!(f, "quota exceeded"),
            FailureKind::BadArtifact => write!(f, "bad artifact"),
            FailureKind::Transient => write!(f, "transient failure"),
            FailureKind::SignedOut => write!(f, "signed out"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct UploadError {
    pub kind: FailureKind,
    pub message: String,
}

impl UploadError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    UploadCompleted {
        generation: Generation,
        result: Result<AnalysisReport, UploadError>,
    },
    Tick { generation: Generation },
    DelayElapsed { token: DelayToken },
}
