//! Xplors engine: analysis service client and effect execution.
mod config;
mod engine;
mod identity;
mod interpret;
mod types;
mod upload;

pub use config::{
    ApiSettings, ConfigError, ACCESS_TOKEN_ENV, API_BASE_ENV, CONNECT_TIMEOUT_ENV, DEFAULT_API_BASE,
};
pub use engine::{EngineError, EngineHandle};
pub use identity::{IdentityProvider, StaticIdentity, UserIdentity};
pub use interpret::{classify_status, error_message, interpret_success};
pub use types::{
    AnalysisKind, AnalysisReport, DelayToken, EngineEvent, FailureKind, Generation,
    QuotaTelemetry, Submission, UploadError, UploadRequest,
};
pub use upload::{ReqwestUploader, Uploader};
