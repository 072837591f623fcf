//! Xplors core: pure upload orchestrator and view-model helpers.
mod artifact;
mod effect;
mod error;
mod msg;
pub mod progress;
mod state;
mod toast;
mod update;
mod validate;
mod view_model;

pub use artifact::{AnalysisKind, Artifact, MAX_ARTIFACT_BYTES, SPREADSHEET_MEDIA_TYPES};
pub use effect::{Effect, UploadRequest};
pub use error::ErrorKind;
pub use msg::Msg;
pub use progress::{ProgressDriver, ProgressFrame, StageSchedule, StageSpec};
pub use state::{AnalysisResult, AppState, Generation, Phase, QuotaStatus, Upload};
pub use toast::{Toast, ToastId, ToastLevel, TOAST_LIFETIME};
pub use update::update;
pub use validate::{validate, ValidationError};
pub use view_model::{
    format_cost, format_megabytes, format_with_commas, AppViewModel, ArtifactView, PhaseView,
    ResultView,
};
