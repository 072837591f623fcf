use crate::{AnalysisKind, AnalysisResult, Artifact, ErrorKind, Generation, ToastId};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User switched between the spreadsheet and merchandising flows.
    KindSelected(AnalysisKind),
    /// User picked a file.
    ArtifactSelected(Artifact),
    /// User edited the free-text context box.
    ContextChanged(String),
    /// User pressed the analyse button.
    SubmitClicked,
    /// User cleared the form or started a new analysis.
    ResetClicked,
    /// Timer tick for the progress driver of one upload.
    ProgressTick { generation: Generation },
    /// The uploader resolved.
    UploadFinished {
        generation: Generation,
        result: Result<AnalysisResult, ErrorKind>,
    },
    /// A toast outlived its display time.
    ToastExpired(ToastId),
    /// User closed a toast.
    ToastDismissed(ToastId),
    NoOp,
}
