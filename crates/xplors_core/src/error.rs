use thiserror::Error;

use crate::{AnalysisKind, ValidationError};

/// Every failure the user can see. `Display` is the toast text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("Select a file first")]
    NoArtifact,
    #[error("{}", wrong_type_message(*expected))]
    WrongType { expected: AnalysisKind },
    #[error("File too large (max 10MB)")]
    TooLarge,
    #[error("Monthly limit reached! Check your costs.")]
    QuotaExceeded,
    #[error("Invalid or corrupt file")]
    BadArtifact,
    #[error("Could not reach the server. Try again.")]
    Transient,
    #[error("Session expired. Sign in again.")]
    SignedOut,
}

fn wrong_type_message(expected: AnalysisKind) -> &'static str {
    match expected {
        AnalysisKind::Spreadsheet => "Only Excel (.xlsx, .xls) or CSV files",
        AnalysisKind::Merchandising => "Only images are allowed",
    }
}

impl From<ValidationError> for ErrorKind {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::NoArtifact => ErrorKind::NoArtifact,
            ValidationError::NotImage => ErrorKind::WrongType {
                expected: AnalysisKind::Merchandising,
            },
            ValidationError::NotSpreadsheet => ErrorKind::WrongType {
                expected: AnalysisKind::Spreadsheet,
            },
            ValidationError::TooLarge => ErrorKind::TooLarge,
        }
    }
}
