use thiserror::Error;

use crate::{AnalysisKind, Artifact, MAX_ARTIFACT_BYTES};

/// Why an artifact cannot be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no artifact selected")]
    NoArtifact,
    #[error("artifact is not an image")]
    NotImage,
    #[error("artifact is not a spreadsheet")]
    NotSpreadsheet,
    #[error("artifact exceeds {MAX_ARTIFACT_BYTES} bytes")]
    TooLarge,
}

/// Checks presence, media type and size. Pure; the type check runs before the size check.
pub fn validate(artifact: Option<&Artifact>, kind: AnalysisKind) -> Result<(), ValidationError> {
    let artifact = artifact.ok_or(ValidationError::NoArtifact)?;
    match kind {
        AnalysisKind::Merchandising if !artifact.is_image() => {
            return Err(ValidationError::NotImage);
        }
        AnalysisKind::Spreadsheet if !artifact.is_spreadsheet() => {
            return Err(ValidationError::NotSpreadsheet);
        }
        _ => {}
    }
    if artifact.byte_len() > MAX_ARTIFACT_BYTES {
        return Err(ValidationError::TooLarge);
    }
    Ok(())
}
