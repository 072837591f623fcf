use std::fs;
use std::path::Path;

use anyhow::Context;
use xplors_core::{AnalysisKind, Artifact};

const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// Reads a file into an artifact, guessing its media type from the extension.
pub fn load_artifact(path: &Path) -> anyhow::Result<Artifact> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let media_type = mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(FALLBACK_MEDIA_TYPE);
    Ok(Artifact::new(name, media_type, bytes))
}

/// Images go to merchandising, everything else to the spreadsheet flow.
pub fn infer_kind(artifact: &Artifact) -> AnalysisKind {
    if artifact.is_image() {
        AnalysisKind::Merchandising
    } else {
        AnalysisKind::Spreadsheet
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn guesses_media_types_from_extensions() {
        let dir = TempDir::new().unwrap();
        let cases = [
            ("sales.xlsx", "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
            ("old.xls", "application/vnd.ms-excel"),
            ("data.csv", "text/csv"),
            ("stand.jpg", "image/jpeg"),
            ("blob", FALLBACK_MEDIA_TYPE),
        ];
        for (name, expected) in cases {
            let path = dir.path().join(name);
            fs::write(&path, b"content").unwrap();
            let artifact = load_artifact(&path).unwrap();
            assert_eq!(artifact.name, name);
            assert_eq!(artifact.media_type, expected, "{name}");
            assert_eq!(artifact.byte_len(), 7);
        }
    }

    #[test]
    fn kind_follows_media_type() {
        assert_eq!(
            infer_kind(&Artifact::new("a.png", "image/png", Vec::new())),
            AnalysisKind::Merchandising
        );
        assert_eq!(
            infer_kind(&Artifact::new("a.csv", "text/csv", Vec::new())),
            AnalysisKind::Spreadsheet
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(load_artifact(&dir.path().join("nope.csv")).is_err());
    }
}
