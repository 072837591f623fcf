use std::fmt;

use bytes::Bytes;

/// Largest artifact the analysis service accepts (10 MiB).
pub const MAX_ARTIFACT_BYTES: u64 = 10 * 1024 * 1024;

/// Media types accepted for the spreadsheet flow.
pub const SPREADSHEET_MEDIA_TYPES: [&str; 3] = [
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "text/csv",
];

/// Which upload flow an artifact goes through. Selects endpoint and stage schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnalysisKind {
    #[default]
    Spreadsheet,
    Merchandising,
}

impl AnalysisKind {
    pub fn label(self) -> &'static str {
        match self {
            AnalysisKind::Spreadsheet => "spreadsheet",
            AnalysisKind::Merchandising => "merchandising",
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A user-selected file. The bytes are shared, so cloning is cheap.
#[derive(Clone, PartialEq, Eq)]
pub struct Artifact {
    pub name: String,
    pub media_type: String,
    pub bytes: Bytes,
}

impl Artifact {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn byte_len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }

    pub fn is_spreadsheet(&self) -> bool {
        SPREADSHEET_MEDIA_TYPES.contains(&self.media_type.as_str())
    }
}

// Bytes are elided so logs and test failures stay readable.
impl fmt::Debug for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Artifact")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("byte_len", &self.byte_len())
            .finish()
    }
}
