use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use xplors_core::AnalysisKind;

use super::logging::LogDestination;

/// Upload a spreadsheet or a stand photo to the Xplors analysis service.
#[derive(Debug, Parser)]
#[command(name = "xplors", version)]
pub struct Cli {
    /// Spreadsheet (.xlsx, .xls, .csv) or image to analyse.
    pub file: Option<PathBuf>,

    /// Analysis flow; inferred from the file type when omitted.
    #[arg(long, value_enum)]
    pub kind: Option<KindArg>,

    /// Free-text context for merchandising photos.
    #[arg(long)]
    pub context: Option<String>,

    #[arg(long, env = "XPLORS_USER_ID")]
    pub user_id: Option<String>,

    #[arg(long, env = "XPLORS_USER_EMAIL")]
    pub user_email: Option<String>,

    /// Analysis service base URL (overrides API_BASE).
    #[arg(long)]
    pub api_base: Option<String>,

    #[arg(long, value_enum, default_value_t = LogArg::File)]
    pub log: LogArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Spreadsheet,
    Merchandising,
}

impl From<KindArg> for AnalysisKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Spreadsheet => AnalysisKind::Spreadsheet,
            KindArg::Merchandising => AnalysisKind::Merchandising,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogArg {
    File,
    Terminal,
    Both,
}

impl From<LogArg> for LogDestination {
    fn from(arg: LogArg) -> Self {
        match arg {
            LogArg::File => LogDestination::File,
            LogArg::Terminal => LogDestination::Terminal,
            LogArg::Both => LogDestination::Both,
        }
    }
}
