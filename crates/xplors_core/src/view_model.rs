use url::Url;

use crate::progress::ProgressFrame;
use crate::toast::Toast;
use crate::{AnalysisKind, AnalysisResult, AppState, Artifact, ErrorKind, Phase};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhaseView {
    #[default]
    Idle,
    Uploading,
    Result,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactView {
    pub name: String,
    pub media_type: String,
    pub size_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub cost_label: String,
    pub lines_label: Option<String>,
    /// Only set when the service returned an http(s) URL.
    pub pdf_link: Option<String>,
    pub analysis_text: Option<String>,
    pub analysis_type: Option<String>,
    pub quota_banner: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub kind: AnalysisKind,
    pub phase: PhaseView,
    pub artifact: Option<ArtifactView>,
    pub context: String,
    pub progress: Option<ProgressFrame>,
    pub result: Option<ResultView>,
    pub error: Option<ErrorKind>,
    pub toasts: Vec<Toast>,
    pub can_submit: bool,
    pub can_select: bool,
}

impl AppState {
    pub fn view(&self) -> AppViewModel {
        let (phase, progress, result, error) = match self.phase() {
            Phase::Idle => (PhaseView::Idle, None, None, None),
            Phase::Uploading(upload) => (PhaseView::Uploading, Some(upload.frame()), None, None),
            Phase::Result(result) => (PhaseView::Result, None, Some(result_view(result)), None),
            Phase::Failed(error) => (PhaseView::Failed, None, None, Some(*error)),
        };
        let uploading = phase == PhaseView::Uploading;

        AppViewModel {
            kind: self.kind(),
            phase,
            artifact: self.artifact().map(artifact_view),
            context: self.context().to_string(),
            progress,
            result,
            error,
            toasts: self.toasts().to_vec(),
            can_submit: !uploading && self.artifact().is_some(),
            can_select: !uploading,
        }
    }
}

fn artifact_view(artifact: &Artifact) -> ArtifactView {
    ArtifactView {
        name: artifact.name.clone(),
        media_type: artifact.media_type.clone(),
        size_label: format_megabytes(artifact.byte_len()),
    }
}

fn result_view(result: &AnalysisResult) -> ResultView {
    ResultView {
        cost_label: format_cost(result.cost_usd),
        lines_label: result.total_lines.map(format_with_commas),
        pdf_link: result.pdf_url.as_deref().filter(|url| is_web_link(url)).map(ToOwned::to_owned),
        analysis_text: result.analysis_text.clone(),
        analysis_type: result.analysis_type.clone(),
        quota_banner: result
            .quota_alert()
            .map(|percent| format!("You are at {percent:.1}% of your monthly limit")),
    }
}

fn is_web_link(raw: &str) -> bool {
    Url::parse(raw)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

pub fn format_cost(cost_usd: Option<f64>) -> String {
    format!("${:.4}", cost_usd.unwrap_or(0.0))
}

pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

pub fn format_with_commas(value: u64) -> String {
    let mut out = String::new();
    for (i, ch) in value.to_string().chars().rev().enumerate() {
        if i != 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}
