use std::collections::HashSet;

use indicatif::{ProgressBar, ProgressStyle};
use xplors_core::{AppViewModel, PhaseView, ResultView, Toast, ToastId, ToastLevel};

/// Draws view models to the terminal. Holds only presentation state.
pub struct TerminalRenderer {
    bar: Option<ProgressBar>,
    shown_toasts: HashSet<ToastId>,
    printed_result: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            bar: None,
            shown_toasts: HashSet::new(),
            printed_result: false,
        }
    }

    pub fn render(&mut self, view: &AppViewModel) {
        match (&view.progress, view.phase) {
            (Some(frame), PhaseView::Uploading) => {
                let bar = self.bar.get_or_insert_with(new_bar);
                bar.set_position(u64::from(frame.percent));
                bar.set_message(frame.stage_label);
            }
            _ => {
                if let Some(bar) = self.bar.take() {
                    bar.finish_and_clear();
                }
            }
        }

        for toast in &view.toasts {
            if self.shown_toasts.insert(toast.id) {
                self.println(&toast_line(toast));
            }
        }

        if let Some(result) = &view.result {
            if !self.printed_result {
                self.printed_result = true;
                for line in result_lines(result) {
                    self.println(&line);
                }
            }
        } else {
            self.printed_result = false;
        }
    }

    fn println(&self, line: &str) {
        match &self.bar {
            Some(bar) => bar.println(line),
            None => println!("{line}"),
        }
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn new_bar() -> ProgressBar {
    let bar = ProgressBar::new(100);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{bar:40.cyan/blue} {pos:>3}% {msg}")
    {
        bar.set_style(style.progress_chars("█▓▒░  "));
    }
    bar
}

pub fn toast_line(toast: &Toast) -> String {
    let tag = match toast.level {
        ToastLevel::Success => "OK",
        ToastLevel::Error => "ERR",
        ToastLevel::Info => "INFO",
        ToastLevel::Warning => "WARN",
    };
    format!("[{tag}] {}", toast.message)
}

pub fn status_line(view: &AppViewModel) -> String {
    let artifact = match &view.artifact {
        Some(artifact) => format!("{} ({})", artifact.name, artifact.size_label),
        None => "no file".to_string(),
    };
    let phase = match view.phase {
        PhaseView::Idle => "Idle",
        PhaseView::Uploading => "Uploading",
        PhaseView::Result => "Done",
        PhaseView::Failed => "Failed",
    };
    match view.error {
        Some(error) => format!("{} | {} | {} | {}", view.kind, artifact, phase, error),
        None => format!("{} | {} | {}", view.kind, artifact, phase),
    }
}

pub fn result_lines(result: &ResultView) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(banner) = &result.quota_banner {
        lines.push(format!("! {banner}"));
    }
    lines.push(format!("Cost: {}", result.cost_label));
    if let Some(total) = &result.lines_label {
        lines.push(format!("Rows analyzed: {total}"));
    }
    if let Some(kind) = &result.analysis_type {
        lines.push(format!("Analysis type: {kind}"));
    }
    if let Some(link) = &result.pdf_link {
        lines.push(format!("Report: {link}"));
    }
    if let Some(text) = &result.analysis_text {
        lines.push(String::new());
        lines.extend(text.lines().map(str::to_owned));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use xplors_core::{AnalysisKind, ArtifactView, ErrorKind};

    fn spreadsheet_result() -> ResultView {
        ResultView {
            cost_label: "$0.0123".to_string(),
            lines_label: Some("1,234".to_string()),
            pdf_link: Some("https://cdn.example.com/r.pdf".to_string()),
            analysis_text: None,
            analysis_type: None,
            quota_banner: None,
        }
    }

    #[test]
    fn spreadsheet_result_lists_cost_rows_and_report() {
        assert_eq!(
            result_lines(&spreadsheet_result()),
            vec![
                "Cost: $0.0123".to_string(),
                "Rows analyzed: 1,234".to_string(),
                "Report: https://cdn.example.com/r.pdf".to_string(),
            ]
        );
    }

    #[test]
    fn quota_banner_comes_first() {
        let result = ResultView {
            quota_banner: Some("You are at 87.4% of your monthly limit".to_string()),
            ..spreadsheet_result()
        };
        assert_eq!(
            result_lines(&result)[0],
            "! You are at 87.4% of your monthly limit"
        );
    }

    #[test]
    fn analysis_text_is_printed_line_by_line() {
        let result = ResultView {
            cost_label: "$0.0040".to_string(),
            lines_label: None,
            pdf_link: None,
            analysis_text: Some("Shelf is full.\nPrices visible.".to_string()),
            analysis_type: Some("merchandising".to_string()),
            quota_banner: None,
        };
        assert_eq!(
            result_lines(&result),
            vec![
                "Cost: $0.0040".to_string(),
                "Analysis type: merchandising".to_string(),
                String::new(),
                "Shelf is full.".to_string(),
                "Prices visible.".to_string(),
            ]
        );
    }

    #[test]
    fn toast_line_tags_level() {
        let toast = Toast {
            id: 1,
            level: ToastLevel::Error,
            message: "Select a file first".to_string(),
        };
        assert_eq!(toast_line(&toast), "[ERR] Select a file first");
    }

    #[test]
    fn status_line_includes_error() {
        let view = AppViewModel {
            kind: AnalysisKind::Spreadsheet,
            phase: PhaseView::Failed,
            artifact: Some(ArtifactView {
                name: "sales.xlsx".to_string(),
                media_type: "text/csv".to_string(),
                size_label: "2.00 MB".to_string(),
            }),
            error: Some(ErrorKind::QuotaExceeded),
            ..AppViewModel::default()
        };
        assert_eq!(
            status_line(&view),
            format!(
                "{} | sales.xlsx (2.00 MB) | Failed | {}",
                AnalysisKind::Spreadsheet,
                ErrorKind::QuotaExceeded
            )
        );
    }
}
