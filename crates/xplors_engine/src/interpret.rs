//! Maps analysis service responses onto reports and failure kinds.
use serde::Deserialize;

use crate::{AnalysisKind, AnalysisReport, FailureKind, QuotaTelemetry, UploadError};

#[derive(Debug, Deserialize)]
struct WireResponse {
    success: bool,
    #[serde(rename = "custo_usd", default)]
    cost_usd: Option<f64>,
    #[serde(rename = "total_linhas", default)]
    total_lines: Option<u64>,
    #[serde(default)]
    pdf_url: Option<String>,
    #[serde(rename = "analise", default)]
    analysis_text: Option<String>,
    #[serde(rename = "tipo_analise", default)]
    analysis_type: Option<String>,
    #[serde(rename = "limite_status", default)]
    quota: Option<WireQuota>,
}

#[derive(Debug, Deserialize)]
struct WireQuota {
    #[serde(rename = "alerta", default)]
    alert: bool,
    #[serde(rename = "percentual", default)]
    percent: f64,
}

#[derive(Debug, Deserialize)]
struct WireError {
    error: Option<String>,
}

/// Failure kind for a non-2xx status.
pub fn classify_status(status: u16) -> FailureKind {
    match status {
        429 => FailureKind::QuotaExceeded,
        400 => FailureKind::BadArtifact,
        _ => FailureKind::Transient,
    }
}

/// Message the service put in an error body, if it sent one.
pub fn error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<WireError>(body)
        .ok()
        .and_then(|wire| wire.error)
}

/// Interprets a 2xx body. Anything that is not a well-formed success is transient.
pub fn interpret_success(kind: AnalysisKind, body: &[u8]) -> Result<AnalysisReport, UploadError> {
    let wire: WireResponse = serde_json::from_slice(body).map_err(|err| {
        UploadError::new(FailureKind::Transient, format!("malformed response body: {err}"))
    })?;
    if !wire.success {
        return Err(UploadError::new(
            FailureKind::Transient,
            "service reported success=false",
        ));
    }

    let missing = match kind {
        AnalysisKind::Spreadsheet if wire.total_lines.is_none() => Some("total_linhas"),
        AnalysisKind::Spreadsheet if wire.pdf_url.is_none() => Some("pdf_url"),
        AnalysisKind::Merchandising if wire.analysis_text.is_none() => Some("analise"),
        _ => None,
    };
    if let Some(field) = missing {
        return Err(UploadError::new(
            FailureKind::Transient,
            format!("response is missing {field}"),
        ));
    }

    Ok(AnalysisReport {
        cost_usd: wire.cost_usd,
        total_lines: wire.total_lines,
        pdf_url: wire.pdf_url,
        analysis_text: wire.analysis_text,
        analysis_type: wire.analysis_type,
        quota: wire.quota.map(|quota| QuotaTelemetry {
            alert: quota.alert,
            percent: quota.percent,
        }),
    })
}
