use reqwest::multipart::{Form, Part};
use xplors_logging::{xplors_debug, xplors_info, xplors_warn};

use crate::interpret::{classify_status, error_message, interpret_success};
use crate::{AnalysisKind, AnalysisReport, ApiSettings, FailureKind, UploadError, UploadRequest};

#[async_trait::async_trait]
pub trait Uploader: Send + Sync {
    async fn upload(&self, request: &UploadRequest) -> Result<AnalysisReport, UploadError>;
}

/// Multipart uploader for the analysis service. No retries.
#[derive(Debug, Clone)]
pub struct ReqwestUploader {
    settings: ApiSettings,
    client: reqwest::Client,
}

impl ReqwestUploader {
    pub fn new(settings: ApiSettings) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            settings,
            client: builder.build()?,
        })
    }

    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }
}

/// Builds the form fields the analysis service expects.
fn build_form(request: &UploadRequest) -> Result<Form, UploadError> {
    let submission = &request.submission;
    let file = Part::bytes(submission.bytes.to_vec())
        .file_name(submission.file_name.clone())
        .mime_str(&submission.media_type)
        .map_err(|err| {
            UploadError::new(
                FailureKind::BadArtifact,
                format!("unusable media type {:?}: {err}", submission.media_type),
            )
        })?;

    let mut form = Form::new()
        .part("file", file)
        .text("user_id", request.user_id.clone());
    if submission.kind == AnalysisKind::Merchandising {
        form = form.text("tipo", "merchandising");
        if let Some(context) = &submission.context {
            form = form.text("contexto", context.clone());
        }
    }
    Ok(form)
}

#[async_trait::async_trait]
impl Uploader for ReqwestUploader {
    async fn upload(&self, request: &UploadRequest) -> Result<AnalysisReport, UploadError> {
        let kind = request.submission.kind;
        let endpoint = self.settings.endpoint(kind);
        let form = build_form(request)?;

        let mut builder = self.client.post(endpoint.clone()).multipart(form);
        if let Some(token) = &self.settings.bearer_token {
            builder = builder.bearer_auth(token);
        }
        xplors_debug!(
            "POST {} file={} bytes={}",
            endpoint,
            request.submission.file_name,
            request.submission.bytes.len()
        );

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        xplors_info!("POST {} -> {}", endpoint, status.as_u16());

        if !status.is_success() {
            let kind = classify_status(status.as_u16());
            let message = error_message(&body).unwrap_or_else(|| status.to_string());
            xplors_warn!("upload rejected ({}): {}", kind, message);
            return Err(UploadError::new(kind, message));
        }

        interpret_success(kind, &body)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> UploadError {
    UploadError::new(FailureKind::Transient, err.to_string())
}
