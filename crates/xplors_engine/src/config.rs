//! Analysis service settings, read from the environment.
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::AnalysisKind;

pub const API_BASE_ENV: &str = "API_BASE";
pub const CONNECT_TIMEOUT_ENV: &str = "XPLORS_CONNECT_TIMEOUT_SECS";
pub const ACCESS_TOKEN_ENV: &str = "XPLORS_ACCESS_TOKEN";
pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {API_BASE_ENV} {value:?}: {source}")]
    ApiBase {
        value: String,
        source: url::ParseError,
    },
    #[error("{API_BASE_ENV} must be an http(s) URL, got {0:?}")]
    ApiBaseScheme(String),
    #[error("invalid {CONNECT_TIMEOUT_ENV} {0:?}")]
    ConnectTimeout(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    /// Always ends with `/` so endpoint paths join beneath it.
    api_base: Url,
    pub connect_timeout: Option<Duration>,
    /// No overall request timeout unless set.
    pub request_timeout: Option<Duration>,
    pub bearer_token: Option<String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            api_base: parse_api_base(DEFAULT_API_BASE).expect("default API base is valid"),
            connect_timeout: None,
            request_timeout: None,
            bearer_token: None,
        }
    }
}

impl ApiSettings {
    pub fn new(api_base: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_base: parse_api_base(api_base)?,
            ..Self::default()
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut settings = match get(API_BASE_ENV) {
            Some(base) => Self::new(&base)?,
            None => Self::default(),
        };
        if let Some(raw) = get(CONNECT_TIMEOUT_ENV) {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::ConnectTimeout(raw.clone()))?;
            settings.connect_timeout = Some(Duration::from_secs(secs));
        }
        settings.bearer_token = get(ACCESS_TOKEN_ENV);
        Ok(settings)
    }

    /// Overrides the base URL, keeping the other settings.
    pub fn set_api_base(&mut self, raw: &str) -> Result<(), ConfigError> {
        self.api_base = parse_api_base(raw)?;
        Ok(())
    }

    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    pub fn endpoint(&self, kind: AnalysisKind) -> Url {
        self.api_base
            .join(kind.endpoint_path())
            .unwrap_or_else(|_| self.api_base.clone())
    }
}

fn parse_api_base(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    let url = Url::parse(&with_slash).map_err(|source| ConfigError::ApiBase {
        value: raw.to_string(),
        source,
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::ApiBaseScheme(raw.to_string()));
    }
    Ok(url)
}
