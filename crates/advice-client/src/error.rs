use serde::Deserialize;
use std::fmt;

const MAX_MESSAGE_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdviceErrorKind {
    MissingApiKey,
    Network,
    Timeout,
    Auth,
    Quota,
    Api,
    Parse,
    Empty,
}

impl AdviceErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdviceErrorKind::MissingApiKey => "missing_api_key",
            AdviceErrorKind::Network => "network",
            AdviceErrorKind::Timeout => "timeout",
            AdviceErrorKind::Auth => "auth",
            AdviceErrorKind::Quota => "quota",
            AdviceErrorKind::Api => "api",
            AdviceErrorKind::Parse => "parse",
            AdviceErrorKind::Empty => "empty",
        }
    }
}

impl fmt::Display for AdviceErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdviceError {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("authentication rejected ({status}): {message}")]
    Auth { status: u16, message: String },
    #[error("quota exhausted ({status}): {message}")]
    Quota { status: u16, message: String },
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("malformed response: {0}")]
    Parse(String),
    #[error("response contained no text (reason: {})", .reason.as_deref().unwrap_or("unknown"))]
    Empty { reason: Option<String> },
}

impl AdviceError {
    pub fn kind(&self) -> AdviceErrorKind {
        match self {
            AdviceError::MissingApiKey => AdviceErrorKind::MissingApiKey,
            AdviceError::Network(_) => AdviceErrorKind::Network,
            AdviceError::Timeout => AdviceErrorKind::Timeout,
            AdviceError::Auth { .. } => AdviceErrorKind::Auth,
            AdviceError::Quota { .. } => AdviceErrorKind::Quota,
            AdviceError::Api { .. } => AdviceErrorKind::Api,
            AdviceError::Parse(_) => AdviceErrorKind::Parse,
            AdviceError::Empty { .. } => AdviceErrorKind::Empty,
        }
    }

    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AdviceError::Timeout
        } else {
            AdviceError::Network(err.to_string())
        }
    }

    /// Maps a non-2xx response onto an error kind. Google reports a bad key as
    /// 400 with reason `API_KEY_INVALID`, so the body is consulted as well.
    pub(crate) fn from_status(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<ErrorEnvelope>(body)
            .ok()
            .map(|envelope| envelope.error);
        let message = detail
            .as_ref()
            .and_then(|detail| detail.message.clone())
            .unwrap_or_else(|| truncate(body.trim(), MAX_MESSAGE_CHARS));
        let api_status = detail
            .as_ref()
            .and_then(|detail| detail.status.as_deref())
            .unwrap_or("");
        let key_invalid = detail
            .as_ref()
            .map(|detail| {
                detail
                    .details
                    .iter()
                    .any(|item| item.reason.as_deref() == Some("API_KEY_INVALID"))
            })
            .unwrap_or(false);

        match status {
            401 | 403 => AdviceError::Auth { status, message },
            429 => AdviceError::Quota { status, message },
            _ if key_invalid
                || api_status == "UNAUTHENTICATED"
                || api_status == "PERMISSION_DENIED" =>
            {
                AdviceError::Auth { status, message }
            }
            _ if api_status == "RESOURCE_EXHAUSTED" => AdviceError::Quota { status, message },
            _ => AdviceError::Api { status, message },
        }
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    details: Vec<ErrorItem>,
}

#[derive(Deserialize)]
struct ErrorItem {
    #[serde(default)]
    reason: Option<String>,
}

fn truncate(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
