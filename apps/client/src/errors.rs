use std::path::PathBuf;

use thiserror::Error;

/// Shown for every gateway failure. The specific cause is logged, never displayed.
pub const GATEWAY_FAILURE_MESSAGE: &str =
    "Ocorreu um problema ao enviar o currículo para análise.";
pub const SELECTION_FAILURE_MESSAGE: &str = "Não foi possível selecionar o arquivo.";
pub const SELECT_FILE_FIRST_MESSAGE: &str = "Selecione um arquivo PDF primeiro.";
pub const SUBMISSION_IN_FLIGHT_MESSAGE: &str = "Aguarde a análise em andamento terminar.";

/// Any failure talking to the scoring/candidate backend.
/// No retry happens at this level; the caller decides whether to offer one.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        timeout_ms: u64,
        #[source]
        source: reqwest::Error,
    },

    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response body could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("could not read document at {}: {source}", .locator.display())]
    FileRead {
        locator: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

impl GatewayError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, GatewayError::Status { status: 404, .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, GatewayError::Timeout { .. })
    }

    /// Whether resending the same document can succeed: the request never
    /// got a usable answer (timeout, connection, 5xx, 408, 429).
    pub fn is_retryable(&self) -> bool {
        match self {
            GatewayError::Timeout { .. } | GatewayError::Transport(_) => true,
            GatewayError::Status { status, .. } => *status >= 500 || matches!(*status, 408 | 429),
            GatewayError::Decode(_)
            | GatewayError::FileRead { .. }
            | GatewayError::InvalidEndpoint(_) => false,
        }
    }

    pub fn user_message(&self) -> &'static str {
        GATEWAY_FAILURE_MESSAGE
    }
}

/// The platform file chooser failed (dismissing it is not an error).
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("could not read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a PDF document", .path.display())]
    UnsupportedType { path: PathBuf },
}

impl SelectionError {
    pub fn user_message(&self) -> &'static str {
        SELECTION_FAILURE_MESSAGE
    }
}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("job skills could not be serialized: {0}")]
    Skills(#[from] serde_json::Error),
}

/// Outcome of a rejected or failed upload-session operation.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("a submission is already in flight")]
    SubmissionInFlight,

    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),

    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

impl UploadError {
    /// Stable machine-readable code, mirroring the variant.
    pub fn code(&self) -> &'static str {
        match self {
            UploadError::Validation(_) => "VALIDATION_ERROR",
            UploadError::SubmissionInFlight => "SUBMISSION_IN_FLIGHT",
            UploadError::Selection(_) => "SELECTION_ERROR",
            UploadError::Encode(_) => "ENCODE_ERROR",
            UploadError::Gateway(_) => "GATEWAY_ERROR",
        }
    }

    /// Text safe to show the user.
    pub fn user_message(&self) -> String {
        match self {
            UploadError::Validation(msg) => msg.clone(),
            UploadError::SubmissionInFlight => SUBMISSION_IN_FLIGHT_MESSAGE.to_string(),
            UploadError::Selection(e) => e.user_message().to_string(),
            UploadError::Encode(_) => GATEWAY_FAILURE_MESSAGE.to_string(),
            UploadError::Gateway(e) => e.user_message().to_string(),
        }
    }
}
