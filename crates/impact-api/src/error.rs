use reqwest::StatusCode;
use serde::Deserialize;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Error payload sent by the Impact server, unwrapped from its
/// `{"error": {...}}` envelope.
#[derive(Deserialize, Debug, Clone)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<i64>,
    pub message: String,
}

#[derive(Deserialize)]
pub(crate) struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

impl Default for ApiErrorBody {
    fn default() -> Self {
        ApiErrorBody {
            code: None,
            message: "An unknown error occurred".to_string(),
        }
    }
}

impl Display for ApiErrorBody {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.code {
            Some(code) => write!(f, "Code: {}, Message: {}", code, self.message),
            None => write!(f, "Message: {}", self.message),
        }
    }
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Bad session id")]
    BadSessionId,
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Unauthorized access: {0}")]
    Unauthorized(String),
    #[error("Forbidden access: {0}")]
    Forbidden(String),
    #[error("Internal server error: {0}")]
    InternalServerError(String),
    #[error("Api error {status}: {body}")]
    ApiError {
        status: StatusCode,
        body: ApiErrorBody,
    },
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Unknown Error: {0}")]
    UnknownError(String),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::NotFound(_) => Some(StatusCode::NOT_FOUND),
            ClientError::Unauthorized(_) => Some(StatusCode::UNAUTHORIZED),
            ClientError::Forbidden(_) => Some(StatusCode::FORBIDDEN),
            ClientError::InternalServerError(_) => Some(StatusCode::INTERNAL_SERVER_ERROR),
            ClientError::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_login_error(&self) -> bool {
        matches!(
            self,
            ClientError::Unauthorized(_) | ClientError::Forbidden(_) | ClientError::BadSessionId
        )
    }

    /// Builds the error matching `status` from a raw response body.
    pub(crate) fn from_response(status: StatusCode, text: &str) -> Self {
        let body = serde_json::from_str::<ApiErrorEnvelope>(text)
            .map(|envelope| envelope.error)
            .unwrap_or_else(|_| ApiErrorBody {
                code: None,
                message: text.to_string(),
            });
        match status {
            StatusCode::NOT_FOUND => ClientError::NotFound(body.message),
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized(body.message),
            StatusCode::FORBIDDEN => ClientError::Forbidden(body.message),
            StatusCode::INTERNAL_SERVER_ERROR => ClientError::InternalServerError(body.message),
            _ => ClientError::ApiError { status, body },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_impact_error_envelope() {
        let text = r#"{"error": {"message": "Workspace does not exist", "code": 12003}}"#;
        let err = ClientError::from_response(StatusCode::BAD_REQUEST, text);

        match err {
            ClientError::ApiError { status, body } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(body.code, Some(12003));
                assert_eq!(body.message, "Workspace does not exist");
            }
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[test]
    fn falls_back_to_raw_body() {
        let err = ClientError::from_response(StatusCode::NOT_FOUND, "no route");

        assert!(matches!(err, ClientError::NotFound(ref msg) if msg == "no route"));
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn login_errors() {
        assert!(ClientError::Unauthorized(String::new()).is_login_error());
        assert!(ClientError::BadSessionId.is_login_error());
        assert!(!ClientError::UnknownError(String::new()).is_login_error());
    }
}
