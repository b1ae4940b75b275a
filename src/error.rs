use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ProbeError {
    #[error("Missing Supabase credentials in .env file")]
    MissingCredentials,

    #[error("Invalid Supabase URL: {0}")]
    InvalidEndpoint(String),

    #[error("Invalid Supabase key: {0}")]
    InvalidKey(String),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("{0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{message} (status {status})")]
    Upstream { status: StatusCode, message: String },
}

impl ProbeError {
    /// Errors raised before any request is issued.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ProbeError::MissingCredentials
                | ProbeError::InvalidEndpoint(_)
                | ProbeError::InvalidKey(_)
                | ProbeError::UrlParse(_)
                | ProbeError::Config(_)
        )
    }

    /// The service answered, but refused or could not serve the read.
    pub fn is_upstream(&self) -> bool {
        matches!(self, ProbeError::Upstream { .. })
    }

    /// Build an upstream error from a PostgREST error body, falling back to the
    /// canonical reason phrase when the body is not the usual JSON shape.
    pub fn from_upstream_body(status: StatusCode, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<PostgrestError>(body)
            .ok()
            .and_then(|e| e.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("upstream error")
                    .to_string()
            });
        ProbeError::Upstream { status, message }
    }
}

impl From<figment::Error> for ProbeError {
    fn from(e: figment::Error) -> Self {
        ProbeError::Config(Box::new(e))
    }
}

/// PostgREST error response structure
#[derive(Deserialize, Debug)]
pub struct PostgrestError {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_message_comes_from_postgrest_body() {
        let body = br#"{"code":"42P01","message":"relation \"public.badges\" does not exist","details":null,"hint":null}"#;
        let err = ProbeError::from_upstream_body(StatusCode::NOT_FOUND, body);
        match err {
            ProbeError::Upstream { status, message } => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(message, "relation \"public.badges\" does not exist");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn upstream_message_falls_back_to_reason_phrase() {
        let err = ProbeError::from_upstream_body(StatusCode::UNAUTHORIZED, b"<html>nope</html>");
        assert_eq!(err.to_string(), "Unauthorized (status 401 Unauthorized)");
        assert!(err.is_upstream());
        assert!(!err.is_configuration());
    }

    #[test]
    fn configuration_kinds() {
        assert!(ProbeError::MissingCredentials.is_configuration());
        assert!(ProbeError::InvalidEndpoint("ftp".into()).is_configuration());
    }
}
