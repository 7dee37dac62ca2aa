use axum::http::StatusCode;
use oauth2::basic::BasicErrorResponseType;
use oauth2::reqwest::Error as ReqwestClientError;
use oauth2::{HttpClientError, RequestTokenError, StandardErrorResponse};
use thiserror::Error as ThisError;

/// Failures while talking to the warehouse. Logged server-side; users see a generic message.
#[derive(Debug, ThisError)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Warehouse authentication failed: {0}")]
    Auth(String),

    #[error("Warehouse responded with status {status}: {message}")]
    Upstream { status: StatusCode, message: String },

    #[error("Statement {state}: {message}")]
    Statement { state: String, message: String },

    #[error("Failed to decode statement result: {0}")]
    Decode(String),

    #[error("Country code {0} already exists!")]
    DuplicateKey(String),

    #[error("No entry with country code {0}")]
    NotFound(String),
}

impl StorageError {
    /// True when the backend rejected a write because of a uniqueness constraint.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            StorageError::Database(sqlx::Error::Database(db)) => db.is_unique_violation(),
            StorageError::DuplicateKey(_) => true,
            _ => false,
        }
    }
}

type ClientCredentialsError = RequestTokenError<
    HttpClientError<ReqwestClientError>,
    StandardErrorResponse<BasicErrorResponseType>,
>;

impl From<ClientCredentialsError> for StorageError {
    fn from(e: ClientCredentialsError) -> Self {
        match e {
            RequestTokenError::ServerResponse(err) => StorageError::Auth(err.error().to_string()),
            RequestTokenError::Request(HttpClientError::Reqwest(real_err)) => {
                StorageError::Http(*real_err)
            }
            RequestTokenError::Request(other) => {
                StorageError::Auth(format!("HttpClientError: {other:?}"))
            }
            RequestTokenError::Parse(parse_err, _body) => {
                StorageError::Auth(format!("token endpoint parse error: {parse_err}"))
            }
            RequestTokenError::Other(s) => StorageError::Auth(s),
        }
    }
}
