//! All error types for the potranslate crate.
//!
//! These are returned from every fallible operation (catalog parsing and saving,
//! remote API calls, submission, merging).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog syntax error on line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(String),

    #[error("API error{}: {message}", .code.map(|c| format!(" {c}")).unwrap_or_default())]
    Api { code: Option<i64>, message: String },

    #[error("order submission rejected: {raw}")]
    Rejected { raw: String },

    #[error("unexpected API response: {0}")]
    UnexpectedResponse(String),

    #[error("missing credential: {0}")]
    MissingCredential(&'static str),

    #[error("invalid locale code `{0}`")]
    InvalidLocale(String),

    #[error("catalog text cannot be encoded as {charset}")]
    Unencodable { charset: &'static str },

    #[error("catalog already has a pending order `{0}`")]
    OrderPending(String),

    #[error("failed to persist catalog: {0}")]
    Persist(#[from] tempfile::PersistError),
}

impl Error {
    /// Creates a syntax error for the given 1-based line number.
    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        Error::Syntax {
            line,
            message: message.into(),
        }
    }
}
