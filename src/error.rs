use thiserror::Error;

/// Enumerates all errors that this crate may return.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Sqlx PostgreSQL driver error.
    #[error("db driver error")]
    Sqlx(#[from] sqlx::Error),

    /// HTTP transport error while talking to the REST api.
    #[error("http transport error")]
    Http(#[from] reqwest::Error),

    /// The REST api responded with a non-success status.
    #[error("remote service rejected the request (status {status}): {msg}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message reported by the service, or the raw response body.
        msg: String,
    },

    /// The config payload did not pass validation.
    #[error("invalid {field}: {msg}")]
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// Details on what exactly went wrong.
        msg: String,
    },

    /// Missing or malformed settings.
    #[error("misconfigured: {msg}")]
    Config {
        /// Details on what exactly went wrong.
        msg: &'static str,
    },

    /// Constraint violation in the system.
    #[error("conflict in the system: {msg}")]
    Conflict {
        /// Details on what exactly went wrong.
        msg: &'static str,
    },
}
