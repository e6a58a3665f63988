// Error type shared by the library modules. The binary converts it into
// `anyhow::Error` at the top level.

use thiserror::Error;

/// Errors returned by the GitHub client and the keepalive run.
#[derive(Debug, Error)]
pub enum Error {
    /// GitHub answered with a failure status. The string is the complete,
    /// already formatted message (for example
    /// `ERROR reading repositories for user octo: Not Found`).
    #[error("{0}")]
    Api(String),

    /// The request could not be sent or the response body could not be
    /// decoded.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The client is not usable as configured (bad base URL, missing token).
    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
