//! Typed error for one chat round trip.

use thiserror::Error;

/// Why a question did not produce an answer.
///
/// The widget never propagates these: each one becomes an error turn whose
/// text is `Error: <Display>`.
#[derive(Debug, Error)]
pub enum WidgetError {
    /// Network/transport errors when calling the proxy.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Proxy answered with a non-2xx status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Body was not the JSON we expected.
    #[error("invalid response: {0}")]
    Decode(String),

    /// JSON body without a string `answer`.
    #[error("response did not contain an answer")]
    MissingAnswer,
}
