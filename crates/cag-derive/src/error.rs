//! Error types for per-encounter payload handling.

use thiserror::Error;

/// Problems with one encounter's review payload.
///
/// These never abort a batch: the encounter falls back to an empty review
/// and the message is kept as a diagnostic on the derived record.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The encounter has no review field, or it is `null`.
    #[error("review payload is missing")]
    Missing,

    /// The review text is not valid JSON after fence stripping.
    #[error("review payload is not valid JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    /// The review parsed, but not to an object.
    #[error("review payload is {found}, expected an object")]
    NotAnObject { found: &'static str },

    /// The review object does not have the angiography/PCI structure.
    #[error("review payload has an unexpected shape: {0}")]
    Shape(#[source] serde_json::Error),
}
