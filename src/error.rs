//! Error types for portal operations.

use thiserror::Error;

/// Errors from portal operations.
///
/// Ordinary transport failures (timeouts, refused connections) do not cross
/// the public boundary: the client logs them and reports failure through its
/// return value instead. The variants here are the faults a caller genuinely
/// has to deal with.
#[derive(Debug, Error)]
pub enum PortalError {
    /// HTTP request failed. Only surfaces from [`initialize`], where a dead
    /// portal means there is no client to construct.
    ///
    /// [`initialize`]: crate::PortalClient::initialize
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// An element or cookie the known page layout guarantees was missing.
    ///
    /// This means the portal's markup no longer matches what this client was
    /// written against. Continuing silently would corrupt state, so the call
    /// fails instead.
    #[error("portal page layout changed: {detail}")]
    LayoutChanged { detail: String },

    /// Configuration rejected before any network traffic.
    #[error("invalid portal configuration: {0}")]
    InvalidConfig(String),
}

impl PortalError {
    pub(crate) fn layout(detail: impl Into<String>) -> Self {
        Self::LayoutChanged {
            detail: detail.into(),
        }
    }
}
