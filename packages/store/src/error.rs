//! Error types for the store client

use thiserror::Error;

/// Diagnostic marker the join-create endpoint emits when its response path
/// fails after the row was already committed. This exact signature is the
/// only condition eligible for the verification workaround; see
/// [`StoreError::is_join_create_defect`].
pub const JOIN_CREATE_DEFECT_MARKER: &str = "join_render_failure";

#[derive(Error, Debug)]
pub enum StoreError {
    /// Network-level failure: connect, timeout, body decode.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the store.
    #[error("store returned {status}: {body}")]
    Backend { status: u16, body: String },

    #[error("invalid store url: {0}")]
    Url(#[from] url::ParseError),
}

impl StoreError {
    /// True only for the documented backend defect: an HTTP 5xx from the
    /// join-create endpoint carrying the diagnostic marker, which can
    /// co-occur with a durably written row. Deliberately narrow so the
    /// workaround never widens into a retry-on-any-5xx policy.
    pub fn is_join_create_defect(&self) -> bool {
        match self {
            StoreError::Backend { status, body } => {
                (500..600).contains(status) && body.contains(JOIN_CREATE_DEFECT_MARKER)
            }
            _ => false,
        }
    }
}
