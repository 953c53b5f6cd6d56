use thiserror::Error;

/// Operation-boundary error type for save/load/delete.
///
/// Every protocol run against the remote store resolves to exactly one of
/// these before it reaches the caller. The defect-marker signature from the
/// join-create endpoint is intentionally absent: it is resolved inside the
/// coordinator by the verification re-query and only surfaces (as
/// `PartialSave`) when verification fails too.
#[derive(Error, Debug)]
pub enum BuilderError {
    /// Missing or malformed metadata, or an empty composition. Raised
    /// before any network call, so there are never partial effects.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Network failure or non-2xx response without the defect marker.
    /// Names the protocol step that failed.
    #[error("{step} failed: {message}")]
    Transport { step: &'static str, message: String },

    /// Fewer than `total` link creates succeeded after workaround
    /// resolution. The store is left in the partially-written state;
    /// retry or reconciliation is up to the caller.
    #[error("saved {succeeded} of {total} section links")]
    PartialSave { succeeded: usize, total: usize },
}

impl BuilderError {
    pub fn validation(msg: impl Into<String>) -> Self {
        BuilderError::Validation(msg.into())
    }

    pub fn transport(step: &'static str, source: impl std::fmt::Display) -> Self {
        BuilderError::Transport {
            step,
            message: source.to_string(),
        }
    }
}
