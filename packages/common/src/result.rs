use crate::error::BuilderError;

/// Common Result type alias
pub type BuilderResult<T> = Result<T, BuilderError>;
