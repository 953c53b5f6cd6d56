//! Error types for the editor bridge

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("editor surface is not mounted")]
    NotMounted,

    #[error("editor surface is already mounted")]
    AlreadyMounted,

    #[error("surface error: {0}")]
    Surface(String),
}
