//! # Pagebuilder Store
//!
//! Persistence layer for page compositions.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ coordinator: save / load / delete protocols │
//! │  - validation before any network call       │
//! │  - join-create defect workaround            │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ client: PageStore trait + HTTP impl         │
//! └─────────────────────────────────────────────┘
//!                     ↓
//!        remote store (sections / pages / joins)
//! ```
//!
//! ## Core Principles
//!
//! 1. **Sequential steps**: later requests depend on earlier identifiers,
//!    so the coordinator never fans out (except the verification re-query).
//! 2. **No hidden retries**: the defect workaround is a single, narrowly
//!    scoped re-query, not a retry policy.
//! 3. **No rollback**: partial failures leave the store as-is and surface
//!    counts; reconciliation belongs to the caller.

mod api;
mod client;
mod coordinator;
mod error;

pub use api::{
    PageDraft, PageRecord, PageSectionDraft, PageSectionId, PageSectionRecord, SectionDraft,
    SectionRecord,
};
pub use client::{HttpPageStore, PageStore, StoreConfig};
pub use coordinator::{Coordinator, SaveReport};
pub use error::{StoreError, JOIN_CREATE_DEFECT_MARKER};

// Re-export common types for convenience
pub use pagebuilder_common::{BuilderError, BuilderResult};
