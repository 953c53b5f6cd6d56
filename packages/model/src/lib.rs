//! # Pagebuilder Model
//!
//! Client-side composition model for the page builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ catalog: reusable sections from the store   │
//! └─────────────────────────────────────────────┘
//!                     ↓ place
//! ┌─────────────────────────────────────────────┐
//! │ composition: ordered PlacedSection list     │
//! │  - insert / move / remove / clear           │
//! │  - stable LocalOrderId addressing           │
//! │  - save-time validation                     │
//! └─────────────────────────────────────────────┘
//!                     ↓ derive
//!          combined markup / style fragments
//! ```
//!
//! ## Core Principles
//!
//! 1. **List order is the source of truth**: positions are derived, never
//!    stored.
//! 2. **Stable identifiers**: placements are addressed by ids that outlive
//!    any reordering, not by indexes.
//! 3. **No I/O here**: persistence lives in `pagebuilder-store`.

mod catalog;
mod composition;
mod section;

pub use catalog::SectionCatalog;
pub use composition::{
    is_url_safe_slug, normalize_slug, Anchor, CompositionError, LocalOrderId, PageComposition,
    PlacedSection,
};
pub use section::{PageId, Section, SectionId};
