//! # Sections
//!
//! Catalog entries are immutable on the client: they are created and
//! destroyed only by the remote store, and the composition copies them
//! wholesale when one is placed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque stable identifier of a catalog section, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(pub i64);

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a saved page, assigned by the store on first save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(pub i64);

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A reusable, named block of markup and styles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,

    /// Human-readable name shown in the catalog.
    pub name: String,

    /// Unique semantic key (e.g. "hero-banner").
    pub component_key: String,

    /// Raw template markup. The client never interprets it.
    pub template_markup: String,

    /// Raw style text merged into the page stylesheet.
    pub template_styles: String,

    pub thumbnail_url: Option<String>,
}
