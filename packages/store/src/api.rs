//! # Wire Types
//!
//! JSON shapes of the remote store's resources. Field names follow the
//! store's snake_case convention (`template_html`, `sort_order`), which is
//! why the client-side model types are mapped rather than reused.

use pagebuilder_model::{PageId, Section, SectionId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned id of a page/section join record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageSectionId(pub i64);

impl fmt::Display for PageSectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `Section` resource as the store returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRecord {
    pub id: SectionId,
    pub name: String,
    pub component_key: String,
    pub template_html: String,
    pub template_css: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

impl From<SectionRecord> for Section {
    fn from(record: SectionRecord) -> Self {
        Section {
            id: record.id,
            name: record.name,
            component_key: record.component_key,
            template_markup: record.template_html,
            template_styles: record.template_css,
            thumbnail_url: record.thumbnail_url,
        }
    }
}

/// Create/update payload for a section (editor save path).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionDraft {
    pub name: String,
    pub component_key: String,
    pub template_html: String,
    pub template_css: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

/// `Page` resource as the store returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    pub id: PageId,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub meta_description: String,
}

/// Create/update payload for a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDraft {
    pub title: String,
    pub slug: String,
    pub meta_description: String,
}

/// `PageSection` join resource: the persisted association between a page
/// and a section, carrying that section's position within the page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSectionRecord {
    pub id: PageSectionId,
    pub page_id: PageId,
    pub section_id: SectionId,
    pub sort_order: u32,
}

/// Create payload for a join record. There is no update: reordering is
/// delete-and-recreate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSectionDraft {
    pub page_id: PageId,
    pub section_id: SectionId,
    pub sort_order: u32,
}

impl PageSectionDraft {
    /// Whether `record` is the durably-written row for this submission.
    /// Used by the defect-workaround verification re-query.
    pub fn matches(&self, record: &PageSectionRecord) -> bool {
        record.page_id == self.page_id
            && record.section_id == self.section_id
            && record.sort_order == self.sort_order
    }
}
