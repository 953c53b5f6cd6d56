//! # Page Composition
//!
//! The ordered, mutable list of placed sections for the page being edited.
//!
//! ## Design Principles
//!
//! 1. **Stable addressing**: every placed section gets a client-generated
//!    `LocalOrderId` that is never reused, even after removal. Drag and
//!    reorder operations address items by id, so a stale reference from an
//!    in-flight drag can never collide with a new item the way an array
//!    index can.
//! 2. **Order is truth**: the sequence order is the sole source of `position`;
//!    positions are recomputed at save time (index + 1) and never stored on
//!    the client.
//! 3. **Synchronous**: all mutations happen in response to user actions and
//!    never block. The network lives elsewhere.

use crate::section::{PageId, Section, SectionId};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Client-generated identifier for one placement, unique for the lifetime
/// of the edit session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalOrderId(u64);

impl fmt::Display for LocalOrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "placed-{}", self.0)
    }
}

/// A section instance placed into the composition. Carries a full copy of
/// the catalog entry so the canvas can render without re-fetching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedSection {
    order_id: LocalOrderId,
    section: Section,
}

impl PlacedSection {
    pub fn order_id(&self) -> LocalOrderId {
        self.order_id
    }

    pub fn source_section_id(&self) -> SectionId {
        self.section.id
    }

    pub fn section(&self) -> &Section {
        &self.section
    }
}

/// Where an insertion lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// End of the list. Dropping onto the empty-state placeholder resolves
    /// to this.
    Append,

    /// Immediately following the referenced item. Falls back to `Append`
    /// when the item no longer exists.
    After(LocalOrderId),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompositionError {
    #[error("page title is required")]
    MissingTitle,

    #[error("page slug is required")]
    MissingSlug,

    #[error("slug {0:?} is not URL-safe")]
    InvalidSlug(String),

    #[error("composition has no sections")]
    Empty,
}

/// The page being edited.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageComposition {
    page_id: Option<PageId>,
    pub title: String,
    pub slug: String,
    pub meta_description: String,
    placed: Vec<PlacedSection>,
    next_order_id: u64,
}

impl PageComposition {
    /// Create an empty "new page" composition.
    pub fn new() -> Self {
        Self {
            page_id: None,
            title: String::new(),
            slug: String::new(),
            meta_description: String::new(),
            placed: Vec::new(),
            next_order_id: 0,
        }
    }

    /// Rebuild a composition from a loaded page: metadata plus the sections
    /// referenced by its join records, already sorted by stored position.
    pub fn hydrated(
        page_id: PageId,
        title: String,
        slug: String,
        meta_description: String,
        sections: Vec<Section>,
    ) -> Self {
        let mut composition = Self {
            page_id: Some(page_id),
            title,
            slug,
            meta_description,
            placed: Vec::new(),
            next_order_id: 0,
        };
        for section in sections {
            composition.insert_section(section, Anchor::Append);
        }
        composition
    }

    /// `None` until the first successful save.
    pub fn page_id(&self) -> Option<PageId> {
        self.page_id
    }

    /// Bind the store-assigned id after the first successful page create.
    pub fn bind_page_id(&mut self, id: PageId) {
        debug_assert!(self.page_id.is_none(), "page id is bound once");
        self.page_id = Some(id);
    }

    fn mint_order_id(&mut self) -> LocalOrderId {
        let id = LocalOrderId(self.next_order_id);
        self.next_order_id += 1;
        id
    }

    fn index_of(&self, id: LocalOrderId) -> Option<usize> {
        self.placed.iter().position(|p| p.order_id == id)
    }

    /// Place a section, returning the freshly minted order id. No two
    /// insertions ever receive the same id, even across removals.
    pub fn insert_section(&mut self, section: Section, anchor: Anchor) -> LocalOrderId {
        let order_id = self.mint_order_id();
        let placed = PlacedSection { order_id, section };

        match anchor {
            Anchor::Append => self.placed.push(placed),
            Anchor::After(target) => match self.index_of(target) {
                Some(idx) => self.placed.insert(idx + 1, placed),
                // Anchor vanished mid-drag; append rather than fail.
                None => self.placed.push(placed),
            },
        }

        order_id
    }

    /// Relocate `id` to immediately precede `before`. Stable: every other
    /// item keeps its relative order. No-op when source equals target or
    /// the target is gone.
    pub fn move_existing(&mut self, id: LocalOrderId, before: LocalOrderId) {
        if id == before {
            return;
        }
        let Some(from) = self.index_of(id) else {
            return;
        };
        if self.index_of(before).is_none() {
            return;
        }

        let item = self.placed.remove(from);
        // Target index is looked up after removal so it already accounts
        // for the shift when the item came from earlier in the list.
        let to = self
            .index_of(before)
            .expect("move target vanished during move");
        self.placed.insert(to, item);
    }

    /// Delete the item. Its order id is never shifted onto another item or
    /// reused. Returns whether anything was removed.
    pub fn remove(&mut self, id: LocalOrderId) -> bool {
        match self.index_of(id) {
            Some(idx) => {
                self.placed.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Empty the list. The order-id counter keeps advancing, so ids from
    /// before the clear stay dead.
    pub fn clear(&mut self) {
        self.placed.clear();
    }

    /// Ordered snapshot. Owned, so later mutations are not observable
    /// through it.
    pub fn list(&self) -> Vec<PlacedSection> {
        self.placed.to_vec()
    }

    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    /// Template markup of every placed section, in order, newline-joined.
    pub fn combined_markup(&self) -> String {
        self.placed
            .iter()
            .map(|p| p.section.template_markup.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Raw style fragments in placement order, one per section. Input to
    /// the style merger.
    pub fn style_fragments(&self) -> Vec<&str> {
        self.placed
            .iter()
            .map(|p| p.section.template_styles.as_str())
            .collect()
    }

    /// Preconditions checked before any save leaves the client.
    pub fn validate_for_save(&self) -> Result<(), CompositionError> {
        if self.title.trim().is_empty() {
            return Err(CompositionError::MissingTitle);
        }
        if self.slug.is_empty() {
            return Err(CompositionError::MissingSlug);
        }
        if !is_url_safe_slug(&self.slug) {
            return Err(CompositionError::InvalidSlug(self.slug.clone()));
        }
        if self.placed.is_empty() {
            return Err(CompositionError::Empty);
        }
        Ok(())
    }
}

impl Default for PageComposition {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercase and replace whitespace runs with hyphens, the same mangling
/// the slug input applies as the user types.
pub fn normalize_slug(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut last_was_hyphen = false;
    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !last_was_hyphen {
                slug.push('-');
                last_was_hyphen = true;
            }
        } else {
            for lower in ch.to_lowercase() {
                slug.push(lower);
            }
            last_was_hyphen = ch == '-';
        }
    }
    slug
}

pub fn is_url_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: i64, name: &str) -> Section {
        Section {
            id: SectionId(id),
            name: name.to_string(),
            component_key: format!("{}-key", name),
            template_markup: format!("<div>{}</div>", name),
            template_styles: String::new(),
            thumbnail_url: None,
        }
    }

    #[test]
    fn order_ids_stay_unique_across_removals() {
        let mut comp = PageComposition::new();
        let mut issued = Vec::new();

        for round in 0..5 {
            let a = comp.insert_section(section(1, "hero"), Anchor::Append);
            let b = comp.insert_section(section(2, "footer"), Anchor::After(a));
            issued.push(a);
            issued.push(b);
            if round % 2 == 0 {
                comp.remove(a);
            } else {
                comp.clear();
            }
        }

        let unique: std::collections::HashSet<_> = issued.iter().copied().collect();
        assert_eq!(unique.len(), issued.len(), "an order id was reissued");
    }

    #[test]
    fn insert_after_places_immediately_following_anchor() {
        let mut comp = PageComposition::new();
        let first = comp.insert_section(section(1, "hero"), Anchor::Append);
        let last = comp.insert_section(section(2, "footer"), Anchor::Append);
        let middle = comp.insert_section(section(3, "features"), Anchor::After(first));

        let order: Vec<_> = comp.list().iter().map(|p| p.order_id()).collect();
        assert_eq!(order, vec![first, middle, last]);
    }

    #[test]
    fn insert_after_missing_anchor_falls_back_to_append() {
        let mut comp = PageComposition::new();
        let ghost = comp.insert_section(section(1, "hero"), Anchor::Append);
        comp.remove(ghost);

        let a = comp.insert_section(section(2, "footer"), Anchor::Append);
        let b = comp.insert_section(section(3, "features"), Anchor::After(ghost));

        let order: Vec<_> = comp.list().iter().map(|p| p.order_id()).collect();
        assert_eq!(order, vec![a, b]);
    }

    #[test]
    fn move_places_source_immediately_before_target() {
        let mut comp = PageComposition::new();
        let ids: Vec<_> = (0..5)
            .map(|i| comp.insert_section(section(i, &format!("s{}", i)), Anchor::Append))
            .collect();

        // Move last before second.
        comp.move_existing(ids[4], ids[1]);
        let order: Vec<_> = comp.list().iter().map(|p| p.order_id()).collect();
        assert_eq!(order, vec![ids[0], ids[4], ids[1], ids[2], ids[3]]);

        // Move first before last; everyone else keeps relative order.
        comp.move_existing(ids[0], ids[3]);
        let order: Vec<_> = comp.list().iter().map(|p| p.order_id()).collect();
        assert_eq!(order, vec![ids[4], ids[1], ids[2], ids[0], ids[3]]);
    }

    #[test]
    fn move_is_noop_for_self_or_missing_target() {
        let mut comp = PageComposition::new();
        let a = comp.insert_section(section(1, "hero"), Anchor::Append);
        let b = comp.insert_section(section(2, "footer"), Anchor::Append);
        let gone = comp.insert_section(section(3, "features"), Anchor::Append);
        comp.remove(gone);

        comp.move_existing(a, a);
        comp.move_existing(b, gone);

        let order: Vec<_> = comp.list().iter().map(|p| p.order_id()).collect();
        assert_eq!(order, vec![a, b]);
    }

    #[test]
    fn snapshots_do_not_observe_later_mutations() {
        let mut comp = PageComposition::new();
        comp.insert_section(section(1, "hero"), Anchor::Append);
        let snapshot = comp.list();

        comp.insert_section(section(2, "footer"), Anchor::Append);
        comp.clear();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].source_section_id(), SectionId(1));
    }

    #[test]
    fn validate_for_save_checks_metadata_and_contents() {
        let mut comp = PageComposition::new();
        assert_eq!(comp.validate_for_save(), Err(CompositionError::MissingTitle));

        comp.title = "About Us".to_string();
        assert_eq!(comp.validate_for_save(), Err(CompositionError::MissingSlug));

        comp.slug = "about us!".to_string();
        assert!(matches!(
            comp.validate_for_save(),
            Err(CompositionError::InvalidSlug(_))
        ));

        comp.slug = "about-us".to_string();
        assert_eq!(comp.validate_for_save(), Err(CompositionError::Empty));

        comp.insert_section(section(1, "hero"), Anchor::Append);
        assert_eq!(comp.validate_for_save(), Ok(()));
    }

    #[test]
    fn normalize_slug_lowercases_and_hyphenates() {
        assert_eq!(normalize_slug("About Us"), "about-us");
        assert_eq!(normalize_slug("  Big   Launch  "), "big-launch");
        assert_eq!(normalize_slug("already-fine"), "already-fine");
        assert!(is_url_safe_slug(&normalize_slug("About Us")));
        assert!(!is_url_safe_slug("about/us"));
        assert!(!is_url_safe_slug(""));
    }

    #[test]
    fn composition_survives_a_serde_round_trip() {
        let mut comp = PageComposition::new();
        comp.title = "Landing".to_string();
        comp.slug = "landing".to_string();
        let kept = comp.insert_section(section(1, "hero"), Anchor::Append);
        let dropped = comp.insert_section(section(2, "footer"), Anchor::Append);
        comp.remove(dropped);

        let json = serde_json::to_string(&comp).unwrap();
        let mut restored: PageComposition = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.list()[0].order_id(), kept);
        // The order-id counter travels with the session, so restored
        // compositions keep minting fresh ids.
        let next = restored.insert_section(section(3, "cta"), Anchor::Append);
        assert_ne!(next, kept);
        assert_ne!(next, dropped);
    }

    #[test]
    fn combined_markup_joins_in_list_order() {
        let mut comp = PageComposition::new();
        let hero = comp.insert_section(section(1, "hero"), Anchor::Append);
        comp.insert_section(section(2, "footer"), Anchor::Append);
        comp.insert_section(section(3, "features"), Anchor::After(hero));

        assert_eq!(
            comp.combined_markup(),
            "<div>hero</div>\n<div>features</div>\n<div>footer</div>"
        );
    }
}
