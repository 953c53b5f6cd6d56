//! # Section Catalog
//!
//! The set of reusable sections fetched from the store. Loaded at session
//! start and refreshed after each successful save, so a newly saved section
//! is immediately available as a block.

use crate::section::{Section, SectionId};

#[derive(Debug, Clone, Default)]
pub struct SectionCatalog {
    sections: Vec<Section>,
}

impl SectionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the catalog wholesale with a fresh fetch from the store.
    pub fn replace_all(&mut self, sections: Vec<Section>) {
        self.sections = sections;
    }

    pub fn get(&self, id: SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Case-insensitive filter on name or component key.
    pub fn search(&self, term: &str) -> Vec<&Section> {
        let needle = term.to_lowercase();
        self.sections
            .iter()
            .filter(|s| {
                s.name.to_lowercase().contains(&needle)
                    || s.component_key.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
