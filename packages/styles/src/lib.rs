//! # Style Merger
//!
//! Deduplicates and combines raw style-text fragments (one per placed
//! section) into a single page stylesheet.
//!
//! This is a deliberately simple, non-parsing approach: rules are split on
//! the closing-brace character and keyed by the trimmed text before the
//! opening brace. It does not understand nested at-rules, comments, or
//! multiple selectors sharing one body beyond naive comma handling; such
//! constructs round-trip only if they contain no unescaped `}` before their
//! real end.
//!
//! Merge semantics: first-insertion order of selectors, last-write text per
//! selector. A selector that reappears later (in the same fragment or a
//! later one) replaces the earlier rule body but keeps its original output
//! position. Merging is idempotent.

use std::collections::HashMap;

/// Selector → rule-text map preserving first-seen selector order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedStylesheet {
    order: Vec<String>,
    rules: HashMap<String, String>,
}

impl MergedStylesheet {
    /// Insert or replace the rule for `selector`, keeping its first-seen
    /// position when it already exists.
    fn upsert(&mut self, selector: String, rule_text: String) {
        if !self.rules.contains_key(&selector) {
            self.order.push(selector.clone());
        }
        self.rules.insert(selector, rule_text);
    }

    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn rule(&self, selector: &str) -> Option<&str> {
        self.rules.get(selector).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Stored rule texts in first-seen selector order, newline-separated.
    pub fn render(&self) -> String {
        self.order
            .iter()
            .filter_map(|sel| self.rules.get(sel))
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Merge raw style fragments into one stylesheet.
pub fn merge_fragments<I, S>(fragments: I) -> MergedStylesheet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut sheet = MergedStylesheet::default();

    for fragment in fragments {
        for chunk in fragment.as_ref().split('}') {
            if chunk.trim().is_empty() {
                continue;
            }
            let Some(brace) = chunk.find('{') else {
                // Trailing junk with no body; not a rule.
                continue;
            };
            let selector = chunk[..brace].trim();
            if selector.is_empty() {
                continue;
            }
            let rule_text = format!("{}}}", chunk.trim_start());
            sheet.upsert(selector.to_string(), rule_text);
        }
    }

    sheet
}

/// Convenience: merge and render in one step.
pub fn merge_to_css<I, S>(fragments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    merge_fragments(fragments).render()
}
