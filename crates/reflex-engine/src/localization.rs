//! Localized text lookup and culture settings
//!
//! The consumed collaborator surface of the runtime: a key → text table
//! with fallbacks and the locale-respecting string comparison used when
//! ordering property items. Translation file loading lives outside this
//! crate; the table here is populated programmatically.

use std::cmp::Ordering;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

static GLOBAL_TEXTS: Lazy<RwLock<LocalTextRegistry>> =
    Lazy::new(|| RwLock::new(LocalTextRegistry::new()));

/// Localization key of the filter panel's AND connective
pub const FILTER_PANEL_AND: &str = "Controls.FilterPanel.And";
/// Localization key of the filter panel's OR connective
pub const FILTER_PANEL_OR: &str = "Controls.FilterPanel.Or";

/// Key → localized text table
#[derive(Debug)]
pub struct LocalTextRegistry {
    texts: FxHashMap<String, String>,
}

impl LocalTextRegistry {
    /// A table seeded with the invariant filter-panel connective texts
    pub fn new() -> Self {
        let mut registry = LocalTextRegistry {
            texts: FxHashMap::default(),
        };
        registry.add(FILTER_PANEL_AND, "And");
        registry.add(FILTER_PANEL_OR, "Or");
        registry
    }

    /// The process-wide default table
    pub fn global() -> &'static RwLock<LocalTextRegistry> {
        &GLOBAL_TEXTS
    }

    /// Add or replace a text
    pub fn add(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.texts.insert(key.into(), text.into());
    }

    /// Text for `key`, falling back to the key itself when missing
    pub fn text(&self, key: &str) -> String {
        self.texts
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// Text for `key`, absent when missing
    pub fn try_get_text(&self, key: &str) -> Option<&str> {
        self.texts.get(key).map(String::as_str)
    }
}

impl Default for LocalTextRegistry {
    fn default() -> Self {
        LocalTextRegistry::new()
    }
}

/// Culture settings: how strings compare in the current locale
#[derive(Debug, Clone, Copy)]
pub struct Culture {
    collator: fn(&str, &str) -> Ordering,
}

fn invariant_compare(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| a.cmp(b))
}

impl Culture {
    /// Culture backed by a specific collation function
    pub fn with_collator(collator: fn(&str, &str) -> Ordering) -> Self {
        Culture { collator }
    }

    /// Compare two strings in this culture's ordering
    pub fn string_compare(&self, a: &str, b: &str) -> Ordering {
        (self.collator)(a, b)
    }
}

impl Default for Culture {
    fn default() -> Self {
        Culture {
            collator: invariant_compare,
        }
    }
}
