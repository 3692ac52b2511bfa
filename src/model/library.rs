//! The stored library: all four collections together.
//!
//! One `Library` value is the whole persisted state. The on-disk JSON shape
//! is identical to the export bundle document (camelCase collection keys),
//! so an exported file can be re-imported or even dropped in as a library
//! verbatim.

use serde::{Deserialize, Serialize};

use super::item::{ItemKind, Pattern, SyncedPattern, Template, TemplatePart};

/// The four collections, reconciled independently but persisted as one
/// document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct Library {
    pub patterns: Vec<Pattern>,
    pub templates: Vec<Template>,
    pub template_parts: Vec<TemplatePart>,
    pub synced_patterns: Vec<SyncedPattern>,
}

impl Library {
    /// Number of items in one collection.
    #[must_use]
    pub fn count(&self, kind: ItemKind) -> usize {
        match kind {
            ItemKind::Patterns => self.patterns.len(),
            ItemKind::Templates => self.templates.len(),
            ItemKind::TemplateParts => self.template_parts.len(),
            ItemKind::SyncedPatterns => self.synced_patterns.len(),
        }
    }

    /// Total item count across all four collections.
    #[must_use]
    pub fn total(&self) -> usize {
        ItemKind::ALL.iter().map(|&k| self.count(k)).sum()
    }

    /// Returns `true` if every collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
