//! Per-kind item records.
//!
//! Each collection kind has a fixed-shape record: `slug` + `title` +
//! `content`, plus kind-specific metadata (pattern categories, template-part
//! area). Field validation happens at the import boundary in [`crate::bundle`]
//! — these types only ever hold already-validated data.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::slug::Slug;

// ---------------------------------------------------------------------------
// ItemKind
// ---------------------------------------------------------------------------

/// The four disjoint collection kinds, reconciled independently with the
/// same algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemKind {
    /// Generic block patterns.
    Patterns,
    /// Full page templates.
    Templates,
    /// Reusable template parts (header, footer, ...).
    TemplateParts,
    /// Synced patterns (edit-once, update-everywhere blocks).
    SyncedPatterns,
}

impl ItemKind {
    /// All kinds, in bundle-document order.
    pub const ALL: [Self; 4] = [
        Self::Patterns,
        Self::Templates,
        Self::TemplateParts,
        Self::SyncedPatterns,
    ];
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Patterns => write!(f, "patterns"),
            Self::Templates => write!(f, "templates"),
            Self::TemplateParts => write!(f, "template-parts"),
            Self::SyncedPatterns => write!(f, "synced-patterns"),
        }
    }
}

impl FromStr for ItemKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "patterns" => Ok(Self::Patterns),
            "templates" => Ok(Self::Templates),
            "template-parts" => Ok(Self::TemplateParts),
            "synced-patterns" => Ok(Self::SyncedPatterns),
            _ => anyhow::bail!(
                "Invalid kind '{s}'. Use: patterns, templates, template-parts, or synced-patterns"
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Slugged
// ---------------------------------------------------------------------------

/// Identity-by-slug, the one seam the reconciler needs.
///
/// Implemented by all four item records so a single generic merge replaces
/// four duplicated per-kind code paths.
pub trait Slugged {
    /// The item's unique key within its collection.
    fn slug(&self) -> &Slug;
}

// ---------------------------------------------------------------------------
// Item records
// ---------------------------------------------------------------------------

/// A generic block pattern.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Pattern {
    /// Unique key within the patterns collection.
    pub slug: Slug,
    /// Human-readable title.
    pub title: String,
    /// Optional one-line description.
    #[serde(default)]
    pub description: String,
    /// Category tags. The import boundary fills in `["layout"]` when absent.
    #[serde(default)]
    pub categories: Vec<Slug>,
    /// Opaque markup payload.
    pub content: String,
}

/// A full page template.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Template {
    pub slug: Slug,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub content: String,
}

/// A reusable template part.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplatePart {
    pub slug: Slug,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Layout area label (e.g. `header`, `footer`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<Slug>,
    pub content: String,
}

/// A synced pattern.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyncedPattern {
    pub slug: Slug,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub content: String,
}

impl Slugged for Pattern {
    fn slug(&self) -> &Slug {
        &self.slug
    }
}

impl Slugged for Template {
    fn slug(&self) -> &Slug {
        &self.slug
    }
}

impl Slugged for TemplatePart {
    fn slug(&self) -> &Slug {
        &self.slug
    }
}

impl Slugged for SyncedPattern {
    fn slug(&self) -> &Slug {
        &self.slug
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
