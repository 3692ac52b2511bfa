//! Bundle document decoding and boundary validation.
//!
//! An import payload is a JSON document with up to four collection keys
//! (`patterns`, `templates`, `templateParts`, `syncedPatterns`), each an
//! array of items. Decoding is deliberately permissive — unknown item fields
//! are ignored and a bare top-level array is accepted as a patterns-only
//! bundle (older exports used that shape).
//!
//! [`RawBundle::sanitize`] is the validation boundary the reconciler relies
//! on: items missing a required field (slug, title, content) are silently
//! dropped, slugs and category/area labels are normalized, and duplicate
//! slugs within one collection are collapsed to the first occurrence. What
//! comes out is a typed, slug-unique [`Library`] ready to merge.

use std::collections::BTreeSet;

use serde::Deserialize;
use tracing::warn;

use crate::error::PirepeError;
use crate::model::item::{ItemKind, Pattern, SyncedPattern, Template, TemplatePart};
use crate::model::library::Library;
use crate::model::slug::Slug;

// ---------------------------------------------------------------------------
// RawBundle
// ---------------------------------------------------------------------------

/// An undecoded import payload: four collections of not-yet-validated items.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawBundle {
    pub patterns: Vec<RawItem>,
    pub templates: Vec<RawItem>,
    pub template_parts: Vec<RawItem>,
    pub synced_patterns: Vec<RawItem>,
}

/// One unvalidated item. Every field is optional at this layer; which ones
/// are required is decided by [`RawBundle::sanitize`]. Fields a kind does
/// not use (e.g. `area` on a pattern) are simply ignored.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawItem {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub categories: Vec<String>,
    pub area: String,
    pub content: String,
}

/// How many raw items each collection lost to validation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DroppedCounts {
    pub patterns: usize,
    pub templates: usize,
    pub template_parts: usize,
    pub synced_patterns: usize,
}

impl DroppedCounts {
    /// Dropped count for one collection kind.
    #[must_use]
    pub const fn get(&self, kind: ItemKind) -> usize {
        match kind {
            ItemKind::Patterns => self.patterns,
            ItemKind::Templates => self.templates,
            ItemKind::TemplateParts => self.template_parts,
            ItemKind::SyncedPatterns => self.synced_patterns,
        }
    }
}

// ---------------------------------------------------------------------------
// decode
// ---------------------------------------------------------------------------

/// Decode an import payload.
///
/// Accepts either the full bundle document or a bare JSON array (treated as
/// the `patterns` collection).
///
/// # Errors
/// Returns [`PirepeError::InvalidBundle`] if the payload is not valid JSON,
/// not an object/array, or contains zero items across all collections.
pub fn decode(payload: &[u8]) -> Result<RawBundle, PirepeError> {
    let invalid = |detail: String| PirepeError::InvalidBundle { detail };

    let value: serde_json::Value =
        serde_json::from_slice(payload).map_err(|e| invalid(format!("not valid JSON: {e}")))?;

    let bundle = if value.is_array() {
        // Backward compat: a flat array is a bare patterns collection.
        let patterns: Vec<RawItem> = serde_json::from_value(value)
            .map_err(|e| invalid(format!("not a pattern array: {e}")))?;
        RawBundle {
            patterns,
            ..RawBundle::default()
        }
    } else if value.is_object() {
        serde_json::from_value(value)
            .map_err(|e| invalid(format!("not a bundle document: {e}")))?
    } else {
        return Err(invalid(format!(
            "expected a JSON object or array, got {}",
            json_type_name(&value)
        )));
    };

    if bundle.item_count() == 0 {
        return Err(invalid("no items in any collection".to_owned()));
    }
    Ok(bundle)
}

const fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

// ---------------------------------------------------------------------------
// sanitize
// ---------------------------------------------------------------------------

impl RawBundle {
    /// Total raw item count across all collections.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.patterns.len()
            + self.templates.len()
            + self.template_parts.len()
            + self.synced_patterns.len()
    }

    /// Validate and normalize every item, producing a typed, slug-unique
    /// [`Library`] plus per-kind dropped counts.
    ///
    /// Dropped items never appear in any report downstream.
    #[must_use]
    pub fn sanitize(self) -> (Library, DroppedCounts) {
        let mut dropped = DroppedCounts::default();

        let (patterns, n) = sanitize_kind(self.patterns, ItemKind::Patterns, |slug, raw| {
            Pattern {
                slug,
                title: raw.title,
                description: raw.description,
                categories: sanitize_categories(&raw.categories),
                content: raw.content,
            }
        });
        dropped.patterns = n;

        let (templates, n) = sanitize_kind(self.templates, ItemKind::Templates, |slug, raw| {
            Template {
                slug,
                title: raw.title,
                description: raw.description,
                content: raw.content,
            }
        });
        dropped.templates = n;

        let (template_parts, n) =
            sanitize_kind(self.template_parts, ItemKind::TemplateParts, |slug, raw| {
                TemplatePart {
                    slug,
                    title: raw.title,
                    description: raw.description,
                    area: Slug::sanitize(&raw.area),
                    content: raw.content,
                }
            });
        dropped.template_parts = n;

        let (synced_patterns, n) =
            sanitize_kind(self.synced_patterns, ItemKind::SyncedPatterns, |slug, raw| {
                SyncedPattern {
                    slug,
                    title: raw.title,
                    description: raw.description,
                    content: raw.content,
                }
            });
        dropped.synced_patterns = n;

        let library = Library {
            patterns,
            templates,
            template_parts,
            synced_patterns,
        };
        (library, dropped)
    }
}

/// Validate one collection: required fields present, slug sanitizes,
/// first occurrence wins on duplicate slugs.
fn sanitize_kind<T>(
    raw: Vec<RawItem>,
    kind: ItemKind,
    build: impl Fn(Slug, RawItem) -> T,
) -> (Vec<T>, usize) {
    let mut out = Vec::with_capacity(raw.len());
    let mut seen: BTreeSet<Slug> = BTreeSet::new();
    let mut dropped = 0usize;

    for item in raw {
        let Some(slug) = Slug::sanitize(&item.slug) else {
            warn!(%kind, slug = %item.slug, "dropping item: slug is missing or unusable");
            dropped += 1;
            continue;
        };
        if item.title.trim().is_empty() || item.content.is_empty() {
            warn!(%kind, %slug, "dropping item: missing title or content");
            dropped += 1;
            continue;
        }
        if !seen.insert(slug.clone()) {
            warn!(%kind, %slug, "dropping item: duplicate slug in incoming collection");
            dropped += 1;
            continue;
        }
        out.push(build(slug, item));
    }

    (out, dropped)
}

/// Category bucket for patterns imported without any usable category.
const DEFAULT_PATTERN_CATEGORY: &str = "layout";

fn sanitize_categories(raw: &[String]) -> Vec<Slug> {
    let mut seen: BTreeSet<Slug> = BTreeSet::new();
    let categories: Vec<Slug> = raw
        .iter()
        .filter_map(|c| Slug::sanitize(c))
        .filter(|c| seen.insert(c.clone()))
        .collect();
    if categories.is_empty() {
        return Slug::sanitize(DEFAULT_PATTERN_CATEGORY).into_iter().collect();
    }
    categories
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
