//! Slug-keyed collection reconciliation.
//!
//! One generic merge step replaces the four per-kind import paths. Given the
//! stored collection and an incoming one, [`reconcile`] produces the merged
//! collection plus a [`ReconcileReport`] saying which duplicate slugs were
//! skipped or overwritten:
//!
//! ```text
//! existing: [hero(old), cta]         incoming: [hero(new), banner]
//!
//! Skip:      merged = [hero(old), cta, banner]   skipped     = [hero]
//! Overwrite: merged = [hero(new), cta, banner]   overwritten = [hero]
//! ```
//!
//! The merge is pure and total: no I/O, no error states. Inputs must each be
//! internally slug-unique — the import boundary in [`crate::bundle`] upholds
//! that before anything reaches this module.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::item::Slugged;
use crate::model::slug::Slug;

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Duplicate-slug resolution policy, chosen once per import and applied
/// uniformly across all four collections.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Keep the existing item; record the incoming slug as skipped.
    #[default]
    Skip,
    /// Replace the existing item in place; record the slug as overwritten.
    Overwrite,
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::Overwrite => write!(f, "overwrite"),
        }
    }
}

impl FromStr for Policy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "overwrite" => Ok(Self::Overwrite),
            _ => anyhow::bail!("Invalid policy '{s}'. Use: skip or overwrite"),
        }
    }
}

// ---------------------------------------------------------------------------
// ReconcileReport
// ---------------------------------------------------------------------------

/// The outcome classification of one merge.
///
/// A slug appears in at most one of `skipped` / `overwritten`, never both —
/// which list it lands in is decided entirely by the policy, and the policy
/// is fixed for the whole merge.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// Slugs that already existed and were kept (Skip mode), in incoming order.
    pub skipped: Vec<Slug>,
    /// Slugs that already existed and were replaced (Overwrite mode), in
    /// incoming order.
    pub overwritten: Vec<Slug>,
}

impl ReconcileReport {
    /// Returns `true` if no duplicates were encountered.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.overwritten.is_empty()
    }

    /// Display-only copy: dedupe each list by slug (keeping first occurrence)
    /// and cap it at `limit` entries. Never affects the merged collection.
    #[must_use]
    pub fn truncated(&self, limit: usize) -> Self {
        Self {
            skipped: dedupe_capped(&self.skipped, limit),
            overwritten: dedupe_capped(&self.overwritten, limit),
        }
    }
}

fn dedupe_capped(slugs: &[Slug], limit: usize) -> Vec<Slug> {
    let mut seen = std::collections::BTreeSet::new();
    slugs
        .iter()
        .filter(|s| seen.insert((*s).clone()))
        .take(limit)
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// reconcile
// ---------------------------------------------------------------------------

/// Merge `incoming` into `existing` by slug under `policy`.
///
/// - A slug not present in `existing` is appended, preserving incoming order.
/// - A duplicate slug is kept (`Skip`) or replaced in place (`Overwrite`) —
///   untouched existing items are never removed or reordered, and an
///   overwritten item keeps the original entry's position.
///
/// Duplicate slugs *within* one input are a caller precondition; behavior for
/// such inputs is unspecified.
pub fn reconcile<T: Slugged>(
    existing: Vec<T>,
    incoming: Vec<T>,
    policy: Policy,
) -> (Vec<T>, ReconcileReport) {
    let mut merged = existing;
    let mut index: BTreeMap<Slug, usize> = merged
        .iter()
        .enumerate()
        .map(|(pos, item)| (item.slug().clone(), pos))
        .collect();
    let mut report = ReconcileReport::default();

    for item in incoming {
        match index.get(item.slug()) {
            None => {
                index.insert(item.slug().clone(), merged.len());
                merged.push(item);
            }
            Some(&pos) => match policy {
                Policy::Skip => report.skipped.push(item.slug().clone()),
                Policy::Overwrite => {
                    report.overwritten.push(item.slug().clone());
                    merged[pos] = item;
                }
            },
        }
    }

    (merged, report)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
