//! The import operation: decode, validate, reconcile, persist, summarize.
//!
//! One import is a pure function of (stored snapshot, payload, policy): the
//! library is loaded once, each of the four collections is reconciled in
//! memory, and the merged result is saved once. The summary reports, per
//! collection, how many items came in, how many were dropped by validation,
//! how many were added, and which duplicate slugs were skipped or
//! overwritten — with the displayed slug lists capped at `report_limit`.

use serde::Serialize;
use tracing::info;

use crate::bundle::{self, DroppedCounts};
use crate::error::PirepeError;
use crate::model::item::{ItemKind, Slugged};
use crate::model::library::Library;
use crate::model::slug::Slug;
use crate::reconcile::{Policy, ReconcileReport, reconcile};
use crate::store::LibraryStore;

// ---------------------------------------------------------------------------
// ImportSummary
// ---------------------------------------------------------------------------

/// Per-import change report, serializable for `--format json`.
#[derive(Clone, Debug, Serialize)]
pub struct ImportSummary {
    /// The policy applied to every collection.
    pub policy: Policy,
    /// One entry per collection kind, in bundle-document order.
    pub collections: Vec<KindSummary>,
}

/// The outcome for one collection.
#[derive(Clone, Debug, Serialize)]
pub struct KindSummary {
    pub kind: ItemKind,
    /// Valid incoming items (after boundary validation).
    pub incoming: usize,
    /// Incoming items dropped by validation.
    pub dropped: usize,
    /// New items appended to the collection.
    pub added: usize,
    /// Total duplicates kept as-is (Skip mode).
    pub skipped_total: usize,
    /// Total duplicates replaced (Overwrite mode).
    pub overwritten_total: usize,
    /// Skipped slugs, deduplicated and capped for display.
    pub skipped: Vec<Slug>,
    /// Overwritten slugs, deduplicated and capped for display.
    pub overwritten: Vec<Slug>,
}

impl KindSummary {
    fn new(
        kind: ItemKind,
        incoming: usize,
        dropped: usize,
        added: usize,
        report: &ReconcileReport,
        report_limit: usize,
    ) -> Self {
        let shown = report.truncated(report_limit);
        Self {
            kind,
            incoming,
            dropped,
            added,
            skipped_total: report.skipped.len(),
            overwritten_total: report.overwritten.len(),
            skipped: shown.skipped,
            overwritten: shown.overwritten,
        }
    }
}

impl ImportSummary {
    /// Total new items across all collections.
    #[must_use]
    pub fn total_added(&self) -> usize {
        self.collections.iter().map(|c| c.added).sum()
    }

    /// Total duplicates encountered (skipped + overwritten).
    #[must_use]
    pub fn total_duplicates(&self) -> usize {
        self.collections
            .iter()
            .map(|c| c.skipped_total + c.overwritten_total)
            .sum()
    }

    /// Total items dropped by validation.
    #[must_use]
    pub fn total_dropped(&self) -> usize {
        self.collections.iter().map(|c| c.dropped).sum()
    }
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

/// Import `payload` into the store under `policy`.
///
/// # Errors
/// Returns [`PirepeError::InvalidBundle`] for undecodable or empty payloads,
/// and store errors from the load/save snapshot.
pub fn run(
    store: &dyn LibraryStore,
    payload: &[u8],
    policy: Policy,
    report_limit: usize,
) -> Result<ImportSummary, PirepeError> {
    let (incoming, dropped) = bundle::decode(payload)?.sanitize();
    let existing = store.load()?;

    let (merged, summary) = merge_libraries(existing, incoming, dropped, policy, report_limit);
    store.save(&merged)?;

    info!(
        %policy,
        added = summary.total_added(),
        duplicates = summary.total_duplicates(),
        dropped = summary.total_dropped(),
        "import complete"
    );
    Ok(summary)
}

/// Reconcile all four collections of `incoming` into `existing`.
///
/// Pure — the store interaction stays in [`run`].
fn merge_libraries(
    existing: Library,
    incoming: Library,
    dropped: DroppedCounts,
    policy: Policy,
    report_limit: usize,
) -> (Library, ImportSummary) {
    let mut collections = Vec::with_capacity(ItemKind::ALL.len());

    let (patterns, summary) = merge_kind(
        ItemKind::Patterns,
        existing.patterns,
        incoming.patterns,
        dropped.get(ItemKind::Patterns),
        policy,
        report_limit,
    );
    collections.push(summary);

    let (templates, summary) = merge_kind(
        ItemKind::Templates,
        existing.templates,
        incoming.templates,
        dropped.get(ItemKind::Templates),
        policy,
        report_limit,
    );
    collections.push(summary);

    let (template_parts, summary) = merge_kind(
        ItemKind::TemplateParts,
        existing.template_parts,
        incoming.template_parts,
        dropped.get(ItemKind::TemplateParts),
        policy,
        report_limit,
    );
    collections.push(summary);

    let (synced_patterns, summary) = merge_kind(
        ItemKind::SyncedPatterns,
        existing.synced_patterns,
        incoming.synced_patterns,
        dropped.get(ItemKind::SyncedPatterns),
        policy,
        report_limit,
    );
    collections.push(summary);

    let merged = Library {
        patterns,
        templates,
        template_parts,
        synced_patterns,
    };
    (merged, ImportSummary { policy, collections })
}

fn merge_kind<T: Slugged>(
    kind: ItemKind,
    existing: Vec<T>,
    incoming: Vec<T>,
    dropped: usize,
    policy: Policy,
    report_limit: usize,
) -> (Vec<T>, KindSummary) {
    let incoming_count = incoming.len();
    let before = existing.len();
    let (merged, report) = reconcile(existing, incoming, policy);
    let added = merged.len() - before;
    let summary = KindSummary::new(kind, incoming_count, dropped, added, &report, report_limit);
    (merged, summary)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
