//! Cluster refinement: split, then merge, scoring both.
//!
//! For each document the orchestrator:
//!
//! 1. visits every cluster in order, recording which linked entities it
//!    mentions and, for clusters without non-nominal groups, asking the
//!    [split engine](split) whether the cluster must be partitioned;
//! 2. turns every queued split into new clusters, one per part, each named
//!    after the smallest mention id it holds;
//! 3. asks the [merge engine](merge) to unify clusters that share a linked
//!    entity.
//!
//! Scores are returned in a [`RefineReport`]; nothing is kept globally.
//!
//! # Example
//!
//! ```rust
//! use sanaphor::refine::refine;
//! use sanaphor::{Document, DocumentKey, Mention};
//!
//! let mut doc = Document::new(DocumentKey::new("doc", "0"));
//! for (id, cluster, text) in [("1", "10", "Paris"), ("2", "20", "the capital")] {
//!     let start: usize = id.parse().unwrap();
//!     let m = Mention::new(id, text, 0, start, start + 1)
//!         .with_cluster(cluster)
//!         .with_ner_tag("LOC")
//!         .with_entity("X", text)
//!         .with_gold("1");
//!     doc.get_or_insert(&m.coref_cluster_id.clone()).add_mention(m);
//! }
//!
//! let (refined, report) = refine(&[doc]);
//! assert_eq!(refined[0].clusters().len(), 1);
//! assert_eq!(report.merge_after.true_positives, 1);
//! ```

pub mod merge;
pub mod split;

use crate::eval::Evaluator;
use merge::{merge_document, EntityIndex};
use sanaphor_core::{ClusterId, CorefCluster, Document};
use serde::{Deserialize, Serialize};
use split::split_cluster;
use std::fmt;
use std::ops::AddAssign;

/// Scores of every split and merge decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefineReport {
    /// Split candidates scored as left unsplit.
    pub split_before: Evaluator,
    /// Split candidates scored as split.
    pub split_after: Evaluator,
    /// Merge candidates scored as left apart.
    pub merge_before: Evaluator,
    /// Merge candidates scored as merged.
    pub merge_after: Evaluator,
    /// Number of clusters that were split.
    pub splits: usize,
    /// Number of clusters folded into another.
    pub merges: usize,
}

impl AddAssign for RefineReport {
    fn add_assign(&mut self, other: Self) {
        self.split_before += other.split_before;
        self.split_after += other.split_after;
        self.merge_before += other.merge_before;
        self.merge_after += other.merge_after;
        self.splits += other.splits;
        self.merges += other.merges;
    }
}

impl fmt::Display for RefineReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Original Split values:  {}", self.split_before)?;
        writeln!(f, "Split values:           {}", self.split_after)?;
        writeln!(f, "Original Merge values:  {}", self.merge_before)?;
        write!(f, "Merge values:           {}", self.merge_after)
    }
}

/// Refine a copy of `documents`, leaving the input untouched.
#[must_use]
pub fn refine(documents: &[Document]) -> (Vec<Document>, RefineReport) {
    let mut refined = documents.to_vec();
    let mut report = RefineReport::default();
    for doc in &mut refined {
        report += refine_document(doc);
    }
    log::info!(
        "refined {} documents: {} splits, {} clusters merged",
        refined.len(),
        report.splits,
        report.merges
    );
    (refined, report)
}

/// Refine one document in place.
pub fn refine_document(doc: &mut Document) -> RefineReport {
    let mut report = RefineReport::default();
    let mut index = EntityIndex::new();
    let mut queued: Vec<Vec<CorefCluster>> = Vec::new();

    for cluster in doc.clusters_mut() {
        index.record_cluster(cluster);
        if cluster.non_nominal_len() > 0 {
            continue;
        }
        let Some(split) = split_cluster(cluster) else {
            continue;
        };
        report.split_before += split.before;
        report.split_after += split.after;
        report.splits += 1;

        let lemmas: Vec<String> = split.head_lemmas().map(str::to_string).collect();
        for lemma in &lemmas {
            cluster.remove_group(lemma);
        }
        queued.push(split.parts);
    }

    while let Some(parts) = queued.pop() {
        for part in parts {
            materialize(doc, part);
        }
    }
    doc.retain_non_empty();

    for merge in merge_document(doc, &index) {
        report.merge_before += merge.before;
        report.merge_after += merge.after;
        report.merges += merge.folded;
    }
    report
}

/// Install a split part under the smallest mention id it holds.
///
/// An existing cluster with that id receives the part's groups.
fn materialize(doc: &mut Document, part: CorefCluster) {
    let Some(new_id) = part
        .mentions()
        .iter()
        .map(|m| ClusterId::new(m.mention_id.clone()))
        .min()
    else {
        return;
    };
    log::debug!("{}: new cluster {} from split", doc.key(), new_id);
    doc.get_or_insert(&new_id).add_cluster(part);
}
