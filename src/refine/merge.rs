//! Merging clusters that point at the same linked entity.

use crate::eval::Evaluator;
use sanaphor_core::{ClusterId, CorefCluster, Document};
use std::collections::BTreeSet;

// =============================================================================
// EntityIndex
// =============================================================================

/// Linked entity → ids of the clusters that mention it.
///
/// Entities keep the order in which they were first seen; the ids of one
/// entity are kept sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityIndex {
    entries: Vec<(String, BTreeSet<ClusterId>)>,
}

impl EntityIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate an entity with a cluster id.
    pub fn insert(&mut self, url: &str, id: ClusterId) {
        match self.entries.iter_mut().find(|(u, _)| u == url) {
            Some((_, ids)) => {
                ids.insert(id);
            }
            None => self.entries.push((url.to_string(), BTreeSet::from([id]))),
        }
    }

    /// Record every linked nominal mention of `cluster`.
    ///
    /// Conjunction clusters ([`CorefCluster::is_and`]) contribute nothing.
    pub fn record_cluster(&mut self, cluster: &CorefCluster) {
        if cluster.is_and() {
            return;
        }
        for mention in cluster.nominal_mentions() {
            if let Some(url) = &mention.entity_url {
                self.insert(url, cluster.id().clone());
            }
        }
    }

    /// Cluster ids recorded for an entity.
    #[must_use]
    pub fn get(&self, url: &str) -> Option<&BTreeSet<ClusterId>> {
        self.entries.iter().find(|(u, _)| u == url).map(|(_, ids)| ids)
    }

    /// Entities shared by two or more clusters, in first-seen order.
    pub fn collisions(&self) -> impl Iterator<Item = (&str, &BTreeSet<ClusterId>)> {
        self.entries
            .iter()
            .filter(|(_, ids)| ids.len() > 1)
            .map(|(url, ids)| (url.as_str(), ids))
    }

    /// Number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entity was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Merging
// =============================================================================

/// The outcome of one entity collision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Merge {
    /// The cluster everything was folded into.
    pub survivor: ClusterId,
    /// How many clusters were folded in.
    pub folded: usize,
    /// Pairwise scores of the implicated clusters before merging.
    pub before: Evaluator,
    /// Pairwise scores of the survivor after merging.
    pub after: Evaluator,
}

/// Merge the clusters `ids` of `doc` into the one with the smallest id.
///
/// Ids that are no longer in the document (folded by an earlier merge, or
/// emptied by a split) are skipped. Returns `None` for fewer than two ids.
pub fn merge_clusters(doc: &mut Document, ids: &BTreeSet<ClusterId>) -> Option<Merge> {
    if ids.len() < 2 {
        return None;
    }
    let survivor = ids.iter().min()?.clone();

    let mut before = Evaluator::default();
    before.score_mentions(
        ids.iter()
            .filter_map(|id| doc.get(id))
            .flat_map(CorefCluster::mentions)
            .map(|m| (m, m.coref_cluster_id.clone())),
    );

    let mut folded = 0;
    for id in ids.iter().filter(|id| **id != survivor) {
        match doc.remove(id) {
            Some(cluster) => {
                doc.get_or_insert(&survivor).add_cluster(cluster);
                folded += 1;
            }
            None => log::debug!("cluster {} already merged away, skipping", id),
        }
    }

    let mut after = Evaluator::default();
    if let Some(cluster) = doc.get(&survivor) {
        after.score_mentions(cluster.mentions().into_iter().map(|m| (m, ())));
    }

    Some(Merge {
        survivor,
        folded,
        before,
        after,
    })
}

/// Resolve every collision of `index` within `doc`.
pub fn merge_document(doc: &mut Document, index: &EntityIndex) -> Vec<Merge> {
    let mut merges = Vec::new();
    for (url, ids) in index.collisions() {
        if let Some(merge) = merge_clusters(doc, ids) {
            log::debug!(
                "{}: {} shared by {} clusters, {} folded into {}",
                doc.key(),
                url,
                ids.len(),
                merge.folded,
                merge.survivor
            );
            merges.push(merge);
        }
    }
    merges
}
