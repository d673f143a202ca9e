//! Mention groups and coreference clusters.
//!
//! # Example
//!
//! ```rust
//! use sanaphor_core::{CorefCluster, Mention};
//!
//! let mut cluster = CorefCluster::new("10");
//! let obama = Mention::new("1", "Obama", 0, 0, 1).with_cluster("10").with_head_pos("NNP");
//! cluster.add_mention(obama);
//! cluster.add_mention(Mention::new("2", "he", 1, 0, 1).with_cluster("10").with_head_pos("PRP"));
//!
//! assert_eq!(cluster.nominal_len(), 1);
//! assert_eq!(cluster.non_nominal_len(), 1);
//! assert_eq!(cluster.mentions().len(), 2);
//! ```

use crate::mention::{ClusterId, Mention, OTHER_NER_TAG};
use serde::{Deserialize, Serialize};

// =============================================================================
// MentionGroup
// =============================================================================

/// Mentions of one cluster that share a head lemma, in insertion order.
///
/// The same mention may appear twice if it was added twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionGroup {
    head_lemma: String,
    mentions: Vec<Mention>,
}

impl MentionGroup {
    /// Create an empty group for a head lemma.
    #[must_use]
    pub fn new(head_lemma: impl Into<String>) -> Self {
        Self {
            head_lemma: head_lemma.into(),
            mentions: Vec::new(),
        }
    }

    /// The shared head lemma.
    #[must_use]
    pub fn head_lemma(&self) -> &str {
        &self.head_lemma
    }

    /// The mentions, in insertion order.
    #[must_use]
    pub fn mentions(&self) -> &[Mention] {
        &self.mentions
    }

    /// Append a mention. The group takes the mention's head lemma.
    pub fn add_mention(&mut self, mention: Mention) {
        self.head_lemma.clone_from(&mention.head_lemma);
        self.mentions.push(mention);
    }

    /// Append all mentions of another group, without deduplication.
    pub fn extend(&mut self, other: MentionGroup) {
        self.mentions.extend(other.mentions);
    }

    /// Linked identifier of the first mention that has one.
    #[must_use]
    pub fn entity_url(&self) -> Option<&str> {
        self.mentions.iter().find_map(|m| m.entity_url.as_deref())
    }

    /// Named-entity tag of the first mention whose tag is present and not "other".
    #[must_use]
    pub fn ner_tag(&self) -> Option<&str> {
        self.mentions
            .iter()
            .filter_map(|m| m.ner_tag.as_deref())
            .find(|tag| *tag != OTHER_NER_TAG)
    }

    /// Number of mentions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mentions.len()
    }

    /// Whether the group holds no mentions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mentions.is_empty()
    }

    fn reassign(&mut self, id: &ClusterId) {
        for mention in &mut self.mentions {
            mention.coref_cluster_id = id.clone();
        }
    }
}

/// Groups keyed by head lemma, kept in first-inserted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
struct GroupMap(Vec<MentionGroup>);

impl GroupMap {
    fn position(&self, head_lemma: &str) -> Option<usize> {
        self.0.iter().position(|g| g.head_lemma == head_lemma)
    }

    fn add_mention(&mut self, mention: Mention) {
        match self.position(&mention.head_lemma) {
            Some(idx) => self.0[idx].add_mention(mention),
            None => {
                let mut group = MentionGroup::new(mention.head_lemma.clone());
                group.add_mention(mention);
                self.0.push(group);
            }
        }
    }

    fn insert_or_extend(&mut self, group: MentionGroup) {
        match self.position(&group.head_lemma) {
            Some(idx) => self.0[idx].extend(group),
            None => self.0.push(group),
        }
    }

    fn remove(&mut self, head_lemma: &str) -> Option<MentionGroup> {
        self.position(head_lemma).map(|idx| self.0.remove(idx))
    }
}

// =============================================================================
// CorefCluster
// =============================================================================

/// A coreference cluster: mention groups split into nominal and non-nominal.
///
/// # Invariants
///
/// - Every mention reachable from the cluster has `coref_cluster_id == id()`.
/// - The cached `entity_url`/`ner_tag` only change through [`add_mention`]
///   on the nominal path. Adding whole groups or clusters leaves them alone.
///
/// [`add_mention`]: CorefCluster::add_mention
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorefCluster {
    id: ClusterId,
    nominal: GroupMap,
    non_nominal: GroupMap,
    entity_url: Option<String>,
    ner_tag: Option<String>,
}

impl CorefCluster {
    /// Create an empty cluster with an id.
    #[must_use]
    pub fn new(id: impl Into<ClusterId>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// The cluster id.
    #[must_use]
    pub fn id(&self) -> &ClusterId {
        &self.id
    }

    /// Cached linked identifier.
    #[must_use]
    pub fn entity_url(&self) -> Option<&str> {
        self.entity_url.as_deref()
    }

    /// Overwrite the cached linked identifier.
    pub fn set_entity_url(&mut self, url: Option<String>) {
        self.entity_url = url;
    }

    /// Cached named-entity tag.
    #[must_use]
    pub fn ner_tag(&self) -> Option<&str> {
        self.ner_tag.as_deref()
    }

    /// Add a single mention.
    ///
    /// Routes to the non-nominal groups when [`Mention::is_nominal`] is false.
    /// On the nominal path the cached entity URL is refreshed if the mention
    /// has one and the cached NER tag is always replaced, even with `None`.
    ///
    /// Side effects: the cluster takes the mention's `coref_cluster_id` as its
    /// own id, and the stored mention keeps that id.
    pub fn add_mention(&mut self, mention: Mention) {
        self.id = mention.coref_cluster_id.clone();
        if mention.is_nominal() {
            if let Some(url) = &mention.entity_url {
                self.entity_url = Some(url.clone());
            }
            self.ner_tag.clone_from(&mention.ner_tag);
            self.nominal.add_mention(mention);
        } else {
            self.non_nominal.add_mention(mention);
        }
    }

    /// Add a nominal group, reassigning its mentions to this cluster.
    ///
    /// Appends to an existing group with the same head lemma. Caches untouched.
    pub fn add_mention_group(&mut self, mut group: MentionGroup) {
        group.reassign(&self.id);
        self.nominal.insert_or_extend(group);
    }

    /// Add a non-nominal group, reassigning its mentions to this cluster.
    pub fn add_non_noun_group(&mut self, mut group: MentionGroup) {
        group.reassign(&self.id);
        self.non_nominal.insert_or_extend(group);
    }

    /// Fold another cluster in: its nominal groups, then its non-nominal ones.
    pub fn add_cluster(&mut self, other: CorefCluster) {
        for group in other.nominal.0 {
            self.add_mention_group(group);
        }
        for group in other.non_nominal.0 {
            self.add_non_noun_group(group);
        }
    }

    /// Remove the nominal group for a head lemma. Missing lemmas are ignored.
    pub fn remove_group(&mut self, head_lemma: &str) -> Option<MentionGroup> {
        self.nominal.remove(head_lemma)
    }

    /// Nominal groups in insertion order.
    pub fn nominal_groups(&self) -> impl Iterator<Item = &MentionGroup> {
        self.nominal.0.iter()
    }

    /// Non-nominal groups in insertion order.
    pub fn non_nominal_groups(&self) -> impl Iterator<Item = &MentionGroup> {
        self.non_nominal.0.iter()
    }

    /// Look up a nominal group by head lemma.
    #[must_use]
    pub fn group(&self, head_lemma: &str) -> Option<&MentionGroup> {
        self.nominal.position(head_lemma).map(|idx| &self.nominal.0[idx])
    }

    /// Number of nominal groups.
    #[must_use]
    pub fn nominal_len(&self) -> usize {
        self.nominal.0.len()
    }

    /// Number of non-nominal groups.
    #[must_use]
    pub fn non_nominal_len(&self) -> usize {
        self.non_nominal.0.len()
    }

    /// True when the cluster holds no groups at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nominal.0.is_empty() && self.non_nominal.0.is_empty()
    }

    /// Whether any mention reads like a conjunction ("Alice and Bob").
    ///
    /// Such clusters legitimately link to one entity while naming several,
    /// so they never take part in entity-based merging.
    #[must_use]
    pub fn is_and(&self) -> bool {
        self.nominal_groups()
            .chain(self.non_nominal_groups())
            .flat_map(|g| g.mentions.iter())
            .any(|m| m.text.contains(" and "))
    }

    /// All mentions, ordered by (sentence, start offset).
    ///
    /// Nominal mentions come before non-nominal ones on ties.
    #[must_use]
    pub fn mentions(&self) -> Vec<&Mention> {
        let mut all: Vec<&Mention> = self
            .nominal_groups()
            .chain(self.non_nominal_groups())
            .flat_map(|g| g.mentions.iter())
            .collect();
        all.sort_by_key(|m| (m.sent_id, m.start));
        all
    }

    /// Mentions of the nominal groups, in group order.
    pub fn nominal_mentions(&self) -> impl Iterator<Item = &Mention> {
        self.nominal_groups().flat_map(|g| g.mentions.iter())
    }

    /// Check the cluster-id invariant.
    #[must_use]
    pub fn ids_consistent(&self) -> bool {
        self.nominal_groups()
            .chain(self.non_nominal_groups())
            .flat_map(|g| g.mentions.iter())
            .all(|m| m.coref_cluster_id == self.id)
    }
}
