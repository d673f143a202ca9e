//! Splitting clusters whose mentions carry incompatible entity evidence.
//!
//! The split engine walks a cluster's mentions in document order and builds
//! candidate sub-clusters. Mentions stay with the most recent sub-cluster
//! until NER or entity-linking evidence says they cannot: a mention with a
//! known tag or linked entity joins the newest sub-cluster that agrees with
//! it, and starts a new one when none does.
//!
//! # Example
//!
//! ```rust
//! use sanaphor::refine::split::split_cluster;
//! use sanaphor::{CorefCluster, Mention};
//!
//! let mut cluster = CorefCluster::new("4");
//! let rows = [("1", "Smith", "PERSON"), ("2", "John", "PERSON"), ("3", "Acme", "ORG")];
//! for (id, text, tag) in rows {
//!     let start: usize = id.parse().unwrap();
//!     cluster.add_mention(
//!         Mention::new(id, text, 0, start, start + 1)
//!             .with_head_pos("NNP")
//!             .with_ner_tag(tag)
//!             .with_cluster("4"),
//!     );
//! }
//!
//! let split = split_cluster(&cluster).expect("PERSON and ORG disagree");
//! assert_eq!(split.parts.len(), 2);
//! ```

use crate::eval::Evaluator;
use sanaphor_core::{CorefCluster, Mention};
use std::collections::HashSet;

/// Words every cluster is assumed to contain for the overlap check.
const OVERLAP_STOP_WORDS: &[&str] = &["the", "a"];

/// A split decision for one cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    /// The sub-clusters, in creation order. Always two or more.
    pub parts: Vec<CorefCluster>,
    /// Pairwise scores of the unsplit cluster.
    pub before: Evaluator,
    /// Pairwise scores of the partition.
    pub after: Evaluator,
}

impl Split {
    /// Head lemmas of every nominal group across the parts.
    pub fn head_lemmas(&self) -> impl Iterator<Item = &str> {
        self.parts
            .iter()
            .flat_map(|p| p.nominal_groups().map(|g| g.head_lemma()))
    }
}

/// Decide whether `cluster` must be split.
///
/// Returns `None` when every mention fits in one sub-cluster. Callers only
/// pass clusters without non-nominal groups; the engine itself does not check.
#[must_use]
pub fn split_cluster(cluster: &CorefCluster) -> Option<Split> {
    let mentions = cluster.mentions();
    let mut parts = vec![CorefCluster::default()];

    for mention in &mentions {
        let current = parts.len() - 1;
        if !mention.has_semantics() || parts[current].ner_tag().is_none() {
            parts[current].add_mention((*mention).clone());
            continue;
        }

        let target = (0..parts.len())
            .rev()
            .find(|&idx| accepts(mention, &mut parts[idx]));
        match target {
            Some(idx) => parts[idx].add_mention((*mention).clone()),
            None => {
                let mut part = CorefCluster::default();
                part.add_mention((*mention).clone());
                parts.push(part);
            }
        }
    }

    if parts.len() < 2 {
        return None;
    }

    let mut before = Evaluator::default();
    before.score_mentions(mentions.iter().map(|m| (*m, 0usize)));

    let mut after = Evaluator::default();
    after.score_mentions(
        parts
            .iter()
            .enumerate()
            .flat_map(|(i, part)| part.mentions().into_iter().map(move |m| (m, i + 1))),
    );

    log::debug!(
        "split cluster {} into {} parts ({} mentions)",
        cluster.id(),
        parts.len(),
        mentions.len()
    );

    Some(Split {
        parts,
        before,
        after,
    })
}

/// Whether `part` takes `mention`, in priority order: same NER tag, same
/// linked entity, word-overlap compatible linked entity.
///
/// The overlap check may overwrite `part`'s cached entity URL.
fn accepts(mention: &Mention, part: &mut CorefCluster) -> bool {
    if let Some(tag) = mention.ner_tag.as_deref() {
        if part.ner_tag() == Some(tag) {
            return true;
        }
    }
    let (Some(url), Some(part_url)) = (mention.entity_url.as_deref(), part.entity_url()) else {
        return false;
    };
    if url == part_url {
        return true;
    }
    is_url_compatible(mention, part)
}

/// Word-overlap compatibility of a mention's linked surface with a cluster.
///
/// Cluster words are the lowercased tokens of every cluster mention's
/// linked-entity surface plus `the` and `a`. The mention is compatible when
/// its own surface tokens are all cluster words.
///
/// Mutates `cluster`: when the mention's tokens also cover every cluster word,
/// stop words included, the mention is at least as specific and its entity
/// URL replaces the cluster's cached one.
///
/// ```rust
/// use sanaphor::refine::split::is_url_compatible;
/// use sanaphor::{CorefCluster, Mention};
///
/// let mut cluster = CorefCluster::new("1");
/// cluster.add_mention(
///     Mention::new("1", "administration", 0, 0, 3)
///         .with_cluster("1")
///         .with_entity("urn:admin", "the Obama administration"),
/// );
///
/// let obama = Mention::new("2", "Obama", 1, 0, 1).with_entity("urn:obama", "Obama");
/// assert!(is_url_compatible(&obama, &mut cluster));
/// assert_eq!(cluster.entity_url(), Some("urn:admin"));
/// ```
pub fn is_url_compatible(mention: &Mention, cluster: &mut CorefCluster) -> bool {
    let cluster_words: HashSet<String> = cluster
        .mentions()
        .iter()
        .flat_map(|m| m.entity_words())
        .chain(OVERLAP_STOP_WORDS.iter().map(|w| (*w).to_string()))
        .collect();
    let mention_words: HashSet<String> = mention.entity_words().collect();

    if !cluster_words.is_superset(&mention_words) {
        return false;
    }

    if mention_words.is_superset(&cluster_words) {
        cluster.set_entity_url(mention.entity_url.clone());
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mention(id: &str, text: &str, start: usize) -> Mention {
        Mention::new(id, text, 0, start, start + 1)
            .with_head_pos("NNP")
            .with_cluster("4")
            .with_gold("g")
    }

    fn cluster_of(mentions: Vec<Mention>) -> CorefCluster {
        let mut cluster = CorefCluster::new("4");
        for m in mentions {
            cluster.add_mention(m);
        }
        cluster
    }

    #[test]
    fn test_person_person_org_splits_in_two() {
        let cluster = cluster_of(vec![
            mention("1", "John", 1).with_ner_tag("PERSON"),
            mention("2", "Smith", 2).with_ner_tag("PERSON"),
            mention("3", "Acme", 3).with_ner_tag("ORG"),
        ]);

        let split = split_cluster(&cluster).unwrap();
        assert_eq!(split.parts.len(), 2);

        let first: Vec<&str> = split.parts[0].mentions().iter().map(|m| m.text.as_str()).collect();
        let second: Vec<&str> = split.parts[1].mentions().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(first, vec!["John", "Smith"]);
        assert_eq!(second, vec!["Acme"]);

        let lemmas: Vec<&str> = split.head_lemmas().collect();
        assert_eq!(lemmas, vec!["john", "smith", "acme"]);
    }

    #[test]
    fn test_split_scores() {
        let cluster = cluster_of(vec![
            mention("1", "John", 1).with_ner_tag("PERSON").with_gold("a"),
            mention("2", "Smith", 2).with_ner_tag("PERSON").with_gold("a"),
            mention("3", "Acme", 3).with_ner_tag("ORG").with_gold("b"),
        ]);
        let split = split_cluster(&cluster).unwrap();

        // Unsplit: everything together
        assert_eq!(split.before.true_positives, 1);
        assert_eq!(split.before.false_positives, 2);
        // Split: exactly the gold partition
        assert_eq!(split.after.true_positives, 1);
        assert_eq!(split.after.true_negatives, 2);
        assert_eq!(split.after.false_positives, 0);
    }

    #[test]
    fn test_consistent_cluster_not_split() {
        let cluster = cluster_of(vec![
            mention("1", "Paris", 1).with_ner_tag("LOC").with_entity("X", "Paris"),
            mention("2", "city", 2),
            mention("3", "France", 3).with_ner_tag("LOC").with_entity("X", "France"),
        ]);
        assert!(split_cluster(&cluster).is_none());
    }

    #[test]
    fn test_untagged_current_absorbs_mentions() {
        // The current part has no tag, so evidence cannot force a split.
        let cluster = cluster_of(vec![
            mention("1", "Paris", 1),
            mention("2", "Acme", 2).with_ner_tag("ORG"),
        ]);
        // After "Acme" the part's tag is ORG; nothing else follows.
        assert!(split_cluster(&cluster).is_none());
    }

    #[test]
    fn test_returns_to_older_part() {
        let cluster = cluster_of(vec![
            mention("1", "John", 1).with_ner_tag("PERSON"),
            mention("2", "Acme", 2).with_ner_tag("ORG"),
            mention("3", "Smith", 3).with_ner_tag("PERSON"),
        ]);
        let split = split_cluster(&cluster).unwrap();
        assert_eq!(split.parts.len(), 2);
        assert_eq!(split.parts[0].mentions().len(), 2);
        assert_eq!(split.parts[1].mentions().len(), 1);
    }

    #[test]
    fn test_same_url_joins_despite_tag() {
        let cluster = cluster_of(vec![
            mention("1", "Apple", 1).with_ner_tag("ORG").with_entity("urn:apple", "Apple"),
            mention("2", "Apple", 2).with_ner_tag("MISC").with_entity("urn:apple", "Apple"),
        ]);
        assert!(split_cluster(&cluster).is_none());
    }

    #[test]
    fn test_compatible_url_joins() {
        let cluster = cluster_of(vec![
            mention("1", "administration", 1)
                .with_ner_tag("ORG")
                .with_entity("urn:admin", "the Obama administration"),
            mention("2", "Obama", 2)
                .with_ner_tag("PERSON")
                .with_entity("urn:obama", "Obama"),
        ]);
        assert!(split_cluster(&cluster).is_none());
    }

    #[test]
    fn test_incompatible_url_splits() {
        let cluster = cluster_of(vec![
            mention("1", "Paris", 1).with_ner_tag("LOC").with_entity("urn:paris", "Paris"),
            mention("2", "Hilton", 2)
                .with_ner_tag("PERSON")
                .with_entity("urn:hilton", "Paris Hilton"),
        ]);
        let split = split_cluster(&cluster).unwrap();
        assert_eq!(split.parts.len(), 2);
    }

    #[test]
    fn test_url_compatible_subset_keeps_cached_url() {
        let mut cluster = cluster_of(vec![mention("1", "administration", 1)
            .with_entity("urn:admin", "the Obama administration")]);
        let obama = mention("2", "Obama", 2).with_entity("urn:obama", "Obama");

        assert!(is_url_compatible(&obama, &mut cluster));
        assert_eq!(cluster.entity_url(), Some("urn:admin"));
    }

    #[test]
    fn test_url_compatible_superset_overwrites_cached_url() {
        let mut cluster = cluster_of(vec![
            mention("1", "speech", 1).with_entity("urn:speech", "Obama speech"),
        ]);
        let full = mention("2", "speech", 2).with_entity("urn:full", "a speech the Obama");

        assert!(is_url_compatible(&full, &mut cluster));
        assert_eq!(cluster.entity_url(), Some("urn:full"));
    }

    #[test]
    fn test_url_compatible_same_words_without_stop_words_keeps_cached_url() {
        let mut cluster = cluster_of(vec![
            mention("1", "speech", 1).with_entity("urn:speech", "Obama speech"),
        ]);
        let same = mention("2", "speech", 2).with_entity("urn:other", "the Obama speech");

        assert!(is_url_compatible(&same, &mut cluster));
        assert_eq!(cluster.entity_url(), Some("urn:speech"));
    }

    #[test]
    fn test_url_compatible_empty_surface_keeps_cached_url() {
        let mut cluster = cluster_of(vec![mention("1", "Paris", 1).with_entity("urn:paris", "")]);
        let bare = mention("2", "Hilton", 2).with_entity("urn:hilton", "");

        assert!(is_url_compatible(&bare, &mut cluster));
        assert_eq!(cluster.entity_url(), Some("urn:paris"));
    }

    #[test]
    fn test_url_incompatible_leaves_cluster_alone() {
        let mut cluster =
            cluster_of(vec![mention("1", "Obama", 1).with_entity("urn:obama", "Obama")]);
        let other = mention("2", "speech", 2).with_entity("urn:speech", "Barack Obama speech");

        assert!(!is_url_compatible(&other, &mut cluster));
        assert_eq!(cluster.entity_url(), Some("urn:obama"));
    }

    #[test]
    fn test_split_parts_keep_original_cluster_id() {
        let cluster = cluster_of(vec![
            mention("1", "John", 1).with_ner_tag("PERSON"),
            mention("2", "Acme", 2).with_ner_tag("ORG"),
        ]);
        let split = split_cluster(&cluster).unwrap();
        for part in &split.parts {
            assert_eq!(part.id().as_str(), "4");
            assert!(part.ids_consistent());
        }
    }
}
