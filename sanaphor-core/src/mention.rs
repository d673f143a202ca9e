//! Mentions and cluster identifiers.
//!
//! A [`Mention`] is one textual span produced by an upstream coreference
//! system, annotated with the evidence sanaphor uses to refine clusters:
//! a named-entity tag and an optional linked entity.
//!
//! # Example
//!
//! ```rust
//! use sanaphor_core::Mention;
//!
//! let paris = Mention::new("1", "Paris", 0, 3, 4)
//!     .with_head_pos("NNP")
//!     .with_ner_tag("LOC")
//!     .with_entity("http://dbpedia.org/resource/Paris", "Paris");
//!
//! assert!(paris.has_semantics());
//! assert!(paris.is_nominal());
//! assert_eq!(paris.head_lemma, "paris");
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Head part-of-speech tags that make a mention nominal.
pub const NOMINAL_POS_TAGS: &[&str] = &["NN", "NNS", "NNP"];

/// Closed-class words that are always routed to the non-nominal groups.
pub const CLOSED_CLASS_WORDS: &[&str] = &["my", "mine", "i", "he", "theirs", "you", "itself"];

/// The tagger's "no entity" category. Never stored on a mention.
pub const OTHER_NER_TAG: &str = "O";

// =============================================================================
// ClusterId
// =============================================================================

/// Identifier of a coreference cluster.
///
/// Ids arrive as strings. They are ordered numerically when both sides parse
/// as integers, so `"2" < "10"`; non-numeric ids sort after numeric ones and
/// compare lexicographically among themselves. The same ordering picks the
/// surviving cluster of a merge and the id of a newly split cluster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterId(String);

impl ClusterId {
    /// Create an id from its raw string form.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The id as an integer, if it is one.
    #[must_use]
    pub fn as_number(&self) -> Option<i64> {
        self.0.trim().parse().ok()
    }

    /// Whether the id is empty (a cluster that has not received a mention yet).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Ord for ClusterId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.as_number(), other.as_number()) {
            // Tie-break on the raw string so that "02" and "2" stay distinct.
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for ClusterId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClusterId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ClusterId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// =============================================================================
// Mention
// =============================================================================

/// One textual occurrence of a referring expression.
///
/// Mentions are built once from an input row. The only field that changes
/// afterwards is `coref_cluster_id`, overwritten when the mention moves to
/// another cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mention {
    /// Upstream mention id.
    pub mention_id: String,
    /// Sentence index within the document part.
    pub sent_id: usize,
    /// Start token offset (inclusive).
    pub start: usize,
    /// End token offset (exclusive).
    pub end: usize,
    /// Surface string.
    pub text: String,
    /// Surface string of the linked named entity, used for word-overlap checks.
    pub ner_entity: String,
    /// Original head word, case preserved.
    pub head_word: String,
    /// Grouping key: the surface string lowercased.
    pub head_lemma: String,
    /// Part-of-speech tag of the head word.
    pub head_pos: String,
    /// Part-of-speech tags of the whole span, space separated.
    pub pos_seq: String,
    /// Named-entity tag. `None` when the tagger said "other".
    pub ner_tag: Option<String>,
    /// Id of the cluster that currently owns this mention.
    pub coref_cluster_id: ClusterId,
    /// Gold cluster id. `None` for mentions without a gold label.
    pub gold_coref_id: Option<String>,
    /// Linked entity identifier (URL).
    pub entity_url: Option<String>,
    /// Coarse entity type, e.g. `<dbpedia:Place>`. Only set with `entity_url`.
    pub entity_type: Option<String>,
}

impl Mention {
    /// Create a mention with the given id, surface text and position.
    ///
    /// The head word defaults to the surface text and the head POS to `NN`,
    /// so a bare mention is nominal unless its text says otherwise.
    #[must_use]
    pub fn new(
        mention_id: impl Into<String>,
        text: impl Into<String>,
        sent_id: usize,
        start: usize,
        end: usize,
    ) -> Self {
        let text = text.into();
        Self {
            mention_id: mention_id.into(),
            sent_id,
            start,
            end,
            head_lemma: text.to_lowercase(),
            head_word: text.clone(),
            text,
            ner_entity: String::new(),
            head_pos: "NN".to_string(),
            pos_seq: String::new(),
            ner_tag: None,
            coref_cluster_id: ClusterId::default(),
            gold_coref_id: None,
            entity_url: None,
            entity_type: None,
        }
    }

    /// Set the head part-of-speech tag.
    #[must_use]
    pub fn with_head_pos(mut self, pos: impl Into<String>) -> Self {
        self.head_pos = pos.into();
        self
    }

    /// Set the original head word.
    #[must_use]
    pub fn with_head_word(mut self, word: impl Into<String>) -> Self {
        self.head_word = word.into();
        self
    }

    /// Set the named-entity tag. The "other" tag `O` is stored as `None`.
    #[must_use]
    pub fn with_ner_tag(mut self, tag: impl AsRef<str>) -> Self {
        self.ner_tag = normalize_ner_tag(tag.as_ref());
        self
    }

    /// Set the linked entity and the surface string it was linked from.
    #[must_use]
    pub fn with_entity(mut self, url: impl Into<String>, surface: impl Into<String>) -> Self {
        self.entity_url = Some(url.into());
        self.ner_entity = surface.into();
        self
    }

    /// Set the coarse entity type.
    #[must_use]
    pub fn with_entity_type(mut self, entity_type: impl Into<String>) -> Self {
        self.entity_type = Some(entity_type.into());
        self
    }

    /// Set the upstream cluster id.
    #[must_use]
    pub fn with_cluster(mut self, id: impl Into<ClusterId>) -> Self {
        self.coref_cluster_id = id.into();
        self
    }

    /// Set the gold cluster id.
    #[must_use]
    pub fn with_gold(mut self, gold: impl Into<String>) -> Self {
        self.gold_coref_id = Some(gold.into());
        self
    }

    /// True iff a linked identifier or a named-entity tag is present.
    #[must_use]
    pub fn has_semantics(&self) -> bool {
        self.entity_url.is_some() || self.ner_tag.is_some()
    }

    /// True iff the mention carries a gold label.
    #[must_use]
    pub fn is_labeled(&self) -> bool {
        self.gold_coref_id.is_some()
    }

    /// Whether the mention belongs in a cluster's nominal groups.
    ///
    /// Non-nominal are: heads that are not common/proper nouns, the
    /// closed-class words in [`CLOSED_CLASS_WORDS`], and all-caps head words.
    #[must_use]
    pub fn is_nominal(&self) -> bool {
        NOMINAL_POS_TAGS.contains(&self.head_pos.as_str())
            && !CLOSED_CLASS_WORDS.contains(&self.text.to_lowercase().as_str())
            && !is_all_upper(&self.head_word)
    }

    /// Lowercased whitespace tokens of the linked-entity surface string.
    pub fn entity_words(&self) -> impl Iterator<Item = String> + '_ {
        self.ner_entity.split_whitespace().map(str::to_lowercase)
    }
}

impl fmt::Display for Mention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}\" [s{} {}-{})",
            self.text, self.sent_id, self.start, self.end
        )
    }
}

/// Map a raw tagger output to an optional tag.
#[must_use]
pub fn normalize_ner_tag(tag: &str) -> Option<String> {
    let tag = tag.trim();
    if tag.is_empty() || tag == OTHER_NER_TAG {
        None
    } else {
        Some(tag.to_string())
    }
}

/// Coarse entity type from a whitespace-separated type list.
///
/// Takes the first type, keeps the segment after its last `/` and renders it
/// as `<dbpedia:Name>`. Types without a `/` yield `None`.
///
/// ```rust
/// use sanaphor_core::mention::coarse_entity_type;
///
/// assert_eq!(
///     coarse_entity_type("http://dbpedia.org/ontology/Place http://dbpedia.org/ontology/City"),
///     Some("<dbpedia:Place>".to_string())
/// );
/// assert_eq!(coarse_entity_type(""), None);
/// ```
#[must_use]
pub fn coarse_entity_type(types: &str) -> Option<String> {
    let first = types.split_whitespace().next()?;
    let first = first.trim_start_matches('<').trim_end_matches('>');
    let (_, name) = first.rsplit_once('/')?;
    Some(format!("<dbpedia:{}>", name))
}

/// At least one cased character and no lower-case character.
fn is_all_upper(s: &str) -> bool {
    s.chars().any(char::is_uppercase) && !s.chars().any(char::is_lowercase)
}
