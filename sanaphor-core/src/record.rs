//! Named decoding of one joined input row.
//!
//! A row is the coreference-annotation columns followed by the
//! entity-linking columns:
//!
//! | # | Column | Notes |
//! |---|--------|-------|
//! | 0 | `DOC_ID` | |
//! | 1 | `PARAGRAPH_ID` | |
//! | 2 | `SENT_ID` | integer |
//! | 3 | `MENTION_ID` | |
//! | 4 | `START_INDEX` | integer |
//! | 5 | `END_INDEX` | integer, exclusive |
//! | 6 | `MENTION` | surface text |
//! | 7 | `NER_ENTITY` | linked named-entity surface |
//! | 8 | `HEAD_WORD_LEMMA` | original head word |
//! | 9 | `HEAD_POS_TAG` | |
//! | 10 | `COREF_ID` | upstream cluster id |
//! | 11 | `GOLD_COREF_ID` | `-1` when unlabeled |
//! | 12 | `NER_ENTITY_TAG` | `O` when none |
//! | 13 | `POS_TAG_SEQ` | |
//! | 14 | `ENTITY_URL` | `null` when unlinked |
//! | 15 | `ENTITY_TYPES` | optional, space separated |

use crate::document::DocumentKey;
use crate::error::{Error, Result};
use crate::mention::{coarse_entity_type, normalize_ner_tag, ClusterId, Mention};

/// Literal used for a missing linked identifier.
pub const NULL_ENTITY: &str = "null";

/// Gold id used for mentions without a gold label.
pub const UNLABELED_GOLD: &str = "-1";

/// Number of columns a row must have. The type list may be missing.
pub const REQUIRED_COLUMNS: usize = 15;

/// One input row, decoded by column name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionRecord {
    /// Document id.
    pub doc_id: String,
    /// Part id.
    pub part_id: String,
    /// Sentence index.
    pub sent_id: usize,
    /// Mention id.
    pub mention_id: String,
    /// Start token offset.
    pub start: usize,
    /// End token offset (exclusive).
    pub end: usize,
    /// Surface text.
    pub mention: String,
    /// Linked named-entity surface.
    pub ner_entity: String,
    /// Original head word.
    pub head_word: String,
    /// Head POS tag.
    pub head_pos: String,
    /// Upstream cluster id.
    pub coref_id: String,
    /// Gold cluster id, raw.
    pub gold_coref_id: String,
    /// NER tag, raw.
    pub ner_tag: String,
    /// POS sequence.
    pub pos_seq: String,
    /// Linked identifier, raw.
    pub entity_url: String,
    /// Entity types, raw.
    pub entity_types: String,
}

impl MentionRecord {
    /// Decode a row from its columns.
    ///
    /// # Errors
    ///
    /// Fails on fewer than [`REQUIRED_COLUMNS`] columns or non-integer
    /// sentence/offset columns, and with `InvalidInput` on an empty span.
    pub fn from_fields(fields: &[&str]) -> Result<Self> {
        if fields.len() < REQUIRED_COLUMNS {
            return Err(Error::parse(format!(
                "expected at least {} columns, found {}",
                REQUIRED_COLUMNS,
                fields.len()
            )));
        }
        let start = parse_index(fields[4], "START_INDEX")?;
        let end = parse_index(fields[5], "END_INDEX")?;
        if end <= start {
            return Err(Error::invalid_input(format!(
                "mention {} ends at {} before it starts at {}",
                fields[3], end, start
            )));
        }
        Ok(Self {
            doc_id: fields[0].to_string(),
            part_id: fields[1].to_string(),
            sent_id: parse_index(fields[2], "SENT_ID")?,
            mention_id: fields[3].to_string(),
            start,
            end,
            mention: fields[6].to_string(),
            ner_entity: fields[7].to_string(),
            head_word: fields[8].to_string(),
            head_pos: fields[9].to_string(),
            coref_id: fields[10].to_string(),
            gold_coref_id: fields[11].to_string(),
            ner_tag: fields[12].to_string(),
            pos_seq: fields[13].to_string(),
            entity_url: fields[14].to_string(),
            entity_types: fields.get(15).map(|s| s.to_string()).unwrap_or_default(),
        })
    }

    /// Decode a tab-separated line.
    ///
    /// # Errors
    ///
    /// See [`MentionRecord::from_fields`].
    pub fn from_line(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split('\t').collect();
        Self::from_fields(&fields)
    }

    /// Whether the row carries a linked identifier.
    #[must_use]
    pub fn is_linked(&self) -> bool {
        let url = self.entity_url.trim();
        !url.is_empty() && url != NULL_ENTITY
    }

    /// The document part this row belongs to.
    #[must_use]
    pub fn document_key(&self) -> DocumentKey {
        DocumentKey::new(self.doc_id.clone(), self.part_id.clone())
    }

    /// Build the typed mention, mapping sentinels to `None`.
    #[must_use]
    pub fn to_mention(&self) -> Mention {
        let entity_url = self.is_linked().then(|| self.entity_url.trim().to_string());
        let entity_type = entity_url
            .as_ref()
            .and_then(|_| coarse_entity_type(&self.entity_types));
        let gold = self.gold_coref_id.trim();
        Mention {
            mention_id: self.mention_id.clone(),
            sent_id: self.sent_id,
            start: self.start,
            end: self.end,
            text: self.mention.clone(),
            ner_entity: self.ner_entity.clone(),
            head_word: self.head_word.clone(),
            head_lemma: self.mention.to_lowercase(),
            head_pos: self.head_pos.clone(),
            pos_seq: self.pos_seq.clone(),
            ner_tag: normalize_ner_tag(&self.ner_tag),
            coref_cluster_id: ClusterId::new(self.coref_id.clone()),
            gold_coref_id: (!gold.is_empty() && gold != UNLABELED_GOLD).then(|| gold.to_string()),
            entity_url,
            entity_type,
        }
    }
}

fn parse_index(raw: &str, column: &str) -> Result<usize> {
    raw.trim()
        .parse()
        .map_err(|_| Error::parse(format!("{} is not a non-negative integer: {:?}", column, raw)))
}
