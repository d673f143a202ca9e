//! Rewriting the coreference column of a CoNLL file from refined clusters.
//!
//! Each token line's last column holds the bracket tags of the mentions
//! that open or close on it: `(7)` for a single-token mention, `(3` ... `3)`
//! for one that spans several tokens, `|`-joined when several apply and `-`
//! when none do.

use crate::{Error, Result};
use sanaphor_core::{ClusterId, Document};
use std::collections::{BTreeSet, HashMap};

/// `(doc_id, part_id, sent_id, start)` → `(cluster_id, end)` of every
/// mention starting there.
pub type SpanIndex = HashMap<(String, String, usize, usize), Vec<(ClusterId, usize)>>;

/// A token line whose new tags disagree with the tags it had.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMismatch {
    /// 1-based line number in the input.
    pub line: usize,
    /// The line's tag column before rewriting.
    pub previous: String,
    /// The tag column written instead.
    pub written: String,
}

/// Output of [`rewrite`].
#[derive(Debug, Clone, Default)]
pub struct Rewritten {
    /// The rewritten file contents.
    pub text: String,
    /// Lines whose tag set changed.
    pub mismatches: Vec<TagMismatch>,
}

/// Index the mentions of every cluster by where they start.
///
/// Nominal groups are visited before non-nominal ones.
#[must_use]
pub fn mention_spans(documents: &[Document]) -> SpanIndex {
    let mut spans = SpanIndex::new();
    for doc in documents {
        let key = doc.key();
        for cluster in doc.clusters() {
            let groups = cluster.nominal_groups().chain(cluster.non_nominal_groups());
            for mention in groups.flat_map(|g| g.mentions()) {
                spans
                    .entry((
                        key.doc_id.clone(),
                        key.part_id.clone(),
                        mention.sent_id,
                        mention.start,
                    ))
                    .or_default()
                    .push((cluster.id().clone(), mention.end));
            }
        }
    }
    spans
}

/// Rewrite the tag column of `conll` from `spans`.
///
/// `#begin`/`#end` lines restart the sentence count and blank lines advance
/// it; both are copied as they are. Of mentions starting on the same token,
/// the longest opens first so that closing tags nest.
///
/// # Errors
///
/// A token line whose word number is not an integer.
pub fn rewrite(conll: &str, spans: &SpanIndex) -> Result<Rewritten> {
    let mut out = Rewritten::default();
    let mut sent_id = 0usize;
    let mut pending: HashMap<usize, Vec<ClusterId>> = HashMap::new();

    for (line_idx, raw) in conll.lines().enumerate() {
        let line = raw.trim();
        if line.starts_with("#begin") || line.starts_with("#end") {
            sent_id = 0;
            out.text.push_str(line);
            out.text.push('\n');
            continue;
        }
        if line.is_empty() {
            sent_id += 1;
            out.text.push('\n');
            continue;
        }

        let mut columns: Vec<String> = line.split('\t').map(str::to_string).collect();
        if columns.len() < 3 {
            return Err(Error::parse(format!(
                "line {}: expected at least 3 columns, found {}",
                line_idx + 1,
                columns.len()
            )));
        }
        let word: usize = columns[2].trim().parse().map_err(|_| {
            Error::parse(format!(
                "line {}: invalid word number {:?}",
                line_idx + 1,
                columns[2]
            ))
        })?;

        let closes: Vec<String> = pending
            .remove(&(word + 1))
            .unwrap_or_default()
            .into_iter()
            .map(|id| format!("{id})"))
            .collect();

        let mut tags: Vec<String> = Vec::new();
        let key = (columns[0].clone(), columns[1].clone(), sent_id, word);
        if let Some(starting) = spans.get(&key) {
            let mut starting = starting.clone();
            starting.sort_by(|a, b| b.1.cmp(&a.1));
            for (id, end) in starting {
                if end == word + 1 {
                    tags.push(format!("({id})"));
                } else {
                    tags.push(format!("({id}"));
                    pending.entry(end).or_default().push(id);
                }
            }
        }
        tags.extend(closes);

        let last = columns.len() - 1;
        if tags.is_empty() {
            columns[last] = "-".to_string();
        } else {
            let written = tags.join("|");
            let previous: BTreeSet<&str> = columns[last].split('|').collect();
            let current: BTreeSet<&str> = tags.iter().map(String::as_str).collect();
            if previous != current {
                log::warn!(
                    "line {}: tags {:?} replace {:?}",
                    line_idx + 1,
                    written,
                    columns[last]
                );
                out.mismatches.push(TagMismatch {
                    line: line_idx + 1,
                    previous: columns[last].clone(),
                    written: written.clone(),
                });
            }
            columns[last] = written;
        }

        out.text.push_str(&columns.join("\t"));
        out.text.push('\n');
    }

    if !pending.is_empty() {
        log::warn!("{} mention(s) never closed", pending.values().map(Vec::len).sum::<usize>());
    }
    Ok(out)
}
