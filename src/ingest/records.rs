//! Joined coreference/entity-linking rows → documents of clusters.
//!
//! The coreference stream has one row per mention (14 columns, see
//! [`MentionRecord`]). The entity-linking stream is row-aligned with it and
//! supplies the linked identifier and entity types from column 14 onward.
//! The first joined row is a header.

use crate::Result;
use sanaphor_core::{Document, DocumentKey, MentionRecord};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Column of the entity stream where the linking columns start.
pub const ENTITY_COLUMNS_START: usize = 14;

/// Documents decoded from the joined streams.
#[derive(Debug, Clone, Default)]
pub struct ParsedCorpus {
    /// Documents in first-seen order.
    pub documents: Vec<Document>,
    /// Rows that carried a linked identifier.
    pub linked_rows: usize,
}

/// Join the two streams line by line.
///
/// Each joined row is the trimmed coreference row followed by the entity
/// row's columns from [`ENTITY_COLUMNS_START`] on. Lines past the end of the
/// shorter stream are dropped.
#[must_use]
pub fn join_streams(coref: &str, entities: &str) -> Vec<String> {
    coref
        .lines()
        .zip(entities.lines())
        .map(|(coref_row, entity_row)| {
            let linking: Vec<&str> = entity_row
                .trim()
                .split('\t')
                .skip(ENTITY_COLUMNS_START)
                .collect();
            format!("{}\t{}", coref_row.trim(), linking.join("\t"))
        })
        .collect()
}

/// Decode joined rows, skipping the header and blank rows.
///
/// Mentions are added to their upstream cluster with
/// [`CorefCluster::add_mention`](sanaphor_core::CorefCluster::add_mention),
/// so clusters and documents appear in first-seen order.
///
/// # Errors
///
/// A row that cannot be decoded fails the whole parse, naming its line.
pub fn parse_documents<S: AsRef<str>>(rows: &[S]) -> Result<ParsedCorpus> {
    let mut corpus = ParsedCorpus::default();
    let mut positions: HashMap<DocumentKey, usize> = HashMap::new();

    for (line_no, row) in rows.iter().enumerate().skip(1) {
        let row = row.as_ref();
        if row.trim().is_empty() {
            continue;
        }
        let record = MentionRecord::from_line(row).map_err(|e| e.at_line(line_no + 1))?;
        if record.is_linked() {
            corpus.linked_rows += 1;
        }

        let key = record.document_key();
        let idx = *positions.entry(key.clone()).or_insert_with(|| {
            corpus.documents.push(Document::new(key));
            corpus.documents.len() - 1
        });
        let mention = record.to_mention();
        let cluster_id = mention.coref_cluster_id.clone();
        corpus.documents[idx]
            .get_or_insert(&cluster_id)
            .add_mention(mention);
    }
    Ok(corpus)
}

/// Read, join and decode the two stream files.
///
/// # Errors
///
/// IO errors reading either file, or a row that cannot be decoded.
pub fn load_corpus(coref_path: &Path, entity_path: &Path) -> Result<ParsedCorpus> {
    let coref = fs::read_to_string(coref_path)?;
    let entities = fs::read_to_string(entity_path)?;
    let rows = join_streams(&coref, &entities);
    let corpus = parse_documents(&rows)?;
    log::info!(
        "loaded {} documents from {:?} ({} rows, {} linked)",
        corpus.documents.len(),
        coref_path,
        rows.len().saturating_sub(1),
        corpus.linked_rows
    );
    Ok(corpus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use sanaphor_core::ClusterId;

    const HEADER: &str = "DOC_ID\tPARAGRAPH_ID\tSENT_ID\tMENTION_ID\tSTART_INDEX\tEND_INDEX\t\
                          MENTION\tNER_ENTITY\tHEAD_WORD_LEMMA\tHEAD_POS_TAG\tCOREF_ID\t\
                          GOLD_COREF_ID\tNER_ENTITY_TAG\tPOS_TAG_SEQ";

    fn coref_row(doc: &str, mention_id: &str, text: &str, pos: &str, cluster: &str) -> String {
        format!(
            "{doc}\t0\t0\t{mention_id}\t1\t2\t{text}\t{text}\t{text}\t{pos}\t\
             {cluster}\t-1\tO\t{pos}"
        )
    }

    fn entity_row(url: &str) -> String {
        let filler = vec!["x"; ENTITY_COLUMNS_START].join("\t");
        format!("{filler}\t{url}\thttp://dbpedia.org/ontology/Place")
    }

    #[test]
    fn test_join_appends_linking_columns() {
        let rows = join_streams(
            "a\tb \n",
            "0\t1\t2\t3\t4\t5\t6\t7\t8\t9\t10\t11\t12\t13\tURL\tTYPES\n",
        );
        assert_eq!(rows, vec!["a\tb\tURL\tTYPES".to_string()]);
    }

    #[test]
    fn test_join_stops_at_shorter_stream() {
        let rows = join_streams("a\nb\nc", "x\ny");
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_parse_groups_by_document_and_cluster() {
        let coref = [
            HEADER.to_string(),
            coref_row("d1", "1", "Paris", "NNP", "1"),
            coref_row("d1", "2", "it", "PRP", "1"),
            coref_row("d1", "3", "France", "NNP", "3"),
            coref_row("d2", "4", "Obama", "NNP", "4"),
        ]
        .join("\n");
        let entities = [
            "header".to_string(),
            entity_row("urn:paris"),
            entity_row("null"),
            entity_row("urn:france"),
            entity_row("null"),
        ]
        .join("\n");

        let corpus = parse_documents(&join_streams(&coref, &entities)).unwrap();
        assert_eq!(corpus.linked_rows, 2);
        assert_eq!(corpus.documents.len(), 2);

        let d1 = &corpus.documents[0];
        assert_eq!(d1.key(), &DocumentKey::new("d1", "0"));
        assert_eq!(d1.cluster_ids(), vec![ClusterId::new("1"), ClusterId::new("3")]);

        let paris = d1.get(&ClusterId::new("1")).unwrap();
        assert_eq!(paris.nominal_len(), 1);
        assert_eq!(paris.non_nominal_len(), 1);
        assert_eq!(paris.entity_url(), Some("urn:paris"));
    }

    #[test]
    fn test_header_only() {
        let corpus = parse_documents(&[HEADER]).unwrap();
        assert!(corpus.documents.is_empty());
        assert_eq!(corpus.linked_rows, 0);
    }

    #[test]
    fn test_short_row_reports_line() {
        let rows = vec![HEADER.to_string(), "d1\t0\t0".to_string()];
        let err = parse_documents(&rows).unwrap_err();
        assert!(matches!(err, Error::Core(sanaphor_core::Error::Parse(_))));
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_load_corpus_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let coref_path = dir.path().join("corefs.txt");
        let entity_path = dir.path().join("entities.txt");
        let row = coref_row("d", "1", "Paris", "NNP", "1");
        fs::write(&coref_path, format!("{}\n{}\n", HEADER, row)).unwrap();
        fs::write(&entity_path, format!("h\n{}\n", entity_row("urn:paris"))).unwrap();

        let corpus = load_corpus(&coref_path, &entity_path).unwrap();
        assert_eq!(corpus.documents.len(), 1);
        assert_eq!(corpus.linked_rows, 1);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");
        let err = load_corpus(&missing, &missing).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
