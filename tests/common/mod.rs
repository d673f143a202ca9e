//! A small corpus shared by the integration tests.
//!
//! One document, three sentences:
//!
//! ```text
//! 0: Paris is the capital .     Paris(1)  the capital(2)    both linked to Paris
//! 1: It is big                  It(2)
//! 2: John Smith joined Acme     John(20) Smith(20) Acme(20)  PERSON PERSON ORG
//! ```

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub const PARIS: &str = "http://dbpedia.org/resource/Paris";

const HEADER: &str = "DOC_ID\tPARAGRAPH_ID\tSENT_ID\tMENTION_ID\tSTART_INDEX\tEND_INDEX\t\
                      MENTION\tNER_ENTITY\tHEAD_WORD_LEMMA\tHEAD_POS_TAG\tCOREF_ID\t\
                      GOLD_COREF_ID\tNER_ENTITY_TAG\tPOS_TAG_SEQ";

/// (sent, mention id, start, end, text, head, pos, cluster, gold, ner, url)
type Row = (
    usize,
    &'static str,
    usize,
    usize,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
);

const ROWS: &[Row] = &[
    (0, "1", 0, 1, "Paris", "Paris", "NNP", "1", "1", "LOC", PARIS),
    (0, "2", 2, 4, "the capital", "capital", "NN", "2", "1", "LOC", PARIS),
    (1, "3", 0, 1, "It", "It", "PRP", "2", "1", "O", "null"),
    (2, "4", 0, 1, "John", "John", "NNP", "20", "5", "PERSON", "null"),
    (2, "7", 1, 2, "Smith", "Smith", "NNP", "20", "5", "PERSON", "null"),
    (2, "9", 3, 4, "Acme", "Acme", "NNP", "20", "6", "ORGANIZATION", "null"),
];

pub fn coref_stream() -> String {
    let mut out = format!("{HEADER}\n");
    for &(sent, id, start, end, text, head, pos, cluster, gold, ner, _) in ROWS {
        out.push_str(&format!(
            "nw/test\t0\t{sent}\t{id}\t{start}\t{end}\t{text}\t{text}\t{head}\t{pos}\t\
             {cluster}\t{gold}\t{ner}\t{pos}\n"
        ));
    }
    out
}

pub fn entity_stream() -> String {
    let mut out = format!("{HEADER}\tENTITY_URL\tENTITY_TYPES\n");
    for &(.., url) in ROWS {
        let types = if url == PARIS { "http://dbpedia.org/ontology/Place" } else { "" };
        out.push_str(&format!("x\tx\tx\tx\tx\tx\tx\tx\tx\tx\tx\tx\tx\tx\t{url}\t{types}\n"));
    }
    out
}

pub fn conll() -> String {
    [
        "#begin document (nw/test); part 000",
        "nw/test\t0\t0\tParis\tNNP\t(1)",
        "nw/test\t0\t1\tis\tVBZ\t-",
        "nw/test\t0\t2\tthe\tDT\t(2",
        "nw/test\t0\t3\tcapital\tNN\t2)",
        "nw/test\t0\t4\t.\t.\t-",
        "",
        "nw/test\t0\t0\tIt\tPRP\t(2)",
        "nw/test\t0\t1\tis\tVBZ\t-",
        "nw/test\t0\t2\tbig\tJJ\t-",
        "",
        "nw/test\t0\t0\tJohn\tNNP\t(20)",
        "nw/test\t0\t1\tSmith\tNNP\t(20)",
        "nw/test\t0\t2\tjoined\tVBD\t-",
        "nw/test\t0\t3\tAcme\tNNP\t(20)",
        "",
        "#end document",
    ]
    .join("\n")
        + "\n"
}

/// Write the three input files into `dir`, returning (coref, entities, conll).
pub fn write_inputs(dir: &Path) -> (PathBuf, PathBuf, PathBuf) {
    let coref = dir.join("corefs-test.txt");
    let entities = dir.join("corefs-test_annotated_single_entity_col6.txt");
    let conll_path = dir.join("conll-test.predicted.txt");
    fs::write(&coref, coref_stream()).unwrap();
    fs::write(&entities, entity_stream()).unwrap();
    fs::write(&conll_path, conll()).unwrap();
    (coref, entities, conll_path)
}

/// Last column of every token line of a CoNLL text.
pub fn tag_column(text: &str) -> Vec<String> {
    text.lines()
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .filter_map(|l| l.rsplit('\t').next())
        .map(str::to_string)
        .collect()
}
