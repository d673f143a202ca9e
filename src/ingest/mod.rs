//! Reading the input streams and writing the refined annotation.
//!
//! - [`records`]: join the coreference and entity-linking streams and decode
//!   them into documents of clusters.
//! - [`conll`]: rewrite the coreference column of a CoNLL file from a
//!   refined clustering.

pub mod conll;
pub mod records;

pub use conll::{mention_spans, rewrite, Rewritten, SpanIndex, TagMismatch};
pub use records::{join_streams, load_corpus, parse_documents, ParsedCorpus};
