//! # sanaphor
//!
//! Refine coreference chains with entity-linking evidence.
//!
//! A coreference system groups mentions into clusters; an entity linker
//! attaches a knowledge-base identifier and a coarse type to some of them.
//! sanaphor uses the second to correct the first:
//!
//! - **Split**: a cluster whose named mentions point at incompatible entities
//!   is partitioned ([`refine::split`]).
//! - **Merge**: clusters whose named mentions point at the same entity are
//!   unified ([`refine::merge`]).
//! - **Evaluation**: both decisions are scored against gold labels over
//!   mention pairs ([`eval::Evaluator`]).
//!
//! The refined clusters are written back into the coreference column of a
//! CoNLL file ([`ingest::rewrite`]).
//!
//! ## Quick Start
//!
//! ```rust
//! use sanaphor::{refine, ClusterId, Document, DocumentKey, Mention};
//!
//! let mut doc = Document::new(DocumentKey::new("nw/0001", "0"));
//! for (id, cluster) in [("1", "5"), ("2", "9")] {
//!     let m = Mention::new(id, "Obama", 0, 0, 1)
//!         .with_head_pos("NNP")
//!         .with_cluster(cluster)
//!         .with_entity("http://dbpedia.org/resource/Barack_Obama", "Obama");
//!     doc.get_or_insert(&ClusterId::new(cluster)).add_mention(m);
//! }
//!
//! let (refined, report) = refine(&[doc]);
//! assert_eq!(refined[0].clusters().len(), 1);
//! assert_eq!(report.merges, 1);
//! ```
//!
//! ## Running over files
//!
//! [`pipeline::run`] reads the coreference and entity streams, refines, and
//! rewrites a CoNLL file; [`RefineConfig`] names the four files. The
//! `sanaphor` binary wraps it, along with the `sanaphor-linker` crate that
//! produces the entity stream.

#![warn(missing_docs)]

pub mod config;
mod error;
pub mod eval;
pub mod ingest;
pub mod pipeline;
pub mod refine;

pub use config::RefineConfig;
pub use error::{Error, Result};
pub use eval::Evaluator;
pub use refine::{refine, RefineReport};

pub use sanaphor_core::{
    ClusterId, CorefCluster, Document, DocumentKey, Mention, MentionGroup, MentionRecord,
};
