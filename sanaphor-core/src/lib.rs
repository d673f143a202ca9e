//! # sanaphor-core
//!
//! Core types shared by the sanaphor crates.
//!
//! This crate provides:
//! - **Mentions**: `Mention`, `ClusterId`
//! - **Clusters**: `MentionGroup`, `CorefCluster`
//! - **Documents**: `Document`, `DocumentKey`
//! - **Records**: `MentionRecord`, the named decoding of one tab-separated row
//!
//! A `CorefCluster` keeps its mentions in groups keyed by head lemma, split
//! into nominal and non-nominal groups. Every mention reachable from a
//! cluster carries that cluster's id.

#![warn(missing_docs)]

pub mod cluster;
pub mod document;
pub mod error;
pub mod mention;
pub mod record;

pub use cluster::{CorefCluster, MentionGroup};
pub use document::{Document, DocumentKey};
pub use error::{Error, Result};
pub use mention::{ClusterId, Mention, CLOSED_CLASS_WORDS, NOMINAL_POS_TAGS, OTHER_NER_TAG};
pub use record::MentionRecord;
