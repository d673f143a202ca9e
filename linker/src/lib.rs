//! # sanaphor-linker
//!
//! Dictionary-backed entity linking for coreference mentions.
//!
//! A mention's surface form is looked up (case-insensitively) in a label
//! dictionary. Each candidate entity is followed through the redirect table,
//! and entities listed as disambiguation pages are dropped; the first
//! remaining candidate is the link. Types and type depths come from two
//! further tables so that the most specific type of an entity can be
//! reported.
//!
//! # Example
//!
//! ```
//! use sanaphor_linker::LinkerIndex;
//!
//! let index = LinkerIndex::from_parts(
//!     [("paris", "http://dbpedia.org/resource/Paris_(disambiguation)"),
//!      ("paris", "http://dbpedia.org/resource/Lutetia")],
//!     [("http://dbpedia.org/resource/Lutetia", "http://dbpedia.org/resource/Paris")],
//!     [("http://dbpedia.org/resource/Paris_(disambiguation)",
//!       "http://dbpedia.org/resource/Paris_Hilton")],
//!     [("http://dbpedia.org/resource/Paris", "http://dbpedia.org/ontology/Place"),
//!      ("http://dbpedia.org/resource/Paris", "http://dbpedia.org/ontology/City")],
//!     [("http://dbpedia.org/ontology/Place", 1), ("http://dbpedia.org/ontology/City", 3)],
//! );
//!
//! let uri = index.link("Paris").unwrap();
//! assert_eq!(uri, "http://dbpedia.org/resource/Paris");
//! assert_eq!(index.deepest_type(&uri).unwrap(), "http://dbpedia.org/ontology/City");
//! ```
//!
//! The file formats read by [`LinkerIndex::load`] are described in [`index`].

#![warn(missing_docs)]

pub mod annotate;
mod error;
pub mod index;

pub use annotate::annotate;
pub use error::{Error, Result};
pub use index::{LinkerIndex, LinkerPaths};
