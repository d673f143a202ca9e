//! Evaluation of refinement decisions against gold clusters.
//!
//! Every split or merge is scored twice: once as if it had not happened and
//! once as applied. Both scorings use the pairwise [`Evaluator`], which
//! classifies each pair of gold-labeled mentions by whether gold and system
//! agree on putting them together.

pub mod pairwise;

pub use pairwise::Evaluator;
