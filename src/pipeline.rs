//! Whole runs over files: linking a coreference stream, and refinement.

use crate::config::RefineConfig;
use crate::ingest::{load_corpus, mention_spans, rewrite};
use crate::refine::{refine, RefineReport};
use crate::Result;
use sanaphor_linker::{annotate, LinkerIndex, LinkerPaths};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// What a run did.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Input rows carrying a linked identifier.
    pub linked_rows: usize,
    /// Documents read.
    pub documents: usize,
    /// Split and merge scores.
    pub report: RefineReport,
    /// CoNLL lines whose tag set changed.
    pub mismatches: usize,
}

/// Run the pipeline described by `config`, writing the rewritten CoNLL file.
///
/// # Errors
///
/// IO errors on any of the four files, or unparseable input.
pub fn run(config: &RefineConfig) -> Result<RunSummary> {
    let corpus = load_corpus(&config.coref_path, &config.entity_path)?;
    let (refined, report) = refine(&corpus.documents);

    let conll = fs::read_to_string(&config.conll_path)?;
    let rewritten = rewrite(&conll, &mention_spans(&refined))?;
    fs::write(&config.output_path, &rewritten.text)?;
    log::info!(
        "wrote {} ({} tag changes)",
        config.output_path.display(),
        rewritten.mismatches.len()
    );

    Ok(RunSummary {
        linked_rows: corpus.linked_rows,
        documents: refined.len(),
        report,
        mismatches: rewritten.mismatches.len(),
    })
}

/// Link the coreference stream at `coref` and write the entity stream that
/// [`run`] reads to `output`.
///
/// # Errors
///
/// IO errors, a malformed index table, or a short coreference row.
pub fn link_stream(index: &LinkerPaths, coref: &Path, output: &Path) -> Result<()> {
    let index = LinkerIndex::load(index)?;
    let text = fs::read_to_string(coref)?;
    let linked = annotate(&index, &text)?;
    fs::write(output, linked)?;
    log::info!("wrote entity stream {}", output.display());
    Ok(())
}
