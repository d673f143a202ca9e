//! File locations for a refinement run.
//!
//! ```toml
//! coref_path = "corefs-test.txt"
//! entity_path = "corefs-test_annotated_single_entity_col6.txt"
//! conll_path = "conll-test.predicted.txt"
//! output_path = "conll-test.predicted.new.txt"
//! ```
//!
//! Every key is optional; missing keys take the defaults above.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default coreference stream.
pub const DEFAULT_COREF_PATH: &str = "corefs-test.txt";
/// Default entity-linking stream.
pub const DEFAULT_ENTITY_PATH: &str = "corefs-test_annotated_single_entity_col6.txt";
/// Default CoNLL input.
pub const DEFAULT_CONLL_PATH: &str = "conll-test.predicted.txt";
/// Default CoNLL output.
pub const DEFAULT_OUTPUT_PATH: &str = "conll-test.predicted.new.txt";

/// Paths read and written by [`run`](crate::pipeline::run).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RefineConfig {
    /// Coreference stream, one mention per row.
    pub coref_path: PathBuf,
    /// Entity-linking stream, row-aligned with `coref_path`.
    pub entity_path: PathBuf,
    /// CoNLL file whose tag column is rewritten.
    pub conll_path: PathBuf,
    /// Where the rewritten CoNLL file goes.
    pub output_path: PathBuf,
}

impl Default for RefineConfig {
    fn default() -> Self {
        Self {
            coref_path: PathBuf::from(DEFAULT_COREF_PATH),
            entity_path: PathBuf::from(DEFAULT_ENTITY_PATH),
            conll_path: PathBuf::from(DEFAULT_CONLL_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

impl RefineConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::config(e.to_string()))
    }

    /// Load a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Replace the paths that were given explicitly.
    #[must_use]
    pub fn with_overrides(
        mut self,
        coref: Option<PathBuf>,
        entities: Option<PathBuf>,
        conll: Option<PathBuf>,
        output: Option<PathBuf>,
    ) -> Self {
        if let Some(p) = coref {
            self.coref_path = p;
        }
        if let Some(p) = entities {
            self.entity_path = p;
        }
        if let Some(p) = conll {
            self.conll_path = p;
        }
        if let Some(p) = output {
            self.output_path = p;
        }
        self
    }
}
