//! In-memory lookup tables for linking.
//!
//! # File formats
//!
//! | Table | Format | Line |
//! |-------|--------|------|
//! | labels | TSV | `label<TAB>uri` |
//! | redirects | N-Triples | `<from> <predicate> <to> .` |
//! | disambiguations | N-Triples | `<page> <predicate> <candidate> .` |
//! | types | TSV | `uri<TAB>type`, one line per type |
//! | depths | TSV | `type<TAB>level` |
//!
//! Blank lines and lines starting with `#` are skipped in every table.
//! When a redirect or disambiguation subject repeats, the first line wins.

use crate::{Error, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Where [`LinkerIndex::load`] finds its tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkerPaths {
    /// Label dictionary.
    pub labels: PathBuf,
    /// Redirect triples.
    pub redirects: PathBuf,
    /// Disambiguation triples.
    pub disambiguations: PathBuf,
    /// Entity types, if available.
    pub types: Option<PathBuf>,
    /// Type depths, if available.
    pub depths: Option<PathBuf>,
}

/// Label, redirect, disambiguation and type tables.
#[derive(Debug, Clone, Default)]
pub struct LinkerIndex {
    /// Lowercased label → candidate uris, in file order.
    labels: HashMap<String, Vec<String>>,
    redirects: HashMap<String, String>,
    /// Subjects of disambiguation triples are ambiguous entities.
    disambiguations: HashMap<String, String>,
    types: HashMap<String, Vec<String>>,
    depths: HashMap<String, u32>,
}

impl LinkerIndex {
    /// Build an index from already-parsed tables.
    pub fn from_parts<S: Into<String>>(
        labels: impl IntoIterator<Item = (S, S)>,
        redirects: impl IntoIterator<Item = (S, S)>,
        disambiguations: impl IntoIterator<Item = (S, S)>,
        types: impl IntoIterator<Item = (S, S)>,
        depths: impl IntoIterator<Item = (S, u32)>,
    ) -> Self {
        let mut index = Self::default();
        for (label, uri) in labels {
            index
                .labels
                .entry(label.into().to_lowercase())
                .or_default()
                .push(uri.into());
        }
        for (from, to) in redirects {
            index.redirects.entry(from.into()).or_insert_with(|| to.into());
        }
        for (page, target) in disambiguations {
            index
                .disambiguations
                .entry(page.into())
                .or_insert_with(|| target.into());
        }
        for (uri, ty) in types {
            index.types.entry(uri.into()).or_default().push(ty.into());
        }
        for (ty, level) in depths {
            index.depths.insert(ty.into(), level);
        }
        index
    }

    /// Read every table named in `paths`.
    ///
    /// # Errors
    ///
    /// IO errors, or a malformed line in any table.
    pub fn load(paths: &LinkerPaths) -> Result<Self> {
        let labels = read_pairs(&paths.labels)?;
        log::info!("loading redirects from {}", paths.redirects.display());
        let redirects = read_triples(&paths.redirects)?;
        log::info!("loading disambiguations from {}", paths.disambiguations.display());
        let disambiguations = read_triples(&paths.disambiguations)?;
        let types = match &paths.types {
            Some(p) => read_pairs(p)?,
            None => Vec::new(),
        };
        let depths = match &paths.depths {
            Some(p) => read_pairs(p)?
                .into_iter()
                .map(|(ty, level)| {
                    level
                        .trim()
                        .parse::<u32>()
                        .map(|l| (ty, l))
                        .map_err(|_| {
                            Error::parse(format!("{}: invalid level {:?}", p.display(), level))
                        })
                })
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };

        let index = Self::from_parts(labels, redirects, disambiguations, types, depths);
        log::info!(
            "linker index: {} labels, {} redirects, {} disambiguations, {} typed entities",
            index.labels.len(),
            index.redirects.len(),
            index.disambiguations.len(),
            index.types.len()
        );
        Ok(index)
    }

    /// Link a surface form to an entity uri.
    #[must_use]
    pub fn link(&self, mention: &str) -> Option<String> {
        let candidates = self.labels.get(&mention.to_lowercase())?;
        candidates
            .iter()
            .map(|uri| self.redirects.get(uri).unwrap_or(uri))
            .find(|uri| !self.is_ambiguous(uri))
            .cloned()
    }

    /// Whether `uri` is a disambiguation page.
    #[must_use]
    pub fn is_ambiguous(&self, uri: &str) -> bool {
        self.disambiguations.contains_key(uri)
    }

    /// All known types of an entity.
    #[must_use]
    pub fn types(&self, uri: &str) -> Option<&[String]> {
        self.types.get(uri).map(Vec::as_slice)
    }

    /// Depth of a type in the ontology.
    #[must_use]
    pub fn type_depth(&self, ty: &str) -> Option<u32> {
        self.depths.get(ty).copied()
    }

    /// The type of `uri` with the greatest known depth.
    ///
    /// On ties the earlier type wins. Types without a depth are ignored, so
    /// an entity none of whose types has a depth yields `None`.
    #[must_use]
    pub fn deepest_type(&self, uri: &str) -> Option<&str> {
        let mut best: Option<(&str, u32)> = None;
        for ty in self.types(uri)? {
            let Some(depth) = self.type_depth(ty) else {
                continue;
            };
            if best.map_or(true, |(_, d)| depth > d) {
                best = Some((ty.as_str(), depth));
            }
        }
        best.map(|(ty, _)| ty)
    }
}

/// Tab-separated two-column table.
fn read_pairs(path: &Path) -> Result<Vec<(String, String)>> {
    let text = fs::read_to_string(path)?;
    parse_pairs(&text).map_err(|e| Error::parse(format!("{}: {}", path.display(), e)))
}

fn read_triples(path: &Path) -> Result<Vec<(String, String)>> {
    let text = fs::read_to_string(path)?;
    parse_triples(&text).map_err(|e| Error::parse(format!("{}: {}", path.display(), e)))
}

/// Parse `key<TAB>value` lines.
pub fn parse_pairs(text: &str) -> Result<Vec<(String, String)>> {
    content_lines(text)
        .map(|(n, line)| {
            line.split_once('\t')
                .map(|(k, v)| (k.to_string(), v.trim().to_string()))
                .ok_or_else(|| {
                    Error::parse(format!("line {}: expected two tab-separated columns", n))
                })
        })
        .collect()
}

/// Parse N-Triples lines into `(subject, object)` with brackets removed.
pub fn parse_triples(text: &str) -> Result<Vec<(String, String)>> {
    content_lines(text)
        .map(|(n, line)| {
            let parts: Vec<&str> = line.split(' ').collect();
            if parts.len() < 3 {
                return Err(Error::parse(format!("line {}: expected a triple", n)));
            }
            Ok((unbracket(parts[0]).to_string(), unbracket(parts[2]).to_string()))
        })
        .collect()
}

/// Non-blank, non-comment lines with their 1-based numbers.
fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

fn unbracket(term: &str) -> &str {
    term.strip_prefix('<')
        .and_then(|t| t.strip_suffix('>'))
        .unwrap_or(term)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DBR: &str = "http://dbpedia.org/resource/";

    fn res(name: &str) -> String {
        format!("{DBR}{name}")
    }

    fn sample() -> LinkerIndex {
        LinkerIndex::from_parts(
            vec![
                ("Trump".to_string(), res("Trump")),
                ("Trump".to_string(), res("Donald_J._Trump")),
                ("Obama".to_string(), res("Obama")),
            ],
            vec![
                (res("Donald_J._Trump"), res("Donald_Trump")),
                (res("Donald_J._Trump"), res("Somewhere_Else")),
            ],
            vec![(res("Trump"), res("Trump_card")), (res("Obama"), res("Obama_Japan"))],
            vec![
                (res("Donald_Trump"), "Agent".to_string()),
                (res("Donald_Trump"), "Person".to_string()),
                (res("Donald_Trump"), "Politician".to_string()),
                (res("Donald_Trump"), "President".to_string()),
            ],
            vec![
                ("Agent".to_string(), 1),
                ("Person".to_string(), 2),
                ("Politician".to_string(), 3),
                ("President".to_string(), 3),
            ],
        )
    }

    #[test]
    fn test_link_follows_redirect_and_skips_ambiguous() {
        let index = sample();
        assert_eq!(index.link("trump"), Some(res("Donald_Trump")));
        assert_eq!(index.link("TRUMP"), Some(res("Donald_Trump")));
    }

    #[test]
    fn test_link_all_ambiguous_or_unknown() {
        let index = sample();
        assert_eq!(index.link("Obama"), None);
        assert_eq!(index.link("Merkel"), None);
    }

    #[test]
    fn test_deepest_type_first_of_ties() {
        let index = sample();
        assert_eq!(index.types(&res("Donald_Trump")).map(<[String]>::len), Some(4));
        assert_eq!(index.deepest_type(&res("Donald_Trump")), Some("Politician"));
    }

    #[test]
    fn test_deepest_type_without_depths() {
        let index = LinkerIndex::from_parts(
            Vec::<(&str, &str)>::new(),
            vec![],
            vec![],
            vec![("x", "Thing")],
            vec![],
        );
        assert_eq!(index.types("x").unwrap(), ["Thing".to_string()]);
        assert_eq!(index.deepest_type("x"), None);
        assert_eq!(index.deepest_type("y"), None);
    }

    #[test]
    fn test_parse_triples() {
        let text = "# comment\n\n<a> <p> <b> .\n<c> <p> <d> .\n";
        let triples = parse_triples(text).unwrap();
        assert_eq!(
            triples,
            vec![
                ("a".to_string(), "b".to_string()),
                ("c".to_string(), "d".to_string())
            ]
        );
        assert!(parse_triples("<a> <p>\n").is_err());
    }

    #[test]
    fn test_parse_pairs_requires_tab() {
        assert!(parse_pairs("label uri\n").is_err());
        assert_eq!(
            parse_pairs("Paris\turi\n").unwrap(),
            vec![("Paris".to_string(), "uri".to_string())]
        );
    }

    #[test]
    fn test_load_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let p = |name: &str| dir.path().join(name);
        fs::write(p("labels.tsv"), format!("Paris\t{}\n", res("Paris"))).unwrap();
        fs::write(
            p("redirects.nt"),
            format!("<{}> <r> <{}> .\n", res("Lutetia"), res("Paris")),
        )
        .unwrap();
        fs::write(p("disamb.nt"), "# none\n").unwrap();
        fs::write(
            p("types.tsv"),
            format!("{}\tPlace\n{}\tCity\n", res("Paris"), res("Paris")),
        )
        .unwrap();
        fs::write(p("depths.tsv"), "Place\t1\nCity\t3\n").unwrap();

        let index = LinkerIndex::load(&LinkerPaths {
            labels: p("labels.tsv"),
            redirects: p("redirects.nt"),
            disambiguations: p("disamb.nt"),
            types: Some(p("types.tsv")),
            depths: Some(p("depths.tsv")),
        })
        .unwrap();

        assert_eq!(index.link("paris"), Some(res("Paris")));
        assert_eq!(index.deepest_type(&res("Paris")), Some("City"));
    }

    #[test]
    fn test_load_bad_depth() {
        let dir = tempfile::tempdir().unwrap();
        let p = |name: &str| dir.path().join(name);
        fs::write(p("empty"), "").unwrap();
        fs::write(p("depths.tsv"), "Place\tdeep\n").unwrap();
        let err = LinkerIndex::load(&LinkerPaths {
            labels: p("empty"),
            redirects: p("empty"),
            disambiguations: p("empty"),
            types: None,
            depths: Some(p("depths.tsv")),
        })
        .unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }
}
