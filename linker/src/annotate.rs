//! Producing an entity stream from a coreference stream.

use crate::{Error, LinkerIndex, Result};

/// Columns of the coreference stream copied to the output.
pub const COREF_COLUMNS: usize = 14;

/// Column holding the mention's surface text.
pub const MENTION_COLUMN: usize = 6;

/// Written when a mention has no link.
pub const NULL_ENTITY: &str = "null";

/// Link every mention row of `coref`.
///
/// Each output row is the input row's first [`COREF_COLUMNS`] columns, the
/// linked uri (or [`NULL_ENTITY`]) and the entity's types separated by
/// spaces, deepest type first. The header gains `ENTITY_URL` and
/// `ENTITY_TYPES`; blank rows stay blank so that the output lines up with
/// the input row for row.
///
/// # Errors
///
/// A row with fewer than [`COREF_COLUMNS`] columns.
pub fn annotate(index: &LinkerIndex, coref: &str) -> Result<String> {
    let mut out = String::with_capacity(coref.len() * 2);
    let mut linked = 0usize;
    let mut rows = 0usize;

    for (line_idx, raw) in coref.lines().enumerate() {
        let line = raw.trim();
        if line_idx == 0 {
            out.push_str(line);
            out.push_str("\tENTITY_URL\tENTITY_TYPES\n");
            continue;
        }
        if line.is_empty() {
            out.push('\n');
            continue;
        }

        let columns: Vec<&str> = line.split('\t').collect();
        if columns.len() < COREF_COLUMNS {
            return Err(Error::parse(format!(
                "line {}: expected {} columns, found {}",
                line_idx + 1,
                COREF_COLUMNS,
                columns.len()
            )));
        }
        rows += 1;

        let uri = index.link(columns[MENTION_COLUMN]);
        let types = uri.as_deref().map(|u| ordered_types(index, u)).unwrap_or_default();
        if uri.is_some() {
            linked += 1;
        }

        out.push_str(&columns[..COREF_COLUMNS].join("\t"));
        out.push('\t');
        out.push_str(uri.as_deref().unwrap_or(NULL_ENTITY));
        out.push('\t');
        out.push_str(&types.join(" "));
        out.push('\n');
    }

    log::info!("linked {} of {} mentions", linked, rows);
    Ok(out)
}

/// Types of `uri` with the deepest one moved to the front.
fn ordered_types<'a>(index: &'a LinkerIndex, uri: &str) -> Vec<&'a str> {
    let Some(all) = index.types(uri) else {
        return Vec::new();
    };
    let deepest = index.deepest_type(uri);
    let mut ordered: Vec<&str> = deepest.into_iter().collect();
    ordered.extend(all.iter().map(String::as_str).filter(|t| Some(*t) != deepest));
    ordered
}
