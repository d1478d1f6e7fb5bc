use std::path::{Path, PathBuf};

use clap::ValueEnum;
use log::info;
use serde::Deserialize;

use crate::adjacency;
use crate::code::{synthesize, Notation};
use crate::data::loader;
use crate::data::model::{Group, Record};
use crate::error::{CanonError, Result};
use crate::grouping::group_records;
use crate::settings::Settings;
use crate::sorter;

// ---------------------------------------------------------------------------
// Modes
// ---------------------------------------------------------------------------

/// How rows are classified, ordered and relabelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Keep row order; append the segment start suffix to run starts.
    Adjacent,
    /// Keep row order; rebuild codes, start marker on counted run starts.
    AdjacentClean,
    /// Group by type and counter, order groups by their smallest key.
    #[default]
    Grouped,
    /// Group by type and counter, order polylines by type then counter,
    /// isolated points last.
    ByType,
}

// ---------------------------------------------------------------------------
// In-memory pipeline
// ---------------------------------------------------------------------------

/// Canonicalize a full record set. Produces new rows; the input is untouched.
pub fn canonicalize(records: &[Record], settings: &Settings) -> Vec<Record> {
    match settings.mode {
        Mode::Adjacent => adjacency::mark_starts(records, &settings.notation),
        Mode::AdjacentClean => adjacency::relabel_starts(records, &settings.notation),
        Mode::Grouped => {
            let mut groups = group_records(records, settings.key_field, &settings.notation);
            sorter::order_by_min_key(&mut groups);
            emit(&groups, &settings.notation)
        }
        Mode::ByType => {
            let mut groups = group_records(records, settings.key_field, &settings.notation);
            sorter::order_by_type(&mut groups);
            emit(&groups, &settings.notation)
        }
    }
}

/// Flatten ordered groups into output rows with synthesized codes.
pub fn emit(groups: &[Group<'_>], notation: &Notation) -> Vec<Record> {
    groups
        .iter()
        .flat_map(|group| {
            group
                .points
                .iter()
                .enumerate()
                .map(move |(position, point)| {
                    point
                        .record
                        .with_code(synthesize(&point.code, position, notation))
                })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// File pipeline
// ---------------------------------------------------------------------------

/// Counts reported after a file run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub rows_read: usize,
    pub rows_written: usize,
}

/// `<dir>/<stem>_<suffix><.ext>` next to the input.
pub fn derive_output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match input.extension() {
        Some(ext) => format!("{stem}_{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{suffix}"),
    };
    input.with_file_name(name)
}

/// Load `input`, canonicalize it and write the result to `output`.
pub fn process_file(input: &Path, output: &Path, settings: &Settings) -> Result<Summary> {
    let delimiter = settings
        .delimiter_byte()
        .map_err(|_| CanonError::InvalidDelimiter {
            delimiter: settings.delimiter,
        })?;

    let records = loader::load_records(input, delimiter)?;
    info!("loaded {} rows from {}", records.len(), input.display());
    if records.is_empty() {
        info!("{} is empty, writing an empty output", input.display());
    }

    let canonical = canonicalize(&records, settings);
    loader::write_records(output, &canonical, delimiter)?;
    info!(
        "wrote {} rows to {} ({:?} mode)",
        canonical.len(),
        output.display(),
        settings.mode
    );

    Ok(Summary {
        rows_read: records.len(),
        rows_written: canonical.len(),
    })
}
