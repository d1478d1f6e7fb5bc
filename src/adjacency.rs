use log::debug;

use crate::code::{parse_record, synthesize, Notation};
use crate::data::model::{Identity, ParsedCode, Record};

// ---------------------------------------------------------------------------
// Three-row window
// ---------------------------------------------------------------------------

/// The neighbourhood of one row. Boundary rows have `None` for the missing
/// neighbour. `previous_terminal` carries the previous row's end marker: a
/// terminal row closes its run, so the row after it starts fresh even when
/// the identity is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window<'a> {
    pub previous: Option<Identity<'a>>,
    pub previous_terminal: bool,
    pub current: Identity<'a>,
    pub next: Option<Identity<'a>>,
}

impl<'a> Window<'a> {
    /// Build the window around `codes[i]`.
    pub fn at(codes: &'a [ParsedCode], i: usize) -> Self {
        let previous = i.checked_sub(1).map(|p| &codes[p]);
        Window {
            previous: previous.map(ParsedCode::identity),
            previous_terminal: previous.is_some_and(|p| p.terminal),
            current: codes[i].identity(),
            next: codes.get(i + 1).map(ParsedCode::identity),
        }
    }

    /// A row starts a segment when it differs from what came before and the
    /// following row continues it. Singletons are never starts. A terminal
    /// row keeps its marker and can still start a run; it only resets the
    /// comparison for the row after it.
    pub fn is_segment_start(&self) -> bool {
        let previous = if self.previous_terminal {
            None
        } else {
            self.previous
        };
        let fresh = previous != Some(self.current);
        let continues = self.next == Some(self.current);
        fresh && continues
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Which rows take part in start detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identities {
    /// Every row; codes without a counter are compared by type alone.
    All,
    /// Only rows with a counter; the rest are never starts.
    CountedOnly,
}

/// Per-row segment-start flags. Needs the whole slice: row `i` depends on `i + 1`.
pub fn classify(codes: &[ParsedCode], identities: Identities) -> Vec<bool> {
    (0..codes.len())
        .map(|i| {
            if identities == Identities::CountedOnly && !codes[i].is_polyline() {
                return false;
            }
            Window::at(codes, i).is_segment_start()
        })
        .collect()
}

/// Marked output: start rows get the segment start suffix appended to their
/// trimmed raw code; every other row is copied unchanged.
pub fn mark_starts(records: &[Record], notation: &Notation) -> Vec<Record> {
    let codes: Vec<ParsedCode> = records.iter().map(|r| parse_record(r, notation)).collect();
    let starts = classify(&codes, Identities::All);
    debug!(
        "adjacency: {} segment starts in {} rows",
        starts.iter().filter(|s| **s).count(),
        records.len()
    );

    records
        .iter()
        .zip(starts)
        .map(|(record, start)| {
            if start {
                record.with_code(format!(
                    "{}{}",
                    record.code().trim(),
                    notation.segment_start_suffix
                ))
            } else {
                record.clone()
            }
        })
        .collect()
}

/// Clean output: codes are rebuilt from type and attributes, with the
/// polyline start marker on counted segment starts. Row order is kept.
pub fn relabel_starts(records: &[Record], notation: &Notation) -> Vec<Record> {
    let codes: Vec<ParsedCode> = records.iter().map(|r| parse_record(r, notation)).collect();
    let starts = classify(&codes, Identities::CountedOnly);

    records
        .iter()
        .zip(codes.iter().zip(starts))
        .map(|(record, (code, start))| {
            let position = if start { 0 } else { 1 };
            record.with_code(synthesize(code, position, notation))
        })
        .collect()
}
