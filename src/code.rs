//! Code grammar: parsing raw code fields and rebuilding canonical ones.
//!
//! A code field looks like
//! ```text
//!   TYPE [& COUNTER] [F] [@ATTR [@ATTR ...]]
//!   59&1F@AS@C  ->  type 59, counter 1, terminal, attributes [AS, C]
//! ```
//! The separator characters and markers are configurable through [`Notation`].
//!
//! Known ambiguity: a type whose name ends in the terminal letter (`Roof`)
//! is read as `Roo` + terminal marker. The rule is kept as is; encoders
//! should avoid type names ending in the marker letter.
use log::debug;
use serde::Deserialize;

use crate::data::model::{ParsedCode, Record};

// ---------------------------------------------------------------------------
// Notation
// ---------------------------------------------------------------------------

/// Reserved characters and markers of the code grammar.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Notation {
    /// Splits the base code from trailing attribute tokens.
    pub attribute_separator: char,
    /// Splits feature type from polyline counter (last occurrence wins).
    pub counter_separator: char,
    /// End-of-line marker, matched case-insensitively at the end of the base.
    pub terminal_marker: char,
    /// Appended to segment starts by the adjacency classifier's marked output.
    pub segment_start_suffix: String,
    /// Appended to the type of the first point of every polyline group.
    pub polyline_start_marker: String,
}

impl Default for Notation {
    fn default() -> Self {
        Self {
            attribute_separator: '@',
            counter_separator: '&',
            terminal_marker: 'F',
            segment_start_suffix: "C".to_string(),
            polyline_start_marker: "00".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Decompose a raw code. Total: every input yields a `ParsedCode`, falling
/// back to "whole string is the type" when no separator is present.
pub fn parse_code(raw: &str, notation: &Notation) -> ParsedCode {
    let code = raw.trim();

    let (base, attributes) = match code.split_once(notation.attribute_separator) {
        Some((base, rest)) => (
            base,
            rest.split(notation.attribute_separator)
                .map(str::trim)
                .filter(|tok| !tok.is_empty())
                .map(str::to_string)
                .collect(),
        ),
        None => (code, Vec::new()),
    };

    let (base, terminal) = strip_terminal(base, notation.terminal_marker);

    let (feature_type, counter) = match base.rsplit_once(notation.counter_separator) {
        Some((ty, counter)) => (ty.to_string(), Some(counter.to_string())),
        None => (base.to_string(), None),
    };

    ParsedCode {
        feature_type,
        counter,
        terminal,
        attributes,
    }
}

/// Strip a trailing terminal marker, unless it is the only character left.
fn strip_terminal(base: &str, marker: char) -> (&str, bool) {
    match base.char_indices().next_back() {
        Some((idx, last)) if idx > 0 && last.to_lowercase().eq(marker.to_lowercase()) => {
            (&base[..idx], true)
        }
        _ => (base, false),
    }
}

/// Parse a record's code field, logging parser fallbacks.
pub fn parse_record(record: &Record, notation: &Notation) -> ParsedCode {
    let parsed = parse_code(record.code(), notation);
    if parsed.is_degenerate() {
        debug!(
            "line {}: code {:?} has an empty type or counter, kept as {:?}/{:?}",
            record.line,
            record.code(),
            parsed.feature_type,
            parsed.counter
        );
    }
    parsed
}

// ---------------------------------------------------------------------------
// Synthesizer
// ---------------------------------------------------------------------------

/// Rebuild the canonical code for a point at `position` within its sorted group.
///
/// Counters and terminal markers are never re-emitted. The first point of a
/// polyline gets the start marker; isolated points never do. Attributes
/// follow the base token separated by single spaces.
pub fn synthesize(code: &ParsedCode, position: usize, notation: &Notation) -> String {
    let mut out = code.feature_type.clone();
    if code.is_polyline() && position == 0 {
        out.push_str(&notation.polyline_start_marker);
    }
    for attr in &code.attributes {
        out.push(' ');
        out.push_str(attr);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> ParsedCode {
        parse_code(raw, &Notation::default())
    }

    #[test]
    fn splits_type_counter_terminal_and_attributes() {
        let p = parse(" 59&1F@AS@C ");
        assert_eq!(p.feature_type, "59");
        assert_eq!(p.counter.as_deref(), Some("1"));
        assert!(p.terminal);
        assert_eq!(p.attributes, vec!["AS", "C"]);
    }

    #[test]
    fn last_counter_separator_wins() {
        let p = parse("A&B&3");
        assert_eq!(p.feature_type, "A&B");
        assert_eq!(p.counter.as_deref(), Some("3"));
    }

    #[test]
    fn no_separator_means_isolated_point() {
        let p = parse("99");
        assert_eq!(p.feature_type, "99");
        assert_eq!(p.counter, None);
        assert!(!p.terminal);
        assert!(p.attributes.is_empty());

        let p = parse("Arbol@D");
        assert_eq!(p.feature_type, "Arbol");
        assert_eq!(p.attributes, vec!["D"]);
    }

    #[test]
    fn terminal_marker_is_case_insensitive() {
        assert!(parse("Muro&2f").terminal);
        assert_eq!(parse("Muro&2f").counter.as_deref(), Some("2"));
    }

    #[test]
    fn lone_marker_is_a_type() {
        let p = parse("F");
        assert_eq!(p.feature_type, "F");
        assert!(!p.terminal);
        assert!(!parse("f@X").terminal);
    }

    #[test]
    fn type_ending_in_marker_letter_is_stripped() {
        // documented ambiguity
        let p = parse("Roof");
        assert_eq!(p.feature_type, "Roo");
        assert!(p.terminal);
    }

    #[test]
    fn degenerate_codes_never_fail() {
        assert_eq!(parse("").feature_type, "");
        assert!(parse("").is_degenerate());
        assert_eq!(parse("5&").counter.as_deref(), Some(""));
        assert!(parse("&3").is_degenerate());
        assert_eq!(parse("@@").attributes, Vec::<String>::new());
        assert_eq!(parse("ñandú&1").feature_type, "ñandú");
    }

    #[test]
    fn custom_notation() {
        let n = Notation {
            attribute_separator: '#',
            counter_separator: '-',
            terminal_marker: 'E',
            ..Notation::default()
        };
        let p = parse_code("WALL-4e#X", &n);
        assert_eq!(p.feature_type, "WALL");
        assert_eq!(p.counter.as_deref(), Some("4"));
        assert!(p.terminal);
        assert_eq!(p.attributes, vec!["X"]);
    }

    #[test]
    fn synthesis_rules() {
        let n = Notation::default();
        assert_eq!(synthesize(&parse("5&10"), 0, &n), "500");
        assert_eq!(synthesize(&parse("5&10F"), 1, &n), "5");
        assert_eq!(synthesize(&parse("59&1@AS@C"), 0, &n), "5900 AS C");
        assert_eq!(synthesize(&parse("99"), 0, &n), "99");
        assert_eq!(synthesize(&parse("Arbol@D"), 0, &n), "Arbol D");
    }

    #[test]
    fn synthesis_is_idempotent_on_canonical_output() {
        let n = Notation::default();
        for raw in ["5&10", "59&1@AS@C", "Muro&3", "99", "Arbol@D"] {
            for pos in [0, 1] {
                let once = synthesize(&parse(raw), pos, &n);
                let twice = synthesize(&parse(&once), pos, &n);
                assert_eq!(once, twice, "{raw} at {pos}");
            }
        }
    }
}
