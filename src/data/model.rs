use std::cmp::Ordering;
use std::fmt;

// ---------------------------------------------------------------------------
// Record – one line of the field-data export
// ---------------------------------------------------------------------------

/// A single input row. Records are built once by the loader and never edited;
/// every stage that changes a code produces a new `Record` via [`Record::with_code`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 1-based line number in the source file (0 for synthetic rows).
    pub line: usize,
    /// Raw fields in file order. The last one is the code field.
    pub fields: Vec<String>,
}

impl Record {
    pub fn new(line: usize, fields: Vec<String>) -> Self {
        Self { line, fields }
    }

    /// The trailing code field, or `""` for a record without fields.
    pub fn code(&self) -> &str {
        self.fields.last().map(String::as_str).unwrap_or("")
    }

    /// Numeric ordering key read from `key_field`.
    ///
    /// Missing fields and anything that does not parse as a real number
    /// (including `NaN`) count as `0`.
    pub fn ordering_key(&self, key_field: usize) -> f64 {
        self.fields
            .get(key_field)
            .and_then(|f| f.trim().parse::<f64>().ok())
            .filter(|v| !v.is_nan())
            .unwrap_or(0.0)
    }

    /// A copy of this record with its code field replaced.
    pub fn with_code(&self, code: String) -> Record {
        let mut fields = self.fields.clone();
        match fields.last_mut() {
            Some(last) => *last = code,
            None => fields.push(code),
        }
        Record {
            line: self.line,
            fields,
        }
    }
}

// ---------------------------------------------------------------------------
// ParsedCode – decomposed code field
// ---------------------------------------------------------------------------

/// Structured view of a code such as `Muro&3F@AS@C`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedCode {
    /// Feature category, e.g. `59`, `Muro`, `A&B` (embedded separators are kept).
    pub feature_type: String,
    /// Polyline sequence identity. `None` for isolated points.
    pub counter: Option<String>,
    /// The base code carried an end-of-line marker.
    pub terminal: bool,
    /// Free-form suffix tokens, in input order.
    pub attributes: Vec<String>,
}

impl ParsedCode {
    /// Whether this code belongs to a numbered polyline.
    pub fn is_polyline(&self) -> bool {
        self.counter.is_some()
    }

    /// The (type, counter) identity used for adjacency and grouping.
    pub fn identity(&self) -> Identity<'_> {
        Identity {
            feature_type: &self.feature_type,
            counter: self.counter.as_deref(),
        }
    }

    /// True when the parser had to fall back: empty type or empty counter.
    pub fn is_degenerate(&self) -> bool {
        self.feature_type.is_empty() || self.counter.as_deref() == Some("")
    }
}

/// Borrowed (type, counter) pair. Attributes and terminal markers are not part
/// of a point's identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity<'a> {
    pub feature_type: &'a str,
    pub counter: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Grouping types
// ---------------------------------------------------------------------------

/// Key of a group. Isolated points get a synthetic key of their own so that
/// two of them never merge.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Polyline { feature_type: String, counter: String },
    Isolated(usize),
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Polyline {
                feature_type,
                counter,
            } => write!(f, "{feature_type}#{counter}"),
            GroupKey::Isolated(n) => write!(f, "isolated-{n}"),
        }
    }
}

/// A record paired with its parsed code and ordering key.
#[derive(Debug, Clone)]
pub struct Point<'a> {
    pub record: &'a Record,
    pub code: ParsedCode,
    /// Numeric ordering key (never `NaN`).
    pub key: f64,
    /// Position of the record in the input.
    pub seq: usize,
}

/// All points sharing one [`GroupKey`].
#[derive(Debug, Clone)]
pub struct Group<'a> {
    pub key: GroupKey,
    pub points: Vec<Point<'a>>,
    /// Smallest ordering key; only known once the points are sorted.
    pub min_key: Option<f64>,
    /// Input position of the group's first point, used as tie-break.
    pub first_seen: usize,
}

impl<'a> Group<'a> {
    pub fn new(key: GroupKey, first: Point<'a>) -> Self {
        Group {
            key,
            first_seen: first.seq,
            points: vec![first],
            min_key: None,
        }
    }

    pub fn is_polyline(&self) -> bool {
        matches!(self.key, GroupKey::Polyline { .. })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

// ---------------------------------------------------------------------------
// TypeRank – numeric-before-text ordering of feature types and counters
// ---------------------------------------------------------------------------

/// Two-tier sort key: every numeric-looking token sorts before every textual
/// one; numbers compare by value, text compares lexically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypeRank<'a> {
    Numeric(f64),
    Text(&'a str),
}

impl<'a> TypeRank<'a> {
    pub fn of(token: &'a str) -> Self {
        match token.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => TypeRank::Numeric(v),
            _ => TypeRank::Text(token),
        }
    }
}

// -- Manual Eq/Ord: Numeric never holds NaN --

impl Eq for TypeRank<'_> {}

impl PartialOrd for TypeRank<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeRank<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (TypeRank::Numeric(a), TypeRank::Numeric(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (TypeRank::Numeric(_), TypeRank::Text(_)) => Ordering::Less,
            (TypeRank::Text(_), TypeRank::Numeric(_)) => Ordering::Greater,
            (TypeRank::Text(a), TypeRank::Text(b)) => a.cmp(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(fields: &[&str]) -> Record {
        Record::new(1, fields.iter().map(|f| f.to_string()).collect())
    }

    #[test]
    fn ordering_key_defaults_to_zero() {
        let r = rec(&["A", "12.5", "5&10"]);
        assert_eq!(r.ordering_key(1), 12.5);
        assert_eq!(r.ordering_key(0), 0.0);
        assert_eq!(r.ordering_key(7), 0.0);
        assert_eq!(rec(&["nan", "x"]).ordering_key(0), 0.0);
        assert_eq!(rec(&[" 3 ", "x"]).ordering_key(0), 3.0);
    }

    #[test]
    fn with_code_leaves_original_untouched() {
        let r = rec(&["A", "1", "5&10"]);
        let out = r.with_code("500".into());
        assert_eq!(r.code(), "5&10");
        assert_eq!(out.code(), "500");
        assert_eq!(out.fields[..2], r.fields[..2]);
        assert_eq!(Record::new(3, vec![]).with_code("x".into()).fields, vec!["x"]);
    }

    #[test]
    fn numeric_types_sort_before_text() {
        let mut types = vec!["Muro", "10", "Arbol", "9", "2.5", "0A"];
        types.sort_by_key(|t| TypeRank::of(*t));
        assert_eq!(types, vec!["2.5", "9", "10", "0A", "Arbol", "Muro"]);
    }

    #[test]
    fn non_finite_tokens_rank_as_text() {
        assert_eq!(TypeRank::of("inf"), TypeRank::Text("inf"));
        assert_eq!(TypeRank::of("NaN"), TypeRank::Text("NaN"));
        assert_eq!(TypeRank::of("1e2"), TypeRank::Numeric(100.0));
    }
}
