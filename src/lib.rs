//! Canonicalization of survey field-data codes.
//!
//! Each exported row ends in a code such as `59&1F@AS` (type `59`, polyline
//! counter `1`, terminal marker, attribute `AS`). The crate groups points of
//! the same polyline, orders them by a numeric key and rewrites the codes so
//! the first point of each polyline carries a start marker.

pub mod adjacency;
pub mod code;
pub mod data;
pub mod error;
pub mod grouping;
pub mod pipeline;
pub mod settings;
pub mod sorter;

pub use code::{parse_code, synthesize, Notation};
pub use data::model::{Group, GroupKey, ParsedCode, Record};
pub use error::CanonError;
pub use pipeline::{canonicalize, derive_output_path, process_file, Mode, Summary};
pub use settings::Settings;
