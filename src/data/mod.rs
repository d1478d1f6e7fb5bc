//! Data layer: row model and delimited-text I/O.
//!
//! Architecture:
//! ```text
//!   field export (.txt / .csv)
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader  │  split lines → Vec<Record>
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────────────────┐
//!   │ code / grouping /    │  ParsedCode, Group, TypeRank
//!   │ sorter (crate root)  │
//!   └──────────────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader  │  Vec<Record> → delimited text
//!   └──────────┘
//! ```

pub mod loader;
pub mod model;
