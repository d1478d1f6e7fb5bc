use std::io;
use std::path::Path;

use serde::Deserialize;

use crate::code::Notation;
use crate::error::{CanonError, Result};
use crate::pipeline::Mode;

// ---------------------------------------------------------------------------
// Run settings
// ---------------------------------------------------------------------------

/// Layout and notation of one run. Every field has a default, so a settings
/// file only needs the keys it changes:
///
/// ```json
/// { "mode": "by-type", "key_field": 0, "notation": { "terminal_marker": "E" } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub mode: Mode,
    /// Zero-based index of the numeric ordering-key field. Known exports put
    /// it at 1 (`station,point,...,code`) or at 0 (`point,...,code`).
    pub key_field: usize,
    /// Field delimiter; must be a single ASCII character.
    pub delimiter: char,
    /// Appended to the input's file stem when no output path is given.
    pub output_suffix: String,
    pub notation: Notation,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            key_field: 1,
            delimiter: ',',
            output_suffix: "canon".to_string(),
            notation: Notation::default(),
        }
    }
}

impl Settings {
    /// Read settings from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let wrap = |source: io::Error| CanonError::Settings {
            path: path.to_path_buf(),
            source,
        };
        let text = std::fs::read_to_string(path).map_err(wrap)?;
        let settings: Settings = serde_json::from_str(&text).map_err(|e| wrap(e.into()))?;
        settings.delimiter_byte().map_err(wrap)?;
        Ok(settings)
    }

    /// The delimiter as the single byte the CSV reader and writer expect.
    pub fn delimiter_byte(&self) -> io::Result<u8> {
        delimiter_byte(self.delimiter)
    }
}

pub fn delimiter_byte(delimiter: char) -> io::Result<u8> {
    if delimiter.is_ascii() && delimiter != '\n' && delimiter != '\r' {
        Ok(delimiter as u8)
    } else {
        Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("delimiter {delimiter:?} is not a single ASCII character"),
        ))
    }
}
