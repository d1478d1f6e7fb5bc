use std::borrow::Cow;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use csv::{ByteRecord, QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};
use log::debug;

use super::model::Record;
use crate::error::{CanonError, Result};

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Load all records from a delimited text file.
///
/// Layout: no header row, any number of fields per line, the last field is
/// the code. Fields are split on the delimiter exactly as written (no quote
/// handling). Blank lines are skipped.
pub fn load_records(path: &Path, delimiter: u8) -> Result<Vec<Record>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => CanonError::MissingInputFile {
            path: path.to_path_buf(),
        },
        _ => CanonError::Read {
            path: path.to_path_buf(),
            source: e.into(),
        },
    })?;

    read_records(file, delimiter).map_err(|source| CanonError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse records from any reader. See [`load_records`] for the layout.
pub fn read_records<R: Read>(
    reader: R,
    delimiter: u8,
) -> std::result::Result<Vec<Record>, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .delimiter(delimiter)
        .from_reader(reader);

    let mut records = Vec::new();
    for (row_no, result) in reader.byte_records().enumerate() {
        let row = result?;
        let line = row
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(row_no + 1);
        let fields = decode_fields(&row, line);
        if fields.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        if fields.len() < 2 {
            debug!("line {line}: single-field row, ordering key will default to 0");
        }
        records.push(Record::new(line, fields));
    }
    Ok(records)
}

/// Fields as text. Bytes that are not UTF-8 (Latin-1 exports) become U+FFFD
/// instead of failing the whole file.
fn decode_fields(row: &ByteRecord, line: usize) -> Vec<String> {
    row.iter()
        .enumerate()
        .map(|(index, bytes)| match String::from_utf8_lossy(bytes) {
            Cow::Borrowed(text) => text.to_string(),
            Cow::Owned(text) => {
                debug!("line {line}: field {index} is not valid UTF-8, read as {text:?}");
                text
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Write records to `path`, one line each, never quoting.
pub fn write_records(path: &Path, records: &[Record], delimiter: u8) -> Result<()> {
    let wrap = |source: io::Error| CanonError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(wrap)?;
    write_to(file, records, delimiter).map_err(|e| wrap(e.into()))
}

/// Serialize records into any writer.
pub fn write_to<W: Write>(
    writer: W,
    records: &[Record],
    delimiter: u8,
) -> std::result::Result<(), csv::Error> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .delimiter(delimiter)
        .from_writer(writer);

    for record in records {
        writer.write_record(&record.fields)?;
    }
    writer.flush()?;
    Ok(())
}
