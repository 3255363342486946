//! Writing a `ResourceSet` back to a `string_name,english_value` sheet.
//!
//! Only the key and default value are written. A platform file carries a
//! single language, so there are no locale columns to rebuild.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::{error::Error, types::ResourceSet};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct CSVRecord {
    pub string_name: String,
    pub english_value: String,
}

impl CSVRecord {
    pub fn records(set: &ResourceSet) -> Vec<CSVRecord> {
        set.iter()
            .map(|entry| CSVRecord {
                string_name: entry.key.clone(),
                english_value: entry.default_value.clone().unwrap_or_default(),
            })
            .collect()
    }
}

/// Writes the header row and one row per entry, in entry order.
pub fn to_writer<W: Write>(set: &ResourceSet, writer: W) -> Result<(), Error> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    if set.is_empty() {
        // serialize() only emits the header alongside the first record.
        wtr.write_record(["string_name", "english_value"])?;
    }
    for record in CSVRecord::records(set) {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Renders `set` as CSV text.
pub fn write(set: &ResourceSet) -> Result<String, Error> {
    let mut out = Vec::new();
    to_writer(set, &mut out)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}
