use serde::Deserialize;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::MooringRow;
use crate::utils::constants::COLUMN_NAMES;

/// ERDDAP tabledap JSON response: `{"table": {"columnNames": [...], "rows": [[...]]}}`
#[derive(Debug, Deserialize)]
pub struct TableDocument {
    pub table: TableContainer,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableContainer {
    #[serde(default)]
    pub column_names: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

pub struct TableReader;

impl TableReader {
    pub fn new() -> Self {
        Self
    }

    /// Decode rows from a JSON document on disk
    pub fn read_file(&self, path: &Path) -> Result<Vec<MooringRow>> {
        let file = File::open(path)?;
        self.read_from(BufReader::new(file))
    }

    pub fn read_from<R: Read>(&self, reader: R) -> Result<Vec<MooringRow>> {
        let document: TableDocument = serde_json::from_reader(reader)?;
        self.decode_document(document)
    }

    pub fn read_slice(&self, bytes: &[u8]) -> Result<Vec<MooringRow>> {
        let document: TableDocument = serde_json::from_slice(bytes)?;
        self.decode_document(document)
    }

    /// Decode every row in order. The first malformed row aborts decoding.
    pub fn decode_document(&self, document: TableDocument) -> Result<Vec<MooringRow>> {
        let table = document.table;

        // Column order is positional; names are informational only
        if !table.column_names.is_empty()
            && !table
                .column_names
                .iter()
                .map(String::as_str)
                .eq(COLUMN_NAMES.iter().copied())
        {
            warn!(
                columns = ?table.column_names,
                "column names differ from the expected order; decoding by position"
            );
        }

        let rows = table
            .rows
            .iter()
            .enumerate()
            .map(|(index, values)| MooringRow::from_values(values, index))
            .collect::<Result<Vec<_>>>()?;

        debug!(rows = rows.len(), "decoded table rows");

        if rows.is_empty() {
            warn!("table contains no rows");
        }

        Ok(rows)
    }
}

impl Default for TableReader {
    fn default() -> Self {
        Self::new()
    }
}
