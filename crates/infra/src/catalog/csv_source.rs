//! CSV snapshot reader.
//!
//! The first row names the fields; every later row becomes one record with
//! those keys and string values. Rows shorter than the header are padded with
//! empty strings, longer rows lose their extra cells.

use std::io::Read;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

use phonemart_core::ProductRecord;
use phonemart_core::record::ID_FIELD;

#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("failed to read catalog source {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("catalog source has no header row")]
    MissingHeader,
}

/// Read records from any CSV byte stream.
///
/// When the header has no `id` column, rows get sequential ids starting at 1.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<ProductRecord>, CatalogLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(CatalogLoadError::MissingHeader);
    }
    let has_id = headers.iter().any(|h| h == ID_FIELD);

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let row_data = result?;
        if row_data.len() > headers.len() {
            let extra: Vec<&str> = row_data.iter().skip(headers.len()).filter(|c| !c.is_empty()).collect();
            if !extra.is_empty() {
                tracing::warn!(line = row + 2, ?extra, "CSV row longer than header; extra cells dropped");
            }
        }

        let mut fields = Map::new();
        for (i, name) in headers.iter().enumerate() {
            let cell = row_data.get(i).unwrap_or("");
            fields.insert(name.clone(), Value::String(cell.to_string()));
        }
        if !has_id {
            fields.insert(ID_FIELD.to_string(), Value::String((row + 1).to_string()));
        }
        records.push(ProductRecord::from_map(fields));
    }

    Ok(records)
}

/// Read the catalog snapshot file without blocking the runtime.
pub async fn load_csv(path: &Path) -> Result<Vec<ProductRecord>, CatalogLoadError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| CatalogLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || read_csv(bytes.as_slice()))
        .await
        .map_err(|e| CatalogLoadError::Io {
            path,
            source: std::io::Error::other(e),
        })?
}
