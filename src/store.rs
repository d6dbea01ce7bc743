// Flat-file persistence
//
// Each collection lives in one comma-delimited file with a fixed header row.
// Loads read the whole file once; saves rewrite the whole file through a
// sibling temp file that is renamed over the target.

use serde::{de::DeserializeOwned, Serialize};
use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::error::ShopResult;

/// Decimal columns stored as text
///
/// Use with `#[serde(with = "crate::store::decimal_text")]`. Reading accepts
/// plain decimals ("9.99") as well as scientific notation ("1e-05").
pub mod decimal_text {
    use rust_decimal::Decimal;
    use serde::{de, Deserialize, Deserializer, Serializer};
    use std::str::FromStr;

    /// Parse decimal text, falling back to scientific notation
    ///
    /// # Arguments
    /// * `text` - Decimal text, surrounding whitespace allowed
    ///
    /// # Returns
    /// The parsed value or the error from the scientific-notation attempt
    pub fn parse(text: &str) -> Result<Decimal, rust_decimal::Error> {
        let trimmed = text.trim();
        Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed))
    }

    pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse(&text).map_err(|err| de::Error::custom(format!("invalid decimal '{text}': {err}")))
    }
}

/// A row type that can be stored in a `CsvStore`
pub trait Record: Serialize + DeserializeOwned {
    /// Header row written at the top of every file
    const HEADERS: &'static [&'static str];
}

/// Whole-file store for one collection of records
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    /// Create a store backed by the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record from the file
    ///
    /// A missing file is an empty collection. The header row is skipped.
    /// Any row that fails to parse aborts the load.
    pub fn load<T: Record>(&self) -> ShopResult<Vec<T>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!("{} not found, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(file);

        // Columns are matched by position; the header text is not checked
        let records = reader
            .records()
            .map(|row| row.and_then(|row| row.deserialize::<T>(None)))
            .collect::<Result<Vec<T>, csv::Error>>()?;

        tracing::info!("Loaded {} rows from {}", records.len(), self.path.display());
        Ok(records)
    }

    /// Replace the file contents with the header plus one row per record
    pub fn save<T: Record>(&self, records: &[T]) -> ShopResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut staged = NamedTempFile::new_in(dir)?;
        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .terminator(csv::Terminator::Any(b'\n'))
                .from_writer(staged.as_file_mut());

            writer.write_record(T::HEADERS)?;
            for record in records {
                writer.serialize(record)?;
            }
            writer.flush()?;
        }
        staged.persist(&self.path).map_err(|err| err.error)?;

        tracing::debug!("Wrote {} rows to {}", records.len(), self.path.display());
        Ok(())
    }
}
