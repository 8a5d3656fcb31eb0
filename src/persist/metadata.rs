//! Plain-text metadata record stored next to a model payload.
//!
//! The record is exactly three `key=value` lines in a fixed order:
//!
//! ```text
//! format=<envelope format version>
//! name=<classifier name>
//! version=<classifier schema version>
//! ```
//!
//! A value is everything after the first `=` on its line.

use crate::error::{ClassifierError, Result};

const FORMAT_KEY: &str = "format";
const NAME_KEY: &str = "name";
const VERSION_KEY: &str = "version";

/// Identity of a persisted model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelMetadata {
    pub format_version: String,
    pub model_name: String,
    pub schema_version: String,
}

impl ModelMetadata {
    pub fn new<F, N, V>(format_version: F, model_name: N, schema_version: V) -> Self
    where
        F: Into<String>,
        N: Into<String>,
        V: Into<String>,
    {
        ModelMetadata {
            format_version: format_version.into(),
            model_name: model_name.into(),
            schema_version: schema_version.into(),
        }
    }

    fn fields(&self) -> [(&'static str, &str); 3] {
        [
            (FORMAT_KEY, &self.format_version),
            (NAME_KEY, &self.model_name),
            (VERSION_KEY, &self.schema_version),
        ]
    }

    /// Render the record.
    ///
    /// # Errors
    ///
    /// [`ClassifierError::InvalidArgument`] if a value contains a line break.
    pub fn to_record(&self) -> Result<String> {
        let mut record = String::new();
        for (key, value) in self.fields() {
            if value.contains(['\n', '\r']) {
                return Err(ClassifierError::invalid_argument(format!(
                    "metadata value for {key} contains a line break"
                )));
            }
            record.push_str(key);
            record.push('=');
            record.push_str(value);
            record.push('\n');
        }
        Ok(record)
    }

    /// Parse a record.
    ///
    /// # Errors
    ///
    /// [`ClassifierError::Storage`] on a wrong line count, a missing `=`, or an
    /// unexpected key.
    pub fn parse(record: &str) -> Result<Self> {
        let lines: Vec<&str> = record.lines().collect();
        if lines.len() != 3 {
            return Err(ClassifierError::storage(format!(
                "metadata must have 3 fields, found {}",
                lines.len()
            )));
        }

        let values = [FORMAT_KEY, NAME_KEY, VERSION_KEY]
            .into_iter()
            .zip(lines)
            .map(|(expected, line)| {
                let (key, value) = line.split_once('=').ok_or_else(|| {
                    ClassifierError::storage(format!("metadata line without '=': {line:?}"))
                })?;
                if key != expected {
                    return Err(ClassifierError::storage(format!(
                        "expected metadata key {expected}, found {key:?}"
                    )));
                }
                Ok(value.to_string())
            })
            .collect::<Result<Vec<String>>>()?;

        let [format_version, model_name, schema_version]: [String; 3] = values
            .try_into()
            .map_err(|_| ClassifierError::storage("metadata must have 3 fields"))?;
        Ok(ModelMetadata {
            format_version,
            model_name,
            schema_version,
        })
    }

    /// Parse a record from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let record = std::str::from_utf8(bytes)
            .map_err(|_| ClassifierError::storage("metadata is not UTF-8"))?;
        Self::parse(record)
    }
}
