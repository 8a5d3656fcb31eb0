//! Saving and loading trained classifiers.
//!
//! A model file is an [`archive::Archive`] with two members:
//!
//! - `model.bin`: the classifier state, bincode-encoded
//! - `meta.txt`: a [`metadata::ModelMetadata`] record naming the envelope
//!   format, the classifier and its state schema version
//!
//! Loading checks the metadata before touching the payload. A file written by
//! a different classifier, schema version or envelope format is rejected with
//! [`ClassifierError::IncompatibleModel`] and the target classifier is left
//! exactly as it was.
//!
//! # Example
//!
//! ```
//! use textclass::classification::NaiveBayesClassifier;
//! use textclass::persist::Persist;
//!
//! # fn main() -> textclass::error::Result<()> {
//! let dir = tempfile::TempDir::new()?;
//! let path = dir.path().join("sentiment.model");
//!
//! let mut classifier = NaiveBayesClassifier::new();
//! classifier.learn("great movie", "positive")?;
//! classifier.learn("terrible film", "negative")?;
//! classifier.save(&path)?;
//!
//! let mut restored = NaiveBayesClassifier::new();
//! restored.load(&path)?;
//! assert_eq!(restored.classify("great")?.label, "positive");
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ClassifierError, Result};

pub mod archive;
pub mod metadata;

pub use archive::Archive;
pub use metadata::ModelMetadata;

/// Version of the envelope layout (members and metadata record).
pub const FORMAT_VERSION: &str = "1";

/// Archive member holding the encoded state.
pub const MODEL_MEMBER: &str = "model.bin";

/// Archive member holding the metadata record.
pub const METADATA_MEMBER: &str = "meta.txt";

/// A classifier whose learned state can be written to and read from disk.
pub trait Persist {
    /// Logical model name recorded in the metadata.
    const MODEL_NAME: &'static str;

    /// Version of [`Persist::State`]. Bump when its layout changes.
    const SCHEMA_VERSION: &'static str;

    /// Everything needed to restore the classifier.
    type State: Serialize + DeserializeOwned;

    /// Snapshot the learned state.
    fn export_state(&self) -> Self::State;

    /// Replace the learned state.
    ///
    /// Only called with states that passed [`Persist::validate_state`].
    fn import_state(&mut self, state: Self::State);

    /// Check the cross-field invariants of a decoded state.
    fn validate_state(_state: &Self::State) -> Result<()> {
        Ok(())
    }

    /// Save to `path`. See [`save`].
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        save(self, path)
    }

    /// Load from `path`. See [`load`].
    fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        load(path, self)
    }
}

/// Decoded contents of a model file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelEnvelope {
    pub metadata: ModelMetadata,
    pub payload: Vec<u8>,
}

impl ModelEnvelope {
    /// Write the envelope to `path` atomically.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut archive = Archive::new();
        archive.add(MODEL_MEMBER, self.payload.clone())?;
        archive.add(METADATA_MEMBER, self.metadata.to_record()?.into_bytes())?;
        archive.save(path)
    }

    /// Read an envelope from `path`.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let archive = Archive::open(path)?;
        let metadata = ModelMetadata::from_bytes(archive.require(METADATA_MEMBER)?)?;
        let payload = archive.require(MODEL_MEMBER)?.to_vec();
        Ok(ModelEnvelope { metadata, payload })
    }

    /// Inspect which model a file holds without decoding its state.
    pub fn read_metadata<P: AsRef<Path>>(path: P) -> Result<ModelMetadata> {
        Ok(Self::read(path)?.metadata)
    }

    /// Check that this envelope was written for `C`.
    pub fn check_compatible<C: Persist + ?Sized>(&self) -> Result<()> {
        let metadata = &self.metadata;
        if metadata.format_version != FORMAT_VERSION {
            return Err(ClassifierError::incompatible_model(format!(
                "envelope format {:?}, expected {:?}",
                metadata.format_version, FORMAT_VERSION
            )));
        }
        if metadata.model_name != C::MODEL_NAME {
            return Err(ClassifierError::incompatible_model(format!(
                "model {:?}, expected {:?}",
                metadata.model_name,
                C::MODEL_NAME
            )));
        }
        if metadata.schema_version != C::SCHEMA_VERSION {
            return Err(ClassifierError::incompatible_model(format!(
                "{} schema version {:?}, expected {:?}",
                C::MODEL_NAME,
                metadata.schema_version,
                C::SCHEMA_VERSION
            )));
        }
        Ok(())
    }
}

/// Write `classifier`'s state to `path`.
pub fn save<C, P>(classifier: &C, path: P) -> Result<()>
where
    C: Persist + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let payload = bincode::serialize(&classifier.export_state())
        .map_err(|e| ClassifierError::serialization(e.to_string()))?;

    let envelope = ModelEnvelope {
        metadata: ModelMetadata::new(FORMAT_VERSION, C::MODEL_NAME, C::SCHEMA_VERSION),
        payload,
    };
    envelope.write(path)?;

    log::info!(
        "saved {} model ({} bytes) to {}",
        C::MODEL_NAME,
        envelope.payload.len(),
        path.display()
    );
    Ok(())
}

/// Read and decode the state stored at `path` for classifier type `C`.
pub fn load_state<C, P>(path: P) -> Result<C::State>
where
    C: Persist + ?Sized,
    P: AsRef<Path>,
{
    let envelope = ModelEnvelope::read(path)?;
    envelope.check_compatible::<C>()?;
    let state: C::State = bincode::deserialize(&envelope.payload)
        .map_err(|e| ClassifierError::serialization(e.to_string()))?;
    C::validate_state(&state).map_err(|e| {
        ClassifierError::serialization(format!("invalid {} state: {e}", C::MODEL_NAME))
    })?;
    Ok(state)
}

/// Replace `classifier`'s state with the one stored at `path`.
///
/// On any error the classifier is left unchanged.
pub fn load<C, P>(path: P, classifier: &mut C) -> Result<()>
where
    C: Persist + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let state = load_state::<C, _>(path)?;
    classifier.import_state(state);
    log::info!("loaded {} model from {}", C::MODEL_NAME, path.display());
    Ok(())
}
