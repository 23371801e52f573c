//! Artifact persistence - one JSON file per fitted stage.
//!
//! Each stage's frozen state round-trips through serde_json with the
//! float_roundtrip feature, so scaling bounds and Gaussian parameters
//! survive save/load bit for bit. States that
//! carry a manifest (scaler, selector) persist it inline; the post-combine
//! manifest is its own file so the serving side can check raw layout before
//! touching any stage.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::pipeline::{
    ClassifierState, CleanerState, ColumnManifest, EncodingTable, ScalerState, SelectorState,
    TrainConfig, TrainedArtifacts,
};

const CLEANER_FILE: &str = "cleaner.json";
const ENCODER_FILE: &str = "encoding_table.json";
const COMBINED_MANIFEST_FILE: &str = "combined_manifest.json";
const SCALER_FILE: &str = "scaler.json";
const SELECTOR_FILE: &str = "selector.json";
const CLASSIFIER_FILE: &str = "classifier.json";
const METADATA_FILE: &str = "metadata.json";

/// Provenance for one artifact generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    /// Timestamp of the fit run (ISO 8601 format)
    pub timestamp: String,
    /// Riskpipe version that produced the artifacts
    pub riskpipe_version: String,
    /// The configuration the run used, for exact reproduction
    pub config: TrainConfig,
}

/// A directory of persisted stage snapshots.
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist every stage snapshot plus run metadata.
    ///
    /// One fit run produces one artifact generation; callers must not
    /// interleave concurrent saves into the same directory.
    pub fn save(&self, artifacts: &TrainedArtifacts, config: &TrainConfig) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create artifact directory {}", self.dir.display()))?;

        self.write_json(CLEANER_FILE, &artifacts.cleaner)?;
        self.write_json(ENCODER_FILE, &artifacts.encoder)?;
        self.write_json(COMBINED_MANIFEST_FILE, &artifacts.combined_manifest)?;
        self.write_json(SCALER_FILE, &artifacts.scaler)?;
        self.write_json(SELECTOR_FILE, &artifacts.selector)?;
        self.write_json(CLASSIFIER_FILE, &artifacts.classifier)?;

        let metadata = ArtifactMetadata {
            timestamp: Utc::now().to_rfc3339(),
            riskpipe_version: env!("CARGO_PKG_VERSION").to_string(),
            config: config.clone(),
        };
        self.write_json(METADATA_FILE, &metadata)
    }

    /// Load every stage snapshot back. Individual stages stay independently
    /// loadable through the typed helpers below.
    pub fn load(&self) -> Result<TrainedArtifacts> {
        Ok(TrainedArtifacts {
            cleaner: self.load_cleaner()?,
            encoder: self.load_encoder()?,
            combined_manifest: self.load_combined_manifest()?,
            scaler: self.load_scaler()?,
            selector: self.load_selector()?,
            classifier: self.load_classifier()?,
        })
    }

    pub fn load_cleaner(&self) -> Result<CleanerState> {
        self.read_json(CLEANER_FILE)
    }

    pub fn load_encoder(&self) -> Result<EncodingTable> {
        self.read_json(ENCODER_FILE)
    }

    pub fn load_combined_manifest(&self) -> Result<ColumnManifest> {
        self.read_json(COMBINED_MANIFEST_FILE)
    }

    pub fn load_scaler(&self) -> Result<ScalerState> {
        self.read_json(SCALER_FILE)
    }

    pub fn load_selector(&self) -> Result<SelectorState> {
        self.read_json(SELECTOR_FILE)
    }

    pub fn load_classifier(&self) -> Result<ClassifierState> {
        self.read_json(CLASSIFIER_FILE)
    }

    pub fn load_metadata(&self) -> Result<ArtifactMetadata> {
        self.read_json(METADATA_FILE)
    }

    fn write_json<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let path = self.dir.join(name);
        let json = serde_json::to_string_pretty(value)
            .with_context(|| format!("Failed to serialize artifact '{}'", name))?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write artifact {}", path.display()))
    }

    fn read_json<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let path = self.dir.join(name);
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read artifact {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse artifact {}", path.display()))
    }
}
