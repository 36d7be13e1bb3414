//! Compressed export of the preference model
//!
//! The exported model is JSON compressed with raw deflate. It is a cache: the
//! model can always be rebuilt from tag statistics, so a missing or corrupt
//! file loads as an empty model instead of failing.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::models::PreferenceModel;

#[derive(Error, Debug)]
pub enum ModelCacheError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Model encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// File-backed model cache
#[derive(Debug, Clone)]
pub struct ModelCache {
    path: PathBuf,
}

impl ModelCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize and compress a model.
    pub fn encode(model: &PreferenceModel) -> Result<Vec<u8>, ModelCacheError> {
        let json = serde_json::to_vec(model)?;
        let io_err = |source| ModelCacheError::Io {
            path: PathBuf::from("<memory>"),
            source,
        };
        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&json).map_err(io_err)?;
        encoder.finish().map_err(io_err)
    }

    /// Inverse of [`ModelCache::encode`]; `None` on any decoding problem.
    pub fn decode(bytes: &[u8]) -> Option<PreferenceModel> {
        let mut json = Vec::new();
        DeflateDecoder::new(bytes).read_to_end(&mut json).ok()?;
        serde_json::from_slice(&json).ok()
    }

    /// Write the model, replacing any previous export atomically.
    pub async fn save(&self, model: &PreferenceModel) -> Result<(), ModelCacheError> {
        let bytes = Self::encode(model)?;
        let io_err = |source| ModelCacheError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }

        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        let staging = PathBuf::from(staging);

        tokio::fs::write(&staging, &bytes).await.map_err(io_err)?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .map_err(io_err)?;

        debug!(path = %self.path.display(), tags = model.len(), "model exported");
        Ok(())
    }

    /// Read the last export; absent or unreadable files give an empty model.
    pub async fn load(&self) -> PreferenceModel {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no exported model yet");
                return PreferenceModel::new();
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "model export unreadable, using empty model");
                return PreferenceModel::new();
            }
        };

        Self::decode(&bytes).unwrap_or_else(|| {
            warn!(path = %self.path.display(), "model export corrupt, using empty model");
            PreferenceModel::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_model() -> PreferenceModel {
        vec![("canine".to_string(), 1.0), ("solo".to_string(), 0.25)]
            .into_iter()
            .collect()
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ModelCache::new(dir.path().join("model").join("fullmodel.fbd"));

        cache.save(&sample_model()).await.unwrap();
        let loaded = cache.load().await;

        assert_eq!(loaded, sample_model());
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_model() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ModelCache::new(dir.path().join("absent.fbd"));
        assert!(cache.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_empty_model() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fullmodel.fbd");
        std::fs::write(&path, b"definitely not deflate").unwrap();

        let cache = ModelCache::new(&path);
        assert!(cache.load().await.is_empty());
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let a = ModelCache::encode(&sample_model()).unwrap();
        let b = ModelCache::encode(&sample_model()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_decodes_raw_deflate_json() {
        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
        encoder.write_all(br#"{"a":0.5,"b":1}"#).unwrap();
        let bytes = encoder.finish().unwrap();

        let model = ModelCache::decode(&bytes).unwrap();
        assert_eq!(model.get("a"), Some(0.5));
        assert_eq!(model.get("b"), Some(1.0));
    }
}
