//! Model artifact manifest: SHA-256 digests binding the files in a model directory.
//!
//! `manifest.json` is written by the `hash_models` binary after training and
//! checked by the model loader before any artifact is parsed.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::ports::ModelError;

/// File name of the manifest inside a model directory.
pub const MANIFEST_FILE: &str = "manifest.json";

const MANIFEST_VERSION: u32 = 1;

/// Digest list for the artifacts in one directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactManifest {
    pub version: u32,
    /// Unix timestamp (seconds) when the manifest was written
    #[serde(default)]
    pub created_at: Option<i64>,
    /// File name -> lowercase hex SHA-256
    pub files: BTreeMap<String, String>,
}

#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

fn io_error(path: &Path, source: std::io::Error) -> ModelError {
    ModelError::Io {
        path: path.display().to_string(),
        source,
    }
}

impl ArtifactManifest {
    /// Hash the named files in `dir`.
    ///
    /// # Errors
    /// Returns `ModelError::Io` if a file cannot be read.
    pub fn build<'a, I>(dir: &Path, file_names: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut files = BTreeMap::new();
        for name in file_names {
            let path = dir.join(name);
            let bytes = fs::read(&path).map_err(|e| io_error(&path, e))?;
            files.insert(name.to_string(), sha256_hex(&bytes));
        }

        let created_at = chrono::Utc::now().timestamp();
        Ok(Self {
            version: MANIFEST_VERSION,
            created_at: Some(created_at),
            files,
        })
    }

    /// Read `manifest.json` from `dir`, if present.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read(dir: &Path) -> Result<Option<Self>, ModelError> {
        let path = dir.join(MANIFEST_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read(&path).map_err(|e| io_error(&path, e))?;
        let manifest: Self = serde_json::from_slice(&content).map_err(|e| ModelError::Parse {
            path: path.display().to_string(),
            source: e,
        })?;
        if manifest.version != MANIFEST_VERSION {
            return Err(ModelError::ManifestMismatch(format!(
                "unsupported manifest version {}",
                manifest.version
            )));
        }
        Ok(Some(manifest))
    }

    /// Write this manifest as `manifest.json` in `dir`.
    ///
    /// # Errors
    /// Returns `ModelError::Io` if the file cannot be written.
    pub fn write(&self, dir: &Path) -> Result<(), ModelError> {
        let path = dir.join(MANIFEST_FILE);
        let bytes = serde_json::to_vec_pretty(self).map_err(|e| {
            ModelError::InvalidArtifact(format!("cannot serialize manifest: {e}"))
        })?;
        fs::write(&path, bytes).map_err(|e| io_error(&path, e))
    }

    /// Check that `bytes` are the listed content of `file_name`.
    ///
    /// # Errors
    /// Returns `ModelError::ManifestMismatch` if the file is unlisted or its digest differs.
    pub fn verify(&self, file_name: &str, bytes: &[u8]) -> Result<(), ModelError> {
        let expected = self.files.get(file_name).ok_or_else(|| {
            ModelError::ManifestMismatch(format!("{file_name} is not listed in {MANIFEST_FILE}"))
        })?;

        if !expected.eq_ignore_ascii_case(&sha256_hex(bytes)) {
            return Err(ModelError::ManifestMismatch(format!(
                "digest mismatch for {file_name}"
            )));
        }
        Ok(())
    }
}
