use sha2::{Digest, Sha256};
use std::{fs, path::Path};

use crate::error::{GateError, Result};
use crate::report::model::{ArtifactHash, ArtifactInfo};

/// Raw SARIF input used during gating.
///
/// Holds the exact bytes parsed and a fingerprint that identifies them.
#[derive(Debug, Clone)]
pub struct SarifInput {
    /// Source path (informational only).
    pub path: Option<String>,

    /// Exact bytes read from disk.
    pub bytes: Vec<u8>,

    pub size_bytes: u64,

    pub hash_alg: String,

    /// Hex-encoded hash of `bytes`.
    pub hash_hex: String,
}

impl SarifInput {
    /// Fingerprint raw bytes that did not come from disk.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let hash_hex = hex::encode(Sha256::digest(&bytes));
        Self {
            path: None,
            size_bytes: bytes.len() as u64,
            bytes,
            hash_alg: "sha256".to_string(),
            hash_hex,
        }
    }

    /// Report-facing metadata. Raw bytes are dropped.
    pub fn into_artifact(self) -> ArtifactInfo {
        ArtifactInfo {
            path: self.path,
            size_bytes: self.size_bytes,
            hash: ArtifactHash {
                algorithm: self.hash_alg,
                value: self.hash_hex,
            },
        }
    }
}

/// Read a SARIF file and fingerprint its contents.
///
/// A missing path is reported as [`GateError::InputNotFound`] before any
/// read is attempted.
pub fn read_input(path: &Path) -> Result<SarifInput> {
    tracing::debug!(path = %path.display(), "reading SARIF input");

    if !path.exists() {
        return Err(GateError::InputNotFound(path.to_path_buf()));
    }

    let bytes = fs::read(path).map_err(|source| GateError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(SarifInput {
        path: Some(path.display().to_string()),
        ..SarifInput::from_bytes(bytes)
    })
}
