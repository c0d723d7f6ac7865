//! Artifact file helpers
//!
//! Every output file is staged under a `.tmp` sibling and renamed into
//! place, so a file that exists under its final name is always complete.

use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::errors::{AppError, Result};

/// Write `bytes` to `path` via a temporary sibling and an atomic rename
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| AppError::io(parent, e))?;
    }

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, bytes).map_err(|e| AppError::io(&tmp, e))?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(AppError::io(path, e));
    }

    debug!(path = %path.display(), bytes = bytes.len(), "Artifact written");
    Ok(())
}

/// Read a whole artifact into memory
pub fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| AppError::io(path, e))
}

/// Hex-encoded SHA-256 of the given bytes
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
