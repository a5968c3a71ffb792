//! Manifest discovery and loading

use crate::toml::{load_from_file, Manifest};
use crate::ManifestResult;
use camino::{Utf8Path, Utf8PathBuf};
use vetch_core::error::VetchError;

/// Manifest file name searched for
pub const MANIFEST_FILENAME: &str = "vetch.toml";

/// Locates and loads the project manifest
pub struct ManifestLoader {
    /// Current working directory
    cwd: Utf8PathBuf,
}

impl ManifestLoader {
    /// Create a new manifest loader
    pub fn new(cwd: Utf8PathBuf) -> Self {
        Self { cwd }
    }

    /// Load the project manifest, walking up from the working directory
    pub async fn load(&self) -> ManifestResult<(Manifest, Utf8PathBuf)> {
        let path = self.resolve_manifest_path()?;
        let manifest = load_from_file(&path).await?;
        Ok((manifest, path))
    }

    /// Find the manifest in the working directory or a parent of it
    pub fn resolve_manifest_path(&self) -> ManifestResult<Utf8PathBuf> {
        let mut current: &Utf8Path = self.cwd.as_path();

        loop {
            let candidate = current.join(MANIFEST_FILENAME);
            if candidate.exists() {
                return Ok(candidate);
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }

        Err(VetchError::Validation {
            field: "manifest".to_string(),
            reason: format!(
                "No {} found in {} or any parent directory",
                MANIFEST_FILENAME, self.cwd
            ),
        })
    }
}
