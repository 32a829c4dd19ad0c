//! Static asset copying.
//!
//! The head references favicons and the manifest by fixed site paths under
//! `/static/`, so assets are copied verbatim and never renamed.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info};

/// Site path prefix the static directory is published under.
pub const STATIC_PREFIX: &str = "/static/";

/// Asset processing errors.
#[derive(Debug, Error)]
pub enum AssetError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid asset path.
    #[error("invalid asset path: {0}")]
    InvalidPath(PathBuf),

    /// Manifest serialization error.
    #[error("manifest error: {0}")]
    Manifest(#[from] serde_json::Error),
}

/// Result type for asset operations.
pub type Result<T> = std::result::Result<T, AssetError>;

/// Published assets keyed by site path, with their size in bytes.
#[derive(Debug, Clone, Default)]
pub struct AssetManifest {
    assets: BTreeMap<String, u64>,
}

impl AssetManifest {
    /// Create a new empty manifest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a published asset.
    pub fn add(&mut self, site_path: impl Into<String>, size: u64) {
        self.assets.insert(site_path.into(), size);
    }

    /// Whether `site_path` was published.
    #[must_use]
    pub fn contains(&self, site_path: &str) -> bool {
        self.assets.contains_key(site_path)
    }

    /// Number of assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Whether no assets were published.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Serialize manifest to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.assets)?)
    }
}

/// Copies a static directory into the output tree.
#[derive(Debug, Default)]
pub struct AssetProcessor;

impl AssetProcessor {
    /// Create a new asset processor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Copy every non-hidden file under `source_dir` into `dest_dir`.
    pub fn process(&self, source_dir: &Path, dest_dir: &Path) -> Result<AssetManifest> {
        info!(
            source = %source_dir.display(),
            dest = %dest_dir.display(),
            "processing assets"
        );

        let mut manifest = AssetManifest::new();

        if !source_dir.exists() {
            debug!("source directory does not exist, skipping");
            return Ok(manifest);
        }

        self.process_dir(source_dir, source_dir, dest_dir, &mut manifest)?;

        info!(count = manifest.len(), "assets processed");
        Ok(manifest)
    }

    fn process_dir(
        &self,
        base_dir: &Path,
        current_dir: &Path,
        dest_base: &Path,
        manifest: &mut AssetManifest,
    ) -> Result<()> {
        for entry in fs::read_dir(current_dir)? {
            let path = entry?.path();

            // Skip hidden files/directories
            if path
                .file_name()
                .is_some_and(|n| n.to_string_lossy().starts_with('.'))
            {
                continue;
            }

            if path.is_dir() {
                self.process_dir(base_dir, &path, dest_base, manifest)?;
            } else if path.is_file() {
                self.process_file(base_dir, &path, dest_base, manifest)?;
            }
        }

        Ok(())
    }

    fn process_file(
        &self,
        base_dir: &Path,
        file_path: &Path,
        dest_base: &Path,
        manifest: &mut AssetManifest,
    ) -> Result<()> {
        let relative = file_path
            .strip_prefix(base_dir)
            .map_err(|_| AssetError::InvalidPath(file_path.to_path_buf()))?;

        let dest_path = dest_base.join(relative);
        if let Some(parent) = dest_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let size = fs::copy(file_path, &dest_path)?;

        let site_path = format!("{STATIC_PREFIX}{}", relative.display()).replace('\\', "/");
        manifest.add(site_path, size);

        debug!(
            src = %file_path.display(),
            dest = %dest_path.display(),
            "copied asset"
        );

        Ok(())
    }
}

/// Site paths in `required` that `static_dir` does not provide.
///
/// Paths outside `/static/` are not checked.
#[must_use]
pub fn missing_assets<'a>(static_dir: &Path, required: &[&'a str]) -> Vec<&'a str> {
    required
        .iter()
        .copied()
        .filter(|path| {
            path.strip_prefix(STATIC_PREFIX)
                .is_some_and(|relative| !static_dir.join(relative).is_file())
        })
        .collect()
}
