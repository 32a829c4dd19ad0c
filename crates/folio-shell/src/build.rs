//! Build orchestration.
//!
//! Renders every configured page inside the shell and publishes static assets.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use folio_core::{Config, CoreError, config::PageConfig};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    assets::{AssetError, AssetManifest, AssetProcessor},
    error::RenderError,
    shell::Shell,
    template::{TemplateError, TemplateRegistry},
};

/// Build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] CoreError),

    /// Template loading error.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// Page rendering error.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// Asset error.
    #[error("asset error: {0}")]
    Asset(#[from] AssetError),

    /// A page names a body file that does not exist.
    #[error("page {route}: body file not found: {path}")]
    MissingSource { route: String, path: PathBuf },
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Build statistics.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// Number of pages written.
    pub pages: usize,

    /// Number of pages that failed to render.
    pub failed_pages: usize,

    /// Number of assets copied.
    pub assets: usize,

    /// Template overrides picked up from the templates directory.
    pub template_overrides: usize,

    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

/// Site builder that orchestrates the build process.
#[derive(Debug)]
pub struct Builder {
    config: Config,
    pages_dir: PathBuf,
    output_dir: PathBuf,
    static_dir: Option<PathBuf>,
    templates_dir: Option<PathBuf>,
}

impl Builder {
    /// Create a new builder.
    #[must_use]
    pub fn new(config: Config, pages_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            pages_dir: pages_dir.into(),
            output_dir: output_dir.into(),
            static_dir: None,
            templates_dir: None,
        }
    }

    /// Set the static assets directory.
    #[must_use]
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    /// Set the template override directory.
    #[must_use]
    pub fn with_templates_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.templates_dir = Some(dir.into());
        self
    }

    /// Execute the full build process.
    pub fn build(&self) -> Result<BuildStats> {
        let start = Instant::now();
        let mut stats = BuildStats::default();

        info!(
            pages = %self.pages_dir.display(),
            output = %self.output_dir.display(),
            "starting build"
        );

        self.config.validate()?;

        // 1. Clean output directory
        self.clean_output()?;

        // 2. Assemble the shell
        let mut templates = TemplateRegistry::new();
        if let Some(ref dir) = self.templates_dir {
            stats.template_overrides = templates.load_overrides(dir)?;
        }
        let shell = Shell::with_registry(&self.config, &templates)?;

        // 3. Render pages
        let (written, failed) = self.generate_pages(&shell);
        stats.pages = written;
        stats.failed_pages = failed;

        // 4. Publish assets
        if let Some(ref static_dir) = self.static_dir {
            let manifest = self.process_assets(static_dir)?;
            stats.assets = manifest.len();
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            pages = stats.pages,
            failed_pages = stats.failed_pages,
            assets = stats.assets,
            duration_ms = stats.duration_ms,
            "build complete"
        );

        Ok(stats)
    }

    /// Output file for a route.
    #[must_use]
    pub fn output_path(&self, route: &str) -> PathBuf {
        let relative = route.trim_matches('/');

        if relative.is_empty() {
            self.output_dir.join("index.html")
        } else {
            self.output_dir.join(relative).join("index.html")
        }
    }

    fn clean_output(&self) -> Result<()> {
        if self.output_dir.exists() {
            debug!(dir = %self.output_dir.display(), "cleaning output directory");
            fs::remove_dir_all(&self.output_dir)?;
        }
        fs::create_dir_all(&self.output_dir)?;
        Ok(())
    }

    /// Render all pages in parallel. Returns (written, failed).
    fn generate_pages(&self, shell: &Shell) -> (usize, usize) {
        info!(count = self.config.pages.len(), "generating pages");

        let results: Vec<_> = self
            .config
            .pages
            .par_iter()
            .map(|page| self.generate_page(shell, page).map_err(|e| (page, e)))
            .collect();

        let mut written = 0;
        let mut failed = 0;
        for result in results {
            match result {
                Ok(()) => written += 1,
                Err((page, e)) => {
                    warn!(route = %page.route, error = %e, "failed to generate page");
                    failed += 1;
                }
            }
        }

        (written, failed)
    }

    fn generate_page(&self, shell: &Shell, page: &PageConfig) -> Result<()> {
        let content = self.read_source(page)?;
        let html = shell.render_page(page, &content)?;
        let output_path = self.output_path(&page.route);

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output_path, html)?;

        debug!(path = %output_path.display(), "wrote page");
        Ok(())
    }

    fn read_source(&self, page: &PageConfig) -> Result<String> {
        let Some(ref source) = page.source else {
            return Ok(String::new());
        };

        let path = self.pages_dir.join(source);
        if !path.is_file() {
            return Err(BuildError::MissingSource {
                route: page.route.clone(),
                path,
            });
        }
        Ok(fs::read_to_string(path)?)
    }

    fn process_assets(&self, static_dir: &Path) -> Result<AssetManifest> {
        let dest = self.output_dir.join("static");
        let manifest = AssetProcessor::new().process(static_dir, &dest)?;

        let manifest_path = self.output_dir.join("asset-manifest.json");
        fs::write(&manifest_path, manifest.to_json()?)?;

        Ok(manifest)
    }
}
