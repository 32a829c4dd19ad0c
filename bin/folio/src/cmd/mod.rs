//! CLI command implementations.

pub mod build;
pub mod check;
pub mod init;
pub mod serve;

use std::path::{Path, PathBuf};

use folio_core::Config;
use folio_shell::Builder;

/// Directories of a site, resolved relative to its config file.
#[derive(Debug, Clone)]
pub struct SiteDirs {
    /// Page body fragments.
    pub pages: PathBuf,
    /// Static assets.
    pub static_files: PathBuf,
    /// Template overrides.
    pub templates: PathBuf,
    /// Generated site.
    pub output: PathBuf,
}

impl SiteDirs {
    /// Resolve the configured directories against the config file location.
    #[must_use]
    pub fn resolve(config_path: &Path, config: &Config) -> Self {
        let root = config_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        Self {
            pages: root.join(&config.build.pages_dir),
            static_files: root.join(&config.build.static_dir),
            templates: root.join(&config.build.templates_dir),
            output: root.join(&config.build.output_dir),
        }
    }

    /// A builder for `config` writing to `output`.
    #[must_use]
    pub fn builder(&self, config: Config, output: &Path) -> Builder {
        let mut builder = Builder::new(config, &self.pages, output)
            .with_templates_dir(&self.templates);

        if self.static_files.is_dir() {
            tracing::info!("Found static directory, will copy to output");
            builder = builder.with_static_dir(&self.static_files);
        }
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_to_config() {
        let config = Config::default();
        let dirs = SiteDirs::resolve(Path::new("site/folio.toml"), &config);
        assert_eq!(dirs.pages, PathBuf::from("site/pages"));
        assert_eq!(dirs.static_files, PathBuf::from("site/static"));
        assert_eq!(dirs.templates, PathBuf::from("site/templates"));
        assert_eq!(dirs.output, PathBuf::from("site/public"));
    }

    #[test]
    fn test_resolve_bare_config_name() {
        let config = Config::default();
        let dirs = SiteDirs::resolve(Path::new("folio.toml"), &config);
        assert_eq!(dirs.pages, PathBuf::from("./pages"));
        assert_eq!(dirs.output, PathBuf::from("./public"));
    }
}
