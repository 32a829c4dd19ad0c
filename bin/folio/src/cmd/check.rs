//! Check command - validate configuration, links and shell assets

use std::path::Path;

use color_eyre::eyre::{Result, bail};
use folio_core::{Config, LinkTarget};
use folio_shell::missing_assets;

use super::SiteDirs;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Problems that make the site unbuildable.
    pub errors: Vec<String>,
    /// Problems that produce broken assets or pages.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
pub fn run(config_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking site");

    let result = validate(config_path);

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Collect every problem with the site at `config_path`.
#[must_use]
pub fn validate(config_path: &Path) -> ValidationResult {
    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    let config = match Config::load_with_env(config_path) {
        Ok(c) => {
            println!("  ✓ Configuration valid");
            c
        }
        Err(e) => {
            println!("  ✗ Configuration invalid: {e}");
            result.add_error(format!("Configuration error: {e}"));
            return result;
        }
    };

    println!("\nChecking links...");
    check_links(&config, &mut result);

    let dirs = SiteDirs::resolve(config_path, &config);

    println!("\nChecking pages...");
    for page in &config.pages {
        if let Some(ref source) = page.source
            && !dirs.pages.join(source).is_file()
        {
            result.add_warning(format!(
                "Page {} body file not found: {}",
                page.route,
                dirs.pages.join(source).display()
            ));
        }
    }

    println!("\nChecking shell assets...");
    if dirs.static_files.is_dir() {
        for path in missing_assets(&dirs.static_files, &config.head.asset_paths()) {
            result.add_warning(format!("Missing shell asset: {path}"));
        }
    } else {
        result.add_warning(format!(
            "Static directory does not exist: {}",
            dirs.static_files.display()
        ));
    }

    result
}

fn check_links(config: &Config, result: &mut ValidationResult) {
    for link in &config.footer.contacts {
        match link.link_target() {
            Ok(LinkTarget::External(url)) if url.scheme() == "http" => {
                result.add_warning(format!("{} link is not https: {}", link.icon.label(), link.target));
            }
            Ok(_) => {}
            Err(e) => result.add_error(e.to_string()),
        }
    }

    for href in &config.head.font_stylesheets {
        if !href.starts_with("https://") {
            result.add_warning(format!("Font stylesheet is not served over https: {href}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn write_site(root: &Path, config: &str) -> std::path::PathBuf {
        let config_path = root.join("folio.toml");
        fs::write(&config_path, config).unwrap();
        config_path
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let root = tempfile::tempdir().unwrap();
        let config_path = write_site(
            root.path(),
            "[[header.links]]\nlabel = \"/cv\"\ndestination = \"/cv\"\n",
        );

        let result = validate(&config_path);
        assert!(result.has_errors());
        assert!(run(&config_path, false).is_err());
    }

    #[test]
    fn test_missing_assets_are_warnings() {
        let root = tempfile::tempdir().unwrap();
        let config_path = write_site(root.path(), "");
        fs::create_dir_all(root.path().join("static/favicons")).unwrap();
        fs::write(root.path().join("static/favicons/favicon.ico"), b"ico").unwrap();

        let result = validate(&config_path);
        assert!(!result.has_errors());
        let missing: Vec<_> = result
            .warnings
            .iter()
            .filter(|w| w.starts_with("Missing shell asset"))
            .collect();
        assert_eq!(missing.len(), 5);

        assert!(run(&config_path, false).is_ok());
        assert!(run(&config_path, true).is_err());
    }

    #[test]
    fn test_plain_http_contact_is_a_warning() {
        let root = tempfile::tempdir().unwrap();
        let config_path = write_site(
            root.path(),
            "[[footer.contacts]]\nicon = \"github\"\ntarget = \"http://github.com/albifrattini\"\n",
        );

        let result = validate(&config_path);
        assert!(!result.has_errors());
        assert!(result.warnings.iter().any(|w| w.contains("not https")));
    }
}
