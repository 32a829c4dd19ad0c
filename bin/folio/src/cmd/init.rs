//! Init command - scaffold a new site

use std::{fs, path::Path};

use color_eyre::eyre::{Result, WrapErr, bail};
use folio_core::Config;

/// Run the init command.
///
/// Writes a default `folio.toml` and a body fragment for every stock page.
pub fn run(config_path: &Path, force: bool) -> Result<()> {
    tracing::info!(?config_path, force, "Initializing site");

    if config_path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }

    let config = Config::default();
    let toml = toml_string(&config)?;

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).wrap_err("Failed to create site directory")?;
    }
    fs::write(config_path, toml).wrap_err("Failed to write configuration")?;
    println!("Created: {}", config_path.display());

    let dirs = super::SiteDirs::resolve(config_path, &config);
    fs::create_dir_all(&dirs.pages).wrap_err("Failed to create pages directory")?;
    fs::create_dir_all(dirs.static_files.join("favicons"))
        .wrap_err("Failed to create static directory")?;

    for page in &config.pages {
        let Some(ref source) = page.source else {
            continue;
        };
        let path = dirs.pages.join(source);
        if path.exists() && !force {
            continue;
        }
        fs::write(&path, format!("<h1>{}</h1>\n", page.title))
            .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
        println!("Created: {}", path.display());
    }

    Ok(())
}

fn toml_string(config: &Config) -> Result<String> {
    toml::to_string_pretty(config).wrap_err("Failed to serialize default configuration")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_loadable_config() {
        let root = tempfile::tempdir().unwrap();
        let config_path = root.path().join("folio.toml");

        run(&config_path, false).unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.footer.contacts.len(), 6);
        assert!(root.path().join("pages/index.html").exists());
        assert!(root.path().join("pages/blog.html").exists());
        assert!(root.path().join("pages/about.html").exists());
        assert!(root.path().join("static/favicons").is_dir());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let root = tempfile::tempdir().unwrap();
        let config_path = root.path().join("folio.toml");
        fs::write(&config_path, "# mine").unwrap();

        assert!(run(&config_path, false).is_err());
        assert_eq!(fs::read_to_string(&config_path).unwrap(), "# mine");

        run(&config_path, true).unwrap();
        assert!(Config::load(&config_path).is_ok());
    }
}
