//! Build command - renders the site into the output directory

use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use color_eyre::eyre::{Result, WrapErr, bail};
use folio_core::Config;
use folio_shell::BuildStats;

use super::SiteDirs;

/// Run the build command.
///
/// Renders every configured page inside the shell and copies static assets.
pub fn run(config_path: &Path, output: Option<&Path>, base_url: Option<&str>) -> Result<BuildStats> {
    let start = Instant::now();
    tracing::info!(?config_path, ?output, ?base_url, "Starting build");

    let mut config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;

    // Override base URL if specified via CLI
    if let Some(url) = base_url {
        tracing::info!(base_url = url, "Overriding site base_url from CLI");
        config.site.base_url = Some(url.to_string());
    }

    let dirs = SiteDirs::resolve(config_path, &config);
    let output: PathBuf = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| dirs.output.clone());

    tracing::debug!(?config, "Loaded configuration");

    let stats = dirs
        .builder(config, &output)
        .build()
        .wrap_err("Build failed")?;

    let duration = start.elapsed();

    println!();
    println!("  Build completed!");
    println!();
    println!("  Pages:      {}", stats.pages);
    println!("  Failed:     {}", stats.failed_pages);
    println!("  Assets:     {}", stats.assets);
    println!("  Templates:  {}", stats.template_overrides);
    println!();
    println!("  Duration:   {:.2}s", duration.as_secs_f64());
    println!("  Output:     {}", output.display());
    println!();

    if stats.failed_pages > 0 {
        bail!("{} page(s) failed to render", stats.failed_pages);
    }

    tracing::info!(?stats, ?duration, "Build completed successfully");
    Ok(stats)
}
