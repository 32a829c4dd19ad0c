//! Serve command - development server with live reload

use std::{path::Path, sync::Arc, time::Duration};

use color_eyre::eyre::{Result, WrapErr};
use folio_core::{Config, config::WidgetKind};
use folio_shell::BuildStats;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher, event::ModifyKind};
use tokio::{net::TcpListener, sync::mpsc};

use super::SiteDirs;
use crate::server::{LIVERELOAD_SCRIPT, ServerState, create_router};

/// Debounce interval for file changes.
const DEBOUNCE_MS: u64 = 200;

/// Run the serve command.
///
/// Builds the site, serves it, and rebuilds whenever the config, pages,
/// templates or static files change.
pub async fn run(config_path: &Path, port: u16, open_browser: bool) -> Result<()> {
    tracing::info!(?config_path, port, "Starting dev server");

    let config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;
    let dirs = SiteDirs::resolve(config_path, &config);
    let output_dir = dirs.output.clone();

    tracing::info!("Running initial build...");
    let stats = rebuild(config_path, &output_dir)?;
    print_build_stats(&stats);

    let state = Arc::new(ServerState::new());

    // Setup file watcher
    let (tx, rx) = mpsc::channel::<()>(16);
    let mut watcher = RecommendedWatcher::new(
        move |res: Result<notify::Event, notify::Error>| {
            if let Ok(event) = res
                && matches!(
                    event.kind,
                    EventKind::Modify(ModifyKind::Data(_))
                        | EventKind::Create(_)
                        | EventKind::Remove(_)
                )
            {
                // A full channel already has a rebuild pending.
                let _ = tx.try_send(());
            }
        },
        notify::Config::default(),
    )
    .wrap_err("Failed to create file watcher")?;

    watcher
        .watch(config_path, RecursiveMode::NonRecursive)
        .wrap_err("Failed to watch configuration file")?;
    for dir in [&dirs.pages, &dirs.templates, &dirs.static_files] {
        if dir.exists() {
            watcher
                .watch(dir, RecursiveMode::Recursive)
                .wrap_err_with(|| format!("Failed to watch {}", dir.display()))?;
            tracing::debug!(dir = %dir.display(), "Watching directory");
        }
    }

    // Start rebuild task
    let rebuild_state = state.clone();
    let rebuild_config = config_path.to_path_buf();
    let rebuild_output = output_dir.clone();

    tokio::spawn(debounce_changes(
        rx,
        Duration::from_millis(DEBOUNCE_MS),
        move || {
            println!();
            println!("  Change detected, rebuilding...");

            match rebuild(&rebuild_config, &rebuild_output) {
                Ok(stats) => {
                    println!("  ✓ Rebuilt {} pages in {}ms", stats.pages, stats.duration_ms);
                    rebuild_state.notify_reload();
                }
                Err(e) => {
                    tracing::error!("Rebuild failed: {e:#}");
                    eprintln!("  ✗ Rebuild failed: {e:#}");
                }
            }
        },
    ));

    let now_playing = (config.footer.widget.kind == WidgetKind::NowPlaying)
        .then_some(config.footer.widget.endpoint.as_str());
    let app = create_router(&output_dir, now_playing, state);
    let addr = format!("127.0.0.1:{port}");

    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind to {addr}"))?;

    println!();
    println!("  Dev server running at http://{addr}");
    println!("  Press Ctrl+C to stop");
    println!();

    if open_browser {
        let _ = open::that(format!("http://{addr}"));
    }

    // Keep watcher alive
    let _watcher = watcher;

    axum::serve(listener, app).await.wrap_err("Server error")?;

    Ok(())
}

/// Run `on_change` once per burst of change events.
///
/// After the first event of a burst, waits out `window` and drains whatever
/// arrived meanwhile. Events sent while `on_change` runs start the next burst.
async fn debounce_changes<F>(mut rx: mpsc::Receiver<()>, window: Duration, mut on_change: F)
where
    F: FnMut(),
{
    while rx.recv().await.is_some() {
        tokio::time::sleep(window).await;
        while rx.try_recv().is_ok() {}
        on_change();
    }
}

fn print_build_stats(stats: &BuildStats) {
    println!();
    println!("  Build Statistics:");
    println!("  ─────────────────────────────────");
    println!("  Pages:        {:>6}", stats.pages);
    println!("  Failed:       {:>6}", stats.failed_pages);
    println!("  Assets:       {:>6}", stats.assets);
    println!("  Templates:    {:>6}", stats.template_overrides);
    println!("  ─────────────────────────────────");
    println!("  Duration:     {:>6}ms", stats.duration_ms);
    println!();
}

/// Reload the configuration, build, and inject the livereload script.
fn rebuild(config_path: &Path, output_dir: &Path) -> Result<BuildStats> {
    let config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;
    let dirs = SiteDirs::resolve(config_path, &config);

    let stats = dirs
        .builder(config, output_dir)
        .build()
        .wrap_err("Build failed")?;

    inject_livereload_into_html(output_dir)?;

    tracing::debug!(?stats, "Build completed");
    Ok(stats)
}

/// Inject livereload script into all HTML files in the output directory.
fn inject_livereload_into_html(output_dir: &Path) -> Result<()> {
    use std::fs;

    for entry in walkdir::WalkDir::new(output_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "html"))
    {
        let path = entry.path();
        let content = fs::read_to_string(path)?;

        // Only inject if not already present
        if !content.contains("__livereload") {
            let modified = content.replace("</body>", &format!("{LIVERELOAD_SCRIPT}</body>"));
            fs::write(path, modified)?;
        }
    }

    Ok(())
}
