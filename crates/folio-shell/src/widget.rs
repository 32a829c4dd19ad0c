//! Embedded widgets hosted by the footer.
//!
//! A widget is an opaque fragment the footer places above its contact row.
//! Whatever a widget does, [`WidgetBoundary`] guarantees the footer gets a
//! string back: errors and panics are logged and replaced by a placeholder.

use std::panic::{self, AssertUnwindSafe};

use folio_core::config::{WidgetConfig, WidgetKind};
use thiserror::Error;
use tracing::warn;
use url::Url;

use crate::template::escape;

/// Widget rendering errors.
#[derive(Debug, Error)]
pub enum WidgetError {
    /// The widget was configured with unusable settings.
    #[error("widget `{widget}` is misconfigured: {reason}")]
    Misconfigured { widget: String, reason: String },

    /// The widget could not produce its fragment.
    #[error("widget `{widget}` is unavailable: {reason}")]
    Unavailable { widget: String, reason: String },
}

/// Result type for widget rendering.
pub type Result<T> = std::result::Result<T, WidgetError>;

/// An independently failable UI fragment.
pub trait EmbeddedWidget: Send + Sync {
    /// Short name used in logs and markup.
    fn name(&self) -> &str;

    /// Render the widget's markup.
    fn render(&self) -> Result<String>;
}

/// Placeholder emitted in place of a failed widget.
pub const UNAVAILABLE_PLACEHOLDER: &str = r#"<div class="widget widget-unavailable" aria-hidden="true"></div>"#;

/// Isolation boundary around an [`EmbeddedWidget`].
#[derive(Debug, Clone, Copy, Default)]
pub struct WidgetBoundary;

impl WidgetBoundary {
    /// Render `widget`, containing any error or panic.
    #[must_use]
    pub fn render(widget: &dyn EmbeddedWidget) -> String {
        match panic::catch_unwind(AssertUnwindSafe(|| widget.render())) {
            Ok(Ok(html)) => html,
            Ok(Err(e)) => {
                warn!(widget = widget.name(), error = %e, "widget failed, rendering placeholder");
                UNAVAILABLE_PLACEHOLDER.to_string()
            }
            Err(payload) => {
                let reason = payload
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                warn!(widget = widget.name(), reason = %reason, "widget panicked, rendering placeholder");
                UNAVAILABLE_PLACEHOLDER.to_string()
            }
        }
    }
}

/// A widget that renders nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoWidget;

impl EmbeddedWidget for NoWidget {
    fn name(&self) -> &str {
        "none"
    }

    fn render(&self) -> Result<String> {
        Ok(String::new())
    }
}

/// "Currently playing" indicator.
///
/// The markup is static; the browser fetches `endpoint` after load and fills
/// in the track. A failed fetch hides the indicator.
#[derive(Debug, Clone)]
pub struct NowPlayingWidget {
    endpoint: String,
}

impl NowPlayingWidget {
    /// Create a widget polling `endpoint` (a site path or absolute URL).
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    fn misconfigured(&self, reason: impl Into<String>) -> WidgetError {
        WidgetError::Misconfigured {
            widget: self.name().to_string(),
            reason: reason.into(),
        }
    }

    fn check_endpoint(&self) -> Result<()> {
        if self.endpoint.is_empty() {
            return Err(self.misconfigured("endpoint is empty"));
        }
        if self.endpoint.starts_with('/') {
            return Ok(());
        }
        let url = Url::parse(&self.endpoint).map_err(|e| self.misconfigured(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(self.misconfigured(format!("unsupported scheme `{other}`"))),
        }
    }
}

impl EmbeddedWidget for NowPlayingWidget {
    fn name(&self) -> &str {
        "now-playing"
    }

    fn render(&self) -> Result<String> {
        self.check_endpoint()?;
        Ok(format!(
            r#"<div class="widget now-playing hidden" data-widget="now-playing" data-endpoint="{}">
        <a class="now-playing-track" target="_blank" rel="noopener noreferrer">Not playing</a>
    </div>
    <script>{NOW_PLAYING_SCRIPT}</script>"#,
            escape(&self.endpoint)
        ))
    }
}

/// Build the widget described by `config`.
#[must_use]
pub fn from_config(config: &WidgetConfig) -> Box<dyn EmbeddedWidget> {
    match config.kind {
        WidgetKind::NowPlaying => Box::new(NowPlayingWidget::new(&config.endpoint)),
        WidgetKind::None => Box::new(NoWidget),
    }
}

const NOW_PLAYING_SCRIPT: &str = r#"
(function () {
    function load() {
        var nodes = document.querySelectorAll('[data-widget="now-playing"]');
        Array.prototype.forEach.call(nodes, function (node) {
            var track = node.querySelector('.now-playing-track');
            try {
                fetch(node.getAttribute('data-endpoint'))
                    .then(function (res) {
                        if (!res.ok) throw new Error('status ' + res.status);
                        return res.json();
                    })
                    .then(function (data) {
                        if (data && data.isPlaying) {
                            track.textContent = data.title + ' - ' + data.artist;
                            if (data.songUrl) track.setAttribute('href', data.songUrl);
                        } else {
                            track.textContent = 'Not playing';
                            track.removeAttribute('href');
                        }
                        node.classList.remove('hidden');
                    })
                    .catch(function () { node.classList.add('hidden'); });
            } catch (e) {
                node.classList.add('hidden');
            }
        });
    }
    document.addEventListener('folio:navigate', load);
    load();
})();
"#;
