//! Folio Shell Library
//!
//! Renders the chrome shared by every page of a folio site and builds the
//! site around it.
//!
//! # Modules
//!
//! - [`template`] - HTML template system with variable interpolation
//! - [`document`] - Document wrapper: head tags, mount point, navigation hook
//! - [`header`] - Fixed navigation bar
//! - [`footer`] - Widget slot, contact icons and attribution
//! - [`widget`] - Embedded widget capability and its isolation boundary
//! - [`shell`] - Page composition
//! - [`assets`] - Static asset publishing
//! - [`build`] - Build orchestration

pub mod assets;
pub mod build;
pub mod document;
pub mod error;
pub mod footer;
pub mod header;
pub mod shell;
pub mod template;
pub mod widget;

pub use assets::{AssetManifest, AssetProcessor, missing_assets};
pub use build::{BuildError, BuildStats, Builder};
pub use document::DocumentShell;
pub use error::RenderError;
pub use footer::{FooterOptions, FooterRegion};
pub use header::HeaderRegion;
pub use shell::Shell;
pub use template::{Template, TemplateContext, TemplateRegistry};
pub use widget::{EmbeddedWidget, NoWidget, NowPlayingWidget, WidgetBoundary, WidgetError};
