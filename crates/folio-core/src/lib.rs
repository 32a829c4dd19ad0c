//! Folio Core Library
//!
//! Link tables, site configuration, and error handling shared by the folio
//! renderer and CLI.

pub mod config;
pub mod error;
pub mod links;

pub use config::Config;
pub use error::{CoreError, Result};
pub use links::{ContactLink, IconKey, LinkError, LinkTarget, NavLink, RouteTable};
