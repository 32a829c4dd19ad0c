//! Navigation and contact link tables.
//!
//! A site owns two ordered link sequences: internal [`NavLink`]s rendered in
//! the header and outbound [`ContactLink`]s rendered as icons in the footer.
//! Both are plain data, fixed once the configuration has been loaded.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Link validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LinkError {
    /// Contact target is neither an http(s) URL nor a mailto address.
    #[error("invalid link target `{target}`: {reason}")]
    InvalidTarget { target: String, reason: String },

    /// Site path does not start with `/`.
    #[error("route must be an absolute site path: {0}")]
    NotAbsolute(String),

    /// Navigation destination is missing from the route table.
    #[error("no page is routed at {0}")]
    UnknownRoute(String),

    /// The same route was declared twice.
    #[error("duplicate route: {0}")]
    DuplicateRoute(String),

    /// Route contains an empty, `.` or `..` segment.
    #[error("route has an empty or relative segment: {0}")]
    InvalidRoute(String),
}

impl LinkError {
    fn invalid_target(target: &str, reason: impl Into<String>) -> Self {
        Self::InvalidTarget {
            target: target.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for link operations.
pub type Result<T> = std::result::Result<T, LinkError>;

/// An internal navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    /// Visible label.
    pub label: String,

    /// Site path the link navigates to.
    pub destination: String,
}

impl NavLink {
    /// Create a new navigation link.
    pub fn new(label: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            destination: destination.into(),
        }
    }

    /// Check that the destination is routed by `routes`.
    pub fn validate(&self, routes: &RouteTable) -> Result<()> {
        if !self.destination.starts_with('/') {
            return Err(LinkError::NotAbsolute(self.destination.clone()));
        }
        if !routes.contains(&self.destination) {
            return Err(LinkError::UnknownRoute(self.destination.clone()));
        }
        Ok(())
    }
}

/// Icons known to the icon provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconKey {
    Github,
    Facebook,
    Instagram,
    #[serde(alias = "linkedin")]
    LinkedinIn,
    Twitter,
    #[serde(alias = "email", alias = "mail")]
    EnvelopeOpen,
}

impl IconKey {
    /// Stable identifier emitted as `data-icon`.
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Self::Github => "github",
            Self::Facebook => "facebook",
            Self::Instagram => "instagram",
            Self::LinkedinIn => "linkedin",
            Self::Twitter => "twitter",
            Self::EnvelopeOpen => "email",
        }
    }

    /// Icon provider class list.
    #[must_use]
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Github => "fa-brands fa-github",
            Self::Facebook => "fa-brands fa-facebook",
            Self::Instagram => "fa-brands fa-instagram",
            Self::LinkedinIn => "fa-brands fa-linkedin-in",
            Self::Twitter => "fa-brands fa-twitter",
            Self::EnvelopeOpen => "fa-regular fa-envelope-open",
        }
    }

    /// Accessible name for an icon-only anchor.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Github => "GitHub",
            Self::Facebook => "Facebook",
            Self::Instagram => "Instagram",
            Self::LinkedinIn => "LinkedIn",
            Self::Twitter => "Twitter",
            Self::EnvelopeOpen => "Email",
        }
    }
}

impl fmt::Display for IconKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Where a contact link leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// External profile page.
    External(Url),

    /// Mail composition for the given address.
    Mailto(String),
}

impl LinkTarget {
    /// Classify and validate a raw target string.
    pub fn parse(raw: &str) -> Result<Self> {
        let url = Url::parse(raw).map_err(|e| LinkError::invalid_target(raw, e.to_string()))?;

        match url.scheme() {
            "http" | "https" => Ok(Self::External(url)),
            "mailto" => {
                let address = url.path();
                match address.split_once('@') {
                    Some((local, domain))
                        if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
                    {
                        Ok(Self::Mailto(address.to_string()))
                    }
                    _ => Err(LinkError::invalid_target(raw, "malformed mail address")),
                }
            }
            other => Err(LinkError::invalid_target(
                raw,
                format!("unsupported scheme `{other}`"),
            )),
        }
    }

    /// Whether the target opens outside the site.
    #[must_use]
    pub fn is_external(&self) -> bool {
        matches!(self, Self::External(_))
    }
}

/// An outbound link rendered as an icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactLink {
    /// Icon shown for the link.
    pub icon: IconKey,

    /// Profile URL or `mailto:` address, kept verbatim.
    pub target: String,
}

impl ContactLink {
    /// Create a new contact link.
    pub fn new(icon: IconKey, target: impl Into<String>) -> Self {
        Self {
            icon,
            target: target.into(),
        }
    }

    /// Parse the target.
    pub fn link_target(&self) -> Result<LinkTarget> {
        LinkTarget::parse(&self.target)
    }
}

/// Ordered set of paths the site serves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<String>,
}

impl RouteTable {
    /// Build a route table, rejecting relative or duplicate routes.
    pub fn new<I, S>(routes: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::default();
        for route in routes {
            let route = route.as_ref();
            if !route.starts_with('/') {
                return Err(LinkError::NotAbsolute(route.to_string()));
            }
            if !is_clean_route(route) {
                return Err(LinkError::InvalidRoute(route.to_string()));
            }
            let normalized = normalize(route);
            if table.routes.iter().any(|r| *r == normalized) {
                return Err(LinkError::DuplicateRoute(route.to_string()));
            }
            table.routes.push(normalized);
        }
        Ok(table)
    }

    /// Whether `path` is routed. A trailing slash is ignored.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        let path = normalize(path);
        self.routes.iter().any(|r| *r == path)
    }

    /// Routes in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(String::as_str)
    }

    /// Number of routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// `/`, or `/`-separated segments that are neither empty nor `.`/`..`.
/// One trailing slash is allowed.
fn is_clean_route(route: &str) -> bool {
    let Some(inner) = route.strip_prefix('/') else {
        return false;
    };
    let inner = inner.strip_suffix('/').unwrap_or(inner);
    if inner.is_empty() {
        return route == "/";
    }
    inner
        .split('/')
        .all(|segment| !segment.is_empty() && segment != "." && segment != "..")
}

fn normalize(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Validate every navigation link against the route table.
pub fn validate_nav_links(links: &[NavLink], routes: &RouteTable) -> Result<()> {
    links.iter().try_for_each(|link| link.validate(routes))
}

/// Validate every contact link target.
pub fn validate_contact_links(links: &[ContactLink]) -> Result<()> {
    links.iter().try_for_each(|link| link.link_target().map(|_| ()))
}
