//! Site configuration management.
//!
//! Every section has defaults, so an empty `folio.toml` describes the stock
//! portfolio: three pages, the header's three links and the footer's six
//! contact icons.

use std::path::{Component, Path};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    error::{CoreError, Result},
    links::{self, ContactLink, IconKey, NavLink, RouteTable},
};

/// Main configuration structure for folio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    #[serde(default)]
    pub site: SiteConfig,

    /// Document head settings.
    #[serde(default)]
    pub head: HeadConfig,

    /// Header region settings.
    #[serde(default)]
    pub header: HeaderConfig,

    /// Footer region settings.
    #[serde(default)]
    pub footer: FooterConfig,

    /// Build settings.
    #[serde(default)]
    pub build: BuildConfig,

    /// Pages wrapped by the shell.
    #[serde(default = "default_pages")]
    pub pages: Vec<PageConfig>,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title, used as the `<title>` suffix.
    #[serde(default = "default_title")]
    pub title: String,

    /// Document language attribute.
    #[serde(default = "default_language")]
    pub language: String,

    /// Public URL of the deployed site (e.g., "https://example.com").
    #[serde(default)]
    pub base_url: Option<String>,

    /// Site description for meta tags.
    #[serde(default)]
    pub description: Option<String>,

    /// Site author name.
    #[serde(default)]
    pub author: Option<String>,
}

/// Static tags declared in the document head.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadConfig {
    /// External font stylesheet URLs.
    #[serde(default = "default_font_stylesheets")]
    pub font_stylesheets: Vec<String>,

    /// Host receiving the preconnect hint.
    #[serde(default = "default_font_host")]
    pub font_host: String,

    /// Shortcut icon path.
    #[serde(default = "default_shortcut_icon")]
    pub shortcut_icon: String,

    /// Web app manifest path.
    #[serde(default = "default_manifest")]
    pub manifest: String,

    /// Apple touch icon path.
    #[serde(default = "default_apple_touch_icon")]
    pub apple_touch_icon: String,

    /// Sized PNG favicons.
    #[serde(default = "default_icons")]
    pub icons: Vec<SizedIcon>,

    /// Safari pinned tab mask icon path.
    #[serde(default = "default_mask_icon")]
    pub mask_icon: String,

    /// Mask icon colour.
    #[serde(default = "default_mask_color")]
    pub mask_color: String,

    /// Optional `theme-color` meta value.
    #[serde(default)]
    pub theme_color: Option<String>,
}

/// A favicon declared with explicit dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizedIcon {
    /// Asset path.
    pub href: String,

    /// `sizes` attribute, e.g. "32x32".
    pub sizes: String,

    /// MIME type.
    #[serde(default = "default_icon_type", rename = "type")]
    pub mime_type: String,
}

/// Header region configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderConfig {
    /// Brand glyph shown on the left.
    #[serde(default = "default_brand")]
    pub brand: String,

    /// Navigation links, in display order.
    #[serde(default = "default_nav_links")]
    pub links: Vec<NavLink>,
}

/// Container width of the footer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WidthVariant {
    /// `max-w-md`.
    #[default]
    Narrow,
    /// `max-w-5xl`, matching the header.
    Wide,
}

impl WidthVariant {
    /// Utility class applied to the footer container.
    #[must_use]
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Narrow => "max-w-md",
            Self::Wide => "max-w-5xl",
        }
    }
}

/// Footer region configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FooterConfig {
    /// Render the divider and attribution line.
    #[serde(default = "default_true")]
    pub show_attribution: bool,

    /// Container width.
    #[serde(default)]
    pub width: WidthVariant,

    /// Element id of the contact row.
    ///
    /// `section_id = ""` renders the row without an id.
    #[serde(
        default = "default_section_id",
        deserialize_with = "de_section_id",
        serialize_with = "ser_section_id"
    )]
    pub section_id: Option<String>,

    /// Attribution line text.
    #[serde(default = "default_attribution")]
    pub attribution: String,

    /// Embedded widget above the contact row.
    #[serde(default)]
    pub widget: WidgetConfig,

    /// Contact links, in display order.
    #[serde(default = "default_contacts")]
    pub contacts: Vec<ContactLink>,
}

/// Which embedded widget the footer hosts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WidgetKind {
    /// "Currently playing" indicator.
    #[default]
    NowPlaying,
    /// No widget.
    None,
}

/// Embedded widget configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Widget kind.
    #[serde(default)]
    pub kind: WidgetKind,

    /// Endpoint queried by the widget from the browser.
    #[serde(default = "default_widget_endpoint")]
    pub endpoint: String,
}

/// Build configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Output directory for the generated site.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Directory holding page body fragments.
    #[serde(default = "default_pages_dir")]
    pub pages_dir: String,

    /// Directory copied to `<output>/static`.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    /// Directory of `.html` files overriding the built-in templates.
    #[serde(default = "default_templates_dir")]
    pub templates_dir: String,
}

/// A page wrapped by the shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageConfig {
    /// Site path the page is served at.
    pub route: String,

    /// Page title.
    pub title: String,

    /// Body fragment file, relative to the pages directory.
    #[serde(default)]
    pub source: Option<String>,
}

impl PageConfig {
    /// Create a new page entry.
    pub fn new(route: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            title: title.into(),
            source: None,
        }
    }

    /// Set the body fragment file.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

// Default value functions
fn default_title() -> String {
    "Alberto Frattini".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_font_stylesheets() -> Vec<String> {
    [
        "https://fonts.googleapis.com/css?family=Merriweather:700",
        "https://fonts.googleapis.com/css?family=Roboto+Mono:400",
        "https://fonts.googleapis.com/css?family=Mulish:400,700",
        "https://fonts.googleapis.com/css?family=Source+Sans+Pro:700",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_font_host() -> String {
    "https://fonts.gstatic.com/".to_string()
}

fn default_shortcut_icon() -> String {
    "/static/favicons/favicon.ico".to_string()
}

fn default_manifest() -> String {
    "/static/favicons/site.webmanifest".to_string()
}

fn default_apple_touch_icon() -> String {
    "/static/favicons/apple-touch-icon.png".to_string()
}

fn default_icons() -> Vec<SizedIcon> {
    vec![
        SizedIcon {
            href: "/static/favicons/favicon-32x32.png".to_string(),
            sizes: "32x32".to_string(),
            mime_type: default_icon_type(),
        },
        SizedIcon {
            href: "/static/favicons/favicon-16x16.png".to_string(),
            sizes: "16x16".to_string(),
            mime_type: default_icon_type(),
        },
    ]
}

fn default_icon_type() -> String {
    "image/png".to_string()
}

fn default_mask_icon() -> String {
    "/static/favicons/safari-pinned-tab.svg".to_string()
}

fn default_mask_color() -> String {
    "#4a9885".to_string()
}

fn default_brand() -> String {
    "√".to_string()
}

fn default_nav_links() -> Vec<NavLink> {
    vec![
        NavLink::new("/home", "/"),
        NavLink::new("/blog", "/blog"),
        NavLink::new("/about", "/about"),
    ]
}

fn default_true() -> bool {
    true
}

fn default_section_id() -> Option<String> {
    Some("contacts".to_string())
}

// TOML has no null, so an empty string stands for "no id".
fn de_section_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let id = String::deserialize(deserializer)?;
    Ok(Some(id).filter(|id| !id.is_empty()))
}

fn ser_section_id<S>(id: &Option<String>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(id.as_deref().unwrap_or_default())
}

fn default_attribution() -> String {
    "© 2020 Alberto Frattini - Published with Vercel".to_string()
}

fn default_contacts() -> Vec<ContactLink> {
    vec![
        ContactLink::new(IconKey::Github, "https://github.com/albifrattini"),
        ContactLink::new(IconKey::Facebook, "https://www.facebook.com/frattini.alberto/"),
        ContactLink::new(IconKey::Instagram, "https://www.instagram.com/albi_frattini/"),
        ContactLink::new(
            IconKey::LinkedinIn,
            "https://www.linkedin.com/in/alberto-frattini-99758b151/",
        ),
        ContactLink::new(IconKey::Twitter, "https://twitter.com/albertofrattini"),
        ContactLink::new(IconKey::EnvelopeOpen, "mailto:frattini.alberto@gmail.com"),
    ]
}

fn default_widget_endpoint() -> String {
    "/api/now-playing".to_string()
}

fn default_output_dir() -> String {
    "public".to_string()
}

fn default_pages_dir() -> String {
    "pages".to_string()
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_templates_dir() -> String {
    "templates".to_string()
}

fn default_pages() -> Vec<PageConfig> {
    vec![
        PageConfig::new("/", "Home").with_source("index.html"),
        PageConfig::new("/blog", "Blog").with_source("blog.html"),
        PageConfig::new("/about", "About").with_source("about.html"),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            head: HeadConfig::default(),
            header: HeaderConfig::default(),
            footer: FooterConfig::default(),
            build: BuildConfig::default(),
            pages: default_pages(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            language: default_language(),
            base_url: None,
            description: None,
            author: None,
        }
    }
}

impl Default for HeadConfig {
    fn default() -> Self {
        Self {
            font_stylesheets: default_font_stylesheets(),
            font_host: default_font_host(),
            shortcut_icon: default_shortcut_icon(),
            manifest: default_manifest(),
            apple_touch_icon: default_apple_touch_icon(),
            icons: default_icons(),
            mask_icon: default_mask_icon(),
            mask_color: default_mask_color(),
            theme_color: None,
        }
    }
}

impl HeadConfig {
    /// Site-local asset paths the head references.
    #[must_use]
    pub fn asset_paths(&self) -> Vec<&str> {
        let mut paths = vec![
            self.shortcut_icon.as_str(),
            self.manifest.as_str(),
            self.apple_touch_icon.as_str(),
        ];
        paths.extend(self.icons.iter().map(|icon| icon.href.as_str()));
        paths.push(self.mask_icon.as_str());
        paths.retain(|path| path.starts_with('/'));
        paths
    }
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            brand: default_brand(),
            links: default_nav_links(),
        }
    }
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            show_attribution: true,
            width: WidthVariant::default(),
            section_id: default_section_id(),
            attribution: default_attribution(),
            widget: WidgetConfig::default(),
            contacts: default_contacts(),
        }
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            kind: WidgetKind::default(),
            endpoint: default_widget_endpoint(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            pages_dir: default_pages_dir(),
            static_dir: default_static_dir(),
            templates_dir: default_templates_dir(),
        }
    }
}

/// Relative path with no `..`, root or prefix components.
fn is_contained_source(source: &str) -> bool {
    let path = Path::new(source);
    !source.is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content).map_err(|e| match e {
            CoreError::Toml(source) => CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                source,
            ),
            other => other,
        })?;

        tracing::debug!(path = %path.display(), pages = config.pages.len(), "loaded configuration");
        Ok(config)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `FOLIO__SECTION__KEY` environment overrides.
    ///
    /// `FOLIO__SITE__BASE_URL=https://example.com` replaces `site.base_url`.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let settings = config::Config::builder()
            .add_source(config::File::from(path).format(config::FileFormat::Toml))
            .add_source(config::Environment::with_prefix("FOLIO").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;

        tracing::debug!(path = %path.display(), pages = config.pages.len(), "loaded configuration");
        Ok(config)
    }

    /// Route table built from the configured pages.
    pub fn routes(&self) -> Result<RouteTable> {
        Ok(RouteTable::new(self.pages.iter().map(|p| p.route.as_str()))?)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.site.title.is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        if self.pages.is_empty() {
            return Err(CoreError::config("at least one page must be configured"));
        }

        if let Some(base_url) = &self.site.base_url
            && base_url.ends_with('/')
        {
            tracing::warn!("site.base_url should not have a trailing slash");
        }

        let routes = self.routes()?;
        for page in &self.pages {
            if let Some(source) = &page.source
                && !is_contained_source(source)
            {
                return Err(CoreError::config(format!(
                    "page {}: source must be a relative path inside the pages directory: {source}",
                    page.route
                )));
            }
        }
        links::validate_nav_links(&self.header.links, &routes)?;
        links::validate_contact_links(&self.footer.contacts)?;

        Ok(())
    }

    /// Get the full URL for a path, or the path itself without a base URL.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        match &self.site.base_url {
            Some(base) => {
                let base = base.trim_end_matches('/');
                let path = path.trim_start_matches('/');
                format!("{base}/{path}")
            }
            None => path.to_string(),
        }
    }
}
