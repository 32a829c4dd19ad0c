//! Document shell: the `<html>` wrapper every page is rendered into.

use folio_core::{Config, config::HeadConfig};

use crate::{
    error::Result,
    template::{DEFAULT_DOCUMENT_TEMPLATE, Template, TemplateContext, escape},
};

/// Outer document structure shared by every page.
#[derive(Debug, Clone)]
pub struct DocumentShell {
    lang: String,
    site_title: String,
    description: Option<String>,
    author: Option<String>,
    base_url: Option<String>,
    head: HeadConfig,
    template: Template,
}

impl DocumentShell {
    /// Create a document shell with the given language and head tags.
    pub fn new(lang: impl Into<String>, site_title: impl Into<String>, head: HeadConfig) -> Self {
        Self {
            lang: lang.into(),
            site_title: site_title.into(),
            description: None,
            author: None,
            base_url: None,
            head,
            template: Template::new("document", DEFAULT_DOCUMENT_TEMPLATE),
        }
    }

    /// Create a document shell from the site configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let mut shell = Self::new(&config.site.language, &config.site.title, config.head.clone());
        shell.description = config.site.description.clone();
        shell.author = config.site.author.clone();
        shell.base_url = config
            .site
            .base_url
            .as_ref()
            .map(|url| url.trim_end_matches('/').to_string());
        shell
    }

    /// Replace the document template.
    #[must_use]
    pub fn with_template(mut self, template: Template) -> Self {
        self.template = template;
        self
    }

    /// Render a page body into the full document.
    ///
    /// `body_html` is inserted verbatim inside the mount point.
    pub fn render(&self, title: &str, route: &str, body_html: &str) -> Result<String> {
        let full_title = if title.is_empty() || title == self.site_title {
            self.site_title.clone()
        } else {
            format!("{title} | {}", self.site_title)
        };

        let mut ctx = TemplateContext::new()
            .with_text("lang", &self.lang)
            .with_text("title", &full_title)
            .with_var("head_links", self.head_links())
            .with_var("body", body_html)
            .with_var("bootstrap", BOOTSTRAP_SCRIPT);

        let meta = self.meta_tags(route);
        if !meta.is_empty() {
            ctx.insert("meta", meta);
        }

        Ok(self.template.render(&ctx)?)
    }

    /// `<link>` tags for fonts, icons and the manifest.
    #[must_use]
    pub fn head_links(&self) -> String {
        let head = &self.head;
        let mut links: Vec<String> = head
            .font_stylesheets
            .iter()
            .map(|href| format!(r#"<link href="{}" rel="stylesheet">"#, escape(href)))
            .collect();

        links.push(format!(
            r#"<link href="{}" rel="shortcut icon">"#,
            escape(&head.shortcut_icon)
        ));
        links.push(format!(
            r#"<link href="{}" rel="manifest">"#,
            escape(&head.manifest)
        ));
        links.push(format!(
            r#"<link rel="preconnect" href="{}" crossorigin="">"#,
            escape(&head.font_host)
        ));
        links.push(format!(
            r#"<link href="{}" rel="apple-touch-icon" sizes="180x180">"#,
            escape(&head.apple_touch_icon)
        ));
        links.extend(head.icons.iter().map(|icon| {
            format!(
                r#"<link href="{}" rel="icon" sizes="{}" type="{}">"#,
                escape(&icon.href),
                escape(&icon.sizes),
                escape(&icon.mime_type)
            )
        }));
        links.push(format!(
            r#"<link color="{}" href="{}" rel="mask-icon">"#,
            escape(&head.mask_color),
            escape(&head.mask_icon)
        ));

        links.join("\n    ")
    }

    fn meta_tags(&self, route: &str) -> String {
        let mut tags = Vec::new();

        if let Some(desc) = &self.description {
            tags.push(format!(r#"<meta name="description" content="{}">"#, escape(desc)));
        }
        if let Some(author) = &self.author {
            tags.push(format!(r#"<meta name="author" content="{}">"#, escape(author)));
        }
        if let Some(color) = &self.head.theme_color {
            tags.push(format!(r#"<meta name="theme-color" content="{}">"#, escape(color)));
        }
        if let Some(base) = &self.base_url {
            tags.push(format!(
                r#"<link rel="canonical" href="{}{}">"#,
                escape(base),
                escape(route)
            ));
        }

        tags.join("\n    ")
    }
}

/// Client-side navigation hook.
///
/// Intercepts clicks on `a[data-folio-nav]`, fetches the target page and swaps
/// the mount point contents. Any failure falls back to a full navigation.
pub const BOOTSTRAP_SCRIPT: &str = r#"
(function () {
    var mount = document.getElementById('__folio');
    if (!mount || !window.fetch || !window.history || !window.DOMParser) return;

    function swap(url, push) {
        return fetch(url, { headers: { 'X-Folio-Navigation': '1' } })
            .then(function (res) {
                if (!res.ok) throw new Error('status ' + res.status);
                return res.text();
            })
            .then(function (html) {
                var doc = new DOMParser().parseFromString(html, 'text/html');
                var next = doc.getElementById('__folio');
                if (!next) throw new Error('missing mount point');
                mount.innerHTML = next.innerHTML;
                document.title = doc.title;
                if (push) history.pushState({ folio: true }, '', url);
                window.scrollTo(0, 0);
                document.dispatchEvent(new Event('folio:navigate'));
            })
            .catch(function () { window.location.assign(url); });
    }

    document.addEventListener('click', function (event) {
        var link = event.target.closest && event.target.closest('a[data-folio-nav]');
        if (!link || event.defaultPrevented || event.button !== 0) return;
        if (event.metaKey || event.ctrlKey || event.shiftKey || event.altKey) return;
        event.preventDefault();
        swap(link.getAttribute('href'), true);
    });

    window.addEventListener('popstate', function () {
        swap(window.location.pathname, false);
    });
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn shell() -> DocumentShell {
        DocumentShell::from_config(&Config::default())
    }

    #[test]
    fn test_head_link_counts() {
        let html = shell().render("Home", "/", "").unwrap();

        assert_eq!(html.matches(r#"rel="manifest""#).count(), 1);
        assert_eq!(html.matches(r#"rel="shortcut icon""#).count(), 1);
        assert_eq!(html.matches(r#"rel="stylesheet""#).count(), 4);
        assert_eq!(html.matches(r#"rel="preconnect""#).count(), 1);
        assert!(html.contains(r#"href="https://fonts.gstatic.com/""#));
    }

    #[test]
    fn test_font_families() {
        let links = shell().head_links();
        for family in ["Merriweather:700", "Roboto+Mono:400", "Mulish:400,700", "Source+Sans+Pro:700"] {
            assert!(links.contains(family), "missing font family {family}");
        }
    }

    #[test]
    fn test_icons() {
        let links = shell().head_links();
        assert!(links.contains(
            r#"<link href="/static/favicons/apple-touch-icon.png" rel="apple-touch-icon" sizes="180x180">"#
        ));
        assert!(links.contains(r#"sizes="32x32" type="image/png""#));
        assert!(links.contains(r#"sizes="16x16" type="image/png""#));
        assert!(links.contains(
            r##"<link color="#4a9885" href="/static/favicons/safari-pinned-tab.svg" rel="mask-icon">"##
        ));
    }

    #[test]
    fn test_body_has_single_mount_point_and_bootstrap() {
        let html = shell().render("Home", "/", "<p>hello</p>").unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<html lang="en">"#));
        assert_eq!(html.matches(r#"id="__folio""#).count(), 1);
        assert!(html.contains(r#"<div id="__folio"><p>hello</p></div>"#));
        assert_eq!(html.matches("<script>").count(), 1);
        assert!(html.contains("data-folio-nav"));
    }

    #[test]
    fn test_title() {
        let html = shell().render("Blog", "/blog", "").unwrap();
        assert!(html.contains("<title>Blog | Alberto Frattini</title>"));

        let html = shell().render("", "/", "").unwrap();
        assert!(html.contains("<title>Alberto Frattini</title>"));
    }

    #[test]
    fn test_meta_tags() {
        let mut config = Config::default();
        config.site.description = Some("Notes & essays".to_string());
        config.site.base_url = Some("https://albertofrattini.dev/".to_string());
        config.head.theme_color = Some("#4a9885".to_string());

        let html = DocumentShell::from_config(&config)
            .render("About", "/about", "")
            .unwrap();
        assert!(html.contains(r#"<meta name="description" content="Notes &amp; essays">"#));
        assert!(html.contains(r##"<meta name="theme-color" content="#4a9885">"##));
        assert!(html.contains(r#"<link rel="canonical" href="https://albertofrattini.dev/about">"#));
    }

    #[test]
    fn test_render_is_idempotent() {
        let shell = shell();
        let first = shell.render("Home", "/", "<p>x</p>").unwrap();
        let second = shell.render("Home", "/", "<p>x</p>").unwrap();
        assert_eq!(first, second);
    }
}
