//! Header region: brand glyph plus the navigation links.

use folio_core::{NavLink, config::HeaderConfig};

use crate::{
    error::Result,
    template::{DEFAULT_HEADER_TEMPLATE, Template, TemplateContext, escape},
};

/// Fixed top navigation bar.
#[derive(Debug, Clone)]
pub struct HeaderRegion {
    brand: String,
    links: Vec<NavLink>,
    template: Template,
}

impl HeaderRegion {
    /// Create a header with a brand glyph and ordered navigation links.
    pub fn new(brand: impl Into<String>, links: Vec<NavLink>) -> Self {
        Self {
            brand: brand.into(),
            links,
            template: Template::new("header", DEFAULT_HEADER_TEMPLATE),
        }
    }

    /// Create a header from its configuration section.
    #[must_use]
    pub fn from_config(config: &HeaderConfig) -> Self {
        Self::new(&config.brand, config.links.clone())
    }

    /// Replace the header template.
    #[must_use]
    pub fn with_template(mut self, template: Template) -> Self {
        self.template = template;
        self
    }

    /// Navigation links in display order.
    #[must_use]
    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    /// Render the header.
    pub fn render(&self) -> Result<String> {
        let links = self
            .links
            .iter()
            .map(|link| {
                format!(
                    r#"<a href="{}" class="p-4 font-mono" data-folio-nav>{}</a>"#,
                    escape(&link.destination),
                    escape(&link.label)
                )
            })
            .collect::<Vec<_>>()
            .join("\n        ");

        let ctx = TemplateContext::new()
            .with_text("brand", &self.brand)
            .with_var("links", links);

        Ok(self.template.render(&ctx)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchors(html: &str) -> Vec<(String, String)> {
        html.split("<a href=\"")
            .skip(1)
            .map(|rest| {
                let (href, rest) = rest.split_once('"').unwrap();
                let label = rest.split_once('>').unwrap().1.split_once("</a>").unwrap().0;
                (href.to_string(), label.to_string())
            })
            .collect()
    }

    #[test]
    fn test_default_header_links() {
        let html = HeaderRegion::from_config(&HeaderConfig::default())
            .render()
            .unwrap();

        assert_eq!(
            anchors(&html),
            vec![
                ("/".to_string(), "/home".to_string()),
                ("/blog".to_string(), "/blog".to_string()),
                ("/about".to_string(), "/about".to_string()),
            ]
        );
        assert_eq!(html.matches("data-folio-nav").count(), 3);
    }

    #[test]
    fn test_brand_precedes_links() {
        let html = HeaderRegion::from_config(&HeaderConfig::default())
            .render()
            .unwrap();

        let brand = html.find('√').unwrap();
        let home = html.find(r#"href="/""#).unwrap();
        let blog = html.find(r#"href="/blog""#).unwrap();
        let about = html.find(r#"href="/about""#).unwrap();
        assert!(brand < home && home < blog && blog < about);
        assert!(html.starts_with("<header"));
        assert!(html.contains("fixed top-0"));
    }

    #[test]
    fn test_empty_links_render_brand_only() {
        let html = HeaderRegion::new("√", Vec::new()).render().unwrap();
        assert!(html.contains('√'));
        assert!(!html.contains("<a "));
        assert!(html.contains(r#"<nav class="flex"></nav>"#));
    }

    #[test]
    fn test_labels_are_escaped() {
        let html = HeaderRegion::new("√", vec![NavLink::new("<b>x</b>", "/")])
            .render()
            .unwrap();
        assert!(html.contains("&lt;b&gt;x&lt;/b&gt;"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let header = HeaderRegion::from_config(&HeaderConfig::default());
        assert_eq!(header.render().unwrap(), header.render().unwrap());
    }
}
