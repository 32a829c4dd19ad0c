//! Page composition.
//!
//! Wraps a page body in header, main and footer, then in the document.

use folio_core::{Config, config::PageConfig};
use tracing::debug;

use crate::{
    document::DocumentShell,
    error::Result,
    footer::FooterRegion,
    header::HeaderRegion,
    template::{DEFAULT_PAGE_TEMPLATE, Template, TemplateContext, TemplateRegistry, escape},
};

/// The shared chrome of every page.
#[derive(Debug)]
pub struct Shell {
    document: DocumentShell,
    header: HeaderRegion,
    footer: FooterRegion,
    page: Template,
}

impl Shell {
    /// Assemble a shell from its three regions.
    #[must_use]
    pub fn new(document: DocumentShell, header: HeaderRegion, footer: FooterRegion) -> Self {
        Self {
            document,
            header,
            footer,
            page: Template::new("page", DEFAULT_PAGE_TEMPLATE),
        }
    }

    /// Build the shell described by `config` with the built-in templates.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            DocumentShell::from_config(config),
            HeaderRegion::from_config(&config.header),
            FooterRegion::from_config(&config.footer),
        )
    }

    /// Build the shell described by `config`, taking templates from `templates`.
    pub fn with_registry(config: &Config, templates: &TemplateRegistry) -> Result<Self> {
        Ok(Self {
            document: DocumentShell::from_config(config).with_template(templates.template("document")?),
            header: HeaderRegion::from_config(&config.header).with_template(templates.template("header")?),
            footer: FooterRegion::from_config(&config.footer).with_template(templates.template("footer")?),
            page: templates.template("page")?,
        })
    }

    /// Header region.
    #[must_use]
    pub fn header(&self) -> &HeaderRegion {
        &self.header
    }

    /// Footer region.
    #[must_use]
    pub fn footer(&self) -> &FooterRegion {
        &self.footer
    }

    /// Render a full page around `content_html`.
    pub fn render(&self, title: &str, route: &str, content_html: &str) -> Result<String> {
        debug!(route, "composing page");

        let main = self.page.render(
            &TemplateContext::new()
                .with_var("route", escape(route))
                .with_var("content", content_html),
        )?;

        let body = [self.header.render()?, main, self.footer.render()?].join("\n");
        self.document.render(title, route, &body)
    }

    /// Render a configured page.
    pub fn render_page(&self, page: &PageConfig, content_html: &str) -> Result<String> {
        self.render(&page.title, &page.route, content_html)
    }
}
