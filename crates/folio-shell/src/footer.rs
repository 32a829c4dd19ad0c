//! Footer region: embedded widget, contact icons and attribution line.

use folio_core::{
    ContactLink,
    config::{FooterConfig, WidthVariant},
};

use crate::{
    error::Result,
    template::{DEFAULT_FOOTER_TEMPLATE, Template, TemplateContext, escape},
    widget::{self, EmbeddedWidget, NoWidget, WidgetBoundary},
};

/// Layout switches for the footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterOptions {
    /// Render the divider and attribution line.
    pub show_attribution: bool,

    /// Container width.
    pub width: WidthVariant,

    /// Element id of the contact row. Empty ids are dropped.
    pub section_id: Option<String>,

    /// Attribution text.
    pub attribution: String,
}

impl Default for FooterOptions {
    fn default() -> Self {
        let config = FooterConfig::default();
        Self {
            show_attribution: config.show_attribution,
            width: config.width,
            section_id: config.section_id,
            attribution: config.attribution,
        }
    }
}

/// Bottom region of every page.
pub struct FooterRegion {
    options: FooterOptions,
    contacts: Vec<ContactLink>,
    widget: Box<dyn EmbeddedWidget>,
    template: Template,
}

impl std::fmt::Debug for FooterRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FooterRegion")
            .field("options", &self.options)
            .field("contacts", &self.contacts)
            .field("widget", &self.widget.name())
            .finish_non_exhaustive()
    }
}

impl FooterRegion {
    /// Create a footer from options, ordered contact links and a widget.
    pub fn new(
        options: FooterOptions,
        contacts: Vec<ContactLink>,
        widget: Box<dyn EmbeddedWidget>,
    ) -> Self {
        Self {
            options,
            contacts,
            widget,
            template: Template::new("footer", DEFAULT_FOOTER_TEMPLATE),
        }
    }

    /// Create a footer without a widget.
    #[must_use]
    pub fn without_widget(options: FooterOptions, contacts: Vec<ContactLink>) -> Self {
        Self::new(options, contacts, Box::new(NoWidget))
    }

    /// Create a footer from its configuration section.
    #[must_use]
    pub fn from_config(config: &FooterConfig) -> Self {
        let options = FooterOptions {
            show_attribution: config.show_attribution,
            width: config.width,
            section_id: config.section_id.clone(),
            attribution: config.attribution.clone(),
        };
        Self::new(
            options,
            config.contacts.clone(),
            widget::from_config(&config.widget),
        )
    }

    /// Replace the footer template.
    #[must_use]
    pub fn with_template(mut self, template: Template) -> Self {
        self.template = template;
        self
    }

    /// Contact links in display order.
    #[must_use]
    pub fn contacts(&self) -> &[ContactLink] {
        &self.contacts
    }

    /// Render the footer. The widget cannot make this fail.
    pub fn render(&self) -> Result<String> {
        let widget_html = WidgetBoundary::render(self.widget.as_ref());

        let contacts = self
            .contacts
            .iter()
            .map(contact_anchor)
            .collect::<Result<Vec<_>>>()?
            .join("\n        ");

        let mut ctx = TemplateContext::new()
            .with_var("width_class", self.options.width.css_class())
            .with_var("widget", widget_html)
            .with_var("contacts", contacts);

        if let Some(id) = self.options.section_id.as_deref().filter(|id| !id.is_empty()) {
            ctx.insert("section_id_attr", format!(r#" id="{}""#, escape(id)));
        }

        if self.options.show_attribution {
            ctx.insert(
                "attribution",
                format!(
                    r#"<br>
    <hr>
    <br>
    <p class="attribution text-center text-gray-700 text-sm">{}</p>"#,
                    escape(&self.options.attribution)
                ),
            );
        }

        Ok(self.template.render(&ctx)?)
    }
}

fn contact_anchor(link: &ContactLink) -> Result<String> {
    let target = link.link_target()?;
    // External profiles open in a new browsing context without an opener.
    let new_context = if target.is_external() {
        r#" target="_blank" rel="noopener noreferrer""#
    } else {
        ""
    };

    Ok(format!(
        r#"<a class="py-2 px-3 hover:bg-gray-200 rounded" href="{href}" aria-label="{label}" data-icon="{id}"{new_context}><i class="{class} fa-lg text-gray-800" aria-hidden="true"></i></a>"#,
        href = escape(&link.target),
        label = link.icon.label(),
        id = link.icon.id(),
        class = link.icon.css_class(),
    ))
}

#[cfg(test)]
mod tests {
    use folio_core::{IconKey, LinkError};

    use super::*;
    use crate::{
        error::RenderError,
        widget::{WidgetError, UNAVAILABLE_PLACEHOLDER},
    };

    struct OfflineWidget;

    impl EmbeddedWidget for OfflineWidget {
        fn name(&self) -> &str {
            "offline"
        }

        fn render(&self) -> widget::Result<String> {
            Err(WidgetError::Unavailable {
                widget: "offline".to_string(),
                reason: "network unavailable".to_string(),
            })
        }
    }

    fn icon_ids(html: &str) -> Vec<&str> {
        html.split(r#"data-icon=""#)
            .skip(1)
            .filter_map(|rest| rest.split_once('"').map(|(id, _)| id))
            .collect()
    }

    #[test]
    fn test_default_contacts_in_order() {
        let html = FooterRegion::from_config(&FooterConfig::default())
            .render()
            .unwrap();

        assert_eq!(
            icon_ids(&html),
            vec!["github", "facebook", "instagram", "linkedin", "twitter", "email"]
        );
    }

    #[test]
    fn test_external_links_open_safely() {
        let html = FooterRegion::without_widget(
            FooterOptions::default(),
            vec![ContactLink::new(IconKey::Github, "https://github.com/albifrattini")],
        )
        .render()
        .unwrap();

        assert!(html.contains(
            r#"href="https://github.com/albifrattini" aria-label="GitHub" data-icon="github" target="_blank" rel="noopener noreferrer""#
        ));
    }

    #[test]
    fn test_mailto_is_last_and_has_no_new_context() {
        let html = FooterRegion::from_config(&FooterConfig::default())
            .render()
            .unwrap();

        let widget_end = html.find(r#"class="contacts"#).unwrap();
        let last_anchor = html.rfind("<a class=\"py-2").unwrap();
        assert!(widget_end < last_anchor);

        let last = &html[last_anchor..];
        assert!(last.contains(r#"href="mailto:frattini.alberto@gmail.com""#));
        let anchor_end = last.find("</a>").unwrap();
        assert!(!last[..anchor_end].contains("target="));
    }

    #[test]
    fn test_widget_failure_keeps_contacts() {
        let footer = FooterRegion::new(
            FooterOptions::default(),
            FooterConfig::default().contacts,
            Box::new(OfflineWidget),
        );
        let html = footer.render().unwrap();

        assert!(html.contains(UNAVAILABLE_PLACEHOLDER));
        assert_eq!(icon_ids(&html).len(), 6);
    }

    #[test]
    fn test_attribution_variant() {
        let html = FooterRegion::from_config(&FooterConfig::default())
            .render()
            .unwrap();
        assert!(html.contains("<hr>"));
        assert!(html.contains("© 2020 Alberto Frattini - Published with Vercel"));
        assert!(html.contains(r#"<div id="contacts" class="contacts"#));
        assert!(html.contains("max-w-md"));

        let options = FooterOptions {
            show_attribution: false,
            width: WidthVariant::Wide,
            section_id: None,
            ..FooterOptions::default()
        };
        let html = FooterRegion::without_widget(options, FooterConfig::default().contacts)
            .render()
            .unwrap();
        assert!(!html.contains("<hr>"));
        assert!(!html.contains("Published with Vercel"));
        assert!(!html.contains(r#"id="contacts""#));
        assert!(html.contains("max-w-5xl"));
        assert_eq!(icon_ids(&html).len(), 6);
    }

    #[test]
    fn test_invalid_contact_target_is_an_error() {
        let footer = FooterRegion::without_widget(
            FooterOptions::default(),
            vec![ContactLink::new(IconKey::Twitter, "twitter.com/albertofrattini")],
        );
        assert!(matches!(
            footer.render(),
            Err(RenderError::Link(LinkError::InvalidTarget { .. }))
        ));
    }

    #[test]
    fn test_render_is_idempotent() {
        let footer = FooterRegion::from_config(&FooterConfig::default());
        assert_eq!(footer.render().unwrap(), footer.render().unwrap());
    }
}
