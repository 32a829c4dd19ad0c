//! End-to-end tests for the folio shell.
//!
//! These build the stock portfolio and check the rendered chrome.

use std::fs;

use folio_core::Config;
use folio_shell::{
    Builder, EmbeddedWidget, FooterOptions, FooterRegion, HeaderRegion, Shell, WidgetError,
    widget::UNAVAILABLE_PLACEHOLDER,
};
use tempfile::TempDir;

struct UnreachableWidget;

impl EmbeddedWidget for UnreachableWidget {
    fn name(&self) -> &str {
        "unreachable"
    }

    fn render(&self) -> Result<String, WidgetError> {
        Err(WidgetError::Unavailable {
            widget: "unreachable".to_string(),
            reason: "connection refused".to_string(),
        })
    }
}

fn hrefs_with(html: &str, marker: &str) -> Vec<String> {
    html.split("<a ")
        .skip(1)
        .filter(|anchor| anchor.split_once('>').is_some_and(|(attrs, _)| attrs.contains(marker)))
        .filter_map(|anchor| {
            let start = anchor.find("href=\"")? + "href=\"".len();
            let end = anchor[start..].find('"')?;
            Some(anchor[start..start + end].to_string())
        })
        .collect()
}

#[test]
fn test_header_without_arguments() {
    let config = Config::default();
    let html = HeaderRegion::from_config(&config.header).render().unwrap();

    assert!(html.contains('√'));
    assert_eq!(hrefs_with(&html, "data-folio-nav"), vec!["/", "/blog", "/about"]);
    assert!(html.find('√').unwrap() < html.find("/home").unwrap());
}

#[test]
fn test_footer_ends_with_mailto() {
    let config = Config::default();
    let html = FooterRegion::from_config(&config.footer).render().unwrap();

    let contacts = hrefs_with(&html, "data-icon");
    assert_eq!(contacts.len(), 6);
    assert_eq!(
        contacts,
        vec![
            "https://github.com/albifrattini",
            "https://www.facebook.com/frattini.alberto/",
            "https://www.instagram.com/albi_frattini/",
            "https://www.linkedin.com/in/alberto-frattini-99758b151/",
            "https://twitter.com/albertofrattini",
            "mailto:frattini.alberto@gmail.com",
        ]
    );

    let widget_slot = html.find("widget-slot").unwrap();
    let mailto = html.find("mailto:frattini.alberto@gmail.com").unwrap();
    assert!(widget_slot < mailto);
}

#[test]
fn test_unavailable_widget_is_isolated() {
    let config = Config::default();
    let footer = FooterRegion::new(
        FooterOptions::default(),
        config.footer.contacts.clone(),
        Box::new(UnreachableWidget),
    );
    let html = footer.render().unwrap();

    assert!(html.contains(UNAVAILABLE_PLACEHOLDER));
    assert_eq!(hrefs_with(&html, "data-icon").len(), 6);
}

#[test]
fn test_full_page_is_idempotent() {
    let shell = Shell::from_config(&Config::default());
    let first = shell.render("About", "/about", "<p>about</p>").unwrap();
    let second = shell.render("About", "/about", "<p>about</p>").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_build_portfolio_site() {
    let root = TempDir::new().unwrap();
    let pages_dir = root.path().join("pages");
    let static_dir = root.path().join("static");
    let output_dir = root.path().join("public");

    fs::create_dir_all(&pages_dir).unwrap();
    fs::write(pages_dir.join("index.html"), "<h1>Hi, I'm Alberto</h1>").unwrap();
    fs::write(pages_dir.join("blog.html"), "<h1>Blog</h1>").unwrap();
    fs::write(pages_dir.join("about.html"), "<h1>About</h1>").unwrap();

    fs::create_dir_all(static_dir.join("favicons")).unwrap();
    fs::write(static_dir.join("favicons/site.webmanifest"), "{}").unwrap();

    let stats = Builder::new(Config::default(), &pages_dir, &output_dir)
        .with_static_dir(&static_dir)
        .build()
        .unwrap();

    assert_eq!(stats.pages, 3);
    assert_eq!(stats.failed_pages, 0);
    assert_eq!(stats.assets, 1);

    let about = fs::read_to_string(output_dir.join("about/index.html")).unwrap();
    assert!(about.contains("<h1>About</h1>"));
    assert_eq!(about.matches(r#"rel="manifest""#).count(), 1);
    assert_eq!(about.matches(r#"rel="shortcut icon""#).count(), 1);
    assert_eq!(about.matches(r#"rel="stylesheet""#).count(), 4);
    assert_eq!(hrefs_with(&about, "data-folio-nav").len(), 3);
    assert_eq!(hrefs_with(&about, "data-icon").len(), 6);
    assert!(output_dir.join("static/favicons/site.webmanifest").exists());
}
