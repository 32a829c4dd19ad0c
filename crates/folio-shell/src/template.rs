//! HTML template system for the shell regions.
//!
//! Provides a lightweight template system using string interpolation rather than
//! heavy template engines like Tera or Handlebars.

use std::{collections::HashMap, fs, path::Path};

use thiserror::Error;
use tracing::debug;

/// Template rendering errors.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Missing required variable.
    #[error("missing required variable: {0}")]
    MissingVariable(String),

    /// Template not found.
    #[error("template not found: {0}")]
    NotFound(String),

    /// Invalid template syntax.
    #[error("invalid template syntax: {0}")]
    InvalidSyntax(String),

    /// Override file could not be read.
    #[error("failed to read template {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Template context with variables for interpolation.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    variables: HashMap<String, String>,
}

impl TemplateContext {
    /// Create a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert pre-rendered markup into the context.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Insert plain text, escaped for element and attribute positions.
    pub fn insert_text(&mut self, key: impl Into<String>, value: &str) {
        self.insert(key, escape(value));
    }

    /// Create context with initial markup.
    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Create context with initial plain text.
    #[must_use]
    pub fn with_text(mut self, key: impl Into<String>, value: &str) -> Self {
        self.insert_text(key, value);
        self
    }

    /// Get a variable value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Check if a variable exists.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }
}

/// Escape text for use inside element content or a double-quoted attribute.
#[must_use]
pub fn escape(value: &str) -> String {
    html_escape::encode_double_quoted_attribute(value).into_owned()
}

/// A simple template that supports variable interpolation.
///
/// Variables are specified as `{{ variable_name }}` in the template string.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    content: String,
}

impl Template {
    /// Create a new template with the given name and content.
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Get the template name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the template with the given context.
    ///
    /// Replaces all `{{ variable }}` placeholders with values from context.
    pub fn render(&self, context: &TemplateContext) -> Result<String> {
        let mut result = self.content.clone();
        let mut pos = 0;

        while let Some(start) = result[pos..].find("{{") {
            let start = pos + start;
            let end = result[start..]
                .find("}}")
                .ok_or_else(|| TemplateError::InvalidSyntax("unclosed {{ delimiter".to_string()))?;
            let end = start + end + 2;

            let var_name = result[start + 2..end - 2].trim();

            // Optional variable syntax: {{ variable? }}
            let (var_name, optional) = if let Some(stripped) = var_name.strip_suffix('?') {
                (stripped, true)
            } else {
                (var_name, false)
            };

            let value = match context.get(var_name) {
                Some(v) => v.to_string(),
                None if optional => String::new(),
                None => return Err(TemplateError::MissingVariable(var_name.to_string())),
            };

            result.replace_range(start..end, &value);
            pos = start + value.len();
        }

        Ok(result)
    }
}

/// Registry of templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, Template>,
}

impl TemplateRegistry {
    /// Create a new registry with the built-in templates.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::default();
        registry.register_defaults();
        registry
    }

    fn register_defaults(&mut self) {
        self.register(Template::new("document", DEFAULT_DOCUMENT_TEMPLATE));
        self.register(Template::new("header", DEFAULT_HEADER_TEMPLATE));
        self.register(Template::new("footer", DEFAULT_FOOTER_TEMPLATE));
        self.register(Template::new("page", DEFAULT_PAGE_TEMPLATE));
    }

    /// Register a template, replacing any template with the same name.
    pub fn register(&mut self, template: Template) {
        self.templates.insert(template.name.clone(), template);
    }

    /// Override templates with every `<name>.html` file in `dir`.
    ///
    /// A missing directory is not an error. Returns the number of overrides.
    pub fn load_overrides(&mut self, dir: &Path) -> Result<usize> {
        if !dir.is_dir() {
            return Ok(0);
        }

        let read_err = |path: &Path, source| TemplateError::Io {
            path: path.display().to_string(),
            source,
        };

        let mut count = 0;
        for entry in fs::read_dir(dir).map_err(|e| read_err(dir, e))? {
            let path = entry.map_err(|e| read_err(dir, e))?.path();
            if path.extension().is_none_or(|ext| ext != "html") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let content = fs::read_to_string(&path).map_err(|e| read_err(&path, e))?;
            debug!(name, path = %path.display(), "template override");
            self.register(Template::new(name, content));
            count += 1;
        }

        Ok(count)
    }

    /// Get a template by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// Get a clone of a template by name.
    pub fn template(&self, name: &str) -> Result<Template> {
        self.get(name)
            .cloned()
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))
    }

    /// Render a named template with the given context.
    pub fn render(&self, name: &str, context: &TemplateContext) -> Result<String> {
        let template = self
            .get(name)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))?;
        template.render(context)
    }
}

/// Default document template.
pub const DEFAULT_DOCUMENT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="{{ lang }}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}</title>
    {{ meta? }}
    {{ head_links }}
</head>
<body>
    <div id="__folio">{{ body }}</div>
    <script>{{ bootstrap }}</script>
</body>
</html>"#;

/// Default header region template.
pub const DEFAULT_HEADER_TEMPLATE: &str = r#"<header class="site-header fixed top-0 left-0 right-0 flex justify-between mx-auto w-full max-w-5xl p-8 bg-white bg-opacity-99">
    <div class="brand text-gray-700 text-center bg-gray-400 px-4 py-2 m-2 rounded">{{ brand }}</div>
    <nav class="flex">{{ links }}</nav>
</header>"#;

/// Default footer region template.
pub const DEFAULT_FOOTER_TEMPLATE: &str = r#"<footer class="site-footer flex flex-col justify-center mx-auto mt-12 {{ width_class }} w-full p-6 bg-white">
    <div class="widget-slot">{{ widget }}</div>
    <div{{ section_id_attr? }} class="contacts flex justify-between">{{ contacts }}</div>
    {{ attribution? }}
</footer>"#;

/// Default page template, placed between header and footer.
pub const DEFAULT_PAGE_TEMPLATE: &str = r#"<main class="page mx-auto w-full max-w-5xl px-8 pt-32" data-route="{{ route }}">
    {{ content }}
</main>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_simple_render() {
        let template = Template::new("test", "Hello, {{ name }}!");
        let mut ctx = TemplateContext::new();
        ctx.insert("name", "World");

        let result = template.render(&ctx).unwrap();
        assert_eq!(result, "Hello, World!");
    }

    #[test]
    fn test_template_optional_variable() {
        let template = Template::new("test", "<div{{ id? }}>");
        let ctx = TemplateContext::new();
        assert_eq!(template.render(&ctx).unwrap(), "<div>");

        let ctx = TemplateContext::new().with_var("id", r#" id="contacts""#);
        assert_eq!(template.render(&ctx).unwrap(), r#"<div id="contacts">"#);
    }

    #[test]
    fn test_template_missing_required_variable() {
        let template = Template::new("test", "Hello, {{ name }}!");
        let ctx = TemplateContext::new();

        let result = template.render(&ctx);
        assert!(matches!(result, Err(TemplateError::MissingVariable(_))));
    }

    #[test]
    fn test_template_unclosed_delimiter() {
        let template = Template::new("test", "Hello, {{ name");
        let result = template.render(&TemplateContext::new());
        assert!(matches!(result, Err(TemplateError::InvalidSyntax(_))));
    }

    #[test]
    fn test_inserted_values_are_not_reinterpolated() {
        let template = Template::new("test", "{{ a }}");
        let ctx = TemplateContext::new().with_var("a", "{{ b }}");
        assert_eq!(template.render(&ctx).unwrap(), "{{ b }}");
    }

    #[test]
    fn test_text_is_escaped() {
        let ctx = TemplateContext::new().with_text("t", r#"<b>"Tom" & Jerry</b>"#);
        let value = ctx.get("t").unwrap();
        assert!(!value.contains('<'));
        assert!(!value.contains('"'));
        assert!(value.contains("&amp;"));
    }

    #[test]
    fn test_template_registry() {
        let registry = TemplateRegistry::new();

        assert!(registry.get("document").is_some());
        assert!(registry.get("header").is_some());
        assert!(registry.get("footer").is_some());
        assert!(registry.get("page").is_some());
        assert!(registry.get("nonexistent").is_none());
        assert!(matches!(
            registry.template("nonexistent"),
            Err(TemplateError::NotFound(_))
        ));
    }

    #[test]
    fn test_load_overrides() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("header.html"), "<header>{{ brand }}</header>").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let mut registry = TemplateRegistry::new();
        let count = registry.load_overrides(dir.path()).unwrap();
        assert_eq!(count, 1);

        let ctx = TemplateContext::new().with_var("brand", "√");
        assert_eq!(registry.render("header", &ctx).unwrap(), "<header>√</header>");
    }

    #[test]
    fn test_load_overrides_missing_dir() {
        let mut registry = TemplateRegistry::new();
        let count = registry
            .load_overrides(Path::new("/nonexistent/templates"))
            .unwrap();
        assert_eq!(count, 0);
    }
}
