//! HTML template rendering using Jinja2 syntax.
//!
//! Page templates are embedded at compile time so the binary does not depend
//! on the working directory it is started from.

use minijinja::Environment;
use serde::Serialize;
use thiserror::Error;

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../../templates/base.html")),
    ("index.html", include_str!("../../templates/index.html")),
    ("flash_news.html", include_str!("../../templates/flash_news.html")),
    (
        "visitor_stats.html",
        include_str!("../../templates/visitor_stats.html"),
    ),
];

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to load template: {0}")]
    LoadError(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    pub fn new() -> Result<Self, TemplateError> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source)
                .map_err(|e| TemplateError::LoadError(format!("{}: {}", name, e)))?;
            tracing::debug!("Loaded template: {}", name);
        }
        Ok(Self { env })
    }

    /// Render a template with the given context
    pub fn render<S: Serialize>(&self, template_name: &str, ctx: S) -> Result<String, TemplateError> {
        let template = self
            .env
            .get_template(template_name)
            .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

        template
            .render(ctx)
            .map_err(|e| TemplateError::RenderError(e.to_string()))
    }

    pub fn template_exists(&self, template_name: &str) -> bool {
        self.env.get_template(template_name).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_all_templates_load() {
        let engine = TemplateEngine::new().unwrap();
        for (name, _) in TEMPLATES {
            assert!(engine.template_exists(name), "missing {}", name);
        }
    }

    #[test]
    fn test_render_missing_template() {
        let engine = TemplateEngine::new().unwrap();
        let result = engine.render("nonexistent.html", context! {});
        assert!(matches!(result, Err(TemplateError::NotFound(_))));
    }

    #[test]
    fn test_index_escapes_flash_text() {
        let engine = TemplateEngine::new().unwrap();
        let html = engine
            .render(
                "index.html",
                context! {
                    visitor_count => 3,
                    flashes => vec![context! { level => "error", message => "<b>bad</b>" }],
                },
            )
            .unwrap();
        assert!(html.contains("&lt;b&gt;bad"));
        assert!(!html.contains("<b>bad"));
        assert!(html.contains("<strong id=\"visitor-total\">3</strong>"));
    }
}
