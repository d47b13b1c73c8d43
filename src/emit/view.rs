//! View rendering
//!
//! Logical view names resolve to templates under the configured directory:
//! `response/hello` becomes `<template_dir>/response/hello.html`.

use std::path::Path;

use minijinja::{path_loader, Environment, ErrorKind};
use serde_json::{Map, Value as Json};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("View '{view}' not found")]
    NotFound { view: String },

    #[error("Failed to render view '{view}': {source}")]
    Render {
        view: String,
        #[source]
        source: minijinja::Error,
    },
}

/// Renders a logical view with its model
pub trait ViewRenderer: Send + Sync {
    fn render(&self, view: &str, model: &Map<String, Json>) -> Result<String, ViewError>;
}

/// Template-directory backed views
pub struct TemplateViews {
    env: Environment<'static>,
    suffix: String,
}

impl TemplateViews {
    pub fn new(template_dir: impl AsRef<Path>, suffix: &str) -> Self {
        let mut env = Environment::new();
        env.set_loader(path_loader(template_dir));
        Self {
            env,
            suffix: suffix.to_string(),
        }
    }

    /// Views held in memory, keyed by logical view name
    pub fn from_sources<'a>(
        sources: impl IntoIterator<Item = (&'a str, &'a str)>,
        suffix: &str,
    ) -> Result<Self, ViewError> {
        let mut env = Environment::new();
        for (view, source) in sources {
            env.add_template_owned(format!("{view}{suffix}"), source.to_string())
                .map_err(|source| ViewError::Render {
                    view: view.to_string(),
                    source,
                })?;
        }
        Ok(Self {
            env,
            suffix: suffix.to_string(),
        })
    }

    fn template_name(&self, view: &str) -> String {
        format!("{}{}", view.trim_start_matches('/'), self.suffix)
    }
}

impl ViewRenderer for TemplateViews {
    fn render(&self, view: &str, model: &Map<String, Json>) -> Result<String, ViewError> {
        let template = self
            .env
            .get_template(&self.template_name(view))
            .map_err(|e| match e.kind() {
                ErrorKind::TemplateNotFound => ViewError::NotFound {
                    view: view.to_string(),
                },
                _ => ViewError::Render {
                    view: view.to_string(),
                    source: e,
                },
            })?;

        template.render(model).map_err(|source| ViewError::Render {
            view: view.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn model(data: &str) -> Map<String, Json> {
        let mut model = Map::new();
        model.insert("data".to_string(), Json::from(data));
        model
    }

    #[test]
    fn test_render_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("response")).unwrap();
        fs::write(
            dir.path().join("response/hello.html"),
            "<p>{{ data }}</p>",
        )
        .unwrap();

        let views = TemplateViews::new(dir.path(), ".html");
        let html = views.render("response/hello", &model("hello!")).unwrap();
        assert_eq!(html, "<p>hello!</p>");
    }

    #[test]
    fn test_missing_view() {
        let dir = tempfile::tempdir().unwrap();
        let views = TemplateViews::new(dir.path(), ".html");
        assert!(matches!(
            views.render("nowhere", &Map::new()),
            Err(ViewError::NotFound { .. })
        ));
    }

    #[test]
    fn test_in_memory_views_escape_html() {
        let views = TemplateViews::from_sources([("greet", "{{ data }}")], ".html").unwrap();
        assert_eq!(
            views.render("greet", &model("<b>")).unwrap(),
            "&lt;b&gt;"
        );
    }
}
