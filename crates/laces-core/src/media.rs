//! Asset declarations (stylesheets and scripts) that components need on a page

use std::collections::BTreeMap;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use crate::markup::escape;

pub const DEFAULT_STATIC_URL: &str = "/static/";

/// Declarative form of [`Media`], as written in configuration files.
///
/// ```yaml
/// css:
///   all: [css/base.css]
///   print: [css/print.css]
/// js: [js/app.js]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaDefinition {
    #[serde(default)]
    pub css: BTreeMap<String, Vec<String>>,

    #[serde(default)]
    pub js: Vec<String>,
}

/// Stylesheets grouped by medium plus scripts.
///
/// Merging keeps the first occurrence of each path, per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "MediaDefinition", into = "MediaDefinition")]
pub struct Media {
    css: BTreeMap<String, Vec<String>>,
    js: Vec<String>,
}

impl Media {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_css<I, S>(mut self, medium: impl Into<String>, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = self.css.entry(medium.into()).or_default();
        for path in paths {
            push_unique(list, path.into());
        }
        self
    }

    pub fn with_js<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for path in paths {
            push_unique(&mut self.js, path.into());
        }
        self
    }

    pub fn css(&self) -> &BTreeMap<String, Vec<String>> {
        &self.css
    }

    pub fn js(&self) -> &[String] {
        &self.js
    }

    pub fn is_empty(&self) -> bool {
        self.js.is_empty() && self.css.values().all(Vec::is_empty)
    }

    pub fn merge(&mut self, other: &Media) {
        for (medium, paths) in &other.css {
            let list = self.css.entry(medium.clone()).or_default();
            for path in paths {
                push_unique(list, path.clone());
            }
        }
        for path in &other.js {
            push_unique(&mut self.js, path.clone());
        }
    }

    /// Paths that are already absolute or full URLs are left alone.
    pub fn absolute_path(path: &str, static_url: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") || path.starts_with('/') {
            path.to_string()
        } else {
            format!("{static_url}{path}")
        }
    }

    pub fn render_css(&self, static_url: &str) -> Vec<String> {
        self.css
            .iter()
            .flat_map(|(medium, paths)| {
                paths.iter().map(move |path| {
                    format!(
                        r#"<link href="{}" media="{}" rel="stylesheet">"#,
                        escape(&Self::absolute_path(path, static_url)),
                        escape(medium)
                    )
                })
            })
            .collect()
    }

    pub fn render_js(&self, static_url: &str) -> Vec<String> {
        self.js
            .iter()
            .map(|path| {
                format!(
                    r#"<script src="{}"></script>"#,
                    escape(&Self::absolute_path(path, static_url))
                )
            })
            .collect()
    }

    /// Stylesheet tags first, then script tags, one per line.
    pub fn render(&self, static_url: &str) -> String {
        let mut tags = self.render_css(static_url);
        tags.extend(self.render_js(static_url));
        tags.join("\n")
    }
}

fn push_unique(list: &mut Vec<String>, path: String) {
    if !list.contains(&path) {
        list.push(path);
    }
}

impl From<MediaDefinition> for Media {
    fn from(definition: MediaDefinition) -> Self {
        let mut media = Media::new().with_js(definition.js);
        for (medium, paths) in definition.css {
            media = media.with_css(medium, paths);
        }
        media
    }
}

impl From<Media> for MediaDefinition {
    fn from(media: Media) -> Self {
        Self {
            css: media.css,
            js: media.js,
        }
    }
}

impl fmt::Display for Media {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(DEFAULT_STATIC_URL))
    }
}

impl Add for Media {
    type Output = Media;

    fn add(mut self, other: Media) -> Media {
        self.merge(&other);
        self
    }
}

impl AddAssign for Media {
    fn add_assign(&mut self, other: Media) {
        self.merge(&other);
    }
}

impl Sum for Media {
    fn sum<I: Iterator<Item = Media>>(iter: I) -> Self {
        iter.fold(Media::new(), Add::add)
    }
}
