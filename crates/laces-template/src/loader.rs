//! Template file loading

use std::path::{Component, Path, PathBuf};

use laces_core::{LacesError, Result};
use tracing::debug;

use crate::config::EngineConfig;

/// Template loader resolving names against ordered search paths.
#[derive(Debug, Clone)]
pub struct TemplateLoader {
    search_paths: Vec<PathBuf>,
    default_extension: Option<String>,
}

impl TemplateLoader {
    pub fn new() -> Self {
        Self {
            search_paths: vec![PathBuf::from("templates")],
            default_extension: Some("html".to_string()),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            search_paths: config.template_dirs.clone(),
            default_extension: config.default_extension.clone(),
        }
    }

    pub fn add_search_path(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.search_paths.push(path.into());
        self
    }

    pub fn set_default_extension(&mut self, extension: Option<String>) -> &mut Self {
        self.default_extension = extension;
        self
    }

    /// First existing file for `name`, searching paths in order. Names that
    /// could escape a search path resolve to nothing.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        if !is_safe_name(name) {
            return None;
        }

        let candidates = self.candidates(name);
        self.search_paths.iter().find_map(|search_path| {
            candidates
                .iter()
                .map(|candidate| search_path.join(candidate))
                .find(|path| path.is_file())
        })
    }

    pub fn load_template(&self, name: &str) -> Result<String> {
        let path = self
            .resolve(name)
            .ok_or_else(|| LacesError::TemplateNotFound(name.to_string()))?;
        debug!(template = name, path = %path.display(), "Loading template");
        Ok(std::fs::read_to_string(&path)?)
    }

    pub fn template_exists(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    fn candidates(&self, name: &str) -> Vec<String> {
        let mut candidates = vec![name.to_string()];
        if let Some(extension) = &self.default_extension {
            if Path::new(name).extension().is_none() {
                candidates.push(format!("{name}.{extension}"));
            }
        }
        candidates
    }
}

impl Default for TemplateLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn is_safe_name(name: &str) -> bool {
    !name.is_empty()
        && Path::new(name)
            .components()
            .all(|part| matches!(part, Component::Normal(_) | Component::CurDir))
}
