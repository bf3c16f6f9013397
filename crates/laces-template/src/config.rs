use std::collections::HashMap;
use std::path::{Path, PathBuf};

use laces_core::{DEFAULT_STATIC_URL, LacesError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_template_dirs")]
    pub template_dirs: Vec<PathBuf>,

    /// Tried when a template name has no extension.
    #[serde(default = "default_extension")]
    pub default_extension: Option<String>,

    #[serde(default)]
    pub autoescape: AutoEscapeMode,

    #[serde(default)]
    pub undefined: UndefinedMode,

    #[serde(default)]
    pub trim_blocks: bool,

    #[serde(default)]
    pub lstrip_blocks: bool,

    #[serde(default = "default_true")]
    pub keep_trailing_newline: bool,

    #[serde(default = "default_static_url")]
    pub static_url: String,

    #[serde(default)]
    pub globals: HashMap<String, String>,
}

fn default_template_dirs() -> Vec<PathBuf> {
    vec![PathBuf::from("templates")]
}

fn default_extension() -> Option<String> {
    Some("html".to_string())
}

fn default_true() -> bool {
    true
}

fn default_static_url() -> String {
    DEFAULT_STATIC_URL.to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            template_dirs: default_template_dirs(),
            default_extension: default_extension(),
            autoescape: AutoEscapeMode::default(),
            undefined: UndefinedMode::default(),
            trim_blocks: false,
            lstrip_blocks: false,
            keep_trailing_newline: default_true(),
            static_url: default_static_url(),
            globals: HashMap::new(),
        }
    }
}

impl EngineConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Config without any template directory, for engines fed only through
    /// `Engine::add_template`.
    pub fn in_memory() -> Self {
        Self {
            template_dirs: Vec::new(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.static_url.ends_with('/') {
            return Err(LacesError::Config(format!(
                "static_url must end with '/': {}",
                self.static_url
            )));
        }
        if let Some(extension) = &self.default_extension {
            if extension.is_empty() || extension.starts_with('.') {
                return Err(LacesError::Config(format!(
                    "default_extension must be a bare extension: {extension:?}"
                )));
            }
        }
        Ok(())
    }

    pub fn with_template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.template_dirs.push(dir.into());
        self
    }

    pub fn with_global(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.globals.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AutoEscapeMode {
    /// Escape every template as HTML.
    #[default]
    Html,
    None,
    /// Decide by file extension (`.html`, `.htm`, `.xml` escape).
    Extension,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UndefinedMode {
    #[default]
    Lenient,
    Chainable,
    Strict,
}
