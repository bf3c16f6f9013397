//! Template engine integration for laces components

mod config;
mod directive;
mod engine;
mod loader;

pub use config::{AutoEscapeMode, EngineConfig, UndefinedMode};
pub use directive::{COMPONENT_FUNCTION, ComponentTag, rewrite_component_tags};
pub use engine::Engine;
pub use loader::TemplateLoader;
