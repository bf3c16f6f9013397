//! Self-rendering components for minijinja templates

pub mod component {
    pub use laces_core::{
        Component, ComponentObject, ContainerObject, HasMedia, MediaContainer, component_value,
        container_value, render_template,
    };
}

pub mod context {
    pub use laces_core::{Context, ParentContext};
}

pub mod error {
    pub use laces_core::{LacesError, Result};
}

pub mod markup {
    pub use laces_core::format_html;
    pub use laces_core::{Markup, escape};
}

pub mod media {
    pub use laces_core::{DEFAULT_STATIC_URL, HasMedia, Media, MediaContainer, MediaDefinition};
}

pub mod template {
    pub use laces_template::{
        AutoEscapeMode, COMPONENT_FUNCTION, ComponentTag, Engine, EngineConfig, TemplateLoader,
        UndefinedMode, rewrite_component_tags,
    };
}

pub mod servable {
    pub use laces_servable::{ComponentFactory, Params, ServableRegistry};
}

/// Everything needed to define and render components.
///
/// `HasMedia` is left out: every component already has `media()` through
/// [`Component`](crate::component::Component), and importing both makes the
/// call ambiguous.
pub mod prelude {
    pub use laces_core::format_html;
    pub use laces_core::{
        Component, Context, LacesError, Markup, Media, MediaContainer, ParentContext, Result,
    };
    pub use laces_servable::{Params, ServableRegistry};
    pub use laces_template::{Engine, EngineConfig};
    pub use minijinja::{Environment, Value};
}

pub use laces_core::format_html;
pub use laces_core::{
    Component, Context, LacesError, Markup, Media, MediaContainer, MediaDefinition, ParentContext,
    Result,
};
pub use laces_servable::ServableRegistry;
pub use laces_template::{Engine, EngineConfig};

#[cfg(test)]
mod kitchen_sink;
