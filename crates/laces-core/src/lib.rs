//! Core types and traits for laces components

mod container;
pub mod context;
pub mod error;
pub mod markup;
pub mod media;
pub mod traits;
pub mod value;

pub use container::MediaContainer;
pub use context::{Context, ParentContext};
pub use error::{LacesError, Result};
pub use markup::{Markup, escape};
pub use media::{DEFAULT_STATIC_URL, Media, MediaDefinition};
pub use traits::component::{Component, render_template};
pub use traits::media::HasMedia;
pub use value::{ComponentObject, ContainerObject, component_value, container_value};
