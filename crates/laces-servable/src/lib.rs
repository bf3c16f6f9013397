//! Servable components: build a component from request parameters and render it

mod registry;

pub use registry::{ComponentFactory, Params, ServableRegistry};
