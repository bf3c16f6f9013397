use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, LazyLock};

use laces_core::{Component, LacesError, Markup, Result};
use laces_template::Engine;
use parking_lot::RwLock;
use regex::Regex;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Request parameters, e.g. a parsed query string.
pub type Params = BTreeMap<String, String>;

pub type ComponentFactory = Arc<dyn Fn(&Params) -> Result<Arc<dyn Component>> + Send + Sync>;

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-a-zA-Z0-9_]+$").expect("slug pattern is valid"));

/// Components registered under a slug so they can be rendered on their own.
pub struct ServableRegistry {
    factories: RwLock<HashMap<String, ComponentFactory>>,
}

impl ServableRegistry {
    pub fn new() -> Self {
        Self {
            factories: RwLock::new(HashMap::new()),
        }
    }

    /// Register `T`, built by deserializing the request parameters.
    ///
    /// Parameters are strings; fields of `T` that are not strings need their
    /// own deserialization. Unknown parameters are ignored unless `T` denies
    /// them.
    pub fn register<T>(&self, slug: &str) -> Result<()>
    where
        T: Component + DeserializeOwned + 'static,
    {
        self.register_with(slug, |params| {
            let fields = params
                .iter()
                .map(|(key, value)| (key.clone(), serde_json::Value::String(value.clone())))
                .collect::<serde_json::Map<_, _>>();
            let component: T = serde_json::from_value(serde_json::Value::Object(fields))
                .map_err(|e| LacesError::BadRequest(e.to_string()))?;
            Ok(Arc::new(component) as Arc<dyn Component>)
        })
    }

    pub fn register_with<F>(&self, slug: &str, factory: F) -> Result<()>
    where
        F: Fn(&Params) -> Result<Arc<dyn Component>> + Send + Sync + 'static,
    {
        if !SLUG_RE.is_match(slug) {
            return Err(LacesError::InvalidSlug(slug.to_string()));
        }

        let mut factories = self.factories.write();
        if factories.contains_key(slug) {
            return Err(LacesError::Duplicate(slug.to_string()));
        }

        debug!(slug, "Registering servable component");
        factories.insert(slug.to_string(), Arc::new(factory));
        Ok(())
    }

    pub fn get_servable(&self, slug: &str) -> Result<ComponentFactory> {
        self.factories
            .read()
            .get(slug)
            .cloned()
            .ok_or_else(|| LacesError::ServableNotFound(slug.to_string()))
    }

    pub fn build(&self, slug: &str, params: &Params) -> Result<Arc<dyn Component>> {
        let factory = self.get_servable(slug)?;
        factory(params)
    }

    /// Build the component for `slug` and render it without a parent context.
    pub fn serve(&self, engine: &Engine, slug: &str, params: &Params) -> Result<Markup> {
        if !SLUG_RE.is_match(slug) {
            return Err(LacesError::InvalidSlug(slug.to_string()));
        }
        debug!(slug, params = params.len(), "Serving component");
        let component = self.build(slug, params)?;
        engine.render_component(component.as_ref(), None)
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.factories.read().contains_key(slug)
    }

    pub fn slugs(&self) -> Vec<String> {
        let mut slugs: Vec<String> = self.factories.read().keys().cloned().collect();
        slugs.sort();
        slugs
    }

    pub fn len(&self) -> usize {
        self.factories.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.read().is_empty()
    }
}

impl Default for ServableRegistry {
    fn default() -> Self {
        Self::new()
    }
}
