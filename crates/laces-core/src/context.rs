//! Render contexts passed between a caller and a component

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use minijinja::Value;
use minijinja::value::ValueKind;
use serde::Serialize;

use crate::error::{LacesError, Result};
use crate::traits::component::Component;
use crate::value::component_value;

/// Uniform key access to whatever is including a component.
///
/// Implemented by plain mappings and by the live scope of a template that
/// renders a component through the `component` tag.
pub trait ParentContext {
    fn lookup(&self, key: &str) -> Option<Value>;

    fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }
}

/// Variable mapping, ordered by key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    vars: BTreeMap<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self {
            vars: BTreeMap::new(),
        }
    }

    /// Build a context from any value that serializes to a map, e.g. a
    /// struct deriving `Serialize`.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self> {
        Self::from_value(&Value::from_serialize(value))
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        if value.is_undefined() || value.is_none() {
            return Ok(Self::new());
        }
        if value.kind() != ValueKind::Map {
            return Err(LacesError::Context(format!(
                "expected a map, got {}",
                value.kind()
            )));
        }

        let mut context = Self::new();
        for key in value.try_iter()? {
            let item = value.get_item(&key)?;
            let key = match key.as_str() {
                Some(key) => key.to_string(),
                None => key.to_string(),
            };
            context.vars.insert(key, item);
        }
        Ok(context)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.vars.insert(key.into(), value.into())
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Store a component so templates can render it with the `component` tag.
    pub fn insert_component<C: Component + 'static>(
        &mut self,
        key: impl Into<String>,
        component: C,
    ) -> Option<Value> {
        self.insert(key, component_value(Arc::new(component)))
    }

    pub fn with_component<C: Component + 'static>(
        mut self,
        key: impl Into<String>,
        component: C,
    ) -> Self {
        self.insert_component(key, component);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.vars.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// New context holding `self` overridden by `other`. Neither input changes.
    pub fn merged(&self, other: &Context) -> Context {
        let mut vars = self.vars.clone();
        vars.extend(other.vars.iter().map(|(k, v)| (k.clone(), v.clone())));
        Context { vars }
    }

    pub fn to_value(&self) -> Value {
        Value::from_iter(self.vars.iter().map(|(k, v)| (k.clone(), v.clone())))
    }
}

impl ParentContext for Context {
    fn lookup(&self, key: &str) -> Option<Value> {
        self.vars.get(key).cloned()
    }
}

impl ParentContext for BTreeMap<String, Value> {
    fn lookup(&self, key: &str) -> Option<Value> {
        self.get(key).cloned()
    }
}

impl ParentContext for HashMap<String, Value> {
    fn lookup(&self, key: &str) -> Option<Value> {
        self.get(key).cloned()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Context {
    type Item = (&'a String, &'a Value);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.vars.iter()
    }
}
