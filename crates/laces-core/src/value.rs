//! Template values wrapping components and media containers

use std::sync::Arc;

use minijinja::Value;
use minijinja::value::{Enumerator, Object, ObjectRepr};

use crate::container::MediaContainer;
use crate::traits::component::Component;

/// A component stored in a template scope.
///
/// Exposes `media` (rendered, safe) and `template_name` as attributes.
#[derive(Debug)]
pub struct ComponentObject {
    component: Arc<dyn Component>,
}

impl ComponentObject {
    pub fn component(&self) -> &Arc<dyn Component> {
        &self.component
    }
}

impl Object for ComponentObject {
    fn repr(self: &Arc<Self>) -> ObjectRepr {
        ObjectRepr::Plain
    }

    fn get_value(self: &Arc<Self>, key: &Value) -> Option<Value> {
        match key.as_str()? {
            "media" => Some(Value::from_safe_string(self.component.media().to_string())),
            "template_name" => self.component.template_name().map(Value::from),
            _ => None,
        }
    }
}

pub fn component_value(component: Arc<dyn Component>) -> Value {
    Value::from_object(ComponentObject { component })
}

/// A media container stored in a template scope: a sequence of components
/// with a `media` attribute.
#[derive(Debug)]
pub struct ContainerObject {
    container: MediaContainer<Arc<dyn Component>>,
}

impl ContainerObject {
    pub fn container(&self) -> &MediaContainer<Arc<dyn Component>> {
        &self.container
    }
}

impl Object for ContainerObject {
    fn repr(self: &Arc<Self>) -> ObjectRepr {
        ObjectRepr::Seq
    }

    fn get_value(self: &Arc<Self>, key: &Value) -> Option<Value> {
        if key.as_str() == Some("media") {
            return Some(Value::from_safe_string(self.container.media().to_string()));
        }
        let item = self.container.get(key.as_usize()?)?;
        Some(component_value(item.clone()))
    }

    fn enumerate(self: &Arc<Self>) -> Enumerator {
        Enumerator::Seq(self.container.len())
    }
}

pub fn container_value(container: MediaContainer<Arc<dyn Component>>) -> Value {
    Value::from_object(ContainerObject { container })
}
