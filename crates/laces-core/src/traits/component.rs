//! The component trait: a value that knows how to render itself

use std::fmt;
use std::sync::Arc;

use minijinja::Environment;
use tracing::debug;

use crate::context::{Context, ParentContext};
use crate::error::{LacesError, Result};
use crate::markup::Markup;
use crate::media::Media;

/// A value that knows how to render itself.
///
/// The default [`render_html`](Component::render_html) looks up
/// [`template_name`](Component::template_name) and renders it with the mapping
/// returned by [`get_context_data`](Component::get_context_data). Components
/// without a template override `render_html` instead.
///
/// ```
/// use laces_core::{Component, Context, ParentContext, Result};
///
/// #[derive(Debug)]
/// struct Greeting {
///     name: String,
/// }
///
/// impl Component for Greeting {
///     fn template_name(&self) -> Option<&str> {
///         Some("components/hello-name.html")
///     }
///
///     fn get_context_data(&self, _parent: &dyn ParentContext) -> Result<Context> {
///         Ok(Context::new().with("name", self.name.as_str()))
///     }
/// }
/// ```
pub trait Component: fmt::Debug + Send + Sync {
    fn template_name(&self) -> Option<&str> {
        None
    }

    /// Build the context for this component's own template from the caller's
    /// context. The default ignores the caller.
    fn get_context_data(&self, _parent: &dyn ParentContext) -> Result<Context> {
        Ok(Context::new())
    }

    /// Render to markup. `parent` is the context of whatever includes the
    /// component; `None` behaves like an empty context.
    fn render_html(
        &self,
        env: &Environment<'_>,
        parent: Option<&dyn ParentContext>,
    ) -> Result<Markup> {
        render_template(self, env, parent)
    }

    fn media(&self) -> Media {
        Media::new()
    }
}

/// The default two-step render: derive the own context, then render the
/// component's template with it.
pub fn render_template<C: Component + ?Sized>(
    component: &C,
    env: &Environment<'_>,
    parent: Option<&dyn ParentContext>,
) -> Result<Markup> {
    let Some(name) = component.template_name() else {
        return Err(LacesError::NotImplemented(format!("{component:?}")));
    };

    let empty = Context::new();
    let parent = parent.unwrap_or(&empty as &dyn ParentContext);
    let context = component.get_context_data(parent)?;

    debug!(template = name, vars = context.len(), "Rendering component template");
    let html = env.get_template(name)?.render(context.to_value())?;
    Ok(Markup::safe(html))
}

impl<T: Component + ?Sized> Component for Arc<T> {
    fn template_name(&self) -> Option<&str> {
        (**self).template_name()
    }

    fn get_context_data(&self, parent: &dyn ParentContext) -> Result<Context> {
        (**self).get_context_data(parent)
    }

    fn render_html(
        &self,
        env: &Environment<'_>,
        parent: Option<&dyn ParentContext>,
    ) -> Result<Markup> {
        (**self).render_html(env, parent)
    }

    fn media(&self) -> Media {
        (**self).media()
    }
}

impl<T: Component + ?Sized> Component for Box<T> {
    fn template_name(&self) -> Option<&str> {
        (**self).template_name()
    }

    fn get_context_data(&self, parent: &dyn ParentContext) -> Result<Context> {
        (**self).get_context_data(parent)
    }

    fn render_html(
        &self,
        env: &Environment<'_>,
        parent: Option<&dyn ParentContext>,
    ) -> Result<Markup> {
        (**self).render_html(env, parent)
    }

    fn media(&self) -> Media {
        (**self).media()
    }
}
