//! Configured minijinja environment with the `component` tag runtime

use laces_core::{
    Component, ComponentObject, ContainerObject, Context, LacesError, Markup, Media,
    ParentContext, Result,
};
use minijinja::value::Kwargs;
use minijinja::{AutoEscape, Environment, Error, ErrorKind, State, UndefinedBehavior, Value};
use tracing::debug;

use crate::config::{AutoEscapeMode, EngineConfig, UndefinedMode};
use crate::directive::{COMPONENT_FUNCTION, rewrite_component_tags};
use crate::loader::TemplateLoader;

/// Template engine that understands components.
///
/// Wraps a minijinja [`Environment`] whose loader reads from the configured
/// template directories and rewrites `{% component %}` tags on load.
pub struct Engine {
    env: Environment<'static>,
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        let loader = TemplateLoader::from_config(&config);
        Self::with_loader(config, loader)
    }

    /// Fails with a `Config` error when `config` does not validate.
    pub fn with_loader(config: EngineConfig, loader: TemplateLoader) -> Result<Self> {
        config.validate()?;
        let mut env = Environment::new();

        env.set_loader(move |name| match loader.load_template(name) {
            Ok(source) => rewrite_component_tags(name, &source).map(Some),
            Err(LacesError::TemplateNotFound(_)) => Ok(None),
            Err(err) => Err(Error::new(
                ErrorKind::InvalidOperation,
                format!("Failed to load template {name:?}"),
            )
            .with_source(err)),
        });

        let mode = config.autoescape;
        env.set_auto_escape_callback(move |name| match mode {
            AutoEscapeMode::Html => AutoEscape::Html,
            AutoEscapeMode::None => AutoEscape::None,
            AutoEscapeMode::Extension => minijinja::default_auto_escape_callback(name),
        });

        env.set_undefined_behavior(match config.undefined {
            UndefinedMode::Lenient => UndefinedBehavior::Lenient,
            UndefinedMode::Chainable => UndefinedBehavior::Chainable,
            UndefinedMode::Strict => UndefinedBehavior::Strict,
        });
        env.set_trim_blocks(config.trim_blocks);
        env.set_lstrip_blocks(config.lstrip_blocks);
        env.set_keep_trailing_newline(config.keep_trailing_newline);

        for (key, value) in &config.globals {
            env.add_global(key.clone(), Value::from(value.clone()));
        }

        env.add_function(COMPONENT_FUNCTION, render_component_tag);

        let static_url = config.static_url.clone();
        env.add_filter("media", move |value: Value| -> std::result::Result<Value, Error> {
            let media = media_of(&value).ok_or_else(|| {
                Error::new(
                    ErrorKind::InvalidOperation,
                    format!("{value:?} does not declare media"),
                )
            })?;
            Ok(Value::from_safe_string(media.render(&static_url)))
        });

        Ok(Self { env, config })
    }

    pub fn env(&self) -> &Environment<'static> {
        &self.env
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Register a template from source, rewriting `component` tags.
    pub fn add_template(&mut self, name: impl Into<String>, source: &str) -> Result<()> {
        let name = name.into();
        let source = rewrite_component_tags(&name, source)?;
        self.env.add_template_owned(name, source)?;
        Ok(())
    }

    pub fn render(&self, name: &str, context: &Context) -> Result<String> {
        debug!(template = name, "Rendering template");
        let template = self.env.get_template(name)?;
        Ok(template.render(context.to_value())?)
    }

    pub fn render_str(&self, source: &str, context: &Context) -> Result<String> {
        let source = rewrite_component_tags("<string>", source)?;
        Ok(self.env.render_str(&source, context.to_value())?)
    }

    pub fn render_component(
        &self,
        component: &dyn Component,
        parent: Option<&dyn ParentContext>,
    ) -> Result<Markup> {
        component.render_html(&self.env, parent)
    }

    /// Media tags using the configured static URL.
    pub fn render_media(&self, media: &Media) -> String {
        media.render(&self.config.static_url)
    }
}

/// The calling template's scope overlaid with the tag's `with` pairs.
struct ScopeContext<'s, 'a, 'env> {
    state: &'s State<'a, 'env>,
    extra: &'s Context,
}

impl ParentContext for ScopeContext<'_, '_, '_> {
    fn lookup(&self, key: &str) -> Option<Value> {
        self.extra
            .lookup(key)
            .or_else(|| self.state.lookup(key).filter(|value| !value.is_undefined()))
    }
}

/// Runtime half of the `component` tag.
fn render_component_tag(
    state: &State,
    target: Value,
    extra: Value,
    kwargs: Kwargs,
) -> std::result::Result<Value, Error> {
    let only: Option<bool> = kwargs.get("only")?;
    let fallback: Option<Value> = kwargs.get("fallback")?;
    kwargs.assert_all_used()?;

    let extra = Context::from_value(&extra)?;

    let markup = if let Some(object) = target.downcast_object_ref::<ComponentObject>() {
        let component = object.component();
        if only.unwrap_or(false) {
            component.render_html(state.env(), Some(&extra))?
        } else {
            let scope = ScopeContext {
                state,
                extra: &extra,
            };
            component.render_html(state.env(), Some(&scope))?
        }
    } else if fallback.is_some_and(|value| value.is_true()) {
        let rendered = target.call_method(state, "render", &[]).map_err(|err| {
            Error::from(LacesError::NotRenderable(format!("{target:?}"))).with_source(err)
        })?;
        Markup::from_value(&rendered)
    } else {
        return Err(LacesError::NotRenderable(format!("{target:?}")).into());
    };

    Ok(markup.into())
}

fn media_of(value: &Value) -> Option<Media> {
    if let Some(object) = value.downcast_object_ref::<ComponentObject>() {
        return Some(object.component().media());
    }
    if let Some(object) = value.downcast_object_ref::<ContainerObject>() {
        return Some(object.container().media());
    }
    None
}
