//! Every example component rendered on a single page

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::component::component_value;
use crate::prelude::*;

#[derive(Debug)]
struct RendersTemplateWithFixedContent;

impl Component for RendersTemplateWithFixedContent {
    fn template_name(&self) -> Option<&str> {
        Some("components/hello-world.html")
    }
}

#[derive(Debug)]
struct ReturnsFixedContent;

impl Component for ReturnsFixedContent {
    fn render_html(
        &self,
        _env: &Environment<'_>,
        _parent: Option<&dyn ParentContext>,
    ) -> Result<Markup> {
        Ok(format_html!("<h1>Hello World Return</h1>\n"))
    }
}

#[derive(Debug)]
struct PassesFixedName;

impl Component for PassesFixedName {
    fn template_name(&self) -> Option<&str> {
        Some("components/hello-name.html")
    }

    fn get_context_data(&self, _parent: &dyn ParentContext) -> Result<Context> {
        Ok(Context::new().with("name", "Alice"))
    }
}

#[derive(Debug)]
struct PassesInstanceAttribute {
    name: String,
}

impl Component for PassesInstanceAttribute {
    fn template_name(&self) -> Option<&str> {
        Some("components/hello-name.html")
    }

    fn get_context_data(&self, _parent: &dyn ParentContext) -> Result<Context> {
        Ok(Context::new().with("name", self.name.as_str()))
    }
}

#[derive(Debug, Serialize)]
struct PassesSelf {
    name: String,
}

impl Component for PassesSelf {
    fn template_name(&self) -> Option<&str> {
        Some("components/hello-self-name.html")
    }

    fn get_context_data(&self, _parent: &dyn ParentContext) -> Result<Context> {
        Ok(Context::new().with("this", Value::from_serialize(self)))
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializedAsContext {
    name: String,
}

impl Component for SerializedAsContext {
    fn template_name(&self) -> Option<&str> {
        Some("components/hello-name.html")
    }

    fn get_context_data(&self, _parent: &dyn ParentContext) -> Result<Context> {
        Context::from_serialize(self)
    }
}

#[derive(Debug)]
struct PassesNameFromParent;

impl Component for PassesNameFromParent {
    fn template_name(&self) -> Option<&str> {
        Some("components/hello-name.html")
    }

    fn get_context_data(&self, parent: &dyn ParentContext) -> Result<Context> {
        let name = parent
            .lookup("name")
            .ok_or_else(|| LacesError::Context("name is not set".into()))?;
        Ok(Context::new().with("name", name))
    }
}

#[derive(Debug)]
struct Heading {
    text: String,
}

impl Component for Heading {
    fn render_html(
        &self,
        _env: &Environment<'_>,
        _parent: Option<&dyn ParentContext>,
    ) -> Result<Markup> {
        Ok(format_html!("<h2>{}</h2>\n", self.text))
    }
}

#[derive(Debug)]
struct Paragraph {
    text: String,
}

impl Component for Paragraph {
    fn render_html(
        &self,
        _env: &Environment<'_>,
        _parent: Option<&dyn ParentContext>,
    ) -> Result<Markup> {
        Ok(format_html!("<p>{}</p>\n", self.text))
    }
}

#[derive(Debug)]
struct Blockquote {
    text: String,
}

impl Component for Blockquote {
    fn render_html(
        &self,
        _env: &Environment<'_>,
        _parent: Option<&dyn ParentContext>,
    ) -> Result<Markup> {
        Ok(format_html!("<blockquote>{}</blockquote>\n", self.text))
    }
}

#[derive(Debug)]
struct SectionWithHeadingAndParagraph {
    heading: Arc<dyn Component>,
    content: Arc<dyn Component>,
}

impl Component for SectionWithHeadingAndParagraph {
    fn template_name(&self) -> Option<&str> {
        Some("components/section.html")
    }

    fn get_context_data(&self, _parent: &dyn ParentContext) -> Result<Context> {
        Ok(Context::new()
            .with("heading", component_value(self.heading.clone()))
            .with("content", component_value(self.content.clone())))
    }
}

#[derive(Debug)]
struct ListSection {
    heading: Arc<dyn Component>,
    items: Vec<Arc<dyn Component>>,
}

impl Component for ListSection {
    fn template_name(&self) -> Option<&str> {
        Some("components/list-section.html")
    }

    fn get_context_data(&self, _parent: &dyn ParentContext) -> Result<Context> {
        let items: Vec<Value> = self.items.iter().cloned().map(component_value).collect();
        Ok(Context::new()
            .with("heading", component_value(self.heading.clone()))
            .with("items", items))
    }
}

#[derive(Debug)]
struct MediaDefining;

impl Component for MediaDefining {
    fn template_name(&self) -> Option<&str> {
        Some("components/hello-media.html")
    }

    fn media(&self) -> Media {
        Media::new()
            .with_css("all", ["component.css"])
            .with_js(["component.js"])
    }
}

#[derive(Debug)]
struct HeaderWithMedia;

impl Component for HeaderWithMedia {
    fn render_html(
        &self,
        _env: &Environment<'_>,
        _parent: Option<&dyn ParentContext>,
    ) -> Result<Markup> {
        Ok(format_html!("<header>Header with Media</header>\n"))
    }

    fn media(&self) -> Media {
        Media::new()
            .with_css("all", ["header.css"])
            .with_js(["header.js", "common.js"])
    }
}

#[derive(Debug)]
struct FooterWithMedia;

impl Component for FooterWithMedia {
    fn render_html(
        &self,
        _env: &Environment<'_>,
        _parent: Option<&dyn ParentContext>,
    ) -> Result<Markup> {
        Ok(format_html!("<footer>Footer with Media</footer>\n"))
    }

    fn media(&self) -> Media {
        Media::new()
            .with_css("all", ["footer.css"])
            .with_js(["footer.js", "common.js"])
    }
}

const KITCHEN_SINK: &str = r#"<!DOCTYPE html>
<html>
<head>
    {{ media_defining_component | media }}
    {{ components_with_media | media }}
</head>
<body>
    {% component fixed_content_template %}
    {% component fixed_content_return %}
    {% component passes_fixed_name %}
    {% component passes_instance_attr_name %}
    {% component passes_self %}
    {% component dataclass_attr_name %}
    {% component passes_name_from_parent_context %}
    {% component passes_name_from_parent_context with name="Erin Keyword" %}
    {% with name="Erin Block" %}
    {% component passes_name_from_parent_context %}
    {% endwith %}
    {% with name="Erin Block" %}
    {% component passes_name_from_parent_context with name="Erin Keyword over Block" %}
    {% endwith %}
    {% component section_with_heading_and_paragraph %}
    {% component list_section %}
    {% component media_defining_component %}
    {% for item in components_with_media %}
    {% component item %}
    {% endfor %}
</body>
</html>
"#;

fn engine() -> Engine {
    let mut engine = Engine::new(EngineConfig::in_memory()).unwrap();
    let templates = [
        ("components/hello-world.html", "<h1>Hello World</h1>\n"),
        ("components/hello-name.html", "<h1>Hello {{ name }}</h1>\n"),
        (
            "components/hello-self-name.html",
            "<h1>Hello {{ this.name }}'s self</h1>\n",
        ),
        ("components/hello-media.html", "<h1>Hello Media</h1>\n"),
        (
            "components/section.html",
            "<section>\n    {% component heading %}\n    {% component content %}\n</section>\n",
        ),
        (
            "components/list-section.html",
            "<section>\n    {% component heading %}\n    <ul>\n    {% for item in items %}\n        <li>\n            {% component item %}\n        </li>\n    {% endfor %}\n    </ul>\n</section>\n",
        ),
        ("pages/kitchen-sink.html", KITCHEN_SINK),
    ];
    for (name, source) in templates {
        engine.add_template(name, source).unwrap();
    }
    engine
}

fn kitchen_sink_context() -> Context {
    let section = SectionWithHeadingAndParagraph {
        heading: Arc::new(Heading {
            text: "Hello".into(),
        }),
        content: Arc::new(Paragraph {
            text: "World".into(),
        }),
    };
    let list_section = ListSection {
        heading: Arc::new(Heading {
            text: "Heading".into(),
        }),
        items: vec![
            Arc::new(Paragraph {
                text: "Item 1".into(),
            }),
            Arc::new(Blockquote {
                text: "Item 2".into(),
            }),
            Arc::new(Paragraph {
                text: "Item 3".into(),
            }),
        ],
    };
    let components_with_media: MediaContainer<Arc<dyn Component>> =
        MediaContainer::from(vec![
            Arc::new(HeaderWithMedia) as Arc<dyn Component>,
            Arc::new(FooterWithMedia) as Arc<dyn Component>,
        ]);

    Context::new()
        .with_component("fixed_content_template", RendersTemplateWithFixedContent)
        .with_component("fixed_content_return", ReturnsFixedContent)
        .with_component("passes_fixed_name", PassesFixedName)
        .with_component(
            "passes_instance_attr_name",
            PassesInstanceAttribute { name: "Bob".into() },
        )
        .with_component("passes_self", PassesSelf {
            name: "Carol".into(),
        })
        .with_component("dataclass_attr_name", SerializedAsContext {
            name: "Charlie".into(),
        })
        .with_component("passes_name_from_parent_context", PassesNameFromParent)
        .with("name", "Dan")
        .with_component("section_with_heading_and_paragraph", section)
        .with_component("list_section", list_section)
        .with_component("media_defining_component", MediaDefining)
        .with(
            "components_with_media",
            crate::component::container_value(components_with_media),
        )
}

/// Joins trimmed lines so nested markup compares independent of indentation.
fn squash(html: &str) -> String {
    html.lines().map(str::trim).collect()
}

#[test]
fn test_kitchen_sink() {
    let html = engine()
        .render("pages/kitchen-sink.html", &kitchen_sink_context())
        .unwrap();

    for expected in [
        "<h1>Hello World</h1>",
        "<h1>Hello World Return</h1>",
        "<h1>Hello Alice</h1>",
        "<h1>Hello Bob</h1>",
        "<h1>Hello Carol's self</h1>",
        "<h1>Hello Charlie</h1>",
        "<h1>Hello Dan</h1>",
        "<h1>Hello Erin Keyword</h1>",
        "<h1>Hello Erin Block</h1>",
        "<h1>Hello Erin Keyword over Block</h1>",
        "<h1>Hello Media</h1>",
        "<header>Header with Media</header>",
        "<footer>Footer with Media</footer>",
        r#"<link href="&#x2f;static&#x2f;component.css" media="all" rel="stylesheet">"#,
        r#"<script src="&#x2f;static&#x2f;component.js"></script>"#,
        r#"<link href="&#x2f;static&#x2f;header.css" media="all" rel="stylesheet">"#,
        r#"<link href="&#x2f;static&#x2f;footer.css" media="all" rel="stylesheet">"#,
        r#"<script src="&#x2f;static&#x2f;header.js"></script>"#,
        r#"<script src="&#x2f;static&#x2f;footer.js"></script>"#,
    ] {
        assert!(html.contains(expected), "missing {expected} in:\n{html}");
    }
    assert_eq!(
        html.matches(r#"<script src="&#x2f;static&#x2f;common.js"></script>"#)
            .count(),
        1
    );

    let squashed = squash(&html);
    assert!(squashed.contains("<section><h2>Hello</h2><p>World</p></section>"));
    assert!(squashed.contains(
        "<section><h2>Heading</h2><ul><li><p>Item 1</p></li><li><blockquote>Item 2</blockquote></li><li><p>Item 3</p></li></ul></section>"
    ));
}

#[test]
fn test_container_media_order() {
    let container: MediaContainer<Arc<dyn Component>> = MediaContainer::from(vec![
        Arc::new(HeaderWithMedia) as Arc<dyn Component>,
        Arc::new(FooterWithMedia) as Arc<dyn Component>,
    ]);
    assert_eq!(
        container.media().js(),
        ["header.js", "common.js", "footer.js"]
    );
    assert_eq!(
        engine().render_media(&container.media()),
        "<link href=\"&#x2f;static&#x2f;header.css\" media=\"all\" rel=\"stylesheet\">\n\
         <link href=\"&#x2f;static&#x2f;footer.css\" media=\"all\" rel=\"stylesheet\">\n\
         <script src=\"&#x2f;static&#x2f;header.js\"></script>\n\
         <script src=\"&#x2f;static&#x2f;common.js\"></script>\n\
         <script src=\"&#x2f;static&#x2f;footer.js\"></script>"
    );
}

#[test]
fn test_serve_example_component() {
    let registry = ServableRegistry::new();
    registry
        .register::<SerializedAsContext>("dataclass-attr-name")
        .unwrap();

    let params: Params = [("name".to_string(), "Frank".to_string())]
        .into_iter()
        .collect();
    let html = registry
        .serve(&engine(), "dataclass-attr-name", &params)
        .unwrap();
    assert_eq!(html, "<h1>Hello Frank</h1>\n");
}

#[test]
fn test_missing_parent_name_propagates() {
    let err = engine()
        .render_str("{% component c %}", &Context::new().with_component("c", PassesNameFromParent))
        .unwrap_err();
    assert!(err.to_string().contains("name is not set"), "{err}");
}
