//! Rendered output and HTML escaping

use std::fmt;

use minijinja::{HtmlEscape, Value};

/// Output of a component render.
///
/// Safe markup is emitted verbatim by auto-escaping templates; text markup is
/// escaped on output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Markup {
    html: String,
    safe: bool,
}

impl Markup {
    pub fn safe(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            safe: true,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            html: text.into(),
            safe: false,
        }
    }

    /// Safe values stay safe, anything else becomes text.
    pub fn from_value(value: &Value) -> Self {
        if value.is_safe() {
            Self::safe(value.to_string())
        } else {
            Self::text(value.to_string())
        }
    }

    pub fn is_safe(&self) -> bool {
        self.safe
    }

    pub fn as_str(&self) -> &str {
        &self.html
    }

    pub fn into_string(self) -> String {
        self.html
    }

    /// The string an auto-escaping template would emit for this markup.
    pub fn to_escaped(&self) -> String {
        if self.safe {
            self.html.clone()
        } else {
            escape(&self.html)
        }
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.html)
    }
}

impl PartialEq<str> for Markup {
    fn eq(&self, other: &str) -> bool {
        self.html == other
    }
}

impl PartialEq<&str> for Markup {
    fn eq(&self, other: &&str) -> bool {
        self.html == *other
    }
}

impl From<Markup> for Value {
    fn from(markup: Markup) -> Self {
        if markup.safe {
            Value::from_safe_string(markup.html)
        } else {
            Value::from(markup.html)
        }
    }
}

/// Escape text the way minijinja's HTML auto-escaping does.
pub fn escape(input: &str) -> String {
    HtmlEscape(input).to_string()
}

/// Build safe [`Markup`](crate::Markup) from a format string, escaping every
/// argument.
///
/// ```
/// use laces_core::format_html;
///
/// let heading = format_html!("<h2>{}</h2>", "Fish & Chips");
/// assert_eq!(heading.as_str(), "<h2>Fish &amp; Chips</h2>");
/// ```
#[macro_export]
macro_rules! format_html {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::Markup::safe(format!(
            $fmt
            $(, $crate::escape(&::std::string::ToString::to_string(&$arg)))*
        ))
    };
}
