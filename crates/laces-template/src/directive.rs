//! The `{% component %}` tag.
//!
//! minijinja has no custom tags, so template sources are rewritten before
//! compilation: every `{% component ... %}` tag becomes a call of
//! [`COMPONENT_FUNCTION`], printed with `{{ }}` or bound with `{% set %}`.
//!
//! ```text
//! {% component card with title=page.title only as card_html %}
//! ```

use std::collections::VecDeque;
use std::ops::Range;
use std::sync::LazyLock;

use minijinja::{Error, ErrorKind};
use regex::Regex;

/// Name of the engine function a rewritten tag calls.
pub const COMPONENT_FUNCTION: &str = "__laces_component";

const TAG: &str = "'component' tag";

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{%([-+]?)\s*component(?:\s+(.*?))?\s*([-+]?)%\}")
        .expect("component tag pattern is valid")
});

static SKIP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{%-?\s*raw\s*-?%\}.*?\{%-?\s*endraw\s*-?%\}|\{#.*?#\}|\{\{.*?\}\}")
        .expect("skip pattern is valid")
});

static KWARG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^([A-Za-z_][A-Za-z0-9_]*)=([^=].*)$").expect("kwarg pattern is valid")
});

static IDENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid")
});

/// A parsed `component` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentTag {
    /// Expression evaluating to the component.
    pub component: String,
    pub fallback_render_method: Option<String>,
    /// `with` pairs in tag order; a repeated key keeps its last value. A
    /// second `with` clause replaces the first.
    pub extra_context: Vec<(String, String)>,
    /// `only`: the component sees nothing but `extra_context`.
    pub isolated_context: bool,
    /// `as <name>`: bind the output instead of emitting it.
    pub target_var: Option<String>,
}

impl ComponentTag {
    /// Parse everything after the `component` keyword.
    pub fn parse(args: &str) -> Result<Self, Error> {
        let mut bits: VecDeque<String> = split_bits(args)?.into();

        let component = bits.pop_front().ok_or_else(|| {
            syntax_error(format!(
                "{TAG} requires at least one argument, the component object"
            ))
        })?;

        let mut flags = take_kwargs(&mut bits);
        let fallback_render_method = flags
            .iter()
            .position(|(key, _)| key == "fallback_render_method")
            .map(|index| flags.remove(index).1);
        if !flags.is_empty() {
            return Err(syntax_error(format!(
                "{TAG} only accepts 'fallback_render_method' as a keyword argument"
            )));
        }

        let mut tag = ComponentTag {
            component,
            fallback_render_method,
            extra_context: Vec::new(),
            isolated_context: false,
            target_var: None,
        };

        while let Some(bit) = bits.pop_front() {
            match bit.as_str() {
                "with" => {
                    let pairs = take_kwargs(&mut bits);
                    if pairs.is_empty() {
                        return Err(syntax_error(format!(
                            "{TAG} 'with' must be followed by at least one key=value pair"
                        )));
                    }
                    tag.extra_context.clear();
                    for (key, value) in pairs {
                        tag.extra_context.retain(|(existing, _)| *existing != key);
                        tag.extra_context.push((key, value));
                    }
                }
                "only" => tag.isolated_context = true,
                "as" => {
                    let name = bits.pop_front().ok_or_else(|| {
                        syntax_error(format!("{TAG} with 'as' must be followed by a variable name"))
                    })?;
                    if !IDENT_RE.is_match(&name) {
                        return Err(syntax_error(format!(
                            "{TAG} 'as' target {name:?} is not a valid variable name"
                        )));
                    }
                    tag.target_var = Some(name);
                }
                other => {
                    return Err(syntax_error(format!(
                        "{TAG} received an unknown argument: {other:?}"
                    )));
                }
            }
        }

        Ok(tag)
    }

    /// The function call expression this tag stands for.
    pub fn to_call(&self) -> String {
        let pairs = self
            .extra_context
            .iter()
            .map(|(key, value)| format!("\"{key}\": ({value})"))
            .collect::<Vec<_>>()
            .join(", ");

        let mut call = format!("{COMPONENT_FUNCTION}(({}), {{{pairs}}}", self.component);
        if self.isolated_context {
            call.push_str(", only=true");
        }
        if let Some(fallback) = &self.fallback_render_method {
            call.push_str(&format!(", fallback=({fallback})"));
        }
        call.push(')');
        call
    }

    fn to_template(&self, trim_left: bool, trim_right: bool, newlines: usize) -> String {
        let left = if trim_left { "-" } else { "" };
        let right = if trim_right { "-" } else { "" };
        let call = self.to_call();
        // Keep the tag's line breaks so later line numbers stay correct.
        let pad = "\n".repeat(newlines);

        match &self.target_var {
            Some(var) => format!("{{%{left} set {var} = {call}{pad} {right}%}}"),
            None => format!("{{{{{left} {call}{pad} {right}}}}}"),
        }
    }
}

/// Rewrite every `component` tag in `source` into plain minijinja syntax.
/// Tag text inside `raw` blocks, comments and `{{ }}` expressions is left
/// alone. Tag text inside a string literal of another `{% %}` tag is not
/// recognised as such and gets rewritten.
pub fn rewrite_component_tags(name: &str, source: &str) -> Result<String, Error> {
    if !source.contains("component") {
        return Ok(source.to_string());
    }

    let skipped: Vec<Range<usize>> = SKIP_RE.find_iter(source).map(|m| m.range()).collect();
    let mut out = String::with_capacity(source.len());
    let mut last = 0;

    for caps in TAG_RE.captures_iter(source) {
        let Some(whole) = caps.get(0) else { continue };
        if skipped.iter().any(|range| range.contains(&whole.start())) {
            continue;
        }

        let args = caps.get(2).map_or("", |m| m.as_str());
        let tag = ComponentTag::parse(args)
            .map_err(|err| syntax_error(format!("{} (in template {name:?})", detail(&err))))?;

        out.push_str(&source[last..whole.start()]);
        out.push_str(&tag.to_template(
            &caps[1] == "-",
            &caps[3] == "-",
            whole.as_str().matches('\n').count(),
        ));
        last = whole.end();
    }

    out.push_str(&source[last..]);
    Ok(out)
}

/// Split tag arguments on whitespace outside quotes and brackets.
fn split_bits(args: &str) -> Result<Vec<String>, Error> {
    let mut bits = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut depth = 0usize;

    for ch in args.chars() {
        if let Some(open) = quote {
            current.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == open {
                quote = None;
            }
            continue;
        }

        match ch {
            '"' | '\'' => {
                quote = Some(ch);
                current.push(ch);
            }
            '(' | '[' | '{' => {
                depth += 1;
                current.push(ch);
            }
            ')' | ']' | '}' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            c if c.is_whitespace() && depth == 0 => {
                if !current.is_empty() {
                    bits.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(ch),
        }
    }

    if quote.is_some() {
        return Err(syntax_error(format!("{TAG} has an unterminated string")));
    }
    if depth > 0 {
        return Err(syntax_error(format!("{TAG} has unbalanced brackets")));
    }
    if !current.is_empty() {
        bits.push(current);
    }
    Ok(bits)
}

/// Consume leading `key=value` bits.
fn take_kwargs(bits: &mut VecDeque<String>) -> Vec<(String, String)> {
    let mut kwargs = Vec::new();
    while let Some(bit) = bits.front() {
        let Some(caps) = KWARG_RE.captures(bit) else {
            break;
        };
        kwargs.push((caps[1].to_string(), caps[2].to_string()));
        bits.pop_front();
    }
    kwargs
}

fn syntax_error(message: String) -> Error {
    Error::new(ErrorKind::SyntaxError, message)
}

fn detail(err: &Error) -> String {
    err.detail().map(str::to_string).unwrap_or_else(|| err.to_string())
}
