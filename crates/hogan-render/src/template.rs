//! Live, render-capable templates.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

use hogan_types::tree::{Node, Section, Tag};
use serde_json::Value;

use crate::context::ContextStack;
use crate::value::{coerce_to_string, escape_html, is_truthy};

/// Partial templates available to a render, keyed by partial name.
pub type Partials = HashMap<String, Template>;

/// Nesting limit for partials that include themselves.
pub const MAX_PARTIAL_DEPTH: usize = 64;

/// A compiled template that renders against JSON data.
///
/// Cloning is cheap: the tree and source text are shared.
#[derive(Debug, Clone)]
pub struct Template {
    nodes: Arc<[Node]>,
    text: Arc<str>,
}

impl Template {
    /// Wrap a parsed tree and the text it was parsed from.
    pub fn new(nodes: Vec<Node>, text: impl Into<Arc<str>>) -> Self {
        Self {
            nodes: nodes.into(),
            text: text.into(),
        }
    }

    /// The template source.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Render with no partials.
    pub fn render(&self, context: &Value) -> String {
        self.render_with(context, &Partials::new())
    }

    /// Render with partials resolved from `partials`. Unknown partials
    /// render as nothing.
    pub fn render_with(&self, context: &Value, partials: &Partials) -> String {
        let mut stack = ContextStack::new(context);
        let mut renderer = Renderer::new(partials);
        renderer.render_template(self, &mut stack, "");
        renderer.out
    }
}

/// Tree-walking renderer. One per top-level render call.
struct Renderer<'p> {
    partials: &'p Partials,
    out: String,
    depth: usize,
}

impl<'p> Renderer<'p> {
    fn new(partials: &'p Partials) -> Self {
        Self {
            partials,
            out: String::new(),
            depth: 0,
        }
    }

    fn render_template<'v>(
        &mut self,
        template: &Template,
        stack: &mut ContextStack<'v>,
        indent: &str,
    ) {
        self.out.push_str(indent);
        self.walk(&template.nodes, stack, indent);
    }

    fn walk<'v>(&mut self, nodes: &[Node], stack: &mut ContextStack<'v>, indent: &str) {
        for node in nodes {
            match node {
                Node::Text(text) => self.out.push_str(text),
                Node::Newline { last } => {
                    self.out.push('\n');
                    if !last {
                        self.out.push_str(indent);
                    }
                }
                Node::Variable(tag) => {
                    let text = interpolate(tag, stack);
                    self.out.push_str(&escape_html(&text));
                }
                Node::Unescaped(tag) => {
                    let text = interpolate(tag, stack);
                    self.out.push_str(&text);
                }
                Node::Section(section) => self.section(section, stack, indent),
                Node::Inverted(section) => {
                    if section_frame(section, stack).is_none() {
                        self.walk(&section.nodes, stack, indent);
                    }
                }
                Node::Partial(partial) => self.partial(&partial.name, &partial.indent, stack),
                Node::Comment(_) => {}
            }
        }
    }

    fn section<'v>(&mut self, section: &Section, stack: &mut ContextStack<'v>, indent: &str) {
        let Some(frame) = section_frame(section, stack) else {
            return;
        };

        stack.push(frame);
        match frame {
            Value::Array(items) => {
                for item in items {
                    stack.push(item);
                    self.walk(&section.nodes, stack, indent);
                    stack.pop();
                }
            }
            _ => self.walk(&section.nodes, stack, indent),
        }
        stack.pop();
    }

    fn partial<'v>(&mut self, name: &str, indent: &str, stack: &mut ContextStack<'v>) {
        let partials = self.partials;
        let Some(template) = partials.get(name) else {
            tracing::trace!(partial = name, "partial not provided, rendering nothing");
            return;
        };
        if self.depth >= MAX_PARTIAL_DEPTH {
            tracing::warn!(partial = name, depth = self.depth, "partial nesting limit reached");
            return;
        }

        self.depth += 1;
        self.render_template(template, stack, indent);
        self.depth -= 1;
    }
}

fn interpolate(tag: &Tag, stack: &ContextStack<'_>) -> String {
    stack
        .lookup(&tag.name)
        .map(|value| coerce_to_string(&value))
        .unwrap_or_default()
}

/// Decide whether a section renders and which value it pushes.
///
/// Missing names, empty lists and falsy values skip the section. Objects
/// and lists are pushed themselves; any other truthy value re-pushes the
/// current top of the stack.
fn section_frame<'v>(section: &Section, stack: &ContextStack<'v>) -> Option<&'v Value> {
    let value = stack.lookup(&section.name)?;
    if matches!(&*value, Value::Array(items) if items.is_empty()) || !is_truthy(&value) {
        return None;
    }
    match value {
        Cow::Borrowed(frame) if matches!(frame, Value::Object(_) | Value::Array(_)) => Some(frame),
        _ => Some(stack.top()),
    }
}
