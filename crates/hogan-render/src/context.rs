//! Context stack used while rendering.

use serde_json::Value;
use std::borrow::Cow;

/// The stack of context values a template renders against.
///
/// Names are looked up from the innermost value outward. A key that is
/// present with a `null` value still counts as found and stops the search.
#[derive(Debug, Clone)]
pub struct ContextStack<'v> {
    frames: Vec<&'v Value>,
}

impl<'v> ContextStack<'v> {
    /// Create a stack with the root context.
    pub fn new(root: &'v Value) -> Self {
        Self { frames: vec![root] }
    }

    pub fn push(&mut self, value: &'v Value) {
        self.frames.push(value);
    }

    pub fn pop(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// The innermost value.
    pub fn top(&self) -> &'v Value {
        self.frames[self.frames.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Resolve a tag name: plain names through [`find`](Self::find),
    /// dotted names through [`find_dotted`](Self::find_dotted).
    pub fn lookup(&self, name: &str) -> Option<Cow<'v, Value>> {
        if name.contains('.') {
            self.find_dotted(name)
        } else {
            self.find(name)
        }
    }

    /// Look a plain name up from the innermost frame outward.
    pub fn find(&self, key: &str) -> Option<Cow<'v, Value>> {
        self.frames.iter().rev().find_map(|frame| member(frame, key))
    }

    /// Resolve `a.b.c`: `a` through the stack, then members one by one.
    /// `.` is the current list item while iterating a list.
    pub fn find_dotted(&self, key: &str) -> Option<Cow<'v, Value>> {
        if key == "." {
            let len = self.frames.len();
            return (len >= 2 && self.frames[len - 2].is_array())
                .then(|| Cow::Borrowed(self.top()));
        }

        let mut names = key.split('.');
        let mut value = self.find(names.next().unwrap_or_default())?;
        for name in names {
            value = match value {
                Cow::Borrowed(scope) => member(scope, name)?,
                // Only array lengths are synthesized, and numbers have
                // no members.
                Cow::Owned(_) => return None,
            };
        }
        Some(value)
    }
}

/// Member lookup on a single scope. Objects expose their keys, arrays
/// their indices and `length`.
fn member<'v>(scope: &'v Value, key: &str) -> Option<Cow<'v, Value>> {
    match scope {
        Value::Object(map) => map.get(key).map(Cow::Borrowed),
        Value::Array(items) => {
            if key == "length" {
                return Some(Cow::Owned(Value::from(items.len())));
            }
            key.parse::<usize>()
                .ok()
                .and_then(|index| items.get(index))
                .map(Cow::Borrowed)
        }
        _ => None,
    }
}
