//! Tree walker that emits the body of a Hogan `code` function.
//!
//! Each node appends a statement against the runtime object `t`:
//! - text and line breaks: `t.b("...")`
//! - variables: `t.b(t.v(t.f("name",c,p,0)))` (`t.t` for raw output,
//!   `t.d` instead of `t.f` for dotted names)
//! - sections: `if(t.s(...)){t.rs(c,p,function(c,p,t){...});c.pop();}`
//! - partials: `t.b(t.rp("<name0",c,p,"indent"))`

use hogan_types::tree::{Node, Partial, Section, Tag};

use crate::escape::esc;

/// Generated code for one template: the main function body and the
/// partials it references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeObject {
    pub code: String,
    pub partials: Vec<PartialRef>,
}

/// A partial call site. `symbol` is unique per call site, `name` is what
/// the runtime looks up in the partials map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialRef {
    pub symbol: String,
    pub name: String,
}

/// Generate code for a parsed template.
pub fn generate(nodes: &[Node]) -> CodeObject {
    let mut gen = Generator::default();
    gen.walk(nodes);
    CodeObject {
        code: gen.code,
        partials: gen.partials,
    }
}

#[derive(Default)]
struct Generator {
    code: String,
    partials: Vec<PartialRef>,
    /// Per-template counter that keeps partial symbols unique.
    serial: usize,
}

impl Generator {
    fn walk(&mut self, nodes: &[Node]) {
        for node in nodes {
            match node {
                Node::Text(text) => self.write(&format!("\"{}\"", esc(text))),
                Node::Newline { last: true } => self.write("\"\\n\""),
                Node::Newline { last: false } => self.write("\"\\n\" + i"),
                Node::Variable(tag) => self.interpolate("v", tag),
                Node::Unescaped(tag) => self.interpolate("t", tag),
                Node::Section(section) => self.section(section),
                Node::Inverted(section) => self.inverted(section),
                Node::Partial(partial) => self.partial(partial),
                Node::Comment(_) => {}
            }
        }
    }

    fn write(&mut self, expr: &str) {
        self.code.push_str("t.b(");
        self.code.push_str(expr);
        self.code.push_str(");");
    }

    fn interpolate(&mut self, method: &str, tag: &Tag) {
        self.code.push_str(&format!(
            "t.b(t.{method}(t.{}(\"{}\",c,p,0)));",
            lookup_method(tag.is_dotted()),
            esc(&tag.name)
        ));
    }

    fn section(&mut self, section: &Section) {
        self.code.push_str(&format!(
            "if(t.s(t.{}(\"{}\",c,p,1),c,p,0,{},{},\"{} {}\")){{t.rs(c,p,function(c,p,t){{",
            lookup_method(section.is_dotted()),
            esc(&section.name),
            section.start,
            section.end,
            section.otag,
            section.ctag
        ));
        self.walk(&section.nodes);
        self.code.push_str("});c.pop();}");
    }

    fn inverted(&mut self, section: &Section) {
        self.code.push_str(&format!(
            "if(!t.s(t.{}(\"{}\",c,p,1),c,p,1,0,0,\"\")){{",
            lookup_method(section.is_dotted()),
            esc(&section.name)
        ));
        self.walk(&section.nodes);
        self.code.push_str("};");
    }

    fn partial(&mut self, partial: &Partial) {
        let symbol = format!("<{}{}", partial.name, self.serial);
        self.serial += 1;
        self.code.push_str(&format!(
            "t.b(t.rp(\"{}\",c,p,\"{}\"));",
            esc(&symbol),
            partial.indent
        ));
        self.partials.push(PartialRef {
            symbol,
            name: partial.name.clone(),
        });
    }
}

/// `d` walks dotted names member by member, `f` looks a plain name up
/// through the context stack.
fn lookup_method(dotted: bool) -> &'static str {
    if dotted {
        "d"
    } else {
        "f"
    }
}
