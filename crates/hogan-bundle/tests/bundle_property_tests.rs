//! Property-based tests for the generated module.
//!
//! For any set of template files the bundle has one line per distinct
//! name plus the wrapper lines, names appear in first-seen order, and the
//! output depends only on the input sequence.

use hogan_bundle::{
    drive, BundleOptions, File, StreamEvent, TemplateBundleTransform, Wrapper,
};
use proptest::prelude::*;

/// Short lowercase template names, few enough to force collisions.
fn name_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "b", "c", "nav", "list", "row"]).prop_map(str::to_string)
}

/// Template text without tag delimiters, so every item compiles.
fn body_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,!\"'\\\\\n]{0,40}"
}

fn wrapper_strategy() -> impl Strategy<Value = Wrapper> {
    prop_oneof![Just(Wrapper::Amd), Just(Wrapper::CommonJs), Just(Wrapper::None)]
}

fn files(items: &[(String, String)]) -> Vec<File> {
    items
        .iter()
        .map(|(name, body)| File::buffer("", "src/", format!("src/{name}.html"), body.as_str()))
        .collect()
}

fn bundle(items: &[(String, String)], wrapper: Wrapper) -> Option<String> {
    bundle_with(items, BundleOptions::new().wrapper(wrapper))
}

fn bundle_with(items: &[(String, String)], options: BundleOptions) -> Option<String> {
    let mut transform = TemplateBundleTransform::new("bundle.js", options).ok()?;
    drive(&mut transform, files(items))
        .into_iter()
        .find_map(|event| match event {
            StreamEvent::Data(file) => file.bytes().map(|b| String::from_utf8_lossy(b).into_owned()),
            _ => None,
        })
}

fn distinct_in_order(items: &[(String, String)]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for (name, _) in items {
        if !names.contains(name) {
            names.push(name.clone());
        }
    }
    names
}

/// Property: the module has one assignment line per distinct name plus
/// five fixed lines when wrapped (open, require, init, return, close), or
/// only the init line when unwrapped.
#[test]
fn prop_line_count_matches_distinct_names() {
    proptest!(|(
        items in prop::collection::vec((name_strategy(), body_strategy()), 1..12),
        wrapper in wrapper_strategy(),
    )| {
        let module = bundle(&items, wrapper).expect("non-empty input emits a bundle");
        let wrapper_lines = if wrapper == Wrapper::None { 1 } else { 5 };
        let expected = distinct_in_order(&items).len() + wrapper_lines;
        prop_assert_eq!(module.split('\n').count(), expected);
    });
}

/// Property: names appear in the order they were first seen, whatever
/// order later duplicates arrive in.
#[test]
fn prop_names_in_first_seen_order() {
    proptest!(|(items in prop::collection::vec((name_strategy(), body_strategy()), 1..12))| {
        let module = bundle(&items, Wrapper::Amd).expect("non-empty input emits a bundle");
        let found: Vec<String> = module
            .split('\n')
            .filter_map(|line| line.strip_prefix("    templates['"))
            .filter_map(|rest| rest.split_once('\'').map(|(name, _)| name.to_string()))
            .collect();
        prop_assert_eq!(found, distinct_in_order(&items));
    });
}

/// Property: a later file with the same name replaces the earlier body.
#[test]
fn prop_last_write_wins() {
    proptest!(|(
        first in "[a-z]{1,10}",
        second in "[A-Z]{1,10}",
    )| {
        let items = vec![
            ("page".to_string(), first.clone()),
            ("page".to_string(), second.clone()),
        ];
        let module = bundle(&items, Wrapper::None).expect("non-empty input emits a bundle");
        let entry = format!("t.b(\"{second}\");");
        let stale = format!("t.b(\"{first}\");");
        prop_assert!(module.contains(&entry));
        prop_assert!(!module.contains(&stale));
    });
}

/// Property: lines are joined by the configured separator and nothing
/// else; escaped newlines inside literals never show up as separators.
#[test]
fn prop_lines_joined_by_separator() {
    proptest!(|(
        items in prop::collection::vec((name_strategy(), body_strategy()), 1..8),
        separator in prop_oneof![Just("\r\n"), Just("<SEP>")],
    )| {
        let options = BundleOptions::new().wrapper(Wrapper::Amd).new_line(separator);
        let module = bundle_with(&items, options).expect("non-empty input emits a bundle");
        let lines: Vec<&str> = module.split(separator).collect();
        prop_assert_eq!(lines.len(), distinct_in_order(&items).len() + 5);
        prop_assert_eq!(lines[0], "define(function(require) {");
        prop_assert!(!module.contains('\n') || separator == "\r\n");
    });
}

/// Property: bundling is deterministic.
#[test]
fn prop_output_is_deterministic() {
    proptest!(|(
        items in prop::collection::vec((name_strategy(), body_strategy()), 0..8),
        wrapper in wrapper_strategy(),
    )| {
        prop_assert_eq!(bundle(&items, wrapper), bundle(&items, wrapper));
    });
}

/// Property: no input files means no bundle.
#[test]
fn prop_no_files_no_bundle() {
    proptest!(|(wrapper in wrapper_strategy())| {
        prop_assert!(bundle(&[], wrapper).is_none());
    });
}
