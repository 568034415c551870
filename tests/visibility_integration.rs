//! Visibility rule integration tests
//!
//! Walks rule condition paths across a template store loaded from a
//! document, the same graph a front end would gate its fields on.

use tagbind::template::document::TemplateDocument;
use tagbind::template::store::{TemplateEntry, TemplateStore};
use tagbind::visibility::path::resolve;
use tagbind::visibility::rule::{visible_fields, VisibilityRule};

const TEMPLATE_DOC: &str = r#"
catalog = ["Grab", "Throw", "Pull"]

[[entries]]
tag = "Grab"
use_custom_handler = true
handler_refs = ["grab_handler"]

[[entries]]
tag = "Throw"
use_custom_handler = false
handler_refs = []

[[entries]]
tag = "Pull"
use_custom_handler = true
handler_refs = ["pull_handler"]
"#;

fn load_store() -> TemplateStore {
    let document = TemplateDocument::from_toml_str(TEMPLATE_DOC).unwrap();
    let (_, store) = document.into_parts().unwrap();
    store
}

#[test]
fn test_paths_resolve_across_the_store_graph() {
    let store = load_store();

    assert_eq!(resolve(&store, "entries[0].use_custom_handler").as_bool(), Some(true));
    assert_eq!(resolve(&store, "entries[1].use_custom_handler").as_bool(), Some(false));
    assert_eq!(resolve(&store, "entries[2].use_custom_handler").as_bool(), Some(true));
}

#[test]
fn test_index_past_entry_count_is_unresolved_and_defaults_visible() {
    let store = load_store();

    assert!(!resolve(&store, "entries[5].use_custom_handler").is_resolved());

    let rule = VisibilityRule::when_true("entries[5].use_custom_handler");
    assert!(rule.evaluate(&store));
}

#[test]
fn test_rules_against_nested_conditions() {
    let store = load_store();

    let first_active = VisibilityRule::when_true("entries[0].use_custom_handler");
    assert!(first_active.evaluate(&store));

    let second_active = VisibilityRule::when_true("entries[1].use_custom_handler");
    assert!(!second_active.evaluate(&store));

    let second_inactive = VisibilityRule::new("entries[1].use_custom_handler", false);
    assert!(second_inactive.evaluate(&store));
}

#[test]
fn test_entry_field_specs_gate_the_handler_list() {
    let store = load_store();
    let specs = TemplateEntry::field_specs();

    let shown_for_custom = visible_fields(&specs, &store.entries()[0]);
    assert!(shown_for_custom.contains(&"handlers"));

    let shown_for_plain = visible_fields(&specs, &store.entries()[1]);
    assert!(!shown_for_plain.contains(&"handlers"));
    assert!(shown_for_plain.contains(&"tag"));
    assert!(shown_for_plain.contains(&"use_custom_handler"));
}

#[test]
fn test_unknown_member_anywhere_defaults_visible() {
    let store = load_store();

    for path in ["missing", "entries[0].missing", "entries.use_custom_handler"] {
        let rule = VisibilityRule::when_true(path);
        assert!(rule.evaluate(&store), "path '{}' should default visible", path);
    }
}
