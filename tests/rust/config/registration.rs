//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Jxn.
//! The Jxn project belongs to the Dunimd project team.

use std::fs;
use std::sync::Arc;

use serde_json::{json, Value};

use jxn::{JxnApp, JxnCallableClass, JxnConfig, JxnError, JxnResponse};

struct Noop;

impl JxnCallableClass for Noop {
    fn methods(&self) -> Vec<String> {
        vec!["run".to_string()]
    }

    fn call(&self, _method: &str, _args: &[Value]) -> anyhow::Result<Option<JxnResponse>> {
        Ok(None)
    }
}

fn config(value: Value) -> JxnConfig {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_directory_entry_becomes_a_namespace_root() {
    let dir = tempfile::tempdir().unwrap();
    let app = JxnApp::from_config(config(json!({
        "classes": [
            { "directory": dir.path().to_string_lossy(), "namespace": "App", "separator": "." }
        ]
    })))
    .unwrap();

    let registry = app.classes().read().unwrap();
    let roots: Vec<_> = registry.roots().collect();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].namespace, "App");
    assert_eq!(roots[0].separator, ".");
    assert_eq!(roots[0].options.separator.as_deref(), Some("."));
    assert_eq!(roots[0].directory, dir.path().canonicalize().unwrap());
    assert_eq!(registry.directories().count(), 0);
}

#[test]
fn test_sibling_fields_override_nested_options() {
    let dir = tempfile::tempdir().unwrap();
    let app = JxnApp::from_config(config(json!({
        "classes": [{
            "directory": dir.path().to_string_lossy(),
            "options": { "namespace": "Old", "autoload": true, "protected": ["internal"] },
            "namespace": "New",
            "autoload": false
        }]
    })))
    .unwrap();

    let registry = app.classes().read().unwrap();
    let root = registry.roots().next().unwrap();
    assert_eq!(root.namespace, "New");
    assert!(!root.autoload);
    assert_eq!(root.options.protected, vec!["internal".to_string()]);
}

#[test]
fn test_directory_without_namespace_is_bare() {
    let dir = tempfile::tempdir().unwrap();
    let app = JxnApp::from_config(config(json!({
        "classes": [{ "directory": format!("{}/", dir.path().display()) }]
    })))
    .unwrap();

    let registry = app.classes().read().unwrap();
    assert_eq!(registry.roots().count(), 0);
    let (path, _) = registry.directories().next().unwrap();
    assert_eq!(path, &dir.path().canonicalize().unwrap());
}

#[test]
fn test_function_and_class_entry_shapes() {
    let app = JxnApp::from_config(config(json!({
        "functions": {
            "ping": [],
            "pong": { "alias": "pong_alias" },
            "included": "/srv/included.php"
        },
        "classes": ["Tools\\Clock", { "ignored": "shape" }]
    })))
    .unwrap();
    app.container()
        .set_class("Tools\\Clock", || Arc::new(Noop) as Arc<dyn JxnCallableClass>);

    let script = app.script().unwrap();
    assert!(script.contains("jaxon_ping = function()"));
    assert!(script.contains("jaxon_pong_alias = function()"));
    assert!(script.contains("jaxon_included = function()"));
    assert!(script.contains("JaxonTools.Clock.run = function()"));
}

#[test]
fn test_function_list_entries_are_bare_names() {
    let app = JxnApp::from_config(config(json!({ "functions": ["alpha", "beta", 3] }))).unwrap();
    let script = app.script().unwrap();
    assert!(script.contains("jaxon_alpha = function()"));
    assert!(script.contains("jaxon_beta = function()"));
}

#[test]
fn test_strict_mode_rejects_malformed_entries() {
    for bad in [
        json!({ "functions": ["alpha", 3] }),
        json!({ "functions": { "alpha": 3 } }),
        json!({ "classes": [{ "namespace": "App" }] }),
        json!({ "classes": [{ "directory": 7 }] }),
        json!({ "classes": "App" }),
    ] {
        let mut value = bad.clone();
        value["core"] = json!({ "registration": "strict" });
        let err = JxnApp::from_config(config(value)).err().unwrap();
        assert!(matches!(err, JxnError::Setup { .. }), "{} -> {:?}", bad, err);

        assert!(JxnApp::from_config(config(bad)).is_ok());
    }
}

#[test]
fn test_bad_identifiers_fail_even_in_lenient_mode() {
    let err = JxnApp::from_config(config(json!({ "functions": ["not valid"] })))
        .err()
        .unwrap();
    assert!(err.is_setup());
}

#[test]
fn test_configuration_files() {
    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("jaxon.json");
    fs::write(
        &json_path,
        r#"{"core": {"prefix": {"class": "Jxn"}}, "functions": ["alpha"]}"#,
    )
    .unwrap();
    let loaded = JxnConfig::from_path(&json_path).unwrap();
    assert_eq!(loaded.core.prefix.class, "Jxn");

    let yaml_path = dir.path().join("jaxon.yaml");
    fs::write(
        &yaml_path,
        "core:\n  registration: strict\nfunctions:\n  - alpha\n  - beta\n",
    )
    .unwrap();
    let loaded = JxnConfig::from_path(&yaml_path).unwrap();
    assert!(loaded.is_strict());
    let app = JxnApp::from_config(loaded).unwrap();
    assert!(app.script().unwrap().contains("jaxon_beta = function()"));
}

#[test]
fn test_map_keyed_functions_register_in_strict_mode() {
    let app = JxnApp::from_config(config(json!({
        "core": { "prefix": { "function": "jxn_" }, "registration": "strict" },
        "functions": {
            "my_first_function": {},
            "my_second_function": { "alias": "second" }
        }
    })))
    .unwrap();

    let script = app.script().unwrap();
    assert!(script.contains("jxn_my_first_function = function()"));
    assert!(script.contains("jxn_second = function()"));
    assert!(!script.contains("jxn_my_second_function"));
}
