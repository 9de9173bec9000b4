//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Jxn.
//! The Jxn project belongs to the Dunimd project team.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use serde_json::{json, Value};

use jxn::{
    JxnApp, JxnCallableClass, JxnConfig, JxnError, JxnRequest, JxnResponse, JxnRouteOutcome,
    JxnRoutingState, JxnTarget,
};

struct Greeter;

impl JxnCallableClass for Greeter {
    fn methods(&self) -> Vec<String> {
        vec!["hello".to_string(), "secret".to_string(), "broken".to_string()]
    }

    fn call(&self, method: &str, args: &[Value]) -> anyhow::Result<Option<JxnResponse>> {
        match method {
            "hello" => {
                let name = args.first().and_then(Value::as_str).unwrap_or("world");
                let mut response = JxnResponse::new();
                response.assign("greeting", "innerHTML", format!("Hello {}", name));
                Ok(Some(response))
            }
            "broken" => anyhow::bail!("database unavailable"),
            _ => Ok(None),
        }
    }
}

struct Empty;

impl JxnCallableClass for Empty {
    fn methods(&self) -> Vec<String> {
        vec!["run".to_string()]
    }

    fn call(&self, _method: &str, _args: &[Value]) -> anyhow::Result<Option<JxnResponse>> {
        Ok(None)
    }
}

fn touch(path: &Path) {
    fs::write(path, "<?php\n").unwrap();
}

fn greeter_app(dir: &Path) -> JxnApp {
    touch(&dir.join("Greeter.php"));
    let app = JxnApp::new(JxnConfig::default()).unwrap();
    app.container()
        .set_class("App\\Greeter", || Arc::new(Greeter) as Arc<dyn JxnCallableClass>);
    app.register(
        "dir",
        &dir.to_string_lossy(),
        &json!({ "namespace": "App", "protected": ["secret"] }),
    )
    .unwrap();
    app
}

fn call(class: &str, method: &str) -> JxnRequest {
    JxnRequest::new()
        .with_body("jxncls", class)
        .with_body("jxnmthd", method)
        .with_body("jxnargs", r#"["Ada"]"#)
}

#[test]
fn test_directory_namespace_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = greeter_app(dir.path());

    let request = call("App.Greeter", "hello");
    assert!(app.can_process_request(&request));
    let outcome = app.process_request(&request).unwrap();
    assert_eq!(
        outcome,
        JxnRouteOutcome::Executed {
            plugin: "class".to_string(),
            target: JxnTarget::class("App.Greeter", "hello"),
        }
    );

    let output: Value = serde_json::from_str(&app.response().output()).unwrap();
    assert_eq!(output["jxnobj"][0]["data"], "Hello Ada");

    app.reset_request();
    assert!(app.response().is_empty());
    assert_eq!(app.routing_state(), &JxnRoutingState::Unclaimed);

    let stray = JxnRequest::new().with_body("jxncls", "NoSuchClass");
    assert!(!app.can_process_request(&stray));
    assert_eq!(app.process_request(&stray).unwrap(), JxnRouteOutcome::NotLibraryRequest);
}

#[test]
fn test_claimed_calls_with_missing_targets_fail() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = greeter_app(dir.path());

    for (class, method, expected) in [
        ("App.Nobody", "hello", "class is not registered"),
        ("App.Greeter", "secret", "method is not exported"),
        ("App.Greeter", "missing", "method is not exported"),
        ("App.Greeter", "broken", "database unavailable"),
    ] {
        app.reset_request();
        match app.process_request(&call(class, method)).unwrap_err() {
            JxnError::Request { target, message } => {
                assert_eq!(target, format!("{}::{}()", class, method));
                assert!(message.contains(expected), "{}", message);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(app.routing_state(), &JxnRoutingState::Rejected);
    }
}

#[test]
fn test_generated_script_for_directory_classes() {
    let dir = tempfile::tempdir().unwrap();
    let app = greeter_app(dir.path());

    let script = app.script().unwrap();
    assert!(script.starts_with("JaxonApp = {};\nJaxonApp.Greeter = {};\n"));
    assert!(script.contains(
        "JaxonApp.Greeter.hello = function() {\n    return jaxon.request({ jxncls: 'App.Greeter', jxnmthd: 'hello' }, { parameters: arguments });\n};\n"
    ));
    assert!(!script.contains(".secret"));
    assert_eq!(script.matches("JaxonApp = {};").count(), 1);
}

#[test]
fn test_nested_namespace_initializers_are_emitted_once() {
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("X.php"));
    touch(&dir.path().join("Y.php"));

    let app = JxnApp::new(JxnConfig::default()).unwrap();
    for class in ["a\\b\\c\\X", "a\\b\\c\\Y"] {
        app.container()
            .set_class(class, || Arc::new(Empty) as Arc<dyn JxnCallableClass>);
    }
    app.register("dir", &dir.path().to_string_lossy(), &json!("a.b.c"))
        .unwrap();

    let script = app.script().unwrap();
    let lines: Vec<&str> = script.lines().collect();
    assert_eq!(
        &lines[..5],
        &[
            "Jaxona = {};",
            "Jaxona.b = {};",
            "Jaxona.b.c = {};",
            "Jaxona.b.c.X = {};",
            "Jaxona.b.c.X.run = function() {",
        ]
    );
    for init in ["Jaxona = {};", "Jaxona.b = {};", "Jaxona.b.c = {};"] {
        assert_eq!(script.lines().filter(|l| *l == init).count(), 1);
    }
}

#[test]
fn test_underscore_separator_flattens_names() {
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("Greeter.php"));
    let mut app = JxnApp::new(JxnConfig::default()).unwrap();
    app.container()
        .set_class("App\\Greeter", || Arc::new(Greeter) as Arc<dyn JxnCallableClass>);
    app.register(
        "dir",
        &dir.path().to_string_lossy(),
        &json!({ "namespace": "App", "separator": "_" }),
    )
    .unwrap();

    let script = app.script().unwrap();
    assert!(script.starts_with("JaxonApp = {};\nJaxonApp_Greeter = {};\n"));
    assert!(app.process_request(&call("App_Greeter", "hello")).is_ok());
}

#[test]
fn test_hash_tracks_the_registration_set() {
    let one = tempfile::tempdir().unwrap();
    let two = tempfile::tempdir().unwrap();
    touch(&one.path().join("A.php"));
    touch(&two.path().join("B.php"));
    let one_path = one.path().to_string_lossy().into_owned();
    let two_path = two.path().to_string_lossy().into_owned();

    let forward = JxnApp::new(JxnConfig::default()).unwrap();
    forward.register("dir", &one_path, &json!("One")).unwrap();
    forward.register("dir", &two_path, &json!("Two")).unwrap();
    let backward = JxnApp::new(JxnConfig::default()).unwrap();
    backward.register("dir", &two_path, &json!("Two")).unwrap();
    backward.register("dir", &one_path, &json!("One")).unwrap();

    let hash = forward.hash().unwrap();
    assert_eq!(hash.len(), 32);
    assert_eq!(hash, forward.hash().unwrap());
    assert_eq!(hash, backward.hash().unwrap());

    forward.register("class", "Extra\\Tool", &Value::Null).unwrap();
    assert_ne!(hash, forward.hash().unwrap());
}

#[test]
fn test_hash_follows_class_files_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("A.php"));
    let app = JxnApp::new(JxnConfig::default()).unwrap();
    for class in ["App\\A", "App\\B"] {
        app.container()
            .set_class(class, || Arc::new(Empty) as Arc<dyn JxnCallableClass>);
    }
    app.register("dir", &dir.path().to_string_lossy(), &json!("App"))
        .unwrap();
    let before = app.hash().unwrap();

    touch(&dir.path().join("B.php"));
    let added = app.hash().unwrap();
    assert_ne!(before, added);
    assert!(app.script().unwrap().contains("JaxonApp.B = {};"));

    let past = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000_000);
    fs::File::options()
        .write(true)
        .open(dir.path().join("A.php"))
        .unwrap()
        .set_modified(past)
        .unwrap();
    assert_ne!(added, app.hash().unwrap());
}

#[test]
fn test_underscore_namespaces_get_initializers() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("Sub")).unwrap();
    touch(&dir.path().join("Sub").join("A.php"));
    let app = JxnApp::new(JxnConfig::default()).unwrap();
    app.container()
        .set_class("App\\Sub\\A", || Arc::new(Empty) as Arc<dyn JxnCallableClass>);
    app.register(
        "dir",
        &dir.path().to_string_lossy(),
        &json!({ "namespace": "App", "separator": "_" }),
    )
    .unwrap();

    let script = app.script().unwrap();
    assert!(script.starts_with("JaxonApp = {};\nJaxonApp.Sub = {};\nJaxonApp_Sub_A = {};\n"));
}

#[test]
fn test_export_writes_once_per_hash() {
    let dir = tempfile::tempdir().unwrap();
    let app = greeter_app(dir.path());
    let cache = tempfile::tempdir().unwrap();

    let path = app.export_script(cache.path()).unwrap();
    assert_eq!(
        path.file_name().unwrap().to_string_lossy(),
        format!("{}.js", app.hash().unwrap())
    );
    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written, app.script().unwrap());

    fs::write(&path, "cached").unwrap();
    assert_eq!(app.export_script(cache.path()).unwrap(), path);
    assert_eq!(fs::read_to_string(&path).unwrap(), "cached");
}

#[test]
fn test_export_fails_when_a_directory_disappears() {
    let dir = tempfile::tempdir().unwrap();
    let classes = dir.path().join("classes");
    fs::create_dir(&classes).unwrap();
    touch(&classes.join("A.php"));
    let app = JxnApp::new(JxnConfig::default()).unwrap();
    app.register("dir", &classes.to_string_lossy(), &json!("App"))
        .unwrap();
    fs::remove_dir_all(&classes).unwrap();

    let cache = tempfile::tempdir().unwrap();
    assert!(app.hash().is_err());
    assert!(app.export_script(cache.path()).is_err());
    assert_eq!(fs::read_dir(cache.path()).unwrap().count(), 0);
}

#[test]
fn test_invalid_registrations_fail_setup() {
    let app = JxnApp::new(JxnConfig::default()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing");

    assert!(app
        .register("dir", &missing.to_string_lossy(), &Value::Null)
        .unwrap_err()
        .is_setup());
    assert!(app
        .register("dir", &dir.path().to_string_lossy(), &json!(42))
        .unwrap_err()
        .is_setup());
    assert!(app
        .register("class", "Not A Class", &Value::Null)
        .unwrap_err()
        .is_setup());
    assert!(app
        .register("widget", "X", &Value::Null)
        .unwrap_err()
        .is_registration());
}
