//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Jxn.
//! The Jxn project belongs to the Dunimd project team.

use std::sync::{Arc, Mutex};

use serde_json::Value;

use jxn::{
    JxnCallContext, JxnCallableOptions, JxnContainer, JxnError, JxnEvent, JxnEventListener,
    JxnJsonArgumentDecoder, JxnPlugin, JxnPluginManager, JxnPluginRole, JxnRequest,
    JxnRequestPlugin, JxnRequestRouter, JxnResponse, JxnResponseManager, JxnRouteOutcome,
    JxnRoutingState, JxnTarget, Result,
};

#[derive(Clone, Copy)]
enum Behaviour {
    Succeed,
    FailSetup,
    FailRequest,
    Decline,
}

/// Claims every call carrying `jxnfun`, then behaves as told.
struct Stub {
    name: &'static str,
    behaviour: Behaviour,
}

impl Stub {
    fn new(name: &'static str, behaviour: Behaviour) -> Arc<Self> {
        Arc::new(Stub { name, behaviour })
    }
}

impl JxnPlugin for Stub {
    fn roles(self: Arc<Self>) -> Vec<JxnPluginRole> {
        vec![JxnPluginRole::Request(self)]
    }
}

impl JxnRequestPlugin for Stub {
    fn name(&self) -> &str {
        self.name
    }

    fn check_options(&self, identifier: &str, options: &Value) -> Result<JxnCallableOptions> {
        JxnCallableOptions::from_value(identifier, options)
    }

    fn register(&self, _kind: &str, _identifier: &str, _options: JxnCallableOptions) -> Result<bool> {
        Ok(true)
    }

    fn target(&self, request: &JxnRequest) -> Option<JxnTarget> {
        request.param("jxnfun").map(JxnTarget::function)
    }

    fn process_request(&self, request: &JxnRequest, context: &mut JxnCallContext<'_>) -> Result<bool> {
        match self.behaviour {
            Behaviour::Succeed => {
                let args = context.arguments(request)?;
                let mut response = JxnResponse::new();
                response.assign("owner", "innerHTML", self.name);
                response.assign("argc", "innerHTML", args.len());
                context.append(response);
                Ok(true)
            }
            Behaviour::FailSetup => Err(JxnError::setup("lookup vanished")),
            Behaviour::FailRequest => Err(JxnError::request("f()", "missing")),
            Behaviour::Decline => Ok(false),
        }
    }
}

#[derive(Default)]
struct Recorder {
    seen: Mutex<Vec<JxnEvent>>,
}

impl JxnPlugin for Recorder {
    fn roles(self: Arc<Self>) -> Vec<JxnPluginRole> {
        vec![JxnPluginRole::Listener(self)]
    }
}

impl JxnEventListener for Recorder {
    fn on_event(&self, event: &JxnEvent) {
        self.seen.lock().unwrap().push(event.clone());
    }
}

fn manager_with(plugins: Vec<(Arc<Stub>, i64)>) -> JxnPluginManager {
    let mut manager = JxnPluginManager::new(Arc::new(JxnContainer::new()));
    for (plugin, priority) in plugins {
        manager.register_plugin(plugin, priority).unwrap();
    }
    manager
}

fn call() -> JxnRequest {
    JxnRequest::new()
        .with_body("jxnfun", "f")
        .with_body("jxnargs", "[1, 2]")
}

fn route(manager: &JxnPluginManager, request: &JxnRequest) -> (JxnRequestRouter, JxnResponseManager, Result<JxnRouteOutcome>) {
    let mut router = JxnRequestRouter::new();
    let mut response = JxnResponseManager::new();
    let outcome = router.route(manager, request, &JxnJsonArgumentDecoder, &mut response);
    (router, response, outcome)
}

#[test]
fn test_lowest_priority_wins_regardless_of_registration_order() {
    for order in [[("x", 101), ("y", 103)], [("y", 103), ("x", 101)]] {
        let manager = manager_with(
            order
                .iter()
                .map(|(name, p)| (Stub::new(*name, Behaviour::Succeed), *p))
                .collect(),
        );
        let (router, response, outcome) = route(&manager, &call());

        assert_eq!(
            outcome.unwrap(),
            JxnRouteOutcome::Executed {
                plugin: "x".to_string(),
                target: JxnTarget::function("f"),
            }
        );
        assert!(matches!(router.state(), JxnRoutingState::Executed { plugin, .. } if plugin == "x"));
        assert_eq!(response.commands()[0].args["data"], "x");
        assert_eq!(response.commands()[1].args["data"], 2);
    }
}

#[test]
fn test_unclaimed_call_is_not_a_library_request() {
    let manager = manager_with(vec![(Stub::new("x", Behaviour::Succeed), 101)]);
    let request = JxnRequest::new().with_query("page", "home");
    let (router, response, outcome) = route(&manager, &request);

    assert_eq!(outcome.unwrap(), JxnRouteOutcome::NotLibraryRequest);
    assert_eq!(router.state(), &JxnRoutingState::Rejected);
    assert!(response.is_empty());
}

#[test]
fn test_internal_errors_are_remapped_to_request_errors() {
    let manager = manager_with(vec![(Stub::new("x", Behaviour::FailSetup), 101)]);
    let (router, _, outcome) = route(&manager, &call());

    match outcome.unwrap_err() {
        JxnError::Request { target, message } => {
            assert_eq!(target, "f()");
            assert!(message.contains("lookup vanished"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(router.state(), &JxnRoutingState::Rejected);
}

#[test]
fn test_request_errors_pass_through_unchanged() {
    let manager = manager_with(vec![(Stub::new("x", Behaviour::FailRequest), 101)]);
    let (_, _, outcome) = route(&manager, &call());
    assert!(matches!(
        outcome.unwrap_err(),
        JxnError::Request { ref message, .. } if message == "missing"
    ));
}

#[test]
fn test_declined_claim_is_a_request_error() {
    let manager = manager_with(vec![(Stub::new("x", Behaviour::Decline), 101)]);
    let (_, _, outcome) = route(&manager, &call());
    assert!(outcome.unwrap_err().is_request());
}

#[test]
fn test_malformed_arguments_fail_the_call() {
    let manager = manager_with(vec![(Stub::new("x", Behaviour::Succeed), 101)]);
    let request = JxnRequest::new().with_body("jxnfun", "f").with_body("jxnargs", "{");
    let (_, response, outcome) = route(&manager, &request);
    assert!(outcome.unwrap_err().is_request());
    assert!(response.is_empty());
}

#[test]
fn test_router_must_be_reset_between_calls() {
    let manager = manager_with(vec![(Stub::new("x", Behaviour::Succeed), 101)]);
    let mut router = JxnRequestRouter::new();
    let mut response = JxnResponseManager::new();

    router
        .route(&manager, &call(), &JxnJsonArgumentDecoder, &mut response)
        .unwrap();
    let again = router.route(&manager, &call(), &JxnJsonArgumentDecoder, &mut response);
    assert!(again.unwrap_err().is_request());

    router.reset();
    response.clear();
    assert_eq!(router.state(), &JxnRoutingState::Unclaimed);
    assert!(matches!(
        router.route(&manager, &call(), &JxnJsonArgumentDecoder, &mut response),
        Ok(JxnRouteOutcome::Executed { .. })
    ));
    assert_eq!(response.commands().len(), 2);
}

#[test]
fn test_listeners_see_the_call_lifecycle() {
    let mut manager = manager_with(vec![
        (Stub::new("ok", Behaviour::Succeed), 101),
    ]);
    let recorder = Arc::new(Recorder::default());
    manager.register_plugin(recorder.clone(), 9000).unwrap();

    let (_, _, outcome) = route(&manager, &call());
    outcome.unwrap();

    let seen = recorder.seen.lock().unwrap();
    assert_eq!(
        *seen,
        vec![
            JxnEvent::BeforeRequest {
                plugin: "ok".to_string(),
                target: JxnTarget::function("f"),
            },
            JxnEvent::AfterRequest {
                plugin: "ok".to_string(),
                target: JxnTarget::function("f"),
            },
        ]
    );
}

#[test]
fn test_failures_are_reported_to_listeners() {
    let mut manager = manager_with(vec![(Stub::new("bad", Behaviour::FailRequest), 101)]);
    let recorder = Arc::new(Recorder::default());
    manager.register_plugin(recorder.clone(), 9000).unwrap();

    let (_, _, outcome) = route(&manager, &call());
    assert!(outcome.is_err());

    let seen = recorder.seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert!(matches!(&seen[1], JxnEvent::RequestFailed { plugin, .. } if plugin == "bad"));
}
