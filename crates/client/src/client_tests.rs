// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use super::*;
use crate::error::TransportError;
use crate::report::ReportKind;
use crate::transport::tests::{ok, status, wait_until, MockTransport, Recorded};
use bfpu_core::{ActionSet, RunState};
use std::time::Duration;
use tokio::sync::broadcast::error::TryRecvError;

fn client() -> (MockTransport, RunClient<MockTransport>) {
    let transport = MockTransport::new();
    let client = RunClient::with_transport(ClientConfig::default(), transport.clone());
    (transport, client)
}

fn connected() -> (MockTransport, RunClient<MockTransport>) {
    let (transport, client) = client();
    client.connect().unwrap();
    (transport, client)
}

fn record<R: Resource>(client: &RunClient<MockTransport>) -> Arc<Mutex<Vec<R::Value>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    client.subscribe::<R>(move |value| sink.lock().unwrap().push(value.clone()));
    seen
}

async fn push_state(transport: &MockTransport, client: &RunClient<MockTransport>, json: &str) {
    let before = client.inner.shared.mirrors.get::<State>().updates();
    let seen = *before.borrow();
    transport.push("/api/sse/state", json);
    wait_until(|| *before.borrow() > seen).await;
}

fn post(path: &str, body: Option<&str>) -> Recorded {
    Recorded {
        method: Method::Post,
        path: path.to_string(),
        body: body.map(str::to_string),
    }
}

async fn next_report(errors: &mut broadcast::Receiver<Report>) -> Report {
    tokio::time::timeout(Duration::from_secs(2), errors.recv())
        .await
        .expect("no report")
        .unwrap()
}

// -- lifecycle --

#[test]
fn connect_outside_a_runtime_fails() {
    let (transport, client) = client();
    assert!(matches!(client.connect(), Err(ClientError::NoRuntime(_))));
    assert!(!client.is_connected());
    assert!(transport.opened_channels().is_empty());
}

#[tokio::test]
async fn nothing_happens_before_connect() {
    let (transport, client) = client();
    tokio::task::yield_now().await;
    assert!(transport.requests().is_empty());
    assert!(transport.opened_channels().is_empty());
    assert!(!client.is_connected());
}

#[tokio::test]
async fn connect_fetches_and_opens_every_channel_once() {
    let (transport, client) = connected();
    client.connect().unwrap();

    assert_eq!(
        transport.opened_channels(),
        vec![
            "/api/sse/code",
            "/api/sse/input",
            "/api/sse/output",
            "/api/sse/state",
            "/api/sse/speed",
        ]
    );
    wait_until(|| transport.requests().len() == 5).await;
    let mut fetched: Vec<String> = transport.requests().into_iter().map(|r| r.path).collect();
    fetched.sort();
    assert_eq!(
        fetched,
        vec![
            "/api/run/code",
            "/api/run/input",
            "/api/run/output",
            "/api/run/speed",
            "/api/run/state",
        ]
    );
}

#[tokio::test]
async fn shutdown_closes_channels_and_keeps_values() {
    let (transport, client) = client();
    transport.respond(Method::Get, "/api/run/output", ok("Hello"));
    client.connect().unwrap();
    wait_until(|| client.output().is_some()).await;

    client.shutdown();
    assert!(!client.is_connected());
    for kind in ResourceKind::ALL {
        let path = kind.channel_path();
        wait_until(|| transport.channel_closed(&path)).await;
    }
    assert_eq!(client.output().as_deref(), Some("Hello"));
}

#[tokio::test]
async fn dropping_the_last_handle_closes_channels() {
    let (transport, client) = connected();
    let other = client.clone();
    drop(client);
    assert!(!transport.channel_closed("/api/sse/code"));

    drop(other);
    wait_until(|| transport.channel_closed("/api/sse/code")).await;
}

// -- reconciliation --

#[tokio::test]
async fn push_during_fetch_is_never_rolled_back() {
    let (transport, client) = client();
    let fetch = transport.defer(Method::Get, "/api/run/input");
    let seen = record::<Input>(&client);
    client.connect().unwrap();

    transport.push("/api/sse/input", "\"ABC\"");
    wait_until(|| client.input().is_some()).await;

    fetch.send(ok("AB")).unwrap();
    wait_until(|| transport.resolved() == 1).await;

    assert_eq!(client.input().as_deref(), Some("ABC"));
    assert_eq!(*seen.lock().unwrap(), vec!["ABC"]);
}

#[tokio::test]
async fn fetch_applies_then_push_replaces() {
    let (transport, client) = client();
    transport.respond(Method::Get, "/api/run/code", ok(",[.,]"));
    let seen = record::<Code>(&client);
    client.connect().unwrap();

    wait_until(|| client.program().is_some()).await;
    assert_eq!(client.program().as_deref(), Some(",[.,]"));

    transport.push("/api/sse/code", "\"+.\"");
    wait_until(|| client.program().as_deref() == Some("+.")).await;
    assert_eq!(*seen.lock().unwrap(), vec![",[.,]", "+."]);
}

#[tokio::test]
async fn pushes_are_applied_in_arrival_order() {
    let (transport, client) = client();
    let seen = record::<Output>(&client);
    client.connect().unwrap();

    for text in ["\"H\"", "\"He\"", "\"Hel\""] {
        transport.push("/api/sse/output", text);
    }
    wait_until(|| seen.lock().unwrap().len() == 3).await;
    assert_eq!(*seen.lock().unwrap(), vec!["H", "He", "Hel"]);
    assert_eq!(client.output().as_deref(), Some("Hel"));
}

#[tokio::test]
async fn speed_is_mirrored_as_integer() {
    let (transport, client) = client();
    transport.respond(Method::Get, "/api/run/speed", ok("100"));
    client.connect().unwrap();
    assert_eq!(client.wait::<Speed>().await.map(|s| s.get()), Some(100));

    transport.push("/api/sse/speed", "25");
    wait_until(|| client.speed().map(|s| s.get()) == Some(25)).await;
}

#[tokio::test]
async fn malformed_state_push_keeps_previous_value() {
    let (transport, client) = connected();
    let mut errors = client.errors();
    push_state(&transport, &client, r#"{"control_state":"idle"}"#).await;

    transport.push("/api/sse/state", "{not json");
    let report = next_report(&mut errors).await;

    assert_eq!(report.resource, Some(ResourceKind::State));
    assert_eq!(report.kind, ReportKind::Decode);
    assert!(matches!(errors.try_recv(), Err(TryRecvError::Empty)));
    assert_eq!(client.state().unwrap().control_state, ControlState::Idle);
}

#[tokio::test]
async fn failed_fetch_is_reported_and_leaves_resource_loading() {
    let (transport, client) = client();
    let mut errors = client.errors();
    transport.respond(
        Method::Get,
        "/api/run/state",
        status(500, "Internal Server Error", ""),
    );
    client.connect().unwrap();

    let report = next_report(&mut errors).await;
    assert_eq!(report.resource, Some(ResourceKind::State));
    assert_eq!(report.kind, ReportKind::Transport);
    assert_eq!(report.message, "500: Internal Server Error");
    assert!(client.state().is_none());
}

#[tokio::test]
async fn channel_drop_is_reported() {
    let (transport, client) = connected();
    let mut errors = client.errors();
    transport.drop_connection("/api/sse/output", "connection reset");

    let report = next_report(&mut errors).await;
    assert_eq!(report.resource, Some(ResourceKind::Output));
    assert_eq!(report.kind, ReportKind::Channel);
}

// -- subscriptions --

#[tokio::test]
async fn unsubscribed_listener_sees_nothing_more() {
    let (transport, client) = connected();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let handle = client.subscribe::<Output>(move |value| sink.lock().unwrap().push(value.clone()));

    transport.push("/api/sse/output", "\"a\"");
    wait_until(|| seen.lock().unwrap().len() == 1).await;

    assert!(client.unsubscribe(handle));
    assert!(!client.unsubscribe(handle));

    transport.push("/api/sse/output", "\"ab\"");
    wait_until(|| client.output().as_deref() == Some("ab")).await;
    assert_eq!(*seen.lock().unwrap(), vec!["a"]);
}

// -- writes --

#[tokio::test]
async fn set_program_round_trips_through_push() {
    let (transport, client) = connected();
    client.set_program(",[.,]").await.unwrap();

    assert_eq!(
        transport.writes(),
        vec![Recorded {
            method: Method::Put,
            path: "/api/run/code".to_string(),
            body: Some(",[.,]".to_string()),
        }]
    );
    assert_eq!(client.program(), None);

    transport.push("/api/sse/code", "\",[.,]\"");
    wait_until(|| client.program().as_deref() == Some(",[.,]")).await;
}

#[tokio::test]
async fn server_rejection_is_returned_to_caller() {
    let (transport, client) = connected();
    transport.respond(
        Method::Put,
        "/api/run/code",
        status(
            422,
            "Unprocessable Entity",
            "cannot change code while interpreter is running",
        ),
    );

    let err = client.set_program("+").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "422: Unprocessable Entity (cannot change code while interpreter is running)"
    );
}

#[tokio::test]
async fn failed_write_is_returned_and_reported() {
    let (transport, client) = connected();
    let mut errors = client.errors();
    transport.respond(
        Method::Put,
        "/api/run/code",
        status(422, "Unprocessable Entity", "cannot change code while interpreter is running"),
    );

    let err = client.set_program("+").await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(TransportError::Status { status: 422, .. })));

    let report = next_report(&mut errors).await;
    assert_eq!(report.resource, Some(ResourceKind::Code));
    assert_eq!(report.kind, ReportKind::Transport);
    assert_eq!(report.message, err.to_string());
    assert!(matches!(errors.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn successful_write_reports_nothing() {
    let (_transport, client) = connected();
    let mut errors = client.errors();
    client.set_input("AB").await.unwrap();
    assert!(matches!(errors.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn input_and_speed_writes() {
    let (transport, client) = connected();
    client.set_input("AB").await.unwrap();
    client.clear_input().await.unwrap();
    client
        .set_speed(SpeedValue::new(42).unwrap())
        .await
        .unwrap();

    let bodies: Vec<(String, Option<String>)> = transport
        .writes()
        .into_iter()
        .map(|r| (r.path, r.body))
        .collect();
    assert_eq!(
        bodies,
        vec![
            ("/api/run/input".to_string(), Some("AB".to_string())),
            ("/api/run/input".to_string(), Some(String::new())),
            ("/api/run/speed".to_string(), Some("42".to_string())),
        ]
    );
}

// -- control --

#[tokio::test]
async fn actions_before_state_are_not_initialized() {
    let (transport, client) = connected();
    assert!(client.control_view().is_none());
    assert!(matches!(
        client.control_action(ControlAction::Play).await,
        Err(ClientError::NotInitialized(ResourceKind::State))
    ));
    assert!(matches!(
        client.toggle_control().await,
        Err(ClientError::NotInitialized(ResourceKind::State))
    ));
    assert!(transport.writes().is_empty());
}

#[tokio::test]
async fn play_then_running_enables_pause() {
    let (transport, client) = connected();
    push_state(&transport, &client, r#"{"control_state":"idle"}"#).await;
    assert!(client
        .control_view()
        .unwrap()
        .legal
        .contains(ControlAction::Play));

    client.control_action(ControlAction::Play).await.unwrap();
    assert_eq!(transport.writes(), vec![post("/api/ctrl/start", None)]);
    // no optimistic transition
    assert_eq!(
        client.control_view().unwrap().control_state,
        ControlState::Idle
    );

    push_state(
        &transport,
        &client,
        r#"{"control_state":"running","run_state":"default","tape":[0],"head":0,
            "code":{"pc":0,"offset":0,"fragment":"+"},"ic":0,"stack":[],"cycles":1}"#,
    )
    .await;
    let view = client.control_view().unwrap();
    assert_eq!(view.control_state, ControlState::Running);
    assert_eq!(view.run_state, Some(RunState::Default));
    assert!(view.legal.contains(ControlAction::Pause));
    assert!(!view.legal.contains(ControlAction::Play));

    let err = client.control_action(ControlAction::Play).await.unwrap_err();
    assert!(matches!(err, ClientError::IllegalAction { .. }));
    assert_eq!(transport.writes().len(), 1);
}

#[tokio::test]
async fn uncontrolled_rejects_everything_until_control_is_taken() {
    let (transport, client) = connected();
    push_state(&transport, &client, r#"{"control_state":"paused"}"#).await;
    push_state(&transport, &client, r#"{"control_state":"uncontrolled"}"#).await;

    assert_eq!(client.control_view().unwrap().legal, ActionSet::empty());
    for action in ControlAction::ALL {
        assert!(matches!(
            client.control_action(action).await,
            Err(ClientError::IllegalAction { .. })
        ));
    }
    assert!(transport.writes().is_empty());

    client.toggle_control().await.unwrap();
    assert_eq!(
        transport.writes(),
        vec![Recorded {
            method: Method::Put,
            path: "/api/ctrl".to_string(),
            body: None,
        }]
    );

    push_state(&transport, &client, r#"{"control_state":"paused"}"#).await;
    let view = client.control_view().unwrap();
    assert_eq!(Some(view.control_state), view.last_controlled);
    assert!(view.legal.contains(ControlAction::Play));
}

#[tokio::test]
async fn toggle_releases_control_when_controlled() {
    let (transport, client) = connected();
    push_state(&transport, &client, r#"{"control_state":"idle"}"#).await;
    client.toggle_control().await.unwrap();
    assert_eq!(transport.writes()[0].method, Method::Delete);
}

#[tokio::test]
async fn rejected_control_request_is_reported() {
    let (transport, client) = connected();
    push_state(&transport, &client, r#"{"control_state":"idle"}"#).await;
    let mut errors = client.errors();
    transport.respond(
        Method::Post,
        "/api/ctrl/start",
        status(400, "Bad Request", "control is currently not enabled"),
    );

    assert!(client.control_action(ControlAction::Play).await.is_err());
    let report = next_report(&mut errors).await;
    assert_eq!(report.resource, None);
    assert_eq!(report.kind, ReportKind::Transport);
    assert!(report.message.starts_with("POST /api/ctrl/start: 400"));
}

#[tokio::test]
async fn illegal_action_sends_and_reports_nothing() {
    let (transport, client) = connected();
    push_state(&transport, &client, r#"{"control_state":"running"}"#).await;
    let mut errors = client.errors();

    assert!(matches!(
        client.control_action(ControlAction::Play).await,
        Err(ClientError::IllegalAction { .. })
    ));
    assert!(transport.writes().is_empty());
    assert!(matches!(errors.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn step_sends_optional_count() {
    let (transport, client) = connected();
    push_state(&transport, &client, r#"{"control_state":"paused"}"#).await;
    client.step(None).await.unwrap();
    client.step(Some(5)).await.unwrap();
    assert_eq!(
        transport.writes(),
        vec![
            post("/api/ctrl/step", None),
            post("/api/ctrl/step", Some("5")),
        ]
    );
}

#[tokio::test]
async fn pending_flag_is_raised_for_the_request() {
    let (transport, client) = connected();
    push_state(&transport, &client, r#"{"control_state":"idle"}"#).await;
    let release = transport.defer(Method::Post, "/api/ctrl/reset");

    let task = {
        let client = client.clone();
        tokio::spawn(async move { client.control_action(ControlAction::Reset).await })
    };
    wait_until(|| {
        client
            .control_view()
            .is_some_and(|view| view.pending.contains(ControlAction::Reset))
    })
    .await;
    assert!(!client.control_view().unwrap().can_submit(ControlAction::Reset));

    release
        .send(status(400, "Bad Request", "interpreter is still starting"))
        .unwrap();
    assert!(task.await.unwrap().is_err());
    assert!(client.control_view().unwrap().pending.is_empty());
}

#[tokio::test]
async fn toggle_pending_is_raised_for_the_request() {
    let (transport, client) = connected();
    let release = transport.defer(Method::Put, "/api/ctrl");

    let task = {
        let client = client.clone();
        tokio::spawn(async move { client.set_control(true).await })
    };
    push_state(&transport, &client, r#"{"control_state":"uncontrolled"}"#).await;
    wait_until(|| client.control_view().is_some_and(|view| view.toggle_pending)).await;

    release.send(ok("")).unwrap();
    task.await.unwrap().unwrap();
    assert!(!client.control_view().unwrap().toggle_pending);
}

// -- presets --

#[tokio::test]
async fn failed_catalog_fetch_is_reported() {
    let (transport, client) = connected();
    let mut errors = client.errors();
    transport.respond(Method::Get, "/api/examples", status(503, "Service Unavailable", ""));

    assert!(client.examples().await.is_err());
    let report = next_report(&mut errors).await;
    assert_eq!(report.resource, None);
    assert_eq!(report.message, "GET /api/examples: 503: Service Unavailable");
}

#[tokio::test]
async fn presets_highlight_matching_program() {
    let (transport, client) = connected();
    transport.respond(
        Method::Get,
        "/api/examples",
        ok(r#"[{"name":"Hello","desc":"","code":"+."},{"name":"Cat","desc":"","code":",[.,]"}]"#),
    );
    assert!(client.matching_examples().is_empty());

    let examples = client.examples().await.unwrap();
    assert_eq!(examples.len(), 2);

    transport.push("/api/sse/code", "\",[.,]\"");
    wait_until(|| client.program().is_some()).await;
    assert_eq!(client.matching_examples(), vec![1]);
}
