// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, anyhow};
use reeply_api::Client;
use reeply_app::MessageKind;
use std::thread;
use std::time::Duration;
use tiny_http::{Header, Response, Server};
use time::macros::datetime;

fn json_response(body: &str, status: u16) -> Response<std::io::Cursor<Vec<u8>>> {
    Response::from_string(body).with_status_code(status).with_header(
        Header::from_bytes("Content-Type", "application/json").expect("valid content type header"),
    )
}

#[test]
fn fetch_error_contains_actionable_remediation() {
    let client = Client::new("http://127.0.0.1:1", Duration::from_millis(50))
        .expect("client should initialize");

    let error = client
        .fetch_threads(0, 50)
        .expect_err("fetch should fail for unreachable endpoint");
    assert!(error.to_string().contains("threads server"));
}

#[test]
fn fetch_threads_sends_offset_and_limit() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let addr = format!("http://{}", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        assert_eq!(request.url(), "/api/threads?offset=100&limit=50");
        let body = r#"[
            {
                "address": "+15550001111",
                "messages": [
                    {"date": "2025-02-21T09:00:00", "type": 1},
                    {"date": "2025-02-22 08:30:00", "type": 2}
                ],
                "first_message": "2025-02-21T09:00:00",
                "last_message": "2025-02-22 08:30:00"
            }
        ]"#;
        request
            .respond(json_response(body, 200))
            .expect("response should succeed");
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    let threads = client.fetch_threads(100, 50)?;

    assert_eq!(threads.len(), 1);
    assert_eq!(threads[0].address, "+15550001111");
    assert_eq!(threads[0].messages.len(), 2);
    assert_eq!(threads[0].messages[0].kind, MessageKind::Received);
    assert_eq!(threads[0].first_message, datetime!(2025-02-21 09:00:00));

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn ping_requests_a_single_thread() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let addr = format!("http://{}", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        assert_eq!(request.url(), "/api/threads?offset=0&limit=1");
        request
            .respond(json_response("[]", 200))
            .expect("response should succeed");
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    client.ping()?;

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn server_error_body_surfaces_in_the_message() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let addr = format!("http://{}", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        request
            .respond(json_response(r#"{"error": "offset must be non-negative"}"#, 400))
            .expect("response should succeed");
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    let error = client
        .fetch_threads(0, 50)
        .expect_err("400 should surface as an error");
    let message = error.to_string();
    assert!(message.contains("400"));
    assert!(message.contains("offset must be non-negative"));

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn malformed_timestamp_fails_the_whole_page() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let addr = format!("http://{}", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        let body = r#"[
            {
                "address": "+15550002222",
                "messages": [{"date": "February 21st", "type": 1}],
                "first_message": "2025-02-21T09:00:00",
                "last_message": "2025-02-21T09:00:00"
            }
        ]"#;
        request
            .respond(json_response(body, 200))
            .expect("response should succeed");
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    let error = client
        .fetch_threads(0, 50)
        .expect_err("bad timestamp should fail the page");
    let chain = format!("{error:#}");
    assert!(chain.contains("February 21st"));
    assert!(chain.contains("+15550002222"));

    handle.join().expect("server thread should join");
    Ok(())
}
