// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Relay client against a local mock HTTP server.

use forms::{FormSubmission, RelayClient, THANKS_PATH, submit_form};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn submission() -> FormSubmission {
    FormSubmission {
        name: "鈴木一郎".into(),
        email: "ichiro@example.com".into(),
        phone: Some("090-1234-5678".into()),
        company: None,
        message: "リフォームの見積もりをお願いします。".into(),
        turnstile_token: None,
    }
}

/// A relay at `<server>/f` answering every POST to `/f/form123` with `response`.
async fn relay(response: ResponseTemplate) -> (MockServer, RelayClient) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/f/form123"))
        .respond_with(response)
        .mount(&server)
        .await;
    let client = RelayClient::with_base_url(&format!("{}/f", server.uri()), "form123").unwrap();
    (server, client)
}

#[tokio::test]
async fn test_relay_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/f/form123"))
        .and(header("accept", "application/json"))
        .and(body_partial_json(json!({
            "name": "鈴木一郎",
            "_replyto": "ichiro@example.com",
            "company": "",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;
    let client = RelayClient::with_base_url(&format!("{}/f", server.uri()), "form123").unwrap();

    let response = submit_form(&client, &submission()).await;
    assert!(response.success, "{response:?}");
    assert_eq!(
        response.message.as_deref(),
        Some("お問い合わせを受け付けました。担当者より折り返しご連絡いたします。")
    );
    assert_eq!(response.redirect.as_deref(), Some(THANKS_PATH));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["phone"], "090-1234-5678");
    assert_eq!(body["_subject"], "お問い合わせ: 鈴木一郎様より");
}

#[tokio::test]
async fn test_relay_success_requires_json_body() {
    let (_server, client) =
        relay(ResponseTemplate::new(200).set_body_string("<html>ok</html>")).await;

    let response = submit_form(&client, &submission()).await;
    assert!(!response.success);
    assert!(response.redirect.is_none());
    assert!(response.error.is_some());
}

#[tokio::test]
async fn test_relay_error_message_from_body() {
    let (_server, client) =
        relay(ResponseTemplate::new(422).set_body_json(json!({"error": "Invalid email"}))).await;

    let response = submit_form(&client, &submission()).await;
    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some("Invalid email"));
}

#[tokio::test]
async fn test_relay_error_status_fallback() {
    let (_server, client) = relay(ResponseTemplate::new(500).set_body_string("oops")).await;

    let response = submit_form(&client, &submission()).await;
    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some("送信エラー: 500 Internal Server Error"));
}

#[tokio::test]
async fn test_relay_unreachable() {
    // Bind then drop to get a port nobody listens on
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = RelayClient::with_base_url(&format!("http://127.0.0.1:{port}/f"), "x").unwrap();

    let response = submit_form(&client, &submission()).await;
    assert!(!response.success);
    assert!(response.error.is_some());
    assert!(response.redirect.is_none());
}
