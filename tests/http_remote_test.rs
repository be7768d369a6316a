//! HTTP client tests against a mock chat service
//! Run with: cargo test --test http_remote_test

use httpmock::prelude::*;
use serde_json::json;

use wuphf_client::{Chat, ChatService, FetchError, HttpChatService, Message, Session};

fn session() -> Session {
    Session::new("u1", "secret-token")
}

#[tokio::test]
async fn test_chat_list_sends_user_and_credential() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/history")
                .query_param("userId", "u1")
                .header("Authorization", "secret-token");
            then.status(200).json_body(json!([
                {"chatId": "c1", "messages": []},
                {"chatId": "c2", "messages": [{"sender": "u2", "msg": "hey"}]}
            ]));
        })
        .await;

    let remote = HttpChatService::new(server.base_url());
    let chats = remote.fetch_chat_list(&session()).await.expect("chat list should load");

    mock.assert_async().await;
    assert_eq!(
        chats,
        vec![
            Chat::new("c1"),
            Chat::new("c2").with_messages(vec![Message::new("u2", "hey")]),
        ]
    );
}

#[tokio::test]
async fn test_not_found_maps_to_retryable_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/history");
            then.status(404);
        })
        .await;

    let remote = HttpChatService::new(server.base_url());
    let err = remote.fetch_chat_list(&session()).await.expect_err("404 expected");

    assert!(matches!(err, FetchError::NotFound(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_server_error_keeps_status_and_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/history").query_param("chatId", "c1");
            then.status(500).body("repository down");
        })
        .await;

    let remote = HttpChatService::new(server.base_url());
    let err = remote.fetch_chat_messages(&session(), "c1").await.expect_err("500 expected");

    assert_eq!(err, FetchError::Http { status: 500, body: "repository down".to_string() });
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_history_accepts_bare_message_array() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/history").query_param("chatId", "c1");
            then.status(200).json_body(json!([
                {"sender": "u1", "receiver": "u2", "msg": "hi", "reference": "{}"},
                {"sender": "u2", "receiver": "u1", "msg": "hello", "reference": "{}"}
            ]));
        })
        .await;

    let remote = HttpChatService::new(server.base_url());
    let messages = remote.fetch_chat_messages(&session(), "c1").await.unwrap();

    assert_eq!(messages, vec![Message::new("u1", "hi"), Message::new("u2", "hello")]);
}

#[tokio::test]
async fn test_history_accepts_chat_record() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/history").query_param("chatId", "c1");
            then.status(200)
                .json_body(json!({"chatId": "c1", "messages": [{"sender": "u1", "msg": "hi"}]}));
        })
        .await;

    let remote = HttpChatService::new(server.base_url());
    let messages = remote.fetch_chat_messages(&session(), "c1").await.unwrap();

    assert_eq!(messages, vec![Message::new("u1", "hi")]);
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/history");
            then.status(200).body("<html>gateway</html>");
        })
        .await;

    let remote = HttpChatService::new(server.base_url());
    let err = remote.fetch_chat_list(&session()).await.expect_err("parse error expected");

    assert!(matches!(err, FetchError::Parse(_)));
}

#[tokio::test]
async fn test_send_posts_notification() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/notification")
                .header("Authorization", "secret-token")
                .json_body(json!({"sender": "u1", "chat_id": "c1", "msg": "hello"}));
            then.status(200).body("Message produced successfully");
        })
        .await;

    let remote = HttpChatService::new(server.base_url());
    remote
        .send_message(&session(), "c1", &Message::new("u1", "hello"))
        .await
        .expect("send should succeed");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_unauthorized_send_is_http_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/notification");
            then.status(401).body("Unauthorized");
        })
        .await;

    let remote = HttpChatService::new(server.base_url());
    let err = remote
        .send_message(&session(), "c1", &Message::new("u1", "hello"))
        .await
        .expect_err("401 expected");

    assert!(matches!(err, FetchError::Http { status: 401, .. }));
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    // Nothing listens on the discard port
    let remote = HttpChatService::new("http://127.0.0.1:9");
    let err = remote.fetch_chat_list(&session()).await.expect_err("transport error expected");

    assert!(matches!(err, FetchError::Transport(_)));
}
