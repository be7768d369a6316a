//! End-to-end synchronization over HTTP
//! Run with: cargo test --test sync_flow_test

use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;

use wuphf_client::{ChatSync, FetchPolicy, HttpChatService, Message, OperationStatus, Session};

fn session() -> Session {
    Session::new("u1", "secret-token")
}

fn sync_for(server: &MockServer) -> ChatSync<HttpChatService> {
    ChatSync::new(HttpChatService::new(server.base_url()))
        .with_policy(FetchPolicy::new(3, Duration::from_millis(10)))
}

#[tokio::test]
async fn test_list_then_messages_keeps_other_chats() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/history").query_param("userId", "u1");
            then.status(200).json_body(json!([
                {"chatId": "c1", "messages": []},
                {"chatId": "c2", "messages": []}
            ]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/history").query_param("chatId", "c1");
            then.status(200)
                .json_body(json!({"chatId": "c1", "messages": [{"sender": "u1", "msg": "hi"}]}));
        })
        .await;

    let sync = sync_for(&server);
    sync.load_chat_list(&session()).await;
    assert_eq!(sync.snapshot().chats.len(), 2);

    sync.load_chat_messages(&session(), "c1").await;

    let snapshot = sync.snapshot();
    let order: Vec<&str> = snapshot.chats.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(order, vec!["c1", "c2"]);
    assert_eq!(snapshot.chat("c1").unwrap().messages, vec![Message::new("u1", "hi")]);
    assert!(snapshot.chat("c2").unwrap().messages.is_empty());
    assert_eq!(snapshot.status, OperationStatus::Idle);
}

#[tokio::test]
async fn test_list_gives_up_after_three_not_found() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/history").query_param("userId", "u1");
            then.status(404);
        })
        .await;

    let sync = sync_for(&server);
    sync.load_chat_list(&session()).await;

    mock.assert_hits_async(3).await;
    let snapshot = sync.snapshot();
    assert!(snapshot.chats.is_empty());
    assert!(snapshot.error().unwrap().starts_with("Retries exhausted"));
}

#[tokio::test]
async fn test_list_permanent_failure_makes_one_call() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/history");
            then.status(401).body("Unauthorized");
        })
        .await;

    let sync = sync_for(&server);
    sync.load_chat_list(&session()).await;

    mock.assert_hits_async(1).await;
    assert_eq!(sync.snapshot().error(), Some("HTTP error: status 401, body: Unauthorized"));
}

#[tokio::test]
async fn test_send_then_echo() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/history").query_param("userId", "u1");
            then.status(200).json_body(json!([{"chatId": "c1", "messages": [{"sender": "u2", "msg": "ping"}]}]));
        })
        .await;
    let send = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/notification")
                .json_body(json!({"sender": "u1", "chat_id": "c1", "msg": "pong"}));
            then.status(200);
        })
        .await;

    let sync = sync_for(&server);
    sync.load_chat_list(&session()).await;
    sync.send_and_echo(&session(), "c1", "pong").await.expect("send should succeed");

    send.assert_async().await;
    assert_eq!(
        sync.snapshot().chat("c1").unwrap().messages,
        vec![Message::new("u2", "ping"), Message::new("u1", "pong")]
    );
}
