//! HTTP-level tests for `ResourceClient` over the real reqwest transport.
//!
//! Uses [`wiremock`] to stand up a local server that emulates the BFF, so the
//! full request/response path (URL resolution, headers, status handling,
//! decoding) is exercised without touching the network.

use platform_kit::{CancellationToken, ClientError, ResourceClient, ResourceSchema};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Post {
    id: i64,
    user_id: i64,
    title: String,
    body: String,
}

impl ResourceSchema for Post {
    type Id = i64;
    const COLLECTION: &'static str = "posts";

    fn id(&self) -> Option<i64> {
        Some(self.id)
    }
}

fn post(id: i64, title: &str) -> Post {
    Post {
        id,
        user_id: 1,
        title: title.into(),
        body: format!("body of {id}"),
    }
}

// ── Reads ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn fetch_single_returns_requested_id() {
    let server = MockServer::start().await;
    for id in [1_i64, 42, 100] {
        Mock::given(method("GET"))
            .and(path(format!("/posts/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(post(id, "t")))
            .mount(&server)
            .await;
    }

    let client = ResourceClient::new(&server.uri()).unwrap();
    for id in [1_i64, 42, 100] {
        let fetched: Post = client.fetch_single(&format!("posts/{id}")).await.unwrap();
        assert_eq!(fetched.id(), Some(id));
    }
}

#[tokio::test]
async fn fetch_list_preserves_order_and_accepts_absolute_url() {
    let server = MockServer::start().await;
    let posts = vec![post(3, "c"), post(1, "a"), post(2, "b")];
    Mock::given(method("GET"))
        .and(path("/posts"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&posts))
        .expect(2)
        .mount(&server)
        .await;

    let client = ResourceClient::new(&server.uri()).unwrap();
    let relative: Vec<Post> = client.fetch_list("posts").await.unwrap();
    let absolute: Vec<Post> = client
        .fetch_list(&format!("{}/posts", server.uri()))
        .await
        .unwrap();

    assert_eq!(relative, posts);
    assert_eq!(absolute, posts);
}

#[tokio::test]
async fn fetch_list_empty_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    let client = ResourceClient::new(&server.uri()).unwrap();
    let posts: Vec<Post> = client.fetch_list("posts").await.unwrap();
    assert!(posts.is_empty());
}

#[tokio::test]
async fn fetch_single_404_is_unexpected_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts/9"))
        .respond_with(ResponseTemplate::new(404).set_body_string("{}"))
        .mount(&server)
        .await;

    let client = ResourceClient::new(&server.uri()).unwrap();
    let err = client.fetch_single::<Post>("posts/9").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn malformed_body_is_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = ResourceClient::new(&server.uri()).unwrap();
    let err = client.fetch_list::<Post>("posts").await.unwrap_err();
    assert!(matches!(err, ClientError::DecodeFailure(_)));
}

#[tokio::test]
async fn invalid_location_sends_nothing() {
    let server = MockServer::start().await;

    let client = ResourceClient::new(&server.uri()).unwrap();
    let err = client.fetch_list::<Post>("not a url").await.unwrap_err();

    assert!(matches!(err, ClientError::InvalidLocation { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ── Update ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_puts_json_and_decodes_result() {
    let server = MockServer::start().await;
    let updated = Post {
        id: 1,
        user_id: 1,
        title: "Updated Title".into(),
        body: "Updated Body".into(),
    };
    Mock::given(method("PUT"))
        .and(path("/posts/1"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(&updated))
        .respond_with(ResponseTemplate::new(200).set_body_json(&updated))
        .expect(1)
        .mount(&server)
        .await;

    let client = ResourceClient::new(&server.uri()).unwrap();
    let result = client.update("posts/1", &updated).await.unwrap();

    assert_eq!(result.id, 1);
    assert_eq!(result.title, "Updated Title");
}

// ── Delete ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_succeeds_on_200_and_204() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/posts/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/posts/2"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = ResourceClient::new(&server.uri()).unwrap();
    client.delete::<Post>("posts", &1).await.unwrap();
    client.delete::<Post>("posts", &2).await.unwrap();
}

#[tokio::test]
async fn delete_404_is_not_success() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/posts/1"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such post"))
        .mount(&server)
        .await;

    let client = ResourceClient::new(&server.uri()).unwrap();
    let err = client.delete::<Post>("posts", &1).await.unwrap_err();
    match err {
        ClientError::UnexpectedStatus { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body.as_deref(), Some("no such post"));
        }
        other => panic!("expected UnexpectedStatus, got {other:?}"),
    }
}

// ── Transport & cancellation ───────────────────────────────────────────

#[tokio::test]
async fn unreachable_server_is_transport_failure() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let client = ResourceClient::new(&uri).unwrap();
    let err = client.fetch_list::<Post>("posts").await.unwrap_err();
    assert!(matches!(err, ClientError::TransportFailure(_)));
}

#[tokio::test]
async fn cancellation_interrupts_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(vec![post(1, "a")])
                .set_delay(Duration::from_secs(30)),
        )
        .mount(&server)
        .await;

    let token = CancellationToken::new();
    let client = ResourceClient::new(&server.uri())
        .unwrap()
        .with_cancellation(token.clone());

    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        token.cancel();
    });

    let started = std::time::Instant::now();
    let err = client.fetch_list::<Post>("posts").await.unwrap_err();
    canceller.await.unwrap();

    assert!(matches!(err, ClientError::Cancelled));
    assert!(started.elapsed() < Duration::from_secs(10));
}
