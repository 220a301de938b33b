//! ReqwestPostApi against a local posts endpoint.

#![cfg(feature = "native")]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::routing::{get, post};
use axum::{Json, Router};
use feed_composer::kernel::{BasePostApi, ReqwestPostApi};
use feed_composer::{CreatePostRequest, DisplayStrategy};

type Received = Arc<Mutex<Vec<serde_json::Value>>>;

async fn spawn_server() -> (SocketAddr, Received) {
    let received: Received = Arc::new(Mutex::new(Vec::new()));

    let app = Router::new()
        .route(
            "/users/1/posts",
            post(
                |State(received): State<Received>, Json(body): Json<serde_json::Value>| async move {
                    received.lock().unwrap().push(body);
                    Redirect::to("/users/1")
                },
            ),
        )
        .route("/users/1", get(|| async { "feed" }))
        .route(
            "/users/2/posts",
            post(|Json(body): Json<serde_json::Value>| async move {
                (StatusCode::CREATED, Json(body))
            }),
        )
        .route(
            "/users/3/posts",
            post(|| async { StatusCode::BAD_REQUEST }),
        )
        .route(
            "/users/4/posts",
            post(|| async { Redirect::to("/users/4/posts") }).get(|| async { "same page" }),
        )
        .with_state(received.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, received)
}

fn request() -> CreatePostRequest {
    CreatePostRequest {
        contents: "hello".to_string(),
        display_strategy: DisplayStrategy::Private,
    }
}

#[tokio::test]
async fn redirect_is_detected_and_body_is_json() {
    let (addr, received) = spawn_server().await;
    let api = ReqwestPostApi::new().unwrap();

    let response = api
        .post_json(&format!("http://{}/users/1/posts", addr), &request())
        .await
        .unwrap();

    assert!(response.redirected);
    assert_eq!(response.status, 303);
    assert_eq!(response.url, format!("http://{}/users/1", addr));
    assert_eq!(
        received.lock().unwrap().clone(),
        vec![serde_json::json!({"contents": "hello", "displayStrategy": 3})]
    );
}

#[tokio::test]
async fn plain_success_is_not_a_redirect() {
    let (addr, _) = spawn_server().await;

    let response = ReqwestPostApi::new()
        .unwrap()
        .post_json(&format!("http://{}/users/2/posts", addr), &request())
        .await
        .unwrap();

    assert!(!response.redirected);
    assert_eq!(response.status, 201);
    assert!(response.is_success());
}

#[tokio::test]
async fn failure_status_is_reported() {
    let (addr, _) = spawn_server().await;

    let response = ReqwestPostApi::new()
        .unwrap()
        .post_json(&format!("http://{}/users/3/posts", addr), &request())
        .await
        .unwrap();

    assert!(!response.redirected);
    assert_eq!(response.status, 400);
    assert!(!response.is_success());
}

#[tokio::test]
async fn invalid_url_is_a_network_error() {
    let err = ReqwestPostApi::new()
        .unwrap()
        .post_json("not a url", &request())
        .await
        .unwrap_err();

    assert!(matches!(err, feed_composer::ComposerError::Network(_)));
}

#[tokio::test]
async fn redirect_back_to_the_same_url_is_still_a_redirect() {
    let (addr, _) = spawn_server().await;
    let posts_url = format!("http://{}/users/4/posts", addr);

    let response = ReqwestPostApi::new()
        .unwrap()
        .post_json(&posts_url, &request())
        .await
        .unwrap();

    assert!(response.redirected);
    assert_eq!(response.status, 303);
    assert_eq!(response.url, posts_url);
}

#[tokio::test]
async fn preconfigured_client_without_redirects_reports_location() {
    let (addr, _) = spawn_server().await;
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .unwrap();

    let response = ReqwestPostApi::with_client(client)
        .post_json(&format!("http://{}/users/1/posts", addr), &request())
        .await
        .unwrap();

    assert!(response.redirected);
    assert_eq!(response.url, format!("http://{}/users/1", addr));
}
