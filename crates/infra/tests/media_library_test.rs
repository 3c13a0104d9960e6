//! # CloudinaryClient の結合テスト
//!
//! ローカルに起動した axum サーバーを上流 API に見立て、
//! reqwest 実装が正しいリクエストを組み立てることを検証する。
//!
//! - 一覧 URL がアカウント識別子と種別を含む
//! - カーソルがある場合のみ `next_cursor` クエリを付与する
//! - Basic 認証ヘッダーが `api_key:api_secret` から作られる
//! - 成功以外のステータスはエラーになる
//! - フィールドが空・欠けたレコードがあってもページは失敗しない

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Json,
    Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use mediawall_domain::{media::MediaKind, pagination::Cursor};
use mediawall_infra::{
    CloudinaryClient,
    InfraErrorKind,
    MediaLibraryClient,
    MediaLibraryCredentials,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use tokio::net::TcpListener;

/// 上流が受け取ったリクエスト
#[derive(Debug, Clone, PartialEq)]
struct ReceivedRequest {
    path:          String,
    next_cursor:   Option<String>,
    authorization: Option<String>,
}

#[derive(Clone, Default)]
struct UpstreamState {
    received: Arc<Mutex<Vec<ReceivedRequest>>>,
}

/// テスト用の上流 API ハンドラ
///
/// - アカウント `locked` は常に 401
/// - アカウント `sparse` は空・欠けたフィールドを含むページを返す
/// - それ以外はカーソル無し → `cur1` 付きページ、`cur1` → 最終ページ
async fn list_resources(
    State(state): State<UpstreamState>,
    Path((cloud_name, kind)): Path<(String, String)>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let next_cursor = query.get("next_cursor").cloned();
    state.received.lock().unwrap().push(ReceivedRequest {
        path: format!("/{cloud_name}/resources/{kind}"),
        next_cursor: next_cursor.clone(),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });

    if cloud_name == "locked" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": {"message": "Invalid credentials"}})),
        )
            .into_response();
    }

    if cloud_name == "sparse" {
        return Json(json!({
            "resources": [
                {"public_id": "ok", "secure_url": "https://x/ok.jpg"},
                {"public_id": "", "secure_url": "https://x/noid.jpg"},
                {"secure_url": "https://x/missing.jpg"}
            ]
        }))
        .into_response();
    }

    let body = match next_cursor.as_deref() {
        None => json!({
            "resources": [
                {"public_id": format!("{kind}-1"), "secure_url": format!("https://x/{kind}-1")}
            ],
            "next_cursor": "cur1"
        }),
        Some("cur1") => json!({
            "resources": [
                {"public_id": format!("{kind}-2"), "secure_url": format!("https://x/{kind}-2")}
            ]
        }),
        Some(other) => json!({
            "resources": [
                {"public_id": other, "secure_url": "https://x/echo"}
            ]
        }),
    };
    Json(body).into_response()
}

/// 上流 API を起動し、ベース URL を返す
async fn spawn_upstream() -> (String, UpstreamState) {
    let state = UpstreamState::default();
    let app = Router::new()
        .route("/{cloud_name}/resources/{kind}", get(list_resources))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), state)
}

fn client(base_url: &str, cloud_name: &str) -> CloudinaryClient {
    CloudinaryClient::new(
        base_url,
        MediaLibraryCredentials::new(cloud_name, "key", "secret"),
    )
}

#[tokio::test]
async fn test_先頭ページはカーソル無しでbasic認証付きのリクエストになる() {
    let (base_url, upstream) = spawn_upstream().await;
    let sut = client(&base_url, "demo");

    let page = sut.fetch_page(MediaKind::Image, None).await.unwrap();

    assert_eq!(page.resources().len(), 1);
    assert_eq!(page.resources()[0].public_id().as_str(), "image-1");
    assert_eq!(page.next_cursor().map(Cursor::as_str), Some("cur1"));
    assert_eq!(
        upstream.received.lock().unwrap().clone(),
        vec![ReceivedRequest {
            path:          "/demo/resources/image".to_string(),
            next_cursor:   None,
            authorization: Some("Basic a2V5OnNlY3JldA==".to_string()),
        }]
    );
}

#[tokio::test]
async fn test_カーソル付きのリクエストはnext_cursorクエリを送る() {
    let (base_url, upstream) = spawn_upstream().await;
    let sut = client(&base_url, "demo");
    let cursor = Cursor::from_upstream(Some("cur1".to_string()));

    let page = sut
        .fetch_page(MediaKind::Video, cursor.as_ref())
        .await
        .unwrap();

    assert_eq!(page.resources()[0].public_id().as_str(), "video-2");
    assert!(!page.has_next());
    let received = upstream.received.lock().unwrap().clone();
    assert_eq!(received[0].path, "/demo/resources/video");
    assert_eq!(received[0].next_cursor.as_deref(), Some("cur1"));
}

#[tokio::test]
async fn test_記号を含むカーソルはエンコードされてそのまま届く() {
    let (base_url, upstream) = spawn_upstream().await;
    let sut = client(&base_url, "demo");
    let cursor = Cursor::from_upstream(Some("a+b/c=&d".to_string()));

    let page = sut
        .fetch_page(MediaKind::Image, cursor.as_ref())
        .await
        .unwrap();

    assert_eq!(page.resources()[0].public_id().as_str(), "a+b/c=&d");
    assert_eq!(
        upstream.received.lock().unwrap()[0].next_cursor.as_deref(),
        Some("a+b/c=&d")
    );
}

#[tokio::test]
async fn test_401はupstream_statusエラーになる() {
    let (base_url, _upstream) = spawn_upstream().await;
    let sut = client(&base_url, "locked");

    let err = sut.fetch_page(MediaKind::Image, None).await.unwrap_err();

    assert!(matches!(
        err.kind(),
        InfraErrorKind::UpstreamStatus { status: 401, url } if url.ends_with("/locked/resources/image")
    ));
}

#[tokio::test]
async fn test_空や欠けたフィールドのレコードがあっても全件を返す() {
    let (base_url, _upstream) = spawn_upstream().await;
    let sut = client(&base_url, "sparse");

    let page = sut.fetch_page(MediaKind::Image, None).await.unwrap();

    let records: Vec<_> = page
        .resources()
        .iter()
        .map(|r| (r.public_id().as_str(), r.secure_url()))
        .collect();
    assert_eq!(
        records,
        vec![
            ("ok", "https://x/ok.jpg"),
            ("", "https://x/noid.jpg"),
            ("", "https://x/missing.jpg"),
        ]
    );
    assert!(!page.has_next());
}

#[tokio::test]
async fn test_接続できない場合はhttpエラーになる() {
    // バインドしてすぐ閉じたポートには誰も待ち受けていない
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let sut = client(&format!("http://{addr}"), "demo");

    let err = sut.fetch_page(MediaKind::Image, None).await.unwrap_err();

    assert!(matches!(err.kind(), InfraErrorKind::Http(_)));
}
