//! # アプリケーション構築
//!
//! DI（クライアント・State）の初期化とルーター構築を担当する。
//! `main.rs` は設定読み込みとサーバー起動に集中する。

use std::sync::Arc;

use axum::Router;
use mediawall_infra::MediaLibraryClient;
use mediawall_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    handler::{GalleryState, show_gallery},
    render::{GalleryRenderer, PageMeta, RenderError},
    usecase::GalleryUseCaseImpl,
};

/// クライアントとページ設定から State を組み立てる
///
/// テンプレートの登録に失敗した場合はエラーを返す。
pub fn build_state(
    client: Arc<dyn MediaLibraryClient>,
    page: PageMeta,
) -> Result<Arc<GalleryState>, RenderError> {
    Ok(Arc::new(GalleryState {
        usecase: GalleryUseCaseImpl::new(client),
        renderer: GalleryRenderer::new()?,
        page,
    }))
}

/// ルーターを構築する
///
/// ルートは登録せず、すべてのリクエストをフォールバックのギャラリーハンドラで受ける。
pub fn build_app(state: Arc<GalleryState>) -> Router {
    Router::new()
        .fallback(show_gallery)
        .with_state(state)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
