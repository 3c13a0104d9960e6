//! # ギャラリーハンドラ
//!
//! 唯一のエントリーポイント。ルーターのフォールバックに登録され、
//! メソッド・パス・ボディに関係なく同じギャラリーページを返す。
//!
//! リクエストごとに上流から取得し直す（キャッシュしない）。

use std::sync::Arc;

use axum::{extract::State, response::Html};

use crate::{
    error::ApiError,
    render::{GalleryRenderer, PageMeta},
    usecase::GalleryUseCaseImpl,
};

/// ギャラリーハンドラの State
pub struct GalleryState {
    pub usecase:  GalleryUseCaseImpl,
    pub renderer: GalleryRenderer,
    pub page:     PageMeta,
}

/// 任意のリクエストに対してギャラリーページを返す
///
/// 成功時は `200 OK` と `text/html; charset=utf-8` の本文。
/// 失敗時は [`ApiError`] を返し、固定の 500 レスポンスになる。
#[tracing::instrument(skip_all)]
pub async fn show_gallery(State(state): State<Arc<GalleryState>>) -> Result<Html<String>, ApiError> {
    let gallery = state.usecase.build_gallery().await?;
    let document = state.renderer.render_page(&gallery, &state.page)?;

    if gallery.is_empty() {
        tracing::info!("上流にリソースが 1 件もありません");
    }
    tracing::debug!(
        images = gallery.images().len(),
        videos = gallery.videos().len(),
        total = gallery.len(),
        bytes = document.len(),
        "ギャラリーページを生成しました"
    );

    Ok(Html(document))
}
