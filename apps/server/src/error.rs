//! # サーバーエラーハンドリング
//!
//! ハンドラが返すエラー型と、axum レスポンスへの変換。
//!
//! 失敗の原因はログにだけ残し、レスポンスは常に固定の 500 にする。
//! 部分的な HTML は返さない。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mediawall_shared::ErrorResponse;
use thiserror::Error;

use crate::{render::RenderError, usecase::GalleryError};

/// ハンドラエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// 上流からの集約に失敗した
    #[error(transparent)]
    Gallery(#[from] GalleryError),

    /// ページの生成に失敗した
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Gallery(e) => {
                tracing::error!(
                    error.category = "external_service",
                    error.kind = "media_library",
                    "ギャラリーの集約に失敗しました: {:?}",
                    e
                );
            }
            ApiError::Render(e) => {
                tracing::error!(
                    error.category = "infrastructure",
                    error.kind = "template",
                    "ページの生成に失敗しました: {}",
                    e
                );
            }
        }

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal_error()),
        )
            .into_response()
    }
}
