//! # ギャラリーユースケース
//!
//! 上流メディア API のリソース一覧をカーソルが尽きるまでページングし、
//! 画像と動画の集約結果（[`Gallery`]）を組み立てる。
//!
//! ## 設計方針
//!
//! - **種別内は逐次**: 前ページのカーソルが無いと次ページを要求できない
//! - **種別間は並行**: 画像と動画の集約は `tokio::try_join!` で同時に進める
//! - **部分結果なし**: どのページで失敗しても集約全体を失敗とする
//! - **リトライなし**: 上流エラーはそのまま [`GalleryError`] に包んで返す

use std::sync::Arc;

use mediawall_domain::{
    media::{Gallery, MediaKind, MediaResource},
    pagination::{Cursor, ResourceCollector},
};
use mediawall_infra::{InfraError, MediaLibraryClient};
use thiserror::Error;

/// ギャラリー構築エラー
///
/// 上流の失敗理由（認証失敗、通信失敗、不正なレスポンス）は区別しない。
#[derive(Debug, Error)]
pub enum GalleryError {
    /// 上流からの取得に失敗した
    #[error("{kind} の一覧取得に失敗しました: {source}")]
    UpstreamFetch {
        kind:   MediaKind,
        #[source]
        source: InfraError,
    },
}

/// ギャラリーユースケース
pub struct GalleryUseCaseImpl {
    client: Arc<dyn MediaLibraryClient>,
}

impl GalleryUseCaseImpl {
    pub fn new(client: Arc<dyn MediaLibraryClient>) -> Self {
        Self { client }
    }

    /// 指定した種別のリソースをすべて取得する
    ///
    /// カーソル無しで先頭ページを要求し、応答に次カーソルがある限り
    /// そのカーソルを付けて次ページを要求する。発行するリクエスト数はページ数と一致する。
    ///
    /// # 戻り値
    ///
    /// 到着順（ページ順、ページ内順）に並んだリソース。
    #[tracing::instrument(skip_all, fields(kind = %kind))]
    pub async fn collect_all(&self, kind: MediaKind) -> Result<Vec<MediaResource>, GalleryError> {
        let mut collector = ResourceCollector::new();
        let mut cursor: Option<Cursor> = None;

        loop {
            let page = self
                .client
                .fetch_page(kind, cursor.as_ref())
                .await
                .map_err(|source| GalleryError::UpstreamFetch { kind, source })?;

            tracing::debug!(
                page = collector.pages() + 1,
                resources = page.resources().len(),
                has_next = page.has_next(),
                "ページを取得しました"
            );

            cursor = collector.push_page(page);
            if cursor.is_none() {
                break;
            }
        }

        tracing::info!(
            pages = collector.pages(),
            resources = collector.len(),
            "一覧の取得が完了しました"
        );

        Ok(collector.into_resources())
    }

    /// 画像と動画の両方を集約してギャラリーを組み立てる
    ///
    /// どちらか一方でも失敗した場合、もう一方の集約は打ち切られ、
    /// 部分的なギャラリーは返さない。
    pub async fn build_gallery(&self) -> Result<Gallery, GalleryError> {
        let (images, videos) = tokio::try_join!(
            self.collect_all(MediaKind::Image),
            self.collect_all(MediaKind::Video)
        )?;

        Ok(Gallery::new(images, videos))
    }
}
