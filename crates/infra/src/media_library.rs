//! # メディアライブラリクライアント
//!
//! Cloudinary 互換の Admin API から、リソース一覧を 1 ページずつ取得する。
//!
//! ## エンドポイント
//!
//! - `GET {base_url}/{cloud_name}/resources/{kind}` - 先頭ページ
//! - `GET {base_url}/{cloud_name}/resources/{kind}?next_cursor={cursor}` - 後続ページ
//!
//! 認証は `api_key:api_secret` による HTTP Basic 認証のみ。
//!
//! ## レスポンス形式
//!
//! ```json
//! {
//!   "resources": [
//!     { "public_id": "samples/cat", "secure_url": "https://res.example.com/cat.jpg", ... }
//!   ],
//!   "next_cursor": "8edbc61040178db60b0973ca9494bf3a"
//! }
//! ```
//!
//! `resources` が無いレスポンスは空ページ、`next_cursor` が無い・`null`・空文字列の
//! レスポンスは最終ページとして扱う。

use std::fmt;

use async_trait::async_trait;
use mediawall_domain::{
    media::{MediaKind, MediaResource},
    pagination::{Cursor, ResourcePage},
};
use serde::Deserialize;

use crate::error::InfraError;

/// Cloudinary Admin API のデフォルトベース URL
pub const DEFAULT_BASE_URL: &str = "https://api.cloudinary.com/v1_1";

/// 上流 API の接続情報
///
/// 起動時に設定から構築し、クライアント生成時に明示的に渡す。
#[derive(Clone)]
pub struct MediaLibraryCredentials {
    /// アカウント識別子（URL パスに含まれる）
    pub cloud_name: String,
    /// アクセスキー（Basic 認証のユーザー名）
    pub api_key:    String,
    /// アクセスシークレット（Basic 認証のパスワード）
    pub api_secret: String,
}

impl MediaLibraryCredentials {
    pub fn new(
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            cloud_name: cloud_name.into(),
            api_key:    api_key.into(),
            api_secret: api_secret.into(),
        }
    }
}

// キーとシークレットはログに出さない
impl fmt::Debug for MediaLibraryCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaLibraryCredentials")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &"[REDACTED]")
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

/// メディアライブラリクライアントトレイト
///
/// テスト時にスタブを使用できるようトレイトで定義。
#[async_trait]
pub trait MediaLibraryClient: Send + Sync {
    /// リソース一覧の 1 ページを取得する
    ///
    /// # 引数
    ///
    /// - `kind`: 取得するリソース種別
    /// - `cursor`: 前ページが返したカーソル（先頭ページでは `None`）
    ///
    /// # 戻り値
    ///
    /// ページ内のリソースと次ページのカーソル。
    /// 成功以外のステータスはすべて `InfraError` になる（リトライしない）。
    async fn fetch_page(
        &self,
        kind: MediaKind,
        cursor: Option<&Cursor>,
    ) -> Result<ResourcePage, InfraError>;
}

// --- レスポンス型 ---

/// リソース一覧レスポンス
#[derive(Debug, Deserialize)]
struct ResourceListResponse {
    resources:   Option<Vec<ResourceDto>>,
    next_cursor: Option<String>,
}

/// リソース 1 件（必要なフィールドのみ）
///
/// フィールドが欠けている、または `null` のレコードも空文字列として受け取る。
/// 1 件の不備でページ全体を失敗させない。
#[derive(Debug, Deserialize)]
struct ResourceDto {
    public_id:  Option<String>,
    secure_url: Option<String>,
}

impl From<ResourceDto> for MediaResource {
    fn from(dto: ResourceDto) -> Self {
        MediaResource::new(
            dto.public_id.unwrap_or_default(),
            dto.secure_url.unwrap_or_default(),
        )
    }
}

impl ResourceListResponse {
    fn into_page(self) -> ResourcePage {
        let resources = self
            .resources
            .unwrap_or_default()
            .into_iter()
            .map(MediaResource::from)
            .collect();

        ResourcePage::new(resources, Cursor::from_upstream(self.next_cursor))
    }
}

/// Cloudinary クライアント実装
#[derive(Clone)]
pub struct CloudinaryClient {
    base_url:    String,
    credentials: MediaLibraryCredentials,
    client:      reqwest::Client,
}

impl CloudinaryClient {
    /// 新しい CloudinaryClient を作成する
    ///
    /// # 引数
    ///
    /// - `base_url`: Admin API のベース URL（例: [`DEFAULT_BASE_URL`]）
    /// - `credentials`: 接続情報
    pub fn new(base_url: &str, credentials: MediaLibraryCredentials) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            client: reqwest::Client::new(),
        }
    }

    /// 種別ごとの一覧エンドポイント URL
    fn resources_url(&self, kind: MediaKind) -> String {
        format!(
            "{}/{}/resources/{}",
            self.base_url,
            self.credentials.cloud_name,
            kind.as_str()
        )
    }
}

#[async_trait]
impl MediaLibraryClient for CloudinaryClient {
    #[tracing::instrument(skip_all, fields(kind = %kind, cursor = cursor.map(Cursor::as_str)))]
    async fn fetch_page(
        &self,
        kind: MediaKind,
        cursor: Option<&Cursor>,
    ) -> Result<ResourcePage, InfraError> {
        let url = self.resources_url(kind);

        let mut request = self.client.get(&url).basic_auth(
            &self.credentials.api_key,
            Some(&self.credentials.api_secret),
        );
        if let Some(cursor) = cursor {
            request = request.query(&[("next_cursor", cursor.as_str())]);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                error.category = "external_service",
                error.kind = "media_library",
                status = status.as_u16(),
                "上流 API が成功以外のステータスを返しました"
            );
            return Err(InfraError::upstream_status(status.as_u16(), url));
        }

        let body = response.text().await?;
        let listing: ResourceListResponse = serde_json::from_str(&body)?;
        Ok(listing.into_page())
    }
}
