//! # サーバー設定
//!
//! 環境変数からサーバーの設定を読み込む。

use std::env;

use mediawall_infra::{MediaLibraryCredentials, media_library::DEFAULT_BASE_URL};
use mediawall_server::render::PageMeta;
use thiserror::Error;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    #[error("{0} が空です")]
    Empty(&'static str),

    #[error("{key} は有効なポート番号である必要があります: {value}")]
    InvalidPort { key: &'static str, value: String },
}

/// サーバーの設定
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// バインドアドレス
    pub host: String,
    /// ポート番号
    pub port: u16,
    /// 上流 API のベース URL
    pub media_api_base_url: String,
    /// 上流 API の接続情報
    pub credentials: MediaLibraryCredentials,
    /// ページのメタ情報
    pub page: PageMeta,
}

impl ServerConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// テストではプロセスの環境変数を触らずに済むよう、この関数を直接使う。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let credentials = MediaLibraryCredentials::new(
            required(&lookup, "CLOUD_NAME")?,
            required(&lookup, "API_KEY")?,
            required(&lookup, "API_SECRET")?,
        );

        let port = match lookup("MEDIAWALL_PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidPort {
                key: "MEDIAWALL_PORT",
                value,
            })?,
            None => 8787,
        };

        Ok(Self {
            host: lookup("MEDIAWALL_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            media_api_base_url: lookup("MEDIA_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            credentials,
            page: page_meta(&lookup),
        })
    }
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<String, ConfigError> {
    match lookup(key) {
        None => Err(ConfigError::Missing(key)),
        Some(value) if value.trim().is_empty() => Err(ConfigError::Empty(key)),
        Some(value) => Ok(value),
    }
}

/// `GALLERY_*` で上書きされた項目以外はデフォルトのまま
fn page_meta(lookup: &impl Fn(&str) -> Option<String>) -> PageMeta {
    let defaults = PageMeta::default();
    let or_default = |key: &str, default: String| lookup(key).unwrap_or(default);

    PageMeta {
        title: or_default("GALLERY_TITLE", defaults.title),
        description: or_default("GALLERY_DESCRIPTION", defaults.description),
        author: or_default("GALLERY_AUTHOR", defaults.author),
        og_image: or_default("GALLERY_OG_IMAGE", defaults.og_image),
        public_url: or_default("GALLERY_PUBLIC_URL", defaults.public_url),
        source_url: or_default("GALLERY_SOURCE_URL", defaults.source_url),
        source_icon: or_default("GALLERY_SOURCE_ICON", defaults.source_icon),
        ..defaults
    }
}
