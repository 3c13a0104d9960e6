//! # Mediawall サーバー
//!
//! 上流メディア API（Cloudinary 互換）の画像・動画一覧をすべてページングし、
//! 1 枚の HTML ギャラリーとして返す HTTP サーバー。
//!
//! ## アーキテクチャ
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────────┐
//! │   Browser    │────▶│  Mediawall   │────▶│  Media Library   │
//! │              │     │  port: 8787  │     │  (Admin API)     │
//! └──────────────┘     └──────────────┘     └──────────────────┘
//! ```
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `CLOUD_NAME` | **Yes** | アカウント識別子 |
//! | `API_KEY` | **Yes** | アクセスキー |
//! | `API_SECRET` | **Yes** | アクセスシークレット |
//! | `MEDIAWALL_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `MEDIAWALL_PORT` | No | ポート番号（デフォルト: `8787`） |
//! | `MEDIA_API_BASE_URL` | No | 上流 API のベース URL（デフォルト: `https://api.cloudinary.com/v1_1`） |
//! | `GALLERY_*` | No | ページのメタ情報（タイトル、説明、作者、OG 画像、公開 URL、ソースリンク） |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト） |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（.env ファイルを使用）
//! cargo run -p mediawall-server
//!
//! # 本番環境（環境変数を直接指定）
//! CLOUD_NAME=demo API_KEY=... API_SECRET=... LOG_FORMAT=json cargo run -p mediawall-server --release
//! ```

mod config;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use config::ServerConfig;
use mediawall_infra::{CloudinaryClient, MediaLibraryClient};
use mediawall_server::app_builder::{build_app, build_state};
use tokio::net::TcpListener;

/// サーバーのエントリーポイント
///
/// 以下の順序で初期化を行う:
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. トレーシングの初期化
/// 3. アプリケーション設定の読み込み
/// 4. ルーターの構築
/// 5. HTTP サーバーの起動
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    mediawall_shared::observability::init_tracing(std::env::var("LOG_FORMAT").ok().as_deref());
    let _tracing_guard = tracing::info_span!("app", service = "mediawall").entered();

    let config = ServerConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        cloud_name = %config.credentials.cloud_name,
        "サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    let client: Arc<dyn MediaLibraryClient> = Arc::new(CloudinaryClient::new(
        &config.media_api_base_url,
        config.credentials,
    ));
    let state = build_state(client, config.page).context("テンプレートの登録に失敗しました")?;
    let app = build_app(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("バインドアドレスが不正です")?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("{addr} へのバインドに失敗しました"))?;

    tracing::info!("サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
