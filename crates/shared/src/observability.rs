//! # Observability 基盤
//!
//! ログ出力の初期化と、リクエスト単位のスパン・ID を提供する。
//!
//! ## ログの構造
//!
//! ```text
//! request{method, uri, request_id}
//!   └─ show_gallery
//!        └─ collect_all{kind}   ← ページごとの debug ログはここで出る
//! ```
//!
//! ページ取得のログは `collect_all` の内側で出るため、JSON 出力では
//! 祖先スパンも含めて書き出し、どのリクエストのログかを `request_id` で追えるようにする。

use strum::{Display, EnumString};

/// `RUST_LOG` が未設定の場合のフィルタ
pub const DEFAULT_LOG_FILTER: &str = "info,mediawall=debug";

/// ログ出力形式（環境変数 `LOG_FORMAT`）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogFormat {
    /// 1 行 1 JSON（本番向け）
    Json,
    /// 人間向け（開発向け）
    #[default]
    Pretty,
}

impl LogFormat {
    /// `LOG_FORMAT` の値を解釈する
    ///
    /// 未設定・空文字列は [`Pretty`](LogFormat::Pretty)。
    /// 解釈できない値は `Err` でその値を返す（呼び出し側で警告してから `Pretty` を使う）。
    pub fn from_setting(value: Option<&str>) -> Result<Self, String> {
        match value.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(other) => other.parse().map_err(|_| other.to_string()),
        }
    }
}

/// トレーシングを初期化する
///
/// - フィルタは `RUST_LOG`、未設定なら [`DEFAULT_LOG_FILTER`]
/// - 出力形式は `log_format_setting`（`LOG_FORMAT` の生の値）で選ぶ
/// - `tracing_error::ErrorLayer` を登録し、上流エラーの SpanTrace を有効にする
#[cfg(feature = "observability")]
pub fn init_tracing(log_format_setting: Option<&str>) {
    use tracing_subscriber::{Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let (log_format, rejected) = match LogFormat::from_setting(log_format_setting) {
        Ok(format) => (format, None),
        Err(value) => (LogFormat::Pretty, Some(value)),
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    let fmt_layer = match log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(false)
            .with_span_list(true)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(tracing_error::ErrorLayer::default())
        .init();

    if let Some(value) = rejected {
        tracing::warn!(log_format = %value, "LOG_FORMAT を解釈できないため pretty で出力します");
    }
}

/// UUID v7 でリクエスト ID を生成する
///
/// `SetRequestIdLayer` に渡して使う。クライアントが `X-Request-Id` を
/// 送ってきた場合はそちらが優先され、このジェネレーターは呼ばれない。
#[cfg(feature = "observability")]
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV7;

#[cfg(feature = "observability")]
impl tower_http::request_id::MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(
        &mut self,
        _request: &http::Request<B>,
    ) -> Option<tower_http::request_id::RequestId> {
        let value = http::HeaderValue::from_str(&uuid::Uuid::now_v7().to_string()).ok()?;
        Some(tower_http::request_id::RequestId::new(value))
    }
}

/// `TraceLayer` 用のリクエストスパンを作成する
///
/// `X-Request-Id` ヘッダーの値を `request_id` フィールドとして含めるため、
/// リクエスト処理中のすべてのログに request_id が付与される。
#[cfg(feature = "observability")]
pub fn make_request_span<B>(request: &http::Request<B>) -> tracing::Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}
