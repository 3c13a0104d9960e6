//! # インフラ層エラー定義
//!
//! 上流メディア API との通信で発生するエラーを表現する。
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターンを採用:
//! - [`InfraError`]: エラー種別（[`InfraErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`InfraErrorKind`]: エラーの具体的な種別（UpstreamStatus, Http, Decode 等）
//!
//! 種別はログ出力のためだけに保持する。呼び出し側（ユースケース層）は
//! 種別で分岐せず、すべてを 1 種類の取得失敗として扱う。

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
///
/// `From` 実装や convenience constructor でエラーを生成すると、
/// その時点のスパン情報が自動的にキャプチャされる。
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// 上流 API が成功以外のステータスを返した
    ///
    /// 認証失敗（401）、レート制限（420/429）、サーバーエラー（5xx）などを区別しない。
    #[error("上流 API がステータス {status} を返しました: {url}")]
    UpstreamStatus {
        /// HTTP ステータスコード
        status: u16,
        /// リクエスト URL（クエリを除く）
        url:    String,
    },

    /// 通信エラー
    ///
    /// 接続失敗、TLS エラー、レスポンス本文の読み取り失敗など。
    #[error("HTTP 通信エラー: {0}")]
    Http(#[source] reqwest::Error),

    /// レスポンス本文のデシリアライズエラー
    #[error("レスポンスのデシリアライズに失敗しました: {0}")]
    Decode(#[source] serde_json::Error),

    /// 予期しないエラー
    #[error("予期しないエラー: {0}")]
    Unexpected(String),
}

// ===== InfraError のメソッド =====

impl InfraError {
    /// エラー種別を取得する
    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    /// SpanTrace を取得する
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    // ===== Convenience constructors =====

    /// 上流ステータスエラーを生成する
    pub fn upstream_status(status: u16, url: impl Into<String>) -> Self {
        Self {
            kind:       InfraErrorKind::UpstreamStatus {
                status,
                url: url.into(),
            },
            span_trace: SpanTrace::capture(),
        }
    }

    /// 予期しないエラーを生成する
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self {
            kind:       InfraErrorKind::Unexpected(msg.into()),
            span_trace: SpanTrace::capture(),
        }
    }
}

// ===== トレイト実装 =====

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.kind)
    }
}

// ===== From 実装（SpanTrace 自動キャプチャ） =====

impl From<reqwest::Error> for InfraError {
    fn from(source: reqwest::Error) -> Self {
        Self {
            kind:       InfraErrorKind::Http(source),
            span_trace: SpanTrace::capture(),
        }
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(source: serde_json::Error) -> Self {
        Self {
            kind:       InfraErrorKind::Decode(source),
            span_trace: SpanTrace::capture(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use tracing_subscriber::layer::SubscriberExt as _;

    use super::*;

    /// テスト用に ErrorLayer 付き subscriber を設定する
    fn with_error_layer(f: impl FnOnce()) {
        let subscriber = tracing_subscriber::registry().with(tracing_error::ErrorLayer::default());
        let _guard = tracing::subscriber::set_default(subscriber);
        f();
    }

    #[test]
    fn test_upstream_statusでspan_traceがキャプチャされる() {
        with_error_layer(|| {
            let span = tracing::info_span!("test_fetch_page", kind = "image");
            let _enter = span.enter();

            let err = InfraError::upstream_status(401, "https://api.example.com/demo/resources/image");

            assert!(matches!(
                err.kind(),
                InfraErrorKind::UpstreamStatus { status: 401, .. }
            ));
            let trace_str = format!("{}", err.span_trace());
            assert!(
                trace_str.contains("test_fetch_page"),
                "SpanTrace がスパン名を含むこと: {trace_str}",
            );
        });
    }

    #[test]
    fn test_from_serde_json_errorはdecode種別になる() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: InfraError = json_err.into();

        assert!(matches!(err.kind(), InfraErrorKind::Decode(_)));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_displayがinfra_error_kindのメッセージを出力する() {
        let err = InfraError::upstream_status(500, "https://api.example.com/demo/resources/video");

        assert_eq!(
            format!("{err}"),
            "上流 API がステータス 500 を返しました: https://api.example.com/demo/resources/video"
        );
    }

    #[test]
    fn test_unexpectedはsourceを持たない() {
        let err = InfraError::unexpected("想定外");

        assert!(matches!(err.kind(), InfraErrorKind::Unexpected(msg) if msg == "想定外"));
        assert!(err.source().is_none());
    }
}
