//! # Mediawall インフラ層
//!
//! 上流メディア API との通信を担当する。
//!
//! ## 設計方針
//!
//! - **トレイトによる抽象化**: [`MediaLibraryClient`] をユースケース層に公開し、
//!   テストではモックに差し替える
//! - **接続情報の明示的な受け渡し**: 環境変数はここでは読まない
//! - **リトライなし**: 失敗はそのまま呼び出し側に返す
//!
//! ## モジュール構成
//!
//! - [`error`] - インフラ層エラー（SpanTrace 付き）
//! - [`media_library`] - メディアライブラリクライアント（reqwest 実装）
//! - `mock` - テスト用インメモリクライアント（`test-utils` feature）

pub mod error;
pub mod media_library;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use error::{InfraError, InfraErrorKind};
pub use media_library::{CloudinaryClient, MediaLibraryClient, MediaLibraryCredentials};
