//! # Mediawall 共有ユーティリティ
//!
//! サーバーとライブラリ層から共通で使われるユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - トレーシング関連の依存は `observability` feature の背後に置く

pub mod error_response;
pub mod observability;

pub use error_response::ErrorResponse;
