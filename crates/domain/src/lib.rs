//! # Mediawall ドメイン層
//!
//! メディアライブラリから取得したリソースと、その集約結果を表現するモデルを定義する。
//!
//! ## 設計方針
//!
//! - **値オブジェクト**: 公開 ID やカーソルを Newtype でラップする
//! - **レコードは検証しない**: 上流の 1 件が欠けていてもページ全体は失敗させない。
//!   失敗になるのは上流の応答そのものが得られない場合だけ
//! - **外部依存なし**: HTTP クライアントやテンプレートエンジンには依存しない
//! - **リクエスト単位の寿命**: すべての値は 1 リクエストの間だけ存在し、永続化しない
//!
//! ## 依存関係の方向
//!
//! ```text
//! server → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`media`] - メディア種別、リソース、ギャラリー
//! - [`pagination`] - カーソル、ページ、ページ集約
//!
//! ## 使用例
//!
//! ```rust
//! use mediawall_domain::{
//!     media::MediaResource,
//!     pagination::{Cursor, ResourceCollector, ResourcePage},
//! };
//!
//! let mut collector = ResourceCollector::new();
//! let page = ResourcePage::new(
//!     vec![MediaResource::new("a", "https://x/a.jpg")],
//!     Cursor::from_upstream(None),
//! );
//! assert!(collector.push_page(page).is_none());
//! assert_eq!(collector.into_resources().len(), 1);
//! ```

pub mod media;
pub mod pagination;
