//! # Mediawall サーバーライブラリ
//!
//! 上流メディア API の画像・動画一覧を 1 枚の HTML ギャラリーとして配信する。
//!
//! ## モジュール構成
//!
//! - `app_builder`: State の組み立てとルーター構築
//! - `error`: ハンドラエラーとレスポンス変換
//! - `handler`: HTTP ハンドラ
//! - `render`: tera によるページ生成
//! - `usecase`: ページング集約

pub mod app_builder;
pub mod error;
pub mod handler;
pub mod render;
pub mod usecase;
