//! # HTTP リクエストハンドラ
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置し、親モジュールで re-export する
//! - ハンドラは薄く保ち、集約はユースケース、HTML 生成はレンダラーに委譲する
//!
//! ## ハンドラ一覧
//!
//! - `gallery`: ギャラリーページ（全メソッド・全パスのフォールバック）

pub mod gallery;

pub use gallery::{GalleryState, show_gallery};
