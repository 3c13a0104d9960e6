//! # ユースケース層
//!
//! 上流クライアントをまとめ、リクエストごとの集約処理を提供する。
//!
//! - `gallery`: 画像・動画一覧のページング集約

pub mod gallery;

pub use gallery::{GalleryError, GalleryUseCaseImpl};
