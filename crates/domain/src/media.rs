//! # メディアリソース
//!
//! メディアライブラリ上のリソース（画像・動画）と、ページ描画に渡す集約結果を定義する。
//!
//! ## 含まれる型
//!
//! | 型 | 用途 |
//! |---|------|
//! | [`MediaKind`] | リソース種別（画像 / 動画） |
//! | [`PublicId`] | 上流 API 上の公開 ID |
//! | [`MediaResource`] | 1 件のリソース（公開 ID + 配信 URL） |
//! | [`Gallery`] | 種別ごとの集約結果の組 |

use derive_more::Display;
use strum::IntoStaticStr;

// =========================================================================
// MediaKind（リソース種別）
// =========================================================================

/// リソース種別
///
/// 上流 API のどのコレクションをページングするかを選択する。
/// 文字列表現は上流 API のパスセグメント（`image` / `video`）と一致する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum MediaKind {
    /// 画像
    Image,
    /// 動画
    Video,
}

impl MediaKind {
    /// ページに並べる順序ですべての種別
    pub const ALL: [MediaKind; 2] = [MediaKind::Image, MediaKind::Video];

    /// 上流 API のパスセグメントを返す
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

// =========================================================================
// PublicId（公開 ID）
// =========================================================================

/// 上流 API 上の公開 ID（値オブジェクト）
///
/// ページ上では `alt` / `caption` 属性に使われる。
/// 上流が返した値をそのまま保持し、空文字列も受け付ける。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display("{_0}")]
pub struct PublicId(String);

impl PublicId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// =========================================================================
// MediaResource（リソース）
// =========================================================================

/// メディアリソース
///
/// 上流レコードの `public_id` と `secure_url` から作られる。生成後は変更しない。
///
/// 値の検証はしない。欠けたフィールドや空文字列のレコードも 1 件として描画対象に残る。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaResource {
    public_id:  PublicId,
    secure_url: String,
}

impl MediaResource {
    pub fn new(public_id: impl Into<String>, secure_url: impl Into<String>) -> Self {
        Self {
            public_id:  PublicId::new(public_id),
            secure_url: secure_url.into(),
        }
    }

    pub fn public_id(&self) -> &PublicId {
        &self.public_id
    }

    pub fn secure_url(&self) -> &str {
        &self.secure_url
    }
}

// =========================================================================
// Gallery（集約結果の組）
// =========================================================================

/// ページ描画の入力となる集約結果
///
/// 種別ごとに、上流のページ到着順を保った全リソースを保持する。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gallery {
    images: Vec<MediaResource>,
    videos: Vec<MediaResource>,
}

impl Gallery {
    pub fn new(images: Vec<MediaResource>, videos: Vec<MediaResource>) -> Self {
        Self { images, videos }
    }

    pub fn images(&self) -> &[MediaResource] {
        &self.images
    }

    pub fn videos(&self) -> &[MediaResource] {
        &self.videos
    }

    /// 指定した種別のリソースを返す
    pub fn resources(&self, kind: MediaKind) -> &[MediaResource] {
        match kind {
            MediaKind::Image => &self.images,
            MediaKind::Video => &self.videos,
        }
    }

    /// 全種別の合計件数
    pub fn len(&self) -> usize {
        self.images.len() + self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
