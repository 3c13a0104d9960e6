//! # カーソルページング
//!
//! 上流 API の一覧エンドポイントをカーソルで辿り、全ページを 1 つの集約結果に連結する。
//!
//! ## ページングの流れ
//!
//! ```text
//! fetch(cursor = None) ──▶ Page 1 { resources, next_cursor = "c1" }
//! fetch(cursor = "c1") ──▶ Page 2 { resources, next_cursor = None }  ← 終端
//! ```
//!
//! ## 終端判定
//!
//! `next_cursor` が存在しない、`null`、または空文字列のページを最終ページとみなす。
//! 空文字列の扱いは [`Cursor::from_upstream`] の 1 箇所に集約し、ループ側では
//! `Option` の有無だけを見る。

use derive_more::Display;

use crate::media::MediaResource;

/// 次ページを指す不透明なカーソル（値オブジェクト）
///
/// # 不変条件
///
/// - 空文字列ではない
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display("{_0}")]
pub struct Cursor(String);

impl Cursor {
    /// 上流レスポンスの `next_cursor` 値からカーソルを作成する
    ///
    /// 値が存在しない、または空文字列の場合は `None`（最終ページ）を返す。
    pub fn from_upstream(value: Option<String>) -> Option<Self> {
        value.filter(|v| !v.is_empty()).map(Self)
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 上流 API の 1 回分のレスポンス
///
/// 含まれるリソースを集約結果に追加し、カーソルを参照した時点で役目を終える。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePage {
    resources:   Vec<MediaResource>,
    next_cursor: Option<Cursor>,
}

impl ResourcePage {
    pub fn new(resources: Vec<MediaResource>, next_cursor: Option<Cursor>) -> Self {
        Self {
            resources,
            next_cursor,
        }
    }

    /// リソースを持たない最終ページ
    pub fn empty() -> Self {
        Self::new(Vec::new(), None)
    }

    pub fn resources(&self) -> &[MediaResource] {
        &self.resources
    }

    pub fn next_cursor(&self) -> Option<&Cursor> {
        self.next_cursor.as_ref()
    }

    /// 後続ページが存在するか
    pub fn has_next(&self) -> bool {
        self.next_cursor.is_some()
    }

    /// リソースとカーソルに分解する
    pub fn into_parts(self) -> (Vec<MediaResource>, Option<Cursor>) {
        (self.resources, self.next_cursor)
    }
}

/// 1 種別分のページ集約
///
/// ページの到着順、ページ内の並び順をそのまま保って連結する。重複は除去しない。
#[derive(Debug, Clone, Default)]
pub struct ResourceCollector {
    resources: Vec<MediaResource>,
    pages:     usize,
}

impl ResourceCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// ページを取り込み、次に要求すべきカーソルを返す
    ///
    /// `None` が返ったらページングを終了する。
    pub fn push_page(&mut self, page: ResourcePage) -> Option<Cursor> {
        let (resources, next_cursor) = page.into_parts();
        self.resources.extend(resources);
        self.pages += 1;
        next_cursor
    }

    /// 取り込んだページ数
    pub fn pages(&self) -> usize {
        self.pages
    }

    /// これまでに集めたリソース件数
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// 集約結果を取り出す
    pub fn into_resources(self) -> Vec<MediaResource> {
        self.resources
    }
}
