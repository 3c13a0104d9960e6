//! # テスト用モッククライアント
//!
//! ユースケーステストで使用するインメモリのメディアライブラリクライアント。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! mediawall-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! 種別ごとに返すページ（または失敗ステータス）を順番に積んでおき、
//! 呼び出しのたびに先頭から 1 つずつ返す。受け取ったカーソルはすべて記録する。

use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use mediawall_domain::{
    media::{MediaKind, MediaResource},
    pagination::{Cursor, ResourcePage},
};

use crate::{error::InfraError, media_library::MediaLibraryClient};

/// 積まれた応答
#[derive(Debug, Clone)]
enum Scripted {
    Page(ResourcePage),
    Status(u16),
}

/// 記録された呼び出し
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub kind:   MediaKind,
    pub cursor: Option<String>,
}

// ===== MockMediaLibraryClient =====

#[derive(Clone, Default)]
pub struct MockMediaLibraryClient {
    scripts: Arc<Mutex<HashMap<MediaKind, VecDeque<Scripted>>>>,
    calls:   Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockMediaLibraryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// 次に返すページを積む
    pub fn push_page(&self, kind: MediaKind, page: ResourcePage) -> &Self {
        self.push(kind, Scripted::Page(page));
        self
    }

    /// `(public_id, secure_url)` の組と次カーソルからページを積む
    pub fn push_records(
        &self,
        kind: MediaKind,
        records: &[(&str, &str)],
        next_cursor: Option<&str>,
    ) -> &Self {
        let resources = records
            .iter()
            .map(|(id, url)| MediaResource::new(*id, *url))
            .collect();
        let cursor = Cursor::from_upstream(next_cursor.map(str::to_string));
        self.push_page(kind, ResourcePage::new(resources, cursor))
    }

    /// 次の呼び出しで成功以外のステータスを返すよう積む
    pub fn push_status(&self, kind: MediaKind, status: u16) -> &Self {
        self.push(kind, Scripted::Status(status));
        self
    }

    /// これまでの呼び出し（全種別、呼び出し順）
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// 指定した種別の呼び出しで渡されたカーソル（呼び出し順）
    pub fn cursors_for(&self, kind: MediaKind) -> Vec<Option<String>> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.kind == kind)
            .map(|call| call.cursor.clone())
            .collect()
    }

    fn push(&self, kind: MediaKind, scripted: Scripted) {
        self.scripts
            .lock()
            .unwrap()
            .entry(kind)
            .or_default()
            .push_back(scripted);
    }
}

#[async_trait]
impl MediaLibraryClient for MockMediaLibraryClient {
    async fn fetch_page(
        &self,
        kind: MediaKind,
        cursor: Option<&Cursor>,
    ) -> Result<ResourcePage, InfraError> {
        self.calls.lock().unwrap().push(RecordedCall {
            kind,
            cursor: cursor.map(|c| c.as_str().to_string()),
        });

        let next = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(&kind)
            .and_then(VecDeque::pop_front);

        match next {
            Some(Scripted::Page(page)) => Ok(page),
            Some(Scripted::Status(status)) => Err(InfraError::upstream_status(
                status,
                format!("mock://resources/{kind}"),
            )),
            None => Err(InfraError::unexpected(format!(
                "{kind} のページが積まれていません"
            ))),
        }
    }
}
