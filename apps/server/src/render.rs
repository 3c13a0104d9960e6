//! # ギャラリーレンダラー
//!
//! tera テンプレートエンジンで、集約結果から 1 枚の HTML ドキュメントを生成する。
//!
//! ## 設計方針
//!
//! - **`include_str!` によるコンパイル時埋め込み**: テンプレートはバイナリに埋め込まれる
//! - **自動エスケープ**: 公開 ID と URL は autoescape を通して埋め込む。
//!   エスケープ対象は `& < > " '` のみで、URL の `/` はそのまま出力する
//! - **決定的な出力**: 同じ入力からは常にバイト単位で同じ HTML を返す
//!
//! ## テンプレート
//!
//! | 名前 | 内容 |
//! |------|------|
//! | `gallery/image_article.html` | 画像 1 件分の `<article>` |
//! | `gallery/video_article.html` | 動画 1 件分の `<article>` |
//! | `gallery/page.html` | ドキュメント全体（スタイル、セクション、フッター） |
//! | `gallery/adjust_last_row.js` | グリッド最終行を調整するスクリプト |

use mediawall_domain::media::{Gallery, MediaKind, MediaResource};
use serde::Serialize;
use tera::{Context, Tera};
use thiserror::Error;

const IMAGE_TEMPLATE: &str = "gallery/image_article.html";
const VIDEO_TEMPLATE: &str = "gallery/video_article.html";
const PAGE_TEMPLATE: &str = "gallery/page.html";
const SCRIPT_TEMPLATE: &str = "gallery/adjust_last_row.js";

/// レンダリングエラー
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("テンプレートの処理に失敗しました: {0}")]
    Template(#[from] tera::Error),
}

/// ページのメタ情報
///
/// `<head>` のメタタグ、見出し、ソースリンクに使われる。
/// 空文字列のオプション項目（`og_image`、`public_url`、`author`、`source_url`）は出力しない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub title:             String,
    pub description:       String,
    pub author:            String,
    pub og_image:          String,
    pub public_url:        String,
    pub heading:           String,
    pub images_label:      String,
    pub videos_label:      String,
    pub back_to_top_label: String,
    pub source_url:        String,
    pub source_icon:       String,
}

impl Default for PageMeta {
    fn default() -> Self {
        Self {
            title:             "Archivos en Cloudinary".to_string(),
            description:       "Cargando archivos de Cloudinary mediante Workers de Cloudflare"
                .to_string(),
            author:            "Daniel Martínez Sebastián".to_string(),
            og_image:          "https://res.cloudinary.com/martinezsebastian-test/image/upload/v1701113111/cld-sample-3.jpg".to_string(),
            public_url:        "https://cloudinary.elotromartinezsebastian.workers.dev/".to_string(),
            heading:           "Cloudinary".to_string(),
            images_label:      "Imágenes".to_string(),
            videos_label:      "Vídeos".to_string(),
            back_to_top_label: "Volver Arriba".to_string(),
            source_url:        "https://github.com/DanielMartinezSebastian/cloudinary-fetcher-in-cloudflare-worker".to_string(),
            source_icon:       "https://res.cloudinary.com/martinezsebastian-test/image/upload/v1701172035/icons/ly7h0ssaorev80fdu1wi.png".to_string(),
        }
    }
}

/// ギャラリーレンダラー
///
/// 起動時に 1 度だけ生成し、リクエスト間で共有する。
pub struct GalleryRenderer {
    engine: Tera,
}

impl GalleryRenderer {
    /// 埋め込みテンプレートを登録したレンダラーを作成する
    pub fn new() -> Result<Self, RenderError> {
        let mut engine = Tera::default();

        engine.add_raw_templates(vec![
            (
                IMAGE_TEMPLATE,
                include_str!("../templates/gallery/image_article.html"),
            ),
            (
                VIDEO_TEMPLATE,
                include_str!("../templates/gallery/video_article.html"),
            ),
            (PAGE_TEMPLATE, include_str!("../templates/gallery/page.html")),
            (
                SCRIPT_TEMPLATE,
                include_str!("../templates/gallery/adjust_last_row.js"),
            ),
        ])?;
        engine.set_escape_fn(escape_attribute);

        Ok(Self { engine })
    }

    /// 画像 1 件分の断片を生成する
    pub fn render_image(&self, resource: &MediaResource) -> Result<String, RenderError> {
        self.render_article(IMAGE_TEMPLATE, resource)
    }

    /// 動画 1 件分の断片を生成する
    pub fn render_video(&self, resource: &MediaResource) -> Result<String, RenderError> {
        self.render_article(VIDEO_TEMPLATE, resource)
    }

    /// 同じ種別のリソースを順番どおりに連結した断片を生成する
    pub fn render_section(
        &self,
        kind: MediaKind,
        resources: &[MediaResource],
    ) -> Result<String, RenderError> {
        resources
            .iter()
            .map(|resource| match kind {
                MediaKind::Image => self.render_image(resource),
                MediaKind::Video => self.render_video(resource),
            })
            .collect()
    }

    /// ドキュメント全体を生成する
    ///
    /// 画像断片は `<section class="images">`、動画断片は `<section class="videos">` に入る。
    /// どちらかが 0 件でもセクション自体は出力する。
    pub fn render_page(&self, gallery: &Gallery, page: &PageMeta) -> Result<String, RenderError> {
        let mut context = Context::new();
        context.insert("page", page);
        // テンプレート側では種別名（`image` / `video`）で各セクションの断片を参照する
        for kind in MediaKind::ALL {
            let fragments = self.render_section(kind, gallery.resources(kind))?;
            context.insert(kind.as_str(), &fragments);
        }

        Ok(self.engine.render(PAGE_TEMPLATE, &context)?)
    }

    fn render_article(
        &self,
        template_name: &str,
        resource: &MediaResource,
    ) -> Result<String, RenderError> {
        let mut context = Context::new();
        context.insert("name", resource.public_id().as_str());
        context.insert("url", resource.secure_url());

        Ok(self.engine.render(template_name, &context)?)
    }
}

/// 属性値・テキスト用の HTML エスケープ
///
/// `&`、`<`、`>`、`"`、`'` だけを実体参照に置き換える。
fn escape_attribute(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
