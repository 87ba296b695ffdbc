//! Image URL helpers
//!
//! 上传组件返回的图片地址形如
//! `https://res.cloudinary.com/<cloud>/image/upload/v123/abc.jpg`，
//! 缩略图通过在 `/upload/` 后插入变换段生成。

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

const UPLOAD_SEGMENT: &str = "/upload/";

/// Crop strategy for resized images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropMode {
    #[default]
    Fill,
    Fit,
    Thumb,
}

impl CropMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CropMode::Fill => "fill",
            CropMode::Fit => "fit",
            CropMode::Thumb => "thumb",
        }
    }
}

/// Resize/quality parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageTransform {
    pub width: Option<u32>,
    pub height: Option<u32>,
    #[serde(default)]
    pub crop: CropMode,
    /// `None` → `q_auto`
    pub quality: Option<u8>,
}

impl ImageTransform {
    pub fn sized(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    /// 列表页卡片缩略图
    pub fn card() -> Self {
        Self::sized(320, 240)
    }

    pub fn with_crop(mut self, crop: CropMode) -> Self {
        self.crop = crop;
        self
    }

    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = Some(quality.clamp(1, 100));
        self
    }

    /// `w_320,h_240,c_fill,q_auto`
    pub fn segment(&self) -> String {
        let mut parts = Vec::with_capacity(4);
        if let Some(w) = self.width {
            parts.push(format!("w_{}", w));
        }
        if let Some(h) = self.height {
            parts.push(format!("h_{}", h));
        }
        if self.width.is_some() || self.height.is_some() {
            parts.push(format!("c_{}", self.crop.as_str()));
        }
        match self.quality {
            Some(q) => parts.push(format!("q_{}", q)),
            None => parts.push("q_auto".to_string()),
        }
        parts.join(",")
    }
}

/// Insert a transformation segment into an upload URL
///
/// URLs without `/upload/` (external images, placeholders) are returned as-is.
pub fn transform_url(url: &str, transform: &ImageTransform) -> String {
    match url.split_once(UPLOAD_SEGMENT) {
        Some((base, rest)) => format!("{}{}{}/{}", base, UPLOAD_SEGMENT, transform.segment(), rest),
        None => url.to_string(),
    }
}

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{([^}]+)\}").unwrap());

/// Render `{key}` placeholders with values from JSON data
///
/// Example: `"{cdn}/restaurants/{id}.jpg"` with `{"cdn": "https://x", "id": 7}`
/// → `"https://x/restaurants/7.jpg"`. Missing keys render as empty string.
pub fn render_template(template: &str, data: &serde_json::Value) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &regex::Captures| match data.get(&caps[1]) {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Number(n)) => n.to_string(),
            Some(serde_json::Value::Bool(b)) => b.to_string(),
            Some(serde_json::Value::Null) | None => String::new(),
            Some(other) => serde_json::to_string(other).unwrap_or_default(),
        })
        .into_owned()
}
