//! 画像データURIの検証と縮小
//!
//! デコード後のサイズが上限を超える画像は、品質を下げたJPEGに
//! 再エンコードしてから外部サービスに渡す。

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use regex::Regex;

/// デコード後サイズの上限（4MiB）
pub const MAX_IMAGE_BYTES: usize = 4 * 1024 * 1024;

/// パース済みのデータURI画像
pub struct DataUriImage {
    pub mime: String,
    pub data: Vec<u8>,
}

/// `data:<mime>;base64,<payload>` 形式のデータURIをパースしてデコード
pub fn parse_data_uri(uri: &str) -> Result<DataUriImage> {
    let re = Regex::new(r"^data:([A-Za-z0-9.+/-]+);base64,(.+)$")
        .context("データURIパターンの構築に失敗")?;
    let caps = re
        .captures(uri)
        .ok_or_else(|| anyhow::anyhow!("無効な画像形式です"))?;

    let mime = caps[1].to_string();
    let data = STANDARD
        .decode(&caps[2])
        .context("Base64デコードに失敗")?;

    Ok(DataUriImage { mime, data })
}

/// 上限を超える画像を品質を下げたJPEGに再エンコードする。
/// 上限以下の画像は元のデータURIをそのまま返す。
pub fn shrink_if_oversized(uri: &str) -> Result<String> {
    shrink_with_limit(uri, MAX_IMAGE_BYTES)
}

fn shrink_with_limit(uri: &str, max_bytes: usize) -> Result<String> {
    let parsed = parse_data_uri(uri)?;

    if parsed.data.len() <= max_bytes {
        return Ok(uri.to_string());
    }

    let quality = jpeg_quality(parsed.data.len(), max_bytes);

    let img = image::load_from_memory(&parsed.data).context("画像のデコードに失敗")?;
    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    img.write_with_encoder(encoder)
        .context("JPEG再エンコードに失敗")?;

    Ok(format!("data:image/jpeg;base64,{}", STANDARD.encode(&buf)))
}

/// 元サイズに応じてJPEG品質を下げる（下限50）
fn jpeg_quality(len: usize, max_bytes: usize) -> u8 {
    let quality = 1.0 - (len as f64) / (10.0 * max_bytes as f64);
    (quality.max(0.5) * 100.0).round() as u8
}
