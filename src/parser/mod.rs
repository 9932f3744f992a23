//! テキスト解析モジュール - 注文伝票情報の抽出

use regex::Regex;

/// 伝票テキストから抽出された情報
#[derive(Debug, Clone, Default)]
pub struct SlipInfo {
    /// 注文番号 (NNNN-NNNN-NNNN形式)
    pub order_number: Option<String>,
    /// お届け日 (○月○日形式)
    pub delivery_date: Option<String>,
    /// 元のテキスト
    pub raw_text: String,
}

impl SlipInfo {
    /// テキストから伝票情報を解析
    pub fn parse(text: &str) -> Self {
        Self {
            order_number: extract_order_number(text),
            delivery_date: extract_delivery_date(text),
            raw_text: text.to_string(),
        }
    }
}

/// 注文番号（4桁-4桁-4桁）を抽出。最初の一致を返す。
fn extract_order_number(text: &str) -> Option<String> {
    // 境界はASCII単語境界で判定する。Unicode境界だと「番号1234-...」のように
    // 日本語ラベルが直接続く場合に一致しなくなる。
    let re = Regex::new(r"(?-u:\b)\d{4}-\d{4}-\d{4}(?-u:\b)").ok()?;
    re.find(text).map(|m| m.as_str().to_string())
}

/// お届け日（○月○日）を抽出。最初の一致を返す。
fn extract_delivery_date(text: &str) -> Option<String> {
    let re = Regex::new(r"\d+月\d+日").ok()?;
    re.find(text).map(|m| m.as_str().to_string())
}
