//! セル参照の解析

use anyhow::{bail, Result};

/// メモ欄の列
const MEMO_COLUMN: &str = "R";

/// セル参照からメモ欄（R列）のセル参照を導出する。
/// 入力の列文字は無視し、シート名と行番号のみを使う。
/// 例: `Sheet1!A5` → `Sheet1!R5`
pub fn memo_cell(cell_reference: &str) -> Result<String> {
    let Some((sheet_name, address)) = cell_reference.split_once('!') else {
        bail!("セル参照の形式が不正です: {cell_reference}");
    };

    // 数字部分のみ抽出
    let row: String = address.chars().filter(|c| c.is_ascii_digit()).collect();
    if row.is_empty() {
        bail!("セル参照に行番号がありません: {cell_reference}");
    }

    Ok(format!("{sheet_name}!{MEMO_COLUMN}{row}"))
}
