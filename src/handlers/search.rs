//! スプレッドシート検索エンドポイント

use crate::error::ApiError;
use crate::server::AppState;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 入金確認済みを示すステータス列の値（完全一致）
const PAID_STATUS: &str = "入金済み";

/// 検索対象の列範囲
const SEARCH_COLUMNS: &str = "A:Q";

// 0始まりの列インデックス
const STATUS_COLUMN: usize = 1; // B列
const NAME_COLUMN: usize = 6; // G列
const COMPANY_COLUMN: usize = 7; // H列
const PHONE_COLUMN: usize = 16; // Q列

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default)]
    pub spreadsheet_id: String,
    #[serde(default)]
    pub search_term: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub sheet_name: String,
    /// 表示用の1始まり行番号
    pub row_index: usize,
    pub name: String,
    pub company: String,
    pub phone: String,
    /// シート名込みのセル参照（A列）
    pub cell_reference: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub results: Vec<SearchHit>,
}

/// POST /api/search-spreadsheet
///
/// 全シートを左から順に走査し、入金済みの行のうち氏名・会社名・電話番号が
/// 検索キーワードに一致する行を返す。
pub async fn search_spreadsheet(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    if request.spreadsheet_id.is_empty() || request.search_term.is_empty() {
        return Err(ApiError::BadRequest(
            "スプレッドシートIDと検索キーワードが必要です".to_string(),
        ));
    }

    let client = state.sheets_client()?;

    let sheet_names = client
        .sheet_titles(&request.spreadsheet_id)
        .await
        .map_err(search_error)?;

    let mut results = Vec::new();
    for sheet_name in &sheet_names {
        let range = format!("{sheet_name}!{SEARCH_COLUMNS}");
        let rows = client
            .values(&request.spreadsheet_id, &range)
            .await
            .map_err(search_error)?;
        results.extend(scan_rows(sheet_name, &rows, &request.search_term));
    }

    Ok(Json(SearchResponse {
        success: true,
        results,
    }))
}

fn search_error(err: anyhow::Error) -> ApiError {
    tracing::error!("スプレッドシート検索エラー: {err:#}");
    ApiError::internal("スプレッドシートの検索中にエラーが発生しました", err)
}

fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

/// 1シート分の行を上から順に走査する。行0はヘッダーとしてスキップ。
/// 氏名・会社名は大文字小文字を区別しない部分一致、電話番号はそのままの部分一致。
fn scan_rows(sheet_name: &str, rows: &[Vec<String>], search_term: &str) -> Vec<SearchHit> {
    let term_lower = search_term.to_lowercase();
    let mut hits = Vec::new();

    for (i, row) in rows.iter().enumerate().skip(1) {
        // ステータス列が入金済みの行のみ対象
        if cell(row, STATUS_COLUMN) != PAID_STATUS {
            continue;
        }

        let name = cell(row, NAME_COLUMN);
        let company = cell(row, COMPANY_COLUMN);
        let phone = cell(row, PHONE_COLUMN);

        let matched = name.to_lowercase().contains(&term_lower)
            || company.to_lowercase().contains(&term_lower)
            || phone.contains(search_term);

        if matched {
            hits.push(SearchHit {
                sheet_name: sheet_name.to_string(),
                row_index: i + 1,
                name: name.to_string(),
                company: company.to_string(),
                phone: phone.to_string(),
                cell_reference: format!("{sheet_name}!A{}", i + 1),
            });
        }
    }

    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    fn test_state() -> Arc<AppState> {
        Arc::new(AppState::new(Config {
            service_account_key: None,
            spreadsheet_id: None,
            openai_api_key: None,
            port: 3000,
            app_env: None,
        }))
    }

    #[tokio::test]
    async fn missing_search_term_returns_400() {
        // 検証は外部呼び出しより先。認証情報なしの状態でも400が返る。
        let request = SearchRequest {
            spreadsheet_id: "abc123".to_string(),
            search_term: String::new(),
        };
        let err = search_spreadsheet(State(test_state()), Json(request))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_spreadsheet_id_returns_400() {
        let request = SearchRequest {
            spreadsheet_id: String::new(),
            search_term: "山田".to_string(),
        };
        let err = search_spreadsheet(State(test_state()), Json(request))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    fn row(status: &str, name: &str, company: &str, phone: &str) -> Vec<String> {
        let mut row = vec![String::new(); 17];
        row[STATUS_COLUMN] = status.to_string();
        row[NAME_COLUMN] = name.to_string();
        row[COMPANY_COLUMN] = company.to_string();
        row[PHONE_COLUMN] = phone.to_string();
        row
    }

    fn header() -> Vec<String> {
        row("ステータス", "氏名", "会社名", "電話番号")
    }

    #[test]
    fn unpaid_rows_never_match() {
        let rows = vec![
            header(),
            row("未入金", "山田太郎", "山田商事", "090-1234-5678"),
        ];
        assert!(scan_rows("Sheet1", &rows, "山田").is_empty());
    }

    #[test]
    fn header_row_is_skipped() {
        // ヘッダー行が条件に一致しても結果に含めない
        let rows = vec![row(PAID_STATUS, "氏名", "会社名", "電話番号")];
        assert!(scan_rows("Sheet1", &rows, "氏名").is_empty());
    }

    #[test]
    fn name_match_is_case_insensitive() {
        let rows = vec![
            header(),
            row(PAID_STATUS, "Yamada Taro", "", "090-1234-5678"),
        ];
        let hits = scan_rows("Sheet1", &rows, "YAMADA");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Yamada Taro");
    }

    #[test]
    fn company_match_is_case_insensitive_substring() {
        let rows = vec![
            header(),
            row(PAID_STATUS, "", "Sakura Trading LLC", ""),
        ];
        assert_eq!(scan_rows("Sheet1", &rows, "sakura").len(), 1);
    }

    #[test]
    fn phone_match_is_literal() {
        let rows = vec![header(), row(PAID_STATUS, "", "", "090-YAMADA")];
        // 電話番号は大文字小文字を畳まない
        assert!(scan_rows("Sheet1", &rows, "yamada").is_empty());
        assert_eq!(scan_rows("Sheet1", &rows, "YAMADA").len(), 1);
    }

    #[test]
    fn phone_substring_matches() {
        let rows = vec![header(), row(PAID_STATUS, "", "", "090-1234-5678")];
        assert_eq!(scan_rows("Sheet1", &rows, "1234").len(), 1);
    }

    #[test]
    fn row_index_and_cell_reference_are_one_based() {
        let rows = vec![
            header(),
            row("未入金", "", "", ""),
            row(PAID_STATUS, "佐藤花子", "", ""),
        ];
        let hits = scan_rows("5月", &rows, "佐藤");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].row_index, 3);
        assert_eq!(hits[0].cell_reference, "5月!A3");
    }

    #[test]
    fn results_preserve_row_order() {
        let rows = vec![
            header(),
            row(PAID_STATUS, "山田一", "", ""),
            row(PAID_STATUS, "山田二", "", ""),
            row(PAID_STATUS, "山田三", "", ""),
        ];
        let hits = scan_rows("Sheet1", &rows, "山田");
        let names: Vec<&str> = hits.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["山田一", "山田二", "山田三"]);
    }

    #[test]
    fn short_rows_are_handled() {
        // A:Q範囲でも末尾の空セルは省略されて返ることがある
        let rows = vec![
            header(),
            vec!["".to_string(), PAID_STATUS.to_string()],
        ];
        assert!(scan_rows("Sheet1", &rows, "山田").is_empty());
    }

    #[test]
    fn hit_serializes_with_camel_case_keys() {
        let hit = SearchHit {
            sheet_name: "Sheet1".to_string(),
            row_index: 3,
            name: "山田太郎".to_string(),
            company: String::new(),
            phone: String::new(),
            cell_reference: "Sheet1!A3".to_string(),
        };
        let value = serde_json::to_value(&hit).unwrap();
        assert_eq!(value["sheetName"], "Sheet1");
        assert_eq!(value["rowIndex"], 3);
        assert_eq!(value["cellReference"], "Sheet1!A3");
    }
}
