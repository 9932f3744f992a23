//! スプレッドシート更新エンドポイント

use crate::error::ApiError;
use crate::server::AppState;
use crate::sheets::memo_cell;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    #[serde(default)]
    pub spreadsheet_id: String,
    #[serde(default)]
    pub cell_reference: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub success: bool,
    pub message: String,
}

/// POST /api/update-spreadsheet
///
/// セル参照から行番号を取り出し、同じ行のメモ欄（R列）にテキストを上書きする。
/// 入力の列文字は使わない。
pub async fn update_spreadsheet(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UpdateRequest>,
) -> Result<Json<UpdateResponse>, ApiError> {
    if request.spreadsheet_id.is_empty()
        || request.cell_reference.is_empty()
        || request.text.is_empty()
    {
        return Err(ApiError::BadRequest(
            "スプレッドシートID、セル参照、およびテキストが必要です".to_string(),
        ));
    }

    let client = state.sheets_client()?;

    let memo_range = memo_cell(&request.cell_reference).map_err(update_error)?;

    client
        .update_value(&request.spreadsheet_id, &memo_range, &request.text)
        .await
        .map_err(update_error)?;

    Ok(Json(UpdateResponse {
        success: true,
        message: "スプレッドシートが更新されました".to_string(),
    }))
}

fn update_error(err: anyhow::Error) -> ApiError {
    tracing::error!("スプレッドシート更新エラー: {err:#}");
    ApiError::internal("スプレッドシートの更新中にエラーが発生しました", err)
}
