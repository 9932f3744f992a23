//! テキスト抽出エンドポイント

use crate::error::ApiError;
use crate::imaging;
use crate::parser::SlipInfo;
use crate::server::AppState;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractResponse {
    pub success: bool,
    pub text: String,
    pub order_number: String,
    pub delivery_date: String,
}

/// POST /api/extract-text
///
/// データURI形式の画像を受け取り、Visionモデルでテキストを抽出して
/// 注文番号・お届け日を切り出して返す。
pub async fn extract_text(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, ApiError> {
    // リクエストの検証（外部呼び出しの前に行う）
    if request.image.is_empty() {
        return Err(ApiError::BadRequest("画像データが必要です".to_string()));
    }
    if !request.image.starts_with("data:image/") {
        return Err(ApiError::BadRequest(
            "無効な画像フォーマットです".to_string(),
        ));
    }

    // サイズ超過の画像は品質を下げて再エンコード
    let processed = imaging::shrink_if_oversized(&request.image).map_err(|err| {
        tracing::error!("画像処理エラー: {err:#}");
        ApiError::internal("画像処理中にエラーが発生しました", err)
    })?;

    let text = state.vision.extract_text(&processed).await.map_err(|err| {
        tracing::error!("テキスト抽出エラー: {err:#}");
        ApiError::internal("テキスト抽出中にエラーが発生しました", err)
    })?;

    let info = SlipInfo::parse(&text);

    Ok(Json(ExtractResponse {
        success: true,
        text,
        order_number: info.order_number.unwrap_or_default(),
        delivery_date: info.delivery_date.unwrap_or_default(),
    }))
}
