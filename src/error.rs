//! APIエラー型

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// ハンドラが返すエラー。HTTPステータスと `{success: false, message}` 形式に変換される。
#[derive(Debug, Error)]
pub enum ApiError {
    /// クライアント入力エラー (400)
    #[error("{0}")]
    BadRequest(String),

    /// サービスアカウントキーの設定不備 (500)。秘密情報はメッセージに含めない。
    #[error("サービスアカウントキーの設定に問題があります")]
    Credential,

    /// 外部サービス・内部エラー (500)
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// 外部サービスのエラーをハンドラ固有の接頭辞付きメッセージに包む
    pub fn internal(prefix: &str, err: anyhow::Error) -> Self {
        Self::Internal(format!("{prefix}: {err:#}"))
    }
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Credential | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorBody {
            success: false,
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bad_request_maps_to_400_with_success_false() {
        let response =
            ApiError::BadRequest("画像データが必要です".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["success"], serde_json::json!(false));
        assert_eq!(value["message"], "画像データが必要です");
    }

    #[test]
    fn server_side_errors_map_to_500() {
        assert_eq!(
            ApiError::Credential.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Internal("upstream failure".to_string())
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn credential_error_omits_secret_details() {
        let message = ApiError::Credential.to_string();
        assert_eq!(message, "サービスアカウントキーの設定に問題があります");
    }

    #[test]
    fn internal_error_keeps_upstream_message() {
        let err = ApiError::internal(
            "スプレッドシートの検索中にエラーが発生しました",
            anyhow::anyhow!("Sheets API エラー (403): permission denied"),
        );
        assert_eq!(
            err.to_string(),
            "スプレッドシートの検索中にエラーが発生しました: Sheets API エラー (403): permission denied"
        );
    }
}
