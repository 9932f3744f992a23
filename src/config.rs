//! 環境変数からの設定読み込み
//!
//! 値が欠けていても起動は継続する。各ハンドラがリクエスト単位で
//! エラーを報告し、診断エンドポイントが設定不備を確認できるようにする。

/// アプリケーション設定
#[derive(Debug, Clone)]
pub struct Config {
    /// サービスアカウントキー（JSONファイルの内容そのもの）
    pub service_account_key: Option<String>,
    /// デフォルトのスプレッドシートID
    pub spreadsheet_id: Option<String>,
    /// OpenAI APIキー
    pub openai_api_key: Option<String>,
    /// 待ち受けポート
    pub port: u16,
    /// 実行環境名
    pub app_env: Option<String>,
}

impl Config {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Self {
        Self {
            service_account_key: env_nonempty("GOOGLE_SERVICE_ACCOUNT_KEY"),
            spreadsheet_id: env_nonempty("SPREADSHEET_ID"),
            openai_api_key: env_nonempty("OPENAI_API_KEY"),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            app_env: env_nonempty("APP_ENV"),
        }
    }
}

/// 空文字列は未設定として扱う
fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
