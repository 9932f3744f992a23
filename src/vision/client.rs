//! Vision API クライアント

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// 使用するVision対応モデル
const VISION_MODEL: &str = "gpt-4o";

/// テキスト抽出の指示プロンプト（解説なしでそのまま出力させる）
const EXTRACTION_PROMPT: &str =
    "この画像に写っているテキストを抽出して、そのままの形式で出力してください。余計な説明は不要です。";

/// 応答トークンの上限
const MAX_TOKENS: u32 = 1000;

/// Vision APIクライアント
pub struct VisionClient {
    api_key: String,
    http_client: reqwest::Client,
}

impl VisionClient {
    /// 新しいクライアントを作成
    pub fn new(api_key: String, http_client: reqwest::Client) -> Self {
        Self {
            api_key,
            http_client,
        }
    }

    /// データURI形式の画像からテキストを抽出
    pub async fn extract_text(&self, image_data_uri: &str) -> Result<String> {
        let request = ChatRequest {
            model: VISION_MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: vec![
                    ContentPart::Text {
                        text: EXTRACTION_PROMPT.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: image_data_uri.to_string(),
                        },
                    },
                ],
            }],
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .http_client
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("Vision APIリクエストに失敗")?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Vision API エラー: {error_text}");
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .context("Vision APIレスポンスのパースに失敗")?;

        // 最初の選択肢の本文を抽出テキストとする（なければ空文字列）
        let text = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        Ok(text)
    }
}

// Chat Completions リクエスト/レスポンス構造体

#[derive(Serialize)]
struct ChatRequest {
    model: &'static str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: Vec<ContentPart>,
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum ContentPart {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}
