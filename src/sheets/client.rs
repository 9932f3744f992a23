//! Sheets API クライアント

use super::auth::ServiceAccountAuth;
use anyhow::{Context, Result};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Sheets APIが返したエラー応答。診断エンドポイントがステータスコードを
/// 取り出せるよう、メッセージとは別に保持する。
#[derive(Debug, thiserror::Error)]
#[error("Sheets API エラー ({status}): {body}")]
pub struct SheetsApiError {
    pub status: u16,
    pub body: String,
}

/// スプレッドシートのメタデータ（診断用）
#[derive(Debug)]
pub struct SpreadsheetMeta {
    pub title: String,
    pub locale: Option<String>,
    pub sheet_count: usize,
}

/// Sheets API v4 の薄いクライアント
pub struct SheetsClient {
    auth: Arc<ServiceAccountAuth>,
    http_client: reqwest::Client,
}

impl SheetsClient {
    /// 新しいクライアントを作成
    pub fn new(auth: Arc<ServiceAccountAuth>, http_client: reqwest::Client) -> Self {
        Self { auth, http_client }
    }

    /// スプレッドシートのタイトル・ロケール・シート数を取得
    pub async fn metadata(&self, spreadsheet_id: &str) -> Result<SpreadsheetMeta> {
        let spreadsheet = self.get_spreadsheet(spreadsheet_id).await?;
        Ok(SpreadsheetMeta {
            title: spreadsheet.properties.title,
            locale: spreadsheet.properties.locale,
            sheet_count: spreadsheet.sheets.len(),
        })
    }

    /// シート（タブ）名の一覧をサービスが返す順序で取得
    pub async fn sheet_titles(&self, spreadsheet_id: &str) -> Result<Vec<String>> {
        let spreadsheet = self.get_spreadsheet(spreadsheet_id).await?;
        Ok(spreadsheet
            .sheets
            .into_iter()
            .map(|s| s.properties.title)
            .collect())
    }

    /// 指定範囲の値を行単位で取得。値がない場合は空のリストを返す。
    pub async fn values(&self, spreadsheet_id: &str, range: &str) -> Result<Vec<Vec<String>>> {
        let url = self.values_url(spreadsheet_id, range)?;
        let response: ValueRange = self.get_json(url).await?;
        Ok(response.values)
    }

    /// 単一セルを上書き（RAW: 数式として解釈しない）
    pub async fn update_value(&self, spreadsheet_id: &str, range: &str, text: &str) -> Result<()> {
        let mut url = self.values_url(spreadsheet_id, range)?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");

        let token = self.auth.token().await?;
        let body = json!({ "values": [[text]] });

        let response = self
            .http_client
            .put(url)
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await
            .context("Sheets APIリクエストに失敗")?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SheetsApiError { status, body }.into());
        }

        Ok(())
    }

    async fn get_spreadsheet(&self, spreadsheet_id: &str) -> Result<Spreadsheet> {
        let mut url = self.base_url(spreadsheet_id)?;
        url.query_pairs_mut()
            .append_pair("fields", "properties,sheets.properties");
        self.get_json(url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let token = self.auth.token().await?;

        let response = self
            .http_client
            .get(url)
            .bearer_auth(&token)
            .send()
            .await
            .context("Sheets APIリクエストに失敗")?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SheetsApiError { status, body }.into());
        }

        response
            .json()
            .await
            .context("Sheets APIレスポンスのパースに失敗")
    }

    fn base_url(&self, spreadsheet_id: &str) -> Result<Url> {
        let mut url = Url::parse(SHEETS_API_BASE).context("Sheets API URLのパースに失敗")?;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Sheets API URLの構築に失敗"))?
            .push(spreadsheet_id);
        Ok(url)
    }

    /// `range` はパスセグメントとして追加する。
    /// 日本語シート名などはここでパーセントエンコードされる。
    fn values_url(&self, spreadsheet_id: &str, range: &str) -> Result<Url> {
        let mut url = self.base_url(spreadsheet_id)?;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Sheets API URLの構築に失敗"))?
            .push("values")
            .push(range);
        Ok(url)
    }
}

// Sheets API レスポンス構造体

#[derive(Deserialize)]
struct Spreadsheet {
    properties: SpreadsheetProperties,
    #[serde(default)]
    sheets: Vec<Sheet>,
}

#[derive(Deserialize)]
struct SpreadsheetProperties {
    title: String,
    locale: Option<String>,
}

#[derive(Deserialize)]
struct Sheet {
    properties: SheetProperties,
}

#[derive(Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}
