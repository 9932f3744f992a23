//! 注文伝票スキャンAPI - 伝票写真のテキスト抽出とスプレッドシート連携
//!
//! # 機能
//! - 伝票画像からVision対応モデルでテキスト抽出
//! - 注文番号・お届け日の自動抽出
//! - Googleスプレッドシートの検索・メモ欄更新
//! - 設定・接続の診断エンドポイント

pub mod config;
pub mod error;
pub mod handlers;
pub mod imaging;
pub mod parser;
pub mod server;
pub mod sheets;
pub mod vision;

pub use parser::SlipInfo;
