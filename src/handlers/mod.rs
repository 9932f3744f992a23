//! HTTPリクエストハンドラ
//!
//! 各エンドポイントのハンドラはサブモジュールに配置し、ここで再エクスポートする。
//! ハンドラは薄く保ち、外部サービスの呼び出しはクライアント層に委譲する。

pub mod debug;
pub mod extract;
pub mod search;
pub mod update;

pub use debug::debug_connection;
pub use extract::extract_text;
pub use search::search_spreadsheet;
pub use update::update_spreadsheet;
