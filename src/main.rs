//! 注文伝票スキャンAPI - メインエントリポイント

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

use order_slip_api::config::Config;
use order_slip_api::server::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // ロギング初期化
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // 環境変数の読み込み
    dotenvy::dotenv().ok();

    let config = Config::from_env();
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    let app = build_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("ポート{}のバインドに失敗", addr.port()))?;

    tracing::info!("APIサーバーを起動: http://{addr}");

    axum::serve(listener, app)
        .await
        .context("サーバーの実行に失敗")?;

    Ok(())
}
