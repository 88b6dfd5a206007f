//! # Core Service サーバー
//!
//! ユーザーと日次メトリクス（飲水・カロリー・運動）を管理する HTTP サービス。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `CORE_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `CORE_PORT` | No | ポート番号（デフォルト: `8000`） |
//! | `DATABASE_URL` | No* | PostgreSQL 接続 URL |
//! | `POSTGRES_HOST` ほか | No* | `DATABASE_URL` 未設定時に URL を組み立てる |
//! | `DATABASE_MAX_CONNECTIONS` | No | 接続プールの最大数（デフォルト: `10`） |
//! | `LOG_FORMAT` | No | `json` / `pretty`（デフォルト: `pretty`） |
//! | `RUST_LOG` | No | ログレベル |
//!
//! \* `DATABASE_URL` か `POSTGRES_PASSWORD` のどちらかが必要。
//!
//! ## 起動方法
//!
//! ```bash
//! POSTGRES_PASSWORD=postgres cargo run -p healthtrack-core-service
//! ```

use anyhow::Context as _;
use healthtrack_core_service::{
    app::{Repositories, build_app},
    config::CoreConfig,
};
use healthtrack_infra::db;
use healthtrack_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// Core Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    let tracing_config = TracingConfig::from_env("core-service");
    init_tracing(&tracing_config);
    let _app_span =
        tracing::info_span!("app", service = %tracing_config.service_name).entered();

    let config = CoreConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "Core Service サーバーを起動します: {}",
        config.bind_address()
    );

    let pool = db::create_pool(&config.database_url, config.max_connections)
        .await
        .context("データベース接続に失敗しました")?;
    tracing::info!("データベースに接続しました");

    db::run_migrations(&pool)
        .await
        .context("マイグレーションに失敗しました")?;
    tracing::info!("マイグレーションを適用しました");

    let app = build_app(Repositories::postgres(&pool), pool.clone());

    let listener = TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("{} にバインドできません", config.bind_address()))?;
    tracing::info!("Core Service サーバーが起動しました: {}", config.bind_address());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("サーバーが異常終了しました")?;

    pool.close().await;
    tracing::info!("Core Service サーバーを停止しました");
    Ok(())
}

/// Ctrl+C または SIGTERM を待つ
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Ctrl+C ハンドラを登録できませんでした");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM ハンドラを登録できませんでした");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("シャットダウンシグナルを受信しました");
}
