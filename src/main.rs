use hafriyat_site::{connect, create_app, AppState, Config, ContactNotifier, Db, TelegramNotifier};
use std::sync::Arc;
use tokio::{net::TcpListener, signal};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("hafriyat_site=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env();

    let db = match &config.database_url {
        Some(url) => connect(url, config.db_max_connections).await?,
        None => {
            tracing::warn!("DATABASE_URL not set; pages render empty and writes fail");
            Db::unconfigured()
        }
    };

    let notifier: Option<Arc<dyn ContactNotifier>> = match &config.telegram {
        Some(telegram) => {
            let bot: Arc<dyn ContactNotifier> = Arc::new(TelegramNotifier::new(telegram.clone())?);
            Some(bot)
        }
        None => {
            tracing::warn!("TELEGRAM_BOT_TOKEN/TELEGRAM_CHAT_ID not set; contact form is disabled");
            None
        }
    };
    if config.admin_token.is_none() {
        tracing::warn!("ADMIN_TOKEN not set; content API writes are unauthenticated");
    }

    let bind_addr = config.bind_addr.clone();
    let app = create_app(AppState::new(db, config, notifier));
    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
