use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scanread::api::{create_router, AppState};
use scanread::config::Config;
use scanread::ocr::OcrProvider;

#[derive(Parser)]
#[command(name = "scanread")]
#[command(about = "Self-hostable OCR endpoint for uploaded images")]
struct Args {
    /// Address to bind, overrides SCANREAD_HOST
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on, overrides SCANREAD_PORT
    #[arg(long)]
    port: Option<u16>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "scanread=info,tower_http=debug".into());
    if args.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    let mut config = Config::from_env();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    if config.server.api_keys.is_empty() {
        tracing::warn!(
            "SCANREAD_API_KEYS is not set - the OCR endpoint accepts anonymous requests"
        );
    }

    tracing::info!(
        "Initializing OCR provider (default language: {})...",
        config.ocr.default_language
    );
    let ocr = OcrProvider::new(&config.ocr);
    if !ocr.is_available() {
        tracing::warn!("OCR unavailable - recognition requests will return 503");
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, ocr);
    let app = create_router(state);

    tracing::info!("Scanread starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/api/v1/health", addr);
    tracing::info!("  OCR endpoint: http://{}/api/v1/ocr", addr);
    tracing::info!("  API docs:     http://{}/api/v1/docs", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining in-flight requests...");
}
