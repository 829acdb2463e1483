use tokio::signal;

use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use contact_relay::app::create_app;
use contact_relay::config::AppConfig;
use contact_relay::state::SharedAppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenv().ok();

  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("contact_relay=info,tower_http=info")),
    )
    .init();

  let config = AppConfig::from_env()?;
  if config.allowed_origins.is_empty() {
    tracing::warn!("ALLOWED_ORIGINS is empty; browser requests carrying an Origin header will be rejected");
  }

  let app_state = SharedAppState::from_config(&config)?;
  let app = create_app(app_state);

  let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

  tracing::info!("Server running on http://{}", config.bind_addr);

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;

  Ok(())
}

async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = signal::ctrl_c().await {
      tracing::error!("Failed to install Ctrl+C handler: {}", e);
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
      Ok(mut stream) => {
        stream.recv().await;
      }
      Err(e) => {
        tracing::error!("Failed to install signal handler: {}", e);
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
      _ = ctrl_c => {},
      _ = terminate => {},
  }

  tracing::info!("Received termination signal, shutting down gracefully...");
}
