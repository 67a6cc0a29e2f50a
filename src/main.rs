use rt_agent_gateway::{AppState, Config, router, serve, shutdown_signal};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    if let Err(e) = run().await {
        error!("Gateway stopped: {e}");
        std::process::exit(1);
    }
}

async fn run() -> rt_agent_gateway::Result<()> {
    let config = Config::from_env()?;

    info!("OpenAI API key configured: {}", config.openai_configured());
    if !config.openai_configured() {
        warn!("OPENAI_API_KEY not found in environment variables; session endpoints will fail until it is set in .env");
    }

    let state = AppState::from_config(&config)?;
    let app = router(state, &config);

    let addr = config.listen_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!("Server running on http://{addr}");
    info!(
        menu_data = %config.menu_data_path.display(),
        static_dir = %config.static_dir.display(),
        "Realtime agent gateway ready"
    );

    serve(listener, app, shutdown_signal()).await
}
