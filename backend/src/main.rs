//! LocalFlow seed server: publishes the seed documents under `/data` and,
//! when `FRONTEND_DIST` is set, the compiled frontend.

mod handlers;
mod routes;
mod state;

use anyhow::Result;
use localflow_runtime::LoggingConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let _guard = localflow_runtime::init_logging(&LoggingConfig::from_env("localflow-backend"))?;

    let config = state::ServerConfig::from_env()?;
    tracing::info!("Starting LocalFlow seed server");
    tracing::info!("Seed directory: {}", config.seed_dir.display());
    if let Some(dist) = &config.frontend_dist {
        tracing::info!("Frontend directory: {}", dist.display());
    }

    let app_state = state::AppState::new(&config).await?;
    let summary = app_state.summary();
    tracing::info!(
        articles = summary.articles,
        comments = summary.comments,
        users = summary.users,
        "Seed documents validated"
    );

    let app = routes::create_router(app_state);

    let addr = config.addr();
    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
