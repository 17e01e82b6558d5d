use fitness_tracker::{AppState, Config, load_or_default, load_snapshot, router};
use tokio::fs;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    if let Some(parent) = config.data_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let snapshot = if config.strict_load {
        load_snapshot(&config.data_path).await?.unwrap_or_default()
    } else {
        load_or_default(&config.data_path).await
    };
    info!(
        food = snapshot.food.len(),
        exercise = snapshot.exercise.len(),
        weight = snapshot.weight.len(),
        "loaded {}",
        config.data_path.display()
    );

    let app = router(AppState::new(config.data_path.clone(), snapshot));

    let addr = config.addr();
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
