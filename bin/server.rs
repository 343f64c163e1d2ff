// Expense Tracker - Web Server
// GET/POST /expenses backed by a JSON file

use anyhow::{Context, Result};
use log::{error, info};
use tokio::net::TcpListener;

use expense_tracker::{router, AppState, Config, ExpenseStore, VERSION};

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    info!("Expense server v{}", VERSION);

    // A bad file is not fatal: log it and serve an empty list
    let store = match ExpenseStore::load(&config.data_file) {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to load expenses: {}", e);
            ExpenseStore::empty(&config.data_file)
        }
    };

    let data_file = store.path().to_path_buf();
    let state = AppState::new(store);
    let app = router(state.clone());

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    info!("Server running on http://{}", listener.local_addr()?);
    info!("   API: http://{}/expenses", listener.local_addr()?);
    info!("   Data file: {}", data_file.display());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server stopped with an error")?;

    match state.flush() {
        Ok(true) => info!("Flushed unsaved expenses to {}", data_file.display()),
        Ok(false) => {}
        Err(e) => error!("Failed to flush expenses on shutdown: {}", e),
    }

    info!("Server stopped");
    Ok(())
}
