pub mod core;
pub mod shared;
pub mod tasks;
pub mod web;

use crate::core::logging::init_logging;
use crate::core::settings::{init_settings_file, load_settings};
use crate::shared::paths::get_log_dir;

/// Starts the task list server and serves until Ctrl-C.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging first (before any other initialization)
    let _logging_guards = init_logging(&get_log_dir())?;

    match init_settings_file() {
        Ok(true) => tracing::info!(target: "system", "Wrote default settings file"),
        Ok(false) => {}
        Err(e) => tracing::warn!(target: "system", "Failed to write default settings: {}", e),
    }
    let settings = load_settings();
    let addr = settings.socket_addr()?;

    let tasks = tasks::init_tasks_service(settings.data_file());
    let app = web::router(web::AppState::new(tasks));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(target: "system", "Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!(target: "system", "Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(target: "system", "Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
