mod collab;
mod config;
mod error;
mod handlers;
mod models;
mod results;
mod store;
mod tasks;
mod validation;

use collab::{LoggingNotifier, SystemClock, UuidGenerator};
use config::Config;
use handlers::{create_router, AppState};
use log::{error, info};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize logging
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return Err(e.into());
        }
    };
    info!(
        "Answer validation: {:?}, poll interval: {:?}",
        config.answer_validation, config.poll_interval
    );

    let state = AppState::new(
        config.answer_validation,
        Arc::new(UuidGenerator),
        Arc::new(SystemClock),
        Arc::new(LoggingNotifier),
    );

    // --- Start Background Task for Logging Live Results ---
    if config.monitor_enabled {
        let live = Arc::clone(&state.live);
        let every = config.poll_interval;
        tokio::spawn(async move {
            tasks::results_monitor::monitor_live_results(live, every).await;
        });
    }

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Survey server listening on http://{}", config.bind_addr);

    if let Err(why) = axum::serve(listener, app).await {
        error!("Server error: {:?}", why);
        return Err(why.into());
    }
    Ok(())
}
