use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use cloudstore::{Config, MemStore, SharedStore, WebServer};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {e}");
        std::process::exit(1);
    }

    // Initialize logging
    if let Err(e) = cloudstore::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        cloudstore::logging::init_console_only(&config.logging.level);
    }

    info!("CloudStore - Personal Cloud Storage Backend");
    info!(
        "Server configured on {}:{}",
        config.server.host, config.server.port
    );

    // Seed the in-memory store with the demo account
    let store = MemStore::with_demo_user();
    let current_user_id = match store.get_user_by_username("demo") {
        Some(user) => user.id,
        None => {
            eprintln!("Demo user missing from freshly seeded store");
            std::process::exit(1);
        }
    };
    info!("Serving storage for user id {}", current_user_id);

    let store: SharedStore = Arc::new(Mutex::new(store));

    let server = WebServer::new(&config.server, &config.storage, store, current_user_id);
    if let Err(e) = server.run().await {
        eprintln!("Web server error: {e}");
        std::process::exit(1);
    }
}
