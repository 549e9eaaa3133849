use textboard_api::database::Database;
use textboard_api::{app, config, AppState};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting Textboard API in {:?} mode", config.environment);

    let db = Database::connect(&config.database)
        .unwrap_or_else(|e| panic!("failed to initialize database pool: {}", e));

    // Best effort: keep serving (degraded) when the database is unreachable
    if config.database.run_migrations {
        if let Err(e) = db.run_migrations().await {
            tracing::warn!("Migrations not applied: {}", e);
        }
    }

    let app = app(AppState { db });

    // Allow tests or deployments to override port via env
    let port = std::env::var("TEXTBOARD_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(config.api.default_port);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 Textboard API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
