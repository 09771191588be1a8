use dotenvy::dotenv;
use reportcard::logging::{init_tracing, shutdown_tracer};
use reportcard::metrics::init_metrics;
use reportcard::router::init_router;
use reportcard::state::init_app_state;
use reportcard_config::ServerConfig;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_tracing();

    let metrics = match init_metrics() {
        Ok(handle) => handle,
        Err(e) => {
            warn!(error = %e, "Prometheus recorder not installed, continuing without metrics");
            None
        }
    };

    let state = match init_app_state() {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to initialize application state");
            std::process::exit(1);
        }
    };
    info!(provider = %state.provider.name(), "Data provider configured");

    let app = init_router(state, metrics);

    let server = ServerConfig::from_env();
    let address = server.bind_address();
    let listener = match tokio::net::TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(address = %address, error = %e, "Failed to bind");
            std::process::exit(1);
        }
    };

    println!("🚀 Server running on http://localhost:{}", server.port);
    println!("📚 Swagger UI available at http://localhost:{}/swagger-ui", server.port);
    println!("📖 Scalar UI available at http://localhost:{}/scalar", server.port);

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server error");
    }

    shutdown_tracer().await;
}
