use std::net::SocketAddr;
use std::time::Duration;

use talentdesk::{
    api::sim::{SimProfile, Simulation},
    config::{get_config, init_config},
    database::store::Database,
    routes, AppState,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let db = Database::open(&config.data_dir).await?;

    let profile = SimProfile {
        latency_min: Duration::from_millis(config.sim_latency_min_ms),
        latency_max: Duration::from_millis(config.sim_latency_max_ms),
        failure_rate: config.sim_failure_rate,
    };
    let app_state = AppState::new(db, Simulation::new(profile));

    let app = routes::api_router()
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
