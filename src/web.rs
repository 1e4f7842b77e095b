use crate::errors::{OptimizerResult, SafeLock, SafeReadLock, SafeWriteLock};
use crate::inputs::RawInputs;
use crate::network::{EnergyOptimizationNetwork, NetworkView};
use crate::presets::{PresetLocation, PRESET_LOCATIONS};
use crate::recommender::Recommendation;
use axum::{
    extract::Extension,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use serde::Serialize;
use std::sync::{Arc, Mutex, RwLock};
use tower_http::cors::CorsLayer;
use tracing::info;
use uuid::Uuid;

/// Shared server state. Evaluations take the read lock; re-randomization
/// takes the write lock, so no evaluation observes a half-written weight set.
pub struct AppState {
    pub network: RwLock<EnergyOptimizationNetwork>,
    pub rng: Mutex<StdRng>,
}

impl AppState {
    pub fn new(network: EnergyOptimizationNetwork, rng: StdRng) -> Arc<Self> {
        Arc::new(Self {
            network: RwLock::new(network),
            rng: Mutex::new(rng),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendResponse {
    evaluation_id: Uuid,
    evaluated_at: DateTime<Utc>,
    recommendation: Recommendation,
}

/// Build the router: recommendation, network inspection, presets, health.
pub fn build_router(state: Arc<AppState>, allow_cors: bool) -> Router {
    let router = Router::new()
        // current endpoints
        .route("/api/recommend", post(recommend))
        .route("/api/network", get(network_view))
        .route("/api/network/randomize", post(randomize))
        .route("/api/presets", get(presets))
        // versioned aliases
        .route("/v1/recommend", post(recommend))
        .route("/v1/network", get(network_view))
        // health endpoints
        .route("/healthz", get(healthz))
        .layer(Extension(state));

    if allow_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

async fn recommend(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> OptimizerResult<Json<RecommendResponse>> {
    let inputs = RawInputs::from_json(&body)?;
    let recommendation = state.network.safe_read()?.recommend(&inputs)?;

    Ok(Json(RecommendResponse {
        evaluation_id: Uuid::new_v4(),
        evaluated_at: Utc::now(),
        recommendation,
    }))
}

async fn network_view(Extension(state): Extension<Arc<AppState>>) -> OptimizerResult<Json<NetworkView>> {
    let network = state.network.safe_read()?;
    Ok(Json(network.view()))
}

async fn randomize(Extension(state): Extension<Arc<AppState>>) -> OptimizerResult<Json<NetworkView>> {
    let mut rng = state.rng.safe_lock()?;
    let mut network = state.network.safe_write()?;
    network.randomize(&mut *rng);
    info!("Weights re-randomized via API");
    Ok(Json(network.view()))
}

async fn presets() -> Json<&'static [PresetLocation]> {
    Json(&PRESET_LOCATIONS[..])
}

async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Bind and serve until the process is stopped
pub async fn serve(state: Arc<AppState>, host: &str, port: u16, allow_cors: bool) -> OptimizerResult<()> {
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| crate::errors::OptimizerError::io(format!("binding {addr}"), e))?;

    info!("Energy optimizer listening on http://{addr}");
    axum::serve(listener, build_router(state, allow_cors))
        .await
        .map_err(|e| crate::errors::OptimizerError::io("serving http", e))?;
    Ok(())
}
