use axum::{extract::State, routing::get, Json, Router};
use dashboard::Dashboard;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, OrApiError as _};

pub fn routes() -> Router<Dashboard> {
    Router::new().route("/initialize", get(initialize))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Initialized {
    pub message: String,
    pub inserted: u64,
}

async fn initialize(State(dashboard): State<Dashboard>) -> Result<Json<Initialized>, ApiError> {
    let inserted = dashboard
        .loader
        .load()
        .await
        .or_api_error("Failed to initialize database")?;
    Ok(Json(Initialized {
        message: "Database initialized successfully".to_owned(),
        inserted,
    }))
}
