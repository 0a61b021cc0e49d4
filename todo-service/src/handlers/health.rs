//! Health check endpoint

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::repository::ListStore;
use crate::state::AppState;

/// Body of `GET /v1/healthcheck`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub environment: String,
    pub version: String,
}

/// Reports that the service is up, with its environment and build version
///
/// Does not touch the database.
pub async fn healthcheck<S: ListStore>(State(state): State<AppState<S>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "available".to_string(),
        environment: state.config().service.environment.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::repository::memory::MemoryListStore;

    #[tokio::test]
    async fn test_healthcheck() {
        let mut config = Config::default();
        config.service.environment = "staging".to_string();
        let state = AppState::new(config, MemoryListStore::new());

        let Json(response) = healthcheck(State(state)).await;
        assert_eq!(response.status, "available");
        assert_eq!(response.environment, "staging");
        assert_eq!(response.version, env!("CARGO_PKG_VERSION"));
    }
}
