use std::sync::Arc;

use mytrip_tourapi::stats::StatsAggregator;
use mytrip_tourapi::TourApiClient;

use crate::cache::AppCaches;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: mytrip_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Tourism API client, one connection pool for the whole process.
    pub tour_api: Arc<TourApiClient>,
    /// Per-category statistics aggregation over `tour_api`.
    pub stats: Arc<StatsAggregator>,
    /// Response caches in front of the tourism API.
    pub caches: Arc<AppCaches>,
}

impl AppState {
    /// Build the upstream client, aggregator, and caches from `config`.
    pub fn new(pool: mytrip_db::DbPool, config: ServerConfig) -> Self {
        let tour_api = Arc::new(TourApiClient::new(config.tour_api.clone()));
        let stats = Arc::new(StatsAggregator::new(
            tour_api.clone(),
            config.stats_retry,
        ));
        let caches = Arc::new(AppCaches::new(
            config.list_cache_ttl,
            config.stats_cache_ttl,
        ));

        Self {
            pool,
            config: Arc::new(config),
            tour_api,
            stats,
            caches,
        }
    }
}
