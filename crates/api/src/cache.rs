//! In-memory TTL caches in front of the tourism API.
//!
//! Listing and detail responses are reused for a short window; the
//! statistics dashboard for a much longer one. Only successful results are
//! stored, so a failed upstream call is retried on the next request.
//! Concurrent misses on one key share a single load.

use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use mytrip_core::place::{PlaceDetail, PlaceSummary};
use mytrip_tourapi::stats::StatsSnapshot;
use mytrip_tourapi::{ListQuery, Page};

use crate::error::{AppError, AppResult};

/// Upper bound on cached listing pages.
const LISTING_CAPACITY: u64 = 1_000;

/// Upper bound on cached place details.
const DETAIL_CAPACITY: u64 = 5_000;

/// Identifies one upstream listing call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListingKey {
    /// Trimmed search keyword; `None` for a plain area-based listing.
    pub keyword: Option<String>,
    pub query: ListQuery,
}

/// All response caches, shared through `AppState`.
pub struct AppCaches {
    pub listings: Cache<ListingKey, Arc<Page<PlaceSummary>>>,
    pub details: Cache<String, Arc<PlaceDetail>>,
    /// One aggregation run serves the summary, region and type views.
    pub stats: Cache<(), Arc<StatsSnapshot>>,
}

impl AppCaches {
    pub fn new(list_ttl: Duration, stats_ttl: Duration) -> Self {
        Self {
            listings: Cache::builder()
                .max_capacity(LISTING_CAPACITY)
                .time_to_live(list_ttl)
                .build(),
            details: Cache::builder()
                .max_capacity(DETAIL_CAPACITY)
                .time_to_live(list_ttl)
                .build(),
            stats: Cache::builder()
                .max_capacity(1)
                .time_to_live(stats_ttl)
                .build(),
        }
    }
}

/// Return the cached value for `key`, or drive `load` and cache its result.
///
/// `load` is only polled on a miss. Concurrent misses on the same key wait
/// for one load; its error, if any, is handed to every waiter and nothing
/// is cached.
pub async fn get_or_load<K, V, Fut>(cache: &Cache<K, V>, key: K, load: Fut) -> AppResult<V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    Fut: Future<Output = AppResult<V>>,
{
    cache
        .try_get_with(key, load)
        .await
        .map_err(AppError::from_shared)
}
