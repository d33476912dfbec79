//! Concurrent per-category counting for the statistics dashboard.
//!
//! Each region and each place type is counted with its own one-row query.
//! All queries run at once; every query retries independently; and if any
//! category still fails after its retries the whole aggregation fails.
//! A partial dashboard is never produced.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::try_join_all;
use mytrip_core::codes::{AREA_CODES, CONTENT_TYPE_IDS};
use mytrip_core::stats::{rank, summarize, RegionStat, StatsSummary, TypeStat};

use crate::client::{CategoryFilter, TourApiClient};
use crate::error::TourApiError;
use crate::retry::{with_retry, RetryPolicy};

/// Anything that can report how many places a category holds.
#[async_trait]
pub trait TotalCountSource: Send + Sync {
    async fn total_count(&self, filter: &CategoryFilter) -> Result<u64, TourApiError>;
}

#[async_trait]
impl TotalCountSource for TourApiClient {
    async fn total_count(&self, filter: &CategoryFilter) -> Result<u64, TourApiError> {
        TourApiClient::total_count(self, filter).await
    }
}

/// Result of one aggregation run.
#[derive(Debug, Clone)]
pub struct StatsSnapshot {
    pub regions: Vec<RegionStat>,
    pub types: Vec<TypeStat>,
    pub summary: StatsSummary,
}

/// Fans out count queries and assembles the results.
pub struct StatsAggregator {
    source: Arc<dyn TotalCountSource>,
    policy: RetryPolicy,
}

impl StatsAggregator {
    pub fn new(source: Arc<dyn TotalCountSource>, policy: RetryPolicy) -> Self {
        Self { source, policy }
    }

    /// Count every known region, ranked by count.
    pub async fn region_stats(&self) -> Result<Vec<RegionStat>, TourApiError> {
        let counts = self
            .count_all(AREA_CODES, |code| CategoryFilter::Area(code.to_string()))
            .await?;
        let stats: Vec<RegionStat> = AREA_CODES
            .iter()
            .zip(counts)
            .map(|(code, count)| RegionStat::new(*code, count))
            .collect();
        Ok(rank(&stats))
    }

    /// Count every known place type, ranked by count.
    pub async fn type_stats(&self) -> Result<Vec<TypeStat>, TourApiError> {
        let counts = self
            .count_all(CONTENT_TYPE_IDS, |code| {
                CategoryFilter::ContentType(code.to_string())
            })
            .await?;
        let stats: Vec<TypeStat> = CONTENT_TYPE_IDS
            .iter()
            .zip(counts)
            .map(|(code, count)| TypeStat::new(*code, count))
            .collect();
        Ok(rank(&stats))
    }

    /// Both partitions, fetched together, folded into the dashboard summary.
    pub async fn summary(&self) -> Result<StatsSummary, TourApiError> {
        Ok(self.snapshot().await?.summary)
    }

    /// One full aggregation run: both ranked partitions and the summary
    /// built from them, so all three views share one `last_updated`.
    pub async fn snapshot(&self) -> Result<StatsSnapshot, TourApiError> {
        let started = std::time::Instant::now();
        let (regions, types) = tokio::try_join!(self.region_stats(), self.type_stats())?;
        let summary = summarize(&regions, &types, chrono::Utc::now());

        tracing::info!(
            total_count = summary.total_count,
            regions = regions.len(),
            types = types.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Statistics aggregated",
        );
        Ok(StatsSnapshot {
            regions,
            types,
            summary,
        })
    }

    /// Start one retried count per code and wait for all of them. Results
    /// come back in `codes` order.
    async fn count_all<F>(&self, codes: &[&str], filter_for: F) -> Result<Vec<u64>, TourApiError>
    where
        F: Fn(&str) -> CategoryFilter,
    {
        let queries = codes.iter().map(|code| {
            let filter = filter_for(code);
            let label = format!("{filter:?}");
            let source = Arc::clone(&self.source);
            let policy = self.policy;
            async move {
                with_retry(&policy, &label, || source.total_count(&filter)).await
            }
        });
        try_join_all(queries).await
    }
}
