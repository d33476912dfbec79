//! Ranking and summary for the statistics dashboard.
//!
//! Counts are fetched elsewhere, one per category; this module only orders
//! and combines them.

use serde::{Deserialize, Serialize};

use crate::codes::{area_name, content_type_name};
use crate::types::Timestamp;

/// How many entries each "top" list in a [`StatsSummary`] holds.
pub const TOP_N: usize = 3;

/// Anything with a count that can be ranked.
pub trait Counted {
    fn count(&self) -> u64;
}

/// Number of places in one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionStat {
    pub code: String,
    pub name: String,
    pub count: u64,
}

impl RegionStat {
    /// Build from a region code, resolving its display name.
    pub fn new(code: impl Into<String>, count: u64) -> Self {
        let code = code.into();
        let name = area_name(&code).to_string();
        Self { code, name, count }
    }

    /// Sum of counts across all regions.
    pub fn total(stats: &[RegionStat]) -> u64 {
        stats.iter().map(|s| s.count).sum()
    }
}

impl Counted for RegionStat {
    fn count(&self) -> u64 {
        self.count
    }
}

/// Number of places of one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeStat {
    pub code: String,
    pub name: String,
    pub count: u64,
}

impl TypeStat {
    /// Build from a place-type code, resolving its display name.
    pub fn new(code: impl Into<String>, count: u64) -> Self {
        let code = code.into();
        let name = content_type_name(&code).to_string();
        Self { code, name, count }
    }

    /// Sum of counts across all types.
    pub fn total(stats: &[TypeStat]) -> u64 {
        stats.iter().map(|s| s.count).sum()
    }
}

impl Counted for TypeStat {
    fn count(&self) -> u64 {
        self.count
    }
}

/// Dashboard headline numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSummary {
    /// Sum of the region counts. Type counts are not added in; the two
    /// partitions come from separate queries and need not agree.
    pub total_count: u64,
    pub top_regions: Vec<RegionStat>,
    pub top_types: Vec<TypeStat>,
    pub last_updated: Timestamp,
}

/// Order by count descending. Equal counts keep their input order.
pub fn rank<T: Counted + Clone>(stats: &[T]) -> Vec<T> {
    let mut ranked = stats.to_vec();
    ranked.sort_by(|a, b| b.count().cmp(&a.count()));
    ranked
}

/// Combine both partitions into the dashboard summary.
pub fn summarize(regions: &[RegionStat], types: &[TypeStat], now: Timestamp) -> StatsSummary {
    StatsSummary {
        total_count: RegionStat::total(regions),
        top_regions: rank(regions).into_iter().take(TOP_N).collect(),
        top_types: rank(types).into_iter().take(TOP_N).collect(),
        last_updated: now,
    }
}
