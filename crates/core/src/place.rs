//! Place records as the rest of the service sees them.
//!
//! The tourism API's wire shapes are decoded in `mytrip-tourapi` and
//! converted into these types at the boundary; nothing downstream handles
//! raw upstream JSON.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::geo::{projected_to_geographic, GeoPoint};

/// A single point of interest in a listing or search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSummary {
    pub content_id: String,
    pub title: String,
    pub content_type_id: String,
    pub area_code: String,
    pub addr1: String,
    pub addr2: Option<String>,
    pub tel: Option<String>,
    pub first_image: Option<String>,
    pub first_image2: Option<String>,
    /// Projected X coordinate, scaled integer encoding.
    pub map_x: String,
    /// Projected Y coordinate, scaled integer encoding.
    pub map_y: String,
    /// `YYYYMMDDHHMMSS`; compares lexicographically.
    pub modified_time: String,
}

impl PlaceSummary {
    /// Geographic position of this place for map markers.
    pub fn location(&self) -> Result<GeoPoint, CoreError> {
        projected_to_geographic(&self.map_x, &self.map_y)
    }
}

/// Full detail for one place, fetched on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetail {
    #[serde(flatten)]
    pub summary: PlaceSummary,
    pub overview: String,
    pub homepage: Option<String>,
    pub zipcode: Option<String>,
}

/// Pet-accompaniment information for a place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PetInfo {
    pub content_id: String,
    /// Accompaniment type, e.g. whole-site or partial.
    pub acmpy_type_cd: Option<String>,
    /// Which animals may accompany.
    pub acmpy_psbl_cpam: Option<String>,
    /// Required items or conditions.
    pub acmpy_need_mtr: Option<String>,
    pub etc_acmpy_info: Option<String>,
    pub rela_poses_fclty: Option<String>,
    pub rela_frnsh_prdlst: Option<String>,
    pub rela_rntl_prdlst: Option<String>,
    pub rela_purc_prdlst: Option<String>,
}

impl PetInfo {
    /// Whether any of the accompaniment fields carry information.
    pub fn has_any_info(&self) -> bool {
        [
            &self.acmpy_type_cd,
            &self.acmpy_psbl_cpam,
            &self.acmpy_need_mtr,
            &self.etc_acmpy_info,
        ]
        .iter()
        .any(|field| field.as_deref().is_some_and(|s| !s.trim().is_empty()))
    }
}

/// Map an upstream string field to `None` when it is blank.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
