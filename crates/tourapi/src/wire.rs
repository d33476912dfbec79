//! Item shapes as the API sends them, and their conversion into the
//! domain types in `mytrip_core::place`.
//!
//! Field names follow the API's lowercase/camelCase keys. Every field is
//! optional on the wire; blanks are normalized to `None` during conversion.

use mytrip_core::place::{non_empty, PetInfo, PlaceDetail, PlaceSummary};
use serde::Deserialize;

use crate::envelope::string_like;

/// One entry from `areaBasedList2`, `searchKeyword2` or `detailCommon2`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceItem {
    #[serde(rename = "contentid", default, deserialize_with = "string_like")]
    pub content_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "contenttypeid", default, deserialize_with = "string_like")]
    pub content_type_id: String,
    #[serde(rename = "areacode", default, deserialize_with = "string_like")]
    pub area_code: String,
    #[serde(default)]
    pub addr1: String,
    #[serde(default)]
    pub addr2: Option<String>,
    #[serde(default)]
    pub tel: Option<String>,
    #[serde(rename = "firstimage", default)]
    pub first_image: Option<String>,
    #[serde(rename = "firstimage2", default)]
    pub first_image2: Option<String>,
    #[serde(rename = "mapx", default, deserialize_with = "string_like")]
    pub map_x: String,
    #[serde(rename = "mapy", default, deserialize_with = "string_like")]
    pub map_y: String,
    #[serde(rename = "modifiedtime", default, deserialize_with = "string_like")]
    pub modified_time: String,
}

impl From<PlaceItem> for PlaceSummary {
    fn from(item: PlaceItem) -> Self {
        PlaceSummary {
            content_id: item.content_id,
            title: item.title,
            content_type_id: item.content_type_id,
            area_code: item.area_code,
            addr1: item.addr1,
            addr2: non_empty(item.addr2),
            tel: non_empty(item.tel),
            first_image: non_empty(item.first_image),
            first_image2: non_empty(item.first_image2),
            map_x: item.map_x,
            map_y: item.map_y,
            modified_time: item.modified_time,
        }
    }
}

/// One entry from `detailCommon2`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetailItem {
    #[serde(flatten)]
    pub place: PlaceItem,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default, deserialize_with = "string_like")]
    pub zipcode: String,
}

impl From<DetailItem> for PlaceDetail {
    fn from(item: DetailItem) -> Self {
        PlaceDetail {
            summary: item.place.into(),
            overview: item.overview,
            homepage: non_empty(item.homepage),
            zipcode: non_empty(Some(item.zipcode)),
        }
    }
}

/// One entry from `detailPetTour2`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetItem {
    #[serde(rename = "contentid", default, deserialize_with = "string_like")]
    pub content_id: String,
    #[serde(default)]
    pub acmpy_type_cd: Option<String>,
    #[serde(default)]
    pub acmpy_psbl_cpam: Option<String>,
    #[serde(default)]
    pub acmpy_need_mtr: Option<String>,
    #[serde(default)]
    pub etc_acmpy_info: Option<String>,
    #[serde(default)]
    pub rela_poses_fclty: Option<String>,
    #[serde(default)]
    pub rela_frnsh_prdlst: Option<String>,
    #[serde(default)]
    pub rela_rntl_prdlst: Option<String>,
    #[serde(default)]
    pub rela_purc_prdlst: Option<String>,
}

impl From<PetItem> for PetInfo {
    fn from(item: PetItem) -> Self {
        PetInfo {
            content_id: item.content_id,
            acmpy_type_cd: non_empty(item.acmpy_type_cd),
            acmpy_psbl_cpam: non_empty(item.acmpy_psbl_cpam),
            acmpy_need_mtr: non_empty(item.acmpy_need_mtr),
            etc_acmpy_info: non_empty(item.etc_acmpy_info),
            rela_poses_fclty: non_empty(item.rela_poses_fclty),
            rela_frnsh_prdlst: non_empty(item.rela_frnsh_prdlst),
            rela_rntl_prdlst: non_empty(item.rela_rntl_prdlst),
            rela_purc_prdlst: non_empty(item.rela_purc_prdlst),
        }
    }
}
