//! Region (`areaCode`) and place-type (`contentTypeId`) code tables.
//!
//! These are the enumerations the tourism API filters on and the grouping
//! keys of the statistics dashboard.

use serde::Serialize;

/// Display name used for any code outside the known tables.
pub const UNKNOWN_NAME: &str = "기타";

/// Region codes in the order the dashboard queries them.
pub const AREA_CODES: &[&str] = &[
    "1", "2", "3", "4", "5", "6", "7", "8", "31", "32", "33", "34", "35", "36", "37", "38", "39",
];

/// Place-type codes in the order the dashboard queries them.
pub const CONTENT_TYPE_IDS: &[&str] = &["12", "14", "15", "25", "28", "32", "38", "39"];

/// A `(code, name)` pair for filter dropdowns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeOption {
    pub code: &'static str,
    pub name: &'static str,
}

/// Resolve a region code to its display name.
pub fn area_name(code: &str) -> &'static str {
    match code {
        "1" => "서울",
        "2" => "인천",
        "3" => "대전",
        "4" => "대구",
        "5" => "광주",
        "6" => "부산",
        "7" => "울산",
        "8" => "세종",
        "31" => "경기",
        "32" => "강원",
        "33" => "충북",
        "34" => "충남",
        "35" => "경북",
        "36" => "경남",
        "37" => "전북",
        "38" => "전남",
        "39" => "제주",
        _ => UNKNOWN_NAME,
    }
}

/// Resolve a place-type code to its display name.
pub fn content_type_name(code: &str) -> &'static str {
    match code {
        "12" => "관광지",
        "14" => "문화시설",
        "15" => "축제공연행사",
        "25" => "여행코스",
        "28" => "레포츠",
        "32" => "숙박",
        "38" => "쇼핑",
        "39" => "음식점",
        _ => UNKNOWN_NAME,
    }
}

pub fn is_known_area_code(code: &str) -> bool {
    AREA_CODES.contains(&code)
}

pub fn is_known_content_type_id(code: &str) -> bool {
    CONTENT_TYPE_IDS.contains(&code)
}

/// Region filter options, in table order.
pub fn area_options() -> Vec<CodeOption> {
    AREA_CODES
        .iter()
        .map(|&code| CodeOption {
            code,
            name: area_name(code),
        })
        .collect()
}

/// Place-type filter options, in table order.
pub fn content_type_options() -> Vec<CodeOption> {
    CONTENT_TYPE_IDS
        .iter()
        .map(|&code| CodeOption {
            code,
            name: content_type_name(code),
        })
        .collect()
}
