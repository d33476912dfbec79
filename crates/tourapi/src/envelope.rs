//! The API's response envelope and its normalization.
//!
//! Every endpoint answers with
//!
//! ```json
//! { "response": {
//!     "header": { "resultCode": "0000", "resultMsg": "OK" },
//!     "body": { "items": { "item": [ ... ] }, "numOfRows": 10, "pageNo": 1, "totalCount": 42 } } }
//! ```
//!
//! but `items` is not stable: a single result arrives as an object rather
//! than a one-element array, an empty result arrives as `""` or is left out,
//! and the numeric body fields are sometimes quoted. The types here absorb
//! all of that so callers only ever see a `Vec<T>` and plain integers.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::error::TourApiError;

/// Result code the API uses for success.
pub const SUCCESS_CODE: &str = "0000";

#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub response: ResponseBody<T>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseBody<T> {
    pub header: Header,
    #[serde(default = "none")]
    pub body: Option<Body<T>>,
}

fn none<T>() -> Option<T> {
    None
}

#[derive(Debug, Deserialize)]
pub struct Header {
    #[serde(rename = "resultCode")]
    pub result_code: String,
    #[serde(rename = "resultMsg", default)]
    pub result_msg: String,
}

#[derive(Debug, Deserialize)]
pub struct Body<T> {
    #[serde(default = "ItemsField::default")]
    pub items: ItemsField<T>,
    #[serde(rename = "numOfRows", default, deserialize_with = "number_or_string")]
    pub num_of_rows: u32,
    #[serde(rename = "pageNo", default, deserialize_with = "number_or_string")]
    pub page_no: u32,
    #[serde(rename = "totalCount", default, deserialize_with = "number_or_string")]
    pub total_count: u64,
}

/// Every shape the `items` field has been seen in.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ItemsField<T> {
    Wrapped {
        #[serde(default = "none")]
        item: Option<OneOrMany<T>>,
    },
    /// `""` when there are no results.
    Blank(String),
    /// `null`, or the field was left out.
    Absent,
}

impl<T> Default for ItemsField<T> {
    fn default() -> Self {
        ItemsField::Absent
    }
}

impl<T> ItemsField<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ItemsField::Wrapped { item: Some(items) } => items.into_vec(),
            ItemsField::Wrapped { item: None } | ItemsField::Blank(_) | ItemsField::Absent => {
                Vec::new()
            }
        }
    }
}

/// A lone object or an array of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

impl<T> Envelope<T> {
    /// Check the result code and unwrap the body.
    ///
    /// A success header with no body is treated as an empty page.
    pub fn into_body(self) -> Result<Body<T>, TourApiError> {
        let ResponseBody { header, body } = self.response;
        if header.result_code != SUCCESS_CODE {
            return Err(TourApiError::Upstream {
                code: header.result_code,
                message: header.result_msg,
            });
        }
        Ok(body.unwrap_or_else(|| Body {
            items: ItemsField::Absent,
            num_of_rows: 0,
            page_no: 0,
            total_count: 0,
        }))
    }
}

// ---------------------------------------------------------------------------
// Lenient scalar deserializers
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString<N> {
    Number(N),
    String(String),
}

/// Accept `12`, `"12"`, or `""` (as zero).
pub fn number_or_string<'de, D, N>(deserializer: D) -> Result<N, D::Error>
where
    D: Deserializer<'de>,
    N: Deserialize<'de> + FromStr + Default,
    N::Err: Display,
{
    match Option::<NumberOrString<N>>::deserialize(deserializer)? {
        None => Ok(N::default()),
        Some(NumberOrString::Number(n)) => Ok(n),
        Some(NumberOrString::String(s)) if s.trim().is_empty() => Ok(N::default()),
        Some(NumberOrString::String(s)) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringLike {
    String(String),
    Integer(i64),
    Float(f64),
}

/// Accept a string or a bare number for fields that are textual
/// identifiers or coordinates. `null` becomes the empty string.
pub fn string_like<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<StringLike>::deserialize(deserializer)? {
        None => String::new(),
        Some(StringLike::String(s)) => s,
        Some(StringLike::Integer(n)) => n.to_string(),
        Some(StringLike::Float(f)) => f.to_string(),
    })
}
