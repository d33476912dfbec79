//! Client-facing orderings for place lists.
//!
//! Both orderings are pure: they take a slice and return a new `Vec`,
//! leaving the input untouched. `Vec::sort_by` is stable, so records with
//! equal keys keep their input order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::place::PlaceSummary;

/// Timestamp used when a record has no `modified_time`.
const MISSING_TIME: &str = "0";

/// Available list orderings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOption {
    /// Most recently modified first.
    #[default]
    Latest,
    /// Title, ascending.
    Name,
}

impl SortOption {
    /// Parse a query-string value. Anything unrecognised means `Latest`.
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("name") => SortOption::Name,
            _ => SortOption::Latest,
        }
    }
}

/// Sort by the given option.
pub fn sort_places(places: &[PlaceSummary], option: SortOption) -> Vec<PlaceSummary> {
    match option {
        SortOption::Latest => sort_by_latest(places),
        SortOption::Name => sort_by_name(places),
    }
}

/// Descending by `modified_time`, ties ascending by `content_id`.
pub fn sort_by_latest(places: &[PlaceSummary]) -> Vec<PlaceSummary> {
    let mut sorted = places.to_vec();
    sorted.sort_by(|a, b| {
        time_key(b)
            .cmp(time_key(a))
            .then_with(|| a.content_id.cmp(&b.content_id))
    });
    sorted
}

/// Ascending by title under [`collation_cmp`].
pub fn sort_by_name(places: &[PlaceSummary]) -> Vec<PlaceSummary> {
    let mut sorted = places.to_vec();
    sorted.sort_by(|a, b| collation_cmp(&a.title, &b.title));
    sorted
}

fn time_key(place: &PlaceSummary) -> &str {
    if place.modified_time.is_empty() {
        MISSING_TIME
    } else {
        &place.modified_time
    }
}

// ---------------------------------------------------------------------------
// Collation
// ---------------------------------------------------------------------------

/// Compare two titles for display ordering.
///
/// - Case-insensitive.
/// - Full-width ASCII forms compare equal to their half-width counterparts.
/// - Runs of ASCII digits compare by numeric value (`"코스 2" < "코스 10"`).
/// - Hangul syllables compare by code point, which is dictionary order.
pub fn collation_cmp(a: &str, b: &str) -> Ordering {
    let a = fold(a);
    let b = fold(b);
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        if a[i].is_ascii_digit() && b[j].is_ascii_digit() {
            let end_a = digit_run_end(&a, i);
            let end_b = digit_run_end(&b, j);
            let ord = compare_numeric(&a[i..end_a], &b[j..end_b]);
            if ord != Ordering::Equal {
                return ord;
            }
            i = end_a;
            j = end_b;
            continue;
        }

        match a[i].cmp(&b[j]) {
            Ordering::Equal => {
                i += 1;
                j += 1;
            }
            other => return other,
        }
    }

    (a.len() - i).cmp(&(b.len() - j))
}

fn fold(s: &str) -> Vec<char> {
    s.chars().map(fold_width).flat_map(char::to_lowercase).collect()
}

fn fold_width(c: char) -> char {
    match c {
        // Full-width ASCII variants.
        '\u{FF01}'..='\u{FF5E}' => char::from_u32(c as u32 - 0xFEE0).unwrap_or(c),
        '\u{3000}' => ' ',
        _ => c,
    }
}

fn digit_run_end(chars: &[char], start: usize) -> usize {
    chars[start..]
        .iter()
        .position(|c| !c.is_ascii_digit())
        .map_or(chars.len(), |offset| start + offset)
}

fn compare_numeric(a: &[char], b: &[char]) -> Ordering {
    let a = strip_leading_zeros(a);
    let b = strip_leading_zeros(b);
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn strip_leading_zeros(digits: &[char]) -> &[char] {
    let first = digits.iter().position(|&c| c != '0').unwrap_or(digits.len());
    &digits[first..]
}
