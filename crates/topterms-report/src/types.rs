//! Wire types for entries of the `dataByDepartmentAndSearchTerm` array.
//!
//! ## Observed shape from downloaded Top Search Terms reports
//!
//! ### Share values
//! `clickShare` and `conversionShare` arrive as **numeric strings** (e.g.
//! `"12.5"`) in most report weeks, but some exports emit plain JSON numbers.
//! Both forms are accepted; a missing, null, or unparseable value coerces to
//! `0.0` rather than failing the record — a blank share must never abort a
//! multi-hour conversion.
//!
//! ### `clickShareRank`
//! A plain integer, 1-based within the search-term group. Absent in a few
//! older report weeks; defaults to `0`.
//!
//! ### Field names
//! The report is pretty-printed with camelCase keys and ` : ` separators.
//! Key casing is structural (`rename_all = "camelCase"`); the whitespace is
//! not — element extraction tracks JSON structure, not literal spacing.

use serde::{Deserialize, Deserializer};

/// One raw entry of the report's search-term array.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSearchTermEntry {
    pub search_term: String,
    pub department_name: String,
    pub search_frequency_rank: u64,
    pub clicked_asin: String,
    pub clicked_item_name: String,
    #[serde(default, deserialize_with = "de_share")]
    pub click_share: f64,
    #[serde(default, deserialize_with = "de_share")]
    pub conversion_share: f64,
    #[serde(default)]
    pub click_share_rank: u32,
}

/// Accepts a share as a JSON number, a numeric string, or null.
///
/// Unparseable strings coerce to `0.0` — by contract a bad share value is
/// dropped, not an error (only structural failures skip the whole record).
fn de_share<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ShareRepr {
        Number(f64),
        Text(String),
    }

    let repr = Option::<ShareRepr>::deserialize(deserializer)?;
    Ok(match repr {
        Some(ShareRepr::Number(n)) => n,
        Some(ShareRepr::Text(s)) => s.trim().parse().unwrap_or(0.0),
        None => 0.0,
    })
}
