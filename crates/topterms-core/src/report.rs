//! Domain types for converted Top Search Terms report rows.
//!
//! A report groups its entries by `(searchTerm, departmentName,
//! searchFrequencyRank)`; each contiguous run of entries sharing that key
//! flattens into one [`SearchTermRow`] carrying up to [`TOP_PRODUCT_SLOTS`]
//! clicked products.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::Serialize;

/// Number of ranked product slots in an output row.
///
/// The downstream table schema has exactly three numbered column groups, so
/// accumulation beyond three products per group is never observable.
pub const TOP_PRODUCT_SLOTS: usize = 3;

/// Composite identity of one output row's source records.
///
/// All report entries sharing a `GroupKey` are expected to appear
/// consecutively in the input array (the contiguity invariant of the
/// upstream report generator).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub search_term: String,
    pub department: String,
    pub search_frequency_rank: u64,
}

/// One clicked product accumulated for a search-term group.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedProduct {
    pub asin: String,
    pub title: String,
    pub click_share: f64,
    pub conversion_share: f64,
    /// 1-based rank by click share within the group, as reported upstream.
    pub click_share_rank: u32,
}

/// A closed group: its key plus the products that arrived for it, in input
/// order, capped at [`TOP_PRODUCT_SLOTS`]. Always holds at least one product.
#[derive(Debug, Clone, PartialEq)]
pub struct TermGroup {
    pub key: GroupKey,
    pub products: Vec<RankedProduct>,
}

/// Static provenance attached to every output row of one conversion run.
#[derive(Debug, Clone)]
pub struct ReportMeta {
    /// Amazon report document ID (e.g. `"1520525020276"`).
    pub report_id: String,
    /// Marketplace the report covers (e.g. `"ATVPDKIKX0DER"` for amazon.com).
    pub marketplace_id: String,
    pub week_start_date: NaiveDate,
    pub week_end_date: NaiveDate,
}

/// One flattened output row, serialized as a single NDJSON line.
///
/// Field declaration order here is the JSON key order. Downstream bulk-load
/// jobs match this schema by name, so neither the names nor the
/// empty-string/zero placeholders for absent slots may change.
#[derive(Debug, Clone, Serialize)]
pub struct SearchTermRow {
    pub search_term: String,
    pub search_frequency_rank: u64,
    pub department: String,
    pub clicked_asin_1: String,
    pub product_title_1: String,
    pub click_share_1: f64,
    pub conversion_share_1: f64,
    pub clicked_asin_2: String,
    pub product_title_2: String,
    pub click_share_2: f64,
    pub conversion_share_2: f64,
    pub clicked_asin_3: String,
    pub product_title_3: String,
    pub click_share_3: f64,
    pub conversion_share_3: f64,
    pub total_click_share: f64,
    pub total_conversion_share: f64,
    pub report_id: String,
    pub marketplace_id: String,
    pub week_start_date: NaiveDate,
    pub week_end_date: NaiveDate,
    /// RFC 3339 UTC timestamp with millisecond precision.
    pub ingested_at: String,
}

impl SearchTermRow {
    /// Flattens a closed [`TermGroup`] into an output row.
    ///
    /// Slots beyond the accumulated products are filled with empty strings
    /// and zeros; the totals sum whatever slots are present.
    #[must_use]
    pub fn from_group(group: &TermGroup, meta: &ReportMeta, ingested_at: DateTime<Utc>) -> Self {
        let slot = |n: usize| group.products.get(n);
        let asin = |n: usize| slot(n).map_or_else(String::new, |p| p.asin.clone());
        let title = |n: usize| slot(n).map_or_else(String::new, |p| p.title.clone());
        let click = |n: usize| slot(n).map_or(0.0, |p| p.click_share);
        let conversion = |n: usize| slot(n).map_or(0.0, |p| p.conversion_share);

        let total_click_share = group.products.iter().map(|p| p.click_share).sum();
        let total_conversion_share = group.products.iter().map(|p| p.conversion_share).sum();

        Self {
            search_term: group.key.search_term.clone(),
            search_frequency_rank: group.key.search_frequency_rank,
            department: group.key.department.clone(),
            clicked_asin_1: asin(0),
            product_title_1: title(0),
            click_share_1: click(0),
            conversion_share_1: conversion(0),
            clicked_asin_2: asin(1),
            product_title_2: title(1),
            click_share_2: click(1),
            conversion_share_2: conversion(1),
            clicked_asin_3: asin(2),
            product_title_3: title(2),
            click_share_3: click(2),
            conversion_share_3: conversion(2),
            total_click_share,
            total_conversion_share,
            report_id: meta.report_id.clone(),
            marketplace_id: meta.marketplace_id.clone(),
            week_start_date: meta.week_start_date,
            week_end_date: meta.week_end_date,
            ingested_at: ingested_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
