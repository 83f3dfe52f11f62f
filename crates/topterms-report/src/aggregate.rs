//! Grouping of raw report entries into per-search-term output groups.
//!
//! The upstream report lists every entry for one `(searchTerm,
//! departmentName, searchFrequencyRank)` key consecutively, ordered by click
//! share. [`GroupAggregator`] relies on that contiguity: a key change closes
//! the active group. The invariant is not enforced — a key that reappears
//! after its group closed simply opens a fresh group (and yields a second
//! output row, as the reference pipeline does) — but the immediate A/B/A
//! pattern is detected and logged, since non-contiguous input means the
//! report was produced or concatenated incorrectly. Only the previously
//! closed key is remembered for that check: aggregator state must stay
//! constant-size no matter how many groups a report holds.

use topterms_core::{GroupKey, RankedProduct, TermGroup, TOP_PRODUCT_SLOTS};

use crate::types::RawSearchTermEntry;

/// Streaming aggregator holding at most one active group.
///
/// Accumulation is capped at [`TOP_PRODUCT_SLOTS`] products per group: the
/// output schema has exactly three slots, so later entries of a group can
/// never be observed downstream.
#[derive(Debug, Default)]
pub struct GroupAggregator {
    active: Option<TermGroup>,
    /// Key of the most recently closed group, for the contiguity check.
    last_closed: Option<GroupKey>,
}

impl GroupAggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes one entry; returns the previous group when `entry` starts a
    /// new one.
    pub fn push(&mut self, entry: RawSearchTermEntry) -> Option<TermGroup> {
        if let Some(group) = self.active.as_mut() {
            if group.key.search_term == entry.search_term
                && group.key.department == entry.department_name
                && group.key.search_frequency_rank == entry.search_frequency_rank
            {
                if group.products.len() < TOP_PRODUCT_SLOTS {
                    group.products.push(product_from(entry));
                }
                return None;
            }
        }

        let key = GroupKey {
            search_term: entry.search_term.clone(),
            department: entry.department_name.clone(),
            search_frequency_rank: entry.search_frequency_rank,
        };
        if self.last_closed.as_ref() == Some(&key) {
            tracing::warn!(
                search_term = %key.search_term,
                department = %key.department,
                rank = key.search_frequency_rank,
                "group key reappeared after its group closed; input is not contiguously grouped"
            );
        }

        let opened = TermGroup {
            key,
            products: vec![product_from(entry)],
        };
        let closed = self.active.replace(opened);
        if let Some(group) = &closed {
            self.last_closed = Some(group.key.clone());
        }
        closed
    }

    /// Closes the stream, yielding the final group if one is active.
    #[must_use]
    pub fn finish(mut self) -> Option<TermGroup> {
        self.active.take()
    }
}

fn product_from(entry: RawSearchTermEntry) -> RankedProduct {
    RankedProduct {
        asin: entry.clicked_asin,
        title: entry.clicked_item_name,
        click_share: entry.click_share,
        conversion_share: entry.conversion_share,
        click_share_rank: entry.click_share_rank,
    }
}
