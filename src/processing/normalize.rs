//! Sorting, merging and overlap detection for range tables.
//!
//! Tables are built in input order and may overlap. A consumer doing binary
//! search over `(start, end)` pairs needs them sorted and disjoint, which
//! [`normalize_ranges`] provides on request.

use crate::models::{AnnotatedEntry, Range};
use itertools::Itertools;

/// Sort by `(start, end)` and merge ranges that overlap or touch.
///
/// A merged entry's annotation lists every contributing CIDR, comma separated,
/// in sorted order.
pub fn normalize_ranges(entries: Vec<AnnotatedEntry>) -> Vec<AnnotatedEntry> {
    let before = entries.len();
    let mut merged: Vec<AnnotatedEntry> = Vec::with_capacity(before);

    for entry in entries
        .into_iter()
        .sorted_by_key(|e| (e.range.start, e.range.end))
    {
        match merged.last_mut() {
            // u64 so a range ending at 255.255.255.255 does not overflow
            Some(prev) if entry.range.start as u64 <= prev.range.end as u64 + 1 => {
                prev.range.end = prev.range.end.max(entry.range.end);
                prev.cidr.push(',');
                prev.cidr.push_str(&entry.cidr);
            }
            _ => merged.push(entry),
        }
    }

    log::info!("Normalized {} entries into {} ranges", before, merged.len());
    merged
}

/// Indices of overlapping entries, as `(covering, covered)` pairs.
///
/// Entries are visited in `(start, end)` order; each entry that starts inside
/// an earlier one is paired with the earlier entry reaching furthest.
pub fn find_overlaps(entries: &[AnnotatedEntry]) -> Vec<(usize, usize)> {
    let mut overlaps = Vec::new();
    let mut reach: Option<(usize, Range)> = None;

    for (i, entry) in entries
        .iter()
        .enumerate()
        .sorted_by_key(|(i, e)| (e.range.start, e.range.end, *i))
    {
        match reach {
            Some((j, widest)) if widest.overlaps(&entry.range) => {
                overlaps.push((j, i));
                if entry.range.end > widest.end {
                    reach = Some((i, entry.range));
                }
            }
            _ => reach = Some((i, entry.range)),
        }
    }

    overlaps
}

/// Warn about overlapping entries, naming the CIDRs involved.
pub fn log_overlaps(entries: &[AnnotatedEntry], overlaps: &[(usize, usize)]) {
    if overlaps.is_empty() {
        log::info!("No overlapping ranges found.");
        return;
    }

    log::warn!(
        "Found {} overlapping range(s); a binary search lookup needs a normalized table:",
        overlaps.len()
    );
    for (a, b) in overlaps {
        log::warn!("  {} overlaps {}", entries[*a].cidr, entries[*b].cidr);
    }
    log::debug!(
        "Overlapping CIDRs: {}",
        overlaps
            .iter()
            .map(|(_, b)| entries[*b].cidr.as_str())
            .join(" ")
    );
}
