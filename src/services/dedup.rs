//! Collapses a fetched pool to unique movie identities.

use std::collections::HashSet;

use crate::models::MovieRecord;

/// Keeps the first occurrence of each movie id, in input order.
///
/// Records without an id are dropped; they cannot be deduplicated or
/// referenced downstream.
pub fn dedupe_by_id(records: Vec<MovieRecord>) -> Vec<MovieRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| match record.id {
            Some(id) => seen.insert(id),
            None => false,
        })
        .collect()
}
