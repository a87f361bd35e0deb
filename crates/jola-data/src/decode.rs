//! Decode JSON rows into fixed record types.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode every row of `relation` into `T`.
///
/// A row that does not fit the record (missing key, wrong type) is logged and
/// skipped; the rest of the pass continues.
pub fn decode_rows<T: DeserializeOwned>(relation: &str, rows: Vec<Value>) -> Vec<T> {
    let total = rows.len();
    let decoded: Vec<T> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value(row) {
            Ok(record) => Some(record),
            Err(error) => {
                tracing::warn!(%relation, index, %error, "skipping malformed row");
                None
            }
        })
        .collect();
    tracing::debug!(%relation, total, decoded = decoded.len(), "decoded rows");
    decoded
}
