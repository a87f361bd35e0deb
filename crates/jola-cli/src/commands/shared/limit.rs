/// Keep at most `limit` items, reporting how many were cut.
pub fn truncate_to<T>(items: &mut Vec<T>, limit: usize) -> usize {
    let total = items.len();
    items.truncate(limit);
    if total > limit {
        tracing::debug!(total, limit, "output truncated to limit");
    }
    total.saturating_sub(limit)
}
