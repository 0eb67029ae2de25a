use crate::core::models::record::ScoreRecord;
use crate::core::utils::ordering::sort_ascending_by;

/// Orders `pool` best-first by `criterion` and keeps at most `top_k` records.
pub fn apply<'a>(
    mut pool: Vec<&'a ScoreRecord>,
    criterion: &str,
    top_k: usize,
) -> Vec<&'a ScoreRecord> {
    sort_ascending_by(&mut pool, criterion);
    pool.truncate(top_k);
    pool
}
