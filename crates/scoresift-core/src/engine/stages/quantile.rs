use crate::core::models::record::ScoreRecord;
use crate::core::utils::ordering::sort_ascending_by;

/// Number of records kept from a pool of `pool_size`: `ceil(fraction * pool_size)`,
/// with the product taken in `f64`.
pub fn quantile_size(pool_size: usize, fraction: f64) -> usize {
    let size = (fraction * pool_size as f64).ceil();
    (size as usize).min(pool_size)
}

/// Keeps the best `fraction` of `pool` by ascending `column`, ties in prior order.
pub fn apply<'a>(
    mut pool: Vec<&'a ScoreRecord>,
    column: &str,
    fraction: f64,
) -> Vec<&'a ScoreRecord> {
    let keep = quantile_size(pool.len(), fraction);
    sort_ascending_by(&mut pool, column);
    pool.truncate(keep);
    pool
}
