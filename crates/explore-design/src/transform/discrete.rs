//! Step-function transforms for integer, boolean and categorical domains.

/// Uniform over `min..=max`; each integer owns an equal slice of `[0, 1)`.
/// The span is computed in `i128`, so the full `i64` range is accepted.
pub fn discrete_uniform(min: i64, max: i64, u: f64) -> i64 {
    let span = (i128::from(max) - i128::from(min) + 1) as f64;
    let offset = (u * span).floor() as i128;
    let value = (i128::from(min) + offset).min(i128::from(max));
    i64::try_from(value).unwrap_or(max)
}

pub fn binary(u: f64) -> bool {
    u >= 0.5
}

/// Index of the level owning `u` among `n_levels` equal slices.
pub fn level_index(n_levels: usize, u: f64) -> usize {
    ((u * n_levels as f64).floor() as usize).min(n_levels.saturating_sub(1))
}
