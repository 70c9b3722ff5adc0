use std::ops::Range;

/// Splits `total` rows of the outer output dimension into at most
/// `task_count` contiguous bands of `total.div_ceil(task_count)` rows, the
/// last band possibly shorter. Bands tile `[0, total)` exactly once.
pub(crate) fn bands(total: usize, task_count: usize) -> Vec<Range<usize>> {
    let chunk = total.div_ceil(task_count.max(1));
    (0..task_count.max(1))
        .map(|t| (t * chunk).min(total)..((t + 1) * chunk).min(total))
        .filter(|band| !band.is_empty())
        .collect()
}
