/// Folds a logical index into a data-store position using true (Euclidean) modulo.
///
/// Negative indexes wrap from the end: with `count = 3`, `-1` folds to `2` and `4` to `1`.
/// Returns `None` when `count == 0`.
pub fn fold_index(index: i64, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    Some(index.rem_euclid(count as i64) as usize)
}

/// Re-indexes a logical index after the data store changed length.
///
/// The index is split into its wrap `q` and folded position `r` (`index = q * old + r`); `r` is
/// mapped to the record's new position and the result keeps the same wrap under the new length.
/// The mapping is injective and order-preserving, so a sorted, duplicate-free visible set stays
/// sorted and duplicate-free.
pub(crate) fn remap_index(
    index: i64,
    old_count: usize,
    new_count: usize,
    move_position: impl FnOnce(usize) -> usize,
) -> i64 {
    debug_assert!(old_count > 0, "remap_index: empty data store");
    let old = old_count as i64;
    let wrap = index.div_euclid(old);
    let position = index.rem_euclid(old) as usize;
    wrap * new_count as i64 + move_position(position) as i64
}
