//! Stable merge sort over a fallible comparison
//!
//! `slice::sort_by` cannot abort, and recent standard library sorts may panic
//! when a comparison stops being a total order, which is exactly what a
//! "pretend Equal after the first error" workaround produces. This sort
//! propagates the first comparison error instead and never observes a
//! partially sorted input.

use std::cmp::Ordering;

use relcoll_core::CollectionResult;

/// Sort `items` stably, stopping at the first comparison error
pub(crate) fn try_sort_by<T, F>(items: Vec<T>, compare: &mut F) -> CollectionResult<Vec<T>>
where
    F: FnMut(&T, &T) -> CollectionResult<Ordering> + ?Sized,
{
    if items.len() <= 1 {
        return Ok(items);
    }

    let mut left = items;
    let right = left.split_off(left.len() / 2);
    let left = try_sort_by(left, compare)?;
    let right = try_sort_by(right, compare)?;

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    while let (Some(l), Some(r)) = (left.peek(), right.peek()) {
        // Ties take from the left run to keep the sort stable
        let next = if compare(l, r)? == Ordering::Greater {
            right.next()
        } else {
            left.next()
        };
        merged.extend(next);
    }
    merged.extend(left);
    merged.extend(right);
    Ok(merged)
}
