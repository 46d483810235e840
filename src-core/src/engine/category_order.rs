//! Category Reorder
//!
//! Adjacent moves by swapping `order` values with the neighbour. The default
//! bucket is pinned to the top and never takes part in a swap.

use crate::domain::{Category, DefaultBucket, DomainError, DomainResult};

/// Reorder strategies used across the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderStrategy {
    /// Exchange `order` with the adjacent sibling (categories)
    SwapAdjacent,
    /// Rewrite the whole sequence as 1..N (memos)
    FullRenumber,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

pub fn move_up(categories: &mut [Category], id: &str, bucket: &DefaultBucket) -> DomainResult<bool> {
    swap_with_neighbour(categories, id, bucket, Direction::Up)
}

pub fn move_down(categories: &mut [Category], id: &str, bucket: &DefaultBucket) -> DomainResult<bool> {
    swap_with_neighbour(categories, id, bucket, Direction::Down)
}

/// Non-bucket categories sorted by `order`, as indices into `categories`
fn sorted_indices(categories: &[Category], bucket: &DefaultBucket) -> Vec<usize> {
    let mut sorted: Vec<usize> = (0..categories.len())
        .filter(|&i| !bucket.is_bucket(&categories[i].id))
        .collect();
    sorted.sort_by(|&a, &b| {
        categories[a]
            .order
            .cmp(&categories[b].order)
            .then_with(|| categories[a].id.cmp(&categories[b].id))
    });
    sorted
}

/// Order for a category placed after every other one.
///
/// Falls back to renumbering the non-bucket categories 1..N when the last
/// order is `i64::MAX`.
pub fn append_order(categories: &mut [Category], bucket: &DefaultBucket) -> i64 {
    let last = categories.iter().map(|c| c.order).max().unwrap_or(0).max(0);
    if let Some(order) = last.checked_add(1) {
        return order;
    }

    let sorted = sorted_indices(categories, bucket);
    for (position, &i) in sorted.iter().enumerate() {
        categories[i].order = position as i64 + 1;
    }
    log::warn!("Category order overflow, renumbered {} categories", sorted.len());
    sorted.len() as i64 + 1
}

/// Swap `order` with the neighbour in `direction`.
///
/// Returns false when there is nothing to swap with (top, bottom, bucket).
pub fn swap_with_neighbour(
    categories: &mut [Category],
    id: &str,
    bucket: &DefaultBucket,
    direction: Direction,
) -> DomainResult<bool> {
    if !categories.iter().any(|c| c.id == id) {
        return Err(DomainError::UnknownCategory(id.to_string()));
    }
    if bucket.is_bucket(id) {
        return Ok(false);
    }

    let sorted = sorted_indices(categories, bucket);
    let Some(pos) = sorted.iter().position(|&i| categories[i].id == id) else {
        return Ok(false);
    };
    let neighbour = match direction {
        Direction::Up if pos > 0 => sorted[pos - 1],
        Direction::Down if pos + 1 < sorted.len() => sorted[pos + 1],
        _ => return Ok(false),
    };
    let current = sorted[pos];

    let order = categories[current].order;
    categories[current].order = categories[neighbour].order;
    categories[neighbour].order = order;

    log::debug!(
        "Moved category {} {:?} past {} ({:?})",
        id,
        direction,
        categories[neighbour].id,
        ReorderStrategy::SwapAdjacent
    );
    Ok(true)
}
