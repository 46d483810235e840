//! Ordering & Pin Engine
//!
//! Memo placement inside a category (full renumber strategy), pinning, and
//! the display projections for memos and categories.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::domain::{Category, DefaultBucket, DomainError, DomainResult, Memo};

/// Fail with `UnknownCategory` unless `category_id` exists
pub fn check_category(categories: &[Category], category_id: &str) -> DomainResult<()> {
    if categories.iter().any(|c| c.id == category_id) {
        Ok(())
    } else {
        Err(DomainError::UnknownCategory(category_id.to_string()))
    }
}

/// Order for a memo placed at the end of the normal (non-pinned) sequence.
///
/// `exclude` keeps a memo from counting itself. When the last memo already
/// sits at `i64::MAX` the sequence is renumbered 1..N first.
pub fn next_order(memos: &mut [Memo], category_id: &str, exclude: Option<&str>) -> i64 {
    let last = memos
        .iter()
        .filter(|m| m.is_in(category_id) && !m.pinned)
        .filter(|m| exclude != Some(m.id.as_str()))
        .map(|m| m.order)
        .max()
        .unwrap_or(0);

    match last.checked_add(1) {
        Some(order) => order,
        None => {
            let count = renumber(memos, category_id, exclude);
            log::warn!("Order overflow in {}, renumbered {} memos", category_id, count);
            count as i64 + 1
        }
    }
}

/// Rewrite the normal sequence of a category as 1..N in display order
fn renumber(memos: &mut [Memo], category_id: &str, exclude: Option<&str>) -> usize {
    let mut sequence: Vec<usize> = (0..memos.len())
        .filter(|&i| memos[i].is_in(category_id) && !memos[i].pinned)
        .filter(|&i| exclude != Some(memos[i].id.as_str()))
        .collect();
    sequence.sort_by(|&a, &b| display_cmp(&memos[a], &memos[b]));

    for (position, &i) in sequence.iter().enumerate() {
        memos[i].order = position as i64 + 1;
    }
    sequence.len()
}

/// Place `memo` at the end of `category_id`, unpinned
pub fn append(
    memos: &mut [Memo],
    categories: &[Category],
    mut memo: Memo,
    category_id: &str,
) -> DomainResult<Memo> {
    check_category(categories, category_id)?;

    memo.order = next_order(memos, category_id, Some(&memo.id));
    memo.category_id = category_id.to_string();
    memo.pinned = false;
    memo.pinned_at = None;
    Ok(memo)
}

/// Renumber the normal sequence of a category.
///
/// Ids in `ordered_ids` get 1, 2, 3... in sequence; non-pinned siblings that
/// were not named follow in their current display order. Pinned, unknown,
/// foreign and repeated ids are skipped. Returns how many ids were placed,
/// 0 meaning nothing changed.
pub fn reorder(
    memos: &mut [Memo],
    categories: &[Category],
    category_id: &str,
    ordered_ids: &[String],
) -> DomainResult<usize> {
    check_category(categories, category_id)?;

    let mut placed: Vec<String> = Vec::with_capacity(ordered_ids.len());
    let mut seen = HashSet::new();
    for id in ordered_ids {
        let eligible = memos
            .iter()
            .any(|m| m.id == *id && m.is_in(category_id) && !m.pinned);
        if eligible && seen.insert(id.as_str()) {
            placed.push(id.clone());
        }
    }

    if placed.is_empty() {
        return Ok(0);
    }

    let mut rest: Vec<&Memo> = memos
        .iter()
        .filter(|m| m.is_in(category_id) && !m.pinned && !seen.contains(m.id.as_str()))
        .collect();
    rest.sort_by(|a, b| display_cmp(a, b));
    let sequence: Vec<String> = placed
        .iter()
        .cloned()
        .chain(rest.into_iter().map(|m| m.id.clone()))
        .collect();

    for (index, id) in sequence.iter().enumerate() {
        if let Some(memo) = memos.iter_mut().find(|m| m.id == *id) {
            memo.order = index as i64 + 1;
        }
    }

    Ok(placed.len())
}

/// Flip the pin state of a memo.
///
/// Returns the updated memo, or `None` for an unknown id. Unpinning puts
/// the memo at the end of the normal sequence.
pub fn toggle_pin(memos: &mut [Memo], memo_id: &str, now: i64) -> Option<Memo> {
    let index = memos.iter().position(|m| m.id == memo_id)?;

    if memos[index].pinned {
        let category_id = memos[index].category_id.clone();
        let order = next_order(memos, &category_id, Some(memo_id));
        let memo = &mut memos[index];
        memo.pinned = false;
        memo.pinned_at = None;
        memo.order = order;
    } else {
        let memo = &mut memos[index];
        memo.pinned = true;
        memo.pinned_at = Some(now);
    }

    Some(memos[index].clone())
}

/// Display comparator for memos of one category
pub fn display_cmp(a: &Memo, b: &Memo) -> Ordering {
    match (a.pinned, b.pinned) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (true, true) => a
            .pinned_at
            .cmp(&b.pinned_at)
            .then_with(|| a.id.cmp(&b.id)),
        (false, false) => a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)),
    }
}

/// Memos of `category_id` in display order
pub fn sort_for_display<'a>(memos: &'a [Memo], category_id: &str) -> Vec<&'a Memo> {
    let mut out: Vec<&Memo> = memos.iter().filter(|m| m.is_in(category_id)).collect();
    out.sort_by(|a, b| display_cmp(a, b));
    out
}

/// Categories in display order: the bucket first, then by `order`
pub fn sort_categories<'a>(categories: &'a [Category], bucket: &DefaultBucket) -> Vec<&'a Category> {
    let mut out: Vec<&Category> = categories.iter().collect();
    out.sort_by(|a, b| {
        bucket
            .is_bucket(&b.id)
            .cmp(&bucket.is_bucket(&a.id))
            .then_with(|| a.order.cmp(&b.order))
            .then_with(|| a.id.cmp(&b.id))
    });
    out
}

pub fn can_delete(memo: &Memo) -> bool {
    !memo.pinned
}
