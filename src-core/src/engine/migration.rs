//! Migration Normalizer
//!
//! Turns raw (possibly legacy) records into the normalized shape the ordering
//! engine expects. Runs at load and after every restore; nothing else in the
//! crate inspects optional record fields.

use std::collections::HashSet;
use std::fmt;

use crate::domain::{palette_color, title_of, Category, DefaultBucket, Memo, RawCategory, RawMemo};

/// What the normalizer had to change.
///
/// Empty for already-normalized input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub colors_assigned: usize,
    pub category_orders_assigned: usize,
    pub timestamps_backfilled: usize,
    pub bucket_created: bool,
    pub bucket_repaired: bool,
    pub memo_orders_assigned: usize,
    pub titles_backfilled: usize,
    pub pins_backfilled: usize,
    pub stale_pins_cleared: usize,
    pub orphans_reassigned: usize,
    pub records_dropped: usize,
}

impl MigrationReport {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for MigrationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "colors={} category_orders={} timestamps={} bucket_created={} bucket_repaired={} memo_orders={} titles={} pins={} stale_pins={} orphans={} dropped={}",
            self.colors_assigned,
            self.category_orders_assigned,
            self.timestamps_backfilled,
            self.bucket_created,
            self.bucket_repaired,
            self.memo_orders_assigned,
            self.titles_backfilled,
            self.pins_backfilled,
            self.stale_pins_cleared,
            self.orphans_reassigned,
            self.records_dropped,
        )
    }
}

/// Normalizer output
#[derive(Debug, Clone)]
pub struct Normalized {
    pub categories: Vec<Category>,
    pub memos: Vec<Memo>,
    pub report: MigrationReport,
}

/// Normalize raw collections.
///
/// `now` stamps a default bucket that has to be created.
pub fn normalize(
    raw_categories: Vec<RawCategory>,
    raw_memos: Vec<RawMemo>,
    bucket: &DefaultBucket,
    now: i64,
) -> Normalized {
    let mut report = MigrationReport::default();
    let mut categories = normalize_categories(raw_categories, bucket, &mut report);

    if !categories.iter().any(|c| bucket.is_bucket(&c.id)) {
        categories.insert(0, bucket.to_category(now));
        report.bucket_created = true;
    }

    let memos = normalize_memos(raw_memos, &categories, bucket, &mut report);

    Normalized {
        categories,
        memos,
        report,
    }
}

/// Re-run the normalizer over already-typed collections
pub fn renormalize(categories: &[Category], memos: &[Memo], bucket: &DefaultBucket, now: i64) -> Normalized {
    normalize(
        categories.iter().cloned().map(RawCategory::from).collect(),
        memos.iter().cloned().map(RawMemo::from).collect(),
        bucket,
        now,
    )
}

fn normalize_categories(
    raw_categories: Vec<RawCategory>,
    bucket: &DefaultBucket,
    report: &mut MigrationReport,
) -> Vec<Category> {
    let mut seen = HashSet::new();
    let mut categories = Vec::with_capacity(raw_categories.len() + 1);

    for (index, raw) in raw_categories.into_iter().enumerate() {
        if raw.id.is_empty() || !seen.insert(raw.id.clone()) {
            report.records_dropped += 1;
            continue;
        }
        let is_bucket = bucket.is_bucket(&raw.id);

        let created_at = raw.created_at.unwrap_or_else(|| {
            report.timestamps_backfilled += 1;
            index as i64
        });

        let color = if is_bucket {
            if raw.color.as_deref() != Some(bucket.color.as_str()) {
                report.bucket_repaired = true;
            }
            bucket.color.clone()
        } else {
            match raw.color.filter(|c| !c.is_empty()) {
                Some(color) => color,
                None => {
                    report.colors_assigned += 1;
                    palette_color(index).to_string()
                }
            }
        };

        let order = match raw.order {
            Some(order) => order,
            None if is_bucket => {
                report.bucket_repaired = true;
                0
            }
            None => {
                report.category_orders_assigned += 1;
                created_at
            }
        };

        let name = if is_bucket && raw.name.trim().is_empty() {
            report.bucket_repaired = true;
            bucket.name.clone()
        } else {
            raw.name
        };

        categories.push(Category::new(raw.id, name, color, order, created_at));
    }

    categories
}

fn normalize_memos(
    raw_memos: Vec<RawMemo>,
    categories: &[Category],
    bucket: &DefaultBucket,
    report: &mut MigrationReport,
) -> Vec<Memo> {
    let known: HashSet<&str> = categories.iter().map(|c| c.id.as_str()).collect();
    let mut seen = HashSet::new();
    let mut memos = Vec::with_capacity(raw_memos.len());

    for (index, raw) in raw_memos.into_iter().enumerate() {
        if raw.id.is_empty() || !seen.insert(raw.id.clone()) {
            report.records_dropped += 1;
            continue;
        }

        // Legacy ids are creation timestamps in milliseconds
        let created_at = match raw.created_at {
            Some(ts) => ts,
            None => {
                report.timestamps_backfilled += 1;
                raw.id.parse::<i64>().unwrap_or(index as i64)
            }
        };

        let order = raw.order.unwrap_or_else(|| {
            report.memo_orders_assigned += 1;
            created_at
        });

        let category_id = match raw.category_id {
            Some(id) if known.contains(id.as_str()) => id,
            _ => {
                report.orphans_reassigned += 1;
                bucket.id.clone()
            }
        };

        let title = raw.title.unwrap_or_else(|| {
            report.titles_backfilled += 1;
            title_of(&raw.content)
        });

        let pinned = raw.pinned.unwrap_or(false);
        let pinned_at = if pinned {
            Some(raw.pinned_at.unwrap_or_else(|| {
                report.pins_backfilled += 1;
                created_at
            }))
        } else {
            if raw.pinned_at.is_some() {
                report.stale_pins_cleared += 1;
            }
            None
        };

        memos.push(Memo {
            id: raw.id,
            title,
            content: raw.content,
            category_id,
            created_at,
            order,
            pinned,
            pinned_at,
            bookmark_position: raw.bookmark_position.unwrap_or(0.0).max(0.0),
            updated_at: raw.updated_at,
        });
    }

    memos
}
