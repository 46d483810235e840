//! Engine Layer
//!
//! Pure state transformations over the domain types: normalization of
//! legacy records, memo/category ordering, backup validation, and the
//! `MemoBook` aggregate that ties them together.

mod backup;
mod book;
mod category_order;
mod migration;
mod ordering;

pub use backup::{export_backup, validate_backup, Backup, BackupSummary, ParsedBackup, APP_VERSION};
pub use book::MemoBook;
pub use category_order::{append_order, move_down, move_up, swap_with_neighbour, Direction, ReorderStrategy};
pub use migration::{normalize, renormalize, MigrationReport, Normalized};
pub use ordering::{
    append, can_delete, check_category, display_cmp, next_order, reorder, sort_categories,
    sort_for_display, toggle_pin,
};
