//! Commands Layer
//!
//! Handlers that bridge the frontend to the memo service. Errors cross the
//! boundary as strings.

mod memo_cmd;
mod category_cmd;
mod clipboard_cmd;
mod backup_cmd;

pub use memo_cmd::*;
pub use category_cmd::*;
pub use clipboard_cmd::*;
pub use backup_cmd::*;

/// Current time in milliseconds since the epoch
pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
