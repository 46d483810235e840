//! Backup / Restore Validator
//!
//! Shape check and summary for backup files, plus the export document.
//! Restoring is done by the memo book; this module never mutates state.

use std::fmt;

use chrono::{TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{
    Category, ClipboardButton, DomainError, DomainResult, Memo, RawCategory, RawMemo,
    StoredCollections, CATEGORIES_KEY, CLIPBOARD_KEY, MEMOS_KEY,
};

pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Export document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    pub memos: Vec<Memo>,
    pub categories: Vec<Category>,
    pub clipboard_buttons: Vec<ClipboardButton>,
    pub export_date: String,
    pub app_version: String,
}

impl Backup {
    pub fn to_json(&self) -> DomainResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| DomainError::Internal(e.to_string()))
    }
}

/// A backup file that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedBackup {
    pub memos: Vec<RawMemo>,
    pub categories: Option<Vec<RawCategory>>,
    pub clipboard_buttons: Option<Vec<ClipboardButton>>,
    pub export_date: Option<String>,
    pub app_version: Option<String>,
}

impl ParsedBackup {
    pub fn summary(&self) -> BackupSummary {
        BackupSummary {
            memos: self.memos.len(),
            categories: self.categories.as_ref().map_or(0, Vec::len),
            clipboard_buttons: self.clipboard_buttons.as_ref().map_or(0, Vec::len),
            export_date: self.export_date.clone(),
            app_version: self.app_version.clone(),
        }
    }

    /// Collections that replace the live ones; absent lists restore as empty
    pub fn into_stored(self) -> StoredCollections {
        StoredCollections {
            categories: self.categories.unwrap_or_default(),
            memos: self.memos,
            clipboard_buttons: self.clipboard_buttons.unwrap_or_default(),
        }
    }
}

/// What a restore would bring in, for the confirmation prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupSummary {
    pub memos: usize,
    pub categories: usize,
    pub clipboard_buttons: usize,
    pub export_date: Option<String>,
    pub app_version: Option<String>,
}

impl fmt::Display for BackupSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} memos, {} categories, {} clipboard buttons",
            self.memos, self.categories, self.clipboard_buttons
        )?;
        if let Some(date) = &self.export_date {
            write!(f, " (exported {}", date)?;
            if let Some(version) = &self.app_version {
                write!(f, ", v{}", version)?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

/// Validate the text of a backup file
pub fn validate_backup(raw: &str) -> DomainResult<ParsedBackup> {
    let value: Value = serde_json::from_str(raw).map_err(|e| invalid(format!("not valid JSON: {}", e)))?;
    let Value::Object(mut root) = value else {
        return Err(invalid("root is not an object"));
    };

    let memos = match root.remove(MEMOS_KEY) {
        Some(Value::Array(items)) => records::<RawMemo>(MEMOS_KEY, items)?,
        Some(_) => return Err(invalid("`memos` is not an array")),
        None => return Err(invalid("`memos` is missing")),
    };
    let categories = optional_records::<RawCategory>(CATEGORIES_KEY, root.remove(CATEGORIES_KEY))?;
    let clipboard_buttons = optional_records::<ClipboardButton>(CLIPBOARD_KEY, root.remove(CLIPBOARD_KEY))?;

    Ok(ParsedBackup {
        memos,
        categories,
        clipboard_buttons,
        export_date: text_field(&root, "exportDate"),
        app_version: text_field(&root, "appVersion"),
    })
}

/// Build the export document from live collections
pub fn export_backup(
    categories: &[Category],
    memos: &[Memo],
    clipboard_buttons: &[ClipboardButton],
    now: i64,
) -> Backup {
    let export_date = Utc
        .timestamp_millis_opt(now)
        .single()
        .unwrap_or_else(Utc::now)
        .to_rfc3339();

    Backup {
        memos: memos.to_vec(),
        categories: categories.to_vec(),
        clipboard_buttons: clipboard_buttons.to_vec(),
        export_date,
        app_version: APP_VERSION.to_string(),
    }
}

fn invalid(msg: impl Into<String>) -> DomainError {
    DomainError::InvalidFormat(msg.into())
}

fn text_field(root: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    root.get(key).and_then(Value::as_str).map(str::to_string)
}

fn optional_records<T: DeserializeOwned>(key: &str, value: Option<Value>) -> DomainResult<Option<Vec<T>>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => records(key, items).map(Some),
        Some(_) => Err(invalid(format!("`{}` is not an array", key))),
    }
}

fn records<T: DeserializeOwned>(key: &str, items: Vec<Value>) -> DomainResult<Vec<T>> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            if !item.is_object() {
                return Err(invalid(format!("`{}[{}]` is not a record", key, index)));
            }
            serde_json::from_value(item).map_err(|e| invalid(format!("`{}[{}]`: {}", key, index, e)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DefaultBucket;

    #[test]
    fn test_rejects_bad_shapes() {
        let cases = [
            "not json",
            "[1,2]",
            "{}",
            r#"{"memos": {}}"#,
            r#"{"memos": [], "categories": "x"}"#,
            r#"{"memos": [], "clipboardButtons": 3}"#,
            r#"{"memos": [1]}"#,
            r#"{"memos": [{"id": "a", "order": "first"}]}"#,
        ];
        for case in cases {
            assert!(
                matches!(validate_backup(case), Err(DomainError::InvalidFormat(_))),
                "accepted {}",
                case
            );
        }
    }

    #[test]
    fn test_minimal_backup_is_accepted() {
        let parsed = validate_backup(r#"{"memos": [{"id": "1", "content": "x"}], "categories": null}"#).unwrap();
        assert_eq!(parsed.memos.len(), 1);
        assert!(parsed.categories.is_none());
        assert_eq!(parsed.summary().categories, 0);
        assert_eq!(parsed.summary().export_date, None);
    }

    #[test]
    fn test_summary_counts() {
        let raw = r##"{
            "memos": [{"id":"1","content":"a"},{"id":"2","content":"b"},{"id":"3","content":"c"}],
            "categories": [{"id":"in-box","name":"IN-BOX"}],
            "clipboardButtons": [{"id":"c1","title":"mail","content":"me@example.com","color":"#E1F0FF"}],
            "exportDate": "2024-01-02T03:04:05Z",
            "appVersion": "1.2.0"
        }"##;
        let summary = validate_backup(raw).unwrap().summary();

        assert_eq!(summary.memos, 3);
        assert_eq!(summary.categories, 1);
        assert_eq!(summary.clipboard_buttons, 1);
        assert_eq!(
            summary.to_string(),
            "3 memos, 1 categories, 1 clipboard buttons (exported 2024-01-02T03:04:05Z, v1.2.0)"
        );
    }

    #[test]
    fn test_export_then_validate() {
        let bucket = DefaultBucket::default();
        let categories = vec![bucket.to_category(0)];
        let mut memo = Memo::new("m1".into(), "hello".into(), bucket.id.clone(), 10);
        memo.order = 1;
        let backup = export_backup(&categories, &[memo], &[], 1_700_000_000_000);

        assert!(backup.export_date.starts_with("2023-11-14T22:13:20"));
        assert_eq!(backup.app_version, APP_VERSION);

        let parsed = validate_backup(&backup.to_json().unwrap()).unwrap();
        assert_eq!(parsed.summary().memos, 1);
        assert_eq!(parsed.categories.map(|c| c.len()), Some(1));
        assert_eq!(parsed.memos[0].order, Some(1));
    }
}
