//! Backup Commands
//!
//! Export to and restore from a JSON backup file. Restoring replaces all
//! data; callers preview the file and confirm with the user first.

use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::{validate_backup, BackupSummary, MigrationReport, ParsedBackup};
use crate::AppState;
use super::now_millis;

fn read_backup(path: &Path) -> Result<ParsedBackup, String> {
    let text = fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    validate_backup(&text).map_err(|e| e.to_string())
}

/// Write every collection to `path`
pub async fn export_backup(state: &AppState, path: PathBuf) -> Result<BackupSummary, String> {
    let backup = {
        let service = state.service.lock().await;
        service.export_backup(now_millis())
    };
    let json = backup.to_json().map_err(|e| e.to_string())?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
    }
    fs::write(&path, json).map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
    log::info!("Exported backup to {}", path.display());

    Ok(BackupSummary {
        memos: backup.memos.len(),
        categories: backup.categories.len(),
        clipboard_buttons: backup.clipboard_buttons.len(),
        export_date: Some(backup.export_date),
        app_version: Some(backup.app_version),
    })
}

/// Validate a backup file without touching any data
pub async fn preview_backup(path: PathBuf) -> Result<BackupSummary, String> {
    Ok(read_backup(&path)?.summary())
}

/// Replace all data with the contents of a backup file
pub async fn restore_backup(state: &AppState, path: PathBuf) -> Result<MigrationReport, String> {
    let parsed = read_backup(&path)?;
    let mut service = state.service.lock().await;
    service.restore(parsed, now_millis()).await.map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::test_state;
    use crate::commands::{add_category, add_clipboard_button, add_memo, list_shelf};

    #[tokio::test]
    async fn test_export_preview_restore() {
        let dir = tempfile::tempdir().unwrap();
        let source = test_state(&dir.path().join("source")).await;
        let work = add_category(&source, "Work".into()).await.unwrap();
        add_memo(&source, "one".into(), Some(work.id.clone())).await.unwrap();
        add_memo(&source, "two".into(), None).await.unwrap();
        add_clipboard_button(&source, "mail".into(), "me@example.com".into()).await.unwrap();

        let file = dir.path().join("exports").join("backup.json");
        let exported = export_backup(&source, file.clone()).await.unwrap();
        assert_eq!(exported.memos, 2);

        let preview = preview_backup(file.clone()).await.unwrap();
        assert_eq!(preview.memos, 2);
        assert_eq!(preview.categories, 2);
        assert_eq!(preview.clipboard_buttons, 1);

        let target = test_state(&dir.path().join("target")).await;
        add_memo(&target, "replaced".into(), None).await.unwrap();
        let report = restore_backup(&target, file).await.unwrap();
        assert!(report.is_empty());

        let shelf = list_shelf(&target).await.unwrap();
        assert_eq!(shelf.len(), 2);
        assert_eq!(shelf.iter().map(|s| s.memos.len()).sum::<usize>(), 2);
    }

    #[tokio::test]
    async fn test_invalid_backup_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bad.json");
        fs::write(&file, r#"{"categories": []}"#).unwrap();

        let err = preview_backup(file.clone()).await.unwrap_err();
        assert!(err.starts_with("Invalid format"));

        let state = test_state(&dir.path().join("data")).await;
        add_memo(&state, "kept".into(), None).await.unwrap();
        assert!(restore_backup(&state, file).await.is_err());
        assert_eq!(list_shelf(&state).await.unwrap()[0].memos.len(), 1);
        assert!(preview_backup(dir.path().join("missing.json")).await.is_err());
    }
}
