//! Clipboard Button Commands
//!
//! Quick-paste snippets shown next to the memo list.

use crate::domain::ClipboardButton;
use crate::AppState;

pub async fn list_clipboard_buttons(state: &AppState) -> Result<Vec<ClipboardButton>, String> {
    let service = state.service.lock().await;
    Ok(service.book().clipboard_buttons().to_vec())
}

pub async fn add_clipboard_button(
    state: &AppState,
    title: String,
    content: String,
) -> Result<ClipboardButton, String> {
    let mut service = state.service.lock().await;
    service.add_clipboard_button(&title, &content).await.map_err(|e| e.to_string())
}

/// Update the given fields, keeping the rest
pub async fn update_clipboard_button(
    state: &AppState,
    id: String,
    title: Option<String>,
    content: Option<String>,
    color: Option<String>,
) -> Result<ClipboardButton, String> {
    let mut service = state.service.lock().await;
    service
        .update_clipboard_button(&id, title.as_deref(), content.as_deref(), color.as_deref())
        .await
        .map_err(|e| e.to_string())
}

pub async fn delete_clipboard_button(state: &AppState, id: String) -> Result<ClipboardButton, String> {
    let mut service = state.service.lock().await;
    service.delete_clipboard_button(&id).await.map_err(|e| e.to_string())
}
