//! Memo Commands
//!
//! Create, edit, pin, reorder and search memos.

use serde::Serialize;

use crate::domain::{outline, Category, Memo, Section};
use crate::AppState;
use super::now_millis;

/// A category with its memos in display order
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShelfSection {
    pub category: Category,
    pub memos: Vec<Memo>,
}

/// Every category with its memos, in display order
pub async fn list_shelf(state: &AppState) -> Result<Vec<ShelfSection>, String> {
    let service = state.service.lock().await;
    let book = service.book();

    Ok(book
        .categories_for_display()
        .into_iter()
        .map(|category| ShelfSection {
            category: category.clone(),
            memos: book.memos_for_display(&category.id).into_iter().cloned().collect(),
        })
        .collect())
}

/// Memos of one category in display order
pub async fn list_memos(state: &AppState, category_id: String) -> Result<Vec<Memo>, String> {
    let service = state.service.lock().await;
    let book = service.book();
    if book.find_category(&category_id).is_none() {
        return Err(format!("Unknown category: {}", category_id));
    }
    Ok(book.memos_for_display(&category_id).into_iter().cloned().collect())
}

pub async fn get_memo(state: &AppState, id: String) -> Result<Option<Memo>, String> {
    let service = state.service.lock().await;
    Ok(service.book().find_memo(&id).cloned())
}

pub async fn add_memo(
    state: &AppState,
    content: String,
    category_id: Option<String>,
) -> Result<Memo, String> {
    let mut service = state.service.lock().await;
    service
        .add_memo(&content, category_id.as_deref(), now_millis())
        .await
        .map_err(|e| e.to_string())
}

pub async fn edit_memo(
    state: &AppState,
    id: String,
    content: String,
    category_id: Option<String>,
) -> Result<Memo, String> {
    let mut service = state.service.lock().await;
    service
        .edit_memo(&id, &content, category_id.as_deref(), now_millis())
        .await
        .map_err(|e| e.to_string())
}

pub async fn delete_memo(state: &AppState, id: String) -> Result<Memo, String> {
    let mut service = state.service.lock().await;
    service.delete_memo(&id).await.map_err(|e| e.to_string())
}

/// Pin or unpin; `None` for an unknown memo
pub async fn toggle_pin(state: &AppState, id: String) -> Result<Option<Memo>, String> {
    let mut service = state.service.lock().await;
    service.toggle_pin(&id, now_millis()).await.map_err(|e| e.to_string())
}

/// Save a scroll position, or clear it with `None`/0
pub async fn set_bookmark(state: &AppState, id: String, position: Option<f64>) -> Result<Memo, String> {
    let mut service = state.service.lock().await;
    service.toggle_bookmark(&id, position).await.map_err(|e| e.to_string())
}

pub async fn reorder_memos(
    state: &AppState,
    category_id: String,
    ordered_ids: Vec<String>,
) -> Result<usize, String> {
    let mut service = state.service.lock().await;
    service
        .reorder_memos(&category_id, &ordered_ids)
        .await
        .map_err(|e| e.to_string())
}

pub async fn search_memos(state: &AppState, query: String) -> Result<Vec<Memo>, String> {
    let service = state.service.lock().await;
    Ok(service.book().search(&query).into_iter().cloned().collect())
}

/// Heading outline of a memo's content
pub async fn memo_outline(state: &AppState, id: String) -> Result<Vec<Section>, String> {
    let service = state.service.lock().await;
    let memo = service
        .book()
        .find_memo(&id)
        .ok_or_else(|| format!("Memo {} not found", id))?;
    Ok(outline(&memo.content))
}

pub async fn undo_edit(state: &AppState, id: String) -> Result<Option<Memo>, String> {
    let mut service = state.service.lock().await;
    service.undo_edit(&id, now_millis()).await.map_err(|e| e.to_string())
}

pub async fn redo_edit(state: &AppState, id: String) -> Result<Option<Memo>, String> {
    let mut service = state.service.lock().await;
    service.redo_edit(&id, now_millis()).await.map_err(|e| e.to_string())
}
