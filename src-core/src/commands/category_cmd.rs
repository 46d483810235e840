//! Category Commands

use serde::Serialize;

use crate::domain::Category;
use crate::AppState;
use super::now_millis;

/// Result of deleting a category
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedCategory {
    pub category: Category,
    pub memos_removed: usize,
}

/// Categories in display order (default bucket first)
pub async fn list_categories(state: &AppState) -> Result<Vec<Category>, String> {
    let service = state.service.lock().await;
    Ok(service.book().categories_for_display().into_iter().cloned().collect())
}

pub async fn add_category(state: &AppState, name: String) -> Result<Category, String> {
    let mut service = state.service.lock().await;
    service.add_category(&name, now_millis()).await.map_err(|e| e.to_string())
}

pub async fn rename_category(state: &AppState, id: String, name: String) -> Result<Category, String> {
    let mut service = state.service.lock().await;
    service.rename_category(&id, &name).await.map_err(|e| e.to_string())
}

/// Delete a category together with its memos
pub async fn delete_category(state: &AppState, id: String) -> Result<DeletedCategory, String> {
    let mut service = state.service.lock().await;
    let (category, memos_removed) = service.delete_category(&id).await.map_err(|e| e.to_string())?;
    Ok(DeletedCategory { category, memos_removed })
}

/// Returns false when the category is already at the top
pub async fn move_category_up(state: &AppState, id: String) -> Result<bool, String> {
    let mut service = state.service.lock().await;
    service.move_category_up(&id).await.map_err(|e| e.to_string())
}

pub async fn move_category_down(state: &AppState, id: String) -> Result<bool, String> {
    let mut service = state.service.lock().await;
    service.move_category_down(&id).await.map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add_memo;
    use crate::commands::test_support::test_state;

    #[tokio::test]
    async fn test_category_commands() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path()).await;

        let a = add_category(&state, "A".into()).await.unwrap();
        let b = add_category(&state, "B".into()).await.unwrap();
        assert!(move_category_down(&state, a.id.clone()).await.unwrap());
        assert!(!move_category_up(&state, "in-box".into()).await.unwrap());
        assert!(move_category_up(&state, "ghost".into()).await.is_err());

        let names: Vec<String> = list_categories(&state).await.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["IN-BOX", "B", "A"]);

        rename_category(&state, b.id.clone(), "Bee".into()).await.unwrap();
        add_memo(&state, "in b".into(), Some(b.id.clone())).await.unwrap();
        let deleted = delete_category(&state, b.id).await.unwrap();
        assert_eq!(deleted.category.name, "Bee");
        assert_eq!(deleted.memos_removed, 1);
        assert!(delete_category(&state, "in-box".into()).await.is_err());
    }
}
