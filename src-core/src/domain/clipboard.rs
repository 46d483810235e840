//! Clipboard quick-paste buttons

use serde::{Deserialize, Serialize};
use super::entity::Entity;

/// A button that copies a stored snippet to the clipboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardButton {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub color: String,
}

impl ClipboardButton {
    pub fn new(id: String, title: String, content: String, color: String) -> Self {
        Self {
            id,
            title,
            content,
            color,
        }
    }
}

impl Entity for ClipboardButton {
    fn id(&self) -> &str {
        &self.id
    }
}
