//! Category Entity
//!
//! Categories group memos. Each one carries a palette color and a manual
//! `order`; one reserved category is the permanent default bucket.

use serde::{Deserialize, Serialize};
use super::entity::Entity;

/// Pastel palette, assigned round-robin to new categories
pub const PALETTE: [&str; 15] = [
    "#FFE1E6", // pink
    "#E1F0FF", // blue
    "#F0E1FF", // purple
    "#FFE8D1", // orange
    "#E1FFE1", // green
    "#FFE1F0", // rose
    "#D1F5FF", // cyan
    "#F5E1FF", // violet
    "#FFE1D1", // red
    "#F0FFD1", // lime
    "#FFF0D1", // amber
    "#D1FFF0", // teal
    "#FFD1F5", // fuchsia
    "#FFFFD1", // yellow
    "#D1FFEE", // emerald
];

/// Palette entry for the `index`-th record
pub fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// A category in its normalized shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Color (hex, e.g., "#FFE1E6")
    pub color: String,
    /// Manual sort key; ignored for the default bucket
    pub order: i64,
    /// Creation time (ms since epoch)
    pub created_at: i64,
}

impl Category {
    pub fn new(id: String, name: String, color: String, order: i64, created_at: i64) -> Self {
        Self {
            id,
            name,
            color,
            order,
            created_at,
        }
    }
}

impl Entity for Category {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A category as found in storage or a backup file.
///
/// Older builds wrote categories without `color`, `order` or `createdAt`;
/// every such field is optional here and filled in by the normalizer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCategory {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

impl From<Category> for RawCategory {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            color: Some(category.color),
            order: Some(category.order),
            created_at: Some(category.created_at),
        }
    }
}

/// Definition of the reserved default category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultBucket {
    pub id: String,
    pub name: String,
    pub color: String,
}

impl Default for DefaultBucket {
    fn default() -> Self {
        Self {
            id: "in-box".to_string(),
            name: "IN-BOX".to_string(),
            color: "#FFE1E6".to_string(),
        }
    }
}

impl DefaultBucket {
    /// Bucket used by the wiki document flavour
    pub fn general() -> Self {
        Self {
            id: "general".to_string(),
            name: "General".to_string(),
            color: "#6c757d".to_string(),
        }
    }

    pub fn is_bucket(&self, category_id: &str) -> bool {
        self.id == category_id
    }

    /// Fresh bucket category, always at order 0
    pub fn to_category(&self, created_at: i64) -> Category {
        Category::new(self.id.clone(), self.name.clone(), self.color.clone(), 0, created_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_round_robin() {
        assert_eq!(palette_color(0), "#FFE1E6");
        assert_eq!(palette_color(15), "#FFE1E6");
        assert_eq!(palette_color(16), "#E1F0FF");
    }

    #[test]
    fn test_raw_category_accepts_legacy_shape() {
        let raw: RawCategory = serde_json::from_str(r#"{"id":"1700000000000","name":"Work"}"#).unwrap();
        assert_eq!(raw.name, "Work");
        assert!(raw.color.is_none());
        assert!(raw.order.is_none());
    }

    #[test]
    fn test_category_serializes_camel_case() {
        let cat = Category::new("c1".into(), "Work".into(), "#E1F0FF".into(), 3, 1000);
        let json = serde_json::to_value(&cat).unwrap();
        assert_eq!(json["createdAt"], 1000);
        assert_eq!(json["order"], 3);
    }

    #[test]
    fn test_default_bucket() {
        let bucket = DefaultBucket::default();
        assert!(bucket.is_bucket("in-box"));
        let cat = bucket.to_category(5);
        assert_eq!(cat.order, 0);
        assert_eq!(cat.color, "#FFE1E6");
        assert_eq!(DefaultBucket::general().id, "general");
    }
}
