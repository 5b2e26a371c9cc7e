//! Inventory item model and DTOs.

use scada_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::default_page_limit;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A stored inventory item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub id: EntityId,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub quantity: i64,
    pub category: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// DTO for creating a new item.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateItem {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(exclusive_min = 0.0))]
    pub price: f64,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub quantity: i64,
    pub category: Option<String>,
}

/// DTO for partially updating an item. Absent fields are left unchanged;
/// an explicit `null` clears the nullable ones.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateItem {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    /// `Some(None)` clears the description.
    #[serde(default, deserialize_with = "crate::nullable")]
    pub description: Option<Option<String>>,
    #[validate(range(exclusive_min = 0.0))]
    pub price: Option<f64>,
    #[validate(range(min = 0))]
    pub quantity: Option<i64>,
    /// `Some(None)` clears the category.
    #[serde(default, deserialize_with = "crate::nullable")]
    pub category: Option<Option<String>>,
}

/// Filters and paging for `GET /items`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ItemListParams {
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_page_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: usize,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl Default for ItemListParams {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_page_limit(),
            category: None,
            min_price: None,
            max_price: None,
        }
    }
}

impl ItemListParams {
    /// True when the item passes every filter that was supplied.
    pub fn matches(&self, item: &Item) -> bool {
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            if item.category.as_deref() != Some(category) {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| item.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| item.price > max) {
            return false;
        }
        true
    }
}

/// Query for `PATCH /items/{id}/stock`.
#[derive(Debug, Clone, Deserialize)]
pub struct StockAdjustment {
    pub quantity_change: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate_input;

    fn create(name: &str, price: f64, quantity: i64) -> CreateItem {
        CreateItem {
            name: name.to_string(),
            description: None,
            price,
            quantity,
            category: None,
        }
    }

    #[test]
    fn valid_create_passes() {
        assert!(validate_input(&create("Bearing", 12.5, 3)).is_ok());
    }

    #[test]
    fn empty_name_is_rejected() {
        assert!(validate_input(&create("", 12.5, 3)).is_err());
    }

    #[test]
    fn name_over_one_hundred_chars_is_rejected() {
        assert!(validate_input(&create(&"x".repeat(100), 1.0, 0)).is_ok());
        assert!(validate_input(&create(&"x".repeat(101), 1.0, 0)).is_err());
    }

    #[test]
    fn price_must_be_strictly_positive() {
        assert!(validate_input(&create("Bolt", 0.0, 0)).is_err());
        assert!(validate_input(&create("Bolt", -1.0, 0)).is_err());
    }

    #[test]
    fn negative_quantity_is_rejected() {
        assert!(validate_input(&create("Bolt", 1.0, -1)).is_err());
    }

    #[test]
    fn quantity_defaults_to_zero() {
        let input: CreateItem =
            serde_json::from_value(serde_json::json!({ "name": "Nut", "price": 0.1 })).unwrap();
        assert_eq!(input.quantity, 0);
    }

    #[test]
    fn empty_update_is_valid() {
        assert!(validate_input(&UpdateItem::default()).is_ok());
    }

    #[test]
    fn update_distinguishes_null_from_absent() {
        let input: UpdateItem =
            serde_json::from_value(serde_json::json!({ "description": null })).unwrap();
        assert_eq!(input.description, Some(None));
        assert_eq!(input.category, None);

        let input: UpdateItem =
            serde_json::from_value(serde_json::json!({ "category": "drive" })).unwrap();
        assert_eq!(input.category, Some(Some("drive".to_string())));
    }

    #[test]
    fn empty_category_filter_matches_everything() {
        let now = chrono::Utc::now();
        let item = Item {
            id: uuid::Uuid::new_v4(),
            name: "Valve".into(),
            description: None,
            price: 9.0,
            quantity: 1,
            category: Some("hydraulics".into()),
            created_at: now,
            updated_at: now,
        };
        let mut params = ItemListParams {
            category: Some(String::new()),
            ..ItemListParams::default()
        };
        assert!(params.matches(&item));

        params.category = Some("electrical".into());
        assert!(!params.matches(&item));
    }

    #[test]
    fn limit_outside_one_to_one_hundred_is_rejected() {
        let mut params = ItemListParams::default();
        assert!(validate_input(&params).is_ok());
        params.limit = 0;
        assert!(validate_input(&params).is_err());
        params.limit = 101;
        assert!(validate_input(&params).is_err());
    }
}
