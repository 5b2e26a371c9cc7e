//! Repository for inventory items.

use chrono::Utc;
use indexmap::IndexMap;
use scada_core::error::CoreError;
use scada_core::types::EntityId;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::item::{CreateItem, Item, ItemListParams, UpdateItem};
use crate::paginate;

/// In-memory item collection, iterated in insertion order.
#[derive(Debug, Default)]
pub struct ItemRepo {
    items: RwLock<IndexMap<EntityId, Item>>,
}

impl ItemRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new item with a fresh id and matching timestamps.
    pub async fn create(&self, input: CreateItem) -> Item {
        let now = Utc::now();
        let item = Item {
            id: Uuid::new_v4(),
            name: input.name,
            description: input.description,
            price: input.price,
            quantity: input.quantity,
            category: input.category,
            created_at: now,
            updated_at: now,
        };
        self.items.write().await.insert(item.id, item.clone());
        item
    }

    /// List items passing the filters, then apply skip/limit.
    pub async fn list(&self, params: &ItemListParams) -> Vec<Item> {
        let items = self.items.read().await;
        paginate(
            items.values().filter(|item| params.matches(item)).cloned(),
            params.skip,
            params.limit,
        )
    }

    pub async fn find_by_id(&self, id: EntityId) -> Option<Item> {
        self.items.read().await.get(&id).cloned()
    }

    /// Merge the supplied fields into the item and bump `updated_at`.
    ///
    /// Returns `None` if the item does not exist.
    pub async fn update(&self, id: EntityId, input: &UpdateItem) -> Option<Item> {
        let mut items = self.items.write().await;
        let item = items.get_mut(&id)?;

        if let Some(name) = &input.name {
            item.name = name.clone();
        }
        if let Some(description) = &input.description {
            item.description = description.clone();
        }
        if let Some(price) = input.price {
            item.price = price;
        }
        if let Some(quantity) = input.quantity {
            item.quantity = quantity;
        }
        if let Some(category) = &input.category {
            item.category = category.clone();
        }
        item.updated_at = Utc::now();

        Some(item.clone())
    }

    /// Remove an item. Returns `true` if it existed.
    pub async fn delete(&self, id: EntityId) -> bool {
        self.items.write().await.shift_remove(&id).is_some()
    }

    /// Add a signed delta to the item's quantity.
    ///
    /// Returns `Ok(None)` if the item does not exist and a validation error
    /// if the resulting stock would be negative (the item is left untouched).
    pub async fn adjust_stock(
        &self,
        id: EntityId,
        quantity_change: i64,
    ) -> Result<Option<Item>, CoreError> {
        let mut items = self.items.write().await;
        let Some(item) = items.get_mut(&id) else {
            return Ok(None);
        };

        let new_quantity = item
            .quantity
            .checked_add(quantity_change)
            .filter(|q| *q >= 0)
            .ok_or_else(|| CoreError::Validation("Insufficient stock".to_string()))?;

        item.quantity = new_quantity;
        item.updated_at = Utc::now();
        Ok(Some(item.clone()))
    }

    pub async fn count(&self) -> usize {
        self.items.read().await.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn input(name: &str, price: f64, category: Option<&str>) -> CreateItem {
        CreateItem {
            name: name.to_string(),
            description: None,
            price,
            quantity: 5,
            category: category.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_timestamps() {
        let repo = ItemRepo::new();
        let item = repo.create(input("Valve", 40.0, None)).await;

        assert_eq!(item.name, "Valve");
        assert_eq!(item.created_at, item.updated_at);
        assert_eq!(repo.find_by_id(item.id).await, Some(item));
    }

    #[tokio::test]
    async fn list_filters_by_category_and_price_in_insertion_order() {
        let repo = ItemRepo::new();
        repo.create(input("Pump", 300.0, Some("hydraulics"))).await;
        repo.create(input("Hose", 15.0, Some("hydraulics"))).await;
        repo.create(input("Fuse", 2.0, Some("electrical"))).await;
        repo.create(input("Seal", 8.0, Some("hydraulics"))).await;

        let params = ItemListParams {
            category: Some("hydraulics".into()),
            max_price: Some(100.0),
            ..ItemListParams::default()
        };
        let names: Vec<_> = repo.list(&params).await.into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["Hose", "Seal"]);

        let params = ItemListParams {
            min_price: Some(8.0),
            ..ItemListParams::default()
        };
        assert_eq!(repo.list(&params).await.len(), 3);
    }

    #[tokio::test]
    async fn list_applies_skip_and_limit_after_filters() {
        let repo = ItemRepo::new();
        for n in 0..5 {
            repo.create(input(&format!("Part {n}"), 1.0, None)).await;
        }

        let params = ItemListParams {
            skip: 1,
            limit: 2,
            ..ItemListParams::default()
        };
        let names: Vec<_> = repo.list(&params).await.into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["Part 1", "Part 2"]);
    }

    #[tokio::test]
    async fn update_merges_only_supplied_fields() {
        let repo = ItemRepo::new();
        let item = repo.create(input("Gear", 20.0, Some("drive"))).await;

        let patch = UpdateItem {
            price: Some(25.0),
            ..UpdateItem::default()
        };
        let updated = repo.update(item.id, &patch).await.unwrap();

        assert_eq!(updated.price, 25.0);
        assert_eq!(updated.name, "Gear");
        assert_eq!(updated.category.as_deref(), Some("drive"));
        assert_eq!(updated.created_at, item.created_at);
        assert!(updated.updated_at >= item.updated_at);
    }

    #[tokio::test]
    async fn update_missing_item_returns_none() {
        let repo = ItemRepo::new();
        assert!(repo.update(Uuid::new_v4(), &UpdateItem::default()).await.is_none());
    }

    #[tokio::test]
    async fn update_with_null_clears_optional_fields() {
        let repo = ItemRepo::new();
        let mut create = input("Gear", 20.0, Some("drive"));
        create.description = Some("spur, 40 teeth".into());
        let item = repo.create(create).await;

        let patch = UpdateItem {
            description: Some(None),
            category: Some(None),
            ..UpdateItem::default()
        };
        let updated = repo.update(item.id, &patch).await.unwrap();

        assert_eq!(updated.description, None);
        assert_eq!(updated.category, None);
        assert_eq!(updated.name, "Gear");
    }

    #[tokio::test]
    async fn delete_removes_item_once() {
        let repo = ItemRepo::new();
        let item = repo.create(input("Belt", 9.0, None)).await;

        assert!(repo.delete(item.id).await);
        assert!(!repo.delete(item.id).await);
        assert_eq!(repo.count().await, 0);
    }

    #[tokio::test]
    async fn adjust_stock_adds_signed_change() {
        let repo = ItemRepo::new();
        let item = repo.create(input("Filter", 4.0, None)).await;

        let item = repo.adjust_stock(item.id, 3).await.unwrap().unwrap();
        assert_eq!(item.quantity, 8);
        let item = repo.adjust_stock(item.id, -8).await.unwrap().unwrap();
        assert_eq!(item.quantity, 0);
    }

    #[tokio::test]
    async fn adjust_stock_rejects_negative_result_without_mutating() {
        let repo = ItemRepo::new();
        let item = repo.create(input("Filter", 4.0, None)).await;

        let result = repo.adjust_stock(item.id, -6).await;
        assert_matches!(result, Err(CoreError::Validation(msg)) if msg == "Insufficient stock");
        assert_eq!(repo.find_by_id(item.id).await.unwrap().quantity, 5);
    }

    #[tokio::test]
    async fn adjust_stock_on_missing_item_returns_none() {
        let repo = ItemRepo::new();
        assert_matches!(repo.adjust_stock(Uuid::new_v4(), 1).await, Ok(None));
    }
}
