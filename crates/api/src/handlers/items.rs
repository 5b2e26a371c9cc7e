//! Handlers for the inventory item store.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use scada_core::types::EntityId;
use scada_store::models::item::{CreateItem, Item, ItemListParams, StockAdjustment, UpdateItem};
use scada_store::validate_input;

use crate::error::{not_found, AppResult};
use crate::state::AppState;

/// POST /api/v1/items
pub async fn create_item(
    State(state): State<AppState>,
    Json(input): Json<CreateItem>,
) -> AppResult<(StatusCode, Json<Item>)> {
    validate_input(&input)?;

    let item = state.items.create(input).await;
    tracing::info!(item_id = %item.id, name = %item.name, "Item created");

    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /api/v1/items
///
/// Filters by `category`, `min_price`, `max_price`, then pages with
/// `skip` / `limit`.
pub async fn list_items(
    State(state): State<AppState>,
    Query(params): Query<ItemListParams>,
) -> AppResult<Json<Vec<Item>>> {
    validate_input(&params)?;
    Ok(Json(state.items.list(&params).await))
}

/// GET /api/v1/items/{id}
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Item>> {
    let item = state
        .items
        .find_by_id(id)
        .await
        .ok_or_else(|| not_found("Item", id))?;
    Ok(Json(item))
}

/// PUT /api/v1/items/{id}
///
/// Merges only the supplied fields.
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(input): Json<UpdateItem>,
) -> AppResult<Json<Item>> {
    validate_input(&input)?;

    let item = state
        .items
        .update(id, &input)
        .await
        .ok_or_else(|| not_found("Item", id))?;
    tracing::info!(item_id = %id, "Item updated");

    Ok(Json(item))
}

/// DELETE /api/v1/items/{id}
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<StatusCode> {
    if !state.items.delete(id).await {
        return Err(not_found("Item", id));
    }
    tracing::info!(item_id = %id, "Item deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/items/{id}/stock?quantity_change=N
///
/// Rejects a change that would leave negative stock.
pub async fn update_stock(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Query(adjustment): Query<StockAdjustment>,
) -> AppResult<Json<Item>> {
    let item = state
        .items
        .adjust_stock(id, adjustment.quantity_change)
        .await?
        .ok_or_else(|| not_found("Item", id))?;
    tracing::info!(
        item_id = %id,
        quantity_change = adjustment.quantity_change,
        quantity = item.quantity,
        "Item stock adjusted",
    );

    Ok(Json(item))
}
