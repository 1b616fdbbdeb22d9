use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};
use axum_helpers::{
    ApiResponse, LenientJson,
    errors::responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, NotFoundResponse,
    },
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::error::ItemResult;
use crate::models::{
    CreateItem, Item, ItemCategory, ItemPriority, ItemSource, ItemStatus, ItemType, ItemUnit,
    StorageCondition, UpdateItem,
};
use crate::repository::ItemRepository;
use crate::service::ItemService;

/// `{ "ok": true, "data": Item }`
#[derive(Serialize, ToSchema)]
pub struct ItemEnvelope {
    #[schema(example = true)]
    pub ok: bool,
    pub data: Item,
}

/// `{ "ok": true, "data": [Item] }`
#[derive(Serialize, ToSchema)]
pub struct ItemListEnvelope {
    #[schema(example = true)]
    pub ok: bool,
    pub data: Vec<Item>,
}

/// `{ "ok": true }`
#[derive(Serialize, ToSchema)]
pub struct AckEnvelope {
    #[schema(example = true)]
    pub ok: bool,
}

/// OpenAPI documentation for Items API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_items,
        create_item,
        get_item,
        update_item,
        toggle_item,
        delete_item,
    ),
    components(
        schemas(
            Item,
            CreateItem,
            UpdateItem,
            ItemUnit,
            ItemCategory,
            ItemType,
            ItemStatus,
            ItemPriority,
            ItemSource,
            StorageCondition,
            ItemEnvelope,
            ItemListEnvelope,
            AckEnvelope
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Items", description = "Pantry and shopping list items (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Create the items router with all HTTP endpoints
pub fn router<R: ItemRepository + 'static>(service: ItemService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/{id}", get(get_item).put(update_item).delete(delete_item))
        .route("/{id}/toggle", patch(toggle_item))
        .with_state(shared_service)
}

/// List all items, newest first
#[utoipa::path(
    get,
    path = "",
    tag = "Items",
    responses(
        (status = 200, description = "All items", body = ItemListEnvelope),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_items<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
) -> ItemResult<ApiResponse<Vec<Item>>> {
    let items = service.list_items().await?;
    Ok(ApiResponse::ok(items))
}

/// Create a new item
#[utoipa::path(
    post,
    path = "",
    tag = "Items",
    request_body = CreateItem,
    responses(
        (status = 201, description = "Item created", body = ItemEnvelope),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    LenientJson(input): LenientJson<CreateItem>,
) -> ItemResult<impl IntoResponse> {
    let item = service.create_item(input).await?;
    Ok(ApiResponse::ok(item).with_status(StatusCode::CREATED))
}

/// Get an item by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Items",
    params(
        ("id" = String, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item found", body = ItemEnvelope),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    Path(id): Path<String>,
) -> ItemResult<ApiResponse<Item>> {
    let item = service.get_item(&id).await?;
    Ok(ApiResponse::ok(item))
}

/// Update an item (partial: absent fields are left unchanged)
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Items",
    params(
        ("id" = String, Path, description = "Item ID")
    ),
    request_body = UpdateItem,
    responses(
        (status = 200, description = "Item updated", body = ItemEnvelope),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    Path(id): Path<String>,
    LenientJson(input): LenientJson<UpdateItem>,
) -> ItemResult<ApiResponse<Item>> {
    let item = service.update_item(&id, input).await?;
    Ok(ApiResponse::ok(item))
}

/// Flip the completed flag
#[utoipa::path(
    patch,
    path = "/{id}/toggle",
    tag = "Items",
    params(
        ("id" = String, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item toggled", body = ItemEnvelope),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn toggle_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    Path(id): Path<String>,
) -> ItemResult<ApiResponse<Item>> {
    let item = service.toggle_item(&id).await?;
    Ok(ApiResponse::ok(item))
}

/// Delete an item
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Items",
    params(
        ("id" = String, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item deleted", body = AckEnvelope),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    Path(id): Path<String>,
) -> ItemResult<ApiResponse<()>> {
    service.delete_item(&id).await?;
    Ok(ApiResponse::ack())
}
