//! Data Transfer Objects - request/response types for the item API.
//!
//! Unknown fields in request bodies, including `id` and `created_at`, are ignored.

use serde::{Deserialize, Serialize};

/// Request to create an item. `POST /api/items`
///
/// `name` and `description` are optional here so that a missing field is
/// reported as a validation failure instead of a parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateItemRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub published: Option<bool>,
}

/// Full update of an item. `PUT /api/items/{id}`
pub type ReplaceItemRequest = CreateItemRequest;

/// Partial update of an item. `PATCH /api/items/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateItemRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub published: Option<bool>,
}

/// Query string of `GET /api/items`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListItemsQuery {
    pub published: Option<bool>,
    /// `oldest` (default), `newest` or `name`.
    pub order: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// An item as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub published: bool,
    /// RFC 3339 timestamp.
    pub created_at: String,
}

/// Response of `GET /api/items`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemListResponse {
    pub count: usize,
    pub results: Vec<ItemResponse>,
}
