//! Item handlers - REST access to the item store.

use actix_web::{HttpResponse, web};

use catalog_core::domain::{Item, ItemChanges, ItemFilter, ItemId, ItemOrder, NewItem};
use catalog_shared::dto::{
    CreateItemRequest, ItemListResponse, ItemResponse, ListItemsQuery, ReplaceItemRequest,
    UpdateItemRequest,
};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn to_response(item: Item) -> ItemResponse {
    ItemResponse {
        id: item.id,
        name: item.name,
        description: item.description,
        published: item.published,
        created_at: item.created_at.to_rfc3339(),
    }
}

/// GET /api/items
pub async fn list_items(
    state: web::Data<AppState>,
    query: web::Query<ListItemsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();

    let order = match query.order.as_deref() {
        Some(order) => order.parse::<ItemOrder>()?,
        None => ItemOrder::default(),
    };
    let filter = ItemFilter {
        published: query.published,
        order,
        limit: query.limit,
        offset: query.offset.unwrap_or(0),
    };

    let items = state.items.list(&filter).await?;
    let results: Vec<ItemResponse> = items.into_iter().map(to_response).collect();

    Ok(HttpResponse::Ok().json(ItemListResponse {
        count: results.len(),
        results,
    }))
}

/// POST /api/items
pub async fn create_item(
    state: web::Data<AppState>,
    body: web::Json<CreateItemRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let name = req.name.ok_or_else(|| AppError::missing("name"))?;
    let description = req
        .description
        .ok_or_else(|| AppError::missing("description"))?;
    let new_item = NewItem::new(name, description).published(req.published.unwrap_or(false));

    let item = state.items.create(new_item).await?;
    tracing::info!(item_id = item.id, item = %item, "Item created");

    Ok(HttpResponse::Created().json(to_response(item)))
}

/// GET /api/items/{id}
pub async fn get_item(
    state: web::Data<AppState>,
    path: web::Path<ItemId>,
) -> AppResult<HttpResponse> {
    let item = state.items.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(to_response(item)))
}

/// PUT /api/items/{id} - every mutable field is written, `published` falls
/// back to false when omitted.
pub async fn replace_item(
    state: web::Data<AppState>,
    path: web::Path<ItemId>,
    body: web::Json<ReplaceItemRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let changes = ItemChanges::new()
        .name(req.name.ok_or_else(|| AppError::missing("name"))?)
        .description(
            req.description
                .ok_or_else(|| AppError::missing("description"))?,
        )
        .published(req.published.unwrap_or(false));

    let item = state.items.update(path.into_inner(), changes).await?;
    tracing::info!(item_id = item.id, "Item replaced");

    Ok(HttpResponse::Ok().json(to_response(item)))
}

/// PATCH /api/items/{id}
pub async fn update_item(
    state: web::Data<AppState>,
    path: web::Path<ItemId>,
    body: web::Json<UpdateItemRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let changes = ItemChanges {
        name: req.name,
        description: req.description,
        published: req.published,
    };

    let item = state.items.update(path.into_inner(), changes).await?;
    tracing::info!(item_id = item.id, "Item updated");

    Ok(HttpResponse::Ok().json(to_response(item)))
}

/// DELETE /api/items/{id}
pub async fn delete_item(
    state: web::Data<AppState>,
    path: web::Path<ItemId>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.items.delete(id).await?;
    tracing::info!(item_id = id, "Item deleted");

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use catalog_shared::ErrorResponse;
    use serde_json::json;

    use super::*;
    use crate::handlers::configure_routes;

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(AppState::in_memory()))
                    .configure(configure_routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_create_and_fetch_item() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/api/items")
            .set_json(json!({"name": "Widget", "description": "A small widget", "published": true}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: ItemResponse = test::read_body_json(resp).await;
        assert_eq!(created.id, 1);
        assert!(created.published);

        let req = test::TestRequest::get().uri("/api/items/1").to_request();
        let fetched: ItemResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched, created);
    }

    #[actix_web::test]
    async fn test_create_requires_name() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/api/items")
            .set_json(json!({"description": "nameless"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let problem: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(problem.field.as_deref(), Some("name"));
    }

    #[actix_web::test]
    async fn test_create_rejects_long_name() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/api/items")
            .set_json(json!({"name": "x".repeat(101), "description": ""}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get().uri("/api/items").to_request();
        let list: ItemListResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(list.count, 0);
    }

    #[actix_web::test]
    async fn test_patch_ignores_identity_fields() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/api/items")
            .set_json(json!({"name": "Widget", "description": "A small widget", "published": true}))
            .to_request();
        let created: ItemResponse = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::patch()
            .uri("/api/items/1")
            .set_json(json!({"id": 42, "created_at": "2001-01-01T00:00:00Z", "published": false}))
            .to_request();
        let updated: ItemResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(updated.id, 1);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.name, "Widget");
        assert!(!updated.published);
    }

    #[actix_web::test]
    async fn test_put_requires_description() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/api/items")
            .set_json(json!({"name": "Widget", "description": ""}))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::put()
            .uri("/api/items/1")
            .set_json(json!({"name": "Gadget"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_delete_then_get_is_404() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/api/items")
            .set_json(json!({"name": "Widget", "description": ""}))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::delete().uri("/api/items/1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get().uri("/api/items/1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::delete().uri("/api/items/1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_list_filters_by_published() {
        let app = app!();

        for (name, published) in [("a", true), ("b", false), ("c", true)] {
            let req = test::TestRequest::post()
                .uri("/api/items")
                .set_json(json!({"name": name, "description": "", "published": published}))
                .to_request();
            test::call_service(&app, req).await;
        }

        let req = test::TestRequest::get()
            .uri("/api/items?published=true&order=newest")
            .to_request();
        let list: ItemListResponse = test::call_and_read_body_json(&app, req).await;

        let names: Vec<_> = list.results.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a"]);
    }

    #[actix_web::test]
    async fn test_unknown_order_is_bad_request() {
        let app = app!();

        let req = test::TestRequest::get()
            .uri("/api/items?order=sideways")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_oversized_page_is_bad_request() {
        let app = app!();

        let req = test::TestRequest::get()
            .uri("/api/items?limit=9223372036854775808")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let problem: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(problem.field.as_deref(), Some("limit"));

        let req = test::TestRequest::get()
            .uri("/api/items?offset=18446744073709551615")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let problem: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(problem.field.as_deref(), Some("offset"));
    }

    #[actix_web::test]
    async fn test_non_numeric_id_is_bad_request() {
        let app = app!();

        let req = test::TestRequest::get().uri("/api/items/abc").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
