//! Categories API endpoints.
//!
//! Categories are global: any authenticated user can manage them, matching
//! the ownership model of transactions and budgets where only those two are
//! user-scoped.

use api_types::category::{CategoryCreate, CategoryUpdate, CategoryView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState, user};

fn map_category(category: engine::Category) -> CategoryView {
    CategoryView {
        id: category.id,
        name: category.name,
    }
}

pub async fn create(
    _: Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<CategoryCreate>,
) -> Result<(StatusCode, Json<CategoryView>), ServerError> {
    let category = state.engine.create_category(&payload.name).await?;

    Ok((StatusCode::CREATED, Json(map_category(category))))
}

pub async fn list(
    _: Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<CategoryView>>, ServerError> {
    let categories = state
        .engine
        .list_categories()
        .await?
        .into_iter()
        .map(map_category)
        .collect();

    Ok(Json(categories))
}

pub async fn update(
    _: Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CategoryUpdate>,
) -> Result<Json<CategoryView>, ServerError> {
    let category = state.engine.update_category(id, &payload.name).await?;

    Ok(Json(map_category(category)))
}

pub async fn delete(
    _: Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_category(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
