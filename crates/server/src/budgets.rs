//! Budgets API endpoints.

use api_types::budget::{BudgetCreate, BudgetUpdate, BudgetView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState, user};

fn map_budget(budget: engine::Budget) -> BudgetView {
    BudgetView {
        id: budget.id,
        category_id: budget.category_id,
        category_name: budget.category_name,
        amount_minor: budget.amount_minor,
        start_date: budget.start_date,
        end_date: budget.end_date,
    }
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<BudgetCreate>,
) -> Result<(StatusCode, Json<BudgetView>), ServerError> {
    let budget = state
        .engine
        .create_budget(engine::NewBudgetCmd {
            user_id: user.username.clone(),
            category_id: payload.category_id,
            amount_minor: payload.amount_minor,
            start_date: payload.start_date,
            end_date: payload.end_date,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(map_budget(budget))))
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<BudgetView>>, ServerError> {
    let budgets = state
        .engine
        .list_budgets(&user.username)
        .await?
        .into_iter()
        .map(map_budget)
        .collect();

    Ok(Json(budgets))
}

pub async fn update(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<BudgetUpdate>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .update_budget(
            id,
            &user.username,
            engine::UpdateBudgetCmd {
                category_id: payload.category_id,
                amount_minor: payload.amount_minor,
                start_date: payload.start_date,
                end_date: payload.end_date,
            },
        )
        .await?;

    Ok(StatusCode::OK)
}

pub async fn delete(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_budget(id, &user.username).await?;

    Ok(StatusCode::NO_CONTENT)
}
