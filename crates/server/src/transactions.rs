//! Transactions API endpoints.

use api_types::transaction::{TransactionCreate, TransactionUpdate, TransactionView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState, user};

fn map_transaction(tx: engine::Transaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        category_id: tx.category_id,
        category_name: tx.category_name,
        amount_minor: tx.amount_minor,
        kind: tx.kind,
        date: tx.date,
    }
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<TransactionCreate>,
) -> Result<(StatusCode, Json<TransactionView>), ServerError> {
    let tx = state
        .engine
        .create_transaction(engine::NewTransactionCmd {
            user_id: user.username.clone(),
            category_id: payload.category_id,
            amount_minor: payload.amount_minor,
            kind: payload.kind,
            date: payload.date,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(map_transaction(tx))))
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<TransactionView>>, ServerError> {
    let transactions = state
        .engine
        .list_transactions(&user.username)
        .await?
        .into_iter()
        .map(map_transaction)
        .collect();

    Ok(Json(transactions))
}

pub async fn update(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TransactionUpdate>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .update_transaction(
            id,
            &user.username,
            engine::UpdateTransactionCmd {
                category_id: payload.category_id,
                amount_minor: payload.amount_minor,
                kind: payload.kind,
                date: payload.date,
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
    state.engine.delete_transaction(id, &user.username).await?;

    Ok(StatusCode::NO_CONTENT)
}
