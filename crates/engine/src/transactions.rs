//! Transaction primitives.
//!
//! A `Transaction` is a dated income or expense event owned by one user and
//! attached to a category. The stored `kind` is a free-form string; only the
//! values of [`TransactionKind`] count towards report totals, anything else
//! is carried along and ignored by the aggregation (permissive by policy).

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// The transaction kinds recognized by reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
        }
    }

    /// Parses a stored kind, returning `None` for unrecognized values.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "INCOME" => Some(Self::Income),
            "EXPENSE" => Some(Self::Expense),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: String,
    pub category_id: Uuid,
    pub category_name: String,
    pub amount_minor: i64,
    pub kind: String,
    pub date: NaiveDate,
}

/// Fields for creating a transaction.
#[derive(Clone, Debug)]
pub struct NewTransactionCmd {
    pub user_id: String,
    pub category_id: Uuid,
    pub amount_minor: i64,
    pub kind: String,
    pub date: NaiveDate,
}

/// Full-replace update of an existing transaction.
#[derive(Clone, Debug)]
pub struct UpdateTransactionCmd {
    pub category_id: Uuid,
    pub amount_minor: i64,
    pub kind: String,
    pub date: NaiveDate,
}

pub(crate) fn check_amount(amount_minor: i64) -> ResultEngine<()> {
    if amount_minor <= 0 {
        return Err(EngineError::InvalidAmount(
            "amount_minor must be > 0".to_string(),
        ));
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: String,
    pub category_id: Uuid,
    pub amount_minor: i64,
    pub kind: String,
    pub date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Categories,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&NewTransactionCmd> for ActiveModel {
    fn from(cmd: &NewTransactionCmd) -> Self {
        Self {
            id: ActiveValue::Set(Uuid::new_v4()),
            user_id: ActiveValue::Set(cmd.user_id.clone()),
            category_id: ActiveValue::Set(cmd.category_id),
            amount_minor: ActiveValue::Set(cmd.amount_minor),
            kind: ActiveValue::Set(cmd.kind.clone()),
            date: ActiveValue::Set(cmd.date),
        }
    }
}

impl Transaction {
    pub(crate) fn from_joined(
        model: Model,
        category: Option<super::categories::Model>,
    ) -> ResultEngine<Self> {
        let category =
            category.ok_or_else(|| EngineError::KeyNotFound("category not exists".to_string()))?;
        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            category_id: model.category_id,
            category_name: category.name,
            amount_minor: model.amount_minor,
            kind: model.kind,
            date: model.date,
        })
    }
}
