//! Budget primitives.
//!
//! A `Budget` allocates an amount to a category over a closed date interval.
//! Budgets for the same category may overlap in time; every overlapping
//! budget contributes additively to a report.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub id: Uuid,
    pub user_id: String,
    pub category_id: Uuid,
    pub category_name: String,
    pub amount_minor: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Fields for creating a budget.
#[derive(Clone, Debug)]
pub struct NewBudgetCmd {
    pub user_id: String,
    pub category_id: Uuid,
    pub amount_minor: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Full-replace update of an existing budget.
#[derive(Clone, Debug)]
pub struct UpdateBudgetCmd {
    pub category_id: Uuid,
    pub amount_minor: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

pub(crate) fn check_interval(start_date: NaiveDate, end_date: NaiveDate) -> ResultEngine<()> {
    if start_date > end_date {
        return Err(EngineError::InvalidPeriod(
            "start_date must not be after end_date".to_string(),
        ));
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: String,
    pub category_id: Uuid,
    pub amount_minor: i64,
    pub start_date: Date,
    pub end_date: Date,
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

impl From<&NewBudgetCmd> for ActiveModel {
    fn from(cmd: &NewBudgetCmd) -> Self {
        Self {
            id: ActiveValue::Set(Uuid::new_v4()),
            user_id: ActiveValue::Set(cmd.user_id.clone()),
            category_id: ActiveValue::Set(cmd.category_id),
            amount_minor: ActiveValue::Set(cmd.amount_minor),
            start_date: ActiveValue::Set(cmd.start_date),
            end_date: ActiveValue::Set(cmd.end_date),
        }
    }
}

impl Budget {
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
            start_date: model.start_date,
            end_date: model.end_date,
        })
    }
}
