//! Personal-finance domain engine.
//!
//! Owns the entities (transactions, budgets, categories), the CRUD
//! operations over them, and the reporting core: period resolution, monthly
//! aggregation, and category reconciliation. Reports are computed views over
//! a snapshot fetched at request time; nothing is persisted for them.

use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};
use uuid::Uuid;

pub use budgets::{Budget, NewBudgetCmd, UpdateBudgetCmd};
pub use categories::Category;
pub use error::EngineError;
pub use period::ReportPeriod;
pub use reports::{CategoryReport, CategorySummary, MonthlyReport};
pub use transactions::{NewTransactionCmd, Transaction, TransactionKind, UpdateTransactionCmd};

mod budgets;
mod categories;
mod error;
mod period;
mod reports;
mod transactions;

type ResultEngine<T> = Result<T, EngineError>;

/// Facade over the persistence layer.
///
/// Every read and write is scoped to the requesting user where the record
/// carries an owner; the reporting methods fetch at most twice (transactions,
/// budgets) and aggregate in memory.
#[derive(Clone, Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }

    // ── Categories ─────────────────────────────────────────────────────────

    pub async fn create_category(&self, name: &str) -> ResultEngine<Category> {
        let model = categories::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            name: ActiveValue::Set(name.to_string()),
        }
        .insert(&self.database)
        .await?;

        Ok(model.into())
    }

    pub async fn list_categories(&self) -> ResultEngine<Vec<Category>> {
        let models = categories::Entity::find()
            .order_by_asc(categories::Column::Name)
            .all(&self.database)
            .await?;

        Ok(models.into_iter().map(Category::from).collect())
    }

    pub async fn update_category(&self, id: Uuid, name: &str) -> ResultEngine<Category> {
        let model = categories::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("category not exists".to_string()))?;

        let mut category: categories::ActiveModel = model.into();
        category.name = ActiveValue::Set(name.to_string());
        let model = category.update(&self.database).await?;

        Ok(model.into())
    }

    pub async fn delete_category(&self, id: Uuid) -> ResultEngine<()> {
        let result = categories::Entity::delete_by_id(id)
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("category not exists".to_string()));
        }
        Ok(())
    }

    // ── Transactions ───────────────────────────────────────────────────────

    pub async fn create_transaction(&self, cmd: NewTransactionCmd) -> ResultEngine<Transaction> {
        transactions::check_amount(cmd.amount_minor)?;
        let category = categories::Entity::find_by_id(cmd.category_id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("category not exists".to_string()))?;

        let model = transactions::ActiveModel::from(&cmd)
            .insert(&self.database)
            .await?;

        transactions::Transaction::from_joined(model, Some(category))
    }

    pub async fn list_transactions(&self, user_id: &str) -> ResultEngine<Vec<Transaction>> {
        let rows = transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id))
            .order_by_desc(transactions::Column::Date)
            .find_also_related(categories::Entity)
            .all(&self.database)
            .await?;

        rows.into_iter()
            .map(|(model, category)| Transaction::from_joined(model, category))
            .collect()
    }

    pub async fn update_transaction(
        &self,
        id: Uuid,
        user_id: &str,
        cmd: UpdateTransactionCmd,
    ) -> ResultEngine<()> {
        transactions::check_amount(cmd.amount_minor)?;
        let model = transactions::Entity::find_by_id(id)
            .filter(transactions::Column::UserId.eq(user_id))
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("transaction not exists".to_string()))?;

        let mut tx: transactions::ActiveModel = model.into();
        tx.category_id = ActiveValue::Set(cmd.category_id);
        tx.amount_minor = ActiveValue::Set(cmd.amount_minor);
        tx.kind = ActiveValue::Set(cmd.kind);
        tx.date = ActiveValue::Set(cmd.date);
        tx.update(&self.database).await?;

        Ok(())
    }

    pub async fn delete_transaction(&self, id: Uuid, user_id: &str) -> ResultEngine<()> {
        let result = transactions::Entity::delete_many()
            .filter(transactions::Column::Id.eq(id))
            .filter(transactions::Column::UserId.eq(user_id))
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound(
                "transaction not exists".to_string(),
            ));
        }
        Ok(())
    }

    // ── Budgets ────────────────────────────────────────────────────────────

    pub async fn create_budget(&self, cmd: NewBudgetCmd) -> ResultEngine<Budget> {
        transactions::check_amount(cmd.amount_minor)?;
        budgets::check_interval(cmd.start_date, cmd.end_date)?;
        let category = categories::Entity::find_by_id(cmd.category_id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("category not exists".to_string()))?;

        let model = budgets::ActiveModel::from(&cmd).insert(&self.database).await?;

        budgets::Budget::from_joined(model, Some(category))
    }

    pub async fn list_budgets(&self, user_id: &str) -> ResultEngine<Vec<Budget>> {
        let rows = budgets::Entity::find()
            .filter(budgets::Column::UserId.eq(user_id))
            .order_by_desc(budgets::Column::StartDate)
            .find_also_related(categories::Entity)
            .all(&self.database)
            .await?;

        rows.into_iter()
            .map(|(model, category)| Budget::from_joined(model, category))
            .collect()
    }

    pub async fn update_budget(
        &self,
        id: Uuid,
        user_id: &str,
        cmd: UpdateBudgetCmd,
    ) -> ResultEngine<()> {
        transactions::check_amount(cmd.amount_minor)?;
        budgets::check_interval(cmd.start_date, cmd.end_date)?;
        let model = budgets::Entity::find_by_id(id)
            .filter(budgets::Column::UserId.eq(user_id))
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("budget not exists".to_string()))?;

        let mut budget: budgets::ActiveModel = model.into();
        budget.category_id = ActiveValue::Set(cmd.category_id);
        budget.amount_minor = ActiveValue::Set(cmd.amount_minor);
        budget.start_date = ActiveValue::Set(cmd.start_date);
        budget.end_date = ActiveValue::Set(cmd.end_date);
        budget.update(&self.database).await?;

        Ok(())
    }

    pub async fn delete_budget(&self, id: Uuid, user_id: &str) -> ResultEngine<()> {
        let result = budgets::Entity::delete_many()
            .filter(budgets::Column::Id.eq(id))
            .filter(budgets::Column::UserId.eq(user_id))
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("budget not exists".to_string()));
        }
        Ok(())
    }

    // ── Reporting ──────────────────────────────────────────────────────────

    /// Fetches a user's transactions whose date falls inside the period,
    /// boundaries included, with the category name populated via join.
    pub async fn fetch_transactions(
        &self,
        user_id: &str,
        period: &ReportPeriod,
        kind: Option<TransactionKind>,
        category_id: Option<Uuid>,
    ) -> ResultEngine<Vec<Transaction>> {
        let mut query = transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id))
            .filter(transactions::Column::Date.gte(period.start))
            .filter(transactions::Column::Date.lte(period.end));

        if let Some(kind) = kind {
            query = query.filter(transactions::Column::Kind.eq(kind.as_str()));
        }
        if let Some(category_id) = category_id {
            query = query.filter(transactions::Column::CategoryId.eq(category_id));
        }

        let rows = query
            .find_also_related(categories::Entity)
            .all(&self.database)
            .await?;

        rows.into_iter()
            .map(|(model, category)| Transaction::from_joined(model, category))
            .collect()
    }

    /// Fetches a user's budgets active for the period.
    ///
    /// Active means the budget interval overlaps the period:
    /// `start_date <= period.end AND end_date >= period.start`, inclusive on
    /// both sides. A budget ending exactly on the period's first day counts.
    pub async fn fetch_budgets(
        &self,
        user_id: &str,
        period: &ReportPeriod,
        category_id: Option<Uuid>,
    ) -> ResultEngine<Vec<Budget>> {
        let mut query = budgets::Entity::find()
            .filter(budgets::Column::UserId.eq(user_id))
            .filter(budgets::Column::StartDate.lte(period.end))
            .filter(budgets::Column::EndDate.gte(period.start));

        if let Some(category_id) = category_id {
            query = query.filter(budgets::Column::CategoryId.eq(category_id));
        }

        let rows = query
            .find_also_related(categories::Entity)
            .all(&self.database)
            .await?;

        rows.into_iter()
            .map(|(model, category)| Budget::from_joined(model, category))
            .collect()
    }

    /// Monthly income/expense totals for the resolved period.
    pub async fn monthly_report(
        &self,
        user_id: &str,
        month: Option<u32>,
        year: Option<i32>,
    ) -> ResultEngine<MonthlyReport> {
        let period = ReportPeriod::resolve(month, year, Utc::now().date_naive())?;
        let transactions = self
            .fetch_transactions(user_id, &period, None, None)
            .await?;

        Ok(reports::monthly_report(&transactions))
    }

    /// Per-category spend vs. budget for the resolved period.
    ///
    /// Only EXPENSE transactions count towards spend; every budget whose
    /// interval overlaps the period contributes to the allocation.
    pub async fn category_report(
        &self,
        user_id: &str,
        month: Option<u32>,
        year: Option<i32>,
        category_id: Option<Uuid>,
    ) -> ResultEngine<CategoryReport> {
        let period = ReportPeriod::resolve(month, year, Utc::now().date_naive())?;
        let transactions = self
            .fetch_transactions(user_id, &period, Some(TransactionKind::Expense), category_id)
            .await?;
        let budgets = self.fetch_budgets(user_id, &period, category_id).await?;

        Ok(reports::category_report(&transactions, &budgets))
    }
}
