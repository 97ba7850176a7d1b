use chrono::{Datelike, Duration, NaiveDate, Utc};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};
use uuid::Uuid;

use engine::{
    Engine, EngineError, NewBudgetCmd, NewTransactionCmd, UpdateTransactionCmd,
};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let backend = db.get_database_backend();
    for username in ["alice", "bob"] {
        db.execute(Statement::from_sql_and_values(
            backend,
            "INSERT INTO users (username, password) VALUES (?, ?)",
            vec![username.into(), "password".into()],
        ))
        .await
        .unwrap();
    }
    (Engine::new(db.clone()), db)
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

async fn category(engine: &Engine, name: &str) -> Uuid {
    engine.create_category(name).await.unwrap().id
}

async fn transaction(
    engine: &Engine,
    user: &str,
    category_id: Uuid,
    kind: &str,
    amount_minor: i64,
    on: NaiveDate,
) {
    engine
        .create_transaction(NewTransactionCmd {
            user_id: user.to_string(),
            category_id,
            amount_minor,
            kind: kind.to_string(),
            date: on,
        })
        .await
        .unwrap();
}

async fn budget(
    engine: &Engine,
    user: &str,
    category_id: Uuid,
    amount_minor: i64,
    start: NaiveDate,
    end: NaiveDate,
) {
    engine
        .create_budget(NewBudgetCmd {
            user_id: user.to_string(),
            category_id,
            amount_minor,
            start_date: start,
            end_date: end,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn monthly_report_sums_income_and_expenses() {
    let (engine, _db) = engine_with_db().await;
    let salary = category(&engine, "Salary").await;
    let food = category(&engine, "Food").await;

    transaction(&engine, "alice", salary, "INCOME", 500, date(2025, 6, 5)).await;
    transaction(&engine, "alice", food, "EXPENSE", 120, date(2025, 6, 10)).await;
    transaction(&engine, "alice", food, "EXPENSE", 30, date(2025, 6, 20)).await;

    let report = engine
        .monthly_report("alice", Some(6), Some(2025))
        .await
        .unwrap();
    assert_eq!(report.total_income_minor, 500);
    assert_eq!(report.total_expense_minor, 150);
    assert_eq!(report.net_income_minor, 350);
}

#[tokio::test]
async fn monthly_report_includes_period_boundaries_only() {
    let (engine, _db) = engine_with_db().await;
    let misc = category(&engine, "Misc").await;

    transaction(&engine, "alice", misc, "INCOME", 1, date(2025, 5, 31)).await;
    transaction(&engine, "alice", misc, "INCOME", 10, date(2025, 6, 1)).await;
    transaction(&engine, "alice", misc, "INCOME", 100, date(2025, 6, 30)).await;
    transaction(&engine, "alice", misc, "INCOME", 1000, date(2025, 7, 1)).await;

    let report = engine
        .monthly_report("alice", Some(6), Some(2025))
        .await
        .unwrap();
    assert_eq!(report.total_income_minor, 110);
}

#[tokio::test]
async fn monthly_report_never_sees_other_users_rows() {
    let (engine, _db) = engine_with_db().await;
    let misc = category(&engine, "Misc").await;

    transaction(&engine, "alice", misc, "INCOME", 100, date(2025, 6, 5)).await;
    transaction(&engine, "bob", misc, "INCOME", 9000, date(2025, 6, 5)).await;
    transaction(&engine, "bob", misc, "EXPENSE", 500, date(2025, 6, 6)).await;

    let report = engine
        .monthly_report("alice", Some(6), Some(2025))
        .await
        .unwrap();
    assert_eq!(report.total_income_minor, 100);
    assert_eq!(report.total_expense_minor, 0);
}

#[tokio::test]
async fn monthly_report_ignores_unrecognized_kind() {
    let (engine, _db) = engine_with_db().await;
    let misc = category(&engine, "Misc").await;

    transaction(&engine, "alice", misc, "INCOME", 100, date(2025, 6, 5)).await;
    transaction(&engine, "alice", misc, "TRANSFER", 9999, date(2025, 6, 6)).await;

    let report = engine
        .monthly_report("alice", Some(6), Some(2025))
        .await
        .unwrap();
    assert_eq!(report.total_income_minor, 100);
    assert_eq!(report.total_expense_minor, 0);
    assert_eq!(report.net_income_minor, 100);
}

#[tokio::test]
async fn monthly_report_defaults_to_current_month() {
    let (engine, _db) = engine_with_db().await;
    let misc = category(&engine, "Misc").await;

    let today = Utc::now().date_naive();
    let long_ago = today - Duration::days(45);
    transaction(&engine, "alice", misc, "INCOME", 100, today).await;
    transaction(&engine, "alice", misc, "INCOME", 1000, long_ago).await;

    let report = engine.monthly_report("alice", None, None).await.unwrap();
    assert_eq!(report.total_income_minor, 100);
}

#[tokio::test]
async fn monthly_report_rejects_out_of_range_month() {
    let (engine, _db) = engine_with_db().await;

    let err = engine
        .monthly_report("alice", Some(13), Some(2025))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidPeriod(_)));
}

#[tokio::test]
async fn leap_february_covers_the_29th() {
    let (engine, _db) = engine_with_db().await;
    let misc = category(&engine, "Misc").await;

    transaction(&engine, "alice", misc, "INCOME", 29, date(2024, 2, 29)).await;
    transaction(&engine, "alice", misc, "INCOME", 1, date(2024, 3, 1)).await;

    let report = engine
        .monthly_report("alice", Some(2), Some(2024))
        .await
        .unwrap();
    assert_eq!(report.total_income_minor, 29);
}

#[tokio::test]
async fn category_report_pairs_spend_with_budget() {
    let (engine, _db) = engine_with_db().await;
    let food = category(&engine, "Food").await;
    let rent = category(&engine, "Rent").await;

    transaction(&engine, "alice", food, "EXPENSE", 40, date(2025, 6, 10)).await;
    transaction(&engine, "alice", rent, "EXPENSE", 700, date(2025, 6, 1)).await;
    budget(&engine, "alice", rent, 750, date(2025, 6, 1), date(2025, 6, 30)).await;

    let report = engine
        .category_report("alice", Some(6), Some(2025), None)
        .await
        .unwrap();
    assert_eq!(report.len(), 2);
    let food_entry = report.get("Food").unwrap();
    assert_eq!(food_entry.total_spent_minor, 40);
    assert_eq!(food_entry.budget_minor, 0);
    let rent_entry = report.get("Rent").unwrap();
    assert_eq!(rent_entry.total_spent_minor, 700);
    assert_eq!(rent_entry.budget_minor, 750);
}

#[tokio::test]
async fn category_report_ignores_income() {
    let (engine, _db) = engine_with_db().await;
    let food = category(&engine, "Food").await;

    transaction(&engine, "alice", food, "EXPENSE", 40, date(2025, 6, 10)).await;
    transaction(&engine, "alice", food, "INCOME", 500, date(2025, 6, 11)).await;

    let report = engine
        .category_report("alice", Some(6), Some(2025), None)
        .await
        .unwrap();
    assert_eq!(report.get("Food").unwrap().total_spent_minor, 40);
}

#[tokio::test]
async fn budget_overlap_is_inclusive_on_both_edges() {
    let (engine, _db) = engine_with_db().await;
    let food = category(&engine, "Food").await;

    // Ends exactly on the period's first day: active.
    budget(&engine, "alice", food, 100, date(2025, 5, 1), date(2025, 6, 1)).await;
    // Starts exactly on the period's last day: active.
    budget(&engine, "alice", food, 50, date(2025, 6, 30), date(2025, 7, 31)).await;
    // Ends the day before the period starts: not active.
    budget(&engine, "alice", food, 9000, date(2025, 5, 1), date(2025, 5, 31)).await;

    let report = engine
        .category_report("alice", Some(6), Some(2025), None)
        .await
        .unwrap();
    assert_eq!(report.get("Food").unwrap().budget_minor, 150);
}

#[tokio::test]
async fn overlapping_budgets_for_one_category_add_up() {
    let (engine, _db) = engine_with_db().await;
    let food = category(&engine, "Food").await;

    budget(&engine, "alice", food, 100, date(2025, 6, 1), date(2025, 6, 30)).await;
    budget(&engine, "alice", food, 50, date(2025, 6, 15), date(2025, 7, 15)).await;

    let report = engine
        .category_report("alice", Some(6), Some(2025), None)
        .await
        .unwrap();
    assert_eq!(report.get("Food").unwrap().budget_minor, 150);
}

#[tokio::test]
async fn category_report_respects_category_filter() {
    let (engine, _db) = engine_with_db().await;
    let food = category(&engine, "Food").await;
    let rent = category(&engine, "Rent").await;

    transaction(&engine, "alice", food, "EXPENSE", 40, date(2025, 6, 10)).await;
    transaction(&engine, "alice", rent, "EXPENSE", 700, date(2025, 6, 10)).await;
    budget(&engine, "alice", food, 100, date(2025, 6, 1), date(2025, 6, 30)).await;
    budget(&engine, "alice", rent, 750, date(2025, 6, 1), date(2025, 6, 30)).await;

    let report = engine
        .category_report("alice", Some(6), Some(2025), Some(food))
        .await
        .unwrap();
    assert_eq!(report.len(), 1);
    let entry = report.get("Food").unwrap();
    assert_eq!(entry.total_spent_minor, 40);
    assert_eq!(entry.budget_minor, 100);
}

#[tokio::test]
async fn category_report_excludes_other_users_budgets() {
    let (engine, _db) = engine_with_db().await;
    let food = category(&engine, "Food").await;

    budget(&engine, "bob", food, 9000, date(2025, 6, 1), date(2025, 6, 30)).await;
    transaction(&engine, "alice", food, "EXPENSE", 40, date(2025, 6, 10)).await;

    let report = engine
        .category_report("alice", Some(6), Some(2025), None)
        .await
        .unwrap();
    assert_eq!(report.get("Food").unwrap().budget_minor, 0);
}

#[tokio::test]
async fn crud_is_ownership_scoped() {
    let (engine, _db) = engine_with_db().await;
    let food = category(&engine, "Food").await;

    transaction(&engine, "alice", food, "EXPENSE", 40, date(2025, 6, 10)).await;
    let id = engine.list_transactions("alice").await.unwrap()[0].id;

    let err = engine
        .update_transaction(
            id,
            "bob",
            UpdateTransactionCmd {
                category_id: food,
                amount_minor: 1,
                kind: "EXPENSE".to_string(),
                date: date(2025, 6, 10),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));

    let err = engine.delete_transaction(id, "bob").await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));

    // The owner still can.
    engine.delete_transaction(id, "alice").await.unwrap();
    assert!(engine.list_transactions("alice").await.unwrap().is_empty());
}

#[tokio::test]
async fn budget_with_inverted_interval_is_rejected() {
    let (engine, _db) = engine_with_db().await;
    let food = category(&engine, "Food").await;

    let err = engine
        .create_budget(NewBudgetCmd {
            user_id: "alice".to_string(),
            category_id: food,
            amount_minor: 100,
            start_date: date(2025, 6, 30),
            end_date: date(2025, 6, 1),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidPeriod(_)));
}

#[tokio::test]
async fn create_transaction_requires_existing_category() {
    let (engine, _db) = engine_with_db().await;

    let err = engine
        .create_transaction(NewTransactionCmd {
            user_id: "alice".to_string(),
            category_id: Uuid::new_v4(),
            amount_minor: 10,
            kind: "EXPENSE".to_string(),
            date: date(2025, 6, 10),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn list_transactions_carries_category_name() {
    let (engine, _db) = engine_with_db().await;
    let food = category(&engine, "Food").await;

    transaction(&engine, "alice", food, "EXPENSE", 40, date(2025, 6, 10)).await;

    let transactions = engine.list_transactions("alice").await.unwrap();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].category_name, "Food");
    assert_eq!(transactions[0].date.month(), 6);
}
