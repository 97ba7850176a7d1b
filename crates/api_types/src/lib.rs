//! Wire types shared by the server and its clients.
//!
//! All JSON keys are camelCase to match the public API surface
//! (`totalIncome`, `categoryId`, ...).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod category {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryCreate {
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryUpdate {
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryView {
        pub id: Uuid,
        pub name: String,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionCreate {
        pub category_id: Uuid,
        /// Magnitude in minor units; the sign is implied by `kind`.
        pub amount_minor: i64,
        /// `"INCOME"` or `"EXPENSE"`; other values are stored as-is and
        /// ignored by reports.
        pub kind: String,
        /// ISO date (`YYYY-MM-DD`).
        pub date: NaiveDate,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionUpdate {
        pub category_id: Uuid,
        pub amount_minor: i64,
        pub kind: String,
        pub date: NaiveDate,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionView {
        pub id: Uuid,
        pub category_id: Uuid,
        pub category_name: String,
        pub amount_minor: i64,
        pub kind: String,
        pub date: NaiveDate,
    }
}

pub mod budget {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BudgetCreate {
        pub category_id: Uuid,
        pub amount_minor: i64,
        pub start_date: NaiveDate,
        /// Inclusive; must not precede `startDate`.
        pub end_date: NaiveDate,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BudgetUpdate {
        pub category_id: Uuid,
        pub amount_minor: i64,
        pub start_date: NaiveDate,
        pub end_date: NaiveDate,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BudgetView {
        pub id: Uuid,
        pub category_id: Uuid,
        pub category_name: String,
        pub amount_minor: i64,
        pub start_date: NaiveDate,
        pub end_date: NaiveDate,
    }
}

pub mod report {
    use std::collections::HashMap;

    use super::*;

    /// Query parameters shared by both report endpoints.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ReportQuery {
        pub month: Option<u32>,
        pub year: Option<i32>,
        pub category_id: Option<Uuid>,
    }

    #[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MonthlyReport {
        pub total_income: i64,
        pub total_expense: i64,
        pub net_income: i64,
    }

    #[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CategorySummary {
        pub total_spent: i64,
        pub budget: i64,
    }

    /// Mapping from category display name to its summary, not an array.
    pub type CategoryReport = HashMap<String, CategorySummary>;
}
