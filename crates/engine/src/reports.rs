//! Report aggregation.
//!
//! Pure transformations over an already-fetched, immutable snapshot of
//! records. Nothing here touches the database or holds state between calls;
//! each report request aggregates its own snapshot independently.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Budget, Transaction, TransactionKind};

/// Income/expense totals for one calendar month.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyReport {
    pub total_income_minor: i64,
    pub total_expense_minor: i64,
    pub net_income_minor: i64,
}

/// Actual spend reconciled against allocated budget for one category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub total_spent_minor: i64,
    pub budget_minor: i64,
}

/// Per-category report, keyed by category display name.
pub type CategoryReport = HashMap<String, CategorySummary>;

/// Sums a transaction snapshot into monthly totals.
///
/// Transactions with an unrecognized kind contribute to neither total; they
/// are dropped silently, never surfaced as an error. `net_income_minor` is
/// derived once at the end, so `income - expense == net` holds exactly.
pub fn monthly_report<'a, I>(transactions: I) -> MonthlyReport
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut report = MonthlyReport::default();
    for tx in transactions {
        match TransactionKind::parse(&tx.kind) {
            Some(TransactionKind::Income) => report.total_income_minor += tx.amount_minor,
            Some(TransactionKind::Expense) => report.total_expense_minor += tx.amount_minor,
            None => {}
        }
    }
    report.net_income_minor = report.total_income_minor - report.total_expense_minor;
    report
}

/// Reconciles per-category spend against the active budget allocations.
///
/// Aggregation is keyed by category id; display names are resolved only when
/// building the output map, where distinct ids that share a name fold into a
/// single entry. A category seen on only one side gets a zero-valued default
/// for the other.
pub fn category_report<'a, T, B>(transactions: T, budgets: B) -> CategoryReport
where
    T: IntoIterator<Item = &'a Transaction>,
    B: IntoIterator<Item = &'a Budget>,
{
    let mut by_category: HashMap<Uuid, (String, CategorySummary)> = HashMap::new();

    for tx in transactions {
        let (_, summary) = by_category
            .entry(tx.category_id)
            .or_insert_with(|| (tx.category_name.clone(), CategorySummary::default()));
        summary.total_spent_minor += tx.amount_minor;
    }

    for budget in budgets {
        let (_, summary) = by_category
            .entry(budget.category_id)
            .or_insert_with(|| (budget.category_name.clone(), CategorySummary::default()));
        summary.budget_minor += budget.amount_minor;
    }

    let mut report = CategoryReport::new();
    for (_, (name, summary)) in by_category {
        let entry = report.entry(name).or_default();
        entry.total_spent_minor += summary.total_spent_minor;
        entry.budget_minor += summary.budget_minor;
    }
    report
}
