//! Reporting API endpoints.
//!
//! Both endpoints are read-only views computed per request; a fetch failure
//! surfaces as a 500 with a generic body, never a partial report.

use api_types::report::{CategoryReport, CategorySummary, MonthlyReport, ReportQuery};
use axum::{
    Extension, Json,
    extract::{Query, State},
};

use crate::{ServerError, server::ServerState, user};

fn map_monthly(report: engine::MonthlyReport) -> MonthlyReport {
    MonthlyReport {
        total_income: report.total_income_minor,
        total_expense: report.total_expense_minor,
        net_income: report.net_income_minor,
    }
}

fn map_category(report: engine::CategoryReport) -> CategoryReport {
    report
        .into_iter()
        .map(|(name, summary)| {
            (
                name,
                CategorySummary {
                    total_spent: summary.total_spent_minor,
                    budget: summary.budget_minor,
                },
            )
        })
        .collect()
}

/// `GET /reports/monthly?month=&year=`
pub async fn monthly(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<MonthlyReport>, ServerError> {
    let report = state
        .engine
        .monthly_report(&user.username, query.month, query.year)
        .await?;

    Ok(Json(map_monthly(report)))
}

/// `GET /reports/category-wise?month=&year=&categoryId=`
pub async fn category_wise(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<CategoryReport>, ServerError> {
    let report = state
        .engine
        .category_report(&user.username, query.month, query.year, query.category_id)
        .await?;

    Ok(Json(map_category(report)))
}
