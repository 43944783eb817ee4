use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use dashboard::Dashboard;
use model::{
    errors::DashboardError,
    page::{Pagination, TransactionPage, DEFAULT_PAGE, DEFAULT_PER_PAGE},
    report::{BucketCount, CategoryCount, CombinedReport, SaleStatistics, Summary},
};
use serde::Deserialize;

use crate::error::{ApiError, OrApiError as _};

pub fn routes() -> Router<Dashboard> {
    Router::new()
        .route("/transactions", get(transactions))
        .route("/statistics", get(statistics))
        .route("/sales", get(sales))
        .route("/barchart", get(bar_chart))
        .route("/piechart", get(pie_chart))
        .route("/combined", get(combined))
}

#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    month: Option<String>,
}

impl MonthQuery {
    /// Empty when absent; the month parser reports it as missing.
    fn month(&self) -> &str {
        self.month.as_deref().unwrap_or_default()
    }

    fn optional_month(&self) -> Option<&str> {
        self.month.as_deref().filter(|month| !month.trim().is_empty())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsQuery {
    month: Option<String>,
    #[serde(default)]
    search: String,
    page: Option<String>,
    per_page: Option<String>,
}

impl TransactionsQuery {
    fn pagination(&self) -> Result<Pagination, DashboardError> {
        let page = integer("page", self.page.as_deref(), DEFAULT_PAGE as i64)?;
        let per_page = integer("perPage", self.per_page.as_deref(), DEFAULT_PER_PAGE as i64)?;
        Pagination::new(page, per_page)
    }
}

fn integer(name: &str, value: Option<&str>, default: i64) -> Result<i64, DashboardError> {
    match value.map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value.parse().map_err(|_| {
            DashboardError::invalid(format!(
                "{} must be a positive integer, got {:?}",
                name, value
            ))
        }),
    }
}

async fn transactions(
    State(dashboard): State<Dashboard>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Json<TransactionPage>, ApiError> {
    const MESSAGE: &str = "Failed to fetch transactions";
    let pagination = query.pagination().or_api_error(MESSAGE)?;
    let month = query.month.as_deref().unwrap_or_default();
    let page = dashboard
        .transactions
        .search(month, &query.search, pagination)
        .await
        .or_api_error(MESSAGE)?;
    Ok(Json(page))
}

async fn statistics(
    State(dashboard): State<Dashboard>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Summary>, ApiError> {
    let summary = dashboard
        .statistics
        .summary(query.optional_month())
        .await
        .or_api_error("Failed to fetch statistics")?;
    Ok(Json(summary))
}

async fn sales(
    State(dashboard): State<Dashboard>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<SaleStatistics>, ApiError> {
    let stat = dashboard
        .statistics
        .sales(query.month())
        .await
        .or_api_error("Failed to fetch sale statistics")?;
    Ok(Json(stat))
}

async fn bar_chart(
    State(dashboard): State<Dashboard>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<BucketCount>>, ApiError> {
    let bars = dashboard
        .charts
        .histogram(query.month())
        .await
        .or_api_error("Failed to fetch bar chart data")?;
    Ok(Json(bars))
}

async fn pie_chart(
    State(dashboard): State<Dashboard>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<CategoryCount>>, ApiError> {
    let slices = dashboard
        .charts
        .categories(query.month())
        .await
        .or_api_error("Failed to fetch pie chart data")?;
    Ok(Json(slices))
}

async fn combined(
    State(dashboard): State<Dashboard>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<CombinedReport>, ApiError> {
    let report = dashboard
        .combined(query.month())
        .await
        .or_api_error("Failed to fetch combined data")?;
    Ok(Json(report))
}
