use std::sync::Arc;

use model::{
    errors::DashboardError,
    filter::TransactionFilter,
    report::{SaleStatistics, Summary},
};
use storage::TransactionSource;

use super::calendar::Calendar;

#[derive(Clone)]
pub struct Statistics {
    source: Arc<dyn TransactionSource>,
    calendar: Calendar,
}

impl Statistics {
    pub fn new(source: Arc<dyn TransactionSource>, calendar: Calendar) -> Self {
        Statistics { source, calendar }
    }

    /// Revenue and record count. Without a month the whole collection is
    /// summarised; with one, only that month.
    pub async fn summary(&self, month: Option<&str>) -> Result<Summary, DashboardError> {
        let filter = match month {
            Some(month) => TransactionFilter::in_window(self.calendar.window(month)?),
            None => TransactionFilter::all(),
        };
        self.source.summary(&filter).await
    }

    pub async fn sales(&self, month: &str) -> Result<SaleStatistics, DashboardError> {
        let window = self.calendar.window(month)?;
        self.source
            .sale_statistics(&TransactionFilter::in_window(window))
            .await
    }
}
