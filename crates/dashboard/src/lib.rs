use std::sync::Arc;

use futures_util::future::try_join3;
use model::{errors::DashboardError, report::CombinedReport};
use service::{
    calendar::Calendar, charts::Charts, loader::Loader, statistics::Statistics,
    transactions::Transactions,
};
use storage::TransactionSource;

pub mod service;

#[derive(Clone)]
pub struct Dashboard {
    pub calendar: Calendar,
    pub transactions: Transactions,
    pub statistics: Statistics,
    pub charts: Charts,
    pub loader: Loader,
}

impl Dashboard {
    pub fn new(source: Arc<dyn TransactionSource>, year: i32, dataset_url: String) -> Self {
        let calendar = Calendar::new(year);
        Dashboard {
            calendar,
            transactions: Transactions::new(source.clone(), calendar),
            statistics: Statistics::new(source.clone(), calendar),
            charts: Charts::new(source.clone(), calendar),
            loader: Loader::new(source, dataset_url),
        }
    }

    /// All-time summary next to the month's bar and pie charts. Fails as a
    /// whole if any part fails.
    pub async fn combined(&self, month: &str) -> Result<CombinedReport, DashboardError> {
        self.calendar.window(month)?;
        let (summary, bar_chart, pie_chart) = try_join3(
            self.statistics.summary(None),
            self.charts.histogram(month),
            self.charts.categories(month),
        )
        .await?;
        Ok(CombinedReport {
            statistics: vec![summary],
            bar_chart,
            pie_chart,
        })
    }
}
