use std::sync::Arc;

use futures_util::future::try_join_all;
use model::{
    bucket::PRICE_BUCKETS,
    errors::DashboardError,
    filter::TransactionFilter,
    report::{BucketCount, CategoryCount},
};
use storage::TransactionSource;

use super::calendar::Calendar;

#[derive(Clone)]
pub struct Charts {
    source: Arc<dyn TransactionSource>,
    calendar: Calendar,
}

impl Charts {
    pub fn new(source: Arc<dyn TransactionSource>, calendar: Calendar) -> Self {
        Charts { source, calendar }
    }

    /// Record count per price bucket. Always all ten buckets, in bucket order.
    pub async fn histogram(&self, month: &str) -> Result<Vec<BucketCount>, DashboardError> {
        let window = self.calendar.window(month)?;
        try_join_all(PRICE_BUCKETS.iter().map(|bucket| {
            let filter = TransactionFilter::in_window(window).with_price(bucket.range);
            async move {
                let count = self.source.count(&filter).await?;
                Ok::<_, DashboardError>(BucketCount {
                    range: bucket.label.to_owned(),
                    count,
                })
            }
        }))
        .await
    }

    pub async fn categories(&self, month: &str) -> Result<Vec<CategoryCount>, DashboardError> {
        let window = self.calendar.window(month)?;
        self.source
            .categories(&TransactionFilter::in_window(window))
            .await
    }
}
