use std::sync::Arc;

use futures_util::future::try_join;
use log::debug;
use model::{
    errors::DashboardError,
    filter::{SearchTerm, TransactionFilter},
    page::{Pagination, TransactionPage},
};
use storage::TransactionSource;

use super::calendar::Calendar;

#[derive(Clone)]
pub struct Transactions {
    source: Arc<dyn TransactionSource>,
    calendar: Calendar,
}

impl Transactions {
    pub fn new(source: Arc<dyn TransactionSource>, calendar: Calendar) -> Self {
        Transactions { source, calendar }
    }

    /// One page of the month's records matching `search`, plus the total
    /// number of matches across all pages.
    pub async fn search(
        &self,
        month: &str,
        search: &str,
        pagination: Pagination,
    ) -> Result<TransactionPage, DashboardError> {
        let window = self.calendar.window(month)?;
        let filter = TransactionFilter::in_window(window).with_search(SearchTerm::parse(search));
        debug!(
            "search transactions: month={} search={:?} page={} per_page={}",
            month,
            search,
            pagination.page(),
            pagination.per_page()
        );

        let (transactions, total) = try_join(
            self.source
                .find(&filter, pagination.skip(), pagination.per_page()),
            self.source.count(&filter),
        )
        .await?;

        Ok(TransactionPage {
            transactions,
            total,
            page: pagination.page(),
            per_page: pagination.per_page(),
        })
    }
}
