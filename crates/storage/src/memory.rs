use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use model::{
    errors::DashboardError,
    filter::TransactionFilter,
    report::{CategoryCount, SaleStatistics, Summary},
    transaction::Transaction,
};
use parking_lot::RwLock;

use crate::TransactionSource;

/// In-process transaction source. Evaluates filters the same way the
/// MongoDB queries do and can be switched offline to simulate an
/// unreachable store.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    records: RwLock<Vec<Transaction>>,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new(records: Vec<Transaction>) -> Self {
        let store = MemoryStore::default();
        *store.inner.records.write() = records;
        store
    }

    pub fn disconnect(&self) {
        self.inner.offline.store(true, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.inner.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn ensure_online(&self) -> Result<(), DashboardError> {
        if self.inner.offline.load(Ordering::SeqCst) {
            return Err(DashboardError::StoreUnavailable(
                "memory store is disconnected".to_owned(),
            ));
        }
        Ok(())
    }

    fn matching(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, DashboardError> {
        self.ensure_online()?;
        Ok(self
            .inner
            .records
            .read()
            .iter()
            .filter(|tx| filter.matches(tx))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl TransactionSource for MemoryStore {
    async fn find(
        &self,
        filter: &TransactionFilter,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<Transaction>, DashboardError> {
        let mut records = self.matching(filter)?;
        records.sort_by(|a, b| {
            a.date_of_sale
                .cmp(&b.date_of_sale)
                .then(a.product_id.cmp(&b.product_id))
        });
        Ok(records
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self, filter: &TransactionFilter) -> Result<u64, DashboardError> {
        Ok(self.matching(filter)?.len() as u64)
    }

    async fn summary(&self, filter: &TransactionFilter) -> Result<Summary, DashboardError> {
        let records = self.matching(filter)?;
        Ok(Summary {
            total_sales: records.iter().map(|tx| tx.price).sum(),
            total_transaction_count: records.len() as u64,
        })
    }

    async fn sale_statistics(
        &self,
        filter: &TransactionFilter,
    ) -> Result<SaleStatistics, DashboardError> {
        let mut stat = SaleStatistics::default();
        for tx in self.matching(filter)? {
            if tx.sold {
                stat.total_sold_items += 1;
                stat.total_sale_amount += tx.price;
            } else {
                stat.total_not_sold_items += 1;
            }
        }
        Ok(stat)
    }

    async fn categories(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<CategoryCount>, DashboardError> {
        let mut groups = BTreeMap::<String, u64>::new();
        for tx in self.matching(filter)? {
            *groups.entry(tx.category).or_default() += 1;
        }
        Ok(groups
            .into_iter()
            .map(|(category, count)| CategoryCount { category, count })
            .collect())
    }

    async fn replace_all(&self, transactions: Vec<Transaction>) -> Result<u64, DashboardError> {
        self.ensure_online()?;
        let inserted = transactions.len() as u64;
        *self.inner.records.write() = transactions;
        Ok(inserted)
    }
}
