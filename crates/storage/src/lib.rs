pub mod memory;
pub mod session;
pub mod transactions;

use std::sync::Arc;

use async_trait::async_trait;
use eyre::Result;
use model::{
    errors::DashboardError,
    filter::TransactionFilter,
    report::{CategoryCount, SaleStatistics, Summary},
    transaction::Transaction,
};
use session::Db;
use transactions::TransactionStore;

pub const DEFAULT_DB_NAME: &str = "transaction";

/// Read and bulk-replace access to the transaction collection.
///
/// Implementations convert their own failures into
/// [`DashboardError::StoreUnavailable`] or [`DashboardError::StoreQueryFailed`].
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Matching records ordered by `dateOfSale`, then `productId`.
    async fn find(
        &self,
        filter: &TransactionFilter,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<Transaction>, DashboardError>;

    async fn count(&self, filter: &TransactionFilter) -> Result<u64, DashboardError>;

    async fn summary(&self, filter: &TransactionFilter) -> Result<Summary, DashboardError>;

    async fn sale_statistics(
        &self,
        filter: &TransactionFilter,
    ) -> Result<SaleStatistics, DashboardError>;

    /// Per-category counts, sorted by category name.
    async fn categories(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<CategoryCount>, DashboardError>;

    /// Clears the collection and inserts `transactions`. Returns the number inserted.
    async fn replace_all(&self, transactions: Vec<Transaction>) -> Result<u64, DashboardError>;
}

#[derive(Clone)]
pub struct Storage {
    pub db: Db,
    pub transactions: Arc<TransactionStore>,
}

impl Storage {
    pub async fn new(uri: &str, db_name: &str) -> Result<Self> {
        let db = Db::new(uri, db_name).await?;
        let transactions = TransactionStore::new(&db).await?;
        Ok(Storage {
            db,
            transactions: Arc::new(transactions),
        })
    }

    pub fn source(&self) -> Arc<dyn TransactionSource> {
        self.transactions.clone()
    }

    pub async fn shutdown(self) {
        self.db.shutdown().await;
    }
}
