use std::sync::Arc;

use log::info;
use model::{errors::DashboardError, transaction::Transaction};
use storage::TransactionSource;

/// Replaces the transaction collection with the remote dataset.
#[derive(Clone)]
pub struct Loader {
    source: Arc<dyn TransactionSource>,
    client: reqwest::Client,
    url: String,
}

impl Loader {
    pub fn new(source: Arc<dyn TransactionSource>, url: String) -> Self {
        Loader {
            source,
            client: reqwest::Client::new(),
            url,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn fetch(&self) -> Result<Vec<Transaction>, DashboardError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|err| DashboardError::Ingest(err.to_string()))?;
        response
            .json::<Vec<Transaction>>()
            .await
            .map_err(|err| DashboardError::Ingest(err.to_string()))
    }

    /// Returns the number of inserted records.
    pub async fn load(&self) -> Result<u64, DashboardError> {
        let transactions = self.fetch().await?;
        info!("fetched {} transactions from {}", transactions.len(), self.url);
        let inserted = self.source.replace_all(transactions).await?;
        info!("inserted {} transactions", inserted);
        Ok(inserted)
    }
}
