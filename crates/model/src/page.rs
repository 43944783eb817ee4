use serde::{Deserialize, Serialize};

use crate::{errors::DashboardError, transaction::Transaction};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PER_PAGE: u64 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    page: u64,
    per_page: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl Pagination {
    /// `page` is 1-based. Both values must be positive.
    pub fn new(page: i64, per_page: i64) -> Result<Self, DashboardError> {
        if page < 1 {
            return Err(DashboardError::invalid(format!(
                "page must be a positive integer, got {}",
                page
            )));
        }
        if per_page < 1 {
            return Err(DashboardError::invalid(format!(
                "perPage must be a positive integer, got {}",
                per_page
            )));
        }
        Ok(Pagination {
            page: page as u64,
            per_page: per_page as u64,
        })
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    pub transactions: Vec<Transaction>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}
