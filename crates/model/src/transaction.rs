use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One product sale entry. The remote dataset names the product id `id`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(alias = "id")]
    pub product_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub sold: bool,
    pub date_of_sale: DateTime<Utc>,
}
