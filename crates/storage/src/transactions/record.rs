use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use model::transaction::Transaction;
use serde::{Deserialize, Serialize};

/// Stored shape of a transaction. `dateOfSale` is a BSON datetime so range
/// filters run inside the store.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TransactionDoc {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub product_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub sold: bool,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub date_of_sale: DateTime<Utc>,
}

impl From<Transaction> for TransactionDoc {
    fn from(tx: Transaction) -> Self {
        TransactionDoc {
            id: None,
            product_id: tx.product_id,
            title: tx.title,
            description: tx.description,
            price: tx.price,
            category: tx.category,
            image: tx.image,
            sold: tx.sold,
            date_of_sale: tx.date_of_sale,
        }
    }
}

impl From<TransactionDoc> for Transaction {
    fn from(doc: TransactionDoc) -> Self {
        Transaction {
            product_id: doc.product_id,
            title: doc.title,
            description: doc.description,
            price: doc.price,
            category: doc.category,
            image: doc.image,
            sold: doc.sold,
            date_of_sale: doc.date_of_sale,
        }
    }
}
