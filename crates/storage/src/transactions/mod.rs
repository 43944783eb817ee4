mod record;

use async_trait::async_trait;
use bson::{doc, Bson, Document};
use eyre::Error;
use futures_util::stream::TryStreamExt as _;
use log::{debug, info};
use model::{
    errors::DashboardError,
    filter::TransactionFilter,
    report::{CategoryCount, SaleStatistics, Summary},
    transaction::Transaction,
};
use mongodb::{Collection, IndexModel};

use crate::TransactionSource;
use record::TransactionDoc;

const COLLECTION: &str = "transactions";

pub struct TransactionStore {
    store: Collection<TransactionDoc>,
}

impl TransactionStore {
    pub async fn new(db: &mongodb::Database) -> Result<Self, Error> {
        let store = db.collection(COLLECTION);
        store
            .create_index(IndexModel::builder().keys(doc! { "dateOfSale": 1 }).build())
            .await?;
        store
            .create_index(IndexModel::builder().keys(doc! { "category": 1 }).build())
            .await?;
        Ok(TransactionStore { store })
    }

    async fn aggregate(&self, pipeline: Vec<Document>) -> Result<Vec<Document>, DashboardError> {
        let cursor = self.store.aggregate(pipeline).await?;
        Ok(cursor.try_collect().await?)
    }
}

#[async_trait]
impl TransactionSource for TransactionStore {
    async fn find(
        &self,
        filter: &TransactionFilter,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<Transaction>, DashboardError> {
        let query = filter_doc(filter);
        debug!("find transactions: {} skip={} limit={}", query, skip, limit);
        let cursor = self
            .store
            .find(query)
            .sort(doc! { "dateOfSale": 1, "productId": 1 })
            .skip(skip)
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .await?;
        let docs: Vec<TransactionDoc> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(Transaction::from).collect())
    }

    async fn count(&self, filter: &TransactionFilter) -> Result<u64, DashboardError> {
        Ok(self.store.count_documents(filter_doc(filter)).await?)
    }

    async fn summary(&self, filter: &TransactionFilter) -> Result<Summary, DashboardError> {
        let result = self.aggregate(summary_pipeline(filter)).await?;
        match result.first() {
            Some(doc) => Ok(Summary {
                total_sales: number(doc, "totalSales")?,
                total_transaction_count: count(doc, "totalTransactionCount")?,
            }),
            None => Ok(Summary::default()),
        }
    }

    async fn sale_statistics(
        &self,
        filter: &TransactionFilter,
    ) -> Result<SaleStatistics, DashboardError> {
        let result = self.aggregate(sale_statistics_pipeline(filter)).await?;
        match result.first() {
            Some(doc) => Ok(SaleStatistics {
                total_sold_items: count(doc, "totalSoldItems")?,
                total_not_sold_items: count(doc, "totalNotSoldItems")?,
                total_sale_amount: number(doc, "totalSaleAmount")?,
            }),
            None => Ok(SaleStatistics::default()),
        }
    }

    async fn categories(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<CategoryCount>, DashboardError> {
        self.aggregate(categories_pipeline(filter))
            .await?
            .iter()
            .map(|doc| {
                Ok(CategoryCount {
                    category: text(doc, "category")?,
                    count: count(doc, "count")?,
                })
            })
            .collect()
    }

    async fn replace_all(&self, transactions: Vec<Transaction>) -> Result<u64, DashboardError> {
        let deleted = self.store.delete_many(doc! {}).await?;
        info!("removed {} transactions", deleted.deleted_count);
        if transactions.is_empty() {
            return Ok(0);
        }
        let docs: Vec<TransactionDoc> = transactions.into_iter().map(Into::into).collect();
        let inserted = self.store.insert_many(docs).await?;
        Ok(inserted.inserted_ids.len() as u64)
    }
}

pub(crate) fn filter_doc(filter: &TransactionFilter) -> Document {
    let mut query = Document::new();
    if let Some(window) = &filter.window {
        query.insert("dateOfSale", doc! { "$gte": window.start, "$lt": window.end });
    }
    if let Some(price) = &filter.price {
        let mut range = doc! { "$gte": price.min };
        if let Some(max) = price.max {
            range.insert("$lt", max);
        }
        query.insert("price", range);
    }
    if let Some(search) = &filter.search {
        let pattern = regex::escape(search.text());
        let mut clauses = vec![
            doc! { "title": { "$regex": pattern.as_str(), "$options": "i" } },
            doc! { "description": { "$regex": pattern.as_str(), "$options": "i" } },
        ];
        if let Some(price) = search.price() {
            clauses.push(doc! { "price": price });
        }
        query.insert("$or", clauses);
    }
    query
}

fn summary_pipeline(filter: &TransactionFilter) -> Vec<Document> {
    vec![
        doc! { "$match": filter_doc(filter) },
        doc! {
            "$group": {
                "_id": Bson::Null,
                "totalSales": { "$sum": "$price" },
                "totalTransactionCount": { "$sum": 1 },
            }
        },
    ]
}

fn sale_statistics_pipeline(filter: &TransactionFilter) -> Vec<Document> {
    vec![
        doc! { "$match": filter_doc(filter) },
        doc! {
            "$group": {
                "_id": Bson::Null,
                "totalSoldItems": { "$sum": { "$cond": [ "$sold", 1, 0 ] } },
                "totalNotSoldItems": { "$sum": { "$cond": [ "$sold", 0, 1 ] } },
                "totalSaleAmount": { "$sum": { "$cond": [ "$sold", "$price", 0 ] } },
            }
        },
    ]
}

fn categories_pipeline(filter: &TransactionFilter) -> Vec<Document> {
    vec![
        doc! { "$match": filter_doc(filter) },
        doc! { "$group": { "_id": "$category", "count": { "$sum": 1 } } },
        doc! { "$sort": { "_id": 1 } },
        doc! { "$project": { "_id": 0, "category": "$_id", "count": 1 } },
    ]
}

fn number(doc: &Document, key: &str) -> Result<f64, DashboardError> {
    match doc.get(key) {
        Some(Bson::Double(value)) => Ok(*value),
        Some(Bson::Int32(value)) => Ok(*value as f64),
        Some(Bson::Int64(value)) => Ok(*value as f64),
        Some(Bson::Null) | None => Ok(0.0),
        Some(other) => Err(unexpected(key, other)),
    }
}

fn count(doc: &Document, key: &str) -> Result<u64, DashboardError> {
    match doc.get(key) {
        Some(Bson::Int32(value)) if *value >= 0 => Ok(*value as u64),
        Some(Bson::Int64(value)) if *value >= 0 => Ok(*value as u64),
        Some(Bson::Double(value)) if *value >= 0.0 && value.fract() == 0.0 => Ok(*value as u64),
        Some(Bson::Null) | None => Ok(0),
        Some(other) => Err(unexpected(key, other)),
    }
}

fn text(doc: &Document, key: &str) -> Result<String, DashboardError> {
    match doc.get(key) {
        Some(Bson::String(value)) => Ok(value.clone()),
        Some(Bson::Null) | None => Ok(String::new()),
        Some(other) => Err(unexpected(key, other)),
    }
}

fn unexpected(key: &str, value: &Bson) -> DashboardError {
    DashboardError::StoreQueryFailed(format!("Unexpected value for {}: {}", key, value))
}
