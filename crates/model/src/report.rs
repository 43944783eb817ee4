use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_sales: f64,
    pub total_transaction_count: u64,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SaleStatistics {
    pub total_sold_items: u64,
    pub total_not_sold_items: u64,
    pub total_sale_amount: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BucketCount {
    pub range: String,
    pub count: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CombinedReport {
    pub statistics: Vec<Summary>,
    pub bar_chart: Vec<BucketCount>,
    pub pie_chart: Vec<CategoryCount>,
}
