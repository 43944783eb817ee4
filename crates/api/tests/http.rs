use std::{net::SocketAddr, sync::Arc};

use axum::{http::StatusCode, routing::get, Json, Router};
use chrono::{TimeZone as _, Utc};
use dashboard::Dashboard;
use model::transaction::Transaction;
use serde_json::{json, Value};
use storage::memory::MemoryStore;
use tokio::net::TcpListener;

fn tx(id: i64, price: f64, day: u32) -> Transaction {
    Transaction {
        product_id: id,
        title: format!("Backpack {}", id),
        description: "Fits 15 inch laptops".to_owned(),
        price,
        category: if id % 2 == 0 { "electronics" } else { "men's clothing" }.to_owned(),
        image: None,
        sold: id % 3 == 0,
        date_of_sale: Utc.with_ymd_and_hms(2023, 3, day, 8, 0, 0).single().unwrap(),
    }
}

fn march_records() -> Vec<Transaction> {
    (1..=15).map(|id| tx(id, id as f64 * 60.0, id as u32)).collect()
}

async fn spawn(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn start(store: &MemoryStore, dataset_url: String) -> SocketAddr {
    let dashboard = Dashboard::new(Arc::new(store.clone()), 2023, dataset_url);
    spawn(api::router(dashboard)).await
}

async fn fetch(addr: SocketAddr, path: &str) -> (StatusCode, Value) {
    let response = reqwest::get(format!("http://{}{}", addr, path))
        .await
        .unwrap();
    let status = StatusCode::from_u16(response.status().as_u16()).unwrap();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn transactions_second_page() {
    let store = MemoryStore::new(march_records());
    let addr = start(&store, String::new()).await;

    let path = "/api/products/transactions?month=March&page=2&perPage=10";
    let (status, body) = fetch(addr, path).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 15);
    assert_eq!(body["page"], 2);
    assert_eq!(body["perPage"], 10);
    let ids: Vec<_> = body["transactions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|tx| tx["productId"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![11, 12, 13, 14, 15]);
}

#[tokio::test]
async fn transactions_large_page_size() {
    let store = MemoryStore::new(march_records());
    let addr = start(&store, String::new()).await;

    let (status, body) = fetch(addr, "/api/products/transactions?month=March&perPage=200").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["perPage"], 200);
    assert_eq!(body["transactions"].as_array().unwrap().len(), 15);
}

#[tokio::test]
async fn transactions_search_by_price() {
    let store = MemoryStore::new(march_records());
    let addr = start(&store, String::new()).await;

    let (status, body) = fetch(addr, "/api/products/transactions?month=03&search=120").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["transactions"][0]["price"], 120.0);
}

#[tokio::test]
async fn transactions_reject_zero_page_size() {
    let store = MemoryStore::new(march_records());
    let addr = start(&store, String::new()).await;

    let (status, body) = fetch(addr, "/api/products/transactions?month=March&perPage=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Failed to fetch transactions");
    assert!(body["error"].as_str().unwrap().contains("perPage"));

    let (status, _) = fetch(addr, "/api/products/transactions?month=March&page=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn bar_chart_requires_month() {
    let store = MemoryStore::new(march_records());
    let addr = start(&store, String::new()).await;

    let (status, body) = fetch(addr, "/api/products/barchart").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Failed to fetch bar chart data");

    let (status, _) = fetch(addr, "/api/products/barchart?month=Smarch").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn bar_chart_has_all_buckets() {
    let store = MemoryStore::new(march_records());
    let addr = start(&store, String::new()).await;

    let (status, body) = fetch(addr, "/api/products/barchart?month=March").await;
    assert_eq!(status, StatusCode::OK);
    let bars = body.as_array().unwrap();
    assert_eq!(bars.len(), 10);
    assert_eq!(bars[0], json!({ "range": "0-100", "count": 1 }));
    assert_eq!(bars[8], json!({ "range": "801-900", "count": 2 }));
    assert_eq!(bars[9], json!({ "range": "901-above", "count": 0 }));
    let total: u64 = bars.iter().map(|bar| bar["count"].as_u64().unwrap()).sum();
    assert_eq!(total, 15);
}

#[tokio::test]
async fn pie_chart_and_sales() {
    let store = MemoryStore::new(march_records());
    let addr = start(&store, String::new()).await;

    let (status, body) = fetch(addr, "/api/products/piechart?month=mar").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "category": "electronics", "count": 7 },
            { "category": "men's clothing", "count": 8 },
        ])
    );

    let (status, body) = fetch(addr, "/api/products/sales?month=3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalSoldItems"], 5);
    assert_eq!(body["totalNotSoldItems"], 10);
    // Sold ids 3, 6, 9, 12 and 15, priced id * 60.
    assert_eq!(body["totalSaleAmount"], 2700.0);
}

#[tokio::test]
async fn statistics_of_empty_store() {
    let store = MemoryStore::default();
    let addr = start(&store, String::new()).await;

    let (status, body) = fetch(addr, "/api/products/statistics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "totalSales": 0.0, "totalTransactionCount": 0 }));
}

#[tokio::test]
async fn combined_report() {
    let store = MemoryStore::new(march_records());
    let addr = start(&store, String::new()).await;

    let (status, body) = fetch(addr, "/api/products/combined?month=March").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["statistics"][0]["totalTransactionCount"], 15);
    assert_eq!(body["barChart"].as_array().unwrap().len(), 10);
    assert_eq!(body["pieChart"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn store_outage_is_service_unavailable() {
    let store = MemoryStore::new(march_records());
    let addr = start(&store, String::new()).await;
    store.disconnect();

    let (status, body) = fetch(addr, "/api/products/combined?month=March").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["message"], "Failed to fetch combined data");
    assert!(body.get("statistics").is_none());
}

#[tokio::test]
async fn initialize_replaces_collection() {
    let dataset = json!([
        {
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack",
            "price": 329.85,
            "description": "Your perfect pack for everyday use",
            "category": "men's clothing",
            "image": "https://example.com/1.jpg",
            "sold": false,
            "dateOfSale": "2023-03-27T20:29:54+05:30"
        },
        {
            "id": 2,
            "title": "Mens Casual Premium Slim Fit T-Shirts",
            "price": 22.3,
            "description": "Slim-fitting style",
            "category": "men's clothing",
            "image": "https://example.com/2.jpg",
            "sold": true,
            "dateOfSale": "2023-10-27T20:29:54+05:30"
        }
    ]);
    let source = spawn(Router::new().route(
        "/product_transaction.json",
        get(move || {
            let dataset = dataset.clone();
            async move { Json(dataset) }
        }),
    ))
    .await;

    let store = MemoryStore::new(march_records());
    let addr = start(&store, format!("http://{}/product_transaction.json", source)).await;

    let (status, body) = fetch(addr, "/api/init/initialize").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Database initialized successfully");
    assert_eq!(body["inserted"], 2);
    assert_eq!(store.len(), 2);

    let (_, body) = fetch(addr, "/api/products/transactions?month=March").await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["transactions"][0]["productId"], 1);
}

#[tokio::test]
async fn initialize_from_missing_dataset_is_bad_gateway() {
    let source = spawn(Router::new()).await;
    let store = MemoryStore::new(march_records());
    let addr = start(&store, format!("http://{}/missing.json", source)).await;

    let (status, body) = fetch(addr, "/api/init/initialize").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["message"], "Failed to initialize database");
    assert_eq!(store.len(), 15);
}
