use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub title: String,
    pub price: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ItemList {
    pub items: Vec<Item>,
}

#[derive(Deserialize)]
pub struct ItemQuery {
    pub query: String,
}

#[derive(Deserialize)]
pub struct ShopQuery {
    pub query: String,
    pub display: Option<usize>,
}

pub const AUTHORIZATION_HEADER: &str = "x-authorization";
pub const CLIENT_ID_HEADER: &str = "x-naver-client-id";
pub const CLIENT_SECRET_HEADER: &str = "x-naver-client-secret";

const DEFAULT_DISPLAY: usize = 10;
const MAX_DISPLAY: usize = 100;

pub type Catalog = Arc<Vec<Item>>;

/// The fixed product list the server answers from.
pub fn default_catalog() -> Vec<Item> {
    [
        ("Mac", 3_888_000),
        ("iPad", 899_000),
        ("iPhone", 1_550_000),
        ("Watch", 450_000),
        ("AirPods", 350_000),
    ]
    .into_iter()
    .map(|(title, price)| Item {
        title: title.to_string(),
        price,
    })
    .collect()
}

pub fn app() -> Router {
    app_with_catalog(default_catalog())
}

pub fn app_with_catalog(items: Vec<Item>) -> Router {
    let catalog: Catalog = Arc::new(items);
    Router::new()
        .route("/api/server/get-call-obj", get(get_call_object))
        .route("/api/server/get-call-list", get(get_call_list))
        .route("/api/server/post-call/{query}", post(post_call))
        .route("/api/server/exchange-call", post(exchange_call))
        .route("/v1/search/shop.json", get(search_shop))
        .with_state(catalog)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn find(catalog: &Catalog, query: &str) -> Option<Item> {
    catalog.iter().find(|item| item.title == query).cloned()
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
}

async fn get_call_object(
    State(catalog): State<Catalog>,
    Query(params): Query<ItemQuery>,
) -> Result<Json<Item>, StatusCode> {
    tracing::info!(query = %params.query, "get-call-obj");
    find(&catalog, &params.query).map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn get_call_list(State(catalog): State<Catalog>) -> Json<ItemList> {
    tracing::info!(count = catalog.len(), "get-call-list");
    Json(ItemList {
        items: catalog.to_vec(),
    })
}

async fn post_call(
    State(catalog): State<Catalog>,
    Path(query): Path<String>,
    Json(user): Json<User>,
) -> Result<Json<Item>, StatusCode> {
    tracing::info!(%query, username = %user.username, "post-call");
    find(&catalog, &query).map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn exchange_call(
    State(catalog): State<Catalog>,
    headers: HeaderMap,
    Json(user): Json<User>,
) -> Result<Json<ItemList>, StatusCode> {
    let Some(token) = header(&headers, AUTHORIZATION_HEADER) else {
        tracing::warn!(username = %user.username, "exchange-call without token");
        return Err(StatusCode::UNAUTHORIZED);
    };
    tracing::info!(token_len = token.len(), username = %user.username, "exchange-call");
    Ok(Json(ItemList {
        items: catalog.to_vec(),
    }))
}

/// Stand-in for the shopping search API: same headers, same envelope, prices
/// as numeric strings.
async fn search_shop(
    State(catalog): State<Catalog>,
    headers: HeaderMap,
    Query(params): Query<ShopQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if header(&headers, CLIENT_ID_HEADER).is_none() || header(&headers, CLIENT_SECRET_HEADER).is_none() {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "errorMessage": "Not Exist Client ID", "errorCode": "024" })),
        ));
    }

    let display_count = params.display.unwrap_or(DEFAULT_DISPLAY).clamp(1, MAX_DISPLAY);
    let needle = params.query.to_lowercase();
    let matches: Vec<(usize, &Item)> = catalog
        .iter()
        .enumerate()
        .filter(|(_, item)| item.title.to_lowercase().contains(&needle))
        .collect();
    tracing::info!(query = %params.query, display = display_count, total = matches.len(), "shop search");

    let items: Vec<Value> = matches
        .iter()
        .take(display_count)
        .map(|(id, item)| {
            json!({
                "title": item.title,
                "link": format!("https://shopping.example/catalog/{id}"),
                "image": format!("https://shopping.example/images/{id}.jpg"),
                "lprice": item.price.to_string(),
                "hprice": "",
                "mallName": "mock-server",
                "productId": id.to_string(),
            })
        })
        .collect();

    Ok(Json(json!({
        "total": matches.len(),
        "start": 1,
        "display": items.len(),
        "items": items,
    })))
}
