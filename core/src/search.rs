//! Request builder and response parser for the shopping search API.
//!
//! # Design
//! Same build/parse split as `ItemClient`. Credentials travel in two custom
//! headers on every request; `SearchConfig` holds them together with the
//! page size so a single value can be loaded from the environment at startup.

use url::Url;

use crate::client::{check_status, endpoint, parse_base_url, request};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::parser::{parse_list, ITEMS_FIELD};
use crate::types::ShopItem;

pub const DEFAULT_SEARCH_BASE_URL: &str = "https://openapi.naver.com";
pub const DEFAULT_DISPLAY: u32 = 15;
/// Largest page size the search API accepts.
pub const MAX_DISPLAY: u32 = 100;

pub const CLIENT_ID_HEADER: &str = "X-Naver-Client-Id";
pub const CLIENT_SECRET_HEADER: &str = "X-Naver-Client-Secret";

pub const ENV_CLIENT_ID: &str = "NAVER_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "NAVER_CLIENT_SECRET";
pub const ENV_DISPLAY: &str = "NAVER_SEARCH_DISPLAY";
pub const ENV_BASE_URL: &str = "NAVER_API_BASE_URL";

/// Connection settings for the search API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub base_url: String,
    pub client_id: String,
    pub client_secret: String,
    /// Results per request, 1..=100.
    pub display: u32,
}

impl SearchConfig {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_SEARCH_BASE_URL.to_string(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            display: DEFAULT_DISPLAY,
        }
    }

    /// Load from `NAVER_CLIENT_ID`, `NAVER_CLIENT_SECRET` and the optional
    /// `NAVER_SEARCH_DISPLAY` / `NAVER_API_BASE_URL`.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ApiError::MissingConfig(name))
        };

        let mut config = Self::new(required(ENV_CLIENT_ID)?, required(ENV_CLIENT_SECRET)?);

        if let Some(raw) = lookup(ENV_DISPLAY) {
            config.display = match raw.trim().parse() {
                Ok(n) if (1..=MAX_DISPLAY).contains(&n) => n,
                _ => {
                    return Err(ApiError::InvalidConfig {
                        name: ENV_DISPLAY,
                        value: raw,
                    })
                }
            };
        }
        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            config.base_url = base_url;
        }
        Ok(config)
    }
}

/// Synchronous, stateless client for the shopping search API.
#[derive(Debug, Clone)]
pub struct SearchClient {
    base_url: Url,
    client_id: String,
    client_secret: String,
    display: u32,
}

impl SearchClient {
    pub fn new(config: SearchConfig) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: parse_base_url(&config.base_url)?,
            client_id: config.client_id,
            client_secret: config.client_secret,
            display: config.display.clamp(1, MAX_DISPLAY),
        })
    }

    /// `GET /v1/search/shop.json?display=<n>&query=<query>` with credentials.
    pub fn build_search_items(&self, query: &str) -> HttpRequest {
        let mut url = endpoint(&self.base_url, &["v1", "search", "shop.json"]);
        url.query_pairs_mut()
            .append_pair("display", &self.display.to_string())
            .append_pair("query", query);
        let headers = vec![
            (CLIENT_ID_HEADER.to_string(), self.client_id.clone()),
            (CLIENT_SECRET_HEADER.to_string(), self.client_secret.clone()),
        ];
        request(HttpMethod::Get, url, headers, None)
    }

    pub fn parse_search_items(&self, response: HttpResponse) -> Result<Vec<ShopItem>, ApiError> {
        check_status(&response, 200)?;
        Ok(parse_list(&response.body, ITEMS_FIELD)?)
    }
}
