//! Domain DTOs for the item server and the shopping search API.
//!
//! # Design
//! `Item` mirrors the local server's schema but is defined independently of
//! the mock-server crate; integration tests catch schema drift. It rejects
//! unknown keys so a renamed field on the server fails loudly instead of
//! silently decoding to a partial record.
//!
//! `ShopItem` belongs to a third-party schema that grows new keys over time,
//! so it only picks out the fields it needs.

use serde::{Deserialize, Deserializer, Serialize};

/// A title/price pair returned by the item server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Item {
    pub title: String,
    pub price: i64,
}

impl Item {
    pub fn new(title: impl Into<String>, price: i64) -> Self {
        Self {
            title: title.into(),
            price,
        }
    }
}

/// Ordered items, in the order the payload listed them.
pub type ItemCollection = Vec<Item>;

/// Credentials sent as the JSON body of `post-call` and `exchange-call`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub password: String,
}

impl User {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// One product from the shopping search API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShopItem {
    pub title: String,
    pub link: String,
    pub image: String,
    /// Lowest listed price. The API sends this as a numeric string.
    #[serde(deserialize_with = "price_from_string_or_number")]
    pub lprice: i64,
}

fn price_from_string_or_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Price {
        Number(i64),
        Text(String),
    }

    match Price::deserialize(deserializer)? {
        Price::Number(n) => Ok(n),
        Price::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("lprice is not an integer: {s:?}"))),
    }
}
