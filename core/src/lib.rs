//! Synchronous client core for the item server and the shopping search API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, making the core fully deterministic and testable.
//!
//! # Design
//! - `parser` holds the decoding routines; `parse_items` turns an
//!   `{"items": [...]}` payload into an ordered `Vec<Item>` and tells syntax
//!   errors (`ParseError`) apart from shape errors (`SchemaError`).
//! - `ItemClient` and `SearchClient` are stateless; each endpoint is a
//!   `build_*` / `parse_*` pair so the I/O boundary is explicit.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod parser;
pub mod search;
pub mod types;

pub use client::ItemClient;
pub use error::{ApiError, ParseError, PayloadError, SchemaError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use parser::{parse_items, parse_list, parse_object};
pub use search::{SearchClient, SearchConfig};
pub use types::{Item, ItemCollection, ShopItem, User};
