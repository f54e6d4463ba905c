//! Stateless HTTP request builder and response parser for the item server.
//!
//! # Design
//! `ItemClient` holds only a base URL and carries no mutable state between
//! calls. Each endpoint is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip, keeping the core
//! deterministic and free of I/O dependencies.

use serde::Serialize;
use url::Url;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::parser::{parse_items, parse_object};
use crate::types::{Item, ItemCollection, User};

/// Where the item server listens unless told otherwise.
pub const DEFAULT_BASE_URL: &str = "http://localhost:7070";

/// Header carrying the caller's token on `exchange-call`.
pub const AUTHORIZATION_HEADER: &str = "X-Authorization";

/// Synchronous, stateless client for the item server.
#[derive(Debug, Clone)]
pub struct ItemClient {
    base_url: Url,
}

impl ItemClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// `GET /api/server/get-call-obj?query=<query>`
    pub fn build_get_call_object(&self, query: &str) -> HttpRequest {
        let mut url = endpoint(&self.base_url, &["api", "server", "get-call-obj"]);
        url.query_pairs_mut().append_pair("query", query);
        request(HttpMethod::Get, url, Vec::new(), None)
    }

    /// `GET /api/server/get-call-list`
    pub fn build_get_call_list(&self) -> HttpRequest {
        let url = endpoint(&self.base_url, &["api", "server", "get-call-list"]);
        request(HttpMethod::Get, url, Vec::new(), None)
    }

    /// `POST /api/server/post-call/<query>` with `user` as the JSON body.
    pub fn build_post_call(&self, query: &str, user: &User) -> Result<HttpRequest, ApiError> {
        let body = json_body(user)?;
        let url = endpoint(&self.base_url, &["api", "server", "post-call", query]);
        Ok(request(HttpMethod::Post, url, json_headers(), Some(body)))
    }

    /// `POST /api/server/exchange-call` with `token` in `X-Authorization` and
    /// `user` as the JSON body.
    pub fn build_exchange_call(&self, token: &str, user: &User) -> Result<HttpRequest, ApiError> {
        let body = json_body(user)?;
        let url = endpoint(&self.base_url, &["api", "server", "exchange-call"]);
        let mut headers = json_headers();
        headers.push((AUTHORIZATION_HEADER.to_string(), token.to_string()));
        Ok(request(HttpMethod::Post, url, headers, Some(body)))
    }

    pub fn parse_get_call_object(&self, response: HttpResponse) -> Result<Item, ApiError> {
        check_status(&response, 200)?;
        Ok(parse_object(&response.body)?)
    }

    pub fn parse_get_call_list(&self, response: HttpResponse) -> Result<ItemCollection, ApiError> {
        check_status(&response, 200)?;
        Ok(parse_items(&response.body)?)
    }

    pub fn parse_post_call(&self, response: HttpResponse) -> Result<Item, ApiError> {
        check_status(&response, 200)?;
        Ok(parse_object(&response.body)?)
    }

    pub fn parse_exchange_call(&self, response: HttpResponse) -> Result<ItemCollection, ApiError> {
        check_status(&response, 200)?;
        Ok(parse_items(&response.body)?)
    }
}

/// Parse a base URL, rejecting forms that cannot carry a path such as
/// `mailto:`. A trailing slash is ignored.
pub(crate) fn parse_base_url(base_url: &str) -> Result<Url, ApiError> {
    let url = Url::parse(base_url.trim_end_matches('/'))?;
    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase));
    }
    Ok(url)
}

/// Append percent-encoded `segments` to the base URL's path.
pub(crate) fn endpoint(base_url: &Url, segments: &[&str]) -> Url {
    let mut url = base_url.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

pub(crate) fn request(
    method: HttpMethod,
    url: Url,
    headers: Vec<(String, String)>,
    body: Option<String>,
) -> HttpRequest {
    tracing::info!(method = method.as_str(), uri = %url, "built request");
    HttpRequest {
        method,
        url: url.into(),
        headers,
        body,
    }
}

fn json_body<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::SerializationError(e.to_string()))
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

/// Map non-success status codes to the appropriate `ApiError` variant.
pub(crate) fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    tracing::info!(status = response.status, "received response");
    tracing::debug!(body = %response.body, "response body");
    if response.status == expected {
        return Ok(());
    }
    match response.status {
        401 => Err(ApiError::Unauthorized),
        404 => Err(ApiError::NotFound),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PayloadError;

    fn client() -> ItemClient {
        ItemClient::new("http://localhost:7070").unwrap()
    }

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    fn status(status: u16) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: String::new(),
        }
    }

    #[test]
    fn build_get_call_object_encodes_query() {
        let req = client().build_get_call_object("Mac Book");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(
            req.url,
            "http://localhost:7070/api/server/get-call-obj?query=Mac+Book"
        );
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_call_list_produces_correct_request() {
        let req = client().build_get_call_list();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:7070/api/server/get-call-list");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_post_call_puts_query_in_path() {
        let req = client()
            .build_post_call("iPad", &User::new("Robbie", "1234"))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:7070/api/server/post-call/iPad");
        assert_eq!(req.header("content-type"), Some("application/json"));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["username"], "Robbie");
        assert_eq!(body["password"], "1234");
    }

    #[test]
    fn build_post_call_escapes_path_segment() {
        let req = client()
            .build_post_call("a/b c", &User::new("Robbie", "1234"))
            .unwrap();
        assert_eq!(req.url, "http://localhost:7070/api/server/post-call/a%2Fb%20c");
    }

    #[test]
    fn build_exchange_call_sets_authorization_header() {
        let req = client()
            .build_exchange_call("secret-token", &User::new("Robbie", "1234"))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:7070/api/server/exchange-call");
        assert_eq!(req.header("X-Authorization"), Some("secret-token"));
        assert!(req.body.is_some());
    }

    #[test]
    fn base_url_with_prefix_and_trailing_slash() {
        let client = ItemClient::new("http://localhost:7070/proxy/").unwrap();
        let req = client.build_get_call_list();
        assert_eq!(req.url, "http://localhost:7070/proxy/api/server/get-call-list");
    }

    #[test]
    fn default_points_at_local_server() {
        let client = ItemClient::new(DEFAULT_BASE_URL).unwrap();
        assert_eq!(client.base_url(), "http://localhost:7070/");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(ItemClient::new("not a url"), Err(ApiError::InvalidUrl(_))));
        assert!(matches!(ItemClient::new("mailto:a@b.c"), Err(ApiError::InvalidUrl(_))));
    }

    #[test]
    fn parse_get_call_object_success() {
        let item = client()
            .parse_get_call_object(ok(r#"{"title":"Mac","price":3888000}"#))
            .unwrap();
        assert_eq!(item, Item::new("Mac", 3888000));
    }

    #[test]
    fn parse_get_call_object_not_found() {
        let err = client().parse_get_call_object(status(404)).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_get_call_list_success() {
        let items = client()
            .parse_get_call_list(ok(
                r#"{"items":[{"title":"Mac","price":3888000},{"title":"iPad","price":899000}]}"#,
            ))
            .unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].title, "iPad");
    }

    #[test]
    fn parse_get_call_list_bad_json() {
        let err = client().parse_get_call_list(ok("not json")).unwrap_err();
        assert!(matches!(err, ApiError::Payload(PayloadError::Parse(_))));
    }

    #[test]
    fn parse_get_call_list_wrong_shape() {
        let err = client().parse_get_call_list(ok(r#"{"item":[]}"#)).unwrap_err();
        assert!(matches!(err, ApiError::Payload(PayloadError::Schema(_))));
    }

    #[test]
    fn parse_post_call_wrong_status() {
        let response = HttpResponse {
            status: 500,
            headers: Vec::new(),
            body: "internal error".to_string(),
        };
        let err = client().parse_post_call(response).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_exchange_call_unauthorized() {
        let err = client().parse_exchange_call(status(401)).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }
}
