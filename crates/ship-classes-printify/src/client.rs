use std::sync::Arc;
use std::time::Duration;

use ship_classes::{LogSink, Product, ProductPage, Provider, Shop, Vendor, VendorError};

use crate::cache::ResponseCache;
use crate::wire::ApiErrorBody;

const DEFAULT_API_BASE: &str = "https://api.printify.com/v1";

/// Page size used when walking the full product listing.
const DEFAULT_PAGE_LIMIT: u32 = 50;

/// How long a single vendor request may take before it fails as a
/// connection error.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Hard ceiling on how much of an unparseable response body gets logged.
const LOGGED_BODY_LIMIT: usize = 255;

const SHOPS_KEY: &str = "shops";
const PROVIDERS_KEY: &str = "providers";
const PRODUCTS_PREFIX: &str = "products/";

fn products_key(shop_id: u64, page: u32, limit: u32) -> String {
    format!("{PRODUCTS_PREFIX}{shop_id}/{page}/{limit}")
}

/// Configuration for the Printify API client.
#[derive(Debug, Clone)]
pub struct PrintifyConfig {
    /// Bearer token. Absent means the client fails closed without I/O.
    pub api_token: Option<String>,
    /// Override of the API base URL; tests point this at a local mock.
    pub api_base_url: Option<String>,
    /// How long cached responses stay fresh.
    pub cache_ttl: Duration,
}

impl Default for PrintifyConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            api_base_url: None,
            cache_ttl: Duration::from_secs(3600),
        }
    }
}

/// Authenticated, cached, paginated access to the Printify catalog.
///
/// Every request and response is recorded to the log sink at info level
/// (request line only, no credentials); failures are recorded at error
/// level with enough detail to diagnose.
pub struct PrintifyClient {
    config: PrintifyConfig,
    http: reqwest::Client,
    cache: ResponseCache,
    log: Arc<dyn LogSink>,
}

impl PrintifyClient {
    pub fn new(config: PrintifyConfig, log: Arc<dyn LogSink>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");
        let cache = ResponseCache::new(config.cache_ttl);

        Self {
            config,
            http,
            cache,
            log,
        }
    }

    /// List the shops belonging to the authenticated account.
    pub async fn get_shops(&self) -> Result<Vec<Shop>, VendorError> {
        self.fetch_cached(SHOPS_KEY, "shops.json").await
    }

    /// Fetch one page of a shop's product listing, cached per
    /// (shop, page, limit).
    pub async fn get_products(
        &self,
        shop_id: u64,
        page: u32,
        limit: u32,
    ) -> Result<ProductPage, VendorError> {
        let key = products_key(shop_id, page, limit);
        let endpoint = format!("shops/{shop_id}/products.json?page={page}&limit={limit}");
        self.fetch_cached(&key, &endpoint).await
    }

    /// Walk every page of a shop's product listing and concatenate the
    /// results in page order. The first page-level error fails the whole
    /// call; partial results are discarded.
    pub async fn get_all_products(&self, shop_id: u64) -> Result<Vec<Product>, VendorError> {
        let mut all = Vec::new();
        let mut page = 1;

        loop {
            let response = self
                .get_products(shop_id, page, DEFAULT_PAGE_LIMIT)
                .await?;
            all.extend(response.data);

            if page >= response.last_page {
                break;
            }
            page += 1;
        }

        Ok(all)
    }

    /// Fetch the full print-provider catalog.
    pub async fn get_print_providers(&self) -> Result<Vec<Provider>, VendorError> {
        self.fetch_cached(PROVIDERS_KEY, "catalog/print_providers.json")
            .await
    }

    /// Invalidate every cached vendor response: the shops and providers
    /// entries plus all cached product pages. Purely local; no network
    /// traffic, so the cache cannot repopulate itself mid-invalidation.
    pub fn clear_cache(&self) {
        self.cache.remove(SHOPS_KEY);
        self.cache.remove(PROVIDERS_KEY);
        self.cache.remove_prefix(PRODUCTS_PREFIX);
    }

    fn api_base(&self) -> &str {
        self.config
            .api_base_url
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE)
    }

    fn token(&self) -> Result<&str, VendorError> {
        match self.config.api_token.as_deref() {
            Some(token) if !token.trim().is_empty() => Ok(token),
            _ => Err(VendorError::MissingCredential),
        }
    }

    /// Read-through fetch: serve a fresh cached copy, or hit the network
    /// and cache the decoded body under `cache_key`.
    async fn fetch_cached<T: serde::de::DeserializeOwned>(
        &self,
        cache_key: &str,
        endpoint: &str,
    ) -> Result<T, VendorError> {
        if let Some(value) = self.cache.get(cache_key) {
            return decode(value);
        }

        let value = self.request(endpoint).await?;
        self.cache.insert(cache_key, value.clone());
        decode(value)
    }

    /// GET an endpoint and return the raw JSON body.
    ///
    /// Fails closed with `MissingCredential` before any I/O when no token
    /// is configured. Non-2xx responses are parsed for the vendor error
    /// shape; bodies that are not JSON are logged truncated.
    async fn request(&self, endpoint: &str) -> Result<serde_json::Value, VendorError> {
        let token = self.token()?;
        let url = format!("{}/{}", self.api_base(), endpoint);

        self.log.info(&format!("API request: GET {url}"));

        let response = self
            .http
            .get(&url)
            .header("Authorization", format!("Bearer {token}"))
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .header(
                "User-Agent",
                concat!("ship-classes/", env!("CARGO_PKG_VERSION")),
            )
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;

        let status = response.status();
        self.log.info(&format!(
            "API response: GET {url} (status: {})",
            status.as_u16()
        ));

        let body = response
            .text()
            .await
            .map_err(|e| self.connection_error(e))?;

        let value = if body.is_empty() {
            serde_json::Value::Null
        } else {
            match serde_json::from_str(&body) {
                Ok(value) => value,
                Err(e) => {
                    self.log.error(&format!(
                        "API JSON decode error: {e}, raw response: {}",
                        truncate(&body, LOGGED_BODY_LIMIT)
                    ));
                    return Err(VendorError::InvalidResponse(e.to_string()));
                }
            }
        };

        if !status.is_success() {
            let (code, message) = parse_error_body(&value);
            self.log.error(&format!(
                "API error: {message} (code: {code}, HTTP: {})",
                status.as_u16()
            ));
            return Err(VendorError::Api {
                code,
                message,
                status: status.as_u16(),
            });
        }

        Ok(value)
    }

    fn connection_error(&self, e: reqwest::Error) -> VendorError {
        let detail = e.to_string();
        self.log.error(&format!("API connection error: {detail}"));
        VendorError::Connection(detail)
    }
}

#[async_trait::async_trait]
impl Vendor for PrintifyClient {
    async fn get_shops(&self) -> Result<Vec<Shop>, VendorError> {
        PrintifyClient::get_shops(self).await
    }

    async fn get_products(
        &self,
        shop_id: u64,
        page: u32,
        limit: u32,
    ) -> Result<ProductPage, VendorError> {
        PrintifyClient::get_products(self, shop_id, page, limit).await
    }

    async fn get_print_providers(&self) -> Result<Vec<Provider>, VendorError> {
        PrintifyClient::get_print_providers(self).await
    }
}

fn decode<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> Result<T, VendorError> {
    serde_json::from_value(value).map_err(|e| VendorError::InvalidResponse(e.to_string()))
}

fn parse_error_body(value: &serde_json::Value) -> (String, String) {
    let body: ApiErrorBody = serde_json::from_value(value.clone()).unwrap_or_default();
    let entry = body.errors.first();

    let code = entry
        .and_then(|entry| entry.code_string())
        .unwrap_or_else(|| "unknown_error".to_owned());
    let message = entry
        .and_then(|entry| entry.message.clone())
        .unwrap_or_else(|| "Unknown API error".to_owned());

    (code, message)
}

fn truncate(body: &str, limit: usize) -> String {
    body.chars().take(limit).collect()
}
