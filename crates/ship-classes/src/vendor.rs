use std::sync::Arc;

use crate::catalog::{ProductPage, Provider, Shop};

/// Errors surfaced by the vendor API client.
#[derive(Debug, thiserror::Error)]
pub enum VendorError {
    /// No API token configured. Raised before any network I/O is attempted.
    #[error("Printify API token is not set.")]
    MissingCredential,

    /// Transport-level failure: DNS, TLS, timeout, refused connection.
    #[error("Failed to connect to Printify API: {0}")]
    Connection(String),

    /// The response body was not parseable JSON. Carries the parse detail;
    /// the display form stays generic because raw bodies can be arbitrarily
    /// large and are already logged truncated.
    #[error("Invalid JSON response from API")]
    InvalidResponse(String),

    /// The vendor answered with a non-2xx status. `code` and `message` come
    /// from the vendor error body when present.
    #[error("{message}")]
    Api {
        code: String,
        message: String,
        status: u16,
    },
}

/// Read seam over the vendor catalog API.
///
/// Implemented by the HTTP client and by in-memory fakes in tests; the
/// synchronizer only ever sees this trait.
#[async_trait::async_trait]
pub trait Vendor: Send + Sync {
    /// List the shops belonging to the authenticated account.
    async fn get_shops(&self) -> Result<Vec<Shop>, VendorError>;

    /// Fetch one page of a shop's product listing.
    async fn get_products(
        &self,
        shop_id: u64,
        page: u32,
        limit: u32,
    ) -> Result<ProductPage, VendorError>;

    /// Fetch the full print-provider catalog.
    async fn get_print_providers(&self) -> Result<Vec<Provider>, VendorError>;
}

#[async_trait::async_trait]
impl<T: Vendor + ?Sized> Vendor for Arc<T> {
    async fn get_shops(&self) -> Result<Vec<Shop>, VendorError> {
        (**self).get_shops().await
    }

    async fn get_products(
        &self,
        shop_id: u64,
        page: u32,
        limit: u32,
    ) -> Result<ProductPage, VendorError> {
        (**self).get_products(shop_id, page, limit).await
    }

    async fn get_print_providers(&self) -> Result<Vec<Provider>, VendorError> {
        (**self).get_print_providers().await
    }
}
