use serde::Deserialize;

/// A Printify storefront. One shop is selected as the sync target (either
/// configured up front, or the first shop the account returns) and reused
/// until explicitly reconfigured.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Shop {
    pub id: u64,
    pub title: String,
}

/// A vendor catalog product. Fetched per run, never persisted locally.
///
/// `print_provider_id` is missing on some records; those products are
/// reported as per-item errors during sync rather than failing the run.
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub print_provider_id: Option<u64>,
}

/// A print fulfillment partner, used as a lookup table keyed by `id`.
#[derive(Debug, Clone, Deserialize)]
pub struct Provider {
    pub id: u64,
    pub title: String,
}

/// One page of a shop's product listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductPage {
    pub data: Vec<Product>,
    /// Total page count reported by the vendor. Responses that omit it are
    /// treated as single-page.
    #[serde(default = "single_page")]
    pub last_page: u32,
}

fn single_page() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_page_defaults_to_single_page() {
        let page: ProductPage = serde_json::from_str(r#"{"data":[]}"#).unwrap();
        assert_eq!(page.last_page, 1);
    }

    #[test]
    fn product_tolerates_missing_provider_id() {
        let product: Product =
            serde_json::from_str(r#"{"id":"p1","title":"Mug"}"#).unwrap();
        assert!(product.print_provider_id.is_none());
    }

    #[test]
    fn shop_ignores_unknown_fields() {
        let shop: Shop = serde_json::from_str(
            r#"{"id":42,"title":"My Shop","sales_channel":"custom"}"#,
        )
        .unwrap();
        assert_eq!(shop.id, 42);
        assert_eq!(shop.title, "My Shop");
    }
}
