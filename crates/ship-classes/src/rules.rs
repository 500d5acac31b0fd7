//! Pure derivation rules mapping a (product, provider) pair to the identity
//! of its shipping class. No I/O, no caching: all three values must come
//! from the same pair within one sync iteration.

use crate::catalog::{Product, Provider};

/// How many leading words of the product title go into the class name.
const NAME_TITLE_WORDS: usize = 6;

/// How many leading characters of the product id go into the slug.
const SLUG_ID_CHARS: usize = 10;

/// Class name: `"{provider title} - {first words of product title}"`.
pub fn class_name(product: &Product, provider: &Provider) -> String {
    let title_part = product
        .title
        .split_whitespace()
        .take(NAME_TITLE_WORDS)
        .collect::<Vec<_>>()
        .join(" ");

    format!("{} - {}", provider.title, title_part)
}

/// Class description embedding both titles and both ids.
pub fn class_description(product: &Product, provider: &Provider) -> String {
    format!(
        "Shipping class for {} printed by {}. Product ID: {}, Provider ID: {}",
        product.title, provider.title, product.id, provider.id
    )
}

/// Class slug: `"printify-{provider id}-{leading chars of product id}"`.
///
/// Depends only on the two ids, so it stays stable while titles and
/// descriptions drift. That stability is what makes it usable as the
/// natural key for reconciliation.
pub fn class_slug(product: &Product, provider: &Provider) -> String {
    let id_part: String = product.id.chars().take(SLUG_ID_CHARS).collect();
    format!("printify-{}-{}", provider.id, id_part)
}

/// Reduce a display name to a URL-safe slug: lowercased, alphanumeric runs
/// kept, everything else collapsed into single hyphens, no leading or
/// trailing hyphen.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Fresh token for slug collision retries: hex of the current wall-clock
/// nanoseconds.
pub fn unique_suffix() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();

    format!("{nanos:x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product() -> Product {
        Product {
            id: "abc1234567XYZ".to_owned(),
            title: "Classic Crew Neck Tee Unisex Cotton Blend".to_owned(),
            print_provider_id: Some(7),
        }
    }

    fn sample_provider() -> Provider {
        Provider {
            id: 7,
            title: "Acme Print Co".to_owned(),
        }
    }

    #[test]
    fn name_takes_first_six_title_words() {
        let name = class_name(&sample_product(), &sample_provider());
        assert_eq!(name, "Acme Print Co - Classic Crew Neck Tee Unisex Cotton");
    }

    #[test]
    fn name_joins_with_single_spaces() {
        let product = Product {
            id: "p1".to_owned(),
            title: "Soft   Cozy\tThrow  Blanket".to_owned(),
            print_provider_id: Some(3),
        };
        let provider = Provider {
            id: 3,
            title: "Blanket Works".to_owned(),
        };

        assert_eq!(
            class_name(&product, &provider),
            "Blanket Works - Soft Cozy Throw Blanket"
        );
    }

    #[test]
    fn slug_uses_provider_id_and_product_id_prefix() {
        let slug = class_slug(&sample_product(), &sample_provider());
        assert_eq!(slug, "printify-7-abc1234567");
    }

    #[test]
    fn slug_is_independent_of_titles() {
        let mut product = sample_product();
        let mut provider = sample_provider();
        let before = class_slug(&product, &provider);

        product.title = "Renamed Product".to_owned();
        provider.title = "Renamed Provider".to_owned();

        assert_eq!(class_slug(&product, &provider), before);
    }

    #[test]
    fn description_embeds_titles_and_ids() {
        let description = class_description(&sample_product(), &sample_provider());
        assert!(description.contains("Classic Crew Neck Tee Unisex Cotton Blend"));
        assert!(description.contains("Acme Print Co"));
        assert!(description.contains("abc1234567XYZ"));
        assert!(description.contains("Provider ID: 7"));
    }

    #[test]
    fn derivation_is_deterministic() {
        let product = sample_product();
        let provider = sample_provider();

        assert_eq!(
            class_name(&product, &provider),
            class_name(&product, &provider)
        );
        assert_eq!(
            class_description(&product, &provider),
            class_description(&product, &provider)
        );
        assert_eq!(
            class_slug(&product, &provider),
            class_slug(&product, &provider)
        );
    }

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("Acme Print Co - Classic Tee"), "acme-print-co-classic-tee");
        assert_eq!(slugify("  Trimmed  "), "trimmed");
        assert_eq!(slugify("Ünïcode Náme"), "ünïcode-náme");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn unique_suffix_is_hex() {
        let suffix = unique_suffix();
        assert!(!suffix.is_empty());
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
