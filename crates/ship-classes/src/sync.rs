use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::catalog::{Product, Provider};
use crate::class::ReconcileOutcome;
use crate::log::LogSink;
use crate::rules;
use crate::store::ClassStore;
use crate::vendor::Vendor;

/// Products come from the first listing page at the vendor's default page
/// size; one run reconciles at most this many products.
const SYNC_PAGE: u32 = 1;
const SYNC_PAGE_LIMIT: u32 = 50;

/// Outcome of one synchronization run.
///
/// A run that reaches the end of reconciliation reports `success` even when
/// individual products failed; callers detect degraded runs by checking
/// `errors` alongside `success`.
#[derive(Debug, Clone)]
pub struct SyncResult {
    pub success: bool,
    pub message: String,
    /// The shop the run used, when one was resolved. Callers that persist an
    /// auto-selected shop read it from here.
    pub shop_id: Option<u64>,
    /// Classes inserted this run.
    pub created: u32,
    /// Classes rewritten because name or description drifted.
    pub updated: u32,
    /// Products whose stored class already matched the derived values.
    pub unchanged: u32,
    /// Per-item failures, in product order; for aborted runs, the single
    /// abort reason.
    pub errors: Vec<String>,
}

impl SyncResult {
    fn aborted(reason: String, shop_id: Option<u64>) -> Self {
        Self {
            success: false,
            message: reason.clone(),
            shop_id,
            created: 0,
            updated: 0,
            unchanged: 0,
            errors: vec![reason],
        }
    }
}

/// Drives one vendor-to-store reconciliation pass.
///
/// The run is synchronous end to end: resolve the target shop, fetch the
/// product page and the provider catalog, join products to providers by id,
/// derive each class identity, and reconcile it against the store. Failures
/// during the resolution phases abort the run; failures on individual
/// products are collected and the loop continues.
pub struct Synchronizer<V, S> {
    vendor: V,
    store: S,
    log: Arc<dyn LogSink>,
    shop_id: Mutex<Option<u64>>,
    running: AtomicBool,
}

impl<V: Vendor, S: ClassStore> Synchronizer<V, S> {
    pub fn new(vendor: V, store: S, shop_id: Option<u64>, log: Arc<dyn LogSink>) -> Self {
        Self {
            vendor,
            store,
            log,
            shop_id: Mutex::new(shop_id),
            running: AtomicBool::new(false),
        }
    }

    /// The shop id the synchronizer targets, if known. Populated after the
    /// first run resolves one.
    pub fn shop_id(&self) -> Option<u64> {
        *self.shop_id.lock().unwrap()
    }

    /// Run one synchronization pass.
    ///
    /// At most one pass runs at a time; an overlapping call fails fast
    /// without touching the vendor or the store.
    pub async fn sync(&self) -> SyncResult {
        if self.running.swap(true, Ordering::SeqCst) {
            let reason = "Sync is already running.".to_owned();
            self.log.warning(&reason);
            return SyncResult::aborted(reason, self.shop_id());
        }

        let result = self.run().await;
        self.running.store(false, Ordering::SeqCst);
        result
    }

    async fn run(&self) -> SyncResult {
        let shop_id = match self.resolve_shop().await {
            Ok(id) => id,
            Err(reason) => return SyncResult::aborted(reason, self.shop_id()),
        };

        let products = match self.fetch_products(shop_id).await {
            Ok(products) => products,
            Err(reason) => return SyncResult::aborted(reason, Some(shop_id)),
        };

        let providers = match self.fetch_providers().await {
            Ok(providers) => providers,
            Err(reason) => return SyncResult::aborted(reason, Some(shop_id)),
        };

        let mut created = 0u32;
        let mut updated = 0u32;
        let mut unchanged = 0u32;
        let mut errors = Vec::new();

        for product in &products {
            let provider = product
                .print_provider_id
                .and_then(|id| providers.get(&id));

            let Some(provider) = provider else {
                errors.push(format!(
                    "Provider not found for product: {} (ID: {})",
                    product.title, product.id
                ));
                continue;
            };

            let name = rules::class_name(product, provider);
            let description = rules::class_description(product, provider);
            let slug = rules::class_slug(product, provider);

            match self.store.get_or_create(&name, &description, &slug).await {
                Ok(reconciled) => match reconciled.outcome {
                    ReconcileOutcome::Created => created += 1,
                    ReconcileOutcome::Updated => updated += 1,
                    ReconcileOutcome::Unchanged => unchanged += 1,
                },
                Err(e) => errors.push(e.to_string()),
            }
        }

        let message = format!(
            "Sync completed. Created: {created}, Updated: {updated}, Errors: {}",
            errors.len()
        );
        self.log.info(&message);

        SyncResult {
            success: true,
            message,
            shop_id: Some(shop_id),
            created,
            updated,
            unchanged,
            errors,
        }
    }

    /// Use the configured shop, or select the first shop the account
    /// returns and remember it for subsequent runs.
    async fn resolve_shop(&self) -> Result<u64, String> {
        if let Some(id) = self.shop_id() {
            return Ok(id);
        }

        let shops = match self.vendor.get_shops().await {
            Ok(shops) => shops,
            Err(e) => {
                let reason = e.to_string();
                self.log.error(&format!("Failed to get shops: {reason}"));
                return Err(reason);
            }
        };

        let Some(first) = shops.first() else {
            let reason = "No shops found in Printify account.".to_owned();
            self.log.error(&reason);
            return Err(reason);
        };

        *self.shop_id.lock().unwrap() = Some(first.id);
        Ok(first.id)
    }

    async fn fetch_products(&self, shop_id: u64) -> Result<Vec<Product>, String> {
        let page = match self
            .vendor
            .get_products(shop_id, SYNC_PAGE, SYNC_PAGE_LIMIT)
            .await
        {
            Ok(page) => page,
            Err(e) => {
                let reason = e.to_string();
                self.log.error(&format!("Failed to get products: {reason}"));
                return Err(reason);
            }
        };

        if page.data.is_empty() {
            let reason = "No products found in the Printify shop.".to_owned();
            self.log.error(&reason);
            return Err(reason);
        }

        Ok(page.data)
    }

    async fn fetch_providers(&self) -> Result<HashMap<u64, Provider>, String> {
        let providers = match self.vendor.get_print_providers().await {
            Ok(providers) => providers,
            Err(e) => {
                let reason = e.to_string();
                self.log.error(&format!("Failed to get print providers: {reason}"));
                return Err(reason);
            }
        };

        if providers.is_empty() {
            let reason = "No print providers found.".to_owned();
            self.log.error(&reason);
            return Err(reason);
        }

        Ok(providers.into_iter().map(|p| (p.id, p)).collect())
    }
}
