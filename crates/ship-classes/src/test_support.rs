//! In-memory fakes shared by synchronizer and adapter tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU32, Ordering};

use crate::catalog::{Product, ProductPage, Provider, Shop};
use crate::class::ShippingClass;
use crate::log::{LogLevel, LogSink};
use crate::store::{ClassStore, StoreError};
use crate::vendor::{Vendor, VendorError};

pub fn shop(id: u64, title: &str) -> Shop {
    Shop {
        id,
        title: title.to_owned(),
    }
}

pub fn product(id: &str, title: &str, print_provider_id: Option<u64>) -> Product {
    Product {
        id: id.to_owned(),
        title: title.to_owned(),
        print_provider_id,
    }
}

pub fn provider(id: u64, title: &str) -> Provider {
    Provider {
        id,
        title: title.to_owned(),
    }
}

/// Canned-response vendor. Records every call so tests can assert which
/// endpoints a run touched.
#[derive(Default)]
pub struct FakeVendor {
    shops: Vec<Shop>,
    products: Vec<Product>,
    providers: Vec<Provider>,
    fail_shops: Option<String>,
    fail_products: Option<String>,
    fail_providers: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeVendor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shops(mut self, shops: Vec<Shop>) -> Self {
        self.shops = shops;
        self
    }

    pub fn with_products(mut self, products: Vec<Product>) -> Self {
        self.products = products;
        self
    }

    pub fn with_providers(mut self, providers: Vec<Provider>) -> Self {
        self.providers = providers;
        self
    }

    pub fn failing_shops(mut self, message: &str) -> Self {
        self.fail_shops = Some(message.to_owned());
        self
    }

    pub fn failing_products(mut self, message: &str) -> Self {
        self.fail_products = Some(message.to_owned());
        self
    }

    pub fn failing_providers(mut self, message: &str) -> Self {
        self.fail_providers = Some(message.to_owned());
        self
    }

    /// Endpoint names in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

#[async_trait::async_trait]
impl Vendor for FakeVendor {
    async fn get_shops(&self) -> Result<Vec<Shop>, VendorError> {
        self.record("get_shops");
        if let Some(message) = &self.fail_shops {
            return Err(VendorError::Connection(message.clone()));
        }
        Ok(self.shops.clone())
    }

    async fn get_products(
        &self,
        shop_id: u64,
        page: u32,
        limit: u32,
    ) -> Result<ProductPage, VendorError> {
        self.record(format!("get_products/{shop_id}/{page}/{limit}"));
        if let Some(message) = &self.fail_products {
            return Err(VendorError::Connection(message.clone()));
        }
        Ok(ProductPage {
            data: self.products.clone(),
            last_page: 1,
        })
    }

    async fn get_print_providers(&self) -> Result<Vec<Provider>, VendorError> {
        self.record("get_print_providers");
        if let Some(message) = &self.fail_providers {
            return Err(VendorError::Connection(message.clone()));
        }
        Ok(self.providers.clone())
    }
}

/// HashMap-backed class store with failure injection and a write counter,
/// so tests can assert that no-op reconciliations issue no writes.
#[derive(Default)]
pub struct MemoryStore {
    classes: Mutex<HashMap<String, ShippingClass>>,
    next_id: AtomicI64,
    writes: AtomicU32,
    fail_next_create: AtomicBool,
    fail_all_creates: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of create and update calls that reached storage.
    pub fn write_count(&self) -> u32 {
        self.writes.load(Ordering::SeqCst)
    }

    /// Make the next create fail as if the slug were taken concurrently.
    pub fn fail_next_create(&self) {
        self.fail_next_create.store(true, Ordering::SeqCst);
    }

    /// Make every create fail.
    pub fn fail_all_creates(&self) {
        self.fail_all_creates.store(true, Ordering::SeqCst);
    }

    /// Seed a record directly, bypassing the write counter.
    pub fn seed(&self, class: ShippingClass) {
        self.classes
            .lock()
            .unwrap()
            .insert(class.slug.clone(), class);
    }
}

#[async_trait::async_trait]
impl ClassStore for MemoryStore {
    async fn list(&self) -> Result<HashMap<String, ShippingClass>, StoreError> {
        Ok(self.classes.lock().unwrap().clone())
    }

    async fn create(
        &self,
        name: &str,
        description: &str,
        slug: &str,
    ) -> Result<ShippingClass, StoreError> {
        if self.fail_all_creates.load(Ordering::SeqCst)
            || self.fail_next_create.swap(false, Ordering::SeqCst)
        {
            return Err(StoreError::Database("simulated create failure".to_owned()));
        }

        let mut classes = self.classes.lock().unwrap();
        if classes.contains_key(slug) {
            return Err(StoreError::DuplicateSlug(slug.to_owned()));
        }

        let class = ShippingClass {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            name: name.to_owned(),
            slug: slug.to_owned(),
            description: description.to_owned(),
        };
        classes.insert(slug.to_owned(), class.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(class)
    }

    async fn update(
        &self,
        id: i64,
        name: &str,
        description: &str,
        slug: &str,
    ) -> Result<ShippingClass, StoreError> {
        let mut classes = self.classes.lock().unwrap();

        let old_slug = classes
            .values()
            .find(|class| class.id == id)
            .map(|class| class.slug.clone())
            .ok_or(StoreError::NotFound(id))?;

        classes.remove(&old_slug);
        let class = ShippingClass {
            id,
            name: name.to_owned(),
            slug: slug.to_owned(),
            description: description.to_owned(),
        };
        classes.insert(slug.to_owned(), class.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(class)
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut classes = self.classes.lock().unwrap();
        let slug = classes
            .values()
            .find(|class| class.id == id)
            .map(|class| class.slug.clone())
            .ok_or(StoreError::NotFound(id))?;
        classes.remove(&slug);
        Ok(())
    }
}

/// Sink that buffers lines for assertions.
#[derive(Default)]
pub struct MemorySink {
    lines: Mutex<Vec<(LogLevel, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(LogLevel, String)> {
        self.lines.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .map(|(_, message)| message.clone())
            .collect()
    }
}

impl LogSink for MemorySink {
    fn log(&self, message: &str, level: LogLevel) {
        self.lines
            .lock()
            .unwrap()
            .push((level, message.to_owned()));
    }
}
