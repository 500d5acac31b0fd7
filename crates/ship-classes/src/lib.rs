pub mod catalog;
pub mod class;
pub mod log;
pub mod rules;
pub mod store;
pub mod sync;
pub mod vendor;

pub use catalog::{Product, ProductPage, Provider, Shop};
pub use class::{Reconciled, ReconcileOutcome, ShippingClass};
pub use log::{LogLevel, LogSink, NullSink};
pub use store::{ClassStore, StoreError};
pub use sync::{SyncResult, Synchronizer};
pub use vendor::{Vendor, VendorError};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
