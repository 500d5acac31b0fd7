use std::collections::HashMap;
use std::sync::Arc;

use crate::class::{Reconciled, ReconcileOutcome, ShippingClass};
use crate::rules;

/// Errors from the taxonomy store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(String),

    #[error("migration error: {0}")]
    Migration(String),

    #[error("a shipping class with slug '{0}' already exists")]
    DuplicateSlug(String),

    #[error("no shipping class with id {0}")]
    NotFound(i64),
}

/// Keyed CRUD over shipping-class records.
///
/// `get_or_create` carries the reconciliation policy and is provided here so
/// every backing store shares it; implementations only supply the raw
/// operations.
#[async_trait::async_trait]
pub trait ClassStore: Send + Sync {
    /// Enumerate every stored class keyed by slug, including classes no
    /// product currently references.
    async fn list(&self) -> Result<HashMap<String, ShippingClass>, StoreError>;

    async fn create(
        &self,
        name: &str,
        description: &str,
        slug: &str,
    ) -> Result<ShippingClass, StoreError>;

    async fn update(
        &self,
        id: i64,
        name: &str,
        description: &str,
        slug: &str,
    ) -> Result<ShippingClass, StoreError>;

    /// Remove a class. Unused by the sync path; kept for operator tooling.
    async fn delete(&self, id: i64) -> Result<(), StoreError>;

    /// Create-or-update-if-different.
    ///
    /// An empty `slug` is derived by slugifying `name`. A stored record that
    /// already matches is returned without a write, making back-to-back
    /// calls with identical arguments a single persisted mutation. A failed
    /// create is retried once under a fresh suffixed slug (the slug may have
    /// been taken by an external writer between the listing and the insert);
    /// a second failure propagates the original error, which callers treat
    /// as a per-item failure rather than an abort.
    async fn get_or_create(
        &self,
        name: &str,
        description: &str,
        slug: &str,
    ) -> Result<Reconciled, StoreError> {
        let slug = if slug.is_empty() {
            rules::slugify(name)
        } else {
            slug.to_owned()
        };

        let existing = self.list().await?;

        if let Some(current) = existing.get(&slug) {
            if current.name == name && current.description == description {
                return Ok(Reconciled {
                    class: current.clone(),
                    outcome: ReconcileOutcome::Unchanged,
                });
            }

            let class = self.update(current.id, name, description, &slug).await?;
            return Ok(Reconciled {
                class,
                outcome: ReconcileOutcome::Updated,
            });
        }

        match self.create(name, description, &slug).await {
            Ok(class) => Ok(Reconciled {
                class,
                outcome: ReconcileOutcome::Created,
            }),
            Err(first) => {
                let retry_slug = format!("{}-{}", rules::slugify(name), rules::unique_suffix());
                match self.create(name, description, &retry_slug).await {
                    Ok(class) => Ok(Reconciled {
                        class,
                        outcome: ReconcileOutcome::Created,
                    }),
                    Err(_) => Err(first),
                }
            }
        }
    }
}

#[async_trait::async_trait]
impl<T: ClassStore + ?Sized> ClassStore for Arc<T> {
    async fn list(&self) -> Result<HashMap<String, ShippingClass>, StoreError> {
        (**self).list().await
    }

    async fn create(
        &self,
        name: &str,
        description: &str,
        slug: &str,
    ) -> Result<ShippingClass, StoreError> {
        (**self).create(name, description, slug).await
    }

    async fn update(
        &self,
        id: i64,
        name: &str,
        description: &str,
        slug: &str,
    ) -> Result<ShippingClass, StoreError> {
        (**self).update(id, name, description, slug).await
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        (**self).delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MemoryStore;

    #[tokio::test]
    async fn get_or_create_inserts_missing_slug() {
        let store = MemoryStore::default();

        let result = store
            .get_or_create("Acme - Tee", "Tee class", "printify-7-abc")
            .await
            .unwrap();

        assert_eq!(result.outcome, ReconcileOutcome::Created);
        assert_eq!(result.class.slug, "printify-7-abc");
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn get_or_create_is_a_noop_on_matching_record() {
        let store = MemoryStore::default();

        store
            .get_or_create("Acme - Tee", "Tee class", "printify-7-abc")
            .await
            .unwrap();
        let second = store
            .get_or_create("Acme - Tee", "Tee class", "printify-7-abc")
            .await
            .unwrap();

        assert_eq!(second.outcome, ReconcileOutcome::Unchanged);
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn get_or_create_rewrites_on_description_drift() {
        let store = MemoryStore::default();

        let created = store
            .get_or_create("Acme - Tee", "Old description", "printify-7-abc")
            .await
            .unwrap();
        let updated = store
            .get_or_create("Acme - Tee", "New description", "printify-7-abc")
            .await
            .unwrap();

        assert_eq!(updated.outcome, ReconcileOutcome::Updated);
        assert_eq!(updated.class.id, created.class.id);
        assert_eq!(updated.class.description, "New description");
        assert_eq!(store.write_count(), 2);
    }

    #[tokio::test]
    async fn get_or_create_rewrites_on_name_drift() {
        let store = MemoryStore::default();

        store
            .get_or_create("Old Name", "Same description", "printify-7-abc")
            .await
            .unwrap();
        let updated = store
            .get_or_create("New Name", "Same description", "printify-7-abc")
            .await
            .unwrap();

        assert_eq!(updated.outcome, ReconcileOutcome::Updated);
        assert_eq!(updated.class.name, "New Name");
    }

    #[tokio::test]
    async fn get_or_create_derives_slug_from_name_when_empty() {
        let store = MemoryStore::default();

        let result = store
            .get_or_create("Acme Print Co - Classic Tee", "desc", "")
            .await
            .unwrap();

        assert_eq!(result.class.slug, "acme-print-co-classic-tee");
    }

    #[tokio::test]
    async fn get_or_create_retries_create_under_suffixed_slug() {
        let store = MemoryStore::default();
        store.fail_next_create();

        let result = store
            .get_or_create("Acme - Tee", "desc", "printify-7-abc")
            .await
            .unwrap();

        assert_eq!(result.outcome, ReconcileOutcome::Created);
        assert_ne!(result.class.slug, "printify-7-abc");
        assert!(result.class.slug.starts_with("acme-tee-"));
    }

    #[tokio::test]
    async fn get_or_create_surfaces_error_when_retry_also_fails() {
        let store = MemoryStore::default();
        store.fail_all_creates();

        let result = store
            .get_or_create("Acme - Tee", "desc", "printify-7-abc")
            .await;

        assert!(matches!(result, Err(StoreError::Database(_))));
    }
}
