use crate::config::ServiceConfig;
use crate::domain::customer::{Customer, sort_by_name};
use crate::domain::filters::CustomerFilters;
use crate::domain::notification::Notifications;
use crate::domain::ports::{CacheStore, CacheStoreExt, CustomerStoreBox, CustomerTransactionBox};
use crate::domain::validation::CustomerValidatorBox;
use crate::error::Result;
use parking_lot::Mutex as EpochLock;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Message attached to candidates whose `Id` is already taken.
pub const ID_IN_USE_MESSAGE: &str = "Id in use.";
/// Key of the notification recorded when persistence fails.
pub const PERSISTENCE_ERROR_KEY: &str = "Error";
/// Status hint attached to persistence failures.
pub const PERSISTENCE_ERROR_STATUS: u16 = 400;

/// Coordinates cached reads and serialized, all-or-nothing writes over the
/// customer collection.
///
/// Writes hold `write_lock` for their whole duration, so at most one
/// `add_customers` call runs per repository. Reads are never blocked by it.
///
/// `cache_epoch` is bumped together with every cache clear; a read only
/// caches its result if no clear happened since it started, so a read racing
/// a commit cannot repopulate the cache with pre-commit rows.
pub struct CustomerRepository {
    store: CustomerStoreBox,
    cache: Arc<dyn CacheStore>,
    validator: CustomerValidatorBox,
    read_ttl: Option<Duration>,
    write_lock: Mutex<()>,
    cache_epoch: EpochLock<u64>,
}

impl CustomerRepository {
    pub fn new(
        store: CustomerStoreBox,
        cache: Arc<dyn CacheStore>,
        validator: CustomerValidatorBox,
    ) -> Self {
        Self::with_config(store, cache, validator, &ServiceConfig::default())
    }

    pub fn with_config(
        store: CustomerStoreBox,
        cache: Arc<dyn CacheStore>,
        validator: CustomerValidatorBox,
        config: &ServiceConfig,
    ) -> Self {
        Self {
            store,
            cache,
            validator,
            read_ttl: config.cache_absolute_ttl(),
            write_lock: Mutex::new(()),
            cache_epoch: EpochLock::new(0),
        }
    }

    /// Lists customers matching `filters`, serving repeated filters from cache.
    ///
    /// An empty result is a normal outcome and is cached like any other.
    pub async fn list_customers(&self, filters: &CustomerFilters) -> Result<Vec<Customer>> {
        filters.validate()?;
        let key = filters.cache_key();

        if let Some(customers) = self.cache.get_as::<Vec<Customer>>(&key) {
            tracing::debug!(key = %key, count = customers.len(), "customer list served from cache");
            return Ok(customers);
        }

        let epoch = *self.cache_epoch.lock();
        let customers = self.store.query(filters).await?;
        tracing::debug!(key = %key, count = customers.len(), "customer list loaded from store");

        let current = self.cache_epoch.lock();
        if *current == epoch {
            self.cache.set_as(&key, &customers, self.read_ttl)?;
        }
        Ok(customers)
    }

    /// Validates, deduplicates and merges `candidates` into the stored set.
    ///
    /// Returns the full stored set in `(last_name, first_name)` order, or
    /// `None` when nothing was written. Rejected candidates and persistence
    /// failures are reported through `notifications`; they never surface as
    /// errors.
    pub async fn add_customers(
        &self,
        candidates: Vec<Customer>,
        notifications: &mut Notifications,
    ) -> Option<Vec<Customer>> {
        let _guard = self.write_lock.lock().await;

        let mut tx = match self.store.begin().await {
            Ok(tx) => tx,
            Err(e) => {
                tracing::error!(error = %e, "failed to open customer transaction");
                notifications.add_with_status(
                    PERSISTENCE_ERROR_KEY,
                    e.to_string(),
                    PERSISTENCE_ERROR_STATUS,
                );
                return None;
            }
        };

        let outcome = self.write_in(&mut tx, candidates, notifications).await;
        match outcome {
            Ok(Some(customers)) => match tx.commit().await {
                Ok(()) => {
                    self.invalidate_cache();
                    tracing::info!(count = customers.len(), "customer set replaced");
                    Some(customers)
                }
                Err(e) => {
                    // Commit failures leave nothing staged behind.
                    tracing::error!(error = %e, "customer commit failed");
                    notifications.add_with_status(
                        PERSISTENCE_ERROR_KEY,
                        e.to_string(),
                        PERSISTENCE_ERROR_STATUS,
                    );
                    None
                }
            },
            Ok(None) => {
                tracing::debug!("no customer accepted, rolling back");
                Self::rollback(tx).await;
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "customer write failed, rolling back");
                Self::rollback(tx).await;
                notifications.add_with_status(
                    PERSISTENCE_ERROR_KEY,
                    e.to_string(),
                    PERSISTENCE_ERROR_STATUS,
                );
                None
            }
        }
    }

    fn invalidate_cache(&self) {
        let mut epoch = self.cache_epoch.lock();
        *epoch += 1;
        self.cache.clear_all();
    }

    async fn write_in(
        &self,
        tx: &mut CustomerTransactionBox,
        candidates: Vec<Customer>,
        notifications: &mut Notifications,
    ) -> Result<Option<Vec<Customer>>> {
        let existing = tx.customers().await?;
        let mut taken_ids: HashSet<i32> = existing.iter().map(|c| c.id).collect();

        let mut accepted = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let errors = self.validator.validate(&candidate);
            if !errors.is_empty() {
                notifications.add_many(errors);
                continue;
            }

            if !taken_ids.insert(candidate.id) {
                notifications.add(candidate.id.to_string(), ID_IN_USE_MESSAGE);
                continue;
            }

            accepted.push(candidate);
        }

        if accepted.is_empty() {
            return Ok(None);
        }

        let mut merged = existing;
        merged.extend(accepted);
        sort_by_name(&mut merged);

        tx.replace_all(merged.clone()).await?;
        Ok(Some(merged))
    }

    async fn rollback(tx: CustomerTransactionBox) {
        if let Err(e) = tx.rollback().await {
            tracing::error!(error = %e, "customer rollback failed");
        }
    }
}
