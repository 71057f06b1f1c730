use super::customer::Customer;
use super::filters::CustomerFilters;
use crate::error::Result;
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// Persistent customer collection. Readers only ever see committed state.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Every committed customer, in stored order.
    async fn all(&self) -> Result<Vec<Customer>>;
    /// Committed customers matching `filters`, in stored order.
    async fn query(&self, filters: &CustomerFilters) -> Result<Vec<Customer>>;
    /// Opens a transaction whose staged changes stay invisible until commit.
    async fn begin(&self) -> Result<CustomerTransactionBox>;
}

/// A unit of work over the customer collection.
#[async_trait]
pub trait CustomerTransaction: Send {
    /// The collection as seen by this transaction, including staged changes.
    async fn customers(&mut self) -> Result<Vec<Customer>>;
    /// Stages replacing the whole collection with `customers`, in this order.
    async fn replace_all(&mut self, customers: Vec<Customer>) -> Result<()>;
    /// Publishes staged changes atomically. Fails without side effects if the
    /// staged collection violates the `Id` primary key.
    async fn commit(self: Box<Self>) -> Result<()>;
    async fn rollback(self: Box<Self>) -> Result<()>;
}

pub type CustomerStoreBox = Box<dyn CustomerStore>;
pub type CustomerTransactionBox = Box<dyn CustomerTransaction>;

/// Key/value cache with expiring entries and bulk invalidation.
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;
    /// Stores `value` with the default sliding expiration, optionally capped by
    /// an absolute expiration relative to now.
    fn set(&self, key: &str, value: Value, absolute_ttl: Option<Duration>);
    /// Removes every key this store has tracked.
    fn clear_all(&self);
}

/// Typed access on top of [`CacheStore`].
pub trait CacheStoreExt: CacheStore {
    /// Returns `None` on a miss or when the cached value does not decode as `T`.
    fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get(key)
            .and_then(|value| serde_json::from_value(value).ok())
    }

    fn set_as<T: Serialize>(&self, key: &str, item: &T, absolute_ttl: Option<Duration>) -> Result<()> {
        let value = serde_json::to_value(item)?;
        self.set(key, value, absolute_ttl);
        Ok(())
    }
}

impl<C: CacheStore + ?Sized> CacheStoreExt for C {}
