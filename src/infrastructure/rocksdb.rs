use crate::domain::customer::Customer;
use crate::domain::filters::CustomerFilters;
use crate::domain::ports::{CustomerStore, CustomerTransaction, CustomerTransactionBox};
use crate::error::{Result, ServiceError};
use crate::infrastructure::in_memory::ensure_unique_ids;
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, IteratorMode, Options, WriteBatch};
use std::path::Path;
use std::sync::Arc;

/// Column Family holding the customer table.
pub const CF_CUSTOMERS: &str = "customers";

/// A persistent customer table backed by RocksDB.
///
/// Rows are keyed by their big-endian position, so a forward scan returns them
/// in stored order. Commits are a single `WriteBatch` that clears the table and
/// writes the new rows, so readers never observe a half-replaced table.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDbCustomerStore {
    db: Arc<DB>,
}

impl RocksDbCustomerStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the "customers" column family exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_customers = ColumnFamilyDescriptor::new(CF_CUSTOMERS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_customers])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn customers_cf(db: &DB) -> Result<&ColumnFamily> {
        db.cf_handle(CF_CUSTOMERS)
            .ok_or_else(|| ServiceError::Storage("Customers column family not found".to_string()))
    }

    fn load(db: &DB) -> Result<Vec<Customer>> {
        let cf = Self::customers_cf(db)?;
        let mut customers = Vec::new();
        for item in db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = item?;
            customers.push(serde_json::from_slice(&value)?);
        }
        Ok(customers)
    }
}

#[async_trait]
impl CustomerStore for RocksDbCustomerStore {
    async fn all(&self) -> Result<Vec<Customer>> {
        Self::load(&self.db)
    }

    async fn query(&self, filters: &CustomerFilters) -> Result<Vec<Customer>> {
        let mut customers = Self::load(&self.db)?;
        customers.retain(|customer| filters.matches(customer));
        Ok(customers)
    }

    async fn begin(&self) -> Result<CustomerTransactionBox> {
        Ok(Box::new(RocksDbTransaction {
            db: Arc::clone(&self.db),
            snapshot: Self::load(&self.db)?,
            staged: None,
        }))
    }
}

struct RocksDbTransaction {
    db: Arc<DB>,
    snapshot: Vec<Customer>,
    staged: Option<Vec<Customer>>,
}

#[async_trait]
impl CustomerTransaction for RocksDbTransaction {
    async fn customers(&mut self) -> Result<Vec<Customer>> {
        Ok(self.staged.as_ref().unwrap_or(&self.snapshot).clone())
    }

    async fn replace_all(&mut self, customers: Vec<Customer>) -> Result<()> {
        self.staged = Some(customers);
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        let this = *self;
        let Some(rows) = this.staged else {
            return Ok(());
        };
        ensure_unique_ids(&rows)?;

        let position_limit = u32::try_from(rows.len())
            .map_err(|_| ServiceError::Storage("too many customer rows".to_string()))?;

        let cf = RocksDbCustomerStore::customers_cf(&this.db)?;
        let mut batch = WriteBatch::default();
        batch.delete_range_cf(cf, 0u32.to_be_bytes(), u32::MAX.to_be_bytes());
        for (position, customer) in (0..position_limit).zip(&rows) {
            batch.put_cf(cf, position.to_be_bytes(), serde_json::to_vec(customer)?);
        }
        this.db.write(batch)?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        Ok(())
    }
}
