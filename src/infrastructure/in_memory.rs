use crate::domain::customer::Customer;
use crate::domain::filters::CustomerFilters;
use crate::domain::ports::{CustomerStore, CustomerTransaction, CustomerTransactionBox};
use crate::error::{Result, ServiceError};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Table {
    rows: Vec<Customer>,
    version: u64,
}

/// A thread-safe in-memory customer table.
///
/// Uses `Arc<RwLock<..>>` so clones share the same rows. Transactions stage
/// their changes privately and swap them in under the write lock on commit.
#[derive(Default, Clone)]
pub struct InMemoryCustomerStore {
    table: Arc<RwLock<Table>>,
}

impl InMemoryCustomerStore {
    /// Creates a new, empty in-memory customer store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `customers`, in the given order.
    pub fn with_customers(customers: Vec<Customer>) -> Result<Self> {
        ensure_unique_ids(&customers)?;
        Ok(Self {
            table: Arc::new(RwLock::new(Table {
                rows: customers,
                version: 0,
            })),
        })
    }
}

#[async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn all(&self) -> Result<Vec<Customer>> {
        let table = self.table.read().await;
        Ok(table.rows.clone())
    }

    async fn query(&self, filters: &CustomerFilters) -> Result<Vec<Customer>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .filter(|customer| filters.matches(customer))
            .cloned()
            .collect())
    }

    async fn begin(&self) -> Result<CustomerTransactionBox> {
        let table = self.table.read().await;
        Ok(Box::new(InMemoryTransaction {
            table: Arc::clone(&self.table),
            base_version: table.version,
            snapshot: table.rows.clone(),
            staged: None,
        }))
    }
}

struct InMemoryTransaction {
    table: Arc<RwLock<Table>>,
    base_version: u64,
    snapshot: Vec<Customer>,
    staged: Option<Vec<Customer>>,
}

#[async_trait]
impl CustomerTransaction for InMemoryTransaction {
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

        let mut table = this.table.write().await;
        if table.version != this.base_version {
            return Err(ServiceError::Storage(
                "customer table was modified by another transaction".to_string(),
            ));
        }
        table.rows = rows;
        table.version += 1;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        Ok(())
    }
}

/// Enforces the `Id` primary key over a full set of rows.
pub(crate) fn ensure_unique_ids(customers: &[Customer]) -> Result<()> {
    let mut ids = HashSet::with_capacity(customers.len());
    for customer in customers {
        if !ids.insert(customer.id) {
            return Err(ServiceError::Storage(format!(
                "duplicate primary key Id {}",
                customer.id
            )));
        }
    }
    Ok(())
}
