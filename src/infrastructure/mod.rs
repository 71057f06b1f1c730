//! Storage and cache adapters implementing the domain ports.

pub mod cache;
pub mod in_memory;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
