//! Adapters between the application services and the outside world.

pub mod csv;
