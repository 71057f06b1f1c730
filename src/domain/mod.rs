//! Domain layer: customer records, filters, payout combinations, the
//! notification accumulator and the ports the application layer depends on.

pub mod customer;
pub mod filters;
pub mod notification;
pub mod payout;
pub mod ports;
pub mod validation;
