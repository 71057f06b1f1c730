//! Application layer: the services the outer shell calls into.
//!
//! `PayoutService` answers payout requests and `CustomerRepository`
//! coordinates cached reads with serialized, transactional writes. Both report
//! non-fatal outcomes through a per-request `Notifications` accumulator.

pub mod customers;
pub mod payout;
