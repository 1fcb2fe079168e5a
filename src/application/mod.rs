//! Application layer orchestrating the domain.
//!
//! `PaymentDispatcher` drives checkout sessions against the gateway, ledger
//! and auth ports. `Assistant` answers customer questions from an ordered
//! keyword table.

pub mod assistant;
pub mod dispatcher;
