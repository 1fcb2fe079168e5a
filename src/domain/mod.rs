//! Domain layer: installment arithmetic, the payment-method catalog, request
//! validation, the checkout session state machine and the ports the
//! application layer drives.

pub mod good;
pub mod method;
pub mod money;
pub mod plan;
pub mod ports;
pub mod request;
pub mod savings;
pub mod session;
