//! Davenport
//!
//! Davenport is the cart and checkout core of a furniture storefront: a persistent cart store, a linear three-step checkout state machine, and the declarative field validation both share.

pub mod cart;
pub mod checkout;
pub mod fixtures;
pub mod pricing;
pub mod products;
pub mod storage;
pub mod validation;
