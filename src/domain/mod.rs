//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains what it needs of:
//! - `mod.rs`: Rich domain types (validated, business-logic-ready)
//! - `wire.rs`: Raw serde structs matching the endpoint's payload
//! - `convert.rs`: `TryFrom` conversions with validation
//! - `state.rs`: State containers with update methods
//! - `client.rs`: Sub-client with HTTP methods and caching

pub mod price;
pub mod swap;
pub mod token;
