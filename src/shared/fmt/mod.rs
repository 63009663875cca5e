//! Display formatting for amounts.

pub mod num;
