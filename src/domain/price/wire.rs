//! Wire types for the price endpoint (REST).

use crate::shared::serde_util::{lenient_f64, lenient_string};
use serde::{Deserialize, Serialize};

/// One raw entry of the price list, before validation.
///
/// Every field is optional and type mismatches decode as `None`, so a single
/// bad entry never fails the whole payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PriceResponse {
    #[serde(default, deserialize_with = "lenient_string::deserialize")]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "lenient_string::deserialize")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub price: Option<f64>,
}
