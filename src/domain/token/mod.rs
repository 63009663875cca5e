//! Token options for the currency picker.

use crate::domain::price::PriceTable;
use crate::network::PLACEHOLDER_ICON_URL;
use crate::shared::CurrencySymbol;
use serde::{Deserialize, Serialize};

/// One entry of the currency dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenOption {
    pub value: CurrencySymbol,
    pub label: String,
    pub image: String,
}

impl TokenOption {
    pub fn new(symbol: &CurrencySymbol, icon_base_url: &str) -> Self {
        Self {
            value: symbol.clone(),
            label: symbol.to_string(),
            image: icon_url(icon_base_url, symbol),
        }
    }

    /// One option per table entry, in table order.
    pub fn from_table(table: &PriceTable, icon_base_url: &str) -> Vec<Self> {
        table
            .symbols()
            .map(|symbol| Self::new(symbol, icon_base_url))
            .collect()
    }

    /// The option currently selected, if the symbol is among `options`.
    pub fn find<'a>(options: &'a [Self], symbol: &CurrencySymbol) -> Option<&'a Self> {
        options.iter().find(|o| &o.value == symbol)
    }

    /// Image to render when the icon at `self.image` fails to load.
    pub fn fallback_image(&self) -> &'static str {
        PLACEHOLDER_ICON_URL
    }
}

/// `{base}/{symbol}.svg`
pub fn icon_url(icon_base_url: &str, symbol: &CurrencySymbol) -> String {
    format!("{}/{}.svg", icon_base_url.trim_end_matches('/'), symbol)
}
