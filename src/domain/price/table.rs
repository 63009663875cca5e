//! `PriceTable`: one price per symbol, last occurrence wins.

use super::PricePoint;
use crate::shared::CurrencySymbol;
use std::collections::HashMap;

/// Deduplicated mapping from currency symbol to its latest known price.
///
/// "Latest" means last in input order, not newest by `date`. Iteration
/// follows the order in which each symbol was first seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceTable {
    entries: Vec<PricePoint>,
    index: HashMap<CurrencySymbol, usize>,
}

impl PriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a raw price list into a table. Later duplicates overwrite earlier
    /// ones in place.
    pub fn build(points: impl IntoIterator<Item = PricePoint>) -> Self {
        let mut table = Self::new();
        for point in points {
            table.insert(point);
        }
        table
    }

    /// Insert or overwrite the entry for `point.currency`.
    pub fn insert(&mut self, point: PricePoint) {
        match self.index.get(&point.currency) {
            Some(&slot) => self.entries[slot] = point,
            None => {
                self.index.insert(point.currency.clone(), self.entries.len());
                self.entries.push(point);
            }
        }
    }

    pub fn get(&self, currency: &CurrencySymbol) -> Option<&PricePoint> {
        self.index.get(currency).map(|&slot| &self.entries[slot])
    }

    /// Resolved price for `currency`, if present.
    pub fn price_of(&self, currency: &CurrencySymbol) -> Option<f64> {
        self.get(currency).map(|p| p.price)
    }

    pub fn contains(&self, currency: &CurrencySymbol) -> bool {
        self.index.contains_key(currency)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PricePoint> {
        self.entries.iter()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &CurrencySymbol> {
        self.entries.iter().map(|p| &p.currency)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<PricePoint> for PriceTable {
    fn from_iter<I: IntoIterator<Item = PricePoint>>(iter: I) -> Self {
        Self::build(iter)
    }
}

impl<'a> IntoIterator for &'a PriceTable {
    type Item = &'a PricePoint;
    type IntoIter = std::slice::Iter<'a, PricePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
