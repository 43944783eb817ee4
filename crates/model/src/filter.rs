use crate::{bucket::PriceRange, month::DateWindow, transaction::Transaction};

/// Free-text search term. Text fields are matched as a case-insensitive
/// substring; the price is compared only when the term is a number.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchTerm {
    text: String,
    price: Option<f64>,
}

impl SearchTerm {
    /// Returns `None` for a blank term.
    pub fn parse(raw: &str) -> Option<SearchTerm> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }
        let price = text.parse::<f64>().ok().filter(|price| price.is_finite());
        Some(SearchTerm {
            text: text.to_owned(),
            price,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn price(&self) -> Option<f64> {
        self.price
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        let needle = self.text.to_lowercase();
        tx.title.to_lowercase().contains(&needle)
            || tx.description.to_lowercase().contains(&needle)
            || self.price.map_or(false, |price| tx.price == price)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransactionFilter {
    pub window: Option<DateWindow>,
    pub search: Option<SearchTerm>,
    pub price: Option<PriceRange>,
}

impl TransactionFilter {
    pub fn all() -> Self {
        TransactionFilter::default()
    }

    pub fn in_window(window: DateWindow) -> Self {
        TransactionFilter {
            window: Some(window),
            ..Default::default()
        }
    }

    pub fn with_search(mut self, search: Option<SearchTerm>) -> Self {
        self.search = search;
        self
    }

    pub fn with_price(mut self, price: PriceRange) -> Self {
        self.price = Some(price);
        self
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        if let Some(window) = &self.window {
            if !window.contains(tx.date_of_sale) {
                return false;
            }
        }
        if let Some(price) = &self.price {
            if !price.contains(tx.price) {
                return false;
            }
        }
        if let Some(search) = &self.search {
            if !search.matches(tx) {
                return false;
            }
        }
        true
    }
}
