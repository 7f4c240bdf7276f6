//! # Catalog Model
//!
//! Product values as the remote API serves them, plus the filter state that
//! drives the visible subset.
//!
//! Categories are canonical remote-provided strings. The remote currently
//! serves four of them, but the field stays open-ended text: an unknown
//! category must filter, sort, and render without crashing, only the label
//! lookup falls back to the raw string.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// An item in the remote catalog. Created on fetch response, immutable after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub image: String,
    pub rating: Rating,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub rate: f64,
    pub count: u64,
}

/// Price ordering for the result list. `Default` keeps the order the filter
/// stages produced, which itself keeps the source collection's order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOption {
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
}

/// Category selection: everything, or exact matches of one category.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

/// Filter state owned by one view. Views share nothing through this; the
/// favorite set travels separately.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Filters {
    pub search: String,
    pub category: CategoryFilter,
    pub show_favorites: bool,
    pub sort: SortOption,
}

/// Display label for a category, falling back to the raw remote string for
/// anything unrecognized.
pub fn category_label(category: &str) -> &str {
    match category {
        "electronics" => "Electronics",
        "jewelery" => "Jewelry",
        "men's clothing" => "Men's",
        "women's clothing" => "Women's",
        other => other,
    }
}

/// Parses a product id from raw route input.
pub fn parse_product_id(raw: &str) -> Result<u64, ValidationError> {
    raw.trim()
        .parse()
        .map_err(|_| ValidationError::InvalidProductId(raw.to_string()))
}
