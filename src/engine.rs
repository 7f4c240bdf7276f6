//! # Filter/Sort Engine
//!
//! Pure recomputation over the in-memory product collection. Consumers rerun
//! [`apply`] whenever any input changes; there is no dependency tracking and
//! no caching, the collection is small enough to filter on every change.
//!
//! Pipeline order is fixed: search, category, favorites-only, then sort. All
//! predicates apply conjunctively and no stage short-circuits another.

use std::collections::BTreeSet;

use crate::catalog::{CategoryFilter, Filters, Product, SortOption};

/// Filters and orders `products` without mutating them.
///
/// - Search keeps titles containing the search text case-insensitively;
///   empty search matches everything.
/// - Category keeps exact matches only (categories are canonical remote
///   strings, so the comparison is case-sensitive).
/// - When `show_favorites` is set, only members of `favorite_ids` survive.
/// - Sorting by price is stable: equal prices keep their relative order from
///   the prior stage. `SortOption::Default` keeps that order outright.
pub fn apply(products: &[Product], filters: &Filters, favorite_ids: &BTreeSet<u64>) -> Vec<Product> {
    let search = filters.search.to_lowercase();

    let mut result: Vec<Product> = products
        .iter()
        .filter(|product| {
            if !search.is_empty() && !product.title.to_lowercase().contains(&search) {
                return false;
            }

            if let CategoryFilter::Only(category) = &filters.category {
                if product.category != *category {
                    return false;
                }
            }

            if filters.show_favorites && !favorite_ids.contains(&product.id) {
                return false;
            }

            true
        })
        .cloned()
        .collect();

    match filters.sort {
        SortOption::Default => {}
        SortOption::PriceAsc => result.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortOption::PriceDesc => result.sort_by(|a, b| b.price.total_cmp(&a.price)),
    }

    result
}

/// Unique categories in first-seen order, for driving the category filter.
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut seen = BTreeSet::new();

    products
        .iter()
        .filter(|product| seen.insert(product.category.as_str()))
        .map(|product| product.category.clone())
        .collect()
}
