//! # Product Explorer
//!
//! Core of a catalog browser over a remote product API.
//!
//! ## Pipeline
//!
//! - [`remote`] fetches the full product collection from the remote JSON API
//! - [`engine`] filters and sorts it in memory (search, category, favorites, price)
//! - [`favorites`] tracks the persisted favorite set shared across views
//! - [`reveal`] grows the visible prefix of the result list page by page
//!
//! The presentation layer consumes the ordered slice produced at the end of
//! that chain. Nothing here renders; the `explorer` binary is a plain-text
//! stand-in consumer.
//!
//! ## Remote API
//!
//! Shaped like fakestoreapi:
//! - `GET /products` -> JSON array of products
//! - `GET /products/{id}` -> JSON product or 404
//! - `GET /products/categories` -> JSON array of category strings
//!
//! Treated as an opaque external collaborator, no compatibility guarantees on
//! our side. Every call is a fresh round trip, no retries or caching.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod favorites;
pub mod remote;
pub mod reveal;
