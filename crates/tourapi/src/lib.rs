//! Client library for the Korea Tourism Organization open API.
//!
//! Provides the HTTP client for listing, search, detail and pet-travel
//! endpoints, normalization of the API's response envelope, a fixed-delay
//! retry helper, and the concurrent per-category statistics aggregator.

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod retry;
pub mod stats;
pub mod wire;

pub use client::{CategoryFilter, ListQuery, Page, TourApiClient};
pub use config::TourApiConfig;
pub use error::TourApiError;
