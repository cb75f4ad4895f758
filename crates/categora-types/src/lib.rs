//! Shared types, the store adapter trait, and core utilities for Categora.
//!
//! This crate contains the foundational pieces shared between the feature
//! crates (catalog, config, access) and all store adapter implementations:
//! the stored data model, the version status machine, the error taxonomy,
//! and the persistence gateway trait.

pub mod error;
pub mod prelude;
pub mod requests;
pub mod store_adapter;
pub mod types;
pub mod utils;

// vim: ts=4
