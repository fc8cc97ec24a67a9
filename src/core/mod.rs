//! Core business logic layer
//!
//! Data structures, the match engine, adapter traits and the storefront
//! operations built on them.

pub mod data;
pub mod matching;
pub mod operations;
pub mod traits;
