//! BeautyAI - match facial features to cultural beauty standards
//!
//! This library provides the match engine, catalog and persistence
//! adapters, the simulated analyzer, and the cart and session handling
//! behind the `beautyai` command line.

pub mod analysis;
pub mod cart;
pub mod cli;
pub mod config;
pub mod core;
pub mod manager;
pub mod session;
pub mod store;
pub mod utils;

// Re-export core types and traits for easier use
pub use analysis::{AnalysisFeature, AnalysisReport, AnalysisRequest, Analyzer, SimulatedAnalyzer};
pub use self::core::{
    data::{BeautyMatch, BeautyProduct, BeautyStandard, MatchRecord},
    matching::{best_match, match_percentage, rank},
    operations::Storefront,
    traits::{AuthProvider, MatchStore, ProductCatalog, StandardCatalog, Store},
};
pub use session::Session;
pub use utils::error::{AppError, AppResult};
