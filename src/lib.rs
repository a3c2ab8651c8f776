// In: src/lib.rs

//! Pokemon Catalog Engine
//!
//! Loads the Pokemon catalog from PokeAPI and narrows it with a free-text
//! search plus type, color and gender filters. Category memberships are
//! fetched lazily and memoized; results are handed out in fixed-size batches.

// --- MODULE DECLARATIONS ---
pub mod config;
pub mod detail;
pub mod errors;
pub mod fetcher;
pub mod filter;
pub mod logging;
pub mod lookup_cache;
pub mod mcp_interface;
pub mod pagination;
pub mod render;
pub mod session;

#[cfg(test)]
mod tests;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{Category, FilterSelection, GenderFilter, PokemonEntry};

// --- From this crate's modules (`src/`) ---

// Core engine and its state.
pub use filter::FilterEngine;
pub use lookup_cache::{LookupCache, MemberSet};
pub use pagination::{Batch, Paginator};
pub use session::{CatalogSession, FilterOutcome};

// Collaborator seams.
pub use fetcher::{CategoryIndex, DataFetcher, PokeApiClient};
pub use render::{RenderSink, TextCardSink};

pub use config::{CatalogConfig, StalePassPolicy};
pub use detail::PokemonDetail;

// Crate-specific error and result types.
pub use errors::{
    CatalogError, CatalogResult, ConfigError, ConfigResult, FetchError, FetchResult,
    SelectionError,
};
