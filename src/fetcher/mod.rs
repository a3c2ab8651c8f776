//! Remote data access.
//!
//! The rest of the crate only sees the [`DataFetcher`] trait, so tests can
//! substitute a scripted implementation for the HTTP client.

pub mod poke_api;
pub mod wire;

use crate::detail::PokemonDetail;
use crate::errors::FetchResult;
use async_trait::async_trait;
use schema::{Category, PokemonEntry};
use std::collections::BTreeMap;

pub use poke_api::PokeApiClient;

/// Category value -> URL of the resource listing its members.
pub type CategoryIndex = BTreeMap<String, String>;

/// Retrieves plain data from the catalog provider. Implementations do no caching.
#[async_trait]
pub trait DataFetcher: Send + Sync {
    /// The first `limit` catalog entries in pokedex order.
    async fn fetch_catalog(&self, limit: usize) -> FetchResult<Vec<PokemonEntry>>;

    /// Every value of `category` together with its member-list URL.
    async fn fetch_category_index(&self, category: Category) -> FetchResult<CategoryIndex>;

    /// Names of the entries belonging to the category value behind `source_url`.
    async fn fetch_category_members(
        &self,
        category: Category,
        source_url: &str,
    ) -> FetchResult<Vec<String>>;

    /// The full record shown by the detail view.
    async fn fetch_entity_detail(&self, url: &str) -> FetchResult<PokemonDetail>;
}
