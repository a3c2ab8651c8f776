//! Multi-criteria filtering of the catalog.
//!
//! An entry survives a filter pass when all four predicates hold: free text,
//! type, color and gender. Category predicates consult the [`LookupCache`],
//! which may suspend on a network fetch the first time a value is used.

use crate::lookup_cache::LookupCache;
use futures::future::join_all;
use schema::{Category, FilterSelection, GenderFilter, PokemonEntry};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

pub struct FilterEngine {
    cache: Arc<LookupCache>,
}

impl FilterEngine {
    pub fn new(cache: Arc<LookupCache>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &Arc<LookupCache> {
        &self.cache
    }

    /// Returns the entries of `catalog` matching `selection`, in catalog order.
    ///
    /// Entries are evaluated concurrently; the result is only assembled once
    /// every evaluation has settled. A member lookup that fails is fetched once
    /// per pass and retried by the next one.
    pub async fn apply(
        &self,
        catalog: &[PokemonEntry],
        selection: &FilterSelection,
    ) -> Vec<PokemonEntry> {
        let query = selection.normalized_query();
        let verdicts = join_all(
            catalog
                .iter()
                .map(|entry| self.matches(entry, &query, selection)),
        )
        .await;
        self.cache.forget_failures();

        let result: Vec<PokemonEntry> = catalog
            .iter()
            .zip(verdicts)
            .filter_map(|(entry, keep)| keep.then(|| entry.clone()))
            .collect();

        debug!(
            catalog = catalog.len(),
            matched = result.len(),
            %selection,
            "filter pass settled"
        );
        result
    }

    async fn matches(&self, entry: &PokemonEntry, query: &str, selection: &FilterSelection) -> bool {
        let (types, colors, gender) = futures::join!(
            self.matches_any(Category::Type, &selection.types, &entry.name),
            self.matches_any(Category::Color, &selection.colors, &entry.name),
            self.matches_gender(&selection.gender, &entry.name),
        );
        matches_text(entry, query) && types && colors && gender
    }

    /// OR across the selected values; an empty selection matches everything.
    async fn matches_any(&self, category: Category, values: &BTreeSet<String>, name: &str) -> bool {
        if values.is_empty() {
            return true;
        }
        let member_sets = join_all(
            values
                .iter()
                .map(|value| self.cache.resolve_members(category, value)),
        )
        .await;
        member_sets.iter().any(|members| members.contains(name))
    }

    async fn matches_gender(&self, gender: &GenderFilter, name: &str) -> bool {
        match gender {
            GenderFilter::All => true,
            GenderFilter::Only(value) => self
                .cache
                .resolve_members(Category::Gender, value)
                .await
                .contains(name),
        }
    }
}

/// Text predicate. `query` must already be trimmed and lowercased.
///
/// Matches a substring of the name, or of the id written in decimal.
pub fn matches_text(entry: &PokemonEntry, query: &str) -> bool {
    query.is_empty() || entry.name.contains(query) || entry.id.to_string().contains(query)
}
