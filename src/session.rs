//! A loaded catalog together with its filter and pagination state.
//!
//! All UI entry points go through [`CatalogSession`]: a selection change runs
//! a filter pass, publishes the result in one step and the caller then pulls
//! batches into a [`RenderSink`] explicitly.

use crate::config::{CatalogConfig, StalePassPolicy};
use crate::detail::PokemonDetail;
use crate::errors::{CatalogError, CatalogResult};
use crate::fetcher::DataFetcher;
use crate::filter::FilterEngine;
use crate::lookup_cache::LookupCache;
use crate::pagination::{Batch, Paginator};
use crate::render::RenderSink;
use schema::{Category, FilterSelection, PokemonEntry};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::info;

/// What became of a filter pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOutcome {
    pub generation: u64,
    /// False when the pass was superseded and its result dropped.
    pub published: bool,
    pub matched: usize,
}

pub struct CatalogSession {
    catalog: Arc<Vec<PokemonEntry>>,
    engine: FilterEngine,
    fetcher: Arc<dyn DataFetcher>,
    pages: Mutex<Paginator>,
    generation: AtomicU64,
    policy: StalePassPolicy,
}

impl CatalogSession {
    /// Loads the catalog and every category index.
    ///
    /// Any failure aborts initialization; nothing is shown until the caller retries.
    pub async fn initialize(
        fetcher: Arc<dyn DataFetcher>,
        config: &CatalogConfig,
    ) -> CatalogResult<Self> {
        let (catalog, types, colors, genders) = futures::try_join!(
            fetcher.fetch_catalog(config.catalog_limit),
            fetcher.fetch_category_index(Category::Type),
            fetcher.fetch_category_index(Category::Color),
            fetcher.fetch_category_index(Category::Gender),
        )
        .map_err(CatalogError::Initialization)?;

        let cache = LookupCache::new(Arc::clone(&fetcher));
        cache.install_index(Category::Type, types);
        cache.install_index(Category::Color, colors);
        cache.install_index(Category::Gender, genders);

        info!(entries = catalog.len(), "catalog loaded");

        let catalog = Arc::new(catalog);
        let mut pages = Paginator::new(config.batch_size);
        pages.publish(Arc::clone(&catalog));

        Ok(Self {
            catalog,
            engine: FilterEngine::new(Arc::new(cache)),
            fetcher,
            pages: Mutex::new(pages),
            generation: AtomicU64::new(0),
            policy: config.stale_pass_policy,
        })
    }

    pub fn catalog(&self) -> &[PokemonEntry] {
        &self.catalog
    }

    pub fn lookup_cache(&self) -> &LookupCache {
        self.engine.cache()
    }

    /// Runs a filter pass and publishes its result, rewinding pagination.
    pub async fn apply(&self, selection: &FilterSelection) -> FilterOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let results = self.engine.apply(&self.catalog, selection).await;
        let matched = results.len();

        let superseded = self.generation.load(Ordering::SeqCst) != generation;
        if superseded && self.policy == StalePassPolicy::LastInvokedWins {
            info!(generation, matched, "discarding superseded filter pass");
            return FilterOutcome {
                generation,
                published: false,
                matched,
            };
        }

        self.pages().publish(Arc::new(results));
        info!(generation, matched, "published filter pass");
        FilterOutcome {
            generation,
            published: true,
            matched,
        }
    }

    /// Pulls the next batch of the published result.
    pub fn next_batch(&self) -> Batch {
        self.pages().next_batch()
    }

    /// Renders the next batch into `sink` and reports whether more remain.
    pub fn load_more(&self, sink: &mut dyn RenderSink) -> bool {
        let batch = self.next_batch();
        sink.render_batch(&batch.entries);
        batch.has_more
    }

    /// Filter pass followed by rendering its first batch.
    ///
    /// A discarded pass renders nothing and leaves the newer pass's cursor alone.
    pub async fn show(
        &self,
        selection: &FilterSelection,
        sink: &mut dyn RenderSink,
    ) -> (FilterOutcome, bool) {
        let outcome = self.apply(selection).await;
        if !outcome.published {
            return (outcome, false);
        }
        let has_more = self.load_more(sink);
        (outcome, has_more)
    }

    /// Clears every filter and renders the first batch of the full catalog.
    pub async fn reset_filters(&self, sink: &mut dyn RenderSink) -> (FilterOutcome, bool) {
        self.show(&FilterSelection::cleared(), sink).await
    }

    /// `(shown, total)` for the published result.
    pub fn progress(&self) -> (usize, usize) {
        let pages = self.pages();
        (pages.consumed(), pages.total())
    }

    pub fn published_results(&self) -> Arc<Vec<PokemonEntry>> {
        Arc::clone(self.pages().results())
    }

    pub fn category_values(&self, category: Category) -> Vec<String> {
        self.lookup_cache().values(category)
    }

    /// Finds a catalog entry by exact name or pokedex number.
    pub fn find_entry(&self, name_or_id: &str) -> Option<&PokemonEntry> {
        let key = name_or_id.trim().to_lowercase();
        match key.parse::<u32>() {
            Ok(id) => self.catalog.iter().find(|entry| entry.id == id),
            Err(_) => self.catalog.iter().find(|entry| entry.name == key),
        }
    }

    /// Fetches the detail record of a catalog entry.
    pub async fn detail(&self, name_or_id: &str) -> CatalogResult<PokemonDetail> {
        let entry = self
            .find_entry(name_or_id)
            .ok_or_else(|| CatalogError::UnknownEntry(name_or_id.trim().to_string()))?;
        self.fetcher
            .fetch_entity_detail(&entry.detail_url)
            .await
            .map_err(CatalogError::Detail)
    }

    fn pages(&self) -> MutexGuard<'_, Paginator> {
        self.pages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for CatalogSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogSession")
            .field("entries", &self.catalog.len())
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
