use crate::config::{CatalogConfig, StalePassPolicy};
use crate::detail::PokemonDetail;
use crate::errors::{FetchError, FetchResult};
use crate::fetcher::{CategoryIndex, DataFetcher};
use crate::render::RenderSink;
use crate::session::CatalogSession;
use async_trait::async_trait;
use schema::{Category, PokemonEntry};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Builds a catalog entry with a PokeAPI-style detail URL.
pub fn entry(id: u32, name: &str) -> PokemonEntry {
    PokemonEntry::new(id, name, format!("https://fake.api/pokemon/{}/", id))
}

/// Small catalog in pokedex order.
pub fn sample_catalog() -> Vec<PokemonEntry> {
    vec![
        entry(1, "bulbasaur"),
        entry(4, "charmander"),
        entry(7, "squirtle"),
        entry(25, "pikachu"),
        entry(37, "vulpix"),
        entry(58, "growlithe"),
        entry(133, "eevee"),
    ]
}

/// A catalog of `len` synthetic entries named `mon-<id>`.
pub fn numbered_catalog(len: u32) -> Vec<PokemonEntry> {
    (1..=len).map(|id| entry(id, &format!("mon-{}", id))).collect()
}

pub fn ids(entries: &[PokemonEntry]) -> Vec<u32> {
    entries.iter().map(|e| e.id).collect()
}

pub fn member_url(category: Category, value: &str) -> String {
    format!("https://fake.api/{}/{}/", category.api_resource(), value)
}

/// A scripted [`DataFetcher`] that counts member requests.
///
/// # Example
/// ```
/// let fetcher = FakeFetcher::new(sample_catalog())
///     .with_members(Category::Type, "fire", &["charmander", "vulpix"])
///     .failing(Category::Gender, "female");
/// ```
#[derive(Default)]
pub struct FakeFetcher {
    catalog: Vec<PokemonEntry>,
    indexes: HashMap<Category, CategoryIndex>,
    members: HashMap<String, Vec<String>>,
    failing_urls: HashSet<String>,
    gates: HashMap<String, Arc<Notify>>,
    fail_catalog: bool,
    fail_without_suspending: bool,
    member_calls: Mutex<HashMap<String, usize>>,
    detail_calls: Mutex<usize>,
}

impl FakeFetcher {
    pub fn new(catalog: Vec<PokemonEntry>) -> Self {
        let mut fetcher = Self {
            catalog,
            ..Self::default()
        };
        // Every category has an index, even if no value is scripted.
        for category in [Category::Type, Category::Color, Category::Gender] {
            fetcher.indexes.insert(category, CategoryIndex::new());
        }
        fetcher
    }

    /// Scripts the member list of a category value and lists it in the index.
    pub fn with_members(mut self, category: Category, value: &str, names: &[&str]) -> Self {
        let url = self.register(category, value);
        self.members
            .insert(url, names.iter().map(|n| n.to_string()).collect());
        self
    }

    /// Lists a category value whose member request always fails.
    pub fn failing(mut self, category: Category, value: &str) -> Self {
        let url = self.register(category, value);
        self.failing_urls.insert(url);
        self
    }

    /// Makes the member request for a value wait until the returned handle is notified.
    pub fn gated(mut self, category: Category, value: &str) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.gates
            .insert(member_url(category, value), Arc::clone(&gate));
        (self, gate)
    }

    /// Makes failing member requests return before their first await.
    pub fn failing_immediately(mut self) -> Self {
        self.fail_without_suspending = true;
        self
    }

    pub fn failing_catalog(mut self) -> Self {
        self.fail_catalog = true;
        self
    }

    pub fn member_calls(&self, category: Category, value: &str) -> usize {
        let calls = self.member_calls.lock().unwrap();
        calls
            .get(&member_url(category, value))
            .copied()
            .unwrap_or(0)
    }

    pub fn total_member_calls(&self) -> usize {
        self.member_calls.lock().unwrap().values().sum()
    }

    pub fn detail_calls(&self) -> usize {
        *self.detail_calls.lock().unwrap()
    }

    fn register(&mut self, category: Category, value: &str) -> String {
        let url = member_url(category, value);
        self.indexes
            .entry(category)
            .or_default()
            .insert(value.to_string(), url.clone());
        url
    }
}

#[async_trait]
impl DataFetcher for FakeFetcher {
    async fn fetch_catalog(&self, limit: usize) -> FetchResult<Vec<PokemonEntry>> {
        tokio::task::yield_now().await;
        if self.fail_catalog {
            return Err(FetchError::Status {
                url: "https://fake.api/pokemon".to_string(),
                status: 503,
            });
        }
        Ok(self.catalog.iter().take(limit).cloned().collect())
    }

    async fn fetch_category_index(&self, category: Category) -> FetchResult<CategoryIndex> {
        tokio::task::yield_now().await;
        Ok(self.indexes.get(&category).cloned().unwrap_or_default())
    }

    async fn fetch_category_members(
        &self,
        _category: Category,
        source_url: &str,
    ) -> FetchResult<Vec<String>> {
        *self
            .member_calls
            .lock()
            .unwrap()
            .entry(source_url.to_string())
            .or_insert(0) += 1;

        let fails = self.failing_urls.contains(source_url);
        if fails && self.fail_without_suspending {
            return Err(FetchError::Status {
                url: source_url.to_string(),
                status: 400,
            });
        }
        if let Some(gate) = self.gates.get(source_url) {
            gate.notified().await;
        }
        // Give concurrent callers a chance to pile up on the pending request.
        for _ in 0..3 {
            tokio::task::yield_now().await;
        }

        if fails {
            return Err(FetchError::Status {
                url: source_url.to_string(),
                status: 500,
            });
        }
        Ok(self.members.get(source_url).cloned().unwrap_or_default())
    }

    async fn fetch_entity_detail(&self, url: &str) -> FetchResult<PokemonDetail> {
        *self.detail_calls.lock().unwrap() += 1;
        let entry = self
            .catalog
            .iter()
            .find(|e| e.detail_url == url)
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })?;
        Ok(PokemonDetail {
            id: entry.id,
            name: entry.name.clone(),
            height_dm: 7,
            weight_hg: 69,
            base_experience: Some(64),
            types: vec!["normal".to_string()],
            abilities: vec!["run-away".to_string()],
            stats: Vec::new(),
            sprite_url: None,
        })
    }
}

/// Records the ids of every batch a session renders.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub batches: Vec<Vec<u32>>,
}

impl RenderSink for RecordingSink {
    fn render_batch(&mut self, entries: &[PokemonEntry]) {
        self.batches.push(ids(entries));
    }
}

pub fn test_config(batch_size: usize, policy: StalePassPolicy) -> CatalogConfig {
    CatalogConfig {
        batch_size,
        stale_pass_policy: policy,
        ..CatalogConfig::default()
    }
}

/// Initializes a session over `fetcher`, keeping a typed handle for call counts.
pub async fn create_test_session(
    fetcher: FakeFetcher,
    config: &CatalogConfig,
) -> (CatalogSession, Arc<FakeFetcher>) {
    let fetcher = Arc::new(fetcher);
    let session = match CatalogSession::initialize(fetcher.clone(), config).await {
        Ok(session) => session,
        Err(err) => panic!("Failed to initialize test session: {}", err),
    };
    (session, fetcher)
}
