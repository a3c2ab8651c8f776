//! Lazily populated membership tables for the type, color and gender filters.
//!
//! Each category value starts unresolved. The first filter pass that needs it
//! fetches its member list once; every later lookup is answered from memory.
//! The pending fetch itself is memoized (one `OnceCell` per value), so callers
//! that arrive while it is in flight wait for the same result instead of
//! issuing their own request.

use crate::fetcher::{CategoryIndex, DataFetcher};
use schema::Category;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::OnceCell;
use tracing::{debug, warn};

/// Resolved member names of one category value.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct MemberSet {
    names: Vec<String>,
    index: HashSet<String>,
}

impl MemberSet {
    pub fn new(names: Vec<String>) -> Self {
        let index = names.iter().cloned().collect();
        Self { names, index }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains(name)
    }

    /// Member names in the order the provider listed them.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// `None` inside the cell marks a failed attempt.
type PendingMembers = Arc<OnceCell<Option<Arc<MemberSet>>>>;

struct ValueSlot {
    source_url: String,
    members: PendingMembers,
}

impl ValueSlot {
    fn unresolved(source_url: String) -> Self {
        Self {
            source_url,
            members: Arc::new(OnceCell::new()),
        }
    }
}

type CategoryTable = BTreeMap<String, ValueSlot>;

pub struct LookupCache {
    fetcher: Arc<dyn DataFetcher>,
    tables: Mutex<HashMap<Category, CategoryTable>>,
}

impl LookupCache {
    pub fn new(fetcher: Arc<dyn DataFetcher>) -> Self {
        Self {
            fetcher,
            tables: Mutex::new(HashMap::new()),
        }
    }

    /// Installs the value -> source URL mapping for `category`.
    ///
    /// Values whose source URL is unchanged keep their resolved members.
    pub fn install_index(&self, category: Category, index: CategoryIndex) {
        let mut tables = self.tables.lock().unwrap_or_else(PoisonError::into_inner);
        let mut previous = tables.remove(&category).unwrap_or_default();

        let table: CategoryTable = index
            .into_iter()
            .map(|(value, source_url)| {
                let slot = match previous.remove(&value) {
                    Some(slot) if slot.source_url == source_url => slot,
                    _ => ValueSlot::unresolved(source_url),
                };
                (value, slot)
            })
            .collect();

        debug!(%category, values = table.len(), "installed category index");
        tables.insert(category, table);
    }

    /// Known values of `category`, sorted.
    pub fn values(&self, category: Category) -> Vec<String> {
        let tables = self.tables.lock().unwrap_or_else(PoisonError::into_inner);
        tables
            .get(&category)
            .map(|table| table.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Whether `value` already holds a concrete member list.
    pub fn is_resolved(&self, category: Category, value: &str) -> bool {
        self.slot(category, value)
            .is_some_and(|(_, cell)| matches!(cell.get(), Some(Some(_))))
    }

    /// Member names of `value`, fetching them on first use.
    ///
    /// Never fails: unknown values and failed fetches resolve to an empty list
    /// so that one bad category value cannot abort a whole filter pass.
    pub async fn resolve_members(&self, category: Category, value: &str) -> Arc<MemberSet> {
        let Some((source_url, cell)) = self.slot(category, value) else {
            warn!(%category, value, "filter value missing from category index");
            return Arc::new(MemberSet::default());
        };

        if let Some(Some(members)) = cell.get() {
            return Arc::clone(members);
        }

        let outcome = cell
            .get_or_init(|| async {
                debug!(%category, value, url = %source_url, "fetching category members");
                match self
                    .fetcher
                    .fetch_category_members(category, &source_url)
                    .await
                {
                    Ok(names) => Some(Arc::new(MemberSet::new(names))),
                    Err(err) => {
                        warn!(%category, value, error = %err, "member lookup failed; treating as no matches");
                        None
                    }
                }
            })
            .await;

        match outcome {
            Some(members) => Arc::clone(members),
            None => Arc::new(MemberSet::default()),
        }
    }

    /// Drops every failed attempt so the next lookup of that value fetches again.
    ///
    /// Called once a filter pass has settled; within a pass a failure stays
    /// memoized and every later lookup of the value resolves empty without I/O.
    pub fn forget_failures(&self) {
        let mut tables = self.tables.lock().unwrap_or_else(PoisonError::into_inner);
        for (category, table) in tables.iter_mut() {
            for (value, slot) in table.iter_mut() {
                if matches!(slot.members.get(), Some(None)) {
                    debug!(%category, value = %value, "forgetting failed member lookup");
                    slot.members = Arc::new(OnceCell::new());
                }
            }
        }
    }

    fn slot(&self, category: Category, value: &str) -> Option<(String, PendingMembers)> {
        let tables = self.tables.lock().unwrap_or_else(PoisonError::into_inner);
        tables
            .get(&category)
            .and_then(|table| table.get(value))
            .map(|slot| (slot.source_url.clone(), Arc::clone(&slot.members)))
    }
}
