use schema::PokemonEntry;
use std::sync::Arc;

/// One page of the filtered result handed to a render sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub entries: Vec<PokemonEntry>,
    pub has_more: bool,
}

/// Serves the current filtered result in fixed-size batches.
#[derive(Debug)]
pub struct Paginator {
    results: Arc<Vec<PokemonEntry>>,
    offset: usize,
    batch_size: usize,
}

impl Paginator {
    /// `batch_size` is fixed for the paginator's lifetime; zero is bumped to one.
    pub fn new(batch_size: usize) -> Self {
        Self {
            results: Arc::new(Vec::new()),
            offset: 0,
            batch_size: batch_size.max(1),
        }
    }

    /// Replaces the filtered result and rewinds to the first batch.
    pub fn publish(&mut self, results: Arc<Vec<PokemonEntry>>) {
        self.results = results;
        self.reset();
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }

    /// Returns `[offset, offset + batch_size)` and advances the cursor.
    ///
    /// The offset keeps growing past the end; once exhausted every call yields
    /// an empty batch with `has_more == false`.
    pub fn next_batch(&mut self) -> Batch {
        let len = self.results.len();
        let start = self.offset.min(len);
        let end = self.offset.saturating_add(self.batch_size).min(len);
        self.offset = self.offset.saturating_add(self.batch_size);

        Batch {
            entries: self.results[start..end].to_vec(),
            has_more: self.offset < len,
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Entries handed out since the last reset.
    pub fn consumed(&self) -> usize {
        self.offset.min(self.results.len())
    }

    pub fn remaining(&self) -> usize {
        self.total() - self.consumed()
    }

    pub fn results(&self) -> &Arc<Vec<PokemonEntry>> {
        &self.results
    }
}
