//! Plain-text presentation of catalog batches.

use schema::PokemonEntry;

pub const LOADING_INDICATOR: &str = "Loading Pokémon...";

/// Receives every batch the session decides to show. Reports nothing back.
pub trait RenderSink: Send {
    fn render_batch(&mut self, entries: &[PokemonEntry]);
}

/// Formats a single catalog card.
pub fn render_card(entry: &PokemonEntry) -> String {
    format!("{}\n    image: {}\n", entry, entry.image_url)
}

/// Accumulates text cards until the caller takes them.
#[derive(Debug, Default)]
pub struct TextCardSink {
    buffer: String,
    cards_rendered: usize,
}

impl TextCardSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes the loading indicator shown while a filter pass is in flight.
    pub fn show_loading(&mut self) {
        self.buffer.push_str(LOADING_INDICATOR);
        self.buffer.push('\n');
    }

    pub fn push_line(&mut self, line: &str) {
        self.buffer.push_str(line);
        self.buffer.push('\n');
    }

    pub fn cards_rendered(&self) -> usize {
        self.cards_rendered
    }

    /// Returns everything rendered so far and clears the buffer.
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }
}

impl RenderSink for TextCardSink {
    fn render_batch(&mut self, entries: &[PokemonEntry]) {
        if entries.is_empty() {
            return;
        }
        for entry in entries {
            self.buffer.push_str(&render_card(entry));
        }
        self.cards_rendered += entries.len();
    }
}
