use serde::{Deserialize, Serialize};
use std::fmt;

/// Base location of the official artwork sprites published alongside PokeAPI.
pub const ARTWORK_BASE_URL: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork";

/// A single catalog record. Built once when the catalog loads and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PokemonEntry {
    pub id: u32,
    /// Lowercase canonical name, unique within the catalog (e.g. "mr-mime").
    pub name: String,
    pub image_url: String,
    pub detail_url: String,
}

impl PokemonEntry {
    /// Creates an entry, deriving the artwork URL from the pokedex id.
    pub fn new(id: u32, name: impl Into<String>, detail_url: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into().to_lowercase(),
            image_url: format!("{}/{}.png", ARTWORK_BASE_URL, id),
            detail_url: detail_url.into(),
        }
    }

    /// Human-readable name: "mr-mime" becomes "Mr Mime".
    pub fn display_name(&self) -> String {
        title_case(&self.name)
    }
}

impl fmt::Display for PokemonEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:03} {}", self.id, self.display_name())
    }
}

/// Capitalizes each dash-separated word of a PokeAPI slug.
pub fn title_case(slug: &str) -> String {
    slug.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
