use schema::title_case;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatValue {
    pub name: String,
    pub base: u32,
}

/// Record shown by the on-demand detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonDetail {
    pub id: u32,
    pub name: String,
    pub height_dm: u32, // decimetres, as PokeAPI reports it
    pub weight_hg: u32, // hectograms
    pub base_experience: Option<u32>,
    pub types: Vec<String>,
    pub abilities: Vec<String>,
    pub stats: Vec<StatValue>,
    pub sprite_url: Option<String>,
}

impl fmt::Display for PokemonDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const LABEL_WIDTH: usize = 16;

        // --- 1. Name and Pokedex Number ---
        writeln!(f, "{} (#{:03})", title_case(&self.name), self.id)?;
        writeln!(f, "--------------------")?;

        // --- 2. Types and body ---
        let types: Vec<String> = self.types.iter().map(|t| title_case(t)).collect();
        writeln!(f, "Type(s): {}", types.join(" / "))?;
        writeln!(
            f,
            "Height: {:.1} m   Weight: {:.1} kg",
            self.height_dm as f32 / 10.0,
            self.weight_hg as f32 / 10.0
        )?;
        if let Some(exp) = self.base_experience {
            writeln!(f, "Base Exp: {}", exp)?;
        }
        writeln!(f, "Abilities: {}", self.abilities.join(", "))?;
        writeln!(f, "--------------------")?;

        // --- 3. Base Stats ---
        write!(f, "Base Stats:")?;
        for stat in &self.stats {
            write!(f, "\n{:<LABEL_WIDTH$} : {}", title_case(&stat.name), stat.base)?;
        }
        if let Some(sprite) = &self.sprite_url {
            write!(f, "\nSprite: {}", sprite)?;
        }
        Ok(())
    }
}
