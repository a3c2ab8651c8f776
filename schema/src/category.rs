use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The three filter dimensions a catalog can be narrowed by.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Type,
    Color,
    Gender,
}

impl Category {
    /// The PokeAPI resource listing the values of this category.
    pub fn api_resource(&self) -> &'static str {
        match self {
            Category::Type => "type",
            Category::Color => "pokemon-color",
            Category::Gender => "gender",
        }
    }
}
