//! PokeAPI response shapes and their conversion into catalog types.
//!
//! Only the fields the catalog reads are declared; serde ignores the rest.

use crate::detail::{PokemonDetail, StatValue};
use crate::errors::{FetchError, FetchResult};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use schema::{Category, PokemonEntry};

#[derive(Debug, Clone, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// Paged list returned by collection endpoints such as `/pokemon?limit=N`.
#[derive(Debug, Deserialize)]
pub struct ResourceList {
    pub results: Vec<NamedResource>,
}

#[derive(Debug, Deserialize)]
struct TypeResource {
    pokemon: Vec<TypeMember>,
}

#[derive(Debug, Deserialize)]
struct TypeMember {
    pokemon: NamedResource,
}

#[derive(Debug, Deserialize)]
struct ColorResource {
    pokemon_species: Vec<NamedResource>,
}

#[derive(Debug, Deserialize)]
struct GenderResource {
    pokemon_species_details: Vec<GenderMember>,
}

#[derive(Debug, Deserialize)]
struct GenderMember {
    pokemon_species: NamedResource,
}

#[derive(Debug, Deserialize)]
struct PokemonResource {
    id: u32,
    name: String,
    height: u32,
    weight: u32,
    base_experience: Option<u32>,
    types: Vec<TypeSlot>,
    abilities: Vec<AbilitySlot>,
    stats: Vec<StatSlot>,
    sprites: Sprites,
}

#[derive(Debug, Deserialize)]
struct TypeSlot {
    slot: u8,
    #[serde(rename = "type")]
    type_: NamedResource,
}

#[derive(Debug, Deserialize)]
struct AbilitySlot {
    ability: NamedResource,
    is_hidden: bool,
}

#[derive(Debug, Deserialize)]
struct StatSlot {
    base_stat: u32,
    stat: NamedResource,
}

#[derive(Debug, Deserialize)]
struct Sprites {
    front_default: Option<String>,
}

/// Decodes a JSON body, attributing failures to `url`.
pub fn decode<T: DeserializeOwned>(url: &str, body: &[u8]) -> FetchResult<T> {
    serde_json::from_slice(body).map_err(|e| FetchError::Decode {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

/// Extracts the numeric id from a resource URL like `.../pokemon/25/`.
pub fn resource_id(url: &str) -> FetchResult<u32> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse::<u32>().ok())
        .filter(|id| *id >= 1)
        .ok_or_else(|| FetchError::MalformedResource {
            url: url.to_string(),
        })
}

/// Converts a `/pokemon` listing into catalog entries, keeping listing order.
pub fn catalog_from_list(list: ResourceList) -> FetchResult<Vec<PokemonEntry>> {
    list.results
        .into_iter()
        .map(|resource| {
            let id = resource_id(&resource.url)?;
            Ok(PokemonEntry::new(id, resource.name, resource.url))
        })
        .collect()
}

/// Decodes a category value resource into member names.
///
/// Each category nests its members differently in PokeAPI.
pub fn members_from_body(category: Category, url: &str, body: &[u8]) -> FetchResult<Vec<String>> {
    let names = match category {
        Category::Type => decode::<TypeResource>(url, body)?
            .pokemon
            .into_iter()
            .map(|member| member.pokemon.name)
            .collect(),
        Category::Color => decode::<ColorResource>(url, body)?
            .pokemon_species
            .into_iter()
            .map(|species| species.name)
            .collect(),
        Category::Gender => decode::<GenderResource>(url, body)?
            .pokemon_species_details
            .into_iter()
            .map(|detail| detail.pokemon_species.name)
            .collect(),
    };
    Ok(names)
}

pub fn detail_from_body(url: &str, body: &[u8]) -> FetchResult<PokemonDetail> {
    let mut resource: PokemonResource = decode(url, body)?;
    resource.types.sort_by_key(|slot| slot.slot);

    Ok(PokemonDetail {
        id: resource.id,
        name: resource.name,
        height_dm: resource.height,
        weight_hg: resource.weight,
        base_experience: resource.base_experience,
        types: resource.types.into_iter().map(|slot| slot.type_.name).collect(),
        abilities: resource
            .abilities
            .into_iter()
            .map(|slot| {
                if slot.is_hidden {
                    format!("{} (hidden)", slot.ability.name)
                } else {
                    slot.ability.name
                }
            })
            .collect(),
        stats: resource
            .stats
            .into_iter()
            .map(|slot| StatValue {
                name: slot.stat.name,
                base: slot.base_stat,
            })
            .collect(),
        sprite_url: resource.sprites.front_default,
    })
}
