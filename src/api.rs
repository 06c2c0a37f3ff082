//! PokeAPI client - two catalog lookups plus sprite downloads

use std::sync::OnceLock;

use serde::Deserialize;

use crate::state::{Pokemon, PokemonStat};

const API_BASE: &str = "https://pokeapi.co/api/v2";

/// Locale tag matched against `flavor_text_entries[].language.name`.
const FLAVOR_LOCALE: &str = "en";

/// Failure modes of a catalog call. Stringified at the effect boundary;
/// the reducer never inspects variants.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Network(#[source] reqwest::Error),
    #[error("HTTP {status} for {url}")]
    Http { status: u16, url: String },
    #[error("malformed response: {0}")]
    Parse(#[source] serde_json::Error),
}

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    id: u32,
    name: String,
    species: NamedResource,
    sprites: SpriteSet,
    types: Vec<PokemonTypeSlot>,
    stats: Vec<PokemonStatSlot>,
}

#[derive(Clone, Debug, Deserialize)]
struct SpriteSet {
    front_default: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonStatSlot {
    base_stat: u16,
    stat: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct SpeciesResponse {
    flavor_text_entries: Vec<FlavorTextEntry>,
}

#[derive(Clone, Debug, Deserialize)]
struct FlavorTextEntry {
    flavor_text: String,
    language: NamedResource,
}

/// Look up a creature by name. The name is lower-cased here; callers pass
/// user input through verbatim.
pub async fn fetch_pokemon(name: &str) -> Result<Pokemon, FetchError> {
    let name = name.to_lowercase();
    let url = format!("{API_BASE}/pokemon/{name}");
    let response: PokemonResponse = get_json(&url).await?;
    Ok(pokemon_from_response(response))
}

/// Fetch the species document and pick the first description in the target
/// locale. A missing locale is `Ok(None)`, not an error.
pub async fn fetch_flavor_text(species: &str) -> Result<Option<String>, FetchError> {
    let url = format!("{API_BASE}/pokemon-species/{species}");
    let response: SpeciesResponse = get_json(&url).await?;
    Ok(flavor_from_response(&response))
}

/// Download raw sprite bytes.
pub async fn fetch_sprite_bytes(url: &str) -> Result<Vec<u8>, FetchError> {
    let response = http_client()
        .get(url)
        .send()
        .await
        .map_err(FetchError::Network)?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Http {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    let bytes = response.bytes().await.map_err(FetchError::Network)?;
    Ok(bytes.to_vec())
}

fn pokemon_from_response(response: PokemonResponse) -> Pokemon {
    let types = response
        .types
        .into_iter()
        .map(|slot| slot.type_info.name)
        .collect();
    let stats = response
        .stats
        .into_iter()
        .map(|slot| PokemonStat {
            name: slot.stat.name,
            value: slot.base_stat,
        })
        .collect();

    Pokemon {
        id: response.id,
        name: response.name,
        species_name: response.species.name,
        sprite_front_default: response.sprites.front_default,
        types,
        stats,
        flavor_text: None,
    }
}

fn flavor_from_response(response: &SpeciesResponse) -> Option<String> {
    response
        .flavor_text_entries
        .iter()
        .find(|entry| entry.language.name == FLAVOR_LOCALE)
        .map(|entry| sanitize_text(&entry.flavor_text))
}

/// Flavor text carries hard line breaks and form feeds from the games.
fn sanitize_text(text: &str) -> String {
    text.replace('\n', " ").replace('\u{000C}', " ")
}

async fn get_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, FetchError> {
    let response = http_client()
        .get(url)
        .send()
        .await
        .map_err(FetchError::Network)?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Http {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    let bytes = response.bytes().await.map_err(FetchError::Network)?;
    serde_json::from_slice(&bytes).map_err(FetchError::Parse)
}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PIKACHU_JSON: &str = r#"{
        "id": 25,
        "name": "pikachu",
        "species": { "name": "pikachu", "url": "https://pokeapi.co/api/v2/pokemon-species/25/" },
        "sprites": { "front_default": "https://sprites.test/25.png", "back_default": null },
        "types": [
            { "slot": 1, "type": { "name": "electric", "url": "" } }
        ],
        "stats": [
            { "base_stat": 35, "stat": { "name": "hp", "url": "" } },
            { "base_stat": 55, "stat": { "name": "attack", "url": "" } },
            { "base_stat": 90, "stat": { "name": "speed", "url": "" } }
        ],
        "weight": 60
    }"#;

    #[test]
    fn test_pokemon_document_maps_one_to_one() {
        let response: PokemonResponse = serde_json::from_str(PIKACHU_JSON).unwrap();
        let pokemon = pokemon_from_response(response);

        assert_eq!(pokemon.id, 25);
        assert_eq!(pokemon.name, "pikachu");
        assert_eq!(pokemon.species_name, "pikachu");
        assert_eq!(
            pokemon.sprite_front_default.as_deref(),
            Some("https://sprites.test/25.png")
        );
        assert_eq!(pokemon.types, vec!["electric".to_string()]);
        assert_eq!(pokemon.stats.len(), 3);
        assert_eq!(pokemon.stats[0].name, "hp");
        assert_eq!(pokemon.stats[0].value, 35);
        assert_eq!(pokemon.flavor_text, None);
    }

    #[test]
    fn test_flavor_picks_first_matching_locale() {
        let response: SpeciesResponse = serde_json::from_str(
            r#"{
                "flavor_text_entries": [
                    { "flavor_text": "ignorato", "language": { "name": "it" } },
                    { "flavor_text": "first\nen", "language": { "name": "en" } },
                    { "flavor_text": "second en", "language": { "name": "en" } }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(flavor_from_response(&response).as_deref(), Some("first en"));
    }

    #[test]
    fn test_flavor_missing_locale_is_none() {
        let response: SpeciesResponse = serde_json::from_str(
            r#"{
                "flavor_text_entries": [
                    { "flavor_text": "nur deutsch", "language": { "name": "de" } }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(flavor_from_response(&response), None);
    }

    #[test]
    fn test_sanitize_strips_line_breaks_and_form_feeds() {
        assert_eq!(sanitize_text("a\nb\u{000C}c"), "a b c");
    }

    #[test]
    fn test_malformed_document_is_a_parse_error() {
        let result: Result<PokemonResponse, _> = serde_json::from_str(r#"{ "id": "not-a-number" }"#);
        assert!(result.is_err());
    }
}
