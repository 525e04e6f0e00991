use reqwest::Error;
use serde::Deserialize;

use super::queue::PreloadItem;

const BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Published main-series generations.
pub const GENERATION_COUNT: u32 = 9;

/// Official artwork lives in the PokeAPI sprites repo, keyed by national-dex
/// id. Preload items carry only the `<id>.png` tail; the loader joins it on.
pub const ARTWORK_BASE_URL: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork/";

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    pokemon_species: Vec<NamedResource>,
}

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

fn build_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent("PokeVote-TUI/0.1.0")
        .build()
        .expect("Failed to build HTTP client")
}

// Species resources carry no id field; it is the trailing path segment of
// the resource URL.
fn species_id(url: &str) -> Option<u32> {
    url.trim_end_matches('/').rsplit('/').next()?.parse().ok()
}

fn parse_generation(generation: u32, response: GenerationResponse) -> Vec<PreloadItem> {
    let mut species: Vec<(u32, String)> = response
        .pokemon_species
        .into_iter()
        .filter_map(|s| Some((species_id(&s.url)?, s.name)))
        .collect();

    // The API returns species in no particular order; sort by dex id so the
    // preload queue walks each generation front to back.
    species.sort_by_key(|(id, _)| *id);

    species
        .into_iter()
        .map(|(id, name)| PreloadItem {
            image_url: format!("{id}.png"),
            generation,
            letter: name
                .chars()
                .next()
                .map(|c| c.to_ascii_uppercase().to_string())
                .unwrap_or_else(|| "?".to_string()),
        })
        .collect()
}

pub async fn get_generation(generation: u32) -> Result<Vec<PreloadItem>, Error> {
    let url = format!("{}/generation/{}", BASE_URL, generation);

    let client = build_client();
    let response: GenerationResponse = client.get(&url).send().await?.json().await?;

    Ok(parse_generation(generation, response))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENERATION_FIXTURE: &str = r#"{
        "id": 1,
        "pokemon_species": [
            {"name": "charmander", "url": "https://pokeapi.co/api/v2/pokemon-species/4/"},
            {"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon-species/1/"},
            {"name": "squirtle", "url": "https://pokeapi.co/api/v2/pokemon-species/7/"}
        ]
    }"#;

    #[test]
    fn test_species_id() {
        assert_eq!(
            species_id("https://pokeapi.co/api/v2/pokemon-species/151/"),
            Some(151)
        );
        assert_eq!(
            species_id("https://pokeapi.co/api/v2/pokemon-species/25"),
            Some(25)
        );
        assert_eq!(species_id("https://pokeapi.co/api/v2/pokemon-species/x/"), None);
    }

    #[test]
    fn test_parse_generation() {
        let response: GenerationResponse =
            serde_json::from_str(GENERATION_FIXTURE).expect("fixture should deserialize");

        let items = parse_generation(1, response);

        let urls: Vec<&str> = items.iter().map(|i| i.image_url.as_str()).collect();
        assert_eq!(urls, vec!["1.png", "4.png", "7.png"]);

        let letters: Vec<&str> = items.iter().map(|i| i.letter.as_str()).collect();
        assert_eq!(letters, vec!["B", "C", "S"]);

        assert!(items.iter().all(|i| i.generation == 1));
    }

    #[test]
    fn test_parse_generation_skips_malformed_urls() {
        let response = GenerationResponse {
            pokemon_species: vec![
                NamedResource {
                    name: "bulbasaur".to_string(),
                    url: "https://pokeapi.co/api/v2/pokemon-species/1/".to_string(),
                },
                NamedResource {
                    name: "missingno".to_string(),
                    url: "https://pokeapi.co/api/v2/pokemon-species/".to_string(),
                },
            ],
        };

        let items = parse_generation(1, response);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].image_url, "1.png");
    }
}
