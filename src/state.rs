//! Application state - single source of truth

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::sprite::SpriteImage;

/// Text pre-filled in the search input at startup.
pub const INITIAL_SEARCH_TEXT: &str = "pikachu";

/// Name looked up automatically at startup unless overridden on the CLI.
pub const INITIAL_LOOKUP: &str = "bulbasaur";

/// One creature record from the catalog
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Pokemon {
    /// Stable id assigned by the remote catalog
    pub id: u32,
    pub name: String,
    /// Species identifier, distinct from `name` for regional/alternate forms;
    /// keys the description fetch
    pub species_name: String,
    /// Front sprite URI, when the catalog has one
    pub sprite_front_default: Option<String>,
    /// Type tags in catalog order
    pub types: Vec<String>,
    /// Base stats in catalog order
    pub stats: Vec<PokemonStat>,
    /// Localized description, absent until the species fetch resolves
    pub flavor_text: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PokemonStat {
    pub name: String,
    pub value: u16,
}

/// Persisted subset of a Pokemon - enough to draw a thumbnail and
/// answer membership by id
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FavoriteEntry {
    pub id: u32,
    pub name: String,
    pub sprite_front_default: Option<String>,
}

impl FavoriteEntry {
    pub fn from_pokemon(pokemon: &Pokemon) -> Self {
        Self {
            id: pokemon.id,
            name: pokemon.name.clone(),
            sprite_front_default: pokemon.sprite_front_default.clone(),
        }
    }
}

/// Severity classification for a base stat value
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatBand {
    Low,
    Mid,
    High,
}

impl StatBand {
    /// Band boundaries: 40 is the first mid value, 65 the first high value.
    pub fn for_value(value: u16) -> Self {
        if value < 40 {
            StatBand::Low
        } else if value < 65 {
            StatBand::Mid
        } else {
            StatBand::High
        }
    }
}

/// Which panel receives key events
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub enum Focus {
    Search,
    #[default]
    Detail,
}

impl Focus {
    pub fn toggle(&self) -> Self {
        match self {
            Focus::Search => Focus::Detail,
            Focus::Detail => Focus::Search,
        }
    }
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    // --- Core data (visible in debug) ---
    /// Currently displayed creature; stays put across failed searches
    #[debug(section = "Pokemon", label = "Loaded", debug_fmt)]
    pub pokemon: Option<Pokemon>,

    /// Whether a lookup is in flight (current data keeps rendering meanwhile)
    #[debug(section = "Pokemon", label = "Loading")]
    pub pokemon_loading: bool,

    /// Whether the dependent description fetch is in flight
    #[debug(section = "Pokemon", label = "Flavor loading")]
    pub flavor_loading: bool,

    /// Monotonic counter tying fetch results to the search that requested them
    #[debug(section = "Pokemon", label = "Generation")]
    pub search_generation: u64,

    /// Favorited creatures in insertion order, ids unique
    #[debug(section = "Favorites", label = "Entries", debug_fmt)]
    pub favorites: Vec<FavoriteEntry>,

    /// Latest status line text (fetch/persist failures land here)
    #[debug(section = "Status", label = "Message", debug_fmt)]
    pub message: Option<String>,

    // --- UI internals (skipped) ---
    /// Which panel has focus
    #[debug(skip)]
    pub focus: Focus,

    /// Current search input text
    #[debug(skip)]
    pub search_query: String,

    /// Name fetched automatically at startup
    #[debug(skip)]
    pub initial_query: String,

    /// Decoded sprites keyed by creature id
    #[debug(skip)]
    pub sprites: HashMap<u32, SpriteImage>,

    /// Whether the displayed creature's sprite is still downloading
    #[debug(skip)]
    pub sprite_loading: bool,
}

impl AppState {
    /// Create state with the given startup lookup name
    pub fn new(initial_query: impl Into<String>) -> Self {
        Self {
            pokemon: None,
            pokemon_loading: false,
            flavor_loading: false,
            search_generation: 0,
            favorites: Vec::new(),
            message: None,
            focus: Focus::default(),
            search_query: INITIAL_SEARCH_TEXT.to_string(),
            initial_query: initial_query.into(),
            sprites: HashMap::new(),
            sprite_loading: false,
        }
    }

    /// Membership check backing the favorite toggle label
    pub fn is_favorite(&self, id: u32) -> bool {
        self.favorites.iter().any(|entry| entry.id == id)
    }

    /// Sprite for the currently displayed creature, if cached
    pub fn displayed_sprite(&self) -> Option<&SpriteImage> {
        let pokemon = self.pokemon.as_ref()?;
        self.sprites.get(&pokemon.id)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(INITIAL_LOOKUP)
    }
}
