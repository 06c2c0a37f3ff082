//! Actions covering the search, fetch-chain, and favorites flows

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::sprite::SpriteImage;
use crate::state::{FavoriteEntry, Pokemon};

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    /// Startup: hydrate favorites and look up the initial name
    Init,

    // ===== Search category =====
    /// Move focus into the search input
    SearchOpen,

    /// Leave the search input without submitting; text is kept
    SearchClose,

    /// Search input text changed
    SearchQueryChange(String),

    /// Submit the input text verbatim (explicit trigger)
    SearchQuerySubmit(String),

    // ===== Pokemon fetch chain =====
    /// Result: creature lookup succeeded
    PokemonDidLoad { generation: u64, pokemon: Pokemon },

    /// Result: creature lookup failed
    PokemonDidError {
        generation: u64,
        query: String,
        error: String,
    },

    /// Result: species description resolved; `None` means the target
    /// locale is missing and the description stays absent
    FlavorDidLoad {
        generation: u64,
        text: Option<String>,
    },

    /// Result: species description fetch failed
    FlavorDidError {
        generation: u64,
        species: String,
        error: String,
    },

    /// Result: sprite bytes decoded for a creature id
    SpriteDidLoad { id: u32, sprite: SpriteImage },

    /// Result: sprite download or decode failed
    SpriteDidError { id: u32, error: String },

    // ===== Favorites category =====
    /// Add/remove the displayed creature from favorites
    FavoriteToggle,

    /// Result: persisted favorites hydrated at startup
    FavoritesDidLoad(Vec<FavoriteEntry>),

    /// Result: favorites slot could not be read
    FavoritesLoadDidError(String),

    /// Result: favorites written to disk
    FavoritesDidSave,

    /// Result: favorites write failed
    FavoritesSaveDidError(String),

    // ===== Uncategorized (global) =====
    /// Switch focus between search and detail
    FocusNext,

    /// Force a re-render (for cursor movement, etc.)
    Render,

    /// Exit the application
    Quit,
}
