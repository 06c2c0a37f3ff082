//! Effects - side effects declared by the reducer

use crate::state::FavoriteEntry;

/// Side effects that can be triggered by actions
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Look up a creature by name; `generation` ties the result to its search
    FetchPokemon { generation: u64, query: String },
    /// Fetch the localized description for a species
    FetchFlavor { generation: u64, species: String },
    /// Download and decode a sprite for the creature id
    FetchSprite { id: u32, url: String },
    /// Read the persisted favorites slot
    LoadFavorites,
    /// Overwrite the favorites slot with the full current list
    SaveFavorites { entries: Vec<FavoriteEntry> },
}
