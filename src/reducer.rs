//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, FavoriteEntry, Focus};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            state.search_generation += 1;
            state.pokemon_loading = true;
            state.message = None;
            DispatchResult::changed_with_many(vec![
                Effect::LoadFavorites,
                Effect::FetchPokemon {
                    generation: state.search_generation,
                    query: state.initial_query.clone(),
                },
            ])
        }

        // ===== Search actions =====
        Action::SearchOpen => {
            state.focus = Focus::Search;
            DispatchResult::changed()
        }

        Action::SearchClose => {
            // Input text is kept; leaving search never clears it
            state.focus = Focus::Detail;
            DispatchResult::changed()
        }

        Action::SearchQueryChange(query) => {
            state.search_query = query;
            DispatchResult::changed()
        }

        Action::SearchQuerySubmit(query) => {
            // The query goes out verbatim; the client lower-cases it
            state.search_query = query.clone();
            state.focus = Focus::Detail;
            state.search_generation += 1;
            state.pokemon_loading = true;
            state.message = None;
            DispatchResult::changed_with(Effect::FetchPokemon {
                generation: state.search_generation,
                query,
            })
        }

        // ===== Pokemon fetch chain =====
        Action::PokemonDidLoad {
            generation,
            pokemon,
        } => {
            if stale(state, generation) {
                return DispatchResult::unchanged();
            }
            state.pokemon_loading = false;
            state.flavor_loading = true;
            state.sprite_loading = false;

            let mut effects = vec![Effect::FetchFlavor {
                generation,
                species: pokemon.species_name.clone(),
            }];
            if !state.sprites.contains_key(&pokemon.id) {
                if let Some(url) = pokemon.sprite_front_default.clone() {
                    state.sprite_loading = true;
                    effects.push(Effect::FetchSprite {
                        id: pokemon.id,
                        url,
                    });
                }
            }

            state.pokemon = Some(pokemon);
            DispatchResult::changed_with_many(effects)
        }

        Action::PokemonDidError {
            generation,
            query,
            error,
        } => {
            if stale(state, generation) {
                return DispatchResult::unchanged();
            }
            // Whatever was on screen stays on screen
            state.pokemon_loading = false;
            state.message = Some(format!("{query} load error: {error}"));
            DispatchResult::changed()
        }

        Action::FlavorDidLoad { generation, text } => {
            if stale(state, generation) {
                return DispatchResult::unchanged();
            }
            state.flavor_loading = false;
            if let Some(text) = text {
                if let Some(pokemon) = state.pokemon.as_mut() {
                    pokemon.flavor_text = Some(text);
                }
            }
            DispatchResult::changed()
        }

        Action::FlavorDidError {
            generation,
            species,
            error,
        } => {
            if stale(state, generation) {
                return DispatchResult::unchanged();
            }
            state.flavor_loading = false;
            state.message = Some(format!("{species} species error: {error}"));
            DispatchResult::changed()
        }

        Action::SpriteDidLoad { id, sprite } => {
            state.sprites.insert(id, sprite);
            if state.pokemon.as_ref().is_some_and(|p| p.id == id) {
                state.sprite_loading = false;
            }
            DispatchResult::changed()
        }

        Action::SpriteDidError { id, error } => {
            if state.pokemon.as_ref().is_some_and(|p| p.id == id) {
                state.sprite_loading = false;
            }
            state.message = Some(format!("Sprite error for #{id}: {error}"));
            DispatchResult::changed()
        }

        // ===== Favorites actions =====
        Action::FavoriteToggle => {
            let Some(pokemon) = state.pokemon.as_ref() else {
                return DispatchResult::unchanged();
            };
            let id = pokemon.id;
            if state.is_favorite(id) {
                state.favorites.retain(|entry| entry.id != id);
            } else {
                state.favorites.push(FavoriteEntry::from_pokemon(pokemon));
            }
            DispatchResult::changed_with(Effect::SaveFavorites {
                entries: state.favorites.clone(),
            })
        }

        Action::FavoritesDidLoad(entries) => {
            let mut effects = Vec::new();
            for entry in &entries {
                if state.sprites.contains_key(&entry.id) {
                    continue;
                }
                if let Some(url) = &entry.sprite_front_default {
                    effects.push(Effect::FetchSprite {
                        id: entry.id,
                        url: url.clone(),
                    });
                }
            }
            state.favorites = entries;
            DispatchResult::changed_with_many(effects)
        }

        Action::FavoritesLoadDidError(error) => {
            state.message = Some(error);
            DispatchResult::changed()
        }

        Action::FavoritesDidSave => DispatchResult::unchanged(),

        Action::FavoritesSaveDidError(error) => {
            state.message = Some(error);
            DispatchResult::changed()
        }

        // ===== Global actions =====
        Action::FocusNext => {
            state.focus = state.focus.toggle();
            DispatchResult::changed()
        }

        Action::Render => DispatchResult::changed(),

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// A result whose generation is not the latest submitted search belongs to
/// a superseded chain and must not touch state.
fn stale(state: &AppState, generation: u64) -> bool {
    generation != state.search_generation
}
