//! Tests using the new StoreTestHarness and EffectStoreTestHarness
//!
//! These tests demonstrate the integrated testing pattern where
//! store, component, and render testing are combined.

use pokedex::{
    action::Action,
    components::{Component, DetailPanel, DetailPanelProps},
    effect::Effect,
    reducer::reducer,
    state::{AppState, FavoriteEntry, Focus, Pokemon, PokemonStat},
};
use tui_dispatch::NumericComponentId;
use tui_dispatch::testing::*;

/// Helper to create a mock catalog record
fn pikachu() -> Pokemon {
    Pokemon {
        id: 25,
        name: "pikachu".into(),
        species_name: "pikachu".into(),
        sprite_front_default: None,
        types: vec!["electric".into()],
        stats: vec![
            PokemonStat {
                name: "hp".into(),
                value: 35,
            },
            PokemonStat {
                name: "speed".into(),
                value: 90,
            },
        ],
        flavor_text: None,
    }
}

/// Helper to create state as if one lookup already completed
fn state_with_pokemon() -> AppState {
    AppState {
        pokemon: Some(pikachu()),
        search_generation: 1,
        ..Default::default()
    }
}

fn entry(id: u32, name: &str) -> FavoriteEntry {
    FavoriteEntry {
        id,
        name: name.into(),
        sprite_front_default: None,
    }
}

// ============================================================================
// EffectStoreTestHarness Tests
// ============================================================================

#[test]
fn test_lookup_flow_with_harness() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    // Submit - should set loading and emit the lookup effect
    harness.dispatch_collect(Action::SearchQuerySubmit("pikachu".into()));
    harness.assert_state(|s| s.pokemon_loading);

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(
        |e| matches!(e, Effect::FetchPokemon { query, .. } if query == "pikachu"),
    );

    // Lookup completes; the dependent species fetch is chained
    harness.dispatch_collect(Action::PokemonDidLoad {
        generation: 1,
        pokemon: pikachu(),
    });
    harness.assert_state(|s| !s.pokemon_loading);
    harness.assert_state(|s| s.pokemon.as_ref().map(|p| p.id) == Some(25));

    let effects = harness.drain_effects();
    effects.effects_first_matches(
        |e| matches!(e, Effect::FetchFlavor { species, .. } if species == "pikachu"),
    );

    // Simulate async completion of the species fetch
    harness.complete_action(Action::FlavorDidLoad {
        generation: 1,
        text: Some("Stores electricity in its cheeks.".into()),
    });
    let (changed, total) = harness.process_emitted();

    assert_eq!(total, 1, "Should have processed 1 action");
    assert_eq!(changed, 1, "Action should have changed state");

    harness.assert_state(|s| {
        s.pokemon.as_ref().and_then(|p| p.flavor_text.as_deref())
            == Some("Stores electricity in its cheeks.")
    });
}

#[test]
fn test_lookup_error_keeps_previous_entity() {
    let mut harness = EffectStoreTestHarness::new(state_with_pokemon(), reducer);

    harness.dispatch_collect(Action::SearchQuerySubmit("bogus-name".into()));
    harness.assert_state(|s| s.pokemon_loading);

    // Simulate a 404 for the bogus name
    harness.complete_action(Action::PokemonDidError {
        generation: 2,
        query: "bogus-name".into(),
        error: "HTTP 404 for https://pokeapi.co/api/v2/pokemon/bogus-name".into(),
    });
    harness.process_emitted();

    // Previous entity stays; the failure only lands on the status line
    harness.assert_state(|s| s.pokemon.as_ref().map(|p| p.id) == Some(25));
    harness.assert_state(|s| !s.pokemon_loading);
    harness.assert_state(|s| {
        s.message
            .as_deref()
            .is_some_and(|m| m.starts_with("bogus-name load error:"))
    });
}

#[test]
fn test_superseded_lookup_is_discarded() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::SearchQuerySubmit("mew".into()));
    harness.dispatch_collect(Action::SearchQuerySubmit("ditto".into()));
    harness.drain_effects();

    // The first lookup resolves after the second was submitted
    harness.complete_action(Action::PokemonDidLoad {
        generation: 1,
        pokemon: pikachu(),
    });
    let (changed, total) = harness.process_emitted();

    assert_eq!(total, 1);
    assert_eq!(changed, 0, "Superseded result should not change state");

    harness.assert_state(|s| s.pokemon.is_none());
    harness.assert_state(|s| s.pokemon_loading);
}

#[test]
fn test_favorite_toggle_saves_full_list() {
    let mut harness = EffectStoreTestHarness::new(state_with_pokemon(), reducer);

    harness.dispatch_collect(Action::FavoriteToggle);
    harness.assert_state(|s| s.favorites.len() == 1);

    // Every toggle writes the whole list, not a delta
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| {
        matches!(e, Effect::SaveFavorites { entries } if entries.len() == 1 && entries[0].id == 25)
    });

    harness.dispatch_collect(Action::FavoriteToggle);
    harness.assert_state(|s| s.favorites.is_empty());

    let effects = harness.drain_effects();
    effects.effects_first_matches(|e| matches!(e, Effect::SaveFavorites { entries } if entries.is_empty()));
}

#[test]
fn test_hydration_restores_insertion_order() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::FavoritesDidLoad(vec![
        entry(7, "squirtle"),
        entry(4, "charmander"),
        entry(1, "bulbasaur"),
    ]));

    harness.assert_state(|s| {
        let ids: Vec<u32> = s.favorites.iter().map(|e| e.id).collect();
        ids == vec![7, 4, 1]
    });
    harness.assert_state(|s| s.is_favorite(4));
    harness.assert_state(|s| !s.is_favorite(25));
}

#[test]
fn test_dispatch_all() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    // Dispatch multiple actions at once
    let results = harness.dispatch_all([
        Action::SearchOpen,
        Action::SearchQueryChange("mew".into()),
        Action::SearchClose,
    ]);

    // All should have changed state
    assert_eq!(results, vec![true, true, true]);

    // Leaving search keeps the typed text
    harness.assert_state(|s| s.search_query == "mew");
    harness.assert_state(|s| s.focus == Focus::Detail);
}

// ============================================================================
// Component + Store Integration Tests
// ============================================================================

#[test]
fn test_keyboard_triggers_favorite_toggle() {
    let mut harness = EffectStoreTestHarness::new(state_with_pokemon(), reducer);
    let mut component = DetailPanel;

    // Send 'f' key through component, get actions
    let actions = harness.send_keys::<NumericComponentId, _, _>("f", |state, event| {
        let props = DetailPanelProps {
            state,
            is_focused: true,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_count(1);
    actions.assert_first(Action::FavoriteToggle);

    // Dispatch the returned action
    for action in actions {
        harness.dispatch_collect(action);
    }

    harness.assert_state(|s| s.is_favorite(25));
}

// ============================================================================
// Render Tests with Harness
// ============================================================================

#[test]
fn test_render_loaded_card() {
    let mut harness = EffectStoreTestHarness::new(state_with_pokemon(), reducer);
    let mut component = DetailPanel;

    let output = harness.render_plain(80, 24, |frame, area, state| {
        let props = DetailPanelProps {
            state,
            is_focused: true,
        };
        component.render(frame, area, props);
    });

    assert!(
        output.contains("Pikachu"),
        "Entity name should be visible in output:\n{}",
        output
    );
}

#[test]
fn test_render_toggle_label_changes_with_membership() {
    let mut harness = EffectStoreTestHarness::new(state_with_pokemon(), reducer);
    let mut component = DetailPanel;

    let before = harness.render_plain(80, 24, |frame, area, state| {
        let props = DetailPanelProps {
            state,
            is_focused: true,
        };
        component.render(frame, area, props);
    });
    assert!(before.contains("add to favorites"));

    harness.dispatch_collect(Action::FavoriteToggle);

    let after = harness.render_plain(80, 24, |frame, area, state| {
        let props = DetailPanelProps {
            state,
            is_focused: true,
        };
        component.render(frame, area, props);
    });
    assert!(after.contains("remove from favorites"));
    assert_ne!(before, after, "Toggle should change the rendered card");
}

// ============================================================================
// Async Simulation Tests
// ============================================================================

#[test]
fn test_missing_locale_leaves_description_absent() {
    let mut harness = EffectStoreTestHarness::new(
        AppState {
            flavor_loading: true,
            ..state_with_pokemon()
        },
        reducer,
    );

    // Species resolved but had no text in the target locale
    harness.complete_action(Action::FlavorDidLoad {
        generation: 1,
        text: None,
    });
    harness.process_emitted();

    harness.assert_state(|s| !s.flavor_loading);
    harness.assert_state(|s| s.pokemon.as_ref().is_some_and(|p| p.flavor_text.is_none()));
    harness.assert_state(|s| s.message.is_none());
}

#[test]
fn test_multiple_async_completions() {
    let mut harness = EffectStoreTestHarness::new(state_with_pokemon(), reducer);

    // Queue up multiple async completions
    harness.complete_action(Action::FlavorDidLoad {
        generation: 1,
        text: Some("Stores electricity in its cheeks.".into()),
    });
    harness.complete_action(Action::FavoriteToggle);

    // Process all at once
    let (changed, total) = harness.process_emitted();

    assert_eq!(total, 2);
    assert_eq!(changed, 2);

    // State should reflect both actions
    harness.assert_state(|s| s.pokemon.as_ref().is_some_and(|p| p.flavor_text.is_some()));
    harness.assert_state(|s| s.favorites.len() == 1);
}

// ============================================================================
// Effect Assertions Tests
// ============================================================================

#[test]
fn test_effect_assertions() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    // Initially no effects
    let effects = harness.drain_effects();
    effects.effects_empty();

    // Startup emits the hydration read plus the initial lookup
    harness.dispatch_collect(Action::Init);
    let effects = harness.drain_effects();
    effects.effects_not_empty();
    effects.effects_count(2);
    effects.effects_all_match(|e| {
        matches!(e, Effect::LoadFavorites) || matches!(e, Effect::FetchPokemon { .. })
    });
    effects.effects_none_match(|e| matches!(e, Effect::SaveFavorites { .. }));
}
