//! Pokedex TUI - a PokeAPI catalog browser
//!
//! This library exposes the app's modules for testing.

pub mod action;
pub mod api;
pub mod components;
pub mod effect;
pub mod persist;
pub mod reducer;
pub mod sprite;
pub mod state;
