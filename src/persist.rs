//! Favorites persistence - one JSON slot in the local data directory

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::state::FavoriteEntry;

/// Slot location: `{data dir}/pokedex/favorites.json`.
pub fn favorites_path() -> PathBuf {
    let base = dirs_next::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("pokedex").join("favorites.json")
}

/// Hydrate the favorites list. A missing slot is an empty list; an
/// unreadable or corrupted slot is an error the caller surfaces.
pub async fn load_favorites() -> Result<Vec<FavoriteEntry>, String> {
    load_favorites_from(&favorites_path()).await
}

/// Overwrite the slot with the full current list.
pub async fn save_favorites(entries: &[FavoriteEntry]) -> Result<(), String> {
    save_favorites_to(&favorites_path(), entries).await
}

async fn load_favorites_from(path: &Path) -> Result<Vec<FavoriteEntry>, String> {
    let json = match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) => {
            if e.kind() == ErrorKind::NotFound {
                return Ok(Vec::new());
            }
            return Err(format!("Failed to read favorites: {}", e));
        }
    };
    let entries: Vec<FavoriteEntry> =
        serde_json::from_str(&json).map_err(|e| format!("Favorites file corrupted: {}", e))?;
    Ok(entries)
}

async fn save_favorites_to(path: &Path, entries: &[FavoriteEntry]) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| format!("Failed to create favorites directory: {}", e))?;
    }
    let json = serde_json::to_string_pretty(entries)
        .map_err(|e| format!("Failed to serialize favorites: {}", e))?;
    tokio::fs::write(path, json)
        .await
        .map_err(|e| format!("Failed to write favorites: {}", e))?;
    Ok(())
}
