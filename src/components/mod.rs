pub mod detail_panel;
pub mod favorites_panel;
pub mod search_bar;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use detail_panel::{DetailPanel, DetailPanelProps};
pub use favorites_panel::{FavoritesPanel, FavoritesPanelProps};
pub use search_bar::{SearchBar, SearchBarProps};

/// Catalog names are lowercase and hyphenated ("mr-mime"); show them as
/// "Mr Mime".
pub fn format_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => format!("{}{}", first.to_ascii_uppercase(), chars.as_str()),
                None => "".to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
