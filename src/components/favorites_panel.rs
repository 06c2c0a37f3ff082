use std::collections::HashMap;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::{format_name, Component};
use crate::action::Action;
use crate::sprite::SpriteImage;
use crate::state::FavoriteEntry;

const THUMB_WIDTH: u16 = 14;

pub struct FavoritesPanelProps<'a> {
    pub entries: &'a [FavoriteEntry],
    pub sprites: &'a HashMap<u32, SpriteImage>,
}

/// Favorites strip: count plus one thumbnail per saved entry, oldest first.
/// Display only - toggling happens on the detail card.
#[derive(Default)]
pub struct FavoritesPanel;

impl Component<Action> for FavoritesPanel {
    type Props<'a> = FavoritesPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("FAVORITES")
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.height < 1 {
            return;
        }

        let rows = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).split(inner);

        let count = props.entries.len();
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!("You currently have {count} pokemon in your favorites"),
                Style::default().fg(Color::Gray),
            ))),
            rows[0],
        );

        let strip = rows[1];
        if strip.height == 0 {
            return;
        }

        // Fixed-width cells left to right, in the order entries were added
        let mut x = strip.x;
        for entry in props.entries {
            if x + THUMB_WIDTH > strip.x + strip.width {
                break;
            }
            let cell = Rect::new(x, strip.y, THUMB_WIDTH, strip.height);
            render_thumb(frame, cell, entry, props.sprites);
            x += THUMB_WIDTH;
        }
    }
}

fn render_thumb(
    frame: &mut Frame,
    area: Rect,
    entry: &FavoriteEntry,
    sprites: &HashMap<u32, SpriteImage>,
) {
    let parts = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(area);

    if let Some(text) = sprites
        .get(&entry.id)
        .and_then(|sprite| sprite.half_block_text(parts[0].width, parts[0].height))
    {
        let height = text.lines.len() as u16;
        let chunks = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .split(parts[0]);
        frame.render_widget(
            Paragraph::new(text).alignment(Alignment::Center),
            chunks[0],
        );
    }

    frame.render_widget(
        Paragraph::new(
            Line::from(Span::styled(
                format_name(&entry.name),
                Style::default().fg(Color::DarkGray),
            ))
            .centered(),
        ),
        parts[1],
    );
}
