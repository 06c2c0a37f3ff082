use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tui_dispatch::EventKind;

use super::{format_name, Component};
use crate::action::Action;
use crate::state::{AppState, PokemonStat, StatBand};

/// Props for DetailPanel - read-only view of state
pub struct DetailPanelProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The entity card: sprite, types, description, and banded stat bars
#[derive(Default)]
pub struct DetailPanel;

impl Component<Action> for DetailPanel {
    type Props<'a> = DetailPanelProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('f') => Some(Action::FavoriteToggle),
                KeyCode::Char('/') => Some(Action::SearchOpen),
                KeyCode::Tab => Some(Action::FocusNext),
                KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let border = if props.is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title("POKEMON")
            .border_style(border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.width < 10 || inner.height < 4 {
            return;
        }

        match &props.state.pokemon {
            Some(_) => render_card(frame, inner, props.state),
            None => render_placeholder(frame, inner, props.state),
        }
    }
}

fn render_placeholder(frame: &mut Frame, area: Rect, state: &AppState) {
    let line = if state.pokemon_loading {
        Line::from(vec![Span::styled(
            "Loading...",
            Style::default().fg(Color::DarkGray),
        )])
    } else {
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("/", Style::default().fg(Color::Cyan).bold()),
            Span::styled(
                " and search for a Pokemon",
                Style::default().fg(Color::DarkGray),
            ),
        ])
    };

    let chunks = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .split(area);
    frame.render_widget(
        Paragraph::new(line).alignment(Alignment::Center),
        chunks[0],
    );
}

fn render_card(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(pokemon) = state.pokemon.as_ref() else {
        return;
    };

    let columns = Layout::horizontal([Constraint::Length(30), Constraint::Min(24)]).split(area);
    render_sprite(frame, columns[0], state);

    let stats_height = pokemon.stats.len() as u16;
    let rows = Layout::vertical([
        Constraint::Length(1), // name + id
        Constraint::Length(1), // type tags
        Constraint::Length(1),
        Constraint::Min(2),               // description
        Constraint::Length(stats_height), // stat bars
        Constraint::Length(1),
        Constraint::Length(1), // favorite toggle label
    ])
    .split(columns[1]);

    let favored = state.is_favorite(pokemon.id);

    let mut name_spans = vec![
        Span::styled(
            format_name(&pokemon.name),
            Style::default().fg(Color::Yellow).bold(),
        ),
        Span::styled(
            format!("  #{:03}", pokemon.id),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if favored {
        name_spans.push(Span::styled("  *", Style::default().fg(Color::Yellow)));
    }
    frame.render_widget(Paragraph::new(Line::from(name_spans)), rows[0]);

    frame.render_widget(Paragraph::new(type_line(&pokemon.types)), rows[1]);

    match (&pokemon.flavor_text, state.flavor_loading) {
        (Some(text), _) => {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    text.clone(),
                    Style::default().fg(Color::Gray),
                )))
                .wrap(Wrap { trim: true }),
                rows[3],
            );
        }
        (None, true) => {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "...",
                    Style::default().fg(Color::DarkGray),
                ))),
                rows[3],
            );
        }
        // Description never arrived; the card simply has none
        (None, false) => {}
    }

    let stat_lines: Vec<Line> = pokemon.stats.iter().map(stat_line).collect();
    frame.render_widget(Paragraph::new(stat_lines), rows[4]);

    let toggle_label = if favored {
        "remove from favorites"
    } else {
        "add to favorites"
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("f ", Style::default().fg(Color::Cyan).bold()),
            Span::styled(toggle_label, Style::default().fg(Color::DarkGray)),
        ])),
        rows[6],
    );
}

fn render_sprite(frame: &mut Frame, area: Rect, state: &AppState) {
    if let Some(text) = state
        .displayed_sprite()
        .and_then(|sprite| sprite.half_block_text(area.width.saturating_sub(2), area.height))
    {
        let height = text.lines.len() as u16;
        let chunks = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .split(area);
        frame.render_widget(
            Paragraph::new(text).alignment(Alignment::Center),
            chunks[0],
        );
        return;
    }

    let placeholder = if state.sprite_loading {
        "Fetching sprite..."
    } else {
        "(no sprite)"
    };
    let chunks = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .split(area);
    frame.render_widget(
        Paragraph::new(
            Line::from(Span::styled(
                placeholder,
                Style::default().fg(Color::DarkGray),
            ))
            .centered(),
        ),
        chunks[0],
    );
}

fn stat_line(stat: &PokemonStat) -> Line<'static> {
    let label = shorten_stat(&stat.name);
    let bar_len = (stat.value as usize / 10).min(20).max(1);
    let color = band_color(StatBand::for_value(stat.value));
    Line::from(vec![
        Span::raw(format!("{label:>4} {value:>3} ", value = stat.value)),
        Span::styled("#".repeat(bar_len), Style::default().fg(color)),
    ])
}

fn band_color(band: StatBand) -> Color {
    match band {
        StatBand::Low => Color::Red,
        StatBand::Mid => Color::Yellow,
        StatBand::High => Color::Green,
    }
}

fn shorten_stat(name: &str) -> String {
    match name {
        "hp" => " HP".to_string(),
        "attack" => "ATK".to_string(),
        "defense" => "DEF".to_string(),
        "special-attack" => "SAT".to_string(),
        "special-defense" => "SDF".to_string(),
        "speed" => "SPD".to_string(),
        _ => name.to_ascii_uppercase(),
    }
}

fn type_line(types: &[String]) -> Line<'static> {
    let mut spans = vec![Span::styled("Type ", Style::default().fg(Color::DarkGray))];
    for (index, name) in types.iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            format!(" {} ", format_name(name)),
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ));
    }
    Line::from(spans)
}
