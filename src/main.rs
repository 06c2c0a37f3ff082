//! Pokedex TUI - a PokeAPI catalog browser

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::Span,
};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarItem, StatusBarProps, StatusBarSection, StatusBarStyle,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use pokedex::action::Action;
use pokedex::api;
use pokedex::components::{
    Component, DetailPanel, DetailPanelProps, FavoritesPanel, FavoritesPanelProps, SearchBar,
    SearchBarProps,
};
use pokedex::effect::Effect;
use pokedex::persist;
use pokedex::reducer::reducer;
use pokedex::sprite;
use pokedex::state::{AppState, Focus};

/// Pokedex TUI - tui-dispatch Pokemon browser
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "A Pokemon catalog TUI built on tui-dispatch")]
struct Args {
    /// Pokemon to load on startup
    #[arg(long, short, default_value = "bulbasaur")]
    pokemon: String,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum PokedexComponentId {
    Search,
    Detail,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum PokedexContext {
    Main,
    Search,
}

impl EventRoutingState<PokedexComponentId, PokedexContext> for AppState {
    fn focused(&self) -> Option<PokedexComponentId> {
        match self.focus {
            Focus::Search => Some(PokedexComponentId::Search),
            Focus::Detail => Some(PokedexComponentId::Detail),
        }
    }

    fn modal(&self) -> Option<PokedexComponentId> {
        None
    }

    fn binding_context(&self, id: PokedexComponentId) -> PokedexContext {
        match id {
            PokedexComponentId::Search => PokedexContext::Search,
            PokedexComponentId::Detail => PokedexContext::Main,
        }
    }

    fn default_context(&self) -> PokedexContext {
        PokedexContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        pokemon,
        debug: debug_args,
    } = Args::parse();

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(pokemon))
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
    }
    if use_alt_screen {
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

struct PokedexUi {
    search: SearchBar,
    detail: DetailPanel,
    favorites: FavoritesPanel,
}

impl PokedexUi {
    fn new() -> Self {
        Self {
            search: SearchBar::new(),
            detail: DetailPanel,
            favorites: FavoritesPanel,
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<PokedexComponentId>,
    ) {
        let rows = Layout::vertical([
            Constraint::Length(9),
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .split(area);

        self.favorites.render(
            frame,
            rows[0],
            FavoritesPanelProps {
                entries: &state.favorites,
                sprites: &state.sprites,
            },
        );

        event_ctx.set_component_area(PokedexComponentId::Search, rows[1]);
        self.search.render(
            frame,
            rows[1],
            SearchBarProps {
                query: &state.search_query,
                is_focused: render_ctx.is_focused() && state.focus == Focus::Search,
                on_query_change: Action::SearchQueryChange,
                on_query_submit: Action::SearchQuerySubmit,
            },
        );

        event_ctx.set_component_area(PokedexComponentId::Detail, rows[2]);
        self.detail.render(
            frame,
            rows[2],
            DetailPanelProps {
                state,
                is_focused: render_ctx.is_focused() && state.focus == Focus::Detail,
            },
        );

        render_footer(frame, rows[3], state);
    }

    fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = SearchBarProps {
            query: &state.search_query,
            is_focused: true,
            on_query_change: Action::SearchQueryChange,
            on_query_submit: Action::SearchQuerySubmit,
        };
        let actions: Vec<_> = self.search.handle_event(event, props).into_iter().collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }

    fn handle_detail_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = DetailPanelProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self.detail.handle_event(event, props).into_iter().collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }
}

fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let status = state.message.clone().unwrap_or_else(|| {
        if state.pokemon_loading {
            "Loading pokemon...".to_string()
        } else if state.flavor_loading {
            "Loading description...".to_string()
        } else if state.sprite_loading {
            "Fetching sprite...".to_string()
        } else {
            "".to_string()
        }
    });
    let status_span = Span::styled(status.as_str(), Style::default().fg(Color::Yellow));
    let status_items = [StatusBarItem::span(status_span)];

    let mut status_bar = StatusBar::new();
    <StatusBar as Component<Action>>::render(
        &mut status_bar,
        frame,
        area,
        StatusBarProps {
            left: StatusBarSection::empty(),
            center: StatusBarSection::hints(&[
                StatusBarHint::new("/", "search"),
                StatusBarHint::new("f", "favorite"),
                StatusBarHint::new("tab", "focus"),
                StatusBarHint::new("q", "quit"),
            ]),
            right: StatusBarSection::items(&status_items).with_separator("  "),
            style: StatusBarStyle::default(),
            is_focused: false,
        },
    );
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(PokedexUi::new()));
    let mut bus: EventBus<AppState, Action, PokedexComponentId, PokedexContext> = EventBus::new();
    let keybindings: Keybindings<PokedexContext> = Keybindings::new();

    let ui_search = Rc::clone(&ui);
    bus.register(PokedexComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    let ui_detail = Rc::clone(&ui);
    bus.register(PokedexComponentId::Detail, move |event, state| {
        ui_detail
            .borrow_mut()
            .handle_detail_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |_runtime| {},
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::FetchPokemon { generation, query } => {
            ctx.tasks().spawn("pokemon", async move {
                match api::fetch_pokemon(&query).await {
                    Ok(pokemon) => Action::PokemonDidLoad {
                        generation,
                        pokemon,
                    },
                    Err(e) => Action::PokemonDidError {
                        generation,
                        query,
                        error: e.to_string(),
                    },
                }
            });
        }
        Effect::FetchFlavor {
            generation,
            species,
        } => {
            ctx.tasks().spawn("flavor", async move {
                match api::fetch_flavor_text(&species).await {
                    Ok(text) => Action::FlavorDidLoad { generation, text },
                    Err(e) => Action::FlavorDidError {
                        generation,
                        species,
                        error: e.to_string(),
                    },
                }
            });
        }
        Effect::FetchSprite { id, url } => {
            ctx.tasks()
                .spawn(TaskKey::new(format!("sprite_{id}")), async move {
                    let decoded = match api::fetch_sprite_bytes(&url).await {
                        Ok(bytes) => sprite::decode_sprite(&bytes),
                        Err(e) => Err(e.to_string()),
                    };
                    match decoded {
                        Ok(sprite) => Action::SpriteDidLoad { id, sprite },
                        Err(error) => Action::SpriteDidError { id, error },
                    }
                });
        }
        Effect::LoadFavorites => {
            ctx.tasks().spawn("favorites_load", async move {
                match persist::load_favorites().await {
                    Ok(entries) => Action::FavoritesDidLoad(entries),
                    Err(error) => Action::FavoritesLoadDidError(error),
                }
            });
        }
        Effect::SaveFavorites { entries } => {
            ctx.tasks().spawn("favorites_save", async move {
                match persist::save_favorites(&entries).await {
                    Ok(()) => Action::FavoritesDidSave,
                    Err(error) => Action::FavoritesSaveDidError(error),
                }
            });
        }
    }
}
