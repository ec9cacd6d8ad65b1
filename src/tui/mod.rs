//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Loading**: draws every ~80ms so the footer spinner animates.
//! - **Idle**: sleeps up to 500ms, only redraws on events, fetch results
//!   or terminal resize.
//!
//! Page fetches run on tokio tasks and report back through an mpsc channel
//! as `Action::PageLoaded`. The core decides whether a result is still
//! current; the adapter never cancels tasks.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::api::{HotPepperClient, RestaurantDirectory, SearchQuery};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::favorites::FavoritesStore;
use crate::core::search::PageRequest;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    FavoritesEvent, FavoritesManagerState, RestaurantListState, SearchBox, SearchBoxEvent,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::viewer;

/// Rows skipped by PageUp/PageDown.
const PAGE_JUMP: isize = 10;

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub list: RestaurantListState,
    pub search_box: SearchBox,
    // Favorites overlay (None = hidden)
    pub favorites_manager: Option<FavoritesManagerState>,
}

impl TuiState {
    pub fn new(initial_text: &str, placeholder: &str) -> Self {
        Self {
            list: RestaurantListState::default(),
            search_box: SearchBox::new(initial_text, placeholder),
            favorites_manager: None,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock // Blinking resets on every draw()
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste, Hide);
    }
}

pub fn build_directory(config: &ResolvedConfig) -> Arc<dyn RestaurantDirectory> {
    Arc::new(HotPepperClient::new(
        config.api_key.clone(),
        Some(config.base_url.clone()),
    ))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    // Open favorites before touching the terminal so errors print normally
    let favorites =
        FavoritesStore::open(&config.favorites_path).map_err(std::io::Error::other)?;
    let directory = build_directory(&config);
    info!("Using restaurant directory: {}", directory.name());

    let mut app = App::from_config(directory, favorites, &config);
    let mut tui = TuiState::new(&config.initial_keyword, &config.default_keyword);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for page results from background fetches
    let (tx, rx) = mpsc::channel();

    let effect = update(&mut app, Action::Search(config.initial_keyword.clone()));
    let mut should_quit = apply_effect(&mut app, effect, &tx);

    let start_time = Instant::now();
    let mut needs_redraw = true;

    while !should_quit {
        let animating = app.session.is_loading();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Drain every pending event before the next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            for effect in route_event(&mut app, &mut tui, event) {
                should_quit |= apply_effect(&mut app, effect, &tx);
            }
            if should_quit {
                break;
            }
        }

        // Page results from fetch tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            should_quit |= apply_effect(&mut app, effect, &tx);
            tui.list.clamp(app.session.results().len());
        }
    }

    ratatui::restore();
    Ok(())
}

/// Translates one terminal event into core updates. Returns the effects
/// the loop still has to carry out.
fn route_event(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Vec<Effect> {
    let mut effects = Vec::new();

    if matches!(event, TuiEvent::Resize) {
        return effects;
    }

    // Ctrl+C always quits, even with the overlay open
    if matches!(event, TuiEvent::ForceQuit) {
        effects.push(update(app, Action::Quit));
        return effects;
    }

    // When the favorites overlay is open, route all events to it
    if let Some(ref mut fm) = tui.favorites_manager {
        match fm.handle_event(&event) {
            Some(FavoritesEvent::Open(id)) => {
                effects.push(update(app, Action::OpenFavoriteCoupon(id)));
            }
            Some(FavoritesEvent::Remove(id)) => {
                effects.push(update(app, Action::RemoveFavorite(id.clone())));
                if !app.favorites.is_favorite(&id) {
                    fm.remove_entry(&id);
                }
            }
            Some(FavoritesEvent::Dismiss) => tui.favorites_manager = None,
            None => {}
        }
        return effects;
    }

    let len = app.session.results().len();
    match event {
        TuiEvent::Escape => effects.push(update(app, Action::Quit)),
        TuiEvent::OpenFavorites => {
            let entries = app.favorites.entries().into_iter().cloned().collect();
            tui.favorites_manager = Some(FavoritesManagerState::new(entries));
        }
        TuiEvent::CursorUp => tui.list.move_by(-1, len),
        TuiEvent::PageUp => tui.list.move_by(-PAGE_JUMP, len),
        TuiEvent::CursorDown | TuiEvent::PageDown => {
            let delta = if matches!(event, TuiEvent::PageDown) {
                PAGE_JUMP
            } else {
                1
            };
            tui.list.move_by(delta, len);
            if tui.list.is_at_end(len) {
                effects.push(update(app, Action::LoadMore));
            }
        }
        TuiEvent::Submit => {
            if let Some(index) = tui.list.selected() {
                effects.push(update(app, Action::OpenCoupon(index)));
            }
        }
        TuiEvent::ToggleFavorite => {
            if let Some(index) = tui.list.selected() {
                effects.push(update(app, Action::ToggleFavorite(index)));
            }
        }
        TuiEvent::Refresh => effects.push(update(app, Action::Refresh)),
        other => {
            if let Some(SearchBoxEvent::Changed(text)) = tui.search_box.handle_event(&other) {
                tui.list.reset();
                effects.push(update(app, Action::Search(text)));
            }
        }
    }
    effects
}

/// Carries out an effect. Returns true when the app should quit.
fn apply_effect(app: &mut App, effect: Effect, tx: &mpsc::Sender<Action>) -> bool {
    match effect {
        Effect::None => false,
        Effect::Fetch(request) => {
            spawn_fetch(app.directory.clone(), request, tx.clone());
            false
        }
        Effect::OpenUrl(url) => {
            if let Err(e) = viewer::open_in_browser(&url) {
                warn!("Failed to open {}: {}", url, e);
                app.status_message = format!("Could not open coupon page: {e}");
            }
            false
        }
        Effect::Quit => true,
    }
}

fn spawn_fetch(
    directory: Arc<dyn RestaurantDirectory>,
    request: PageRequest,
    tx: mpsc::Sender<Action>,
) {
    info!(
        "Spawning fetch: \"{}\" start={} count={} (generation={})",
        request.keyword, request.start, request.count, request.generation
    );
    tokio::spawn(async move {
        let outcome = directory
            .search(SearchQuery {
                keyword: &request.keyword,
                start: request.start,
                count: request.count,
            })
            .await;
        if tx
            .send(Action::PageLoaded {
                generation: request.generation,
                outcome,
            })
            .is_err()
        {
            warn!(
                "Failed to deliver page (generation={}): receiver dropped",
                request.generation
            );
        }
    });
}
