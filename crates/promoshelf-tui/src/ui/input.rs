//! Keyboard input handling for the TUI.
//!
//! Keys that change the page become `UiEvent`s; keys that only move the
//! terminal selection or overlays are handled here.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use promoshelf_core::UiEvent;
use tracing::warn;

use crate::app::{App, AppState};

/// Lines scrolled per key press in the FAQ overlay.
const FAQ_SCROLL_STEP: u16 = 2;

/// Handle keyboard input. Returns true if the app should quit.
pub async fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match app.state {
        AppState::ShowingHelp => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                app.state = AppState::Normal;
            }
            return Ok(false);
        }
        AppState::ShowingCopy(_) => {
            app.state = AppState::Normal;
            return Ok(false);
        }
        AppState::ShowingFaq => {
            match key.code {
                KeyCode::Esc | KeyCode::Char('f') | KeyCode::Char('q') => {
                    app.state = AppState::Normal;
                    app.faq_scroll = 0;
                }
                KeyCode::Down | KeyCode::Char('j') => app.faq_scroll += FAQ_SCROLL_STEP,
                KeyCode::Up | KeyCode::Char('k') => {
                    app.faq_scroll = app.faq_scroll.saturating_sub(FAQ_SCROLL_STEP)
                }
                _ => {}
            }
            return Ok(false);
        }
        AppState::Searching => {
            handle_search_input(app, key).await;
            return Ok(false);
        }
        AppState::Quitting => return Ok(true),
        AppState::Normal => {}
    }

    if app.modal_open() {
        handle_modal_input(app, key).await;
        return Ok(false);
    }

    // Any key clears the last status message
    app.status_message = None;

    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::Quitting;
            return Ok(true);
        }
        KeyCode::Char('?') => app.state = AppState::ShowingHelp,
        KeyCode::Char('f') => app.state = AppState::ShowingFaq,
        KeyCode::Char('/') => app.start_search(),
        KeyCode::Esc => {
            if !app.page.state().search.is_empty() {
                app.dispatch(UiEvent::SearchInput(String::new())).await;
            }
        }
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Left | KeyCode::Char('h') => {
            app.dispatch(UiEvent::PrevPage).await;
            app.selection = 0;
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.dispatch(UiEvent::NextPage).await;
            app.selection = 0;
        }
        KeyCode::Tab => {
            let event = app.cycle_chip(true);
            app.dispatch(event).await;
            app.selection = 0;
        }
        KeyCode::BackTab => {
            let event = app.cycle_chip(false);
            app.dispatch(event).await;
            app.selection = 0;
        }
        KeyCode::Enter => {
            if let Some(id) = app.selected_id() {
                app.dispatch(UiEvent::OpenPromo(id)).await;
            }
        }
        KeyCode::Char('s') | KeyCode::Char('c') => {
            // Save and copy act on the open promotion, so open the selected one first
            if let Some(id) = app.selected_id() {
                app.dispatch(UiEvent::OpenPromo(id)).await;
                let event = if key.code == KeyCode::Char('s') { UiEvent::ToggleSave } else { UiEvent::CopyLink };
                app.dispatch(event).await;
                app.dispatch(UiEvent::CloseModal).await;
            }
        }
        KeyCode::Char('v') => app.toggle_saved_view(),
        KeyCode::Char('t') => app.dispatch(UiEvent::ToggleTheme).await,
        KeyCode::Char('m') => app.dispatch(UiEvent::ToggleReducedMotion).await,
        KeyCode::Char('i') => app.dispatch(UiEvent::InstallClicked).await,
        KeyCode::Char('e') => {
            if let Err(e) = app.export_html() {
                warn!(error = %e, "Export failed");
                app.status_message = Some(format!("Export failed: {}", e));
            }
        }
        _ => {}
    }
    Ok(false)
}

async fn handle_modal_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.dispatch(UiEvent::CloseModal).await,
        KeyCode::Char('s') => app.dispatch(UiEvent::ToggleSave).await,
        KeyCode::Char('c') => app.dispatch(UiEvent::CopyLink).await,
        _ => {}
    }
}

/// Each keystroke re-filters, as typing in the search box does.
async fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.search_input.clear();
            app.state = AppState::Normal;
            app.dispatch(UiEvent::SearchInput(String::new())).await;
        }
        KeyCode::Enter => {
            app.state = AppState::Normal;
        }
        KeyCode::Backspace => {
            app.search_input.pop();
            app.selection = 0;
            app.dispatch(UiEvent::SearchInput(app.search_input.clone())).await;
        }
        KeyCode::Char(c) => {
            app.search_input.push(c);
            app.selection = 0;
            app.dispatch(UiEvent::SearchInput(app.search_input.clone())).await;
        }
        _ => {}
    }
}
