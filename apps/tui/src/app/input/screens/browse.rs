use crate::app::input::helpers::{step_clamped, wrap_decrement, wrap_increment};
use crate::app::state::App;
use crossterm::event::KeyCode;
use recipe_browser::source::RemoteRecipeSource;

const PAGE: isize = 10;

pub fn handle_browse_input<R: RemoteRecipeSource + 'static>(app: &mut App<R>, key: KeyCode) {
    if app.search_active {
        handle_search_input(app, key);
        return;
    }

    match key {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('/') => app.search_active = true,
        KeyCode::Esc if !app.search_query.is_empty() => app.clear_search(),
        KeyCode::Left => {
            let index = wrap_decrement(app.area_index, app.area_count());
            app.set_area_index(index);
        }
        KeyCode::Right | KeyCode::Tab => {
            let index = wrap_increment(app.area_index, app.area_count());
            app.set_area_index(index);
        }
        KeyCode::Up | KeyCode::Char('k') => move_selection(app, -1),
        KeyCode::Down | KeyCode::Char('j') => move_selection(app, 1),
        KeyCode::PageUp => move_selection(app, -PAGE),
        KeyCode::PageDown => move_selection(app, PAGE),
        KeyCode::Home => app.selected_index = 0,
        KeyCode::End => app.selected_index = app.recipes().len().saturating_sub(1),
        KeyCode::Enter => app.open_selected(),
        _ => {}
    }
}

/// Each edit of the search box re-runs the in-memory search.
fn handle_search_input<R: RemoteRecipeSource + 'static>(app: &mut App<R>, key: KeyCode) {
    match key {
        KeyCode::Char(c) => {
            app.search_query.push(c);
            app.apply_search();
        }
        KeyCode::Backspace => {
            app.search_query.pop();
            app.apply_search();
        }
        KeyCode::Enter | KeyCode::Down => app.search_active = false,
        KeyCode::Esc => app.clear_search(),
        _ => {}
    }
}

fn move_selection<R>(app: &mut App<R>, delta: isize) {
    app.selected_index = step_clamped(app.selected_index, delta, app.listing.recipes.len());
}
