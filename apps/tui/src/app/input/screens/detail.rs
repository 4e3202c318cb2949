use crate::app::state::App;
use crossterm::event::KeyCode;
use recipe_browser::source::RemoteRecipeSource;

pub fn handle_detail_input<R: RemoteRecipeSource + 'static>(app: &mut App<R>, key: KeyCode) {
    match key {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('q') => {
            app.close_detail();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.detail_scroll = app.detail_scroll.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.detail_scroll = app.detail_scroll.saturating_add(1);
        }
        KeyCode::PageUp => app.detail_scroll = app.detail_scroll.saturating_sub(10),
        KeyCode::PageDown => app.detail_scroll = app.detail_scroll.saturating_add(10),
        KeyCode::Home => app.detail_scroll = 0,
        _ => {}
    }
}
