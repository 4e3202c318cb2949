use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;
use recipe_browser::source::RemoteRecipeSource;

mod browse;
mod detail;
mod help;

pub fn dispatch_input<R: RemoteRecipeSource + 'static>(app: &mut App<R>, key: KeyCode) {
    if help::handle_help_toggle(app, key) {
        return;
    }

    match app.screen {
        AppScreen::Browse => browse::handle_browse_input(app, key),
        AppScreen::Detail => detail::handle_detail_input(app, key),
    }
}
