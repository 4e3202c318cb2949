mod helpers;
pub mod screens;

use crate::app::state::App;
use crossterm::event::KeyCode;
use recipe_browser::source::RemoteRecipeSource;

pub fn handle_input<R: RemoteRecipeSource + 'static>(app: &mut App<R>, key: KeyCode) {
    screens::dispatch_input(app, key);
}
