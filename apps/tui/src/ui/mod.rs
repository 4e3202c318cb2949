// UI module for the recipe browser
// Handles all UI rendering functions

pub mod screens;
pub mod widgets;

use crate::app::state::AppScreen;
use crate::app::App;
use ratatui::Frame;

pub fn ui<R>(app: &App<R>, f: &mut Frame<'_>) {
    screens::browse::render_browse(app, f);

    if app.screen == AppScreen::Detail {
        screens::detail::render_detail(app, f);
    }

    if app.show_help {
        screens::help::render_help(f);
    }
}
