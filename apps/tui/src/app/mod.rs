// App module for the recipe browser
// Holds interactive state and maps key presses onto catalog queries

pub mod actions;
pub mod input;
pub mod state;

pub use input::handle_input;
pub use state::{App, AppScreen};
