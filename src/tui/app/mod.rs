mod menu;
mod state;

pub use menu::MAX_MENU_ROUNDS;
pub use state::{AppState, InputAction, Scene};
