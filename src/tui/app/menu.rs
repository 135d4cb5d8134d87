use crate::game::MatchConfig;
use crate::round::{MAX_PLAYERS, MIN_PLAYERS};

use super::{AppState, Scene};

pub const MAX_MENU_ROUNDS: usize = 18;

#[derive(Debug, Clone, Copy)]
enum MenuItem {
    Players,
    Rounds,
}

const MENU_ITEMS: [MenuItem; 2] = [MenuItem::Players, MenuItem::Rounds];

impl MenuItem {
    fn display(self, app: &AppState) -> String {
        match self {
            MenuItem::Players => format!("Players: {}", app.cfg_num_players),
            MenuItem::Rounds => format!("Rounds: {}", app.cfg_rounds),
        }
    }

    fn inc(self, app: &mut AppState) {
        match self {
            MenuItem::Players => {
                if app.cfg_num_players < MAX_PLAYERS {
                    app.cfg_num_players += 1;
                }
            }
            MenuItem::Rounds => {
                if app.cfg_rounds < MAX_MENU_ROUNDS {
                    app.cfg_rounds += 1;
                }
            }
        }
    }

    fn dec(self, app: &mut AppState) {
        match self {
            MenuItem::Players => {
                if app.cfg_num_players > MIN_PLAYERS {
                    app.cfg_num_players -= 1;
                }
            }
            MenuItem::Rounds => {
                if app.cfg_rounds > 1 {
                    app.cfg_rounds -= 1;
                }
            }
        }
    }
}

impl AppState {
    pub fn menu_items_display(&self) -> Vec<String> {
        MENU_ITEMS.iter().map(|item| item.display(self)).collect()
    }

    pub fn toggle_menu(&mut self) {
        self.close_help();
        self.close_history();
        self.scene = match self.scene {
            Scene::Menu => Scene::Table,
            _ => {
                self.open_menu();
                Scene::Menu
            }
        };
    }

    pub fn open_menu(&mut self) {
        self.close_help();
        self.close_history();
        let config = self.game.config();
        self.menu_index = 0;
        self.cfg_num_players = config.players;
        self.cfg_rounds = config.rounds;
        self.scene = Scene::Menu;
    }

    /// Start a fresh match with the edited settings. Returns false (and stays
    /// in the menu) if the settings are rejected.
    pub fn apply_menu(&mut self) -> bool {
        self.cfg_num_players = self.cfg_num_players.clamp(MIN_PLAYERS, MAX_PLAYERS);
        self.cfg_rounds = self.cfg_rounds.clamp(1, MAX_MENU_ROUNDS);
        let config = MatchConfig::new(self.cfg_num_players, self.cfg_rounds);
        match Self::new_match(config, self.seed()) {
            Ok(game) => {
                self.game = game;
                self.reset_table();
                self.scene = Scene::Table;
                true
            }
            Err(err) => {
                tracing::warn!(%err, "menu settings rejected");
                false
            }
        }
    }

    pub fn cancel_menu(&mut self) {
        self.scene = Scene::Table;
    }

    pub fn menu_next(&mut self) {
        self.menu_index = (self.menu_index + 1) % MENU_ITEMS.len();
    }
    pub fn menu_prev(&mut self) {
        self.menu_index = (self.menu_index + MENU_ITEMS.len() - 1) % MENU_ITEMS.len();
    }
    pub fn menu_inc(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.inc(self);
    }
    pub fn menu_dec(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.dec(self);
    }
}
