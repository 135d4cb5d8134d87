use crate::deck::RngShuffler;
use crate::engine::{apply, Command};
use crate::error::GolfError;
use crate::game::{Match, MatchConfig};
use crate::hand::HAND_SIZE;
use crate::round::{Phase, TurnStep, REVEAL_COUNT};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Scene {
    Menu,
    Table,
}

/// High-level input actions for the TUI controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputAction {
    MenuNext,
    MenuPrev,
    MenuInc,
    MenuDec,
    MenuApply,
    MenuCancel,
    ToggleMenu,
    ToggleHelp,
    ToggleHistory,
    HistoryUp,
    HistoryDown,
    /// Deal, bank a finished round, or start over after the last round.
    Advance,
    DrawDeck,
    DrawDiscard,
    DiscardDrawn,
    /// A slot key (0-based). Meaning depends on phase and turn step.
    Slot(usize),
    ConfirmReveal,
}

#[derive(Debug)]
#[non_exhaustive]
pub struct AppState {
    pub scene: Scene,
    pub game: Match,
    // Menu config being edited
    pub menu_index: usize,
    pub cfg_num_players: usize,
    pub cfg_rounds: usize,
    seed: Option<u64>,
    reveal_selection: Vec<usize>,
    help_open: bool,
    history_open: bool,
    history_offset: usize,
    action_error: Option<String>,
    action_error_at: Option<Instant>,
}

impl AppState {
    pub const HISTORY_PAGE_SIZE: usize = 20;
    const ACTION_ERROR_TTL: Duration = Duration::from_secs(3);

    /// App in the menu scene with a default match. A `seed` makes every
    /// match started from this app reproducible.
    pub fn new(seed: Option<u64>) -> Result<Self, GolfError> {
        let config = MatchConfig::default();
        Ok(Self {
            scene: Scene::Menu,
            game: Self::new_match(config, seed)?,
            menu_index: 0,
            cfg_num_players: config.players,
            cfg_rounds: config.rounds,
            seed,
            reveal_selection: Vec::with_capacity(REVEAL_COUNT),
            help_open: false,
            history_open: false,
            history_offset: 0,
            action_error: None,
            action_error_at: None,
        })
    }

    pub(crate) fn new_match(config: MatchConfig, seed: Option<u64>) -> Result<Match, GolfError> {
        let shuffler = match seed {
            Some(s) => RngShuffler::seeded(s),
            None => RngShuffler::from_thread_rng(),
        };
        Match::start(config, shuffler)
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Slots picked so far by the player making the initial reveal.
    pub fn reveal_selection(&self) -> &[usize] {
        &self.reveal_selection
    }

    pub fn action_error(&self) -> Option<&str> {
        self.action_error.as_deref()
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn history_open(&self) -> bool {
        self.history_open
    }

    pub fn history_offset(&self) -> usize {
        self.history_offset
    }

    pub(crate) fn close_help(&mut self) {
        self.help_open = false;
    }

    pub(crate) fn close_history(&mut self) {
        self.history_open = false;
    }

    pub(crate) fn reset_table(&mut self) {
        self.reveal_selection.clear();
        self.history_offset = 0;
        self.clear_action_error();
    }

    fn clear_action_error(&mut self) {
        self.action_error = None;
        self.action_error_at = None;
    }

    fn report(&mut self, result: Result<(), GolfError>) -> bool {
        match result {
            Ok(()) => {
                self.clear_action_error();
                true
            }
            Err(err) => {
                self.action_error = Some(err.to_string());
                self.action_error_at = Some(Instant::now());
                false
            }
        }
    }

    /// Player the table is waiting on: the next revealer during the initial
    /// reveal, otherwise the player to act.
    pub fn active_player(&self) -> usize {
        let round = self.game.round();
        round.next_to_reveal().unwrap_or_else(|| round.current_player())
    }

    fn turn_command(&mut self, command: Command) -> bool {
        if self.scene != Scene::Table {
            return false;
        }
        let player = self.active_player();
        let result = apply(&mut self.game, player, command);
        self.report(result)
    }

    fn advance(&mut self) -> bool {
        if self.scene != Scene::Table {
            return false;
        }
        let result = if self.game.is_over() {
            Self::new_match(self.game.config(), self.seed).map(|m| self.game = m)
        } else {
            match self.game.round().phase() {
                Phase::Setup => apply(&mut self.game, 0, Command::Deal),
                Phase::RoundEnd => apply(&mut self.game, 0, Command::NextRound).and_then(|_| {
                    if self.game.is_over() {
                        Ok(())
                    } else {
                        apply(&mut self.game, 0, Command::Deal)
                    }
                }),
                _ => return false,
            }
        };
        let ok = self.report(result);
        if ok {
            self.reveal_selection.clear();
            self.history_offset = 0;
        }
        ok
    }

    fn select_slot(&mut self, slot: usize) -> bool {
        if self.scene != Scene::Table || slot >= HAND_SIZE {
            return false;
        }
        match self.game.round().phase() {
            Phase::InitialReveal => {
                if let Some(pos) = self.reveal_selection.iter().position(|&s| s == slot) {
                    self.reveal_selection.remove(pos);
                } else if self.reveal_selection.len() < REVEAL_COUNT {
                    self.reveal_selection.push(slot);
                }
                true
            }
            Phase::Playing => match self.game.round().turn_step() {
                TurnStep::MustFlip => self.turn_command(Command::Flip(slot)),
                _ => self.turn_command(Command::Replace(slot)),
            },
            _ => false,
        }
    }

    fn confirm_reveal(&mut self) -> bool {
        if self.scene != Scene::Table {
            return false;
        }
        let Some(player) = self.game.round().next_to_reveal() else {
            return false;
        };
        let result = self.game.reveal_initial(player, &self.reveal_selection);
        let ok = self.report(result);
        if ok {
            self.reveal_selection.clear();
        }
        ok
    }

    pub fn handle_input(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::ToggleMenu => {
                self.toggle_menu();
                false
            }
            InputAction::ToggleHelp => {
                if self.scene == Scene::Table {
                    self.history_open = false;
                    self.help_open = !self.help_open;
                }
                false
            }
            InputAction::ToggleHistory => {
                if self.scene == Scene::Table {
                    self.help_open = false;
                    if !self.history_open {
                        self.history_offset = 0;
                    }
                    self.history_open = !self.history_open;
                }
                false
            }
            InputAction::HistoryUp => {
                if self.scene == Scene::Table && self.history_open {
                    let max_offset =
                        self.game.round().history_len().saturating_sub(Self::HISTORY_PAGE_SIZE);
                    self.history_offset = (self.history_offset + 1).min(max_offset);
                }
                false
            }
            InputAction::HistoryDown => {
                if self.scene == Scene::Table && self.history_open && self.history_offset > 0 {
                    self.history_offset -= 1;
                }
                false
            }
            InputAction::MenuNext => {
                if self.scene == Scene::Menu {
                    self.menu_next();
                }
                false
            }
            InputAction::MenuPrev => {
                if self.scene == Scene::Menu {
                    self.menu_prev();
                }
                false
            }
            InputAction::MenuInc => {
                if self.scene == Scene::Menu {
                    self.menu_inc();
                }
                false
            }
            InputAction::MenuDec => {
                if self.scene == Scene::Menu {
                    self.menu_dec();
                }
                false
            }
            InputAction::MenuApply => {
                if self.scene == Scene::Menu {
                    return self.apply_menu();
                }
                false
            }
            InputAction::MenuCancel => {
                if self.scene == Scene::Menu {
                    self.cancel_menu();
                }
                false
            }
            InputAction::Advance => self.advance(),
            InputAction::DrawDeck => self.turn_command(Command::DrawDeck),
            InputAction::DrawDiscard => self.turn_command(Command::DrawDiscard),
            InputAction::DiscardDrawn => self.turn_command(Command::DiscardDrawn),
            InputAction::Slot(slot) => self.select_slot(slot),
            InputAction::ConfirmReveal => self.confirm_reveal(),
        }
    }

    /// Periodic housekeeping from the controller loop.
    pub fn tick(&mut self) {
        if let Some(at) = self.action_error_at {
            if at.elapsed() >= Self::ACTION_ERROR_TTL {
                self.clear_action_error();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_action_sets_error_and_keeps_state() {
        let mut app = AppState::new(Some(3)).unwrap();
        app.apply_menu();
        assert!(app.handle_input(InputAction::Advance));
        let phase = app.game.round().phase();
        assert!(!app.handle_input(InputAction::DrawDeck));
        assert!(app.action_error().is_some());
        assert_eq!(app.game.round().phase(), phase);
    }
}
