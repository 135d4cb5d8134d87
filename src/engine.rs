// Engine API boundary. Front ends (the TUI, test scripts, replays) drive a
// match through this trait without depending on the concrete `Match` type.
// `Command` turns each operation into data so drivers can queue or parse them.

use crate::cards::Card;
use crate::deck::Shuffler;
use crate::error::{GolfError, InvalidMove};
use crate::game::{Match, Standing};
use crate::hand::{SlotView, HAND_SIZE};
use crate::round::{Phase, TurnStep};
use std::fmt;
use std::str::FromStr;

pub trait GolfEngine {
    // Round lifecycle
    fn deal(&mut self) -> Result<(), GolfError>;
    fn advance_round(&mut self) -> Result<(), GolfError>;

    // Player actions
    fn reveal_initial(&mut self, player: usize, slots: &[usize]) -> Result<(), GolfError>;
    fn draw_from_deck(&mut self) -> Result<(), GolfError>;
    fn draw_from_discard(&mut self) -> Result<(), GolfError>;
    fn replace(&mut self, slot: usize) -> Result<(), GolfError>;
    fn discard_drawn(&mut self) -> Result<(), GolfError>;
    fn flip(&mut self, slot: usize) -> Result<(), GolfError>;

    // Queries
    fn phase(&self) -> Phase;
    fn turn_step(&self) -> TurnStep;
    fn current_player(&self) -> usize;
    fn num_players(&self) -> usize;
    fn visible_hand(&self, player: usize) -> Option<[SlotView; HAND_SIZE]>;
    fn discard_top(&self) -> Option<Card>;
    fn deck_len(&self) -> usize;
    fn drawn_card(&self) -> Option<Card>;
    fn totals(&self) -> &[u32];
    fn round_number(&self) -> usize;
    fn is_over(&self) -> bool;
    fn standings(&self) -> Option<Vec<Standing>>;
}

impl<S: Shuffler> GolfEngine for Match<S> {
    fn deal(&mut self) -> Result<(), GolfError> {
        self.deal()
    }
    fn advance_round(&mut self) -> Result<(), GolfError> {
        self.advance_round()
    }

    fn reveal_initial(&mut self, player: usize, slots: &[usize]) -> Result<(), GolfError> {
        self.reveal_initial(player, slots)
    }
    fn draw_from_deck(&mut self) -> Result<(), GolfError> {
        self.draw_from_deck()
    }
    fn draw_from_discard(&mut self) -> Result<(), GolfError> {
        self.draw_from_discard()
    }
    fn replace(&mut self, slot: usize) -> Result<(), GolfError> {
        self.replace(slot)
    }
    fn discard_drawn(&mut self) -> Result<(), GolfError> {
        self.discard_drawn()
    }
    fn flip(&mut self, slot: usize) -> Result<(), GolfError> {
        self.flip(slot)
    }

    fn phase(&self) -> Phase {
        self.round().phase()
    }
    fn turn_step(&self) -> TurnStep {
        self.round().turn_step()
    }
    fn current_player(&self) -> usize {
        self.round().current_player()
    }
    fn num_players(&self) -> usize {
        self.config().players
    }
    fn visible_hand(&self, player: usize) -> Option<[SlotView; HAND_SIZE]> {
        self.round().visible_hand(player)
    }
    fn discard_top(&self) -> Option<Card> {
        self.round().discard_top()
    }
    fn deck_len(&self) -> usize {
        self.round().deck_len()
    }
    fn drawn_card(&self) -> Option<Card> {
        self.round().drawn_card()
    }
    fn totals(&self) -> &[u32] {
        self.totals()
    }
    fn round_number(&self) -> usize {
        self.round_number()
    }
    fn is_over(&self) -> bool {
        self.is_over()
    }
    fn standings(&self) -> Option<Vec<Standing>> {
        self.standings()
    }
}

/// One engine operation as data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Command {
    Deal,
    Reveal([usize; 2]),
    DrawDeck,
    DrawDiscard,
    Replace(usize),
    DiscardDrawn,
    Flip(usize),
    NextRound,
}

impl Command {
    /// Whether the command belongs to the player whose turn it is, as opposed
    /// to table actions (dealing, advancing) or the initial reveal.
    pub fn is_turn_action(self) -> bool {
        matches!(
            self,
            Command::DrawDeck
                | Command::DrawDiscard
                | Command::Replace(_)
                | Command::DiscardDrawn
                | Command::Flip(_)
        )
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Deal => write!(f, "deal"),
            Command::Reveal([a, b]) => write!(f, "reveal {a} {b}"),
            Command::DrawDeck => write!(f, "draw"),
            Command::DrawDiscard => write!(f, "take"),
            Command::Replace(s) => write!(f, "replace {s}"),
            Command::DiscardDrawn => write!(f, "discard"),
            Command::Flip(s) => write!(f, "flip {s}"),
            Command::NextRound => write!(f, "next"),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CommandParseError {
    #[error("unknown command: '{0}'")]
    Unknown(String),
    #[error("'{verb}' expects {expected} slot argument(s)")]
    Arity { verb: String, expected: usize },
    #[error("invalid slot: '{0}'")]
    Slot(String),
}

impl FromStr for Command {
    type Err = CommandParseError;

    /// Parse the textual form produced by `Display`, e.g. `"replace 3"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let verb = parts.next().unwrap_or_default().to_ascii_lowercase();
        let args = parts
            .map(|p| p.parse::<usize>().map_err(|_| CommandParseError::Slot(p.to_string())))
            .collect::<Result<Vec<_>, _>>()?;
        let arity = |expected: usize| -> Result<(), CommandParseError> {
            if args.len() == expected {
                Ok(())
            } else {
                Err(CommandParseError::Arity { verb: verb.clone(), expected })
            }
        };
        let cmd = match verb.as_str() {
            "deal" => arity(0).map(|_| Command::Deal)?,
            "reveal" => arity(2).map(|_| Command::Reveal([args[0], args[1]]))?,
            "draw" => arity(0).map(|_| Command::DrawDeck)?,
            "take" => arity(0).map(|_| Command::DrawDiscard)?,
            "replace" => arity(1).map(|_| Command::Replace(args[0]))?,
            "discard" => arity(0).map(|_| Command::DiscardDrawn)?,
            "flip" => arity(1).map(|_| Command::Flip(args[0]))?,
            "next" => arity(0).map(|_| Command::NextRound)?,
            _ => return Err(CommandParseError::Unknown(s.trim().to_string())),
        };
        Ok(cmd)
    }
}

/// Apply `command` on behalf of `player`.
///
/// Turn actions are refused unless `player` is the one to act; the reveal
/// applies to `player`'s own hand. Table actions ignore `player`.
///
/// ```
/// use golf_rs::deck::RngShuffler;
/// use golf_rs::engine::{apply, Command, GolfEngine};
/// use golf_rs::error::{GolfError, InvalidMove};
/// use golf_rs::game::{Match, MatchConfig};
///
/// let mut game = Match::start(MatchConfig::default(), RngShuffler::seeded(1)).unwrap();
/// apply(&mut game, 0, Command::Deal).unwrap();
/// apply(&mut game, 0, Command::Reveal([0, 3])).unwrap();
/// apply(&mut game, 1, Command::Reveal([1, 4])).unwrap();
/// assert_eq!(
///     apply(&mut game, 1, Command::DrawDeck),
///     Err(GolfError::InvalidMove(InvalidMove::NotYourTurn { expected: 0, actual: 1 }))
/// );
/// apply(&mut game, 0, Command::DrawDeck).unwrap();
/// assert!(GolfEngine::drawn_card(&game).is_some());
/// ```
pub fn apply(
    engine: &mut dyn GolfEngine,
    player: usize,
    command: Command,
) -> Result<(), GolfError> {
    let seated = command.is_turn_action() || matches!(command, Command::Reveal(_));
    if seated && player >= engine.num_players() {
        return Err(InvalidMove::UnknownPlayer(player).into());
    }
    if command.is_turn_action() && engine.phase() == Phase::Playing {
        let expected = engine.current_player();
        if player != expected {
            return Err(InvalidMove::NotYourTurn { expected, actual: player }.into());
        }
    }
    match command {
        Command::Deal => engine.deal(),
        Command::Reveal(slots) => engine.reveal_initial(player, &slots),
        Command::DrawDeck => engine.draw_from_deck(),
        Command::DrawDiscard => engine.draw_from_discard(),
        Command::Replace(slot) => engine.replace(slot),
        Command::DiscardDrawn => engine.discard_drawn(),
        Command::Flip(slot) => engine.flip(slot),
        Command::NextRound => engine.advance_round(),
    }
}
