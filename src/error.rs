//! Error types shared by the deck, round and match layers.
//!
//! Every rejected command returns one of these and leaves the engine exactly
//! as it was before the call.

use crate::cards::Card;
use crate::round::{Phase, TurnStep};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GolfError {
    #[error("invalid move: {0}")]
    InvalidMove(#[from] InvalidMove),
    #[error("deck and discard pile are both exhausted")]
    EmptyDeck,
    #[error("discard pile is empty")]
    EmptyDiscard,
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),
}

/// Ways a caller can break the turn protocol.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidMove {
    #[error("not allowed during {actual:?} (expected {expected:?})")]
    WrongPhase { expected: Phase, actual: Phase },
    #[error("not allowed at this point of the turn ({step:?})")]
    WrongStep { step: TurnStep },
    #[error("it is player {expected}'s turn, not player {actual}'s")]
    NotYourTurn { expected: usize, actual: usize },
    #[error("no such player: {0}")]
    UnknownPlayer(usize),
    #[error("slot {0} is out of range")]
    SlotOutOfRange(usize),
    #[error("slot {0} was given more than once")]
    DuplicateSlot(usize),
    #[error("exactly two slots must be revealed, got {0}")]
    RevealCount(usize),
    #[error("player {0} has already revealed")]
    AlreadyRevealed(usize),
    #[error("slot {0} is empty")]
    SlotEmpty(usize),
    #[error("slot {0} is already face-up")]
    SlotFaceUp(usize),
    #[error("no face-down card left to flip")]
    NoFaceDownSlot,
    #[error("the round is not over")]
    RoundNotOver,
    #[error("the match is over")]
    MatchOver,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("player count must be between {min} and {max}, got {got}")]
    PlayerCount { min: usize, max: usize, got: usize },
    #[error("round count must be at least 1, got {0}")]
    RoundCount(usize),
    #[error("shuffle result is not a permutation of {len} cards")]
    NotAPermutation { len: usize },
    #[error("a deck needs {expected} cards, got {got}")]
    DeckSize { expected: usize, got: usize },
    #[error("duplicate card in deck: {0}")]
    DuplicateCard(Card),
}
