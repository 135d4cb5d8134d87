//! golf-rs: the six-card Golf card game
//!
//! Goals:
//! - Rules engine that validates every move and never panics on bad input
//! - Deterministic play from an injectable shuffler, for tests and replays
//! - Small public API: a [`game::Match`] drives [`round::Round`]s of Golf
//!
//! ## Quick start: play one move
//! ```
//! use golf_rs::deck::RngShuffler;
//! use golf_rs::game::{Match, MatchConfig};
//! use golf_rs::round::{Phase, TurnStep};
//!
//! let mut game = Match::start(MatchConfig::new(2, 9), RngShuffler::seeded(42)).unwrap();
//! game.deal().unwrap();
//! game.reveal_initial(0, &[0, 1]).unwrap();
//! game.reveal_initial(1, &[0, 1]).unwrap();
//! assert_eq!(game.round().phase(), Phase::Playing);
//!
//! game.draw_from_deck().unwrap();
//! assert_eq!(game.round().turn_step(), TurnStep::Holding);
//! game.replace(2).unwrap();
//! assert_eq!(game.round().current_player(), 1);
//! ```
//!
//! ## TUI
//! Run the hot-seat terminal game with:
//! ```sh
//! cargo run --bin golf-rs
//! ```

pub mod cards;
pub mod deck;
pub mod engine;
pub mod error;
pub mod game;
pub mod hand;
pub mod round;
pub mod tui;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
