//! Match controller: a fixed number of rounds and the running score ledger.

use crate::cards::Card;
use crate::deck::{Deck, RngShuffler, Shuffler};
use crate::error::{ConfigError, GolfError, InvalidMove};
use crate::round::{Phase, Round, MAX_PLAYERS, MIN_PLAYERS};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

pub const DEFAULT_ROUNDS: usize = 9;

/// Table size and match length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    pub players: usize,
    pub rounds: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self { players: 2, rounds: DEFAULT_ROUNDS }
    }
}

impl MatchConfig {
    pub fn new(players: usize, rounds: usize) -> Self {
        Self { players, rounds }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.players) {
            return Err(ConfigError::PlayerCount {
                min: MIN_PLAYERS,
                max: MAX_PLAYERS,
                got: self.players,
            });
        }
        if self.rounds == 0 {
            return Err(ConfigError::RoundCount(self.rounds));
        }
        Ok(())
    }
}

/// Scores of one completed round, indexed by player.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct RoundRecord {
    pub round: usize,
    pub scores: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct Standing {
    pub player: usize,
    pub total: u32,
}

/// A match of Golf. Lowest total after the last round wins.
///
/// ```
/// use golf_rs::deck::RngShuffler;
/// use golf_rs::game::{Match, MatchConfig};
/// use golf_rs::round::Phase;
///
/// let mut game = Match::start(MatchConfig::new(3, 9), RngShuffler::seeded(7)).unwrap();
/// assert_eq!(game.round_number(), 1);
/// game.deal().unwrap();
/// assert_eq!(game.round().phase(), Phase::InitialReveal);
/// assert_eq!(game.totals(), &[0, 0, 0]);
/// ```
#[derive(Debug)]
pub struct Match<S = RngShuffler<ChaCha8Rng>> {
    config: MatchConfig,
    shuffler: S,
    round: Round,
    round_number: usize,
    totals: Vec<u32>,
    records: Vec<RoundRecord>,
    over: bool,
}

impl<S: Shuffler> Match<S> {
    /// Validate `config` and set up round 1 in [`Phase::Setup`].
    pub fn start(config: MatchConfig, mut shuffler: S) -> Result<Self, GolfError> {
        config.validate()?;
        let round = Round::new(Deck::shuffled(&mut shuffler)?);
        debug!(players = config.players, rounds = config.rounds, "match started");
        Ok(Self {
            config,
            shuffler,
            round,
            round_number: 1,
            totals: vec![0; config.players],
            records: Vec::new(),
            over: false,
        })
    }

    pub fn config(&self) -> MatchConfig {
        self.config
    }

    /// The round in progress (or the final round once the match is over).
    pub fn round(&self) -> &Round {
        &self.round
    }

    /// 1-based number of the current round.
    pub fn round_number(&self) -> usize {
        self.round_number
    }

    /// Running totals, not including the current round until it is advanced.
    pub fn totals(&self) -> &[u32] {
        &self.totals
    }

    pub fn records(&self) -> &[RoundRecord] {
        &self.records
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Players ranked by ascending total; ties keep seat order.
    /// `None` until the match is over.
    pub fn standings(&self) -> Option<Vec<Standing>> {
        if !self.over {
            return None;
        }
        let mut out: Vec<Standing> = self
            .totals
            .iter()
            .enumerate()
            .map(|(player, &total)| Standing { player, total })
            .collect();
        out.sort_by_key(|s| s.total);
        Some(out)
    }

    pub fn deal(&mut self) -> Result<(), GolfError> {
        self.round.deal(self.config.players)
    }

    pub fn reveal_initial(&mut self, player: usize, slots: &[usize]) -> Result<(), GolfError> {
        self.round.reveal_initial(player, slots)
    }

    pub fn draw_from_deck(&mut self) -> Result<(), GolfError> {
        self.round.draw_from_deck(&mut self.shuffler)
    }

    pub fn draw_from_discard(&mut self) -> Result<(), GolfError> {
        self.round.draw_from_discard()
    }

    pub fn replace(&mut self, slot: usize) -> Result<(), GolfError> {
        self.round.replace(slot)
    }

    pub fn discard_drawn(&mut self) -> Result<(), GolfError> {
        self.round.discard_drawn()
    }

    pub fn flip(&mut self, slot: usize) -> Result<(), GolfError> {
        self.round.flip(slot)
    }

    pub fn discard_top(&self) -> Option<Card> {
        self.round.discard_top()
    }

    /// Bank the finished round's scores and move on: either a fresh round in
    /// [`Phase::Setup`] or, after the last round, the end of the match.
    pub fn advance_round(&mut self) -> Result<(), GolfError> {
        if self.over {
            return Err(InvalidMove::MatchOver.into());
        }
        if self.round.phase() != Phase::RoundEnd {
            return Err(InvalidMove::RoundNotOver.into());
        }
        let scores = self.round.scores().map(<[u32]>::to_vec).ok_or(InvalidMove::RoundNotOver)?;
        let next = if self.round_number < self.config.rounds {
            Some(Round::new(Deck::shuffled(&mut self.shuffler)?))
        } else {
            None
        };

        for (total, score) in self.totals.iter_mut().zip(&scores) {
            *total += score;
        }
        debug!(round = self.round_number, ?scores, totals = ?self.totals, "round banked");
        self.records.push(RoundRecord { round: self.round_number, scores });

        match next {
            Some(round) => {
                self.round = round;
                self.round_number += 1;
            }
            None => {
                self.over = true;
                info!(totals = ?self.totals, "match over");
            }
        }
        Ok(())
    }
}
