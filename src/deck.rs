use crate::cards::{Card, Rank, Suit};
use crate::error::{ConfigError, GolfError};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

pub const DECK_SIZE: usize = 52;

/// Source of uniformly random permutations used for every shuffle.
///
/// Implementations must return a permutation of `0..len`; anything else is
/// rejected with [`ConfigError::NotAPermutation`].
pub trait Shuffler {
    fn permutation(&mut self, len: usize) -> Vec<usize>;
}

/// A [`Shuffler`] backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngShuffler<R> {
    rng: R,
}

impl<R: Rng> RngShuffler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngShuffler<ChaCha8Rng> {
    /// Reproducible shuffles: the same seed always yields the same decks.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Seeded from the thread-local RNG.
    pub fn from_thread_rng() -> Self {
        let seed: u64 = rand::rng().random();
        Self::seeded(seed)
    }
}

impl<R: Rng> Shuffler for RngShuffler<R> {
    fn permutation(&mut self, len: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..len).collect();
        order.shuffle(&mut self.rng);
        order
    }
}

/// Identity permutation; keeps stacked decks in the order they were built.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoShuffle;

impl Shuffler for NoShuffle {
    fn permutation(&mut self, len: usize) -> Vec<usize> {
        (0..len).collect()
    }
}

/// Reorder `cards` by `perm`, rejecting anything that is not a permutation.
fn permute(cards: &[Card], perm: &[usize]) -> Result<Vec<Card>, ConfigError> {
    let len = cards.len();
    if perm.len() != len {
        return Err(ConfigError::NotAPermutation { len });
    }
    let mut seen = vec![false; len];
    for &i in perm {
        if i >= len || seen[i] {
            return Err(ConfigError::NotAPermutation { len });
        }
        seen[i] = true;
    }
    Ok(perm.iter().map(|&i| cards[i]).collect())
}

/// The draw pile. The last element of `cards` is the top.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

/// Result of [`Deck::draw_or_reclaim`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckDraw {
    pub card: Card,
    /// Number of discards shuffled back into the deck before drawing (0 if none).
    pub reclaimed: usize,
}

impl Deck {
    /// ```
    /// use golf_rs::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.len(), 52);
    /// ```
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for s in Suit::ALL {
            for r in Rank::ALL {
                cards.push(Card::new(r, s));
            }
        }
        Self { cards }
    }

    /// A standard deck reordered by the shuffler.
    pub fn shuffled(shuffler: &mut dyn Shuffler) -> Result<Self, GolfError> {
        let base = Self::standard();
        let perm = shuffler.permutation(base.cards.len());
        let cards = permute(&base.cards, &perm)?;
        Ok(Self { cards })
    }

    /// Build a deck from a full 52-card ordering, first element on top.
    pub fn from_top(top_first: Vec<Card>) -> Result<Self, GolfError> {
        if top_first.len() != DECK_SIZE {
            return Err(ConfigError::DeckSize { expected: DECK_SIZE, got: top_first.len() }.into());
        }
        let mut seen = HashSet::with_capacity(DECK_SIZE);
        for &c in &top_first {
            if !seen.insert(c) {
                return Err(ConfigError::DuplicateCard(c).into());
            }
        }
        let mut cards = top_first;
        cards.reverse();
        Ok(Self { cards })
    }

    /// Stack `prefix` on top (first element drawn first); the rest of the
    /// deck follows in standard order.
    ///
    /// ```
    /// use golf_rs::cards::{Card, Rank, Suit};
    /// use golf_rs::deck::Deck;
    ///
    /// let ks = Card::new(Rank::King, Suit::Spades);
    /// let mut deck = Deck::with_top(&[ks]).unwrap();
    /// assert_eq!(deck.draw(), Some(ks));
    /// assert_eq!(deck.len(), 51);
    /// ```
    pub fn with_top(prefix: &[Card]) -> Result<Self, GolfError> {
        let mut seen = HashSet::with_capacity(prefix.len());
        for &c in prefix {
            if !seen.insert(c) {
                return Err(ConfigError::DuplicateCard(c).into());
            }
        }
        let mut order = prefix.to_vec();
        order.extend(Self::standard().cards.into_iter().filter(|c| !seen.contains(c)));
        Self::from_top(order)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Draw one card from the top of the deck.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Draw the top card, first refilling an empty deck from the discard pile.
    ///
    /// The discard top stays behind as the new one-card discard pile; the rest
    /// is shuffled and becomes the deck. Fails with [`GolfError::EmptyDeck`]
    /// when nothing can be reclaimed. Deck and pile are untouched on error.
    pub fn draw_or_reclaim(
        &mut self,
        discard: &mut DiscardPile,
        shuffler: &mut dyn Shuffler,
    ) -> Result<DeckDraw, GolfError> {
        if let Some(card) = self.draw() {
            return Ok(DeckDraw { card, reclaimed: 0 });
        }
        let pool_len = discard.len().saturating_sub(1);
        if pool_len == 0 {
            return Err(GolfError::EmptyDeck);
        }
        let perm = shuffler.permutation(pool_len);
        let reclaimed = permute(&discard.cards[..pool_len], &perm)?;
        discard.cards.drain(..pool_len);
        self.cards = reclaimed;
        match self.cards.pop() {
            Some(card) => Ok(DeckDraw { card, reclaimed: pool_len }),
            None => Err(GolfError::EmptyDeck),
        }
    }

    pub(crate) fn cards(&self) -> &[Card] {
        &self.cards
    }
}

/// The face-up discard pile. The last element is the top.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscardPile {
    cards: Vec<Card>,
}

impl DiscardPile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn top(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Take the top card.
    pub fn take(&mut self) -> Result<Card, GolfError> {
        self.cards.pop().ok_or(GolfError::EmptyDiscard)
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }
}
