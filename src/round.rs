//! One round of Golf: deal, initial reveal, the turn protocol and scoring.
//!
//! A [`Round`] owns its deck, discard pile and hands. Every command either
//! applies completely or returns an error and leaves the round untouched.

use crate::cards::Card;
use crate::deck::{Deck, DiscardPile, Shuffler};
use crate::error::{ConfigError, GolfError, InvalidMove};
use crate::hand::{check_slot, Hand, SlotView, COLUMNS, HAND_SIZE};
use tracing::{debug, trace};

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 8;
/// Cards each player turns up before play starts.
pub const REVEAL_COUNT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Phase {
    Setup,
    InitialReveal,
    Playing,
    RoundEnd,
}

/// Where the current player is within their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum TurnStep {
    /// Must draw from the deck or the discard pile.
    AwaitDraw,
    /// Holding a drawn card: replace a slot or discard it.
    Holding,
    /// Discarded the drawn card: must flip a face-down slot.
    MustFlip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum RoundVerb {
    Deal,
    Reveal,
    DrawDeck,
    DrawDiscard,
    Replace,
    Discard,
    Flip,
    ColumnMatch,
    Reshuffle,
    LastRound,
    RoundEnd,
}

impl RoundVerb {
    pub fn label(self) -> &'static str {
        match self {
            RoundVerb::Deal => "Deal",
            RoundVerb::Reveal => "Reveal",
            RoundVerb::DrawDeck => "Draw deck",
            RoundVerb::DrawDiscard => "Take discard",
            RoundVerb::Replace => "Replace",
            RoundVerb::Discard => "Discard",
            RoundVerb::Flip => "Flip",
            RoundVerb::ColumnMatch => "Column match",
            RoundVerb::Reshuffle => "Reshuffle",
            RoundVerb::LastRound => "Last round",
            RoundVerb::RoundEnd => "Round end",
        }
    }
}

/// One applied action. `card` is only set for cards that became public.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct RoundHistoryEntry {
    pub player: usize,
    pub verb: RoundVerb,
    pub card: Option<Card>,
    pub slot: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct Round {
    phase: Phase,
    deck: Deck,
    discard: DiscardPile,
    hands: Vec<Hand>,
    revealed: Vec<bool>,
    current: usize,
    step: TurnStep,
    drawn: Option<Card>,
    /// Player whose completed hand started the final lap.
    last_round: Option<usize>,
    /// Cards removed from hands by column matches.
    matched: Vec<Card>,
    scores: Option<Vec<u32>>,
    history: Vec<RoundHistoryEntry>,
}

impl Round {
    /// A round in [`Phase::Setup`] that will deal from `deck`.
    pub fn new(deck: Deck) -> Self {
        Self {
            phase: Phase::Setup,
            deck,
            discard: DiscardPile::new(),
            hands: Vec::new(),
            revealed: Vec::new(),
            current: 0,
            step: TurnStep::AwaitDraw,
            drawn: None,
            last_round: None,
            matched: Vec::new(),
            scores: None,
            history: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Index of the player to act.
    pub fn current_player(&self) -> usize {
        self.current
    }

    pub fn turn_step(&self) -> TurnStep {
        self.step
    }

    /// Number of dealt players (0 before the deal).
    pub fn player_count(&self) -> usize {
        self.hands.len()
    }

    /// What the table can see of a player's hand.
    pub fn visible_hand(&self, player: usize) -> Option<[SlotView; HAND_SIZE]> {
        self.hands.get(player).map(Hand::view)
    }

    /// Sum of a player's face-up cards.
    pub fn visible_score(&self, player: usize) -> Option<u32> {
        self.hands.get(player).map(Hand::visible_score)
    }

    pub fn discard_top(&self) -> Option<Card> {
        self.discard.top()
    }

    pub fn discard_len(&self) -> usize {
        self.discard.len()
    }

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    /// The card held by the current player between drawing and resolving.
    pub fn drawn_card(&self) -> Option<Card> {
        self.drawn
    }

    pub fn has_revealed(&self, player: usize) -> bool {
        self.revealed.get(player).copied().unwrap_or(false)
    }

    /// First player, in seat order, who still has to make the initial reveal.
    pub fn next_to_reveal(&self) -> Option<usize> {
        if self.phase != Phase::InitialReveal {
            return None;
        }
        self.revealed.iter().position(|r| !r)
    }

    /// The player whose completed hand triggered the final lap.
    pub fn last_round_trigger(&self) -> Option<usize> {
        self.last_round
    }

    /// Cards taken out of play by column matches.
    pub fn removed_cards(&self) -> &[Card] {
        &self.matched
    }

    /// Final per-player scores, available once the round has ended.
    pub fn scores(&self) -> Option<&[u32]> {
        self.scores.as_deref()
    }

    pub fn history_recent(&self, n: usize) -> Vec<RoundHistoryEntry> {
        let start = self.history.len().saturating_sub(n);
        self.history[start..].to_vec()
    }

    pub fn history_recent_offset(&self, n: usize, offset: usize) -> Vec<RoundHistoryEntry> {
        if n == 0 || self.history.is_empty() {
            return Vec::new();
        }
        let len = self.history.len();
        let offset = offset.min(len.saturating_sub(n));
        let end = len - offset;
        let start = end.saturating_sub(n);
        self.history[start..end].to_vec()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Deal six face-down cards to each player and turn one card up to start
    /// the discard pile.
    pub fn deal(&mut self, player_count: usize) -> Result<(), GolfError> {
        self.expect_phase(Phase::Setup)?;
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
            return Err(ConfigError::PlayerCount {
                min: MIN_PLAYERS,
                max: MAX_PLAYERS,
                got: player_count,
            }
            .into());
        }
        if self.deck.len() < player_count * HAND_SIZE + 1 {
            return Err(GolfError::EmptyDeck);
        }

        let mut dealt: Vec<Vec<Card>> = vec![Vec::with_capacity(HAND_SIZE); player_count];
        for _ in 0..HAND_SIZE {
            for cards in dealt.iter_mut() {
                cards.push(self.deck.draw().ok_or(GolfError::EmptyDeck)?);
            }
        }
        let upcard = self.deck.draw().ok_or(GolfError::EmptyDeck)?;
        self.hands = dealt
            .into_iter()
            .map(|cards| {
                <[Card; HAND_SIZE]>::try_from(cards)
                    .map(Hand::face_down)
                    .map_err(|_| GolfError::EmptyDeck)
            })
            .collect::<Result<_, _>>()?;
        self.discard.push(upcard);
        self.revealed = vec![false; player_count];
        self.current = 0;
        self.phase = Phase::InitialReveal;
        self.record(0, RoundVerb::Deal, Some(upcard), None);
        debug!(players = player_count, deck = self.deck.len(), upcard = %upcard, "dealt round");
        Ok(())
    }

    /// Turn up exactly two distinct slots of `player`'s hand. Once every
    /// player has done so, play starts with player 0.
    pub fn reveal_initial(&mut self, player: usize, slots: &[usize]) -> Result<(), GolfError> {
        self.expect_phase(Phase::InitialReveal)?;
        self.check_player(player)?;
        if self.revealed[player] {
            return Err(InvalidMove::AlreadyRevealed(player).into());
        }
        if slots.len() != REVEAL_COUNT {
            return Err(InvalidMove::RevealCount(slots.len()).into());
        }
        for (i, &slot) in slots.iter().enumerate() {
            check_slot(slot)?;
            if slots[..i].contains(&slot) {
                return Err(InvalidMove::DuplicateSlot(slot).into());
            }
            self.hands[player].check_flippable(slot)?;
        }

        for &slot in slots {
            let card = self.hands[player].turn_up(slot)?;
            self.record(player, RoundVerb::Reveal, Some(card), Some(slot));
        }
        self.revealed[player] = true;
        trace!(player, ?slots, "initial reveal");

        if self.revealed.iter().all(|r| *r) {
            self.phase = Phase::Playing;
            self.current = 0;
            self.step = TurnStep::AwaitDraw;
            debug!("all players revealed; play begins");
        }
        Ok(())
    }

    /// Draw the top deck card, reclaiming the discard pile if the deck is empty.
    pub fn draw_from_deck(&mut self, shuffler: &mut dyn Shuffler) -> Result<(), GolfError> {
        self.expect_step(TurnStep::AwaitDraw)?;
        let draw = self.deck.draw_or_reclaim(&mut self.discard, shuffler)?;
        if draw.reclaimed > 0 {
            self.record(self.current, RoundVerb::Reshuffle, None, None);
            debug!(reclaimed = draw.reclaimed, "deck empty; reshuffled discard pile");
        }
        self.drawn = Some(draw.card);
        self.step = TurnStep::Holding;
        self.record(self.current, RoundVerb::DrawDeck, None, None);
        trace!(player = self.current, "draw from deck");
        Ok(())
    }

    /// Take the top card of the discard pile.
    pub fn draw_from_discard(&mut self) -> Result<(), GolfError> {
        self.expect_step(TurnStep::AwaitDraw)?;
        let card = self.discard.take()?;
        self.drawn = Some(card);
        self.step = TurnStep::Holding;
        self.record(self.current, RoundVerb::DrawDiscard, Some(card), None);
        trace!(player = self.current, card = %card, "take discard");
        Ok(())
    }

    /// Put the drawn card face-up into `slot`; the displaced card is discarded.
    /// Ends the turn.
    pub fn replace(&mut self, slot: usize) -> Result<(), GolfError> {
        self.expect_step(TurnStep::Holding)?;
        let Some(card) = self.drawn else {
            return Err(InvalidMove::WrongStep { step: self.step }.into());
        };
        let old = self.hands[self.current].exchange(slot, card)?;
        self.drawn = None;
        self.discard.push(old);
        self.record(self.current, RoundVerb::Replace, Some(card), Some(slot));
        trace!(player = self.current, slot, card = %card, discarded = %old, "replace");
        self.end_turn();
        Ok(())
    }

    /// Discard the drawn card; the player must then [`flip`](Self::flip).
    pub fn discard_drawn(&mut self) -> Result<(), GolfError> {
        self.expect_step(TurnStep::Holding)?;
        if !self.hands[self.current].has_face_down() {
            return Err(InvalidMove::NoFaceDownSlot.into());
        }
        let Some(card) = self.drawn.take() else {
            return Err(InvalidMove::WrongStep { step: self.step }.into());
        };
        self.discard.push(card);
        self.step = TurnStep::MustFlip;
        self.record(self.current, RoundVerb::Discard, Some(card), None);
        trace!(player = self.current, card = %card, "discard drawn card");
        Ok(())
    }

    /// Turn a face-down slot up after discarding. Ends the turn.
    pub fn flip(&mut self, slot: usize) -> Result<(), GolfError> {
        self.expect_step(TurnStep::MustFlip)?;
        let card = self.hands[self.current].turn_up(slot)?;
        self.record(self.current, RoundVerb::Flip, Some(card), Some(slot));
        trace!(player = self.current, slot, card = %card, "flip");
        self.end_turn();
        Ok(())
    }

    fn end_turn(&mut self) {
        let player = self.current;
        for (col, pair) in self.hands[player].resolve_columns() {
            self.matched.extend(pair);
            self.record(player, RoundVerb::ColumnMatch, Some(pair[0]), Some(COLUMNS[col].0));
            debug!(player, column = col, rank = %pair[0].rank(), "column match");
        }

        if self.last_round.is_none() && self.hands[player].is_complete() {
            self.last_round = Some(player);
            self.record(player, RoundVerb::LastRound, None, None);
            debug!(player, "hand complete; final lap begins");
        }

        self.current = (player + 1) % self.hands.len();
        self.step = TurnStep::AwaitDraw;

        if self.last_round == Some(self.current) {
            self.finish();
        }
    }

    fn finish(&mut self) {
        for hand in &mut self.hands {
            hand.reveal_all();
        }
        let scores: Vec<u32> = self.hands.iter().map(Hand::score).collect();
        self.phase = Phase::RoundEnd;
        self.record(self.current, RoundVerb::RoundEnd, None, None);
        debug!(?scores, "round over");
        self.scores = Some(scores);
    }

    fn record(&mut self, player: usize, verb: RoundVerb, card: Option<Card>, slot: Option<usize>) {
        self.history.push(RoundHistoryEntry { player, verb, card, slot });
    }

    fn expect_phase(&self, expected: Phase) -> Result<(), InvalidMove> {
        if self.phase != expected {
            return Err(InvalidMove::WrongPhase { expected, actual: self.phase });
        }
        Ok(())
    }

    fn expect_step(&self, step: TurnStep) -> Result<(), InvalidMove> {
        self.expect_phase(Phase::Playing)?;
        if self.step != step {
            return Err(InvalidMove::WrongStep { step: self.step });
        }
        Ok(())
    }

    fn check_player(&self, player: usize) -> Result<(), InvalidMove> {
        if player >= self.hands.len() {
            return Err(InvalidMove::UnknownPlayer(player));
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn hand(&self, player: usize) -> &Hand {
        &self.hands[player]
    }

    /// Every card the round currently holds, wherever it is.
    #[cfg(test)]
    pub(crate) fn census(&self) -> Vec<Card> {
        let mut all: Vec<Card> = self.deck.cards().to_vec();
        all.extend_from_slice(self.discard.as_slice());
        all.extend(self.hands.iter().flat_map(|h| h.slots().iter().filter_map(|s| s.card())));
        all.extend(self.drawn);
        all.extend_from_slice(&self.matched);
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use crate::deck::{NoShuffle, RngShuffler};
    use crate::hand::Slot;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn assert_closed_world(r: &Round) {
        let all = r.census();
        assert_eq!(all.len(), 52);
        let set: HashSet<Card> = all.into_iter().collect();
        assert_eq!(set.len(), 52);
    }

    fn dealt(players: usize, seed: u64) -> Round {
        let mut r = Round::new(Deck::shuffled(&mut RngShuffler::seeded(seed)).unwrap());
        r.deal(players).unwrap();
        r
    }

    fn playing(players: usize, seed: u64) -> Round {
        let mut r = dealt(players, seed);
        for p in 0..players {
            r.reveal_initial(p, &[0, 1]).unwrap();
        }
        r
    }

    #[test]
    fn deal_leaves_remaining_cards_in_deck() {
        for players in MIN_PLAYERS..=MAX_PLAYERS {
            let r = dealt(players, 1);
            assert_eq!(r.deck_len(), 52 - (6 * players + 1));
            assert_eq!(r.discard_len(), 1);
            assert_eq!(r.phase(), Phase::InitialReveal);
            assert!(r.hands.iter().all(|h| h.face_up_count() == 0));
            assert_closed_world(&r);
        }
    }

    #[test]
    fn deal_rejects_bad_player_counts() {
        for n in [0, 1, 9] {
            let mut r = Round::new(Deck::standard());
            let err = r.deal(n).unwrap_err();
            assert!(matches!(err, GolfError::Configuration(ConfigError::PlayerCount { .. })));
            assert_eq!(r.phase(), Phase::Setup);
            assert_eq!(r.deck_len(), 52);
        }
    }

    #[test]
    fn deal_is_round_robin() {
        let top = parse_cards("Ac 2c 3c 4c 5c 6c 7c 8c 9c Tc Jc Qc Kc").unwrap();
        let mut r = Round::new(Deck::with_top(&top).unwrap());
        r.deal(2).unwrap();
        assert_eq!(r.hand(0).slot(0), Some(Slot::FaceDown(top[0])));
        assert_eq!(r.hand(1).slot(0), Some(Slot::FaceDown(top[1])));
        assert_eq!(r.hand(0).slot(5), Some(Slot::FaceDown(top[10])));
        assert_eq!(r.hand(1).slot(5), Some(Slot::FaceDown(top[11])));
        assert_eq!(r.discard_top(), Some(top[12]));
    }

    #[test]
    fn reveal_validation_is_atomic() {
        let mut r = dealt(3, 2);
        assert_eq!(
            r.reveal_initial(0, &[1]),
            Err(GolfError::InvalidMove(InvalidMove::RevealCount(1)))
        );
        assert_eq!(
            r.reveal_initial(0, &[1, 2, 3]),
            Err(GolfError::InvalidMove(InvalidMove::RevealCount(3)))
        );
        assert_eq!(
            r.reveal_initial(0, &[4, 4]),
            Err(GolfError::InvalidMove(InvalidMove::DuplicateSlot(4)))
        );
        assert_eq!(
            r.reveal_initial(0, &[2, 6]),
            Err(GolfError::InvalidMove(InvalidMove::SlotOutOfRange(6)))
        );
        assert_eq!(
            r.reveal_initial(3, &[0, 1]),
            Err(GolfError::InvalidMove(InvalidMove::UnknownPlayer(3)))
        );
        assert_eq!(r.hand(0).face_up_count(), 0, "rejected reveals must not flip anything");

        r.reveal_initial(2, &[0, 5]).unwrap();
        assert_eq!(
            r.reveal_initial(2, &[1, 2]),
            Err(GolfError::InvalidMove(InvalidMove::AlreadyRevealed(2)))
        );
        assert_eq!(r.next_to_reveal(), Some(0));
        r.reveal_initial(0, &[3, 4]).unwrap();
        assert_eq!(r.phase(), Phase::InitialReveal);
        r.reveal_initial(1, &[1, 2]).unwrap();
        assert_eq!(r.phase(), Phase::Playing);
        assert_eq!(r.current_player(), 0);
        assert_eq!(r.next_to_reveal(), None);
    }

    #[test]
    fn commands_outside_playing_are_rejected() {
        let mut r = Round::new(Deck::standard());
        let wrong = |actual| -> Result<(), GolfError> {
            Err(GolfError::InvalidMove(InvalidMove::WrongPhase { expected: Phase::Playing, actual }))
        };
        assert_eq!(r.draw_from_deck(&mut NoShuffle), wrong(Phase::Setup));
        assert_eq!(r.reveal_initial(0, &[0, 1]).unwrap_err(), GolfError::InvalidMove(
            InvalidMove::WrongPhase { expected: Phase::InitialReveal, actual: Phase::Setup }
        ));
        r.deal(2).unwrap();
        assert_eq!(r.draw_from_discard(), wrong(Phase::InitialReveal));
        assert_eq!(r.flip(0), wrong(Phase::InitialReveal));
        assert_eq!(r.deal(2).unwrap_err(), GolfError::InvalidMove(InvalidMove::WrongPhase {
            expected: Phase::Setup,
            actual: Phase::InitialReveal
        }));
    }

    #[test]
    fn turn_protocol_rejections_leave_state_unchanged() {
        let mut r = playing(2, 3);
        let before = format!("{r:?}");
        assert!(r.replace(2).is_err(), "replace before draw");
        assert!(r.discard_drawn().is_err(), "discard before draw");
        assert!(r.flip(2).is_err(), "flip before draw");
        assert_eq!(format!("{r:?}"), before);

        r.draw_from_deck(&mut NoShuffle).unwrap();
        let held = format!("{r:?}");
        assert!(matches!(
            r.draw_from_deck(&mut NoShuffle),
            Err(GolfError::InvalidMove(InvalidMove::WrongStep { step: TurnStep::Holding }))
        ));
        assert!(r.draw_from_discard().is_err());
        assert_eq!(r.replace(6), Err(GolfError::InvalidMove(InvalidMove::SlotOutOfRange(6))));
        assert!(r.flip(3).is_err(), "flip before discarding");
        assert_eq!(format!("{r:?}"), held);

        r.discard_drawn().unwrap();
        assert_eq!(r.turn_step(), TurnStep::MustFlip);
        let must_flip = format!("{r:?}");
        assert_eq!(r.flip(0), Err(GolfError::InvalidMove(InvalidMove::SlotFaceUp(0))));
        assert!(r.replace(3).is_err());
        assert!(r.draw_from_deck(&mut NoShuffle).is_err());
        assert_eq!(format!("{r:?}"), must_flip);

        r.flip(3).unwrap();
        assert_eq!(r.current_player(), 1);
        assert_eq!(r.turn_step(), TurnStep::AwaitDraw);
        assert_closed_world(&r);
    }

    #[test]
    fn replace_discards_displaced_card_face_up() {
        let mut r = playing(2, 4);
        let top = r.discard_top().unwrap();
        // slot 5 sits under a face-down card, so no column match can fire
        let hidden = r.hand(0).slot(5).and_then(Slot::card).unwrap();
        r.draw_from_discard().unwrap();
        assert_eq!(r.drawn_card(), Some(top));
        r.replace(5).unwrap();
        assert_eq!(r.hand(0).slot(5), Some(Slot::FaceUp(top)));
        assert_eq!(r.discard_top(), Some(hidden));
        assert_eq!(r.drawn_card(), None);
        assert_closed_world(&r);
    }

    #[test]
    fn last_round_flags_once_and_ends_on_return() {
        let mut r = playing(3, 5);
        // player 0 flips everything over four turns, the others replace slot 0
        let mut turns = 0;
        while r.phase() == Phase::Playing {
            let p = r.current_player();
            r.draw_from_deck(&mut NoShuffle).unwrap();
            if p == 0 {
                r.discard_drawn().unwrap();
                let slot = r.hand(0).slots().iter().position(|s| s.is_face_down()).unwrap();
                r.flip(slot).unwrap();
            } else {
                r.replace(0).unwrap();
            }
            turns += 1;
            if r.last_round_trigger().is_some() && r.phase() == Phase::Playing {
                assert_eq!(r.last_round_trigger(), Some(0));
            }
            assert_closed_world(&r);
        }
        // player 0 completes on turn 10, then players 1 and 2 get one more turn
        assert_eq!(turns, 12);
        assert_eq!(r.last_round_trigger(), Some(0));
        let flags =
            r.history_recent(r.history_len()).iter().filter(|e| e.verb == RoundVerb::LastRound).count();
        assert_eq!(flags, 1);
        let scores = r.scores().unwrap().to_vec();
        for (p, score) in scores.iter().enumerate() {
            assert!(r.hand(p).is_complete());
            assert_eq!(*score, r.hand(p).score());
        }
        assert_eq!(r.draw_from_deck(&mut NoShuffle).unwrap_err(), GolfError::InvalidMove(
            InvalidMove::WrongPhase { expected: Phase::Playing, actual: Phase::RoundEnd }
        ));
    }

    #[test]
    fn discard_drawn_needs_a_face_down_slot() {
        let mut r = playing(2, 6);
        r.hands[0].reveal_all();
        r.draw_from_deck(&mut NoShuffle).unwrap();
        assert_eq!(r.discard_drawn(), Err(GolfError::InvalidMove(InvalidMove::NoFaceDownSlot)));
        assert_eq!(r.turn_step(), TurnStep::Holding);
    }

    #[test]
    fn history_pages_from_the_end() {
        let r = playing(2, 7);
        // deal + 2 reveals per player
        assert_eq!(r.history_len(), 5);
        assert_eq!(r.history_recent(1)[0].verb, RoundVerb::Reveal);
        assert_eq!(r.history_recent_offset(2, 10)[0].verb, RoundVerb::Deal);
        assert!(r.history_recent_offset(0, 0).is_empty());
    }

    proptest! {
        #[test]
        fn random_play_keeps_52_cards_and_empty_slots_stay_empty(
            seed in any::<u64>(),
            players in MIN_PLAYERS..=MAX_PLAYERS,
            choices in proptest::collection::vec(any::<u8>(), 1..400),
        ) {
            let mut shuffler = RngShuffler::seeded(seed);
            let mut r = Round::new(Deck::shuffled(&mut shuffler).unwrap());
            r.deal(players).unwrap();
            for p in 0..players {
                r.reveal_initial(p, &[0, 4]).unwrap();
            }
            let mut emptied: HashSet<(usize, usize)> = HashSet::new();
            for c in choices {
                if r.phase() != Phase::Playing {
                    break;
                }
                let p = r.current_player();
                let c = c as usize;
                match r.turn_step() {
                    TurnStep::AwaitDraw => {
                        if c % 2 == 0 {
                            r.draw_from_deck(&mut shuffler).unwrap();
                        } else {
                            r.draw_from_discard().unwrap();
                        }
                    }
                    TurnStep::Holding => {
                        let slot = c % HAND_SIZE;
                        let slot_empty = r.hand(p).slot(slot).map(Slot::is_empty).unwrap_or(true);
                        if c % 3 == 0 && r.hand(p).has_face_down() {
                            r.discard_drawn().unwrap();
                        } else if slot_empty {
                            prop_assert!(r.replace(slot).is_err());
                            let any = r.hand(p).slots().iter().position(|s| !s.is_empty()).unwrap();
                            r.replace(any).unwrap();
                        } else {
                            r.replace(slot).unwrap();
                        }
                    }
                    TurnStep::MustFlip => {
                        let downs: Vec<usize> = (0..HAND_SIZE)
                            .filter(|&i| r.hand(p).slot(i).map(Slot::is_face_down).unwrap_or(false))
                            .collect();
                        r.flip(downs[c % downs.len()]).unwrap();
                    }
                }
                for (pi, h) in r.hands.iter().enumerate() {
                    for (si, s) in h.slots().iter().enumerate() {
                        if s.is_empty() {
                            emptied.insert((pi, si));
                        }
                    }
                }
                for &(pi, si) in &emptied {
                    prop_assert!(r.hand(pi).slot(si).map(Slot::is_empty).unwrap_or(false));
                }
                let all = r.census();
                prop_assert_eq!(all.len(), 52);
                prop_assert_eq!(all.into_iter().collect::<HashSet<_>>().len(), 52);
            }
        }
    }
}
