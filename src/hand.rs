use crate::cards::Card;
use crate::error::InvalidMove;
use std::fmt;

/// Slots per hand: two rows of three.
pub const HAND_SIZE: usize = 6;

/// Column pairs as (top, bottom) slot indices.
pub const COLUMNS: [(usize, usize); 3] = [(0, 3), (1, 4), (2, 5)];

/// One position in a hand's grid.
///
/// `Empty` only ever results from a column match and is permanent for the
/// rest of the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    FaceDown(Card),
    FaceUp(Card),
    Empty,
}

impl Slot {
    pub fn card(self) -> Option<Card> {
        match self {
            Slot::FaceDown(c) | Slot::FaceUp(c) => Some(c),
            Slot::Empty => None,
        }
    }

    pub fn is_face_down(self) -> bool {
        matches!(self, Slot::FaceDown(_))
    }

    pub fn is_face_up(self) -> bool {
        matches!(self, Slot::FaceUp(_))
    }

    pub fn is_empty(self) -> bool {
        matches!(self, Slot::Empty)
    }

    /// What everyone at the table may see of this slot.
    pub fn view(self) -> SlotView {
        match self {
            Slot::FaceDown(_) => SlotView::Hidden,
            Slot::FaceUp(c) => SlotView::Up(c),
            Slot::Empty => SlotView::Empty,
        }
    }
}

/// Public view of a slot: face-down cards never expose rank or suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotView {
    Hidden,
    Up(Card),
    Empty,
}

impl fmt::Display for SlotView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotView::Hidden => write!(f, "??"),
            SlotView::Up(c) => write!(f, "{c}"),
            SlotView::Empty => write!(f, "--"),
        }
    }
}

/// Validate a slot index.
pub fn check_slot(slot: usize) -> Result<(), InvalidMove> {
    if slot < HAND_SIZE {
        Ok(())
    } else {
        Err(InvalidMove::SlotOutOfRange(slot))
    }
}

/// A player's six-card grid.
///
/// ```
/// use golf_rs::cards::parse_cards;
/// use golf_rs::hand::{Hand, SlotView};
///
/// let cards = parse_cards("As 2s 3s 4s 5s 6s").unwrap();
/// let hand = Hand::face_down([cards[0], cards[1], cards[2], cards[3], cards[4], cards[5]]);
/// assert!(hand.view().iter().all(|v| *v == SlotView::Hidden));
/// assert_eq!(hand.score(), 21);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    slots: [Slot; HAND_SIZE],
}

impl Hand {
    pub fn face_down(cards: [Card; HAND_SIZE]) -> Self {
        Self { slots: cards.map(Slot::FaceDown) }
    }

    pub fn slots(&self) -> &[Slot; HAND_SIZE] {
        &self.slots
    }

    pub fn slot(&self, slot: usize) -> Option<Slot> {
        self.slots.get(slot).copied()
    }

    pub fn view(&self) -> [SlotView; HAND_SIZE] {
        self.slots.map(Slot::view)
    }

    /// True once every slot is face-up or empty.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(|s| !s.is_face_down())
    }

    pub fn has_face_down(&self) -> bool {
        self.slots.iter().any(|s| s.is_face_down())
    }

    pub fn face_up_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_face_up()).count()
    }

    /// Sum of every remaining card, face-down ones included.
    pub fn score(&self) -> u32 {
        self.slots.iter().filter_map(|s| s.card()).map(Card::score).sum()
    }

    /// Sum of the face-up cards only.
    pub fn visible_score(&self) -> u32 {
        self.slots
            .iter()
            .filter_map(|s| match s {
                Slot::FaceUp(c) => Some(c.score()),
                _ => None,
            })
            .sum()
    }

    /// Check that `slot` holds a face-down card, without changing anything.
    pub(crate) fn check_flippable(&self, slot: usize) -> Result<(), InvalidMove> {
        check_slot(slot)?;
        match self.slots[slot] {
            Slot::FaceDown(_) => Ok(()),
            Slot::FaceUp(_) => Err(InvalidMove::SlotFaceUp(slot)),
            Slot::Empty => Err(InvalidMove::SlotEmpty(slot)),
        }
    }

    /// Check that `slot` holds a card that may be swapped out.
    pub(crate) fn check_occupied(&self, slot: usize) -> Result<(), InvalidMove> {
        check_slot(slot)?;
        if self.slots[slot].is_empty() {
            return Err(InvalidMove::SlotEmpty(slot));
        }
        Ok(())
    }

    pub(crate) fn turn_up(&mut self, slot: usize) -> Result<Card, InvalidMove> {
        self.check_flippable(slot)?;
        let Slot::FaceDown(card) = self.slots[slot] else {
            return Err(InvalidMove::SlotFaceUp(slot));
        };
        self.slots[slot] = Slot::FaceUp(card);
        Ok(card)
    }

    /// Put `card` face-up into `slot` and return the card it displaced.
    pub(crate) fn exchange(&mut self, slot: usize, card: Card) -> Result<Card, InvalidMove> {
        self.check_occupied(slot)?;
        let old = self.slots[slot].card().ok_or(InvalidMove::SlotEmpty(slot))?;
        self.slots[slot] = Slot::FaceUp(card);
        Ok(old)
    }

    /// Clear every column whose two cards are face-up and of equal rank.
    /// Returns the cleared columns with the cards that left the hand.
    pub(crate) fn resolve_columns(&mut self) -> Vec<(usize, [Card; 2])> {
        let mut cleared = Vec::new();
        for (col, &(top, bottom)) in COLUMNS.iter().enumerate() {
            if let (Slot::FaceUp(a), Slot::FaceUp(b)) = (self.slots[top], self.slots[bottom]) {
                if a.matches(b) {
                    self.slots[top] = Slot::Empty;
                    self.slots[bottom] = Slot::Empty;
                    cleared.push((col, [a, b]));
                }
            }
        }
        cleared
    }

    /// Turn every remaining face-down card up.
    pub(crate) fn reveal_all(&mut self) {
        for s in &mut self.slots {
            if let Slot::FaceDown(c) = *s {
                *s = Slot::FaceUp(c);
            }
        }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.view();
        write!(f, "{} {} {} / {} {} {}", v[0], v[1], v[2], v[3], v[4], v[5])
    }
}
