use golf_rs::cards::{Card, Rank};
use golf_rs::deck::{Deck, RngShuffler, Shuffler};
use golf_rs::hand::{SlotView, HAND_SIZE};
use golf_rs::round::{Phase, Round};
use proptest::prelude::*;

fn cards_in_play(r: &Round) -> usize {
    let in_hands: usize = (0..r.player_count())
        .filter_map(|p| r.visible_hand(p))
        .map(|h| h.iter().filter(|v| **v != SlotView::Empty).count())
        .sum();
    r.deck_len() + r.discard_len() + in_hands + usize::from(r.drawn_card().is_some())
}

/// One turn driven by `choice`: the low bit picks the source, the next bit
/// prefers flipping over replacing, the rest picks the slot.
fn take_turn(r: &mut Round, shuffler: &mut dyn Shuffler, choice: u8) {
    let p = r.current_player();
    let hand = r.visible_hand(p).unwrap();
    if choice & 1 == 0 {
        r.draw_from_deck(shuffler).unwrap();
    } else {
        r.draw_from_discard().unwrap();
    }
    let hidden: Vec<usize> = (0..HAND_SIZE).filter(|&i| hand[i] == SlotView::Hidden).collect();
    let occupied: Vec<usize> = (0..HAND_SIZE).filter(|&i| hand[i] != SlotView::Empty).collect();
    let pick = (choice >> 2) as usize;
    if choice & 2 == 0 && !hidden.is_empty() {
        r.discard_drawn().unwrap();
        r.flip(hidden[pick % hidden.len()]).unwrap();
    } else {
        r.replace(occupied[pick % occupied.len()]).unwrap();
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_rounds_keep_every_card_and_score_what_is_left(
        seed in any::<u64>(),
        players in 2usize..=8,
        choices in proptest::collection::vec(any::<u8>(), 0..120),
    ) {
        let mut shuffler = RngShuffler::seeded(seed);
        let mut r = Round::new(Deck::shuffled(&mut shuffler).unwrap());
        r.deal(players).unwrap();
        for p in 0..players {
            r.reveal_initial(p, &[(seed as usize) % 3, 3 + (seed as usize / 3) % 3]).unwrap();
        }

        let mut empties: Vec<Vec<usize>> = vec![Vec::new(); players];
        let mut turns = 0usize;
        while r.phase() == Phase::Playing {
            // Once the scripted choices run out, always flip so the round ends.
            let choice = choices.get(turns).copied().unwrap_or(0);
            take_turn(&mut r, &mut shuffler, choice);
            turns += 1;
            prop_assert!(turns < 200 + choices.len());

            prop_assert_eq!(cards_in_play(&r) + r.removed_cards().len(), 52);
            for (p, seen) in empties.iter_mut().enumerate() {
                let hand = r.visible_hand(p).unwrap();
                for &slot in seen.iter() {
                    prop_assert_eq!(hand[slot], SlotView::Empty);
                }
                *seen = (0..HAND_SIZE).filter(|&i| hand[i] == SlotView::Empty).collect();
            }
        }

        prop_assert_eq!(r.phase(), Phase::RoundEnd);
        prop_assert_eq!(r.removed_cards().len() % 2, 0);
        let scores = r.scores().unwrap().to_vec();
        prop_assert_eq!(scores.len(), players);
        for (p, &score) in scores.iter().enumerate() {
            let hand = r.visible_hand(p).unwrap();
            prop_assert!(hand.iter().all(|v| *v != SlotView::Hidden));
            let sum: u32 = hand
                .iter()
                .filter_map(|v| match v {
                    SlotView::Up(c) => Some(c.score()),
                    _ => None,
                })
                .sum();
            prop_assert_eq!(score, sum);
            prop_assert!(score <= 6 * Rank::Queen.score());
        }
    }

    #[test]
    fn removed_cards_come_in_equal_rank_pairs(seed in any::<u64>()) {
        let mut shuffler = RngShuffler::seeded(seed);
        let mut r = Round::new(Deck::shuffled(&mut shuffler).unwrap());
        r.deal(3).unwrap();
        for p in 0..3 {
            r.reveal_initial(p, &[0, 3]).unwrap();
        }
        while r.phase() == Phase::Playing {
            take_turn(&mut r, &mut shuffler, 0);
        }
        let removed: &[Card] = r.removed_cards();
        for pair in removed.chunks(2) {
            prop_assert!(pair[0].matches(pair[1]));
        }
    }
}
