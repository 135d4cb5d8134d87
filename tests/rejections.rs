use golf_rs::cards::Card;
use golf_rs::deck::{Deck, RngShuffler};
use golf_rs::error::{ConfigError, GolfError, InvalidMove};
use golf_rs::hand::{SlotView, HAND_SIZE};
use golf_rs::round::{Phase, Round, TurnStep};

#[derive(Debug, PartialEq, Eq)]
struct Snapshot {
    phase: Phase,
    step: TurnStep,
    current: usize,
    drawn: Option<Card>,
    discard_top: Option<Card>,
    discard_len: usize,
    deck_len: usize,
    hands: Vec<[SlotView; HAND_SIZE]>,
    history_len: usize,
}

fn snapshot(r: &Round) -> Snapshot {
    Snapshot {
        phase: r.phase(),
        step: r.turn_step(),
        current: r.current_player(),
        drawn: r.drawn_card(),
        discard_top: r.discard_top(),
        discard_len: r.discard_len(),
        deck_len: r.deck_len(),
        hands: (0..r.player_count()).filter_map(|p| r.visible_hand(p)).collect(),
        history_len: r.history_len(),
    }
}

fn assert_rejected(
    r: &mut Round,
    op: impl FnOnce(&mut Round) -> Result<(), GolfError>,
) -> GolfError {
    let before = snapshot(r);
    let err = op(r).expect_err("operation should be rejected");
    assert_eq!(snapshot(r), before, "rejected {err:?} changed state");
    err
}

fn round(seed: u64) -> Round {
    Round::new(Deck::shuffled(&mut RngShuffler::seeded(seed)).unwrap())
}

#[test]
fn setup_rejects_everything_but_a_valid_deal() {
    let mut r = round(1);
    let mut s = RngShuffler::seeded(1);
    assert_eq!(
        assert_rejected(&mut r, |r| r.deal(1)),
        GolfError::Configuration(ConfigError::PlayerCount { min: 2, max: 8, got: 1 })
    );
    assert_rejected(&mut r, |r| r.deal(9));
    assert_rejected(&mut r, |r| r.reveal_initial(0, &[0, 1]));
    assert_rejected(&mut r, |r| r.draw_from_deck(&mut s));
    assert_rejected(&mut r, |r| r.draw_from_discard());
    assert_rejected(&mut r, |r| r.flip(0));
    r.deal(2).unwrap();
    assert_eq!(
        assert_rejected(&mut r, |r| r.deal(2)),
        GolfError::InvalidMove(InvalidMove::WrongPhase {
            expected: Phase::Setup,
            actual: Phase::InitialReveal
        })
    );
}

#[test]
fn bad_initial_reveals_change_nothing() {
    let mut r = round(2);
    r.deal(3).unwrap();
    let cases: [(usize, &[usize], InvalidMove); 5] = [
        (3, &[0, 1], InvalidMove::UnknownPlayer(3)),
        (0, &[0], InvalidMove::RevealCount(1)),
        (0, &[0, 1, 2], InvalidMove::RevealCount(3)),
        (0, &[2, 2], InvalidMove::DuplicateSlot(2)),
        (0, &[1, 6], InvalidMove::SlotOutOfRange(6)),
    ];
    for (player, slots, expected) in cases {
        let err = assert_rejected(&mut r, |r| r.reveal_initial(player, slots));
        assert_eq!(err, GolfError::InvalidMove(expected));
    }
    r.reveal_initial(0, &[0, 1]).unwrap();
    assert_eq!(
        assert_rejected(&mut r, |r| r.reveal_initial(0, &[2, 3])),
        GolfError::InvalidMove(InvalidMove::AlreadyRevealed(0))
    );
    let mut s = RngShuffler::seeded(2);
    assert_rejected(&mut r, |r| r.draw_from_deck(&mut s));
}

#[test]
fn turn_steps_are_enforced() {
    let mut r = round(3);
    let mut s = RngShuffler::seeded(3);
    r.deal(2).unwrap();
    r.reveal_initial(0, &[0, 1]).unwrap();
    r.reveal_initial(1, &[0, 1]).unwrap();

    let await_draw = GolfError::InvalidMove(InvalidMove::WrongStep { step: TurnStep::AwaitDraw });
    assert_eq!(assert_rejected(&mut r, |r| r.replace(2)), await_draw);
    assert_eq!(assert_rejected(&mut r, |r| r.discard_drawn()), await_draw);
    assert_eq!(assert_rejected(&mut r, |r| r.flip(2)), await_draw);

    r.draw_from_deck(&mut s).unwrap();
    let holding = GolfError::InvalidMove(InvalidMove::WrongStep { step: TurnStep::Holding });
    assert_eq!(assert_rejected(&mut r, |r| r.draw_from_deck(&mut s)), holding);
    assert_eq!(assert_rejected(&mut r, |r| r.draw_from_discard()), holding);
    assert_eq!(assert_rejected(&mut r, |r| r.flip(2)), holding);
    assert_eq!(
        assert_rejected(&mut r, |r| r.replace(6)),
        GolfError::InvalidMove(InvalidMove::SlotOutOfRange(6))
    );

    r.discard_drawn().unwrap();
    let must_flip = GolfError::InvalidMove(InvalidMove::WrongStep { step: TurnStep::MustFlip });
    assert_eq!(assert_rejected(&mut r, |r| r.replace(2)), must_flip);
    assert_eq!(assert_rejected(&mut r, |r| r.discard_drawn()), must_flip);
    assert_eq!(
        assert_rejected(&mut r, |r| r.flip(0)),
        GolfError::InvalidMove(InvalidMove::SlotFaceUp(0))
    );
    r.flip(2).unwrap();
    assert_eq!(r.current_player(), 1);
}
