use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tracing::debug;

use crate::{
    card::CardColor,
    pile::{Pile, PileRole},
    rules,
    table::Board,
    turn::TurnOutcome,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Seat {
    Automated,
    Interactive,
}

/// Strategy state of a computer-controlled seat.
#[derive(Debug)]
pub struct AutomatedState {
    rng: StdRng,
}

/// Written by the front end while the game-logic thread is parked on the gate.
#[derive(Debug, Default)]
pub struct InteractiveSlot {
    selected: Option<usize>,
    decision: Option<TurnOutcome>,
}

#[derive(Debug)]
pub enum PlayerKind {
    Automated(AutomatedState),
    Interactive(InteractiveSlot),
}

#[derive(Debug)]
pub struct Player {
    pub hand: Pile,
    has_drawn: bool,
    kind: PlayerKind,
}

impl Player {
    pub fn automated(seat: usize, seed: u64) -> Self {
        Self {
            hand: Pile::new(PileRole::Hand(seat)),
            has_drawn: false,
            kind: PlayerKind::Automated(AutomatedState {
                rng: StdRng::seed_from_u64(seed),
            }),
        }
    }

    pub fn interactive(seat: usize) -> Self {
        Self {
            hand: Pile::new(PileRole::Hand(seat)),
            has_drawn: false,
            kind: PlayerKind::Interactive(InteractiveSlot::default()),
        }
    }

    pub fn seat(&self) -> Seat {
        match self.kind {
            PlayerKind::Automated(_) => Seat::Automated,
            PlayerKind::Interactive(_) => Seat::Interactive,
        }
    }

    pub fn is_automated(&self) -> bool {
        self.seat() == Seat::Automated
    }

    pub fn cards_count(&self) -> usize {
        self.hand.len()
    }

    pub fn has_drawn(&self) -> bool {
        self.has_drawn
    }

    pub fn selected(&self) -> Option<usize> {
        match &self.kind {
            PlayerKind::Interactive(slot) => slot.selected,
            PlayerKind::Automated(_) => None,
        }
    }

    /// Runs this seat's turn as far as it can on its own.
    ///
    /// An automated seat always comes back with an outcome. An interactive seat comes back with
    /// `None`: its outcome arrives later from the front end through [`Player::take_decision`].
    pub(crate) fn play(&mut self, board: &mut Board) -> Option<TurnOutcome> {
        if let PlayerKind::Interactive(slot) = &mut self.kind {
            slot.decision = None;
            return None;
        }
        Some(self.play_automated(board))
    }

    fn play_automated(&mut self, board: &mut Board) -> TurnOutcome {
        let Some(top) = board.top() else {
            return TurnOutcome::Passed;
        };
        let playable = rules::playable_indices(&self.hand, &top);

        let choice = match &mut self.kind {
            PlayerKind::Automated(state) => playable.choose(&mut state.rng).copied(),
            PlayerKind::Interactive(_) => None,
        };

        if let Some(index) = choice {
            board.discard_from(&mut self.hand, index);
            return TurnOutcome::Played;
        }

        if self.has_drawn {
            return TurnOutcome::Passed;
        }

        let drawn = board.deal_to(&mut self.hand, 1);
        self.has_drawn = true;
        debug!(seat = ?self.hand.role(), drawn, "nothing playable, drawing");
        self.play_automated(board)
    }

    /// Color an automated seat declares for the wild it just played.
    pub(crate) fn automated_color(&self) -> CardColor {
        rules::abundant_color(&self.hand)
    }

    pub(crate) fn take_decision(&mut self) -> Option<TurnOutcome> {
        match &mut self.kind {
            PlayerKind::Interactive(slot) => slot.decision.take(),
            PlayerKind::Automated(_) => None,
        }
    }

    pub(crate) fn decide(&mut self, outcome: TurnOutcome) {
        if let PlayerKind::Interactive(slot) = &mut self.kind {
            slot.decision = Some(outcome);
        }
    }

    pub(crate) fn select(&mut self, index: usize) {
        if let PlayerKind::Interactive(slot) = &mut self.kind {
            slot.selected = Some(index);
        }
    }

    pub(crate) fn clear_selection(&mut self) {
        if let PlayerKind::Interactive(slot) = &mut self.kind {
            slot.selected = None;
        }
    }

    pub(crate) fn mark_drawn(&mut self) {
        self.has_drawn = true;
    }

    pub(crate) fn end_turn(&mut self) {
        self.has_drawn = false;
        self.clear_selection();
    }
}
