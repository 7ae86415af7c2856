//! What the engine needs from the outside world: somewhere to draw the table and somewhere to make
//! noise. The engine only ever pushes into these, it never reads anything back.

use crate::{
    card::{Card, PlayedCard},
    player::Seat,
    turn::Direction,
    uno::{GamePhase, Prompt},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    CardPlayed,
    CardDrawn,
}

/// Fire-and-forget sound effects. Implementations deal with their own failures.
pub trait AudioSink: Send {
    fn play(&mut self, sound: Sound);
}

/// Plays nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silence;

impl AudioSink for Silence {
    fn play(&mut self, _sound: Sound) {}
}

pub trait Presenter: Send + Sync {
    /// Called after every state-affecting event.
    fn render(&self, snapshot: &Snapshot);

    /// A move was refused; `message` says why.
    fn show_message(&self, message: &str);

    fn game_over(&self, winner: usize);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn render(&self, _snapshot: &Snapshot) {}

    fn show_message(&self, _message: &str) {}

    fn game_over(&self, _winner: usize) {}
}

#[derive(Clone, Debug)]
pub struct HandView {
    pub seat: usize,
    pub kind: Seat,
    pub cards: Vec<Card>,
    pub has_drawn: bool,
    /// Index into `cards` of the card the human has picked, if any.
    pub selected: Option<usize>,
}

/// A copy of everything a presenter may show, taken under the table lock.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub prompt: Prompt,
    pub current_seat: Option<usize>,
    pub direction: Direction,
    pub draw_pile_len: usize,
    pub discard_pile_len: usize,
    pub top: Option<PlayedCard>,
    pub hands: Vec<HandView>,
}

impl Snapshot {
    pub fn card_count(&self) -> usize {
        self.draw_pile_len
            + self.discard_pile_len
            + self.hands.iter().map(|hand| hand.cards.len()).sum::<usize>()
    }
}
