use std::fmt::Debug;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum UnoError {
    #[error("Unsupported seat count {0}, pick 2 or 4")]
    InvalidSeatCount(usize),
    #[error("{0}")]
    Rejected(#[from] Rejection),
    #[error("Invalid value {value:?} for {key}")]
    InvalidConfig { key: &'static str, value: String },
}

/// Why an interactive move was refused. The message is shown to the player as is.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[error("Wait for your turn")]
    NotYourTurn,
    #[error("Select a card first")]
    NothingSelected,
    #[error("Select a valid card")]
    InvalidCard,
    #[error("Unable to draw more than once per turn")]
    AlreadyDrawn,
    #[error("Must select the card that was drawn this round")]
    NotTheDrawnCard,
    #[error("Draw a card to pass")]
    MustDrawBeforePassing,
    #[error("No wild card is waiting for a color")]
    NoColorRequested,
    #[error("Not waiting for a mode selection")]
    NoModeRequested,
    #[error("No such card in your hand")]
    NoSuchCard,
}

pub type Result<T, E = UnoError> = std::result::Result<T, E>;
