use core::fmt;
use std::fmt::Display;

use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter, EnumString};

#[derive(Clone, Copy, Debug, Display, EnumString, EnumCountMacro, EnumIter, PartialEq, Eq, Hash)]
#[strum(ascii_case_insensitive)]
pub enum CardColor {
    Red,
    Yellow,
    Green,
    Blue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColoredCard {
    Number(u8),
    Skip,
    Reverse,
    DrawTwo,
}

/// What a card does once it is exposed on top of the discard pile.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum CardAction {
    None,
    Skip,
    Reverse,
    DrawTwo,
    DrawFour,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Card {
    Colored(CardColor, ColoredCard),
    Wild,
    WildDraw,
}

impl Card {
    /// `None` stands for the wild color.
    pub fn color(&self) -> Option<CardColor> {
        match self {
            Card::Colored(color, _) => Some(*color),
            Card::Wild | Card::WildDraw => None,
        }
    }

    pub fn number(&self) -> Option<u8> {
        match self {
            Card::Colored(_, ColoredCard::Number(number)) => Some(*number),
            _ => None,
        }
    }

    pub fn action(&self) -> CardAction {
        match self {
            Card::Colored(_, ColoredCard::Number(_)) | Card::Wild => CardAction::None,
            Card::Colored(_, ColoredCard::Skip) => CardAction::Skip,
            Card::Colored(_, ColoredCard::Reverse) => CardAction::Reverse,
            Card::Colored(_, ColoredCard::DrawTwo) => CardAction::DrawTwo,
            Card::WildDraw => CardAction::DrawFour,
        }
    }

    pub fn is_wild(&self) -> bool {
        matches!(self, Card::Wild | Card::WildDraw)
    }

    /// Exposes this card as the top of the discard pile, carrying the color declared for a wild.
    pub fn into_played_card(self, declared: Option<CardColor>) -> PlayedCard {
        match self {
            Card::Colored(color, card) => PlayedCard::Colored(color, card),
            Card::Wild => PlayedCard::Wild(declared),
            Card::WildDraw => PlayedCard::WildDraw(declared),
        }
    }
}

/// The top of the discard pile as the rules see it. A wild stays a wild, but once its player has
/// picked a color it shows that color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayedCard {
    Colored(CardColor, ColoredCard),
    Wild(Option<CardColor>),
    WildDraw(Option<CardColor>),
}

impl PlayedCard {
    pub fn color(&self) -> Option<CardColor> {
        match self {
            PlayedCard::Colored(color, _) => Some(*color),
            PlayedCard::Wild(declared) | PlayedCard::WildDraw(declared) => *declared,
        }
    }

    pub fn card(&self) -> Card {
        match self {
            PlayedCard::Colored(color, card) => Card::Colored(*color, *card),
            PlayedCard::Wild(_) => Card::Wild,
            PlayedCard::WildDraw(_) => Card::WildDraw,
        }
    }

    pub fn number(&self) -> Option<u8> {
        self.card().number()
    }

    pub fn action(&self) -> CardAction {
        self.card().action()
    }

    pub fn is_wild(&self) -> bool {
        self.card().is_wild()
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Colored(color, card) => {
                write!(f, "{} {}", color, {
                    match card {
                        ColoredCard::Number(number) => number.to_string(),
                        ColoredCard::Skip => "Skip".to_string(),
                        ColoredCard::Reverse => "Reverse".to_string(),
                        ColoredCard::DrawTwo => "Draw Two".to_string(),
                    }
                })
            }
            Card::Wild => write!(f, "Wild"),
            Card::WildDraw => write!(f, "Wild Draw Four"),
        }
    }
}

impl Display for PlayedCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.color() {
            Some(color) if self.is_wild() => write!(f, "{} ({})", self.card(), color),
            _ => write!(f, "{}", self.card()),
        }
    }
}
