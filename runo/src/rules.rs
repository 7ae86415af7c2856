//! Pure rule checks. Nothing in here touches a pile or the turn order; callers apply the answers.

use crate::{
    card::{Card, CardAction, CardColor, PlayedCard},
    constants::{DRAW_FOUR_COUNT, DRAW_TWO_COUNT},
    pile::Pile,
    turn::Direction,
};

/// Wild color tie-break order, highest priority first.
const COLOR_PRIORITY: [CardColor; 4] = [
    CardColor::Blue,
    CardColor::Red,
    CardColor::Green,
    CardColor::Yellow,
];

/// The effect the exposed top card has on the seat that plays after it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub skip_next: bool,
    pub draw_count: usize,
    pub direction: Direction,
}

pub fn is_playable(candidate: &Card, top: &PlayedCard) -> bool {
    if candidate.is_wild() || candidate.color() == top.color() {
        return true;
    }

    if let (Some(number), Some(top_number)) = (candidate.number(), top.number()) {
        if number == top_number {
            return true;
        }
    }

    candidate.action() != CardAction::None && candidate.action() == top.action()
}

/// A Wild Draw Four may only go down when nothing in the hand shares the color on top.
pub fn is_wild_draw_four_playable(hand: &Pile, top: &PlayedCard) -> bool {
    !hand
        .iter()
        .any(|card| card.color().is_some() && card.color() == top.color())
}

/// Whether the card at `index` in `hand` may be put on `top`.
pub fn can_play(hand: &Pile, index: usize, top: &PlayedCard) -> bool {
    match hand.get(index) {
        Some(Card::WildDraw) => is_wild_draw_four_playable(hand, top),
        Some(card) => is_playable(card, top),
        None => false,
    }
}

pub fn playable_indices(hand: &Pile, top: &PlayedCard) -> Vec<usize> {
    (0..hand.len())
        .filter(|index| can_play(hand, *index, top))
        .collect()
}

pub fn resolve_top_card(top: &PlayedCard, player_count: usize, direction: Direction) -> Resolution {
    let (skip_next, draw_count, direction) = match top.action() {
        CardAction::Skip => (true, 0, direction),
        CardAction::Reverse if player_count == 2 => (true, 0, direction),
        CardAction::Reverse => (false, 0, direction.reversed()),
        CardAction::DrawTwo => (true, DRAW_TWO_COUNT, direction),
        CardAction::DrawFour => (true, DRAW_FOUR_COUNT, direction),
        CardAction::None => (false, 0, direction),
    };

    Resolution {
        skip_next,
        draw_count,
        direction,
    }
}

/// The color held most often in `hand`. Ties go to the color earlier in `COLOR_PRIORITY`.
pub fn abundant_color(hand: &Pile) -> CardColor {
    let count = |color: CardColor| hand.iter().filter(|card| card.color() == Some(color)).count();

    let mut best = COLOR_PRIORITY[0];
    let mut best_count = count(best);
    for color in &COLOR_PRIORITY[1..] {
        let color_count = count(*color);
        if color_count > best_count {
            best = *color;
            best_count = color_count;
        }
    }
    best
}
