use strum::EnumCount;

use crate::card::CardColor;

pub(crate) const NUMBER_CARDS_PER_COLOR: &[u8] =
    &[0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9, 9];
pub(crate) const SKIP_CARDS_PER_COLOR: u8 = 2;
pub(crate) const REVERSE_CARDS_PER_COLOR: u8 = 2;
pub(crate) const DRAW_TWO_CARDS_PER_COLOR: u8 = 2;

pub(crate) const NUMBER_CARDS_IN_DECK: u8 = (NUMBER_CARDS_PER_COLOR.len() * CardColor::COUNT) as u8;
pub(crate) const SKIP_CARDS_IN_DECK: u8 = SKIP_CARDS_PER_COLOR * CardColor::COUNT as u8;
pub(crate) const REVERSE_CARDS_IN_DECK: u8 = REVERSE_CARDS_PER_COLOR * CardColor::COUNT as u8;
pub(crate) const DRAW_TWO_CARDS_IN_DECK: u8 = DRAW_TWO_CARDS_PER_COLOR * CardColor::COUNT as u8;

pub(crate) const WILD_CARDS_IN_DECK: u8 = 4;
pub(crate) const WILD_DRAW_CARDS_IN_DECK: u8 = 4;

pub const TOTAL_CARDS_IN_DECK: usize = (NUMBER_CARDS_IN_DECK
    + SKIP_CARDS_IN_DECK
    + REVERSE_CARDS_IN_DECK
    + DRAW_TWO_CARDS_IN_DECK
    + WILD_CARDS_IN_DECK
    + WILD_DRAW_CARDS_IN_DECK) as usize;

pub(crate) const DRAW_TWO_COUNT: usize = 2;
pub(crate) const DRAW_FOUR_COUNT: usize = 4;

/// Seat 0 is always the human.
pub const INTERACTIVE_SEAT: usize = 0;

pub const SUPPORTED_SEAT_COUNTS: &[usize] = &[2, 4];

pub(crate) const TWO_SEAT_DEAL: &[usize] = &[7, 7];
pub(crate) const FOUR_SEAT_DEAL: &[usize] = &[7, 3, 7, 3];

pub(crate) fn deal_sizes(seats: usize) -> Option<&'static [usize]> {
    match seats {
        2 => Some(TWO_SEAT_DEAL),
        4 => Some(FOUR_SEAT_DEAL),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_card_count_constants() {
        assert_eq!(NUMBER_CARDS_PER_COLOR.len(), 19);
        assert_eq!(NUMBER_CARDS_IN_DECK, 76);

        assert_eq!(
            SKIP_CARDS_IN_DECK + REVERSE_CARDS_IN_DECK + DRAW_TWO_CARDS_IN_DECK,
            24
        );

        assert_eq!(WILD_CARDS_IN_DECK + WILD_DRAW_CARDS_IN_DECK, 8);

        assert_eq!(TOTAL_CARDS_IN_DECK, 108);
    }

    #[test]
    fn deal_sizes_exist_only_for_supported_seat_counts() {
        for seats in SUPPORTED_SEAT_COUNTS {
            assert_eq!(deal_sizes(*seats).map(|sizes| sizes.len()), Some(*seats));
        }
        assert_eq!(deal_sizes(3), None);
        assert_eq!(deal_sizes(0), None);
    }
}
