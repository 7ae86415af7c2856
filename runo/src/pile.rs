use rand::{seq::SliceRandom, Rng};
use strum::IntoEnumIterator;

use crate::{
    card::{Card, CardColor, ColoredCard},
    constants::*,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PileRole {
    Draw,
    Discard,
    Hand(usize),
}

/// An ordered run of cards. The last card is the top.
#[derive(Clone, Debug)]
pub struct Pile {
    role: PileRole,
    cards: Vec<Card>,
}

impl Pile {
    pub fn new(role: PileRole) -> Self {
        Self {
            role,
            cards: Vec::new(),
        }
    }

    pub fn with_cards(role: PileRole, cards: Vec<Card>) -> Self {
        Self { role, cards }
    }

    /// An unshuffled draw pile holding every card of the game.
    pub fn full_deck() -> Self {
        let mut cards = Vec::with_capacity(TOTAL_CARDS_IN_DECK);

        for color in CardColor::iter() {
            for number in NUMBER_CARDS_PER_COLOR {
                cards.push(Card::Colored(color, ColoredCard::Number(*number)));
            }

            for _ in 0..SKIP_CARDS_PER_COLOR {
                cards.push(Card::Colored(color, ColoredCard::Skip));
            }

            for _ in 0..REVERSE_CARDS_PER_COLOR {
                cards.push(Card::Colored(color, ColoredCard::Reverse));
            }

            for _ in 0..DRAW_TWO_CARDS_PER_COLOR {
                cards.push(Card::Colored(color, ColoredCard::DrawTwo));
            }
        }

        for _ in 0..WILD_CARDS_IN_DECK {
            cards.push(Card::Wild);
        }

        for _ in 0..WILD_DRAW_CARDS_IN_DECK {
            cards.push(Card::WildDraw);
        }

        Self::with_cards(PileRole::Draw, cards)
    }

    pub fn role(&self) -> PileRole {
        self.role
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn top(&self) -> Option<&Card> {
        self.cards.last()
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn take(&mut self, index: usize) -> Option<Card> {
        (index < self.cards.len()).then(|| self.cards.remove(index))
    }

    /// Moves the top card onto `other`. Returns the moved card, or `None` if this pile is empty.
    pub fn move_top_to(&mut self, other: &mut Pile) -> Option<Card> {
        let card = self.cards.pop()?;
        other.cards.push(card);
        Some(card)
    }

    /// Removes every card except the top one.
    pub fn drain_under_top(&mut self) -> Vec<Card> {
        let keep = self.cards.len().min(1);
        let under = self.cards.len() - keep;
        self.cards.drain(0..under).collect()
    }

    pub fn extend(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> + '_ {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardAction;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn correct_card_count_new_deck() {
        let deck = Pile::full_deck();
        assert_eq!(deck.len(), TOTAL_CARDS_IN_DECK);
        assert_eq!(deck.role(), PileRole::Draw);
    }

    #[test]
    fn deck_composition_matches_the_rules() {
        let deck = Pile::full_deck();
        let numbered = deck.iter().filter(|card| card.number().is_some()).count();
        let wild = deck.iter().filter(|card| card.is_wild()).count();
        let actions = deck
            .iter()
            .filter(|card| !card.is_wild() && card.action() != CardAction::None)
            .count();

        assert_eq!(numbered, 76);
        assert_eq!(actions, 24);
        assert_eq!(wild, 8);
    }

    #[test]
    fn shuffle_keeps_every_card() {
        let mut deck = Pile::full_deck();
        deck.shuffle(&mut StdRng::seed_from_u64(7));
        assert_eq!(deck.len(), TOTAL_CARDS_IN_DECK);
        assert_eq!(deck.iter().filter(|card| **card == Card::WildDraw).count(), 4);
    }

    #[test]
    fn move_top_to_moves_exactly_one_card() {
        let mut draw = Pile::with_cards(PileRole::Draw, vec![Card::Wild, Card::WildDraw]);
        let mut discard = Pile::new(PileRole::Discard);

        assert_eq!(draw.move_top_to(&mut discard), Some(Card::WildDraw));
        assert_eq!(draw.len(), 1);
        assert_eq!(discard.top(), Some(&Card::WildDraw));

        let mut empty = Pile::new(PileRole::Draw);
        assert_eq!(empty.move_top_to(&mut discard), None);
        assert_eq!(discard.len(), 1);
    }

    #[test]
    fn drain_under_top_keeps_the_top_card() {
        let mut discard = Pile::with_cards(
            PileRole::Discard,
            vec![
                Card::Wild,
                Card::Colored(CardColor::Red, ColoredCard::Skip),
                Card::Colored(CardColor::Blue, ColoredCard::Number(4)),
            ],
        );

        let under = discard.drain_under_top();

        assert_eq!(under.len(), 2);
        assert_eq!(discard.len(), 1);
        assert_eq!(
            discard.top(),
            Some(&Card::Colored(CardColor::Blue, ColoredCard::Number(4)))
        );

        let mut empty = Pile::new(PileRole::Discard);
        assert!(empty.drain_under_top().is_empty());
    }

    #[test]
    fn take_out_of_range_returns_none() {
        let mut hand = Pile::with_cards(PileRole::Hand(1), vec![Card::Wild]);
        assert_eq!(hand.take(3), None);
        assert_eq!(hand.take(0), Some(Card::Wild));
        assert!(hand.is_empty());
    }
}
