use rand::Rng;
use tracing::{debug, warn};

use crate::{
    card::{Card, CardColor, PlayedCard},
    constants::{INTERACTIVE_SEAT, TOTAL_CARDS_IN_DECK},
    error::Rejection,
    pile::{Pile, PileRole},
    player::Player,
    rules::{self, Resolution},
    sink::{AudioSink, HandView, Snapshot, Sound},
    turn::{Direction, TurnController, TurnOutcome},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    AwaitingModeSelection,
    Setup,
    Cycling,
    Finished { winner: usize },
}

/// What the game-logic thread is currently parked waiting for, if anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Prompt {
    Idle,
    ChooseMode,
    TakeTurn,
    ChooseColor,
}

/// The draw and discard piles plus whatever sits on top of them.
pub struct Board {
    draw_pile: Pile,
    discard_pile: Pile,
    declared_color: Option<CardColor>,
    audio: Box<dyn AudioSink>,
}

impl Board {
    pub fn new(audio: Box<dyn AudioSink>) -> Self {
        Self::from_piles(
            Pile::new(PileRole::Draw),
            Pile::new(PileRole::Discard),
            audio,
        )
    }

    pub fn from_piles(draw_pile: Pile, discard_pile: Pile, audio: Box<dyn AudioSink>) -> Self {
        Self {
            draw_pile,
            discard_pile,
            declared_color: None,
            audio,
        }
    }

    pub fn draw_pile(&self) -> &Pile {
        &self.draw_pile
    }

    pub fn discard_pile(&self) -> &Pile {
        &self.discard_pile
    }

    /// For stacking the deck in tooling and tests. Whatever is moved in or out must stay within
    /// the table's 108 cards.
    #[doc(hidden)]
    pub fn draw_pile_mut(&mut self) -> &mut Pile {
        &mut self.draw_pile
    }

    /// See [`Board::draw_pile_mut`]. The declared color still applies to whatever ends up on top.
    #[doc(hidden)]
    pub fn discard_pile_mut(&mut self) -> &mut Pile {
        &mut self.discard_pile
    }

    pub fn declared_color(&self) -> Option<CardColor> {
        self.declared_color
    }

    pub fn top(&self) -> Option<PlayedCard> {
        self.discard_pile
            .top()
            .map(|card| card.into_played_card(self.declared_color))
    }

    pub fn card_count(&self) -> usize {
        self.draw_pile.len() + self.discard_pile.len()
    }

    /// Puts a fresh, shuffled deck in the draw pile and empties the discard pile.
    pub(crate) fn rebuild<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.draw_pile = Pile::full_deck();
        self.draw_pile.shuffle(rng);
        self.discard_pile.clear();
        self.declared_color = None;
    }

    pub(crate) fn clear(&mut self) {
        self.draw_pile.clear();
        self.discard_pile.clear();
        self.declared_color = None;
    }

    pub(crate) fn declare_color(&mut self, color: CardColor) {
        self.declared_color = Some(color);
    }

    /// Moves up to `count` cards from the draw pile into `hand` without a sound.
    pub(crate) fn deal_silently(&mut self, hand: &mut Pile, count: usize) -> usize {
        (0..count)
            .take_while(|_| self.draw_pile.move_top_to(hand).is_some())
            .count()
    }

    /// Draws up to `count` cards into `hand`. Returns how many there were.
    pub(crate) fn deal_to(&mut self, hand: &mut Pile, count: usize) -> usize {
        let dealt = self.deal_silently(hand, count);
        if dealt > 0 {
            self.audio.play(Sound::CardDrawn);
        }
        dealt
    }

    pub(crate) fn discard_from(&mut self, hand: &mut Pile, index: usize) -> Option<Card> {
        let card = hand.take(index)?;
        self.discard_pile.push(card);
        self.declared_color = None;
        self.audio.play(Sound::CardPlayed);
        debug!(from = ?hand.role(), %card, "card played");
        Some(card)
    }

    /// Turns the draw pile's top card over onto the discard pile. A Wild Draw Four may never be
    /// the exposed card, so it goes back in and the draw pile is reshuffled until something else
    /// comes up.
    pub(crate) fn seed_discard<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.declared_color = None;
        if self.draw_pile.move_top_to(&mut self.discard_pile).is_none() {
            warn!("draw pile is empty, cannot expose a new discard top");
            return;
        }

        while self.discard_pile.top() == Some(&Card::WildDraw) {
            if self.draw_pile.iter().all(|card| *card == Card::WildDraw) {
                warn!("only wild draw fours left to expose, keeping it");
                break;
            }
            debug!("wild draw four exposed on the discard pile, reshuffling");
            self.discard_pile.move_top_to(&mut self.draw_pile);
            self.draw_pile.shuffle(rng);
            self.draw_pile.move_top_to(&mut self.discard_pile);
        }
    }

    /// Refills an empty draw pile from everything under the discard top and exposes a new top.
    /// Returns `false` when there was nothing to refill with.
    pub(crate) fn reseed<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        let returned = self.discard_pile.drain_under_top();
        if returned.is_empty() {
            warn!("draw pile is exhausted and the discard pile has nothing to give back");
            return false;
        }

        debug!(returned = returned.len(), "reshuffling the discard pile into the draw pile");
        self.draw_pile.extend(returned);
        self.draw_pile.shuffle(rng);
        self.seed_discard(rng);
        true
    }
}

pub struct Table {
    board: Board,
    players: Vec<Player>,
    turn: Option<TurnController>,
    phase: GamePhase,
    prompt: Prompt,
    requested_seats: Option<usize>,
}

impl Table {
    pub fn new(audio: Box<dyn AudioSink>) -> Self {
        Self {
            board: Board::new(audio),
            players: Vec::new(),
            turn: None,
            phase: GamePhase::AwaitingModeSelection,
            prompt: Prompt::Idle,
            requested_seats: None,
        }
    }

    /// A table already in the middle of a game.
    pub fn from_parts(board: Board, players: Vec<Player>, turn: TurnController) -> Self {
        Self {
            board,
            players,
            turn: Some(turn),
            phase: GamePhase::Cycling,
            prompt: Prompt::Idle,
            requested_seats: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub(crate) fn set_phase(&mut self, phase: GamePhase) {
        self.phase = phase;
    }

    pub fn prompt(&self) -> Prompt {
        self.prompt
    }

    pub(crate) fn set_prompt(&mut self, prompt: Prompt) {
        self.prompt = prompt;
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn get_player(&self, seat: usize) -> Option<&Player> {
        self.players.get(seat)
    }

    pub fn get_player_mut(&mut self, seat: usize) -> Option<&mut Player> {
        self.players.get_mut(seat)
    }

    pub fn current_seat(&self) -> Option<usize> {
        self.turn.as_ref().map(TurnController::current)
    }

    pub fn direction(&self) -> Direction {
        self.turn
            .as_ref()
            .map(TurnController::direction)
            .unwrap_or_default()
    }

    pub fn card_count(&self) -> usize {
        self.board.card_count() + self.players.iter().map(Player::cards_count).sum::<usize>()
    }

    pub(crate) fn take_requested_seats(&mut self) -> Option<usize> {
        self.requested_seats.take()
    }

    /// Deals a fresh game: new shuffled deck, hands of `deal` sizes, an exposed discard top and a
    /// starting seat.
    pub(crate) fn deal<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        deal: &[usize],
        autoplay: bool,
    ) {
        self.board.rebuild(rng);
        self.players = deal
            .iter()
            .enumerate()
            .map(|(seat, count)| {
                let mut player = if seat == INTERACTIVE_SEAT && !autoplay {
                    Player::interactive(seat)
                } else {
                    Player::automated(seat, rng.gen())
                };
                self.board.deal_silently(&mut player.hand, *count);
                player
            })
            .collect();
        self.board.seed_discard(rng);
        self.turn = Some(TurnController::new(
            self.players.len(),
            rng.gen_range(0..self.players.len()),
        ));
    }

    pub(crate) fn reset(&mut self) {
        self.board.clear();
        self.players.clear();
        self.turn = None;
        self.phase = GamePhase::AwaitingModeSelection;
        self.prompt = Prompt::Idle;
        self.requested_seats = None;
    }

    fn resolution(&self) -> Option<Resolution> {
        let turn = self.turn.as_ref()?;
        let top = self.board.top()?;
        Some(rules::resolve_top_card(
            &top,
            self.players.len(),
            turn.direction(),
        ))
    }

    /// Whether `seat` owes a color for the wild lying on the discard pile.
    pub(crate) fn needs_color(&self, seat: usize) -> bool {
        let wild_on_top = self.board.top().map_or(false, |top| top.is_wild());
        let holds_cards = self
            .players
            .get(seat)
            .map_or(false, |player| player.cards_count() > 0);
        wild_on_top && holds_cards && self.board.declared_color.is_none()
    }

    /// Applies the exposed top card as if it had been played against the seat whose turn it is.
    /// Used right after dealing and after every re-seed.
    pub(crate) fn apply_opening(&mut self) {
        let Some(resolution) = self.resolution() else {
            return;
        };
        let Some(turn) = self.turn.as_mut() else {
            return;
        };

        if turn.apply_direction(&resolution) {
            turn.advance();
        }
        if resolution.draw_count > 0 {
            let target = turn.current();
            if let Some(player) = self.players.get_mut(target) {
                self.board.deal_to(&mut player.hand, resolution.draw_count);
            }
        }
        if resolution.skip_next {
            turn.advance();
        }
        debug!(?resolution, "opening card resolved");
    }

    /// Applies the card the current seat just played. A forced draw lands on the seat after it,
    /// which is then skipped along with any Skip.
    pub(crate) fn apply_played(&mut self) {
        let Some(resolution) = self.resolution() else {
            return;
        };
        let Some(turn) = self.turn.as_mut() else {
            return;
        };

        turn.apply_direction(&resolution);
        if resolution.draw_count > 0 {
            let target = turn.peek_next();
            if let Some(player) = self.players.get_mut(target) {
                let dealt = self.board.deal_to(&mut player.hand, resolution.draw_count);
                debug!(target, dealt, "forced draw");
            }
        }
        if resolution.skip_next {
            turn.advance();
        }
    }

    /// Lets `seat` take its turn on its own. `None` means the front end has to decide.
    pub(crate) fn play(&mut self, seat: usize) -> Option<TurnOutcome> {
        let Table { board, players, .. } = self;
        players.get_mut(seat)?.play(board)
    }

    pub(crate) fn take_decision(&mut self, seat: usize) -> Option<TurnOutcome> {
        self.players.get_mut(seat)?.take_decision()
    }

    /// Clears the acting seat's per-turn state and hands the turn on.
    pub(crate) fn finish_turn(&mut self, seat: usize) {
        if let Some(player) = self.players.get_mut(seat) {
            player.end_turn();
        }
        if let Some(turn) = self.turn.as_mut() {
            turn.advance();
        }
    }

    pub(crate) fn check_conservation(&self) {
        debug_assert_eq!(
            self.card_count(),
            TOTAL_CARDS_IN_DECK,
            "cards were duplicated or lost"
        );
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            prompt: self.prompt,
            current_seat: self.current_seat(),
            direction: self.direction(),
            draw_pile_len: self.board.draw_pile.len(),
            discard_pile_len: self.board.discard_pile.len(),
            top: self.board.top(),
            hands: self
                .players
                .iter()
                .enumerate()
                .map(|(seat, player)| HandView {
                    seat,
                    kind: player.seat(),
                    cards: player.hand.cards().to_vec(),
                    has_drawn: player.has_drawn(),
                    selected: player.selected(),
                })
                .collect(),
        }
    }

    // Front end handlers. These run on the front end's thread, only while the game-logic thread
    // is parked waiting for the matching prompt.

    pub(crate) fn choose_mode(&mut self, seats: usize) -> Result<(), Rejection> {
        if self.prompt != Prompt::ChooseMode {
            return Err(Rejection::NoModeRequested);
        }
        self.requested_seats = Some(seats);
        self.prompt = Prompt::Idle;
        Ok(())
    }

    fn interactive_turn(&mut self) -> Result<&mut Player, Rejection> {
        if self.prompt != Prompt::TakeTurn || self.current_seat() != Some(INTERACTIVE_SEAT) {
            return Err(Rejection::NotYourTurn);
        }
        self.players
            .get_mut(INTERACTIVE_SEAT)
            .ok_or(Rejection::NotYourTurn)
    }

    pub(crate) fn select_card(&mut self, index: usize) -> Result<(), Rejection> {
        let player = self.interactive_turn()?;
        if index >= player.cards_count() {
            return Err(Rejection::NoSuchCard);
        }
        if player.has_drawn() && index + 1 != player.cards_count() {
            return Err(Rejection::NotTheDrawnCard);
        }
        player.select(index);
        Ok(())
    }

    pub(crate) fn discard_selected(&mut self) -> Result<(), Rejection> {
        self.interactive_turn()?;
        let Table {
            board, players, ..
        } = self;
        let player = &mut players[INTERACTIVE_SEAT];
        let index = player.selected().ok_or(Rejection::NothingSelected)?;
        if player.has_drawn() && index + 1 != player.cards_count() {
            player.clear_selection();
            return Err(Rejection::NotTheDrawnCard);
        }
        let top = board.top().ok_or(Rejection::InvalidCard)?;

        if !rules::can_play(&player.hand, index, &top) {
            player.clear_selection();
            return Err(Rejection::InvalidCard);
        }

        board.discard_from(&mut player.hand, index);
        player.clear_selection();
        player.decide(TurnOutcome::Played);
        self.prompt = Prompt::Idle;
        Ok(())
    }

    pub(crate) fn draw_card(&mut self) -> Result<(), Rejection> {
        self.interactive_turn()?;
        let Table {
            board, players, ..
        } = self;
        let player = &mut players[INTERACTIVE_SEAT];
        if player.has_drawn() {
            return Err(Rejection::AlreadyDrawn);
        }
        // An empty draw pile still counts as having drawn, so the turn can be passed.
        board.deal_to(&mut player.hand, 1);
        player.mark_drawn();
        // Only the drawn card may be played from here on.
        player.clear_selection();
        Ok(())
    }

    pub(crate) fn pass(&mut self) -> Result<(), Rejection> {
        let player = self.interactive_turn()?;
        if !player.has_drawn() {
            return Err(Rejection::MustDrawBeforePassing);
        }
        player.decide(TurnOutcome::Passed);
        self.prompt = Prompt::Idle;
        Ok(())
    }

    pub(crate) fn choose_color(&mut self, color: CardColor) -> Result<(), Rejection> {
        if self.prompt != Prompt::ChooseColor {
            return Err(Rejection::NoColorRequested);
        }
        self.board.declare_color(color);
        self.prompt = Prompt::Idle;
        Ok(())
    }

    pub(crate) fn clear_interactive_selection(&mut self) {
        if let Some(player) = self.players.get_mut(INTERACTIVE_SEAT) {
            player.clear_selection();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{card::ColoredCard, sink::Silence};
    use rand::{rngs::StdRng, SeedableRng};

    fn number(color: CardColor, number: u8) -> Card {
        Card::Colored(color, ColoredCard::Number(number))
    }

    /// A full 108 card table: hands as given, `top` on the discard pile, the rest in the draw pile.
    fn table_with(hands: Vec<Vec<Card>>, top: Card, current: usize, interactive: bool) -> Table {
        let mut draw = Pile::full_deck();
        let mut remove = |card: &Card| {
            let index = draw.iter().position(|x| x == card).unwrap();
            draw.take(index).unwrap();
        };
        remove(&top);
        hands.iter().flatten().for_each(|card| remove(card));

        let players = hands
            .into_iter()
            .enumerate()
            .map(|(seat, cards)| {
                let mut player = if seat == INTERACTIVE_SEAT && interactive {
                    Player::interactive(seat)
                } else {
                    Player::automated(seat, seat as u64)
                };
                player.hand.extend(cards);
                player
            })
            .collect::<Vec<_>>();
        let seats = players.len();

        Table::from_parts(
            Board::from_piles(
                draw,
                Pile::with_cards(PileRole::Discard, vec![top]),
                Box::new(Silence),
            ),
            players,
            TurnController::new(seats, current),
        )
    }

    fn four_hands() -> Vec<Vec<Card>> {
        vec![
            vec![number(CardColor::Red, 1), number(CardColor::Blue, 2)],
            vec![number(CardColor::Green, 3)],
            vec![number(CardColor::Yellow, 4)],
            vec![number(CardColor::Yellow, 5)],
        ]
    }

    #[test]
    fn deal_fills_hands_and_keeps_every_card() {
        let mut table = Table::new(Box::new(Silence));
        let mut rng = StdRng::seed_from_u64(11);

        table.deal(&mut rng, &[7, 3, 7, 3], false);

        let sizes = table.players().iter().map(Player::cards_count).collect::<Vec<_>>();
        assert_eq!(sizes, vec![7, 3, 7, 3]);
        assert_eq!(table.board().discard_pile().len(), 1);
        assert_eq!(table.card_count(), TOTAL_CARDS_IN_DECK);
        assert!(!table.players()[0].is_automated());
        assert!(table.players()[1].is_automated());
        assert!(table.current_seat().unwrap() < 4);
        assert_eq!(table.direction(), Direction::Clockwise);
    }

    #[test]
    fn opening_draw_four_is_reshuffled_away() {
        let mut deck = Pile::full_deck();
        let index = deck.iter().position(|card| *card == Card::WildDraw).unwrap();
        let draw_four = deck.take(index).unwrap();
        deck.push(draw_four);
        assert_eq!(deck.top(), Some(&Card::WildDraw));

        let mut board = Board::from_piles(deck, Pile::new(PileRole::Discard), Box::new(Silence));
        board.seed_discard(&mut StdRng::seed_from_u64(5));

        assert_ne!(board.discard_pile().top(), Some(&Card::WildDraw));
        assert_eq!(board.discard_pile().len(), 1);
        assert_eq!(board.card_count(), TOTAL_CARDS_IN_DECK);
    }

    #[test]
    fn opening_guard_gives_up_when_only_draw_fours_remain() {
        let mut board = Board::from_piles(
            Pile::with_cards(PileRole::Draw, vec![Card::WildDraw, Card::WildDraw]),
            Pile::new(PileRole::Discard),
            Box::new(Silence),
        );
        board.seed_discard(&mut StdRng::seed_from_u64(5));
        assert_eq!(board.discard_pile().top(), Some(&Card::WildDraw));
        assert_eq!(board.card_count(), 2);
    }

    #[test]
    fn reseed_returns_all_but_the_top_and_exposes_a_new_one() {
        let old_top = number(CardColor::Blue, 9);
        let mut board = Board::from_piles(
            Pile::new(PileRole::Draw),
            Pile::with_cards(
                PileRole::Discard,
                vec![
                    number(CardColor::Red, 1),
                    number(CardColor::Red, 2),
                    number(CardColor::Red, 3),
                    old_top,
                ],
            ),
            Box::new(Silence),
        );
        board.declare_color(CardColor::Green);

        assert!(board.reseed(&mut StdRng::seed_from_u64(1)));

        assert_eq!(board.draw_pile().len(), 2);
        assert_eq!(board.discard_pile().len(), 2);
        assert_eq!(board.discard_pile().cards()[0], old_top);
        assert_eq!(board.declared_color(), None);
        assert_eq!(board.card_count(), 4);
    }

    #[test]
    fn reseed_without_spare_cards_does_nothing() {
        let mut board = Board::from_piles(
            Pile::new(PileRole::Draw),
            Pile::with_cards(PileRole::Discard, vec![Card::Wild]),
            Box::new(Silence),
        );
        assert!(!board.reseed(&mut StdRng::seed_from_u64(1)));
        assert_eq!(board.discard_pile().len(), 1);
    }

    #[test]
    fn draw_two_charges_the_next_seat_not_the_one_after() {
        let mut table = table_with(
            four_hands(),
            Card::Colored(CardColor::Red, ColoredCard::DrawTwo),
            0,
            false,
        );

        table.apply_played();
        table.finish_turn(0);

        assert_eq!(table.players()[1].cards_count(), 3);
        assert_eq!(table.players()[2].cards_count(), 1);
        assert_eq!(table.current_seat(), Some(2));
        assert_eq!(table.card_count(), TOTAL_CARDS_IN_DECK);
    }

    #[test]
    fn draw_four_counter_clockwise_charges_the_previous_seat() {
        let mut table = table_with(
            four_hands(),
            Card::Colored(CardColor::Green, ColoredCard::Reverse),
            0,
            false,
        );
        table.apply_played();
        table.finish_turn(0);
        assert_eq!(table.direction(), Direction::CounterClockwise);
        assert_eq!(table.current_seat(), Some(3));

        let draw_pile = &mut table.board.draw_pile;
        let index = draw_pile.iter().position(|card| *card == Card::WildDraw).unwrap();
        let draw_four = draw_pile.take(index).unwrap();
        table.board.discard_pile.push(draw_four);
        table.board.declare_color(CardColor::Red);
        table.apply_played();
        table.finish_turn(3);

        assert_eq!(table.players()[2].cards_count(), 5);
        assert_eq!(table.current_seat(), Some(1));
        assert_eq!(table.card_count(), TOTAL_CARDS_IN_DECK);
    }

    #[test]
    fn two_player_reverse_behaves_like_skip() {
        let hands = || {
            vec![
                vec![number(CardColor::Red, 1)],
                vec![number(CardColor::Green, 3)],
            ]
        };
        let mut reversed = table_with(
            hands(),
            Card::Colored(CardColor::Red, ColoredCard::Reverse),
            0,
            false,
        );
        let mut skipped = table_with(
            hands(),
            Card::Colored(CardColor::Red, ColoredCard::Skip),
            0,
            false,
        );

        reversed.apply_played();
        reversed.finish_turn(0);
        skipped.apply_played();
        skipped.finish_turn(0);

        assert_eq!(reversed.current_seat(), Some(0));
        assert_eq!(reversed.current_seat(), skipped.current_seat());
        assert_eq!(reversed.direction(), Direction::Clockwise);
    }

    #[test]
    fn four_player_reverse_flips_direction_and_steps_once() {
        let mut table = table_with(
            four_hands(),
            Card::Colored(CardColor::Red, ColoredCard::Reverse),
            2,
            false,
        );

        table.apply_played();
        table.finish_turn(2);

        assert_eq!(table.direction(), Direction::CounterClockwise);
        assert_eq!(table.current_seat(), Some(1));
    }

    #[test]
    fn opening_draw_two_charges_and_skips_the_starting_seat() {
        let mut table = table_with(
            four_hands(),
            Card::Colored(CardColor::Blue, ColoredCard::DrawTwo),
            1,
            false,
        );

        table.apply_opening();

        assert_eq!(table.players()[1].cards_count(), 3);
        assert_eq!(table.current_seat(), Some(2));
    }

    #[test]
    fn opening_reverse_flips_and_passes_the_turn() {
        let mut table = table_with(
            four_hands(),
            Card::Colored(CardColor::Blue, ColoredCard::Reverse),
            1,
            false,
        );

        table.apply_opening();

        assert_eq!(table.direction(), Direction::CounterClockwise);
        assert_eq!(table.current_seat(), Some(0));
    }

    #[test]
    fn opening_number_card_changes_nothing() {
        let mut table = table_with(four_hands(), number(CardColor::Blue, 7), 3, false);
        table.apply_opening();
        assert_eq!(table.current_seat(), Some(3));
        assert_eq!(table.direction(), Direction::Clockwise);
    }

    #[test]
    fn needs_color_only_for_an_undeclared_wild() {
        let mut table = table_with(four_hands(), Card::Wild, 0, false);
        assert!(table.needs_color(0));
        table.board.declare_color(CardColor::Blue);
        assert!(!table.needs_color(0));

        let table = table_with(four_hands(), number(CardColor::Blue, 7), 0, false);
        assert!(!table.needs_color(0));
    }

    #[test]
    fn interactive_moves_are_rejected_outside_the_turn_prompt() {
        let mut table = table_with(four_hands(), number(CardColor::Red, 7), 0, true);
        assert_eq!(table.select_card(0), Err(Rejection::NotYourTurn));
        assert_eq!(table.draw_card(), Err(Rejection::NotYourTurn));
        assert_eq!(table.choose_color(CardColor::Red), Err(Rejection::NoColorRequested));
        assert_eq!(table.choose_mode(2), Err(Rejection::NoModeRequested));
    }

    #[test]
    fn interactive_discard_checks_playability() {
        let mut table = table_with(four_hands(), number(CardColor::Red, 7), 0, true);
        table.set_prompt(Prompt::TakeTurn);

        assert_eq!(table.discard_selected(), Err(Rejection::NothingSelected));

        table.select_card(1).unwrap();
        assert_eq!(table.discard_selected(), Err(Rejection::InvalidCard));

        table.select_card(0).unwrap();
        table.discard_selected().unwrap();

        assert_eq!(table.prompt(), Prompt::Idle);
        assert_eq!(table.take_decision(0), Some(TurnOutcome::Played));
        assert_eq!(
            table.board().top().map(|top| top.card()),
            Some(number(CardColor::Red, 1))
        );
        assert_eq!(table.players()[0].cards_count(), 1);
    }

    #[test]
    fn interactive_draw_once_then_pass() {
        let mut table = table_with(four_hands(), number(CardColor::Green, 7), 0, true);
        table.set_prompt(Prompt::TakeTurn);

        assert_eq!(table.pass(), Err(Rejection::MustDrawBeforePassing));
        table.draw_card().unwrap();
        assert_eq!(table.players()[0].cards_count(), 3);
        assert_eq!(table.draw_card(), Err(Rejection::AlreadyDrawn));
        assert_eq!(table.select_card(0), Err(Rejection::NotTheDrawnCard));
        table.select_card(2).unwrap();

        table.pass().unwrap();
        assert_eq!(table.take_decision(0), Some(TurnOutcome::Passed));
        assert_eq!(table.card_count(), TOTAL_CARDS_IN_DECK);
    }

    #[test]
    fn selection_made_before_drawing_cannot_be_played() {
        let mut table = table_with(four_hands(), number(CardColor::Red, 7), 0, true);
        table.set_prompt(Prompt::TakeTurn);

        table.select_card(0).unwrap();
        table.draw_card().unwrap();
        assert_eq!(table.players()[0].selected(), None);
        assert_eq!(table.discard_selected(), Err(Rejection::NothingSelected));

        // Even a stale marker left on an earlier card is refused.
        table.get_player_mut(0).unwrap().select(0);
        assert_eq!(table.discard_selected(), Err(Rejection::NotTheDrawnCard));
        assert_eq!(table.players()[0].selected(), None);
        assert_eq!(
            table.board().top().map(|top| top.card()),
            Some(number(CardColor::Red, 7))
        );
        assert_eq!(table.players()[0].cards_count(), 3);
        assert_eq!(table.prompt(), Prompt::TakeTurn);
        assert_eq!(table.card_count(), TOTAL_CARDS_IN_DECK);
    }

    #[test]
    fn interactive_wild_draw_four_obeys_the_color_rule() {
        let hands = vec![
            vec![Card::WildDraw, number(CardColor::Red, 1)],
            vec![number(CardColor::Green, 3)],
        ];
        let mut table = table_with(hands, number(CardColor::Red, 7), 0, true);
        table.set_prompt(Prompt::TakeTurn);

        table.select_card(0).unwrap();
        assert_eq!(table.discard_selected(), Err(Rejection::InvalidCard));
        assert_eq!(table.players()[0].selected(), None);
    }

    #[test]
    fn color_choice_is_accepted_when_requested() {
        let mut table = table_with(four_hands(), Card::Wild, 0, true);
        table.set_prompt(Prompt::ChooseColor);
        table.choose_color(CardColor::Yellow).unwrap();
        assert_eq!(table.board().declared_color(), Some(CardColor::Yellow));
        assert_eq!(table.prompt(), Prompt::Idle);
    }
}
