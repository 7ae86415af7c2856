use std::{
    io,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    thread::{self, JoinHandle},
};

use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info, warn};

pub use crate::table::{GamePhase, Prompt};
use crate::{
    card::CardColor,
    config::Config,
    constants::deal_sizes,
    error::{Result, UnoError},
    gate::Gate,
    player::Player,
    sink::{AudioSink, Presenter, Snapshot},
    table::Table,
    turn::TurnOutcome,
};

/// Everything the front end can tell the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    ModeChosen(usize),
    /// Index into the human's hand.
    CardClicked(usize),
    DrawPileClicked,
    DiscardPileClicked,
    PassClicked,
    ColorChosen(CardColor),
}

struct Shared {
    table: Mutex<Table>,
    gate: Gate,
    presenter: Arc<dyn Presenter>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Table> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn render(&self, table: &Table) {
        self.presenter.render(&table.snapshot());
    }
}

/// The game-logic side. Runs one game after another on whichever thread calls [`Uno::run`],
/// usually the one started by [`Uno::spawn`].
pub struct Uno {
    shared: Arc<Shared>,
    rng: StdRng,
    config: Config,
}

impl Uno {
    pub fn new(config: Config, presenter: Arc<dyn Presenter>, audio: Box<dyn AudioSink>) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            shared: Arc::new(Shared {
                table: Mutex::new(Table::new(audio)),
                gate: Gate::new(),
                presenter,
            }),
            rng,
            config,
        }
    }

    pub fn handle(&self) -> UnoHandle {
        UnoHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Starts the game-logic thread. It never returns on its own.
    pub fn spawn(mut self) -> io::Result<(JoinHandle<()>, UnoHandle)> {
        let handle = self.handle();
        let thread = thread::Builder::new()
            .name("game-logic".to_string())
            .spawn(move || self.run())?;
        Ok((thread, handle))
    }

    pub fn run(&mut self) {
        loop {
            self.run_once();
        }
    }

    /// Waits for a mode, plays that game to the end and resets. Returns the winning seat.
    pub fn run_once(&mut self) -> usize {
        loop {
            let seats = self.await_mode_selection();
            match self.play_game(seats) {
                Ok(winner) => {
                    self.shared.presenter.game_over(winner);
                    self.reset();
                    return winner;
                }
                Err(error) => {
                    warn!(%error, "could not start a game");
                    self.shared.presenter.show_message(&error.to_string());
                }
            }
        }
    }

    /// Deals a game for `seats` players and cycles turns until someone empties their hand.
    pub fn play_game(&mut self, seats: usize) -> Result<usize> {
        self.setup(seats)?;
        self.round_one();
        self.shared.lock().set_phase(GamePhase::Cycling);

        loop {
            if let Some(winner) = self.cycle_once() {
                info!(winner, "game finished");
                return Ok(winner);
            }
        }
    }

    fn await_mode_selection(&mut self) -> usize {
        self.shared
            .lock()
            .set_phase(GamePhase::AwaitingModeSelection);
        let seats = self.wait_for(Prompt::ChooseMode, Table::take_requested_seats);
        info!(seats, "mode selected");
        seats
    }

    fn setup(&mut self, seats: usize) -> Result<()> {
        let deal = deal_sizes(seats).ok_or(UnoError::InvalidSeatCount(seats))?;

        let mut table = self.shared.lock();
        table.set_phase(GamePhase::Setup);
        table.deal(&mut self.rng, deal, self.config.autoplay);
        info!(
            seats,
            starting_seat = ?table.current_seat(),
            top = ?table.board().top(),
            "cards dealt"
        );
        self.shared.render(&table);
        Ok(())
    }

    /// Resolves a freshly exposed discard top against the seat whose turn it is.
    fn round_one(&mut self) {
        let Some(seat) = self.shared.lock().current_seat() else {
            return;
        };
        self.pick_color(seat);

        let mut table = self.shared.lock();
        table.apply_opening();
        self.shared.render(&table);
    }

    fn cycle_once(&mut self) -> Option<usize> {
        let seat = self.shared.lock().current_seat()?;
        let outcome = self.take_turn(seat);
        debug!(seat, ?outcome, "turn taken");

        if outcome == TurnOutcome::Played {
            self.pick_color(seat);
            self.shared.lock().apply_played();
        }

        let reseeded = {
            let mut table = self.shared.lock();
            table.finish_turn(seat);
            let reseeded =
                table.board().draw_pile().is_empty() && table.board_mut().reseed(&mut self.rng);
            self.shared.render(&table);
            reseeded
        };
        if reseeded {
            self.round_one();
        }

        let mut table = self.shared.lock();
        table.check_conservation();
        let won = table
            .get_player(seat)
            .map_or(false, |player| player.cards_count() == 0);
        if !won {
            return None;
        }

        table.set_phase(GamePhase::Finished { winner: seat });
        self.shared.render(&table);
        Some(seat)
    }

    fn take_turn(&mut self, seat: usize) -> TurnOutcome {
        let automated = self
            .shared
            .lock()
            .get_player(seat)
            .map_or(true, Player::is_automated);
        if automated && !self.config.cpu_delay.is_zero() {
            thread::sleep(self.config.cpu_delay);
        }

        let mut table = self.shared.lock();
        if let Some(outcome) = table.play(seat) {
            self.shared.render(&table);
            return outcome;
        }
        drop(table);

        self.wait_for(Prompt::TakeTurn, |table| table.take_decision(seat))
    }

    /// Has `seat` name a color for the wild it left on the discard pile.
    fn pick_color(&mut self, seat: usize) {
        let mut table = self.shared.lock();
        if !table.needs_color(seat) {
            return;
        }
        let Some(player) = table.get_player(seat) else {
            return;
        };

        if player.is_automated() {
            let color = player.automated_color();
            table.board_mut().declare_color(color);
            debug!(seat, %color, "color declared");
            self.shared.render(&table);
            return;
        }
        drop(table);

        let color = self.wait_for(Prompt::ChooseColor, |table| table.board().declared_color());
        debug!(seat, %color, "color declared");
    }

    /// Parks this thread on the gate until `take` finds what the front end was asked for.
    fn wait_for<T>(&self, prompt: Prompt, mut take: impl FnMut(&mut Table) -> Option<T>) -> T {
        let mut table = self.shared.lock();
        loop {
            if let Some(value) = take(&mut table) {
                table.set_prompt(Prompt::Idle);
                return value;
            }

            table.set_prompt(prompt);
            self.shared.render(&table);
            drop(table);

            self.shared.gate.wait();
            table = self.shared.lock();
        }
    }

    fn reset(&mut self) {
        let mut table = self.shared.lock();
        table.reset();
        self.shared.render(&table);
    }
}

/// The front end's way in. Cheap to clone and safe to use from any thread.
#[derive(Clone)]
pub struct UnoHandle {
    shared: Arc<Shared>,
}

impl UnoHandle {
    /// Applies one input event. Refused events leave the game-logic thread parked and are reported
    /// to the presenter as well as returned.
    pub fn handle(&self, event: InputEvent) -> Result<()> {
        let mut table = self.shared.lock();

        match Self::apply(&mut table, event) {
            Ok(wake) => {
                self.shared.render(&table);
                drop(table);
                if wake {
                    self.shared.gate.release();
                }
                Ok(())
            }
            Err(error) => {
                table.clear_interactive_selection();
                self.shared.render(&table);
                drop(table);
                debug!(?event, %error, "input refused");
                self.shared.presenter.show_message(&error.to_string());
                Err(error)
            }
        }
    }

    /// Returns whether the game-logic thread should be woken.
    fn apply(table: &mut Table, event: InputEvent) -> Result<bool> {
        match event {
            InputEvent::ModeChosen(seats) => {
                if deal_sizes(seats).is_none() {
                    return Err(UnoError::InvalidSeatCount(seats));
                }
                table.choose_mode(seats)?;
                Ok(true)
            }
            InputEvent::CardClicked(index) => {
                table.select_card(index)?;
                Ok(false)
            }
            InputEvent::DrawPileClicked => {
                table.draw_card()?;
                Ok(false)
            }
            InputEvent::DiscardPileClicked => {
                table.discard_selected()?;
                Ok(true)
            }
            InputEvent::PassClicked => {
                table.pass()?;
                Ok(true)
            }
            InputEvent::ColorChosen(color) => {
                table.choose_color(color)?;
                Ok(true)
            }
        }
    }

    pub fn choose_mode(&self, seats: usize) -> Result<()> {
        self.handle(InputEvent::ModeChosen(seats))
    }

    pub fn click_card(&self, index: usize) -> Result<()> {
        self.handle(InputEvent::CardClicked(index))
    }

    pub fn click_draw_pile(&self) -> Result<()> {
        self.handle(InputEvent::DrawPileClicked)
    }

    pub fn click_discard_pile(&self) -> Result<()> {
        self.handle(InputEvent::DiscardPileClicked)
    }

    pub fn click_pass(&self) -> Result<()> {
        self.handle(InputEvent::PassClicked)
    }

    pub fn choose_color(&self, color: CardColor) -> Result<()> {
        self.handle(InputEvent::ColorChosen(color))
    }

    pub fn snapshot(&self) -> Snapshot {
        self.shared.lock().snapshot()
    }

    /// Direct access to the table, for tooling and tests. Holding the guard blocks both the
    /// game-logic thread and every handler, so keep it short and never call
    /// [`UnoHandle::handle`] while holding it.
    #[doc(hidden)]
    pub fn table(&self) -> MutexGuard<'_, Table> {
        self.shared.lock()
    }
}
