use std::io::{self, Write};

use runo::{
    player::Seat,
    sink::{AudioSink, HandView, Presenter, Snapshot, Sound},
    uno::{GamePhase, Prompt},
};
use tracing::warn;

/// Prints the table to stdout. The human's hand is listed with the indices `select` expects,
/// everyone else only shows a card count.
pub struct TerminalPresenter;

impl TerminalPresenter {
    fn hand_line(hand: &HandView) -> String {
        match hand.kind {
            Seat::Interactive => {
                let cards = hand
                    .cards
                    .iter()
                    .enumerate()
                    .map(|(index, card)| {
                        if hand.selected == Some(index) {
                            format!("[{index}: {card}]")
                        } else {
                            format!("{index}: {card}")
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("  You (seat {}): {cards}", hand.seat)
            }
            Seat::Automated => format!("  Seat {}: {} cards", hand.seat, hand.cards.len()),
        }
    }

    fn prompt_line(snapshot: &Snapshot) -> Option<&'static str> {
        match snapshot.prompt {
            Prompt::Idle => None,
            Prompt::ChooseMode => Some("Pick a mode: `mode 2` or `mode 4`"),
            Prompt::TakeTurn => {
                let drawn = snapshot
                    .hands
                    .iter()
                    .find(|hand| hand.kind == Seat::Interactive)
                    .map_or(false, |hand| hand.has_drawn);
                if drawn {
                    Some("Your turn: `select` the drawn card and `discard` it, or `pass`")
                } else {
                    Some("Your turn: `select` and `discard` a card, or `draw`")
                }
            }
            Prompt::ChooseColor => Some("Name a color: `color red|yellow|green|blue`"),
        }
    }
}

impl Presenter for TerminalPresenter {
    fn render(&self, snapshot: &Snapshot) {
        if snapshot.phase == GamePhase::AwaitingModeSelection {
            if let Some(prompt) = Self::prompt_line(snapshot) {
                println!("{prompt}");
            }
            return;
        }

        let mut out = String::new();
        if let Some(top) = snapshot.top {
            out.push_str(&format!(
                "Top: {top} | draw pile: {} | going {}\n",
                snapshot.draw_pile_len, snapshot.direction
            ));
        }
        for hand in &snapshot.hands {
            let marker = if snapshot.current_seat == Some(hand.seat) {
                ">"
            } else {
                " "
            };
            out.push_str(marker);
            out.push_str(&Self::hand_line(hand));
            out.push('\n');
        }
        if let Some(prompt) = Self::prompt_line(snapshot) {
            out.push_str(prompt);
            out.push('\n');
        }
        println!("{out}");
    }

    fn show_message(&self, message: &str) {
        println!("! {message}");
    }

    fn game_over(&self, winner: usize) {
        println!("*** Seat {winner} wins! ***");
    }
}

/// Rings the terminal bell for every card played or drawn.
pub struct BellAudio {
    enabled: bool,
}

impl BellAudio {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl AudioSink for BellAudio {
    fn play(&mut self, sound: Sound) {
        if !self.enabled {
            return;
        }
        let mut stdout = io::stdout().lock();
        if let Err(error) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
            warn!(?sound, %error, "could not ring the bell");
        }
    }
}
