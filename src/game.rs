use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::card::Card;
use crate::deck::{Deck, Mode, Resolution};

/// Single flips allowed before the game is lost.
pub const FLIP_BUDGET: u32 = 300;
/// Ticks between face-down sweeps.
pub const SWEEP_INTERVAL: u64 = 25;

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

impl Outcome {
    pub fn message(self) -> &'static str {
        match self {
            Outcome::Won => "You won :)",
            Outcome::Lost => "You lost!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Playing,
    Ended(Outcome),
}

/// Everything a presentation layer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub cards: Vec<Card>,
    pub matches_remaining: u8,
    pub flip_count: u32,
    pub flips_left: u32,
    pub clock: u64,
    pub click_count: u64,
    pub mode: Mode,
    pub status: Status,
}

/// One game of Concentration: a deck plus the clock and click counters.
///
/// The presentation layer feeds it ticks, pointer releases and key presses and
/// draws from [`Game::snapshot`].
pub struct Game {
    deck: Deck,
    /// Source of the per-deck generators; never used to draw cards itself.
    dealer: SmallRng,
    clock: u64,
    click_count: u64,
    status: Status,
}

impl Game {
    /// Start a game. With a seed, every deal of this game is reproducible.
    pub fn new(seed: Option<u64>, mode: Mode) -> Self {
        let mut dealer = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        let deck = Deck::deal(SmallRng::from_rng(&mut dealer), mode);
        info!(?seed, mode = mode.name(), "new game");
        Game {
            deck,
            dealer,
            clock: 0,
            click_count: 0,
            status: Status::Playing,
        }
    }

    /// Start a game around an already prepared deck.
    #[cfg(test)]
    pub(crate) fn with_deck(deck: Deck) -> Self {
        Game {
            deck,
            dealer: SmallRng::seed_from_u64(0),
            clock: 0,
            click_count: 0,
            status: Status::Playing,
        }
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Advance the clock; every [`SWEEP_INTERVAL`] ticks turn all cards down.
    pub fn on_tick(&mut self) {
        self.clock += 1;
        if self.clock % SWEEP_INTERVAL == 0 {
            debug!(clock = self.clock, "sweep");
            self.deck.reset_faces();
        }
    }

    /// Flip the card under `(x, y)`, settle the pair and check for the end.
    ///
    /// Ignored once the game has ended.
    pub fn on_pointer_release(&mut self, x: i32, y: i32) {
        if self.is_ended() {
            return;
        }

        self.deck.flip(x, y);
        if self.deck.resolve_match() == Resolution::Matched {
            info!(remaining = self.deck.matches_remaining(), "match");
        }

        if self.deck.matches_remaining() == 0 {
            self.finish(Outcome::Won);
        } else if self.deck.flip_count() > FLIP_BUDGET {
            self.finish(Outcome::Lost);
        }
        self.click_count += 1;
    }

    /// `r` deals again in the current mode, `1` switches to normal and `2` to
    /// hard mode. Other keys are ignored.
    pub fn on_key_press(&mut self, key: &str) {
        match key {
            "r" => self.restart(self.deck.mode()),
            "1" => self.restart(Mode::Normal),
            "2" => self.restart(Mode::Hard),
            _ => {}
        }
    }

    fn restart(&mut self, mode: Mode) {
        self.deck = Deck::deal(SmallRng::from_rng(&mut self.dealer), mode);
        self.clock = 0;
        self.click_count = 0;
        self.status = Status::Playing;
        info!(mode = mode.name(), "deck reset");
    }

    fn finish(&mut self, outcome: Outcome) {
        self.status = Status::Ended(outcome);
        info!(
            ?outcome,
            flips = self.deck.flip_count(),
            clock = self.clock,
            "game over"
        );
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    #[allow(dead_code)]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn clock(&self) -> u64 {
        self.clock
    }

    pub fn click_count(&self) -> u64 {
        self.click_count
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_ended(&self) -> bool {
        self.end_reason().is_some()
    }

    pub fn end_reason(&self) -> Option<Outcome> {
        match self.status {
            Status::Ended(outcome) => Some(outcome),
            Status::Playing => None,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            cards: self.deck.cards().cloned().collect(),
            matches_remaining: self.deck.matches_remaining(),
            flip_count: self.deck.flip_count(),
            flips_left: FLIP_BUDGET.saturating_sub(self.deck.flip_count()),
            clock: self.clock,
            click_count: self.click_count,
            mode: self.deck.mode(),
            status: self.status(),
        }
    }
}
