use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::card::{Card, full_deck};
use crate::layout::{self, CELLS, Position};

/// Number of pairs in a full deck.
pub const PAIRS: u8 = 26;

/// Difficulty, fixed for the life of a deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Same rank, different suit.
    #[default]
    Normal,
    /// Same rank, different suit, same color.
    Hard,
}

impl Mode {
    pub fn name(self) -> &'static str {
        match self {
            Mode::Normal => "easy",
            Mode::Hard => "hard",
        }
    }

    /// Whether `a` and `b` score a pair under this mode.
    ///
    /// The suits must differ, so a card never pairs with itself.
    pub fn is_pair(self, a: &Card, b: &Card) -> bool {
        let same_rank = a.rank() == b.rank() && a.suit() != b.suit();
        match self {
            Mode::Normal => same_rank,
            Mode::Hard => same_rank && a.color() == b.color(),
        }
    }
}

/// Result of [`Deck::resolve_match`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Fewer than two cards are selected.
    Incomplete,
    /// The pair was removed from play.
    Matched,
    /// The pair stays face-up until the next sweep.
    Mismatched,
}

/// Shuffle a full deck into board order.
///
/// Cards are drawn one at a time uniformly from the shrinking pool and laid
/// down in row-major cell order, so the same draws always give the same board.
pub fn build_shuffled_deck<R: Rng + ?Sized>(rng: &mut R) -> Vec<Card> {
    let mut pool = full_deck();
    let mut dealt = Vec::with_capacity(pool.len());

    for index in 0..CELLS {
        let (suit, rank) = pool.remove(rng.random_range(0..pool.len()));
        dealt.push(Card::new(suit, rank, false, Position::from_index(index)));
    }

    debug_assert!(pool.is_empty());
    dealt
}

/// The cards in play, the current selection and the game counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    /// One slot per board cell; `None` once the card there has been matched.
    cells: Vec<Option<Card>>,
    /// Cell indices of face-up cards awaiting resolution, at most two.
    selected: Vec<usize>,
    matches_remaining: u8,
    flip_count: u32,
    mode: Mode,
}

impl Deck {
    // -------------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------------

    /// Deal a fresh face-down deck. The generator is consumed by the deal.
    pub fn deal<R: Rng>(mut rng: R, mode: Mode) -> Self {
        let cards = build_shuffled_deck(&mut rng);
        Deck {
            cells: cards.into_iter().map(Some).collect(),
            selected: Vec::with_capacity(2),
            matches_remaining: PAIRS,
            flip_count: 0,
            mode,
        }
    }

    /// A deck holding only `cards`, each placed at its own position.
    #[cfg(test)]
    pub(crate) fn from_cards(cards: Vec<Card>, mode: Mode) -> Self {
        assert!(cards.len() % 2 == 0, "Need whole pairs");
        let mut cells = vec![None; CELLS];
        let pairs = (cards.len() / 2) as u8;
        for card in cards {
            let index = card.position().index();
            assert!(cells[index].is_none(), "Two cards share cell {index}");
            cells[index] = Some(card);
        }
        Deck {
            cells,
            selected: Vec::with_capacity(2),
            matches_remaining: pairs,
            flip_count: 0,
            mode,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Cards still in play, in board order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> + '_ {
        self.cells.iter().flatten()
    }

    /// The card at `pos`, unless it has been matched.
    #[allow(dead_code)]
    pub fn card_at(&self, pos: Position) -> Option<&Card> {
        self.cells.get(pos.index()).and_then(Option::as_ref)
    }

    /// The face-up cards awaiting resolution, in the order they were flipped.
    #[allow(dead_code)]
    pub fn selected(&self) -> impl Iterator<Item = &Card> + '_ {
        self.selected
            .iter()
            .filter_map(|&index| self.cells[index].as_ref())
    }

    #[allow(dead_code)]
    pub fn selected_len(&self) -> usize {
        self.selected.len()
    }

    #[allow(dead_code)]
    pub fn in_play(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn matches_remaining(&self) -> u8 {
        self.matches_remaining
    }

    pub fn flip_count(&self) -> u32 {
        self.flip_count
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Turn up the face-down card whose hit box contains `(x, y)`.
    ///
    /// Does nothing when two cards are already selected, when the point misses
    /// every card in play, or when the card there is already face-up.
    /// Returns whether a card was flipped.
    pub fn flip(&mut self, x: i32, y: i32) -> bool {
        if self.selected.len() >= 2 {
            return false;
        }
        let Some(pos) = layout::cell_at(x, y) else {
            return false;
        };
        let index = pos.index();
        let Some(card) = self.cells[index].as_mut() else {
            return false;
        };
        if card.is_face_up() {
            return false;
        }

        card.set_face_up(true);
        self.selected.push(index);
        self.flip_count += 1;
        debug!(card = %card.label(), flips = self.flip_count, "flipped");
        true
    }

    /// Settle the current pair, if there is one.
    ///
    /// A scoring pair leaves play for good; a failed pair stays up and
    /// selected until [`Deck::reset_faces`].
    pub fn resolve_match(&mut self) -> Resolution {
        let [a, b] = self.selected[..] else {
            return Resolution::Incomplete;
        };
        let is_pair = match (self.cells[a].as_ref(), self.cells[b].as_ref()) {
            (Some(first), Some(second)) => self.mode.is_pair(first, second),
            _ => false,
        };
        if !is_pair {
            debug!(first = a, second = b, "no match");
            return Resolution::Mismatched;
        }

        self.cells[a] = None;
        self.cells[b] = None;
        self.matches_remaining -= 1;
        self.selected.clear();
        debug!(remaining = self.matches_remaining, "pair removed");
        Resolution::Matched
    }

    /// Turn every card in play face-down and drop the selection.
    pub fn reset_faces(&mut self) {
        for card in self.cells.iter_mut().flatten() {
            card.set_face_up(false);
        }
        self.selected.clear();
    }
}
