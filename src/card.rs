use serde::{Deserialize, Serialize};

use crate::layout::{COLS, Position, ROWS};

/// The four French suits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Clubs,
    Spades,
    Diamonds,
}

impl Suit {
    /// All four suits, in dealing order.
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Clubs, Suit::Spades, Suit::Diamonds];

    /// Glyph used when rendering a face-up card.
    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Hearts => "♥",
            Suit::Clubs => "♣",
            Suit::Spades => "♠",
            Suit::Diamonds => "♦",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Suit::Hearts | Suit::Diamonds => Color::Red,
            Suit::Clubs | Suit::Spades => Color::Black,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Black,
}

/// Highest rank (king). Ranks run 1..=MAX_RANK.
pub const MAX_RANK: u8 = 13;

const RANK_LABELS: [&str; MAX_RANK as usize] = [
    "A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K",
];

/// A dealt card. Suit, rank and position never change; only the face flips.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CardFields")]
pub struct Card {
    suit: Suit,
    rank: u8,
    face_up: bool,
    position: Position,
}

/// Wire form of a [`Card`], checked before it becomes one.
#[derive(Deserialize)]
struct CardFields {
    suit: Suit,
    rank: u8,
    face_up: bool,
    position: Position,
}

impl TryFrom<CardFields> for Card {
    type Error = String;

    fn try_from(fields: CardFields) -> Result<Self, Self::Error> {
        if !(1..=MAX_RANK).contains(&fields.rank) {
            return Err(format!("rank {} out of range (1–{})", fields.rank, MAX_RANK));
        }
        let pos = fields.position;
        if pos.row as usize >= ROWS || pos.col as usize >= COLS {
            return Err(format!("position ({}, {}) is off the board", pos.row, pos.col));
        }
        Ok(Card {
            suit: fields.suit,
            rank: fields.rank,
            face_up: fields.face_up,
            position: pos,
        })
    }
}

impl Card {
    pub fn new(suit: Suit, rank: u8, face_up: bool, position: Position) -> Self {
        debug_assert!((1..=MAX_RANK).contains(&rank), "rank {rank} out of range");
        Card {
            suit,
            rank,
            face_up,
            position,
        }
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    pub fn rank(&self) -> u8 {
        self.rank
    }

    pub fn is_face_up(&self) -> bool {
        self.face_up
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn color(&self) -> Color {
        self.suit.color()
    }

    /// Rank label: "A", "2".."10", "J", "Q", "K".
    pub fn rank_label(&self) -> &'static str {
        RANK_LABELS[self.rank as usize - 1]
    }

    /// Rank label followed by the suit glyph, e.g. "10♦".
    pub fn label(&self) -> String {
        format!("{}{}", self.rank_label(), self.suit.symbol())
    }

    pub(crate) fn set_face_up(&mut self, face_up: bool) {
        self.face_up = face_up;
    }
}

/// Every (suit, rank) pair of a standard deck, suit-major.
pub fn full_deck() -> Vec<(Suit, u8)> {
    let mut deck = Vec::with_capacity(Suit::ALL.len() * MAX_RANK as usize);

    for &suit in &Suit::ALL {
        for rank in 1..=MAX_RANK {
            deck.push((suit, rank));
        }
    }

    debug_assert_eq!(deck.len(), 52, "Deck must have exactly 52 cards");
    deck
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn red_and_black_suits() {
        assert_eq!(Suit::Hearts.color(), Color::Red);
        assert_eq!(Suit::Diamonds.color(), Color::Red);
        assert_eq!(Suit::Clubs.color(), Color::Black);
        assert_eq!(Suit::Spades.color(), Color::Black);
    }

    #[test]
    fn labels() {
        let pos = Position::from_index(0);
        assert_eq!(Card::new(Suit::Hearts, 1, false, pos).label(), "A♥");
        assert_eq!(Card::new(Suit::Diamonds, 10, false, pos).label(), "10♦");
        assert_eq!(Card::new(Suit::Spades, 13, false, pos).rank_label(), "K");
        assert_eq!(Card::new(Suit::Clubs, 11, false, pos).rank_label(), "J");
    }

    #[test]
    fn full_deck_has_each_card_once() {
        let deck = full_deck();
        assert_eq!(deck.len(), 52);
        assert_eq!(deck.iter().collect::<HashSet<_>>().len(), 52);
        assert_eq!(deck[0], (Suit::Hearts, 1));
        assert_eq!(deck[51], (Suit::Diamonds, 13));
    }

    #[test]
    fn deserialize_checks_rank_and_position() {
        let card = Card::new(Suit::Spades, 12, true, Position::from_index(40));
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(serde_json::from_value::<Card>(json.clone()).unwrap(), card);

        for rank in [0, 14, 255] {
            let mut bad = json.clone();
            bad["rank"] = rank.into();
            assert!(serde_json::from_value::<Card>(bad).is_err(), "rank {rank} accepted");
        }

        let mut off_board = json.clone();
        off_board["position"]["col"] = 13.into();
        assert!(serde_json::from_value::<Card>(off_board).is_err());
        let mut off_board = json;
        off_board["position"]["row"] = 4.into();
        assert!(serde_json::from_value::<Card>(off_board).is_err());
    }

    #[test]
    fn only_the_face_flag_changes() {
        let mut card = Card::new(Suit::Clubs, 7, false, Position::from_index(3));
        card.set_face_up(true);
        assert!(card.is_face_up());
        assert_eq!(card.suit(), Suit::Clubs);
        assert_eq!(card.rank(), 7);
        assert_eq!(card.position(), Position::from_index(3));
    }
}
