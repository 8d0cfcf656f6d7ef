use serde::{Deserialize, Serialize};

/// Number of board rows.
pub const ROWS: usize = 4;
/// Number of board columns.
pub const COLS: usize = 13;
/// Number of board cells (one per card in a full deck).
pub const CELLS: usize = ROWS * COLS;

/// Center of the top-left cell in board coordinates.
pub const ORIGIN_X: i32 = 30;
pub const ORIGIN_Y: i32 = 90;
/// Distance between neighbouring cell centers.
pub const PITCH_X: i32 = 40;
pub const PITCH_Y: i32 = 70;
/// Half extents of a card's clickable area around its center.
pub const HIT_HALF_WIDTH: i32 = 13;
pub const HIT_HALF_HEIGHT: i32 = 25;

/// A point in board coordinates, the space pointer events are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

/// A board cell, fixed for a card from the moment it is dealt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    /// The cell at a row-major index.
    pub fn from_index(index: usize) -> Self {
        debug_assert!(index < CELLS, "cell index {index} out of range");
        Position {
            row: (index / COLS) as u8,
            col: (index % COLS) as u8,
        }
    }

    /// Row-major index of this cell.
    pub fn index(self) -> usize {
        self.row as usize * COLS + self.col as usize
    }

    /// Center of this cell in board coordinates.
    pub fn center(self) -> Point {
        Point {
            x: ORIGIN_X + self.col as i32 * PITCH_X,
            y: ORIGIN_Y + self.row as i32 * PITCH_Y,
        }
    }
}

/// The cell whose hit box contains `(x, y)`, if any.
///
/// Hit boxes are narrower than the pitch, so at most one cell can qualify.
pub fn cell_at(x: i32, y: i32) -> Option<Position> {
    let col = nearest_slot(x, ORIGIN_X, PITCH_X, HIT_HALF_WIDTH, COLS)?;
    let row = nearest_slot(y, ORIGIN_Y, PITCH_Y, HIT_HALF_HEIGHT, ROWS)?;
    Some(Position {
        row: row as u8,
        col: col as u8,
    })
}

/// Worked in `i64` so any `i32` coordinate is a plain miss, never an overflow.
fn nearest_slot(
    coord: i32,
    origin: i32,
    pitch: i32,
    half_extent: i32,
    count: usize,
) -> Option<usize> {
    let offset = i64::from(coord) - i64::from(origin);
    let pitch = i64::from(pitch);
    let slot = (offset + pitch / 2).div_euclid(pitch);
    if slot < 0 || slot >= count as i64 {
        return None;
    }
    let delta = offset - slot * pitch;
    (delta.abs() <= i64::from(half_extent)).then_some(slot as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_through_position() {
        let pos = Position::from_index(27);
        assert_eq!(pos, Position { row: 2, col: 1 });
        assert_eq!(pos.index(), 27);
    }

    #[test]
    fn centers_follow_the_grid() {
        assert_eq!(Position::from_index(0).center(), Point::new(30, 90));
        assert_eq!(Position::from_index(12).center(), Point::new(510, 90));
        assert_eq!(Position::from_index(51).center(), Point::new(510, 300));
    }

    #[test]
    fn clicks_inside_the_hit_box_select_the_cell() {
        assert_eq!(cell_at(30, 80), Some(Position { row: 0, col: 0 }));
        assert_eq!(cell_at(70, 80), Some(Position { row: 0, col: 1 }));
        assert_eq!(cell_at(43, 115), Some(Position { row: 0, col: 0 }));
        assert_eq!(cell_at(17, 65), Some(Position { row: 0, col: 0 }));
        assert_eq!(cell_at(510, 300), Some(Position { row: 3, col: 12 }));
    }

    #[test]
    fn clicks_between_cards_miss() {
        assert_eq!(cell_at(44, 90), None);
        assert_eq!(cell_at(50, 90), None);
        assert_eq!(cell_at(30, 116), None);
        assert_eq!(cell_at(30, 125), None);
    }

    #[test]
    fn clicks_off_the_board_miss() {
        assert_eq!(cell_at(0, 0), None);
        assert_eq!(cell_at(-100, 90), None);
        assert_eq!(cell_at(550, 90), None);
        assert_eq!(cell_at(30, 370), None);
    }

    #[test]
    fn extreme_coordinates_miss() {
        assert_eq!(cell_at(i32::MIN, i32::MIN), None);
        assert_eq!(cell_at(i32::MAX, i32::MAX), None);
        assert_eq!(cell_at(i32::MIN, 90), None);
        assert_eq!(cell_at(30, i32::MIN), None);
        assert_eq!(cell_at(i32::MAX, 90), None);
    }
}
