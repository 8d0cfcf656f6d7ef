use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::layout::{ORIGIN_X, ORIGIN_Y, PITCH_X, PITCH_Y, Point};
use crate::renderer::{BOARD_LEFT, BOARD_TOP, CARD_COLS, CARD_ROWS, PITCH_COLS, PITCH_ROWS};

/// Board units covered by one terminal column / row inside a card box.
const UNITS_PER_COLUMN: i32 = 6;
const UNITS_PER_ROW: i32 = 20;

/// What the game loop should do with a terminal event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Forwarded to `Game::on_key_press`.
    Key(String),
    /// Forwarded to `Game::on_pointer_release`.
    Release(Point),
}

pub fn key_action(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Esc | KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char(c) => Some(Action::Key(c.to_string())),
        _ => None,
    }
}

/// Left-button releases become pointer releases; everything else is ignored.
pub fn mouse_action(mouse: MouseEvent) -> Option<Action> {
    match mouse.kind {
        MouseEventKind::Up(MouseButton::Left) => {
            Some(Action::Release(board_point(mouse.column, mouse.row)))
        }
        _ => None,
    }
}

/// Map a terminal cell to board coordinates.
///
/// Every cell of a drawn card box lands inside that card's hit box and every
/// gap cell lands outside all of them.
pub fn board_point(column: u16, row: u16) -> Point {
    let x = project(
        column as i32 - BOARD_LEFT as i32,
        PITCH_COLS as i32,
        CARD_COLS as i32,
        ORIGIN_X,
        PITCH_X,
        UNITS_PER_COLUMN,
    );
    let y = project(
        row as i32 - BOARD_TOP as i32,
        PITCH_ROWS as i32,
        CARD_ROWS as i32,
        ORIGIN_Y,
        PITCH_Y,
        UNITS_PER_ROW,
    );
    Point::new(x, y)
}

fn project(offset: i32, cells_per_slot: i32, box_size: i32, origin: i32, pitch: i32, unit: i32) -> i32 {
    let slot = offset.div_euclid(cells_per_slot);
    let within = offset.rem_euclid(cells_per_slot);
    origin + slot * pitch + (within - box_size / 2) * unit
}
