use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph};
use ratatui::{Frame, Terminal};

use crate::card::{self, Card};
use crate::game::{Snapshot, Status};
use crate::layout::{COLS, Position, ROWS};

/// Terminal cell of the top-left card box.
pub const BOARD_LEFT: u16 = 2;
pub const BOARD_TOP: u16 = 4;
/// Size of one card box in terminal cells.
pub const CARD_COLS: u16 = 5;
pub const CARD_ROWS: u16 = 3;
/// Distance between neighbouring card boxes.
pub const PITCH_COLS: u16 = CARD_COLS + 1;
pub const PITCH_ROWS: u16 = CARD_ROWS + 1;

const HUD_COLOR: Color = Color::Blue;

/// Trait that abstracts the drawing layer, so the game loop never touches
/// a concrete terminal.
pub trait Renderer {
    /// Draw one frame from the current game state.
    fn render(&mut self, snapshot: &Snapshot) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Terminal renderer
// ---------------------------------------------------------------------------

/// A ratatui renderer: HUD on top, the 4 × 13 board below.
pub struct TuiRenderer<B: Backend> {
    terminal: Terminal<B>,
    /// Length of one clock tick, for showing the clock in seconds.
    tick: Duration,
}

impl TuiRenderer<CrosstermBackend<Stdout>> {
    /// Take over the terminal: raw mode, alternate screen, mouse capture.
    pub fn enter(tick: Duration) -> Result<Self> {
        enable_raw_mode().context("enabling raw mode")?;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)
            .context("entering the alternate screen")?;
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        Ok(Self::new(terminal, tick))
    }

    /// Hand the terminal back in the state we found it.
    pub fn exit(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl<B: Backend> TuiRenderer<B> {
    pub fn new(terminal: Terminal<B>, tick: Duration) -> Self {
        TuiRenderer { terminal, tick }
    }
}

impl<B: Backend> Renderer for TuiRenderer<B> {
    fn render(&mut self, snapshot: &Snapshot) -> Result<()> {
        let seconds = (self.tick.as_millis() as u64).saturating_mul(snapshot.clock) / 1000;
        self.terminal
            .draw(|frame| draw(frame, snapshot, seconds))
            .context("drawing frame")?;
        Ok(())
    }
}

fn draw(frame: &mut Frame, snapshot: &Snapshot, seconds: u64) {
    let area = frame.area();
    let hud_style = Style::new().fg(HUD_COLOR);

    let hud = vec![
        Line::from(vec![
            Span::styled("Concentration!", hud_style.add_modifier(Modifier::BOLD)),
            Span::styled(format!("   Mode: {}", snapshot.mode.name()), hud_style),
        ]),
        Line::styled(
            format!(
                "Score: {}   Clock: {} seconds   Flips: {}   Remaining Flips: {}   Clicks: {}",
                snapshot.matches_remaining,
                seconds,
                snapshot.flip_count,
                snapshot.flips_left,
                snapshot.click_count
            ),
            hud_style,
        ),
        Line::styled(
            "Press 1 / 2 to switch to easy / hard mode (will reset game)   r: reset   q: quit",
            hud_style.add_modifier(Modifier::DIM),
        ),
    ];
    let hud_area = Rect::new(area.x, area.y, area.width, BOARD_TOP.min(area.height));
    frame.render_widget(Paragraph::new(hud), hud_area);

    for card in &snapshot.cards {
        let rect = card_rect(card.position()).intersection(area);
        if !rect.is_empty() {
            draw_card(frame, card, rect);
        }
    }

    if let Status::Ended(outcome) = snapshot.status {
        let width = 30.min(area.width);
        let height = 4.min(area.height);
        let rect = Rect::new(
            area.x + (area.width - width) / 2,
            (BOARD_TOP + ROWS as u16 * PITCH_ROWS / 2).min(area.bottom().saturating_sub(height)),
            width,
            height,
        );
        let message = Paragraph::new(vec![
            Line::styled(
                outcome.message(),
                hud_style.add_modifier(Modifier::BOLD),
            ),
            Line::styled("r: play again   q: quit", hud_style),
        ])
        .alignment(Alignment::Center)
        .block(Block::bordered().border_type(BorderType::Rounded));
        frame.render_widget(Clear, rect);
        frame.render_widget(message, rect);
    }
}

fn draw_card(frame: &mut Frame, card: &Card, rect: Rect) {
    let widget = if card.is_face_up() {
        let fg = match card.color() {
            card::Color::Red => Color::Red,
            card::Color::Black => Color::Black,
        };
        Paragraph::new(card.label())
            .alignment(Alignment::Center)
            .style(Style::new().fg(fg).bg(Color::White))
            .block(Block::bordered().border_style(Style::new().fg(Color::Gray)))
    } else {
        Paragraph::new("░░░")
            .style(Style::new().fg(Color::LightBlue).bg(Color::Blue))
            .block(Block::bordered().border_style(Style::new().fg(Color::White)))
    };
    frame.render_widget(widget, rect);
}

/// Terminal rectangle of the card box at `pos`.
pub fn card_rect(pos: Position) -> Rect {
    debug_assert!((pos.row as usize) < ROWS && (pos.col as usize) < COLS);
    Rect::new(
        BOARD_LEFT + pos.col as u16 * PITCH_COLS,
        BOARD_TOP + pos.row as u16 * PITCH_ROWS,
        CARD_COLS,
        CARD_ROWS,
    )
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::deck::Mode;
    use crate::game::{Game, Outcome};

    fn renderer() -> TuiRenderer<TestBackend> {
        let terminal = Terminal::new(TestBackend::new(82, 24)).unwrap();
        TuiRenderer::new(terminal, Duration::from_millis(100))
    }

    fn screen(renderer: &TuiRenderer<TestBackend>) -> String {
        renderer
            .terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn draws_hud_and_face_up_card() {
        let mut game = Game::new(Some(12), Mode::Normal);
        game.on_pointer_release(30, 90);
        for _ in 0..20 {
            game.on_tick();
        }
        let snapshot = game.snapshot();
        let label = snapshot.cards[0].label();

        let mut renderer = renderer();
        renderer.render(&snapshot).unwrap();
        let text = screen(&renderer);

        assert!(text.contains("Concentration!"));
        assert!(text.contains("Mode: easy"));
        assert!(text.contains("Score: 26"));
        assert!(text.contains("Clock: 2 seconds"));
        assert!(text.contains("Remaining Flips: 299"));
        assert!(text.contains("Clicks: 1"));
        assert!(text.contains(&label), "{label} not drawn");
    }

    #[test]
    fn face_down_cards_hide_their_labels() {
        let snapshot = Game::new(Some(12), Mode::Hard).snapshot();
        let mut renderer = renderer();
        renderer.render(&snapshot).unwrap();
        let text = screen(&renderer);

        assert!(text.contains("Mode: hard"));
        assert!(text.contains("░░░"));
        assert!(!text.contains('♥'));
        assert!(!text.contains('♠'));
    }

    #[test]
    fn end_message() {
        let mut snapshot = Game::new(Some(1), Mode::Normal).snapshot();
        snapshot.cards.clear();
        snapshot.status = Status::Ended(Outcome::Won);

        let mut renderer = renderer();
        renderer.render(&snapshot).unwrap();
        assert!(screen(&renderer).contains("You won :)"));

        snapshot.status = Status::Ended(Outcome::Lost);
        renderer.render(&snapshot).unwrap();
        assert!(screen(&renderer).contains("You lost!"));
    }

    #[test]
    fn small_terminals_do_not_panic() {
        let snapshot = Game::new(Some(3), Mode::Normal).snapshot();
        let terminal = Terminal::new(TestBackend::new(20, 6)).unwrap();
        let mut renderer = TuiRenderer::new(terminal, Duration::from_millis(100));
        renderer.render(&snapshot).unwrap();
    }
}
