mod card;
mod config;
mod deck;
mod game;
mod input;
mod layout;
mod logging;
mod renderer;

use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{info, warn};

use config::Args;
use game::Game;
use input::Action;
use renderer::{Renderer, TuiRenderer};

fn main() -> Result<()> {
    let args = Args::parse();

    // Logging is optional: the game runs without it.
    if let Some(path) = args.log_path() {
        if let Err(err) = logging::init(args.log_level, &path) {
            eprintln!("[WARN] Logging disabled: {err:#}");
        }
    }

    let mut game = Game::new(args.seed, args.mode());
    let mut renderer = TuiRenderer::enter(args.tick())?;

    let result = run(&mut renderer, &mut game, args.tick());

    // Always try to restore terminal state.
    if let Err(err) = renderer.exit() {
        warn!("Failed to restore the terminal: {err:#}");
    }
    result
}

/// The event loop: draw, wait for input until the next tick, then tick.
fn run<R: Renderer>(renderer: &mut R, game: &mut Game, tick: Duration) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        renderer.render(&game.snapshot())?;

        let timeout = tick
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            let action = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::key_action(key),
                Event::Mouse(mouse) => input::mouse_action(mouse),
                _ => None,
            };
            match action {
                Some(Action::Quit) => {
                    info!(
                        outcome = ?game.end_reason(),
                        clock = game.clock(),
                        clicks = game.click_count(),
                        "player quit"
                    );
                    return Ok(());
                }
                Some(Action::Key(key)) => game.on_key_press(&key),
                Some(Action::Release(point)) => game.on_pointer_release(point.x, point.y),
                None => {}
            }
        }

        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            // The board freezes on the end screen until the player resets.
            if !game.is_ended() {
                game.on_tick();
            }
        }
    }
}
