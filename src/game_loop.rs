/// The fixed-rate match loop and its time source.
///
/// One thread does everything: poll input, simulate, render, then sleep out
/// the rest of the tick. The clock is injected so tests can drive it by hand.

use std::io;
use std::time::{Duration, Instant};

use crate::audio::AudioPlayer;
use crate::compute::{evaluate, step};
use crate::display::{begin_frame, render_arena, render_winner, Renderer};
use crate::entities::{Arena, GameStatus};
use crate::input::{InputSource, KeyBindings};

// ── Time source ───────────────────────────────────────────────────────────────

pub trait Clock {
    /// Milliseconds since some fixed start point.
    fn now_ms(&self) -> u64;
    fn sleep(&mut self, duration: Duration);
}

#[derive(Debug)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

// ── Loop ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    Finished { winner: String },
    Quit,
}

/// Everything the loop talks to besides the arena.
pub struct Collaborators<'a, I, R, A, C> {
    pub input: &'a mut I,
    pub renderer: &'a mut R,
    pub audio: &'a mut A,
    pub clock: &'a mut C,
}

/// Run one match to completion or until the players ask to quit.
///
/// Per tick: clear → read input → move/shoot → advance projectiles →
/// resolve hits → draw → check for a winner. On game over the winner screen
/// is shown and held for `game_over_hold_ms` before returning.
pub fn run_match<I, R, A, C>(
    arena: Arena,
    bindings: &[KeyBindings; 2],
    parts: Collaborators<'_, I, R, A, C>,
) -> io::Result<MatchOutcome>
where
    I: InputSource,
    R: Renderer,
    A: AudioPlayer,
    C: Clock,
{
    let Collaborators {
        input,
        renderer,
        audio,
        clock,
    } = parts;
    let frame = Duration::from_millis(arena.config.frame_ms());
    let mut arena = arena;

    log::info!(
        "Match started: {} vs {}",
        arena.actors[0].name,
        arena.actors[1].name
    );

    loop {
        let frame_start = clock.now_ms();

        begin_frame(renderer)?;

        let keys = input.poll()?;
        if keys.quit {
            log::info!("Match quit after {} ticks", arena.frame);
            return Ok(MatchOutcome::Quit);
        }

        arena = step(&arena, &keys, bindings, clock.now_ms(), audio);
        render_arena(renderer, &arena)?;
        arena = evaluate(&arena);

        if arena.status == GameStatus::GameOver {
            let winner = arena.winner_name().unwrap_or_default().to_string();
            log::info!(
                "{} wins after {} ticks ({} / {})",
                winner,
                arena.frame,
                arena.actors[0].health,
                arena.actors[1].health
            );
            render_winner(renderer, &arena, &winner)?;
            renderer.present()?;
            clock.sleep(Duration::from_millis(arena.config.game_over_hold_ms));
            return Ok(MatchOutcome::Finished { winner });
        }

        renderer.present()?;

        let elapsed = Duration::from_millis(clock.now_ms().saturating_sub(frame_start));
        if elapsed < frame {
            clock.sleep(frame - elapsed);
        }
    }
}
