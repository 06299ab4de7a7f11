/// Keyboard state for both players.
///
/// Terminals report key presses as a stream of events, not as a "currently
/// held" table, so `KeyTracker` rebuilds that table: a key stays held while
/// its press/repeat events keep arriving within `HOLD_WINDOW` ticks, and is
/// dropped at once on a release event when the terminal reports those.

use std::collections::{HashMap, HashSet};
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Ticks a key stays held after its last press/repeat event when the terminal
/// sends no release events. At 60 ticks/s this is ≈133 ms: long enough to
/// bridge the gaps between auto-repeats, but shorter than the OS delay
/// (≈250–600 ms) before repeating starts, so a held key drops out for a few
/// ticks after its first press on such terminals.
pub const HOLD_WINDOW: u64 = 8;

// ── Snapshot handed to the game loop ──────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub held: HashSet<KeyCode>,
    pub quit: bool,
}

impl InputState {
    pub fn with_keys<I: IntoIterator<Item = KeyCode>>(keys: I) -> Self {
        InputState {
            held: keys.into_iter().map(fold_case).collect(),
            quit: false,
        }
    }

    pub fn quit() -> Self {
        InputState {
            held: HashSet::new(),
            quit: true,
        }
    }

    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&fold_case(key))
    }
}

/// Anything that can report the keys held right now.
pub trait InputSource {
    fn poll(&mut self) -> io::Result<InputState>;
}

// ── Bindings ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyBindings {
    pub left: KeyCode,
    pub right: KeyCode,
    pub up: KeyCode,
    pub down: KeyCode,
    pub fire: KeyCode,
}

impl KeyBindings {
    /// W A S D to move, Space to fire.
    pub fn wasd() -> Self {
        KeyBindings {
            left: KeyCode::Char('a'),
            right: KeyCode::Char('d'),
            up: KeyCode::Char('w'),
            down: KeyCode::Char('s'),
            fire: KeyCode::Char(' '),
        }
    }

    /// Arrow keys to move, Enter to fire.
    pub fn arrows() -> Self {
        KeyBindings {
            left: KeyCode::Left,
            right: KeyCode::Right,
            up: KeyCode::Up,
            down: KeyCode::Down,
            fire: KeyCode::Enter,
        }
    }
}

/// Bindings for player one and player two, in that order.
pub fn default_bindings() -> [KeyBindings; 2] {
    [KeyBindings::wasd(), KeyBindings::arrows()]
}

fn fold_case(key: KeyCode) -> KeyCode {
    match key {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// ── Hold tracking ─────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct KeyTracker {
    /// Each held key → the tick it was last seen on (press or repeat).
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
    quit: bool,
    /// Release events arrive, so keys never expire on their own.
    reports_release: bool,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker for a terminal that reports key releases.
    pub fn with_release_events() -> Self {
        KeyTracker {
            reports_release: true,
            ..Self::default()
        }
    }

    pub fn record(&mut self, key: KeyEvent) {
        let code = fold_case(key.code);
        match key.kind {
            KeyEventKind::Press => {
                if is_quit(&key) {
                    self.quit = true;
                }
                self.key_frame.insert(code, self.frame);
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(code, self.frame);
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&code);
            }
        }
    }

    /// Keys held on the current tick; advances to the next tick.
    pub fn snapshot(&mut self) -> InputState {
        let frame = self.frame;
        if !self.reports_release {
            self.key_frame
                .retain(|_, last| frame.saturating_sub(*last) <= HOLD_WINDOW);
        }
        let state = InputState {
            held: self.key_frame.keys().cloned().collect(),
            quit: self.quit,
        };
        self.frame += 1;
        state
    }
}

// ── Terminal source ───────────────────────────────────────────────────────────

/// Drains pending crossterm events without blocking, once per tick.
#[derive(Debug, Default)]
pub struct TerminalInput {
    tracker: KeyTracker,
}

impl TerminalInput {
    /// `release_events` is whether the keyboard-enhancement push succeeded.
    pub fn new(release_events: bool) -> Self {
        let tracker = if release_events {
            KeyTracker::with_release_events()
        } else {
            KeyTracker::new()
        };
        TerminalInput { tracker }
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> io::Result<InputState> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                self.tracker.record(key);
            }
        }
        Ok(self.tracker.snapshot())
    }
}
