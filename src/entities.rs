/// All game entity types — plain data plus a few geometry helpers.

use crate::config::GameConfig;

// ── Geometry ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const UP: Vector2 = Vector2 { x: 0.0, y: -1.0 };
    pub const DOWN: Vector2 = Vector2 { x: 0.0, y: 1.0 };
    pub const LEFT: Vector2 = Vector2 { x: -1.0, y: 0.0 };
    pub const RIGHT: Vector2 = Vector2 { x: 1.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Vector2 { x, y }
    }

    pub fn scale(self, factor: f32) -> Self {
        Vector2::new(self.x * factor, self.y * factor)
    }

    pub fn add(self, other: Vector2) -> Self {
        Vector2::new(self.x + other.x, self.y + other.y)
    }
}

/// Axis-aligned box in logical pixels, `(x, y)` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    /// Box of size `w`×`h` whose centre is `(cx, cy)`.
    pub fn centred(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        Rect::new(cx - w / 2.0, cy - h / 2.0, w, h)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn centre(&self) -> Vector2 {
        Vector2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap: boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

// ── Colours ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb { r: 255, g: 255, b: 255 };
    pub const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    pub const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };
    pub const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };
    pub const YELLOW: Rgb = Rgb { r: 255, g: 255, b: 0 };
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
}

/// Colours an actor can be assigned at match setup.
pub const ACTOR_PALETTE: [Rgb; 4] = [Rgb::RED, Rgb::GREEN, Rgb::BLUE, Rgb::YELLOW];

/// What a drawn box represents; the renderer picks its look from this tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    Actor,
    Projectile,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    /// Top-left corner.
    pub position: Vector2,
    /// Unit vector along one of the four axes.
    pub direction: Vector2,
    pub speed: f32,
    pub size: f32,
}

impl Projectile {
    pub fn rect(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.size, self.size)
    }
}

// ── Actors ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Actor {
    pub name: String,
    /// Top-left corner.
    pub position: Vector2,
    pub size: Vector2,
    pub color: Rgb,
    /// May dip below zero on the tick that ends the match.
    pub health: i32,
    pub speed: f32,
    /// Last direction moved in; starts as up.
    pub facing: Vector2,
    /// Timestamp of the last accepted shot, `None` until the first one.
    pub last_shot_ms: Option<u64>,
    pub projectiles: Vec<Projectile>,
}

impl Actor {
    pub fn rect(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.size.x, self.size.y)
    }

    pub fn centre(&self) -> Vector2 {
        self.rect().centre()
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }
}

// ── Match state ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    GameOver,
}

/// The entire state of one match. Always exactly two actors.
#[derive(Clone, Debug, PartialEq)]
pub struct Arena {
    pub actors: [Actor; 2],
    pub status: GameStatus,
    /// Index into `actors`, set when the match ends.
    pub winner: Option<usize>,
    pub frame: u64,
    pub config: GameConfig,
}

impl Arena {
    pub fn winner_name(&self) -> Option<&str> {
        self.winner.map(|i| self.actors[i].name.as_str())
    }
}
