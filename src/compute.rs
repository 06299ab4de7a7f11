/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current state
/// and returns a brand-new value.  Side effects are limited to the injected
/// collaborators: the RNG at setup and the audio player when a shot fires.
/// Time is always passed in as a millisecond timestamp.

use rand::Rng;

use crate::audio::{AudioPlayer, SoundEffect};
use crate::config::GameConfig;
use crate::entities::{
    Actor, Arena, GameStatus, Projectile, Rgb, Vector2, ACTOR_PALETTE,
};
use crate::input::{InputState, KeyBindings};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build an actor whose body is centred on `(cx, cy)`.
pub fn spawn_actor(name: &str, cx: f32, cy: f32, color: Rgb, config: &GameConfig) -> Actor {
    let size = config.actor_size;
    Actor {
        name: name.to_string(),
        position: Vector2::new(cx - size / 2.0, cy - size / 2.0),
        size: Vector2::new(size, size),
        color,
        health: config.starting_health,
        speed: config.actor_speed,
        facing: Vector2::UP,
        last_shot_ms: None,
        projectiles: Vec::new(),
    }
}

/// Build the initial arena. Actor colours are drawn from `rng`.
pub fn init_arena(config: GameConfig, rng: &mut impl Rng) -> Arena {
    let [(x1, y1), (x2, y2)] = config.spawn_centres;
    let c1 = ACTOR_PALETTE[rng.gen_range(0..ACTOR_PALETTE.len())];
    let c2 = ACTOR_PALETTE[rng.gen_range(0..ACTOR_PALETTE.len())];
    let actors = [
        spawn_actor("Player 1", x1, y1, c1, &config),
        spawn_actor("Player 2", x2, y2, c2, &config),
    ];
    Arena {
        actors,
        status: GameStatus::Running,
        winner: None,
        frame: 0,
        config,
    }
}

// ── Actor operations ─────────────────────────────────────────────────────────

/// Apply this tick's directional keys. Checks run left, right, up, down, so
/// with two keys held the later one decides `facing`. No edge clamping.
pub fn move_actor(actor: &Actor, input: &InputState, bindings: &KeyBindings) -> Actor {
    let mut position = actor.position;
    let mut facing = actor.facing;
    let steps = [
        (bindings.left, Vector2::LEFT),
        (bindings.right, Vector2::RIGHT),
        (bindings.up, Vector2::UP),
        (bindings.down, Vector2::DOWN),
    ];
    for (key, dir) in steps {
        if input.is_held(key) {
            position = position.add(dir.scale(actor.speed));
            facing = dir;
        }
    }
    Actor {
        position,
        facing,
        ..actor.clone()
    }
}

/// True when `now_ms` is strictly past the cooldown since the last shot.
pub fn can_shoot(actor: &Actor, now_ms: u64, config: &GameConfig) -> bool {
    match actor.last_shot_ms {
        None => true,
        Some(last) => now_ms.saturating_sub(last) > config.fire_cooldown_ms,
    }
}

/// Fire one projectile from the actor's centre along `facing`, or return the
/// actor unchanged if the cooldown has not elapsed.
pub fn shoot(
    actor: &Actor,
    now_ms: u64,
    config: &GameConfig,
    audio: &mut impl AudioPlayer,
) -> Actor {
    if !can_shoot(actor, now_ms, config) {
        return actor.clone();
    }
    let centre = actor.centre();
    let half = config.projectile_size / 2.0;
    let projectile = Projectile {
        position: Vector2::new(centre.x - half, centre.y - half),
        direction: actor.facing,
        speed: config.projectile_speed,
        size: config.projectile_size,
    };
    let mut projectiles = actor.projectiles.clone();
    projectiles.push(projectile);
    audio.play(SoundEffect::Shot);
    log::debug!("{} fired at {} ms", actor.name, now_ms);
    Actor {
        projectiles,
        last_shot_ms: Some(now_ms),
        ..actor.clone()
    }
}

/// Move a projectile one step; `None` once it has left the arena.
pub fn advance_projectile(p: &Projectile, width: f32, height: f32) -> Option<Projectile> {
    let moved = Projectile {
        position: p.position.add(p.direction.scale(p.speed)),
        ..p.clone()
    };
    let r = moved.rect();
    if r.bottom() < 0.0 || r.top() > height || r.left() < 0.0 || r.right() > width {
        None
    } else {
        Some(moved)
    }
}

pub fn advance_projectiles(actor: &Actor, width: f32, height: f32) -> Actor {
    let projectiles = actor
        .projectiles
        .iter()
        .filter_map(|p| advance_projectile(p, width, height))
        .collect();
    Actor {
        projectiles,
        ..actor.clone()
    }
}

// ── Collision ────────────────────────────────────────────────────────────────

/// Resolve `shooter`'s projectiles against `target`. Every projectile that
/// overlaps the target costs it `damage` health and is removed, so each
/// projectile hits at most once. Returns the updated `(shooter, target)`.
pub fn resolve_hits(shooter: &Actor, target: &Actor, damage: i32) -> (Actor, Actor) {
    let target_rect = target.rect();
    let (hits, misses): (Vec<Projectile>, Vec<Projectile>) = shooter
        .projectiles
        .iter()
        .cloned()
        .partition(|p| p.rect().intersects(&target_rect));

    if !hits.is_empty() {
        log::debug!("{} hit {} x{}", shooter.name, target.name, hits.len());
    }

    let shooter = Actor {
        projectiles: misses,
        ..shooter.clone()
    };
    let target = Actor {
        health: target.health - damage * hits.len() as i32,
        ..target.clone()
    };
    (shooter, target)
}

// ── Per-tick simulation ──────────────────────────────────────────────────────

/// Advance the simulation by one tick: movement, shooting, projectile flight,
/// then hit resolution in both directions. Does not decide the outcome; see
/// `evaluate`.
pub fn step(
    arena: &Arena,
    input: &InputState,
    bindings: &[KeyBindings; 2],
    now_ms: u64,
    audio: &mut impl AudioPlayer,
) -> Arena {
    if arena.status != GameStatus::Running {
        return arena.clone();
    }
    let cfg = &arena.config;

    let mut actors = arena.actors.clone();
    for (actor, keys) in actors.iter_mut().zip(bindings.iter()) {
        let mut next = move_actor(actor, input, keys);
        if input.is_held(keys.fire) {
            next = shoot(&next, now_ms, cfg, audio);
        }
        *actor = next;
    }

    for actor in actors.iter_mut() {
        *actor = advance_projectiles(actor, cfg.width, cfg.height);
    }

    let [a, b] = actors;
    let (a, b) = resolve_hits(&a, &b, cfg.hit_damage);
    let (b, a) = resolve_hits(&b, &a, cfg.hit_damage);

    Arena {
        actors: [a, b],
        frame: arena.frame + 1,
        ..arena.clone()
    }
}

/// Index of the winner if the match is decided. Player 1 wins only while its
/// health is above zero; otherwise Player 2 is named, even if both are down.
pub fn decide_winner(arena: &Arena) -> Option<usize> {
    let [a, b] = &arena.actors;
    if !a.is_defeated() && !b.is_defeated() {
        return None;
    }
    Some(if a.health > 0 { 0 } else { 1 })
}

/// Move to `GameOver` once either actor is down.
pub fn evaluate(arena: &Arena) -> Arena {
    if arena.status != GameStatus::Running {
        return arena.clone();
    }
    match decide_winner(arena) {
        Some(winner) => Arena {
            status: GameStatus::GameOver,
            winner: Some(winner),
            ..arena.clone()
        },
        None => arena.clone(),
    }
}
