use battle_royale::compute::init_arena;
use battle_royale::config::GameConfig;
use battle_royale::entities::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn rect_edges_and_centre() {
    let r = Rect::new(10.0, 20.0, 40.0, 30.0);
    assert_eq!(r.left(), 10.0);
    assert_eq!(r.right(), 50.0);
    assert_eq!(r.top(), 20.0);
    assert_eq!(r.bottom(), 50.0);
    assert_eq!(r.centre(), Vector2::new(30.0, 35.0));
    assert_eq!(Rect::centred(30.0, 35.0, 40.0, 30.0), r);
}

#[test]
fn rect_intersection_is_strict_and_symmetric() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let overlapping = Rect::new(9.0, 9.0, 10.0, 10.0);
    let touching = Rect::new(10.0, 0.0, 10.0, 10.0);
    let apart = Rect::new(50.0, 50.0, 10.0, 10.0);
    assert!(a.intersects(&overlapping));
    assert!(overlapping.intersects(&a));
    assert!(!a.intersects(&touching));
    assert!(!a.intersects(&apart));
}

#[test]
fn cardinal_vectors_are_unit_length() {
    for v in [Vector2::UP, Vector2::DOWN, Vector2::LEFT, Vector2::RIGHT] {
        assert_eq!(v.x.abs() + v.y.abs(), 1.0);
    }
    assert_eq!(Vector2::RIGHT.scale(5.0).add(Vector2::UP), Vector2::new(5.0, -1.0));
}

#[test]
fn actor_defeated_at_zero_or_below() {
    let mut arena = init_arena(GameConfig::default(), &mut StdRng::seed_from_u64(1));
    let actor = &mut arena.actors[0];
    assert!(!actor.is_defeated());
    actor.health = 0;
    assert!(actor.is_defeated());
    actor.health = -20;
    assert!(actor.is_defeated());
}

#[test]
fn arena_clone_is_independent() {
    let original = init_arena(GameConfig::default(), &mut StdRng::seed_from_u64(7));
    let mut cloned = original.clone();

    cloned.actors[0].health = 40;
    cloned.actors[1].projectiles.push(Projectile {
        position: Vector2::new(1.0, 1.0),
        direction: Vector2::UP,
        speed: 10.0,
        size: 10.0,
    });

    assert_eq!(original.actors[0].health, 100);
    assert!(original.actors[1].projectiles.is_empty());
}

#[test]
fn winner_name_follows_index() {
    let mut arena = init_arena(GameConfig::default(), &mut StdRng::seed_from_u64(3));
    assert_eq!(arena.winner_name(), None);
    arena.winner = Some(1);
    assert_eq!(arena.winner_name(), Some("Player 2"));
}

#[test]
fn default_config_frame_is_sixty_hz() {
    let cfg = GameConfig::default();
    assert_eq!(cfg.frame_ms(), 16);
    let zero = GameConfig {
        ticks_per_second: 0,
        ..GameConfig::default()
    };
    assert_eq!(zero.frame_ms(), 1000);
}
