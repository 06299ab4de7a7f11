/// Gameplay tuning. One value per match, carried inside the `Arena`.

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    /// Logical surface width.
    pub width: f32,
    /// Logical surface height.
    pub height: f32,
    /// Side length of an actor's square body.
    pub actor_size: f32,
    /// Distance an actor moves per tick per held direction key.
    pub actor_speed: f32,
    pub starting_health: i32,
    /// Side length of a projectile's square body.
    pub projectile_size: f32,
    /// Distance a projectile travels per tick.
    pub projectile_speed: f32,
    /// A new shot needs strictly more than this since the previous one.
    pub fire_cooldown_ms: u64,
    pub hit_damage: i32,
    pub ticks_per_second: u32,
    /// How long the winner screen stays up before the loop returns.
    pub game_over_hold_ms: u64,
    /// Centre points the two actors spawn at.
    pub spawn_centres: [(f32, f32); 2],
}

impl Default for GameConfig {
    fn default() -> Self {
        let width = 800.0;
        let height = 600.0;
        GameConfig {
            width,
            height,
            actor_size: 40.0,
            actor_speed: 5.0,
            starting_health: 100,
            projectile_size: 10.0,
            projectile_speed: 10.0,
            fire_cooldown_ms: 500,
            hit_damage: 20,
            ticks_per_second: 60,
            game_over_hold_ms: 3000,
            spawn_centres: [(100.0, height - 100.0), (width - 100.0, height - 100.0)],
        }
    }
}

impl GameConfig {
    /// Target duration of one tick in milliseconds (at least 1).
    pub fn frame_ms(&self) -> u64 {
        (1000 / u64::from(self.ticks_per_second.max(1))).max(1)
    }
}
