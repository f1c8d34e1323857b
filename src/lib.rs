//! Slide Plane - a side-scrolling airplane arcade game
//!
//! Core modules:
//! - `sim`: Deterministic gameplay simulation (entities, spawners, collisions, frame loop)
//! - `events`: Observer notification bus consumed by the UI layer
//! - `storage`: High score / settings persistence
//! - `settings`: Player preferences
//!
//! Rendering, input devices and menus live outside this crate; they feed the
//! core pointer positions and start/restart commands and consume its
//! notifications and polling accessors.

pub mod events;
pub mod settings;
pub mod sim;
pub mod storage;

pub use events::{EventBus, GameEvent};
pub use settings::GameSettings;
pub use sim::{Game, GamePhase};
pub use storage::{HighScoreStore, JsonFileStore, MemoryStore};

/// Game configuration constants
pub mod consts {
    /// Logical playfield dimensions (pixels)
    pub const GAME_WIDTH: f32 = 1024.0;
    pub const GAME_HEIGHT: f32 = 768.0;

    /// Airplane defaults - x is fixed for the whole run, only y moves
    pub const AIRPLANE_START_X: f32 = 150.0;
    pub const AIRPLANE_START_Y: f32 = GAME_HEIGHT / 2.0;
    /// Vertical tracking speed toward the pointer (pixels per second)
    pub const AIRPLANE_SPEED: f32 = 300.0;
    pub const AIRPLANE_WIDTH: f32 = 50.0;
    pub const AIRPLANE_HEIGHT: f32 = 30.0;

    /// Obstacle defaults
    pub const OBSTACLE_START_SPEED: f32 = 200.0;
    /// Regular spawn cadence (milliseconds)
    pub const OBSTACLE_SPAWN_INTERVAL: f32 = 2000.0;
    pub const OBSTACLE_MIN_SPAWN_INTERVAL: f32 = 800.0;
    /// Spawn interval decrease per difficulty level (ms)
    pub const OBSTACLE_SPAWN_DECREASE: f32 = 50.0;
    /// Speed increase per difficulty level (px/s)
    pub const OBSTACLE_SPEED_INCREASE: f32 = 10.0;
    pub const OBSTACLE_MIN_SIZE: f32 = 30.0;
    pub const OBSTACLE_MAX_SIZE: f32 = 80.0;

    /// Aimed spawns redraw their interval in this range after each fire (ms)
    pub const AIMED_SPAWN_MIN_INTERVAL: f32 = 500.0;
    pub const AIMED_SPAWN_MAX_INTERVAL: f32 = 2000.0;

    /// Difficulty ratchet - one level every interval, up to the cap
    pub const DIFFICULTY_INCREASE_INTERVAL: f32 = 10_000.0;
    pub const MAX_DIFFICULTY_LEVEL: u32 = 10;

    /// Enemy planes chase in from behind once the run gets hard enough
    pub const ENEMY_PLANE_START_DIFFICULTY: u32 = 3;
    pub const ENEMY_PLANE_SPAWN_INTERVAL: f32 = 5000.0;
    pub const ENEMY_PLANE_SPEED: f32 = 250.0;
    pub const ENEMY_PLANE_SPEED_INCREASE: f32 = 10.0;
    pub const ENEMY_PLANE_WIDTH: f32 = 50.0;
    pub const ENEMY_PLANE_HEIGHT: f32 = 30.0;
    /// Fraction of horizontal speed used for the vertical chase
    pub const ENEMY_CHASE_FACTOR: f32 = 0.3;

    /// Power-up defaults
    pub const POWERUP_DURATION: f32 = 5000.0;
    pub const POWERUP_SPAWN_CHANCE: f32 = 0.15;
    /// Spawn-chance check cadence (ms)
    pub const POWERUP_SPAWN_INTERVAL: f32 = 15_000.0;
    pub const POWERUP_RADIUS: f32 = 15.0;

    /// Minimum time between shots per power-up type (ms)
    pub const BULLET_FIRE_RATE: f32 = 200.0;
    pub const ROCKET_FIRE_RATE: f32 = 500.0;
    pub const LASER_FIRE_RATE: f32 = 100.0;

    pub const PROJECTILE_SPEED: f32 = 600.0;
    pub const LASER_LENGTH: f32 = 200.0;
    /// Laser beams linger briefly before fading out (ms)
    pub const LASER_LIFETIME: f32 = 300.0;

    /// Scoring
    pub const SCORE_PER_SECOND: f32 = 10.0;
    pub const SCORE_PER_OBSTACLE_PASSED: u32 = 50;
    pub const SCORE_PER_OBSTACLE_DESTROYED: u32 = 100;

    pub const STARTING_LIVES: i32 = 3;

    /// Forward travel rate used for the distance readout (meters per second)
    pub const DISTANCE_METERS_PER_SECOND: f32 = 30.0;
}
