//! Entity motion models
//!
//! Each entity is a small state machine over position/velocity/lifecycle.
//! Managers own the collections; entities never hold references to each
//! other. The one cross-entity link - a rocket's homing target - is a plain
//! id revalidated against the live enemy list every frame.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;

/// Obstacle behavior variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Static,
    MovingVertical,
    MovingHorizontal,
}

/// Power-up (and projectile) types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Bullet,
    Rocket,
    Laser,
}

impl PowerUpKind {
    /// Minimum time between shots while this power-up is active (ms).
    /// Laser is the fastest overall, rocket the slowest.
    pub fn fire_rate_ms(&self) -> f32 {
        match self {
            PowerUpKind::Bullet => BULLET_FIRE_RATE,
            PowerUpKind::Rocket => ROCKET_FIRE_RATE,
            PowerUpKind::Laser => LASER_FIRE_RATE,
        }
    }
}

/// The player's airplane. X is fixed for the whole run; only y tracks the
/// pointer, rate-limited and clamped to the playfield.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Airplane {
    pub pos: Vec2,
    pub alive: bool,
    target_y: f32,
}

impl Airplane {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(AIRPLANE_START_X, AIRPLANE_START_Y),
            alive: true,
            target_y: AIRPLANE_START_Y,
        }
    }

    pub fn set_target_y(&mut self, y: f32) {
        self.target_y = y;
    }

    /// Move toward the target y, at most `AIRPLANE_SPEED * dt`, never
    /// overshooting, always inside [half-height, height - half-height].
    pub fn update(&mut self, delta_ms: f32) {
        if !self.alive {
            return;
        }

        let diff = self.target_y - self.pos.y;
        if diff.abs() > 1.0 {
            let step = AIRPLANE_SPEED * delta_ms / 1000.0;
            self.pos.y += diff.signum() * diff.abs().min(step);
        }

        let half = AIRPLANE_HEIGHT / 2.0;
        self.pos.y = self.pos.y.clamp(half, GAME_HEIGHT - half);
    }

    /// Terminal state on the fatal hit: no further position updates. The
    /// death animation itself is a renderer concern.
    pub fn die(&mut self) {
        self.alive = false;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, AIRPLANE_WIDTH, AIRPLANE_HEIGHT)
    }
}

impl Default for Airplane {
    fn default() -> Self {
        Self::new()
    }
}

/// A crate drifting in from the right edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub kind: ObstacleKind,
    pub alive: bool,
    min_y: f32,
    max_y: f32,
}

impl Obstacle {
    pub fn new(id: u32, x: f32, y: f32, kind: ObstacleKind, speed: f32, size: f32, rng: &mut Pcg32) -> Self {
        let vel = match kind {
            ObstacleKind::MovingVertical => {
                // Random diagonal heading; x stays leftward
                let angle = rng.random_range(-45.0f32..45.0).to_radians();
                Vec2::new(-speed * angle.cos(), speed * angle.sin())
            }
            _ => {
                // Straight with a slight vertical drift
                Vec2::new(-speed, rng.random_range(-20.0f32..20.0))
            }
        };

        Self {
            id,
            pos: Vec2::new(x, y),
            vel,
            size,
            kind,
            alive: true,
            min_y: size / 2.0,
            max_y: GAME_HEIGHT - size / 2.0,
        }
    }

    pub fn update(&mut self, delta_ms: f32, rng: &mut Pcg32) {
        if !self.alive {
            return;
        }

        let dt = delta_ms / 1000.0;
        self.pos += self.vel * dt;

        if self.kind == ObstacleKind::MovingVertical {
            // Bounce off the vertical bounds with a small magnitude jitter;
            // the new velocity always points back into the playfield.
            if self.pos.y <= self.min_y && self.vel.y < 0.0 {
                self.vel.y = self.vel.y.abs() * rng.random_range(0.8f32..1.2);
            } else if self.pos.y >= self.max_y && self.vel.y > 0.0 {
                self.vel.y = -self.vel.y.abs() * rng.random_range(0.8f32..1.2);
            }
        }

        if self.is_off_screen() {
            self.alive = false;
        }
    }

    pub fn is_off_screen(&self) -> bool {
        self.pos.x < -self.size
    }

    /// Trailing edge fully behind the airplane's x.
    pub fn has_passed(&self, airplane_x: f32) -> bool {
        self.pos.x + self.size / 2.0 < airplane_x
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size, self.size)
    }
}

/// An enemy plane chasing in from behind (left edge, flying rightward).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyPlane {
    pub id: u32,
    pub pos: Vec2,
    pub speed: f32,
    pub alive: bool,
}

impl EnemyPlane {
    pub fn new(id: u32, x: f32, y: f32, speed: f32) -> Self {
        Self {
            id,
            pos: Vec2::new(x, y),
            speed,
            alive: true,
        }
    }

    /// Advance rightward and chase the airplane's y at a fraction of the
    /// horizontal speed, never overshooting the target.
    pub fn update(&mut self, delta_ms: f32, player_y: f32) {
        if !self.alive {
            return;
        }

        let dt = delta_ms / 1000.0;
        self.pos.x += self.speed * dt;

        let diff = player_y - self.pos.y;
        if diff.abs() > 5.0 {
            let step = self.speed * ENEMY_CHASE_FACTOR * dt;
            self.pos.y += diff.signum() * diff.abs().min(step);
        }

        let half = ENEMY_PLANE_HEIGHT / 2.0;
        self.pos.y = self.pos.y.clamp(half, GAME_HEIGHT - half);

        // Moving rightward, so the cull boundary is the right edge
        if self.pos.x > GAME_WIDTH + ENEMY_PLANE_WIDTH {
            self.alive = false;
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, ENEMY_PLANE_WIDTH, ENEMY_PLANE_HEIGHT)
    }
}

/// A collectible power-up drifting leftward at ambient speed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub pos: Vec2,
    pub kind: PowerUpKind,
    pub collected: bool,
}

impl PowerUp {
    pub fn new(id: u32, x: f32, y: f32, kind: PowerUpKind) -> Self {
        Self {
            id,
            pos: Vec2::new(x, y),
            kind,
            collected: false,
        }
    }

    pub fn update(&mut self, delta_ms: f32) {
        if self.collected {
            return;
        }
        self.pos.x -= OBSTACLE_START_SPEED * delta_ms / 1000.0;
    }

    pub fn is_off_screen(&self) -> bool {
        self.pos.x < -(POWERUP_RADIUS * 2.0)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, POWERUP_RADIUS * 2.0, POWERUP_RADIUS * 2.0)
    }
}

/// A projectile fired by the airplane while a power-up is active.
///
/// Bullets and rockets fly rightward; a rocket additionally re-aims at its
/// bound target each frame while the target is alive, and keeps its last
/// heading once the target dies. Lasers are a stationary beam with a short
/// lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: PowerUpKind,
    /// Homing target (rocket only). Non-owning: looked up by id in the live
    /// enemy list every frame, since the target may already be destroyed.
    pub target_id: Option<u32>,
    pub alive: bool,
    ttl_ms: f32,
}

impl Projectile {
    pub fn new(id: u32, x: f32, y: f32, kind: PowerUpKind, target_id: Option<u32>) -> Self {
        let (vel, ttl_ms) = match kind {
            PowerUpKind::Laser => (Vec2::ZERO, LASER_LIFETIME),
            _ => (Vec2::new(PROJECTILE_SPEED, 0.0), 0.0),
        };
        Self {
            id,
            pos: Vec2::new(x, y),
            vel,
            kind,
            target_id,
            alive: true,
            ttl_ms,
        }
    }

    pub fn update(&mut self, delta_ms: f32, enemies: &[EnemyPlane]) {
        if !self.alive {
            return;
        }

        if self.kind == PowerUpKind::Rocket {
            let target = self
                .target_id
                .and_then(|id| enemies.iter().find(|e| e.id == id && e.alive));
            if let Some(target) = target {
                let dir = (target.pos - self.pos).normalize_or_zero();
                if dir != Vec2::ZERO {
                    self.vel = dir * PROJECTILE_SPEED;
                }
            }
            // Dead or missing target: keep the last heading (straight flight)
        }

        let dt = delta_ms / 1000.0;
        self.pos += self.vel * dt;

        if self.kind == PowerUpKind::Laser {
            self.ttl_ms -= delta_ms;
            if self.ttl_ms <= 0.0 {
                self.alive = false;
            }
        }

        if self.pos.x > GAME_WIDTH + 100.0
            || self.pos.x < -100.0
            || self.pos.y > GAME_HEIGHT + 100.0
            || self.pos.y < -100.0
        {
            self.alive = false;
        }
    }

    pub fn bounds(&self) -> Aabb {
        match self.kind {
            PowerUpKind::Laser => Aabb::new(self.pos, LASER_LENGTH, 4.0),
            PowerUpKind::Rocket => Aabb::new(self.pos, 24.0, 12.0),
            PowerUpKind::Bullet => Aabb::new(self.pos, 12.0, 6.0),
        }
    }
}
