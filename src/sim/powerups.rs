//! Power-up spawning, weapon activation and the projectile pool
//!
//! One manager owns the whole weapon lifecycle: the rare power-up drops, the
//! single active weapon slot with its countdown, the shot-rate gate, and the
//! projectiles in flight. At most one power-up is active at a time; picking
//! up a new one replaces the old.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entities::{EnemyPlane, PowerUp, PowerUpKind, Projectile};
use crate::consts::*;
use crate::events::{EventBus, GameEvent};

pub struct PowerUpManager {
    pub(crate) power_ups: Vec<PowerUp>,
    pub(crate) projectiles: Vec<Projectile>,
    spawn_timer: f32,
    active: Option<PowerUpKind>,
    time_remaining: f32,
    /// Time since the last shot (or activation)
    fire_timer: f32,
    next_id: u32,
    rng: Pcg32,
}

impl PowerUpManager {
    pub fn new(seed: u64) -> Self {
        Self {
            power_ups: Vec::new(),
            projectiles: Vec::new(),
            spawn_timer: 0.0,
            active: None,
            time_remaining: 0.0,
            fire_timer: 0.0,
            next_id: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn update(&mut self, delta_ms: f32, enemies: &[EnemyPlane], events: &mut EventBus) {
        self.spawn_timer += delta_ms;
        if self.spawn_timer >= POWERUP_SPAWN_INTERVAL {
            self.spawn_timer = 0.0;
            if self.rng.random::<f32>() < POWERUP_SPAWN_CHANCE {
                self.spawn_power_up();
            }
        }

        for power_up in &mut self.power_ups {
            power_up.update(delta_ms);
        }
        self.power_ups.retain(|p| !p.collected && !p.is_off_screen());

        if let Some(kind) = self.active {
            self.fire_timer += delta_ms;
            self.time_remaining -= delta_ms;
            if self.time_remaining <= 0.0 {
                self.time_remaining = 0.0;
                self.active = None;
                log::debug!("{kind:?} power-up expired");
                events.emit(GameEvent::PowerUpExpired);
            }
        }

        for projectile in &mut self.projectiles {
            projectile.update(delta_ms, enemies);
        }
        self.projectiles.retain(|p| p.alive);
    }

    fn spawn_power_up(&mut self) {
        let kind = match self.rng.random_range(0..3u8) {
            0 => PowerUpKind::Bullet,
            1 => PowerUpKind::Rocket,
            _ => PowerUpKind::Laser,
        };
        let y = self.rng.random_range(50.0..GAME_HEIGHT - 50.0);
        let id = self.next_id;
        self.next_id += 1;
        self.power_ups
            .push(PowerUp::new(id, GAME_WIDTH + POWERUP_RADIUS * 2.0, y, kind));
        log::debug!("{kind:?} power-up spawned at y={y:.0}");
    }

    /// Arm the given weapon, replacing any active one. The shot timer starts
    /// from zero, so the first shot comes one fire interval after pickup.
    pub fn activate(&mut self, kind: PowerUpKind) {
        self.active = Some(kind);
        self.time_remaining = POWERUP_DURATION;
        self.fire_timer = 0.0;
        log::debug!("{kind:?} power-up active for {POWERUP_DURATION}ms");
    }

    pub fn can_fire(&self) -> bool {
        self.active
            .is_some_and(|kind| self.fire_timer >= kind.fire_rate_ms())
    }

    /// Fire from the given muzzle position. No-op unless `can_fire()`.
    /// Rockets bind the nearest alive enemy once, here at launch.
    pub fn fire_projectile(&mut self, x: f32, y: f32, enemies: &[EnemyPlane]) {
        if !self.can_fire() {
            return;
        }
        let Some(kind) = self.active else { return };

        let target_id = if kind == PowerUpKind::Rocket {
            enemies
                .iter()
                .filter(|e| e.alive)
                .min_by(|a, b| {
                    let da = (a.pos.x - x).powi(2) + (a.pos.y - y).powi(2);
                    let db = (b.pos.x - x).powi(2) + (b.pos.y - y).powi(2);
                    da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
                })
                .map(|e| e.id)
        } else {
            None
        };

        let id = self.next_id;
        self.next_id += 1;
        self.projectiles
            .push(Projectile::new(id, x, y, kind, target_id));
        self.fire_timer = 0.0;
        log::trace!("{kind:?} projectile fired from ({x:.0}, {y:.0})");
    }

    pub fn active_kind(&self) -> Option<PowerUpKind> {
        self.active
    }

    pub fn time_remaining(&self) -> f32 {
        self.time_remaining
    }

    /// Time until the next spawn-chance roll (ms). Polling accessor for the
    /// UI layer.
    pub fn time_until_next_spawn_check(&self) -> f32 {
        (POWERUP_SPAWN_INTERVAL - self.spawn_timer).max(0.0)
    }

    pub fn reset(&mut self) {
        self.power_ups.clear();
        self.projectiles.clear();
        self.spawn_timer = 0.0;
        self.active = None;
        self.time_remaining = 0.0;
        self.fire_timer = 0.0;
        self.next_id = 0;
    }
}
