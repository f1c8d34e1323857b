//! Enemy plane spawning
//!
//! Enemy planes only appear once the run reaches the unlock difficulty. They
//! come in from behind the player (off the left edge, flying rightward) and
//! chase the airplane's altitude, so outrunning them vertically is the only
//! defense without an active weapon.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entities::EnemyPlane;
use crate::consts::*;

pub struct EnemyPlaneManager {
    pub(crate) enemies: Vec<EnemyPlane>,
    spawn_timer: f32,
    next_id: u32,
    rng: Pcg32,
}

impl EnemyPlaneManager {
    pub fn new(seed: u64) -> Self {
        Self {
            enemies: Vec::new(),
            spawn_timer: 0.0,
            next_id: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn update(&mut self, delta_ms: f32, player_y: f32, difficulty_level: u32) {
        if difficulty_level >= ENEMY_PLANE_START_DIFFICULTY {
            self.spawn_timer += delta_ms;
            if self.spawn_timer >= ENEMY_PLANE_SPAWN_INTERVAL {
                self.spawn_timer = 0.0;
                self.spawn_enemy(difficulty_level);
            }
        }

        for enemy in &mut self.enemies {
            enemy.update(delta_ms, player_y);
        }
        self.enemies.retain(|e| e.alive);
    }

    fn spawn_enemy(&mut self, difficulty_level: u32) {
        let y = self.rng.random_range(50.0..GAME_HEIGHT - 50.0);
        let speed = ENEMY_PLANE_SPEED + difficulty_level as f32 * ENEMY_PLANE_SPEED_INCREASE;
        let id = self.next_id;
        self.next_id += 1;
        self.enemies
            .push(EnemyPlane::new(id, -100.0, y, speed));
        log::debug!("enemy plane {id} spawned at y={y:.0}, speed {speed}px/s");
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    pub fn reset(&mut self) {
        self.enemies.clear();
        self.spawn_timer = 0.0;
        self.next_id = 0;
    }
}
