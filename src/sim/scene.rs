//! Frame loop, phase machine and collision resolution
//!
//! `Game` composes the managers and drives them once per frame in a fixed
//! order, then resolves collisions in a fixed sweep order. Determinism
//! contract: two games built with the same seed and fed the same pointer
//! inputs and deltas produce identical runs.

use crate::consts::*;
use crate::events::{EventBus, GameEvent};
use crate::sim::enemies::EnemyPlaneManager;
use crate::sim::entities::Airplane;
use crate::sim::obstacles::ObstacleManager;
use crate::sim::powerups::PowerUpManager;
use crate::sim::score::Scoreboard;
use crate::storage::HighScoreStore;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Before the first start command
    NotPlaying,
    /// Active run
    Playing,
    /// Run ended; waiting for a restart
    GameOver,
}

pub struct Game {
    phase: GamePhase,
    pub(crate) airplane: Airplane,
    pub(crate) obstacles: ObstacleManager,
    pub(crate) enemies: EnemyPlaneManager,
    pub(crate) power_ups: PowerUpManager,
    pub(crate) scoreboard: Scoreboard,
    pub(crate) events: EventBus,
    store: Box<dyn HighScoreStore>,
    distance_m: f32,
}

impl Game {
    /// Build a game around an injected persistence backend. The high score
    /// is loaded once, here. Each manager gets its own RNG stream derived
    /// from the seed so their draws never interleave.
    pub fn new(store: Box<dyn HighScoreStore>, seed: u64) -> Self {
        let high_score = store.load_high_score();
        Self {
            phase: GamePhase::NotPlaying,
            airplane: Airplane::new(),
            obstacles: ObstacleManager::new(seed),
            enemies: EnemyPlaneManager::new(seed ^ 0x9e37_79b9),
            power_ups: PowerUpManager::new(seed ^ 0x85eb_ca6b),
            scoreboard: Scoreboard::new(high_score),
            events: EventBus::new(),
            store,
            distance_m: 0.0,
        }
    }

    /// Subscribe to gameplay notifications.
    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    /// Start a new run. Doubles as restart: every manager and counter is
    /// torn down explicitly before re-entering the playing phase.
    pub fn start(&mut self) {
        self.airplane = Airplane::new();
        self.obstacles.reset();
        self.enemies.reset();
        self.power_ups.reset();
        self.scoreboard.reset(&mut self.events);
        self.distance_m = 0.0;
        self.phase = GamePhase::Playing;
        log::info!("game started");
        self.events.emit(GameEvent::GameStart);
    }

    /// Feed the pointer's vertical position. Ignored outside the playing
    /// phase and once the airplane is dead.
    pub fn set_pointer_y(&mut self, y: f32) {
        if self.phase == GamePhase::Playing && self.airplane.alive {
            self.airplane.set_target_y(y);
        }
    }

    /// Notify collaborators of a pause. The core holds no pause flag; the
    /// host simply stops calling `update` while paused.
    pub fn pause(&mut self) {
        if self.phase == GamePhase::Playing {
            self.events.emit(GameEvent::GamePause);
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Playing {
            self.events.emit(GameEvent::GameResume);
        }
    }

    /// Advance the simulation by one frame.
    pub fn update(&mut self, delta_ms: f32) {
        if self.phase != GamePhase::Playing {
            return;
        }

        self.distance_m += DISTANCE_METERS_PER_SECOND * delta_ms / 1000.0;

        self.airplane.update(delta_ms);
        self.obstacles.update(delta_ms, self.airplane.pos.y);
        self.power_ups
            .update(delta_ms, &self.enemies.enemies, &mut self.events);
        self.scoreboard
            .update(delta_ms, &mut *self.store, &mut self.events);
        self.enemies.update(
            delta_ms,
            self.airplane.pos.y,
            self.obstacles.difficulty_level(),
        );

        for _ in self.obstacles.passed_obstacles(self.airplane.pos.x) {
            self.scoreboard
                .obstacle_passed(&mut *self.store, &mut self.events);
        }

        if self.airplane.alive && self.power_ups.can_fire() {
            self.power_ups.fire_projectile(
                self.airplane.pos.x + 30.0,
                self.airplane.pos.y,
                &self.enemies.enemies,
            );
        }

        self.resolve_collisions();

        if self.scoreboard.is_game_over() {
            self.game_over();
        }
    }

    /// Fixed sweep order: airplane/obstacle, airplane/power-up,
    /// airplane/enemy, projectile/obstacle, projectile/enemy. Entities are
    /// marked dead during the sweeps and pruned together at the end, so a
    /// projectile can take out one obstacle and one enemy in the same frame.
    fn resolve_collisions(&mut self) {
        if self.airplane.alive {
            let plane_bounds = self.airplane.bounds();
            let mut hits = 0;

            for obstacle in &mut self.obstacles.obstacles {
                if obstacle.alive && plane_bounds.intersects(&obstacle.bounds()) {
                    obstacle.alive = false;
                    hits += 1;
                }
            }

            let mut collected = Vec::new();
            for power_up in &mut self.power_ups.power_ups {
                if !power_up.collected && plane_bounds.intersects(&power_up.bounds()) {
                    power_up.collected = true;
                    collected.push(power_up.kind);
                }
            }
            for kind in collected {
                self.power_ups.activate(kind);
                self.events.emit(GameEvent::PowerUpCollected { kind });
            }

            for enemy in &mut self.enemies.enemies {
                if enemy.alive && plane_bounds.intersects(&enemy.bounds()) {
                    enemy.alive = false;
                    hits += 1;
                }
            }

            for _ in 0..hits {
                self.airplane_hit();
            }
        }

        let mut destroyed = 0;
        for projectile in &mut self.power_ups.projectiles {
            if !projectile.alive {
                continue;
            }
            let bounds = projectile.bounds();
            let mut hit = false;

            if let Some(obstacle) = self
                .obstacles
                .obstacles
                .iter_mut()
                .find(|o| o.alive && bounds.intersects(&o.bounds()))
            {
                obstacle.alive = false;
                destroyed += 1;
                hit = true;
            }

            if let Some(enemy) = self
                .enemies
                .enemies
                .iter_mut()
                .find(|e| e.alive && bounds.intersects(&e.bounds()))
            {
                enemy.alive = false;
                destroyed += 1;
                hit = true;
            }

            if hit {
                projectile.alive = false;
            }
        }
        for _ in 0..destroyed {
            self.scoreboard
                .obstacle_destroyed(&mut *self.store, &mut self.events);
        }

        self.obstacles.obstacles.retain(|o| o.alive);
        self.enemies.enemies.retain(|e| e.alive);
        self.power_ups.power_ups.retain(|p| !p.collected);
        self.power_ups.projectiles.retain(|p| p.alive);
    }

    /// One damaging collision. Once the airplane is dead, further hits in
    /// the same frame are ignored; death is handled exactly once.
    fn airplane_hit(&mut self) {
        if !self.airplane.alive {
            return;
        }
        self.scoreboard.lose_life(&mut self.events);
        if self.scoreboard.is_game_over() {
            self.airplane.die();
        }
    }

    fn game_over(&mut self) {
        self.phase = GamePhase::GameOver;
        let score = self.scoreboard.score();
        let high_score = self.scoreboard.high_score();
        let time_survived_secs = self.scoreboard.time_survived_secs();
        log::info!("game over - score {score}, high score {high_score}, survived {time_survived_secs}s");
        self.events.emit(GameEvent::GameOver {
            score,
            high_score,
            time_survived_secs,
        });
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.scoreboard.score()
    }

    pub fn high_score(&self) -> u32 {
        self.scoreboard.high_score()
    }

    pub fn lives(&self) -> i32 {
        self.scoreboard.lives()
    }

    /// Forward distance traveled this run, in meters.
    pub fn distance_traveled_m(&self) -> f32 {
        self.distance_m
    }

    pub fn active_power_up(&self) -> Option<crate::sim::PowerUpKind> {
        self.power_ups.active_kind()
    }

    /// Time until the next power-up spawn-chance roll (ms).
    pub fn time_until_next_power_up_check(&self) -> f32 {
        self.power_ups.time_until_next_spawn_check()
    }
}
