//! Obstacle spawning and difficulty escalation
//!
//! Two independent spawn timers feed the obstacle field: a periodic one whose
//! interval shrinks with difficulty, and an "aimed" one that drops a crate on
//! the player's current altitude at a randomized cadence. Difficulty ratchets
//! on a fixed wall-clock interval and never decays.

use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entities::{Obstacle, ObstacleKind};
use crate::consts::*;

pub struct ObstacleManager {
    pub(crate) obstacles: Vec<Obstacle>,
    spawn_timer: f32,
    aimed_spawn_timer: f32,
    aimed_spawn_interval: f32,
    current_spawn_interval: f32,
    current_speed: f32,
    difficulty_level: u32,
    difficulty_timer: f32,
    /// Last known player y, used by aimed spawns
    player_y: f32,
    /// Obstacles already reported as passed, by id
    passed: HashSet<u32>,
    next_id: u32,
    rng: Pcg32,
}

impl ObstacleManager {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let aimed_spawn_interval = Self::draw_aimed_interval(&mut rng);
        Self {
            obstacles: Vec::new(),
            spawn_timer: 0.0,
            aimed_spawn_timer: 0.0,
            aimed_spawn_interval,
            current_spawn_interval: OBSTACLE_SPAWN_INTERVAL,
            current_speed: OBSTACLE_START_SPEED,
            difficulty_level: 0,
            difficulty_timer: 0.0,
            player_y: AIRPLANE_START_Y,
            passed: HashSet::new(),
            next_id: 0,
            rng,
        }
    }

    fn draw_aimed_interval(rng: &mut Pcg32) -> f32 {
        rng.random_range(AIMED_SPAWN_MIN_INTERVAL..AIMED_SPAWN_MAX_INTERVAL)
    }

    pub fn update(&mut self, delta_ms: f32, player_y: f32) {
        self.player_y = player_y;

        self.spawn_timer += delta_ms;
        if self.spawn_timer >= self.current_spawn_interval {
            self.spawn_timer = 0.0;
            self.spawn_obstacle();
        }

        self.aimed_spawn_timer += delta_ms;
        if self.aimed_spawn_timer >= self.aimed_spawn_interval {
            self.aimed_spawn_timer = 0.0;
            self.spawn_aimed_obstacle();
            self.aimed_spawn_interval = Self::draw_aimed_interval(&mut self.rng);
        }

        self.difficulty_timer += delta_ms;
        if self.difficulty_timer >= DIFFICULTY_INCREASE_INTERVAL
            && self.difficulty_level < MAX_DIFFICULTY_LEVEL
        {
            self.difficulty_timer = 0.0;
            self.difficulty_level += 1;
            self.current_spawn_interval =
                (self.current_spawn_interval - OBSTACLE_SPAWN_DECREASE).max(OBSTACLE_MIN_SPAWN_INTERVAL);
            self.current_speed += OBSTACLE_SPEED_INCREASE;
            log::debug!(
                "difficulty level {} - spawn interval {}ms, speed {}px/s",
                self.difficulty_level,
                self.current_spawn_interval,
                self.current_speed
            );
        }

        for obstacle in &mut self.obstacles {
            obstacle.update(delta_ms, &mut self.rng);
        }
        self.obstacles.retain(|o| o.alive);
    }

    fn spawn_obstacle(&mut self) {
        let size = self.rng.random_range(OBSTACLE_MIN_SIZE..OBSTACLE_MAX_SIZE);

        // 30% of the time, spawn in the middle band where the player tends
        // to fly; otherwise anywhere the crate fully fits
        let y = if self.rng.random::<f32>() < 0.3 {
            self.rng.random_range(GAME_HEIGHT * 0.3..GAME_HEIGHT * 0.7)
        } else {
            self.rng.random_range(size..GAME_HEIGHT - size)
        };

        let kind = if self.difficulty_level >= 2 && self.rng.random::<f32>() < 0.4 {
            ObstacleKind::MovingVertical
        } else {
            ObstacleKind::Static
        };

        let id = self.alloc_id();
        self.obstacles.push(Obstacle::new(
            id,
            GAME_WIDTH + 50.0,
            y,
            kind,
            self.current_speed,
            size,
            &mut self.rng,
        ));
    }

    /// Drop a crate straight at the player's last known altitude.
    fn spawn_aimed_obstacle(&mut self) {
        let y = if self.player_y > 0.0 {
            self.player_y
        } else {
            GAME_HEIGHT / 2.0
        };
        let size = self.rng.random_range(OBSTACLE_MIN_SIZE..OBSTACLE_MAX_SIZE);
        let id = self.alloc_id();
        self.obstacles.push(Obstacle::new(
            id,
            GAME_WIDTH + 50.0,
            y,
            ObstacleKind::Static,
            self.current_speed,
            size,
            &mut self.rng,
        ));
    }

    fn alloc_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Ids of obstacles whose trailing edge has crossed the airplane's x,
    /// each reported exactly once for the lifetime of the run.
    pub fn passed_obstacles(&mut self, airplane_x: f32) -> Vec<u32> {
        let mut newly_passed = Vec::new();
        for obstacle in &self.obstacles {
            if obstacle.alive
                && obstacle.has_passed(airplane_x)
                && self.passed.insert(obstacle.id)
            {
                newly_passed.push(obstacle.id);
            }
        }
        newly_passed
    }

    pub fn difficulty_level(&self) -> u32 {
        self.difficulty_level
    }

    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }

    pub fn current_spawn_interval(&self) -> f32 {
        self.current_spawn_interval
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    pub fn reset(&mut self) {
        self.obstacles.clear();
        self.passed.clear();
        self.spawn_timer = 0.0;
        self.aimed_spawn_timer = 0.0;
        self.aimed_spawn_interval = Self::draw_aimed_interval(&mut self.rng);
        self.difficulty_timer = 0.0;
        self.difficulty_level = 0;
        self.current_spawn_interval = OBSTACLE_SPAWN_INTERVAL;
        self.current_speed = OBSTACLE_START_SPEED;
        self.player_y = AIRPLANE_START_Y;
        self.next_id = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> ObstacleManager {
        ObstacleManager::new(1)
    }

    /// Run the manager for a stretch of simulated time at a fixed step.
    fn run_for(m: &mut ObstacleManager, total_ms: f32, step_ms: f32) {
        let mut elapsed = 0.0;
        while elapsed < total_ms {
            m.update(step_ms, AIRPLANE_START_Y);
            elapsed += step_ms;
        }
    }

    #[test]
    fn test_periodic_spawn_after_interval() {
        let mut m = manager();
        m.update(OBSTACLE_SPAWN_INTERVAL - 1.0, 400.0);
        // The aimed timer fires on its own schedule, so only require that
        // crossing the periodic interval adds at least one obstacle
        let before = m.obstacle_count();
        m.update(1.0, 400.0);
        assert!(m.obstacle_count() >= before + 1);
    }

    #[test]
    fn test_spawned_obstacles_within_parameters() {
        let mut m = manager();
        run_for(&mut m, 30_000.0, 16.0);
        assert!(m.obstacle_count() > 0);
        for o in &m.obstacles {
            assert!(o.size >= OBSTACLE_MIN_SIZE && o.size <= OBSTACLE_MAX_SIZE);
            assert!(o.pos.y >= 0.0 && o.pos.y <= GAME_HEIGHT);
            assert!(o.vel.x < 0.0);
        }
    }

    #[test]
    fn test_difficulty_ratchet_and_cap() {
        let mut m = manager();
        assert_eq!(m.difficulty_level(), 0);

        run_for(&mut m, DIFFICULTY_INCREASE_INTERVAL + 100.0, 100.0);
        assert_eq!(m.difficulty_level(), 1);
        assert!((m.current_speed() - (OBSTACLE_START_SPEED + OBSTACLE_SPEED_INCREASE)).abs() < 0.001);

        // Long enough for 20 ratchets; the level must stop at the cap
        run_for(&mut m, DIFFICULTY_INCREASE_INTERVAL * 20.0, 100.0);
        assert_eq!(m.difficulty_level(), MAX_DIFFICULTY_LEVEL);
        assert!(
            m.current_spawn_interval()
                >= OBSTACLE_MIN_SPAWN_INTERVAL
        );
        // 2000 - 10*50 = 1500, above the 800 floor
        assert!((m.current_spawn_interval() - 1500.0).abs() < 0.001);
    }

    #[test]
    fn test_no_moving_obstacles_before_level_two() {
        let mut m = manager();
        run_for(&mut m, 15_000.0, 16.0);
        assert!(m.difficulty_level() < 2);
        assert!(m.obstacles.iter().all(|o| o.kind == ObstacleKind::Static));
    }

    #[test]
    fn test_passed_obstacles_reported_once() {
        let mut m = manager();
        run_for(&mut m, 5000.0, 16.0);
        assert!(m.obstacle_count() > 0);

        // Pretend the airplane sits far right of everything
        let first = m.passed_obstacles(GAME_WIDTH * 3.0);
        assert!(!first.is_empty());
        let second = m.passed_obstacles(GAME_WIDTH * 3.0);
        assert!(second.is_empty());
    }

    #[test]
    fn test_dead_obstacles_filtered() {
        let mut m = manager();
        run_for(&mut m, 5000.0, 16.0);
        for o in &mut m.obstacles {
            o.alive = false;
        }
        let before = m.obstacle_count();
        assert!(before > 0);
        // Next update prunes everything dead (minus anything newly spawned)
        m.update(1.0, 400.0);
        assert!(m.obstacle_count() < before);
        assert!(m.obstacles.iter().all(|o| o.alive));
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut m = manager();
        run_for(&mut m, 60_000.0, 16.0);
        assert!(m.difficulty_level() > 0);
        assert!(m.obstacle_count() > 0);
        let _ = m.passed_obstacles(GAME_WIDTH * 3.0);

        m.reset();
        assert_eq!(m.obstacle_count(), 0);
        assert_eq!(m.difficulty_level(), 0);
        assert!((m.current_speed() - OBSTACLE_START_SPEED).abs() < f32::EPSILON);
        assert!((m.current_spawn_interval() - OBSTACLE_SPAWN_INTERVAL).abs() < f32::EPSILON);
        assert!(m.passed.is_empty());
    }

    #[test]
    fn test_deterministic_with_same_seed() {
        let mut a = ObstacleManager::new(99);
        let mut b = ObstacleManager::new(99);
        run_for(&mut a, 20_000.0, 16.0);
        run_for(&mut b, 20_000.0, 16.0);

        assert_eq!(a.obstacle_count(), b.obstacle_count());
        for (oa, ob) in a.obstacles.iter().zip(&b.obstacles) {
            assert_eq!(oa.id, ob.id);
            assert_eq!(oa.pos, ob.pos);
            assert_eq!(oa.kind, ob.kind);
        }
    }
}
