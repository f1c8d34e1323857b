//! Score, lives and high score tracking
//!
//! Score accrues continuously at a fixed rate while playing, plus flat
//! bonuses for passing and destroying obstacles. The integer score carries
//! its fractional remainder across frames so the rate holds exactly even at
//! small deltas. The high score is re-checked on every addition and persisted
//! the moment it changes.

use crate::consts::*;
use crate::events::{EventBus, GameEvent};
use crate::storage::HighScoreStore;

pub struct Scoreboard {
    score: u32,
    high_score: u32,
    lives: i32,
    time_survived_ms: f32,
    /// Fractional score not yet banked into the integer total
    score_carry: f32,
}

impl Scoreboard {
    pub fn new(high_score: u32) -> Self {
        Self {
            score: 0,
            high_score,
            lives: STARTING_LIVES,
            time_survived_ms: 0.0,
            score_carry: 0.0,
        }
    }

    /// Accrue survival time and time-based score.
    pub fn update(&mut self, delta_ms: f32, store: &mut dyn HighScoreStore, events: &mut EventBus) {
        self.time_survived_ms += delta_ms;
        self.score_carry += SCORE_PER_SECOND * delta_ms / 1000.0;
        let whole = self.score_carry.floor();
        if whole >= 1.0 {
            self.score_carry -= whole;
            self.add_score(whole as u32, store, events);
        }
    }

    pub fn add_score(&mut self, points: u32, store: &mut dyn HighScoreStore, events: &mut EventBus) {
        self.score += points;
        events.emit(GameEvent::ScoreUpdate { score: self.score });

        if self.score > self.high_score {
            self.high_score = self.score;
            store.save_high_score(self.high_score);
            events.emit(GameEvent::HighScoreUpdate {
                high_score: self.high_score,
            });
        }
    }

    pub fn obstacle_passed(&mut self, store: &mut dyn HighScoreStore, events: &mut EventBus) {
        self.add_score(SCORE_PER_OBSTACLE_PASSED, store, events);
    }

    pub fn obstacle_destroyed(&mut self, store: &mut dyn HighScoreStore, events: &mut EventBus) {
        self.add_score(SCORE_PER_OBSTACLE_DESTROYED, store, events);
        events.emit(GameEvent::ObstacleDestroyed);
    }

    pub fn lose_life(&mut self, events: &mut EventBus) {
        self.lives -= 1;
        log::info!("life lost, {} remaining", self.lives);
        events.emit(GameEvent::LivesUpdate { lives: self.lives });
    }

    pub fn is_game_over(&self) -> bool {
        self.lives <= 0
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn lives(&self) -> i32 {
        self.lives
    }

    pub fn time_survived_secs(&self) -> u32 {
        (self.time_survived_ms / 1000.0) as u32
    }

    /// Zero everything for a new run and re-announce the fresh counters.
    pub fn reset(&mut self, events: &mut EventBus) {
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.time_survived_ms = 0.0;
        self.score_carry = 0.0;
        events.emit(GameEvent::ScoreUpdate { score: 0 });
        events.emit(GameEvent::LivesUpdate {
            lives: STARTING_LIVES,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn capture(bus: &mut EventBus) -> Rc<RefCell<Vec<GameEvent>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        bus.on(move |event| sink.borrow_mut().push(event.clone()));
        log
    }

    #[test]
    fn test_score_rate_exact_at_small_deltas() {
        let mut board = Scoreboard::new(0);
        let mut store = MemoryStore::new();
        let mut events = EventBus::new();

        // 10 pts/s: a single 100 ms step banks exactly one point
        board.update(100.0, &mut store, &mut events);
        assert_eq!(board.score(), 1);

        // Ten 10 ms steps bank exactly one more, no drift
        for _ in 0..10 {
            board.update(10.0, &mut store, &mut events);
        }
        assert_eq!(board.score(), 2);
    }

    #[test]
    fn test_score_rate_over_a_minute() {
        let mut board = Scoreboard::new(0);
        let mut store = MemoryStore::new();
        let mut events = EventBus::new();

        for _ in 0..600 {
            board.update(100.0, &mut store, &mut events);
        }
        assert_eq!(board.score(), 600);
        assert_eq!(board.time_survived_secs(), 60);
    }

    #[test]
    fn test_bonuses() {
        let mut board = Scoreboard::new(0);
        let mut store = MemoryStore::new();
        let mut events = EventBus::new();
        let log = capture(&mut events);

        board.obstacle_passed(&mut store, &mut events);
        assert_eq!(board.score(), SCORE_PER_OBSTACLE_PASSED);

        board.obstacle_destroyed(&mut store, &mut events);
        assert_eq!(
            board.score(),
            SCORE_PER_OBSTACLE_PASSED + SCORE_PER_OBSTACLE_DESTROYED
        );
        assert!(log.borrow().contains(&GameEvent::ObstacleDestroyed));
    }

    #[test]
    fn test_high_score_persisted_once_per_change() {
        let mut board = Scoreboard::new(100);
        let mut store = MemoryStore::with_high_score(100);
        let mut events = EventBus::new();
        let log = capture(&mut events);

        // Below the high score: no save, no high-score notification
        board.add_score(50, &mut store, &mut events);
        assert_eq!(store.save_count(), 0);

        // Crossing it: exactly one save per exceeding add
        board.add_score(60, &mut store, &mut events);
        assert_eq!(store.save_count(), 1);
        assert_eq!(board.high_score(), 110);
        assert!(log
            .borrow()
            .contains(&GameEvent::HighScoreUpdate { high_score: 110 }));

        board.add_score(10, &mut store, &mut events);
        assert_eq!(store.save_count(), 2);
        assert_eq!(store.load_high_score(), 120);
    }

    #[test]
    fn test_three_lives_to_game_over() {
        let mut board = Scoreboard::new(0);
        let mut events = EventBus::new();
        let log = capture(&mut events);

        assert_eq!(board.lives(), 3);
        board.lose_life(&mut events);
        board.lose_life(&mut events);
        assert!(!board.is_game_over());
        board.lose_life(&mut events);
        assert!(board.is_game_over());

        let lives_events: Vec<_> = log
            .borrow()
            .iter()
            .filter_map(|e| match e {
                GameEvent::LivesUpdate { lives } => Some(*lives),
                _ => None,
            })
            .collect();
        assert_eq!(lives_events, vec![2, 1, 0]);
    }

    #[test]
    fn test_reset_keeps_high_score() {
        let mut board = Scoreboard::new(0);
        let mut store = MemoryStore::new();
        let mut events = EventBus::new();

        board.add_score(500, &mut store, &mut events);
        board.lose_life(&mut events);
        board.update(5000.0, &mut store, &mut events);

        let log = capture(&mut events);
        board.reset(&mut events);

        assert_eq!(board.score(), 0);
        assert_eq!(board.lives(), STARTING_LIVES);
        assert_eq!(board.time_survived_secs(), 0);
        assert_eq!(board.high_score(), 550);
        assert_eq!(
            *log.borrow(),
            vec![
                GameEvent::ScoreUpdate { score: 0 },
                GameEvent::LivesUpdate { lives: 3 },
            ]
        );
    }
}
