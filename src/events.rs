//! Observer notification bus
//!
//! The gameplay core pushes outward-facing notifications through an explicit
//! bus injected into the simulation rather than a process-wide singleton, so
//! tests can subscribe in isolation. Delivery is synchronous, in registration
//! order, within the frame that produced the notification.

use crate::sim::PowerUpKind;

/// A notification emitted by the gameplay core for external collaborators
/// (UI, audio, analytics). Payloads carry everything a consumer needs so it
/// never has to poll back into the simulation mid-frame.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    GameStart,
    GameOver {
        score: u32,
        high_score: u32,
        time_survived_secs: u32,
    },
    ScoreUpdate { score: u32 },
    HighScoreUpdate { high_score: u32 },
    LivesUpdate { lives: i32 },
    PowerUpCollected { kind: PowerUpKind },
    PowerUpExpired,
    ObstacleDestroyed,
    GamePause,
    GameResume,
}

type Subscriber = Box<dyn FnMut(&GameEvent)>;

/// Synchronous event bus. Subscribers are invoked in registration order.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Subscriber>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber. There is no unsubscribe; the bus lives exactly
    /// as long as the game that owns it.
    pub fn on<F>(&mut self, callback: F)
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.subscribers.push(Box::new(callback));
    }

    /// Deliver an event to every subscriber, in registration order.
    pub fn emit(&mut self, event: GameEvent) {
        log::trace!("event: {event:?}");
        for subscriber in &mut self.subscribers {
            subscriber(&event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
