//! Deterministic gameplay simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Driven by an external clock delta, one call per rendered frame
//! - Seeded RNG only, no wall-clock sampling
//! - Entity collections private to their owning manager
//! - No rendering or platform dependencies

pub mod collision;
pub mod enemies;
pub mod entities;
pub mod obstacles;
pub mod powerups;
pub mod scene;
pub mod score;

pub use collision::Aabb;
pub use enemies::EnemyPlaneManager;
pub use entities::{Airplane, EnemyPlane, Obstacle, ObstacleKind, PowerUp, PowerUpKind, Projectile};
pub use obstacles::ObstacleManager;
pub use powerups::PowerUpManager;
pub use scene::{Game, GamePhase};
pub use score::Scoreboard;
