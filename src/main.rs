//! Headless demo: runs the simulation at a fixed 60 fps with a scripted
//! pilot until the run ends, logging notifications along the way.

use std::cell::RefCell;
use std::rc::Rc;

use slide_plane::consts::GAME_HEIGHT;
use slide_plane::{Game, GameEvent, JsonFileStore};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let store = JsonFileStore::new("slide-plane-save.json");
    let mut game = Game::new(Box::new(store), 0xC0FFEE);

    let game_over = Rc::new(RefCell::new(false));
    let flag = Rc::clone(&game_over);
    game.events_mut().on(move |event| match event {
        GameEvent::GameOver {
            score,
            high_score,
            time_survived_secs,
        } => {
            log::info!("game over: score {score}, best {high_score}, survived {time_survived_secs}s");
            *flag.borrow_mut() = true;
        }
        GameEvent::PowerUpCollected { kind } => log::info!("picked up {kind:?}"),
        GameEvent::PowerUpExpired => log::info!("weapon expired"),
        GameEvent::LivesUpdate { lives } => log::info!("lives: {lives}"),
        GameEvent::HighScoreUpdate { high_score } => log::info!("new high score: {high_score}"),
        _ => {}
    });

    game.start();

    // Scripted pilot: a slow sine sweep of the pointer. Caps at five
    // simulated minutes in case the pilot turns out to be too good.
    let delta_ms = 1000.0 / 60.0;
    let mut elapsed_ms = 0.0f32;
    while !*game_over.borrow() && elapsed_ms < 300_000.0 {
        let y = GAME_HEIGHT / 2.0 + (GAME_HEIGHT / 3.0) * (elapsed_ms / 1000.0 * 0.8).sin();
        game.set_pointer_y(y);
        game.update(delta_ms);
        elapsed_ms += delta_ms;
    }

    println!("final score: {}", game.score());
    println!("high score:  {}", game.high_score());
    println!("distance:    {:.0} m", game.distance_traveled_m());
}
