//! Asteroid Field entry point
//!
//! Runs the simulation headless for a fixed number of frames.
//! Usage: `asteroid-field [settings.json]`

use asteroid_field::protocol::{Command, CommandMessage, CommandState};
use asteroid_field::render::HeadlessRenderer;
use asteroid_field::{Game, Settings};

fn main() {
    env_logger::init();
    log::info!("Asteroid Field (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };

    if let Err(e) = run(&settings) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(settings: &Settings) -> asteroid_field::Result<()> {
    let mut game = Game::new(settings, HeadlessRenderer::new(800, 600))?;

    // Same path a network client would take
    let input = game.command_sender();
    for cmd in [Command::Accelerate, Command::TurnLeft] {
        // The receiver lives in `game`, so this cannot fail
        let _ = input.send(CommandMessage::new(cmd, CommandState::Start));
    }

    for _ in 0..settings.frames {
        game.update()?;
    }

    let ship = &game.world().ships[0];
    log::info!(
        "After {} frames: ship at ({:.2}, {:.2}) heading {:.2} rad, speed {:.3}",
        game.world().time_ticks,
        ship.body.position.x,
        ship.body.position.y,
        ship.body.rotation.z,
        ship.body.velocity.length()
    );

    game.destroy();
    Ok(())
}
