//! Headless симуляция BRAWL
//!
//! Seeded дуэль двух AI агентов до смерти одного из них (или лимита тиков).
//! Опционально: путь к RON конфигу первым аргументом.

use std::process::ExitCode;
use bevy::prelude::*;
use brawl_simulation::spawn::notify_spawned;
use brawl_simulation::{
    agent_status, create_headless_app_with, log_error, run_fixed_tick, spawn_combatant, CombatConfig,
    SimulationPlugin,
};

const MAX_TICKS: usize = 6000;

fn load_config() -> Result<CombatConfig, String> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(CombatConfig::default());
    };
    let source = std::fs::read_to_string(&path).map_err(|error| format!("{}: {}", path, error))?;
    CombatConfig::from_ron_str(&source).map_err(|error| format!("{}: {}", path, error))
}

fn main() -> ExitCode {
    let config = match load_config() {
        Ok(config) => config,
        Err(error) => {
            log_error(&format!("config: {}", error));
            return ExitCode::FAILURE;
        }
    };

    println!("Starting BRAWL headless duel (seed: {})", config.seed);

    let mut app = create_headless_app_with(SimulationPlugin::from(&config));
    let world = app.world_mut();
    let red = spawn_combatant(world, &config.enemy, Vec3::new(-10.0, 0.0, 0.0), 1);
    let blue = spawn_combatant(world, &config.enemy, Vec3::new(10.0, 0.0, 0.0), 2);
    notify_spawned(world, red, blue);
    notify_spawned(world, blue, red);

    for tick in 0..MAX_TICKS {
        run_fixed_tick(&mut app);

        let (Some(red_status), Some(blue_status)) = (agent_status(app.world(), red), agent_status(app.world(), blue))
        else {
            log_error("combatant disappeared mid-duel");
            return ExitCode::FAILURE;
        };

        if tick % 60 == 0 {
            println!(
                "Tick {}: red {:?} {:.0}% | blue {:?} {:.0}%",
                tick,
                red_status.state,
                red_status.health_fraction * 100.0,
                blue_status.state,
                blue_status.health_fraction * 100.0
            );
        }

        if !red_status.alive || !blue_status.alive {
            let result = match (red_status.alive, blue_status.alive) {
                (true, false) => "red wins",
                (false, true) => "blue wins",
                _ => "double knockout",
            };
            println!("Duel over at tick {}: {}", tick, result);
            return ExitCode::SUCCESS;
        }
    }

    println!("Duel timed out after {} ticks", MAX_TICKS);
    ExitCode::SUCCESS
}
