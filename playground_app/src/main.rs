//! Physics playground
//!
//! Three spheres drop onto a floor and bounce to rest. The debug panel in the
//! top-right corner spawns more spheres and boxes at random positions.
//!
//! Usage: `physics_playground [config.toml|config.ron]`. Without an argument
//! `playground.toml` in the working directory is used when present.

use playground_engine::foundation::logging;
use playground_engine::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::error::Error;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_FILE: &str = "playground.toml";

struct PlaygroundApp {
    initial_objects: Vec<InitialObject>,
    rng: StdRng,
    elapsed: f32,
}

impl PlaygroundApp {
    fn new(config: &PlaygroundConfig) -> Self {
        Self {
            initial_objects: config.initial_objects.clone(),
            rng: StdRng::from_entropy(),
            elapsed: 0.0,
        }
    }
}

impl Application for PlaygroundApp {
    fn initialize(&mut self, playground: &mut Playground) -> Result<(), AppError> {
        let created = playground.create_initial_objects(&self.initial_objects)?;
        log::info!("Created {} initial objects", created.len());
        Ok(())
    }

    fn update(&mut self, _playground: &mut Playground, delta_time: f32) -> Result<(), AppError> {
        self.elapsed += delta_time;
        Ok(())
    }

    fn on_debug_action(&mut self, playground: &mut Playground, action: DebugAction) -> Result<(), AppError> {
        let pairing = playground.apply(action, &mut self.rng)?;
        log::info!("{:?}: spawned {:?}", action, pairing.kind);
        Ok(())
    }

    fn cleanup(&mut self, playground: &mut Playground) {
        let counters = playground.counters();
        log::info!(
            "Ran for {:.1}s with {} spheres and {} boxes in the scene",
            self.elapsed,
            counters.spheres,
            counters.boxes
        );
    }
}

fn config_path() -> Option<PathBuf> {
    std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|path| path.exists()))
}

fn load_config(path: Option<&Path>) -> Result<PlaygroundConfig, Box<dyn Error>> {
    match path {
        Some(path) => Ok(PlaygroundConfig::load_from_file(path)
            .map_err(|e| format!("Failed to load {}: {}", path.display(), e))?),
        None => Ok(PlaygroundConfig::default()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("PANIC: {}", panic_info);
        if let Some(location) = panic_info.location() {
            eprintln!("  at {}:{}:{}", location.file(), location.line(), location.column());
        }
    }));

    let path = config_path();
    let config = load_config(path.as_deref())?;
    logging::init(&config.log_level);

    match &path {
        Some(path) => log::info!("Starting physics playground with {}", path.display()),
        None => log::info!("Starting physics playground with default settings"),
    }

    let app = PlaygroundApp::new(&config);
    match Engine::run(config, app) {
        Ok(()) => {
            log::info!("Playground exited normally");
            Ok(())
        }
        Err(e) => {
            log::error!("Playground failed: {}", e);
            Err(e.into())
        }
    }
}
