// main.rs - Conway's Game of Life front-end: egui window or headless run

use std::path::PathBuf;

use clap::Parser;
use conway::{Cell, ConfigError, Driver, EdgePolicy, LifeConfig, Simulation, TickOutcome, Ticker};
use eframe::egui;
use egui::Color32;
use thiserror::Error;
use tokio::sync::watch;
use tracing::info;

mod ui;

#[derive(Error, Debug)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("window error: {0}")]
    Window(String),

    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Conway's Game of Life
#[derive(Parser, Debug)]
#[command(name = "conway")]
#[command(about = "Conway's Game of Life with clamped or wrapped edges")]
struct Args {
    /// TOML config file; the flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<u32>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<u32>,

    /// Edge policy: `clamped` or `wrapped`
    #[arg(long)]
    edge: Option<EdgePolicy>,

    /// Speed multiplier applied to the tick interval
    #[arg(long)]
    speed: Option<f64>,

    /// Start from a random fill with this seed
    #[arg(long)]
    seed: Option<u64>,

    /// Run without a window and print the final grid
    #[arg(long)]
    headless: bool,

    /// Generations to run in headless mode (0 = until it settles or Ctrl-C)
    #[arg(long, default_value_t = 100)]
    generations: u64,
}

impl Args {
    fn config(&self) -> Result<LifeConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => LifeConfig::load(path)?,
            None => LifeConfig::default(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(edge) = self.edge {
            config.edge = edge;
        }
        if let Some(speed) = self.speed {
            config.speed = speed;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Window state: the driver plus purely visual settings.
pub struct LifeApp {
    pub sim: Simulation,
    pub live_color: Color32,
    pub dead_color: Color32,
    pub density: f64,
    pub next_seed: u64,
}

impl LifeApp {
    fn new(sim: Simulation, density: f64, next_seed: u64) -> Self {
        Self {
            sim,
            live_color: Color32::from_rgb(255, 255, 0),
            dead_color: Color32::from_rgb(40, 40, 40),
            density,
            next_seed,
        }
    }
}

fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = args.config()?;
    info!(
        width = config.width,
        height = config.height,
        edge = %config.edge,
        "starting Conway's Game of Life"
    );

    let mut sim = config.build_simulation()?;
    if let Some(seed) = args.seed {
        sim.randomize(seed, config.random_density);
    }

    if args.headless {
        return run_headless(sim, args.generations);
    }
    run_window(&config, sim, args.seed.map_or(0, |s| s.wrapping_add(1)))
}

fn run_window(config: &LifeConfig, sim: Simulation, next_seed: u64) -> Result<(), AppError> {
    let grid_w = config.width as f32 * config.cell_size as f32;
    let grid_h = config.height as f32 * config.cell_size as f32;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([grid_w.max(640.0) + 32.0, grid_h + 220.0]),
        ..Default::default()
    };

    let app = LifeApp::new(sim, config.random_density, next_seed);
    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(|_cc| Box::new(app)),
    )
    .map_err(|err| AppError::Window(err.to_string()))
}

/// Headless driver: logs every generation at `info`.
struct Logged<'a>(&'a mut Simulation);

impl Driver for Logged<'_> {
    fn on_tick(&mut self) -> TickOutcome {
        let outcome = self.0.on_tick();
        if let TickOutcome::Advanced(t) | TickOutcome::Settled(t) = outcome {
            info!(
                generation = t.generation,
                births = t.births,
                deaths = t.deaths,
                population = t.population,
                "generation"
            );
        }
        outcome
    }

    fn on_cell_click(&mut self, row: i32, col: i32) -> conway::Result<Option<Cell>> {
        self.0.on_cell_click(row, col)
    }

    fn on_start_stop(&mut self) -> bool {
        self.0.on_start_stop()
    }

    fn is_running(&self) -> bool {
        self.0.is_running()
    }
}

fn run_headless(mut sim: Simulation, generations: u64) -> Result<(), AppError> {
    let runtime = tokio::runtime::Runtime::new()?;
    let ticker = Ticker::from_schedule(sim.schedule());
    let limit = (generations > 0).then_some(generations);
    let (stop_tx, stop_rx) = watch::channel(false);

    sim.on_start_stop();
    let ticks = runtime.block_on(async {
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                let _ = stop_tx.send(true);
            }
        });
        ticker.drive(&mut Logged(&mut sim), stop_rx, limit).await
    });

    let engine = sim.engine();
    info!(
        ticks,
        generation = engine.generation(),
        population = engine.population(),
        settled = !sim.is_running(),
        "headless run finished"
    );
    println!("{}", engine.grid());
    Ok(())
}
