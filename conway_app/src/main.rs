// main.rs - Conway's Game of Life: egui window or headless tokio runner

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use conway_core::AppConfig;

mod app;
mod headless;
mod view;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML config file; missing file means defaults
    #[arg(short, long, default_value = "life.toml")]
    config: PathBuf,

    #[arg(long)]
    rows: Option<usize>,

    #[arg(long)]
    cols: Option<usize>,

    /// Milliseconds between generations
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Probability that a cell starts dead when randomizing (0.8 = ~20% alive)
    #[arg(long)]
    density: Option<f64>,

    /// Fixed RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Start running immediately
    #[arg(long)]
    autostart: bool,

    /// Stop when the board repeats a recent generation
    #[arg(long)]
    stop_on_cycle: bool,

    /// Run without a window
    #[arg(long)]
    headless: bool,

    /// Headless: stop after this many generations
    #[arg(long)]
    generations: Option<u64>,

    /// Headless: compute each row in its own task
    #[arg(long)]
    concurrent: bool,

    /// Headless: print the final board
    #[arg(long)]
    print: bool,
}

impl Args {
    fn apply(&self, config: &mut AppConfig) {
        let session = &mut config.session;
        if let Some(rows) = self.rows {
            session.rows = rows;
        }
        if let Some(cols) = self.cols {
            session.cols = cols;
        }
        if let Some(interval_ms) = self.interval_ms {
            session.interval_ms = interval_ms;
        }
        if let Some(density) = self.density {
            session.seed_density = density;
        }
        if self.seed.is_some() {
            session.rng_seed = self.seed;
        }
        session.autostart |= self.autostart;
        session.stop_on_cycle |= self.stop_on_cycle;
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "conway=info,conway_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config = AppConfig::load(&args.config)?;
    args.apply(&mut config);
    config.validate()?;

    if args.headless {
        let runtime = tokio::runtime::Runtime::new()?;
        let summary = runtime.block_on(headless::run(config.session, args.generations, args.concurrent))?;
        if args.print {
            if let Some(board) = &summary.board {
                print!("{}", headless::board_to_text(board));
            }
        }
        println!(
            "generation {} | live {}{}",
            summary.generation,
            summary.live,
            if summary.extinct { " | extinct" } else { "" }
        );
        return Ok(());
    }

    app::run(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_file_values() {
        let args = Args::parse_from(["conway", "--rows", "8", "--density", "0.5", "--autostart"]);
        let mut config = AppConfig::default();
        args.apply(&mut config);
        assert_eq!(config.session.rows, 8);
        assert_eq!(config.session.cols, conway_core::config::DEFAULT_COLS);
        assert_eq!(config.session.seed_density, 0.5);
        assert!(config.session.autostart);
    }
}
