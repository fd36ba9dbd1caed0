use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use dash_oxide::refresh::Ticker;
use dash_oxide::{logging, DashError, Dashboard, DashboardConfig, Dataset, InputEvent, Result};

#[derive(Parser)]
#[command(name = "dash-oxide", version, about = "Reactive engine for a filterable data dashboard")]
struct Cli {
    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the controls and the first render of every view as JSON
    Render { data: PathBuf },
    /// Replay a JSON array of event batches, one cycle per batch
    Replay {
        data: PathBuf,
        #[arg(long)]
        events: PathBuf,
    },
    /// Write the full, unfiltered dataset as CSV
    Export {
        data: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Run the periodic refresh loop
    Watch {
        data: PathBuf,
        #[arg(long, default_value_t = 3)]
        ticks: u64,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match DashboardConfig::load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", e.title(), e.user_message());
            std::process::exit(2);
        }
    };
    logging::init(&config.log_filter);

    if let Err(e) = run(cli.command, config) {
        tracing::error!(error = %e, "command failed");
        eprintln!("{}: {}", e.title(), e.user_message());
        std::process::exit(1);
    }
}

fn run(command: Command, config: DashboardConfig) -> Result<()> {
    match command {
        Command::Render { data } => {
            let mut dashboard = open(&data, config)?;
            let controls = dashboard.controls();
            let views = dashboard.initial_render()?;
            print_json(&serde_json::json!({
                "title": dashboard.config.title,
                "source": dashboard.dataset().source_path().map(|p| p.display().to_string()),
                "controls": controls,
                "views": views,
            }))
        }
        Command::Replay { data, events } => {
            let contents = std::fs::read_to_string(&events)?;
            let batches: Vec<Vec<InputEvent>> = serde_json::from_str(&contents)?;
            let mut dashboard = open(&data, config)?;

            print_json(&dashboard.initial_render()?)?;
            for batch in &batches {
                print_json(&dashboard.process(batch)?)?;
            }
            info!(batches = batches.len(), "replay finished");
            Ok(())
        }
        Command::Export { data, out } => {
            let dataset = Dataset::load(&data)?;
            let out = out.unwrap_or_else(|| PathBuf::from(&config.export_file_name));
            dataset.write_csv(&out)
        }
        Command::Watch { data, ticks } => {
            let mut dashboard = open(&data, config)?;
            print_json(&dashboard.initial_render()?)?;

            let mut ticker = Ticker::from_millis(dashboard.config.refresh_interval_ms, Instant::now());
            info!(interval = ?ticker.interval(), ticks, "refresh loop started");
            while ticker.ticks() < ticks {
                std::thread::sleep(ticker.time_until_next(Instant::now()));
                if let Some(tick) = ticker.poll(Instant::now()) {
                    print_json(&dashboard.process(&[tick])?)?;
                }
            }
            Ok(())
        }
    }
}

fn open(data: &Path, config: DashboardConfig) -> Result<Dashboard> {
    let dataset = Arc::new(Dataset::load(data)?);
    Ok(Dashboard::new(dataset, config))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer(&mut out, value).map_err(DashError::from)?;
    writeln!(out)?;
    Ok(())
}
