use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use toyrobot::{logging, Config, Simulator};

/// Drive a toy robot around a table with PLACE/MOVE/LEFT/RIGHT/REPORT commands.
#[derive(Parser)]
#[command(name = "toyrobot", version)]
struct Cli {
    /// Command files, each run as one batch in order. Reads stdin when empty.
    files: Vec<PathBuf>,

    /// Configuration file
    #[arg(short, long, default_value = toyrobot::config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Override the table width
    #[arg(long)]
    width: Option<i32>,

    /// Override the table length
    #[arg(long)]
    length: Option<i32>,

    /// Play animations at wall-clock speed
    #[arg(long)]
    realtime: bool,

    /// Print the per-command timing log and a summary
    #[arg(long)]
    event_log: bool,

    /// Print the per-command timing log as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(&cli.config)?;
    logging::init(&config.logging.level);

    if let Some(width) = cli.width {
        config.grid.width = width;
    }
    if let Some(length) = cli.length {
        config.grid.length = length;
    }
    if cli.realtime {
        config.simulation.realtime = true;
    }

    let mut simulator = Simulator::from_config(&config).context("build table")?;

    for text in read_batches(&cli.files)? {
        let outcome = simulator.run_text(&text)?;
        for report in &outcome.reports {
            println!("{}", report);
        }
        for error in &outcome.errors {
            eprintln!("error: {}", error);
        }
    }

    let log = simulator.event_log();
    if cli.event_log || config.logging.show_event_log {
        log.print_with_durations();
        println!("{}", log.summary());
    }
    if cli.json {
        println!("{}", log.to_json().context("serialize event log")?);
    }

    Ok(())
}

/// Defaults when `path` does not exist; a file that exists but cannot be
/// read or parsed is an error.
fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    Config::load_from(path).with_context(|| format!("load config {}", path.display()))
}

fn read_batches(files: &[PathBuf]) -> Result<Vec<String>> {
    if files.is_empty() {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).context("read commands from stdin")?;
        return Ok(vec![text]);
    }

    files
        .iter()
        .map(|path| {
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_uses_defaults() {
        let config = load_config(Path::new("does/not/exist.toml")).unwrap();
        assert_eq!(config.grid.width, 5);
    }

    #[test]
    fn test_unparsable_config_is_an_error() {
        let path = std::env::temp_dir().join(format!("toyrobot-cli-config-{}.toml", std::process::id()));
        fs::write(&path, "[grid\nwidth = 3").unwrap();
        let result = load_config(&path);
        fs::remove_file(&path).unwrap();

        let err = result.unwrap_err();
        assert!(format!("{:#}", err).contains("load config"));
    }
}
