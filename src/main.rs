mod logger;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser};
use console::style;
use spinline::{FramesSetting, Spinner, SpinnerConfig, Target};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use tracing::info;

/// Run the spinner for a fixed time as a manual smoke check.
#[derive(Parser, Debug)]
#[command(name = "spinline", version, about)]
struct Cli {
    /// Message shown next to the spinner
    #[arg(short, long)]
    message: Option<String>,

    /// Milliseconds between frames
    #[arg(short, long, value_name = "MS")]
    interval_ms: Option<u64>,

    /// How long the simulated work runs
    #[arg(short, long, value_name = "MS", default_value_t = 3000)]
    duration_ms: u64,

    /// Frame style: braille, ascii or line
    #[arg(short, long, value_name = "STYLE")]
    frames: Option<String>,

    /// Draw on stderr instead of stdout
    #[arg(long)]
    stderr: bool,

    /// Don't animate when the output is not a terminal
    #[arg(long)]
    hide_when_piped: bool,

    /// YAML file with spinner settings
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Make the simulated work fail, to check the line is still cleared
    #[arg(long)]
    fail: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging is best effort; the demo still runs without it
    let _log_guard = match logger::init(cli.verbose) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("{} logging disabled: {:#}", style("warning:").yellow(), e);
            None
        }
    };

    let config = resolve_config(&cli)?;
    let mut spinner = Spinner::from_config(&config).context("Invalid spinner settings")?;
    let duration = Duration::from_millis(cli.duration_ms);

    println!("Testing animated progress...");
    info!(duration_ms = cli.duration_ms, fail = cli.fail, "demo:start");

    spinner.run(|| simulate_work(duration, cli.fail))?;

    println!("{} Animation test completed", style("✓").green());
    Ok(())
}

/// Config file values, then command-line overrides.
fn resolve_config(cli: &Cli) -> Result<SpinnerConfig> {
    let mut config = match &cli.config {
        Some(path) => SpinnerConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => SpinnerConfig::default(),
    };

    if let Some(message) = &cli.message {
        config.message = message.clone();
    }
    if let Some(interval_ms) = cli.interval_ms {
        config.interval_ms = interval_ms;
    }
    if let Some(frames) = &cli.frames {
        config.frames = FramesSetting::Style(frames.clone());
    }
    if cli.stderr {
        config.target = Target::Stderr;
    }
    if cli.hide_when_piped {
        config.hide_when_piped = true;
    }

    Ok(config)
}

fn simulate_work(duration: Duration, fail: bool) -> Result<()> {
    thread::sleep(duration);
    if fail {
        bail!("Simulated work failed after {}ms", duration.as_millis());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_cli_overrides_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("spinline.yaml");
        fs::write(&path, "message: From file\ninterval_ms: 200\nframes: line\n").unwrap();

        let cli = Cli::parse_from([
            "spinline",
            "--config",
            path.to_str().unwrap(),
            "--message",
            "From flag",
            "--stderr",
        ]);
        let config = resolve_config(&cli).unwrap();

        assert_eq!(config.message, "From flag");
        assert_eq!(config.interval_ms, 200);
        assert_eq!(config.frames, FramesSetting::Style("line".to_string()));
        assert_eq!(config.target, Target::Stderr);
    }

    #[test]
    fn test_defaults_without_flags() {
        let cli = Cli::parse_from(["spinline"]);
        assert_eq!(cli.duration_ms, 3000);
        assert_eq!(resolve_config(&cli).unwrap(), SpinnerConfig::default());
    }

    #[test]
    fn test_missing_config_file_has_context() {
        let cli = Cli::parse_from(["spinline", "--config", "/nonexistent/spinline.yaml"]);
        let err = resolve_config(&cli).unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }

    #[test]
    fn test_simulated_failure() {
        assert!(simulate_work(Duration::ZERO, true).is_err());
        assert!(simulate_work(Duration::ZERO, false).is_ok());
    }
}
