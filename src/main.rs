use std::path::PathBuf;
use std::thread;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use treeplay::{Phase, PlaybackConfig, PlaybackController, Player, Script, SearchTree, Snapshot};

#[derive(Parser, Debug)]
#[command(name = "treeplay", about = "Replay a scripted binary search tree animation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a script and print every frame.
    Play {
        /// Script file (`<kind> <value> [delay-ms]` per line); defaults to the showcase script.
        #[arg(long)]
        script: Option<PathBuf>,
        /// Canvas width used for layout.
        #[arg(long, default_value_t = 500.0)]
        width: f64,
        /// Canvas height used for layout.
        #[arg(long, default_value_t = 300.0)]
        height: f64,
        /// Number of full passes to play before exiting.
        #[arg(long, default_value_t = 1)]
        loops: usize,
        /// Sleep between frames instead of fast-forwarding.
        #[arg(long)]
        realtime: bool,
        /// Emit one JSON object per frame.
        #[arg(long)]
        json: bool,
    },
    /// Print the built-in showcase script.
    Script,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            script,
            width,
            height,
            loops,
            realtime,
            json,
        } => run_play(script, width, height, loops, realtime, json)?,
        Commands::Script => print!("{}", Script::default()),
    }

    Ok(())
}

fn run_play(
    script_path: Option<PathBuf>,
    width: f64,
    height: f64,
    loops: usize,
    realtime: bool,
    json: bool,
) -> Result<()> {
    let script = match &script_path {
        Some(path) => load_script(path)?,
        None => Script::default(),
    };
    if script.is_empty() {
        println!("Script is empty; nothing to play.");
        return Ok(());
    }

    let config = PlaybackConfig::default()
        .with_script(script)
        .with_canvas(width, height)
        .context("invalid canvas size")?;
    let controller = PlaybackController::new(SearchTree::new(), config);
    let mut player = Player::virtual_time(controller);

    player.start();
    emit(&player.snapshot(), json)?;

    let mut completed = 0;
    while completed < loops {
        if realtime {
            if let Some(due) = player.scheduler().next_due() {
                thread::sleep(due.saturating_sub(player.now()));
            }
        }
        if !player.step() {
            break;
        }

        if player.controller().phase() == Phase::Restarting {
            completed += 1;
            if !json {
                println!("-- pass {} complete --", completed);
            }
        } else {
            emit(&player.snapshot(), json)?;
        }
    }

    Ok(())
}

fn load_script(path: &PathBuf) -> Result<Script> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    Script::parse(&text).with_context(|| format!("failed to parse script {}", path.display()))
}

fn emit(snapshot: &Snapshot, json: bool) -> Result<()> {
    if json {
        print_json(snapshot)
    } else {
        println!("{}", snapshot);
        Ok(())
    }
}

#[cfg(feature = "visualize")]
fn print_json(snapshot: &Snapshot) -> Result<()> {
    let line = serde_json::to_string(snapshot).context("failed to serialise frame")?;
    println!("{}", line);
    Ok(())
}

#[cfg(not(feature = "visualize"))]
fn print_json(_snapshot: &Snapshot) -> Result<()> {
    anyhow::bail!("JSON output requires the `visualize` feature")
}
