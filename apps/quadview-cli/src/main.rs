mod simulate;

use anyhow::Context;
use clap::{Parser, Subcommand};
use quadview_common::ViewerConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "quadview-cli", about = "CLI tool for the quadview viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Print the key bindings
    Keys,
    /// Run the frame loop headlessly against a debug scene
    Simulate {
        /// Number of frames to run
        #[arg(short, long, default_value = "180")]
        frames: u64,
        /// Synthetic frame rate
        #[arg(long, default_value = "60")]
        fps: f64,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = match &cli.config {
        Some(path) => ViewerConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ViewerConfig::default(),
    };

    match cli.command {
        Commands::Info => {
            println!("quadview-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("input: {}", quadview_input::crate_info());
            println!("render: {}", quadview_render::crate_info());
            println!("kernel: {}", quadview_kernel::crate_info());
            println!(
                "window: {}x{} \"{}\" vsync={}",
                config.window.width, config.window.height, config.window.title, config.window.vsync
            );
            println!("backend: {:?}", config.renderer.backend);
        }
        Commands::Keys => {
            println!("{}", quadview_kernel::help_text(&config.input.bindings));
        }
        Commands::Simulate { frames, fps, json } => {
            anyhow::ensure!(fps > 0.0, "fps must be positive, got {fps}");
            let report = simulate::run(&config, frames, fps)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for title in &report.titles {
                    println!("{title}");
                }
                println!(
                    "frames={} moving={} presented={} dropped_events={}",
                    report.frames, report.moving_frames, report.frames_presented, report.dropped_events
                );
                println!(
                    "camera: position=({:.3}, {:.3}, {:.3}) yaw={:.2} pitch={:.2}",
                    report.position[0], report.position[1], report.position[2], report.yaw, report.pitch
                );
                print!("{}", report.scene_summary);
            }
        }
    }

    Ok(())
}
