//! The binary entry point: loads config, generates terrain, and optionally
//! accepts further generate requests from stdin.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use canyon_app::frame_loop::FrameLoop;
use canyon_app::platform::PlatformDirs;
use canyon_app::session::{Command, TerrainSession};
use canyon_config::{CliArgs, Config};
use canyon_terrain::RunOutcome;
use clap::Parser;
use tracing::{error, info, warn};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let dirs = match args.config.clone() {
        Some(dir) => PlatformDirs::with_config_dir(dir),
        None => match PlatformDirs::resolve() {
            Ok(dirs) => dirs,
            Err(e) => {
                eprintln!("Failed to resolve platform directories: {e}");
                return ExitCode::FAILURE;
            }
        },
    };

    if let Err(e) = dirs.create_dirs() {
        eprintln!("Failed to create platform directories: {e}");
    }

    // Load or create config, then apply CLI overrides
    let file_config = Config::load_or_create(&dirs.config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    let mut config = file_config.clone();
    config.apply_cli_overrides(&args);

    let log_dir = config.debug.log_dir.clone().unwrap_or_else(|| dirs.log_dir.clone());
    if let Some(path) = canyon_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config)) {
        info!("Writing JSON log to {}", path.display());
    }

    sanitize(&mut config);
    info!(
        resolution = config.terrain.resolution,
        seed = config.noise.seed,
        randomize = config.pipeline.randomize_seed,
        "terrain generator ready"
    );

    let mut session = TerrainSession::from_config(&config);
    let mut frames = FrameLoop::new();
    let mut succeeded = true;

    if config.pipeline.generate_on_start {
        succeeded = report(session.generate_now(&mut frames));
    }

    if args.interactive {
        let mut console = Console {
            args: &args,
            dirs: &dirs,
            file_config,
        };
        succeeded = console.run(&mut session, &mut frames);
    }

    info!(frames = frames.frame_count(), "exiting");
    if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn sanitize(config: &mut Config) {
    let adjusted = config.sanitize();
    if adjusted > 0 {
        warn!("{adjusted} config value(s) were out of range and have been clamped");
    }
}

fn report(outcome: RunOutcome) -> bool {
    match outcome {
        RunOutcome::Completed => true,
        RunOutcome::Failed(e) => {
            error!("Terrain generation failed: {e}");
            false
        }
    }
}

/// The interactive trigger surface.
struct Console<'a> {
    args: &'a CliArgs,
    dirs: &'a PlatformDirs,
    /// Config as last read from disk, before CLI overrides.
    file_config: Config,
}

impl Console<'_> {
    /// Read commands from stdin until `quit` or end of input. Returns whether
    /// the last generation succeeded.
    fn run(&mut self, session: &mut TerrainSession, frames: &mut FrameLoop) -> bool {
        let mut succeeded = true;
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        loop {
            print!("> ");
            let _ = io::stdout().flush();

            let Some(Ok(line)) = lines.next() else {
                break;
            };
            match Command::parse(&line) {
                Some(Command::Generate) => {
                    self.reload(session);
                    succeeded = report(session.generate_now(frames));
                }
                Some(Command::Status) => {
                    println!("{}", session.status());
                    if let Some(summary) = session.summary() {
                        println!(
                            "height min {:.2} max {:.2} mean {:.2}",
                            summary.min, summary.max, summary.mean
                        );
                    }
                }
                Some(Command::Quit) => break,
                None if line.trim().is_empty() => {}
                None => println!("unknown command, expected generate, status or quit"),
            }
        }
        succeeded
    }

    /// Pick up edits made to the config file since it was last read.
    fn reload(&mut self, session: &mut TerrainSession) {
        match self.file_config.reload(&self.dirs.config_dir) {
            Ok(Some(file_config)) => {
                let mut config = file_config.clone();
                config.apply_cli_overrides(self.args);
                sanitize(&mut config);
                session.apply_config(&config);
                self.file_config = file_config;
            }
            Ok(None) => {}
            Err(e) => warn!("Keeping previous config: {e}"),
        }
    }
}
