//! inkreplay application
//!
//! Command-line shell around the core: keeps drawings in a directory and
//! replays them in the terminal at the pace they were drawn.

mod demo;
mod error;
mod player;

pub use demo::demo_drawing;
pub use error::AppError;
pub use player::{FRAME_INTERVAL, Player};

use clap::{Args, Parser, Subcommand};
use inkreplay_core::replay::DEFAULT_SPEED;
use inkreplay_core::time::Instant;
use inkreplay_core::{FileStorage, ReplayAnimator, ReplayConfig, Storage, fit_drawing};
use kurbo::Point;
use std::io::Write;
use std::ops::ControlFlow;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "inkreplay", version, about = "Save and replay pen drawings")]
pub struct Cli {
    /// Directory holding saved drawings
    #[arg(long, global = true, env = "INKREPLAY_DIR")]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List saved drawings
    List,
    /// Delete a saved drawing
    Delete { name: String },
    /// Save a generated sample drawing
    Demo { name: String },
    /// Replay a saved drawing stroke by stroke
    Replay(ReplayArgs),
}

#[derive(Debug, Args)]
pub struct ReplayArgs {
    pub name: String,

    /// Playback speed relative to how the drawing was made
    #[arg(long, default_value_t = DEFAULT_SPEED, value_parser = parse_speed)]
    pub speed: f64,

    /// Fit the drawing into a box before replaying: X,Y,HEIGHT[,WIDTH]
    #[arg(long, value_parser = parse_fit_target)]
    pub fit: Option<FitTarget>,

    /// Draw up to the exact playhead instead of the last whole sample
    #[arg(long)]
    pub interpolate: bool,
}

/// Box a drawing is fitted into before replay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitTarget {
    pub origin: Point,
    pub height: f64,
    pub width: Option<f64>,
}

fn parse_speed(s: &str) -> Result<f64, String> {
    let speed: f64 = s.trim().parse().map_err(|e| format!("invalid speed '{}': {}", s, e))?;
    if speed.is_finite() && speed > 0.0 {
        Ok(speed)
    } else {
        Err(format!("speed must be positive, got {}", speed))
    }
}

fn parse_fit_target(s: &str) -> Result<FitTarget, String> {
    let values = s
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid fit box '{}': {}", s, e))?;

    let target = match values[..] {
        [x, y, height] => FitTarget {
            origin: Point::new(x, y),
            height,
            width: None,
        },
        [x, y, height, width] => FitTarget {
            origin: Point::new(x, y),
            height,
            width: Some(width),
        },
        _ => return Err(format!("expected X,Y,HEIGHT[,WIDTH], got '{}'", s)),
    };

    if values.iter().any(|v| !v.is_finite()) {
        return Err(format!("fit box values must be finite, got '{}'", s));
    }
    if target.height <= 0.0 || target.width.is_some_and(|w| w <= 0.0) {
        return Err(format!("fit box height and width must be positive, got '{}'", s));
    }
    Ok(target)
}

/// Open the drawing directory, or the platform default when none is given.
pub fn open_storage(dir: Option<PathBuf>) -> Result<FileStorage, AppError> {
    let storage = match dir {
        Some(dir) => FileStorage::new(dir)?,
        None => FileStorage::default_location()?,
    };
    Ok(storage)
}

/// Execute one command, writing user-facing output to `out`.
pub fn run<S: Storage>(command: Command, storage: &S, out: &mut impl Write) -> Result<(), AppError> {
    match command {
        Command::List => {
            let names = pollster::block_on(storage.list())?;
            if names.is_empty() {
                writeln!(out, "No saved drawings")?;
            }
            for name in names {
                writeln!(out, "{}", name)?;
            }
        }
        Command::Delete { name } => {
            pollster::block_on(storage.delete(&name))?;
            log::info!("Deleted drawing '{}'", name);
            writeln!(out, "Deleted {}", name)?;
        }
        Command::Demo { name } => {
            pollster::block_on(storage.save(&name, &demo_drawing()))?;
            log::info!("Saved demo drawing as '{}'", name);
            writeln!(out, "Saved demo drawing as {}", name)?;
        }
        Command::Replay(args) => replay(args, storage, out)?,
    }
    Ok(())
}

fn replay<S: Storage>(args: ReplayArgs, storage: &S, out: &mut impl Write) -> Result<(), AppError> {
    let mut drawing = pollster::block_on(storage.load(&args.name))?;
    if let Some(target) = args.fit {
        drawing = fit_drawing(&drawing, target.origin, target.height, target.width)?;
    }

    let total_strokes = drawing.len();
    let total_points = drawing.point_count();
    let config = ReplayConfig {
        speed: args.speed,
        interpolate_tail: args.interpolate,
    };
    let mut animator = ReplayAnimator::new().with_config(config)?;
    animator.start(drawing, Instant::now())?;
    log::info!("Replaying '{}': {} strokes, {} points", args.name, total_strokes, total_points);

    let mut write_error = None;
    let frames = Player::default().run(&mut animator, |visible, _| {
        let line = write!(
            out,
            "\rstroke {}/{}  points {}/{}",
            visible.len(),
            total_strokes,
            visible.point_count(),
            total_points
        )
        .and_then(|_| out.flush());
        match line {
            Ok(()) => ControlFlow::Continue(()),
            Err(e) => {
                write_error = Some(e);
                ControlFlow::Break(())
            }
        }
    });
    if let Some(e) = write_error {
        return Err(e.into());
    }

    writeln!(out)?;
    log::info!("Replay of '{}' done in {} frames", args.name, frames);
    Ok(())
}
