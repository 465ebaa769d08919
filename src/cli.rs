// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::traits::ModeKind;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    Fly,
    Walk,
    Waypoint,
}

impl From<ModeArg> for ModeKind {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Fly => ModeKind::Fly,
            ModeArg::Walk => ModeKind::Walk,
            ModeArg::Waypoint => ModeKind::Waypoint,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "viewer-nav")]
#[command(about = "Camera navigation modes for the architectural viewer", long_about = None)]
pub struct Cli {
    /// Host configuration JSON
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Waypoint dataset, overrides the configured path
    #[arg(long)]
    pub waypoints: Option<PathBuf>,

    /// Mode enabled at start
    #[arg(long, value_enum, default_value = "waypoint")]
    pub mode: ModeArg,

    /// Number of frames to simulate
    #[arg(long, default_value = "240")]
    pub frames: u64,

    /// Simulated frame rate
    #[arg(long, default_value = "60.0")]
    pub fps: f64,

    /// Visit every waypoint in order (waypoint mode only)
    #[arg(long, default_value = "false")]
    pub tour: bool,

    /// Open a window and drive the modes from live input instead of simulating frames
    #[arg(long, default_value = "false")]
    pub window: bool,
}
