use std::path::PathBuf;
use thiserror::Error;

use crate::command::Command;

/// Failures raised by the table itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("invalid table dimensions {width}x{length}")]
    InvalidDimensions { width: i32, length: i32 },
    #[error("cell {x},{y} is not on the table")]
    OutOfRange { x: i32, y: i32 },
}

/// Guards on the robot's own operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RobotError {
    #[error("robot has not been placed on the table")]
    NotPlaced,
    #[error("robot is still turning or moving")]
    Busy,
}

/// Errors reported by the simulator while running a batch.
///
/// None of these abort the batch; they are collected into the
/// [`BatchOutcome`](crate::simulator::BatchOutcome) alongside the reports.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("tried to place robot at {x},{y} which is invalid")]
    InvalidPlacement { x: i32, y: i32 },
    #[error("robot cannot {command} until it has been placed on the table")]
    ControlBeforePlacement { command: Command },
    #[error("a command batch is already running")]
    BatchInFlight,
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Robot(#[from] RobotError),
}

/// Reasons a single line failed to parse as a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty command line")]
    Empty,
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    #[error("PLACE expects X,Y,FACING")]
    MissingArguments,
    #[error("invalid coordinate `{0}`")]
    InvalidCoordinate(String),
    #[error("invalid facing `{0}`")]
    InvalidFacing(String),
}

/// Failures reading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}
