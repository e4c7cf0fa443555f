pub mod command;
pub mod config;
pub mod error;
pub mod event_log;
pub mod facing;
pub mod grid;
pub mod logging;
pub mod robot;
pub mod simulator;

pub use command::{parse_batch, parse_line, Command, CommandBatch};
pub use config::Config;
pub use error::{ConfigError, GridError, ParseError, RobotError, SimError};
pub use facing::Facing;
pub use grid::{Cell, Grid, WorldPosition};
pub use robot::{Motion, Robot};
pub use simulator::{BatchOutcome, Simulator};
