//! The text command language and its parser.
//!
//! One command per line:
//!
//! ```text
//! PLACE 1,2,EAST
//! MOVE
//! LEFT
//! RIGHT
//! REPORT
//! ```
//!
//! Keywords are case-sensitive, the facing in `PLACE` is not. [`parse_batch`]
//! drops any line that is not a well-formed command without reporting it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::facing::Facing;

/// A single robot command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Put the robot at (x, y) facing `facing`
    Place { x: i32, y: i32, facing: Facing },
    /// Step one cell forward
    Move,
    /// Quarter turn counter-clockwise
    Left,
    /// Quarter turn clockwise
    Right,
    /// Emit `x,y,Facing`
    Report,
}

/// Ordered commands from one block of input; order is execution order.
pub type CommandBatch = Vec<Command>;

impl Command {
    pub fn keyword(&self) -> &'static str {
        match self {
            Command::Place { .. } => "PLACE",
            Command::Move => "MOVE",
            Command::Left => "LEFT",
            Command::Right => "RIGHT",
            Command::Report => "REPORT",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Place { x, y, facing } => {
                write!(f, "PLACE {},{},{}", x, y, facing.name().to_uppercase())
            }
            other => f.write_str(other.keyword()),
        }
    }
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();
        let name = tokens.next().ok_or(ParseError::Empty)?;

        match name {
            "PLACE" => {
                let args = tokens.next().ok_or(ParseError::MissingArguments)?;
                parse_place_args(args)
            }
            "MOVE" => Ok(Command::Move),
            "LEFT" => Ok(Command::Left),
            "RIGHT" => Ok(Command::Right),
            "REPORT" => Ok(Command::Report),
            unknown => Err(ParseError::UnknownCommand(unknown.to_string())),
        }
    }
}

/// Parse the `X,Y,FACING` argument of `PLACE`. Components past the third are ignored.
fn parse_place_args(args: &str) -> Result<Command, ParseError> {
    let parts: Vec<&str> = args.split(',').collect();
    if parts.len() < 3 {
        return Err(ParseError::MissingArguments);
    }

    let coordinate = |s: &str| {
        s.trim()
            .parse::<i32>()
            .map_err(|_| ParseError::InvalidCoordinate(s.to_string()))
    };

    Ok(Command::Place {
        x: coordinate(parts[0])?,
        y: coordinate(parts[1])?,
        facing: parts[2].parse()?,
    })
}

/// Parse one line, returning None for blank or malformed lines
pub fn parse_line(line: &str) -> Option<Command> {
    match line.parse::<Command>() {
        Ok(command) => Some(command),
        Err(ParseError::Empty) => None,
        Err(e) => {
            tracing::debug!(line, error = %e, "dropping command line");
            None
        }
    }
}

/// Parse a block of text into a batch, one command per line
pub fn parse_batch(text: &str) -> CommandBatch {
    text.lines().filter_map(parse_line).collect()
}
