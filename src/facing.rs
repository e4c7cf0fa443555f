use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// Cardinal direction the robot points in.
///
/// Ordered clockwise, so turning right is `+1` and turning left is `-1` (mod 4).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    North,
    East,
    South,
    West,
}

impl Facing {
    pub const ALL: [Facing; 4] = [Facing::North, Facing::East, Facing::South, Facing::West];

    fn index(self) -> i32 {
        match self {
            Facing::North => 0,
            Facing::East => 1,
            Facing::South => 2,
            Facing::West => 3,
        }
    }

    fn from_index(index: i32) -> Self {
        Self::ALL[index.rem_euclid(4) as usize]
    }

    /// Facing after a quarter turn counter-clockwise (`North.left() == West`)
    pub fn left(self) -> Self {
        Self::from_index(self.index() - 1)
    }

    /// Facing after a quarter turn clockwise (`West.right() == North`)
    pub fn right(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Heading in degrees, clockwise from North
    pub fn degrees(self) -> f32 {
        self.index() as f32 * 90.0
    }

    /// Unit step on the table: North is +y, East is +x
    pub fn delta(self) -> (i32, i32) {
        match self {
            Facing::North => (0, 1),
            Facing::East => (1, 0),
            Facing::South => (0, -1),
            Facing::West => (-1, 0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Facing::North => "North",
            Facing::East => "East",
            Facing::South => "South",
            Facing::West => "West",
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Facing {
    type Err = ParseError;

    /// Case-insensitive: `NORTH`, `north` and `North` all match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|facing| facing.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseError::InvalidFacing(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_and_right_wrap_around() {
        assert_eq!(Facing::North.left(), Facing::West);
        assert_eq!(Facing::West.right(), Facing::North);
        assert_eq!(Facing::East.left(), Facing::North);
        assert_eq!(Facing::South.right(), Facing::West);
    }

    #[test]
    fn test_four_turns_return_to_start() {
        for facing in Facing::ALL {
            let mut left = facing;
            let mut right = facing;
            for _ in 0..4 {
                left = left.left();
                right = right.right();
            }
            assert_eq!(left, facing);
            assert_eq!(right, facing);
        }
    }

    #[test]
    fn test_left_undoes_right() {
        for facing in Facing::ALL {
            assert_eq!(facing.right().left(), facing);
        }
    }

    #[test]
    fn test_degrees() {
        assert_eq!(Facing::North.degrees(), 0.0);
        assert_eq!(Facing::East.degrees(), 90.0);
        assert_eq!(Facing::South.degrees(), 180.0);
        assert_eq!(Facing::West.degrees(), 270.0);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("NORTH".parse::<Facing>(), Ok(Facing::North));
        assert_eq!("east".parse::<Facing>(), Ok(Facing::East));
        assert_eq!("SoUtH".parse::<Facing>(), Ok(Facing::South));
        assert_eq!(
            "UP".parse::<Facing>(),
            Err(ParseError::InvalidFacing("UP".to_string()))
        );
    }

    #[test]
    fn test_display_uses_name() {
        assert_eq!(Facing::West.to_string(), "West");
    }
}
