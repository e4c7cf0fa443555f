use crate::config::RobotConfig;
use crate::error::RobotError;
use crate::facing::Facing;
use crate::grid::{Cell, WorldPosition};

/// Stand-in for a non-finite duration
pub const DEFAULT_DURATION: f32 = 1.0;

/// Durations are finite and non-negative; NaN and infinities use the default
fn sanitize_duration(duration: f32) -> f32 {
    if duration.is_finite() {
        duration.max(0.0)
    } else {
        DEFAULT_DURATION
    }
}

/// An in-flight animation. Committed robot state only changes when it finishes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion {
    Turning {
        from_degrees: f32,
        to_degrees: f32,
        target: Facing,
        elapsed: f64,
        duration: f32,
    },
    Moving {
        from: Cell,
        to: Cell,
        elapsed: f64,
        duration: f32,
    },
}

impl Motion {
    /// Fraction of the animation already played, in `[0, 1]`
    pub fn progress(&self) -> f32 {
        let (elapsed, duration) = match *self {
            Motion::Turning { elapsed, duration, .. } => (elapsed, duration),
            Motion::Moving { elapsed, duration, .. } => (elapsed, duration),
        };
        if duration <= 0.0 {
            return 1.0;
        }
        (elapsed / f64::from(duration)).clamp(0.0, 1.0) as f32
    }

    /// Returns true once the full duration has elapsed
    fn advance(&mut self, delta_time: f32) -> bool {
        let (elapsed, duration) = match self {
            Motion::Turning { elapsed, duration, .. } => (elapsed, *duration),
            Motion::Moving { elapsed, duration, .. } => (elapsed, *duration),
        };
        *elapsed += f64::from(delta_time.max(0.0));
        *elapsed >= f64::from(duration)
    }
}

/// The robot: placement, facing and the animation currently playing.
///
/// `position` and `facing` are the committed state. Turning and moving take
/// simulated time: `turn`/`move_to` start a [`Motion`] and the caller drives
/// it with [`Robot::update`] until it reports completion.
#[derive(Clone, Debug)]
pub struct Robot {
    position: Option<Cell>,
    facing: Facing,
    motion: Option<Motion>,

    /// Seconds a quarter turn takes
    pub turn_duration: f32,
    /// Seconds a one-cell move takes
    pub move_duration: f32,
}

impl Default for Robot {
    fn default() -> Self {
        Self::from_config(&RobotConfig::default())
    }
}

impl Robot {
    pub fn new(turn_duration: f32, move_duration: f32) -> Self {
        Robot {
            position: None,
            facing: Facing::North,
            motion: None,
            turn_duration: sanitize_duration(turn_duration),
            move_duration: sanitize_duration(move_duration),
        }
    }

    pub fn from_config(config: &RobotConfig) -> Self {
        Self::new(config.turn_duration, config.move_duration)
    }

    pub fn is_placed(&self) -> bool {
        self.position.is_some()
    }

    pub fn position(&self) -> Option<Cell> {
        self.position
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn motion(&self) -> Option<&Motion> {
        self.motion.as_ref()
    }

    pub fn is_animating(&self) -> bool {
        self.motion.is_some()
    }

    /// Put the robot on `cell`. Any animation in flight is discarded.
    pub fn place(&mut self, cell: Cell, facing: Facing) {
        self.motion = None;
        self.position = Some(cell);
        self.facing = facing;
    }

    /// Start turning towards `target` along the shorter arc
    pub fn turn(&mut self, target: Facing) -> Result<(), RobotError> {
        self.ensure_ready()?;

        let from_degrees = self.facing.degrees();
        let mut arc = (target.degrees() - from_degrees).rem_euclid(360.0);
        if arc > 180.0 {
            arc -= 360.0;
        }

        self.motion = Some(Motion::Turning {
            from_degrees,
            to_degrees: from_degrees + arc,
            target,
            elapsed: 0.0,
            duration: sanitize_duration(self.turn_duration),
        });
        Ok(())
    }

    pub fn left(&mut self) -> Result<(), RobotError> {
        self.turn(self.facing.left())
    }

    pub fn right(&mut self) -> Result<(), RobotError> {
        self.turn(self.facing.right())
    }

    /// Start moving onto `target`
    pub fn move_to(&mut self, target: Cell) -> Result<(), RobotError> {
        let from = self.ensure_ready()?;
        self.motion = Some(Motion::Moving {
            from,
            to: target,
            elapsed: 0.0,
            duration: sanitize_duration(self.move_duration),
        });
        Ok(())
    }

    /// Advance the current animation (call once per frame).
    /// Returns true if no animation is left, committing the exact target when
    /// one finishes during this call.
    pub fn update(&mut self, delta_time: f32) -> bool {
        let Some(motion) = self.motion.as_mut() else {
            return true;
        };

        if !motion.advance(delta_time) {
            return false;
        }

        match self.motion.take() {
            Some(Motion::Turning { target, .. }) => self.facing = target,
            Some(Motion::Moving { to, .. }) => self.position = Some(to),
            None => {}
        }
        true
    }

    /// Drop the animation in flight. Committed state keeps its
    /// pre-transition value.
    pub fn cancel_motion(&mut self) -> Option<Motion> {
        self.motion.take()
    }

    /// `x,y,Facing`, e.g. `3,3,North`
    pub fn report(&self) -> Result<String, RobotError> {
        let cell = self.position.ok_or(RobotError::NotPlaced)?;
        Ok(format!("{},{}", cell, self.facing))
    }

    /// Displayed heading in degrees, interpolated while turning
    pub fn heading_degrees(&self) -> f32 {
        match self.motion {
            Some(Motion::Turning { from_degrees, to_degrees, .. }) => {
                let t = self.motion_progress();
                (from_degrees + (to_degrees - from_degrees) * t).rem_euclid(360.0)
            }
            _ => self.facing.degrees(),
        }
    }

    /// Displayed world position, interpolated while moving
    pub fn world_position(&self) -> Option<WorldPosition> {
        match self.motion {
            Some(Motion::Moving { from, to, .. }) => Some(
                from.world_position()
                    .lerp(to.world_position(), self.motion_progress()),
            ),
            _ => self.position.map(|cell| cell.world_position()),
        }
    }

    pub fn motion_progress(&self) -> f32 {
        self.motion.as_ref().map_or(1.0, Motion::progress)
    }

    fn ensure_ready(&self) -> Result<Cell, RobotError> {
        let cell = self.position.ok_or(RobotError::NotPlaced)?;
        if self.motion.is_some() {
            return Err(RobotError::Busy);
        }
        Ok(cell)
    }
}
