//! Sequential execution of command batches against a table and a robot.
//!
//! The simulator is frame driven: each [`Simulator::update`] advances the
//! simulated clock by `delta_time`. Instant commands (`PLACE`, `REPORT`, a
//! `MOVE` blocked by the table edge) take effect immediately; `LEFT`, `RIGHT`
//! and `MOVE` start an animation, and the next command is not started until
//! that animation has finished. Only one batch can be in flight at a time.

use std::collections::VecDeque;
use std::thread;
use std::time::Duration;

use crate::command::{parse_batch, Command, CommandBatch};
use crate::config::Config;
use crate::error::{GridError, RobotError, SimError};
use crate::event_log::{EventLog, EventPhase};
use crate::facing::Facing;
use crate::grid::Grid;
use crate::robot::Robot;

pub const DEFAULT_FRAME_STEP: f32 = 1.0 / 60.0;
/// Smallest frame step [`Simulator::set_frame_step`] accepts
pub const MIN_FRAME_STEP: f32 = 1.0e-4;

/// Everything a batch produced, in execution order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    pub reports: Vec<String>,
    pub errors: Vec<SimError>,
    /// The batch was stopped by [`Simulator::cancel`] before draining
    pub cancelled: bool,
}

type CompletionCallback = Box<dyn FnOnce(&BatchOutcome)>;

struct ActiveBatch {
    queue: VecDeque<Command>,
    in_flight: Option<(usize, Command)>,
    outcome: BatchOutcome,
    on_complete: Option<CompletionCallback>,
}

/// What executing one command left behind
enum Step {
    Done(Option<String>),
    Animating,
}

pub struct Simulator {
    grid: Grid,
    robot: Robot,
    frame_step: f32,
    realtime: bool,
    clock: f64,
    next_index: usize,
    active: Option<ActiveBatch>,
    event_log: EventLog,
}

impl Simulator {
    pub fn new(grid: Grid, robot: Robot) -> Self {
        Simulator {
            grid,
            robot,
            frame_step: DEFAULT_FRAME_STEP,
            realtime: false,
            clock: 0.0,
            next_index: 0,
            active: None,
            event_log: EventLog::new(),
        }
    }

    /// Build the table, robot and frame timing from configuration
    pub fn from_config(config: &Config) -> Result<Self, GridError> {
        let grid = Grid::generate_with_cell_size(
            config.grid.width,
            config.grid.length,
            config.grid.cell_size,
        )?;
        let mut simulator = Self::new(grid, Robot::from_config(&config.robot));
        simulator.set_frame_step(config.simulation.frame_step);
        simulator.realtime = config.simulation.realtime;
        Ok(simulator)
    }

    /// Simulated seconds per update in [`run_batch`](Self::run_batch).
    /// Non-positive or non-finite values fall back to 1/60; positive values
    /// are raised to at least [`MIN_FRAME_STEP`].
    pub fn set_frame_step(&mut self, frame_step: f32) {
        self.frame_step = if frame_step.is_finite() && frame_step > 0.0 {
            frame_step.max(MIN_FRAME_STEP)
        } else {
            DEFAULT_FRAME_STEP
        };
    }

    pub fn frame_step(&self) -> f32 {
        self.frame_step
    }

    pub fn set_realtime(&mut self, realtime: bool) {
        self.realtime = realtime;
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn robot(&self) -> &Robot {
        &self.robot
    }

    /// Simulated seconds elapsed across all updates
    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Queue a batch for execution by subsequent [`update`](Self::update) calls
    pub fn submit(&mut self, batch: CommandBatch) -> Result<(), SimError> {
        self.start(batch, None)
    }

    /// Like [`submit`](Self::submit), calling `on_complete` once the batch drains
    pub fn submit_with(
        &mut self,
        batch: CommandBatch,
        on_complete: impl FnOnce(&BatchOutcome) + 'static,
    ) -> Result<(), SimError> {
        self.start(batch, Some(Box::new(on_complete)))
    }

    fn start(&mut self, batch: CommandBatch, on_complete: Option<CompletionCallback>) -> Result<(), SimError> {
        if self.active.is_some() {
            return Err(SimError::BatchInFlight);
        }
        tracing::debug!(commands = batch.len(), "starting batch");
        self.active = Some(ActiveBatch {
            queue: batch.into(),
            in_flight: None,
            outcome: BatchOutcome::default(),
            on_complete,
        });
        Ok(())
    }

    /// Advance the simulation by one frame.
    /// Returns the outcome when the running batch finishes during this frame.
    pub fn update(&mut self, delta_time: f32) -> Option<BatchOutcome> {
        let mut batch = self.active.take()?;
        let delta_time = delta_time.max(0.0);
        self.clock += f64::from(delta_time);

        let mut budget = delta_time;
        loop {
            if let Some((index, command)) = batch.in_flight {
                if !self.robot.update(budget) {
                    self.active = Some(batch);
                    return None;
                }
                self.event_log.log(self.clock, index, command, EventPhase::Finish);
                batch.in_flight = None;
                // Time left over in this frame is not carried into the next animation
                budget = 0.0;
            }

            let Some(command) = batch.queue.pop_front() else {
                return Some(self.complete(batch));
            };
            let index = self.next_index;
            self.next_index += 1;
            // Commands started before anything finished this frame begin at the frame's start
            let now = self.clock - f64::from(budget);
            self.execute(&mut batch, index, command, now);
        }
    }

    /// Submit `batch` and step it to completion using the configured frame step
    pub fn run_batch(&mut self, batch: CommandBatch) -> Result<BatchOutcome, SimError> {
        self.submit(batch)?;
        Ok(self.drain())
    }

    /// Parse `text` and run it as one batch
    pub fn run_text(&mut self, text: &str) -> Result<BatchOutcome, SimError> {
        self.run_batch(parse_batch(text))
    }

    fn drain(&mut self) -> BatchOutcome {
        let step = self.frame_step;
        loop {
            if let Some(outcome) = self.update(step) {
                return outcome;
            }
            if self.realtime {
                thread::sleep(Duration::from_secs_f32(step));
            }
        }
    }

    /// Stop the running batch. The animation in flight is dropped, so the
    /// robot keeps the state it had before that command started.
    pub fn cancel(&mut self) -> Option<BatchOutcome> {
        let mut batch = self.active.take()?;
        if let Some((index, command)) = batch.in_flight.take() {
            self.robot.cancel_motion();
            self.event_log.log(self.clock, index, command, EventPhase::Cancelled);
        }
        tracing::info!(dropped = batch.queue.len(), "batch cancelled");
        batch.queue.clear();
        batch.outcome.cancelled = true;
        Some(self.complete(batch))
    }

    fn complete(&mut self, mut batch: ActiveBatch) -> BatchOutcome {
        tracing::debug!(
            reports = batch.outcome.reports.len(),
            errors = batch.outcome.errors.len(),
            "batch complete"
        );
        if let Some(on_complete) = batch.on_complete.take() {
            on_complete(&batch.outcome);
        }
        batch.outcome
    }

    fn execute(&mut self, batch: &mut ActiveBatch, index: usize, command: Command, now: f64) {
        match self.apply(command) {
            Ok(Step::Done(report)) => {
                self.event_log.log(now, index, command, EventPhase::Start);
                self.event_log.log(now, index, command, EventPhase::Finish);
                if let Some(report) = report {
                    tracing::info!("{}", report);
                    batch.outcome.reports.push(report);
                }
            }
            Ok(Step::Animating) => {
                self.event_log.log(now, index, command, EventPhase::Start);
                batch.in_flight = Some((index, command));
            }
            Err(e) => {
                tracing::warn!("{}", e);
                self.event_log.log(now, index, command, EventPhase::Rejected);
                batch.outcome.errors.push(e);
            }
        }
    }

    fn apply(&mut self, command: Command) -> Result<Step, SimError> {
        match command {
            Command::Place { x, y, facing } => self.place(x, y, facing),
            _ if !self.robot.is_placed() => Err(SimError::ControlBeforePlacement { command }),
            Command::Move => self.step_forward(),
            Command::Left => {
                self.robot.left()?;
                Ok(Step::Animating)
            }
            Command::Right => {
                self.robot.right()?;
                Ok(Step::Animating)
            }
            Command::Report => Ok(Step::Done(Some(self.robot.report()?))),
        }
    }

    fn place(&mut self, x: i32, y: i32, facing: Facing) -> Result<Step, SimError> {
        if !self.grid.is_valid_cell(x, y) {
            return Err(SimError::InvalidPlacement { x, y });
        }
        let cell = self.grid.get_cell(x, y)?;
        self.robot.place(cell, facing);
        tracing::debug!(%cell, %facing, "placed");
        Ok(Step::Done(None))
    }

    fn step_forward(&mut self) -> Result<Step, SimError> {
        let position = self.robot.position().ok_or(RobotError::NotPlaced)?;
        let neighbor = self.grid.neighbor_in_direction(&position, self.robot.facing());
        if neighbor == position {
            tracing::debug!(%position, facing = %self.robot.facing(), "move blocked by table edge");
            return Ok(Step::Done(None));
        }
        if !self.grid.is_valid_cell(neighbor.x(), neighbor.y()) {
            return Ok(Step::Done(None));
        }
        self.robot.move_to(neighbor)?;
        Ok(Step::Animating)
    }
}
