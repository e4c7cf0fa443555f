use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::command::Command;

/// Phase of a command's execution
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventPhase {
    Start,
    Finish,
    /// The command was skipped (invalid placement, or robot not placed)
    Rejected,
    /// The batch was cancelled while this command was animating
    Cancelled,
}

/// Logged command with simulated timestamp and phase
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoggedCommand {
    /// Simulated milliseconds since the simulator was created
    pub timestamp_ms: u64,
    /// Position of the command across every batch run so far
    pub index: usize,
    pub command: Command,
    pub phase: EventPhase,
}

/// In-memory timeline of executed commands
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<LoggedCommand>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&mut self, clock_seconds: f64, index: usize, command: Command, phase: EventPhase) {
        let timestamp_ms = (clock_seconds.max(0.0) * 1000.0).round() as u64;
        self.events.push(LoggedCommand {
            timestamp_ms,
            index,
            command,
            phase,
        });
    }

    pub fn events(&self) -> &[LoggedCommand] {
        &self.events
    }

    /// Simulated milliseconds between Start and Finish of the command at `index`
    pub fn duration_ms(&self, index: usize) -> Option<u64> {
        let start = self
            .events
            .iter()
            .find(|e| e.index == index && e.phase == EventPhase::Start)?;
        let finish = self
            .events
            .iter()
            .find(|e| e.index == index && e.phase == EventPhase::Finish)?;
        Some(finish.timestamp_ms.saturating_sub(start.timestamp_ms))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.events)
    }

    /// Print log with duration analysis
    pub fn print_with_durations(&self) {
        println!("\n=== Command Log with Durations ===");

        let mut start_times: HashMap<usize, u64> = HashMap::new();

        for logged in &self.events {
            match logged.phase {
                EventPhase::Start => {
                    start_times.insert(logged.index, logged.timestamp_ms);
                    println!("[{:6}ms] #{:3} START    {}", logged.timestamp_ms, logged.index + 1, logged.command);
                }
                EventPhase::Finish => match start_times.remove(&logged.index) {
                    Some(start_ms) => println!(
                        "[{:6}ms] #{:3} FINISH   {} [duration: {}ms]",
                        logged.timestamp_ms,
                        logged.index + 1,
                        logged.command,
                        logged.timestamp_ms - start_ms
                    ),
                    None => println!(
                        "[{:6}ms] #{:3} FINISH   {} [no matching start]",
                        logged.timestamp_ms,
                        logged.index + 1,
                        logged.command
                    ),
                },
                EventPhase::Cancelled => {
                    start_times.remove(&logged.index);
                    println!("[{:6}ms] #{:3} CANCEL   {}", logged.timestamp_ms, logged.index + 1, logged.command);
                }
                EventPhase::Rejected => {
                    println!("[{:6}ms] #{:3} REJECTED {}", logged.timestamp_ms, logged.index + 1, logged.command);
                }
            }
        }
        println!("=== End of Log ===\n");
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let mut places = 0;
        let mut moves = 0;
        let mut turns = 0;
        let mut reports = 0;
        let mut rejected = 0;

        // Only finished commands count as executed
        for logged in &self.events {
            match logged.phase {
                EventPhase::Finish => match logged.command {
                    Command::Place { .. } => places += 1,
                    Command::Move => moves += 1,
                    Command::Left | Command::Right => turns += 1,
                    Command::Report => reports += 1,
                },
                EventPhase::Rejected => rejected += 1,
                EventPhase::Start | EventPhase::Cancelled => {}
            }
        }

        let duration = self.events.last().map_or(0, |last| last.timestamp_ms);

        format!(
            "Simulated Duration: {}ms\n\
             Total Events: {}\n\
             Executed: {} placed, {} moved, {} turned, {} reported\n\
             Rejected: {}",
            duration,
            self.events.len(),
            places,
            moves,
            turns,
            reports,
            rejected
        )
    }
}
