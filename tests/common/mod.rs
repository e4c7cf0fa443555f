#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use toyrobot::{BatchOutcome, Grid, Robot, Simulator};

/// Scenario fixture: batches run in order against one robot
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScenarioData {
    #[serde(rename = "testName")]
    pub test_name: String,
    #[serde(rename = "gridWidth")]
    pub grid_width: i32,
    #[serde(rename = "gridLength")]
    pub grid_length: i32,
    pub batches: Vec<String>,
    #[serde(rename = "expectedReports")]
    pub expected_reports: Vec<String>,
    #[serde(rename = "expectedErrors", default)]
    pub expected_errors: Vec<String>,
}

/// Load a scenario from JSON file
pub fn load_scenario(path: &Path) -> Result<ScenarioData, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    let scenario: ScenarioData = serde_json::from_str(&contents)?;
    Ok(scenario)
}

pub fn scenario_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("test_data").join("scenarios")
}

/// Simulator with short animations so tests step quickly
pub fn simulator(width: i32, length: i32) -> Simulator {
    let grid = Grid::generate(width, length).expect("valid table");
    let mut sim = Simulator::new(grid, Robot::new(0.1, 0.1));
    sim.set_frame_step(0.05);
    sim
}

/// Run each text as its own batch, returning the outcomes in order
pub fn run_batches(sim: &mut Simulator, batches: &[&str]) -> Vec<BatchOutcome> {
    batches
        .iter()
        .map(|text| sim.run_text(text).expect("no batch in flight"))
        .collect()
}

/// Run a scenario, returning (reports, error messages) across all batches
pub fn run_scenario(scenario: &ScenarioData) -> (Vec<String>, Vec<String>) {
    let mut sim = simulator(scenario.grid_width, scenario.grid_length);
    let mut reports = Vec::new();
    let mut errors = Vec::new();

    for text in &scenario.batches {
        let outcome = sim.run_text(text).expect("no batch in flight");
        reports.extend(outcome.reports);
        errors.extend(outcome.errors.iter().map(|e| e.to_string()));
    }

    (reports, errors)
}

/// Report after `PLACE x,y,FACING` followed by `commands`
pub fn report_after(sim: &mut Simulator, place: &str, commands: &str) -> Option<String> {
    let text = format!("{}\n{}\nREPORT", place, commands);
    sim.run_text(&text).expect("no batch in flight").reports.pop()
}
