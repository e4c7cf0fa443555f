mod common;

use common::{report_after, run_batches, simulator};
use toyrobot::{Command, Facing, SimError};

#[test]
fn test_reports_after_running_command_set() {
    let mut sim = simulator(5, 5);
    let outcome = sim
        .run_text("PLACE 0,0,EAST\nMOVE\nMOVE\nLEFT\nMOVE\nLEFT\nMOVE\nRIGHT\nRIGHT\nMOVE\nREPORT")
        .unwrap();
    assert_eq!(outcome.reports, vec!["2,1,East"]);
    assert!(outcome.errors.is_empty());
}

#[test]
fn test_reports_after_multiple_command_sets() {
    let mut sim = simulator(5, 5);
    let outcomes = run_batches(
        &mut sim,
        &["PLACE 1,2,EAST\nMOVE\nMOVE\nLEFT\nMOVE\nREPORT", "LEFT\nLEFT\nMOVE\nMOVE\nREPORT"],
    );
    assert_eq!(outcomes[0].reports, vec!["3,3,North"]);
    assert_eq!(outcomes[1].reports, vec!["3,1,South"]);
}

#[test]
fn test_reports_after_being_placed_more_than_once() {
    let mut sim = simulator(5, 5);
    let outcomes = run_batches(&mut sim, &["PLACE 0,0,NORTH\nREPORT", "PLACE 2,1,EAST\nREPORT"]);
    assert_eq!(outcomes[0].reports, vec!["0,0,North"]);
    assert_eq!(outcomes[1].reports, vec!["2,1,East"]);
}

#[test]
fn test_turns_full_circle_left() {
    let mut sim = simulator(5, 5);
    assert_eq!(
        report_after(&mut sim, "PLACE 0,0,NORTH", "LEFT\nLEFT\nLEFT\nLEFT").as_deref(),
        Some("0,0,North")
    );
}

#[test]
fn test_turns_full_circle_right() {
    let mut sim = simulator(5, 5);
    assert_eq!(
        report_after(&mut sim, "PLACE 0,0,NORTH", "RIGHT\nRIGHT\nRIGHT\nRIGHT").as_deref(),
        Some("0,0,North")
    );
}

#[test]
fn test_blocked_at_each_edge() {
    let mut sim = simulator(5, 5);
    let top = sim.grid().length() - 1;
    let right = sim.grid().width() - 1;

    let cases = [
        (format!("PLACE 0,{},NORTH", top), format!("0,{},North", top)),
        (format!("PLACE {},0,EAST", right), format!("{},0,East", right)),
        ("PLACE 0,0,SOUTH".to_string(), "0,0,South".to_string()),
        ("PLACE 0,0,WEST".to_string(), "0,0,West".to_string()),
    ];

    for (place, expected) in cases {
        assert_eq!(report_after(&mut sim, &place, "MOVE"), Some(expected), "{}", place);
    }
}

#[test]
fn test_commands_before_place_are_rejected() {
    let mut sim = simulator(5, 5);
    let outcome = sim.run_text("MOVE\nLEFT\nRIGHT\nREPORT").unwrap();

    assert!(outcome.reports.is_empty());
    assert_eq!(
        outcome.errors,
        vec![
            SimError::ControlBeforePlacement { command: Command::Move },
            SimError::ControlBeforePlacement { command: Command::Left },
            SimError::ControlBeforePlacement { command: Command::Right },
            SimError::ControlBeforePlacement { command: Command::Report },
        ]
    );

    let robot = sim.robot();
    assert!(!robot.is_placed());
    assert_eq!(robot.position(), None);
    assert_eq!(robot.facing(), Facing::North);
}

#[test]
fn test_invalid_placement_is_reported_and_ignored() {
    let mut sim = simulator(5, 5);
    let outcome = sim.run_text("PLACE -1,-1,NORTH\nREPORT").unwrap();

    assert!(outcome.reports.is_empty());
    assert_eq!(
        outcome.errors,
        vec![
            SimError::InvalidPlacement { x: -1, y: -1 },
            SimError::ControlBeforePlacement { command: Command::Report },
        ]
    );
    assert_eq!(outcome.errors[0].to_string(), "tried to place robot at -1,-1 which is invalid");
}

#[test]
fn test_invalid_placement_keeps_previous_position() {
    let mut sim = simulator(5, 5);
    let outcome = sim.run_text("PLACE 2,2,WEST\nPLACE 5,5,NORTH\nREPORT").unwrap();

    assert_eq!(outcome.reports, vec!["2,2,West"]);
    assert_eq!(outcome.errors, vec![SimError::InvalidPlacement { x: 5, y: 5 }]);
}

#[test]
fn test_errors_do_not_stop_the_batch() {
    let mut sim = simulator(5, 5);
    let outcome = sim
        .run_text("REPORT\nPLACE 9,9,EAST\nPLACE 1,1,EAST\nMOVE\nREPORT\nPLACE -3,0,SOUTH\nLEFT\nREPORT")
        .unwrap();

    assert_eq!(outcome.reports, vec!["2,1,East", "2,1,North"]);
    assert_eq!(outcome.errors.len(), 3);
}

#[test]
fn test_multiple_reports_in_order() {
    let mut sim = simulator(5, 5);
    let outcome = sim.run_text("PLACE 0,0,NORTH\nREPORT\nMOVE\nREPORT\nRIGHT\nREPORT").unwrap();
    assert_eq!(outcome.reports, vec!["0,0,North", "0,1,North", "0,1,East"]);
}
