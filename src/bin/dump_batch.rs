//! Prints how a command file is parsed: one canonical line per kept command,
//! followed by the batch as JSON. Lines the parser drops are listed separately.

use anyhow::{Context, Result};
use std::env;
use std::fs;

use toyrobot::parse_line;

/// argv[0], or the tool's own name when argv is empty
fn program_name(args: &[String]) -> &str {
    args.first().map_or("dump_batch", String::as_str)
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <commands.txt>", program_name(&args));
        eprintln!("Shows the command batch parsed from a command file");
        std::process::exit(1);
    }

    let filename = &args[1];
    let text = fs::read_to_string(filename).with_context(|| format!("read {}", filename))?;

    println!("=== Command Batch: {} ===", filename);

    let mut batch = Vec::new();
    let mut dropped = Vec::new();
    for (number, line) in text.lines().enumerate() {
        match parse_line(line) {
            Some(command) => {
                println!("{:4}: {}", number + 1, command);
                batch.push(command);
            }
            None if line.trim().is_empty() => {}
            None => dropped.push((number + 1, line)),
        }
    }

    if !dropped.is_empty() {
        println!("\n=== Dropped Lines ===");
        for (number, line) in &dropped {
            println!("{:4}: {}", number, line);
        }
    }

    println!("\n=== JSON ===");
    println!("{}", serde_json::to_string_pretty(&batch)?);

    Ok(())
}
