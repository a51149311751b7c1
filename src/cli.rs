//! Command-line interface and REPL
//!
//! Lines are either commands or messages:
//!
//! ```text
//! /ch1/fader 0.5 12        address value [ts] [id] [mode]
//! sens /ch1/encoder 20     change encoder sensitivity
//! list                     print every controller
//! exit | quit
//! ```

use anyhow::{Context, Result};
use colored::*;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use osc_controller::{
    ControllerMode, ControllerRegistry, ControllerSnapshot, ControllerType, Feedback,
    UpdateOutcome,
};

/// One parsed REPL line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Message {
        address: String,
        value: f32,
        ts: u32,
        id: i32,
        mode: ControllerMode,
    },
    Sensitivity { address: String, sensitivity: i32 },
    List,
    Exit,
    Empty,
}

/// Parse one REPL line
pub fn parse_line(line: &str) -> Result<Command> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Ok(Command::Empty);
    };

    match head {
        "exit" | "quit" => Ok(Command::Exit),
        "list" => Ok(Command::List),
        "sens" => {
            let address = parts.next().context("Usage: sens <address> <sensitivity>")?;
            let sensitivity = parts
                .next()
                .context("Usage: sens <address> <sensitivity>")?
                .parse::<i32>()
                .context("Invalid sensitivity")?;
            Ok(Command::Sensitivity {
                address: address.to_string(),
                sensitivity,
            })
        }
        address => {
            let value = parts
                .next()
                .context("Usage: <address> <value> [ts] [id] [mode]")?
                .parse::<f32>()
                .context("Invalid value")?;
            let ts = match parts.next() {
                Some(s) => s.parse::<u32>().context("Invalid timestamp")?,
                None => 0,
            };
            let id = match parts.next() {
                Some(s) => s.parse::<i32>().context("Invalid controller id")?,
                None => 0,
            };
            let mode = match parts.next() {
                Some(s) => s.parse::<ControllerMode>()?,
                None => ControllerMode::Direct,
            };
            Ok(Command::Message {
                address: address.to_string(),
                value,
                ts,
                id,
                mode,
            })
        }
    }
}

pub fn print_feedback(feedback: &Feedback) {
    let outcome = match feedback.outcome {
        UpdateOutcome::Applied => "applied".green(),
        UpdateOutcome::AppliedOutOfRange => "out-of-range".yellow(),
        UpdateOutcome::Stale => "stale".red(),
    };
    let created = if feedback.created { " (new)" } else { "" };
    println!(
        "  {} {} = {} @{} [{}]{}",
        feedback.controller.controller_type.tag().cyan(),
        feedback.controller.address.bright_white(),
        format!("{:.4}", feedback.value()).bold(),
        feedback.controller.ts,
        outcome,
        created
    );
}

pub fn print_snapshot(snapshots: &[ControllerSnapshot]) {
    if snapshots.is_empty() {
        println!("  {}", "(no controllers)".dimmed());
        return;
    }
    for s in snapshots {
        let sensitivity = match s.controller_type {
            ControllerType::Encoder => format!(" sens={}", s.sensitivity),
            ControllerType::Fader | ControllerType::Button => String::new(),
        };
        println!(
            "  {} {} id={} mode={} value={:.4} ts={}{}",
            s.controller_type.tag().cyan(),
            s.address.bright_white(),
            s.controller_id,
            s.mode,
            s.value,
            s.ts,
            sensitivity
        );
    }
}

/// Interpret one prompt result: `None` on Ctrl-C/Ctrl-D, error otherwise
fn next_line(readline: Result<String, ReadlineError>) -> Result<Option<String>> {
    match readline {
        Ok(line) => Ok(Some(line)),
        Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
        Err(e) => Err(e).context("Failed to read from terminal"),
    }
}

pub fn run_repl(registry: &mut ControllerRegistry) -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    loop {
        let Some(line) = next_line(rl.readline("osc> "))? else {
            break;
        };
        // History is a convenience; a rejected entry is not worth reporting
        rl.add_history_entry(line.as_str()).ok();

        match parse_line(&line) {
            Ok(Command::Exit) => break,
            Ok(Command::Empty) => {}
            Ok(Command::List) => print_snapshot(&registry.snapshot()),
            Ok(Command::Sensitivity { address, sensitivity }) => {
                match registry.set_sensitivity(&address, sensitivity) {
                    Ok(()) => println!("  {} sensitivity = {}", address.bright_white(), sensitivity),
                    Err(e) => println!("  {}", e.to_string().red()),
                }
            }
            Ok(Command::Message {
                address,
                value,
                ts,
                id,
                mode,
            }) => match registry.handle(&address, id, mode, value, ts) {
                Some(feedback) => print_feedback(&feedback),
                None => println!("  {} {}", "dropped:".red(), address),
            },
            Err(e) => println!("  {}", e.to_string().red()),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_message_defaults() {
        assert_eq!(
            parse_line("/ch1/fader 0.5").unwrap(),
            Command::Message {
                address: "/ch1/fader".to_string(),
                value: 0.5,
                ts: 0,
                id: 0,
                mode: ControllerMode::Direct,
            }
        );
    }

    #[test]
    fn test_parse_message_full() {
        assert_eq!(
            parse_line("/ch1/button 1 12 3 toggle").unwrap(),
            Command::Message {
                address: "/ch1/button".to_string(),
                value: 1.0,
                ts: 12,
                id: 3,
                mode: ControllerMode::Toggle,
            }
        );
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_line("  ").unwrap(), Command::Empty);
        assert_eq!(parse_line("quit").unwrap(), Command::Exit);
        assert_eq!(parse_line("list").unwrap(), Command::List);
        assert_eq!(
            parse_line("sens /a/encoder 20").unwrap(),
            Command::Sensitivity {
                address: "/a/encoder".to_string(),
                sensitivity: 20,
            }
        );
        assert!(parse_line("sens /a/encoder").is_err());
        assert!(parse_line("/a/fader abc").is_err());
    }

    #[test]
    fn test_next_line_stops_on_interrupt_and_eof() {
        assert_eq!(next_line(Ok("list".to_string())).unwrap(), Some("list".to_string()));
        assert_eq!(next_line(Err(ReadlineError::Interrupted)).unwrap(), None);
        assert_eq!(next_line(Err(ReadlineError::Eof)).unwrap(), None);
    }

    #[test]
    fn test_next_line_propagates_io_errors() {
        let err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "terminal gone");
        let result = next_line(Err(ReadlineError::Io(err)));

        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to read from terminal"));
    }
}
