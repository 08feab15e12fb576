//! Interactive command loop over stdin/stdout

use crate::process::{RunState, ServiceController, StartOutcome, StopOutcome};
use anyhow::Result;
use std::io::{BufRead, Write};

/// A command entered at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplCommand {
    Start,
    Stop,
    Status,
    Exit,
}

impl ReplCommand {
    /// Case-insensitive after trimming whitespace. Anything else is unknown.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "start" => Some(Self::Start),
            "stop" => Some(Self::Stop),
            "status" => Some(Self::Status),
            "exit" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Run the command loop until `exit` or end of input.
///
/// One command at a time: each command fully completes and prints its result
/// before the next line is read. An inspector failure propagates out and
/// ends the loop.
pub fn run_loop<R: BufRead, W: Write>(
    mut input: R,
    out: &mut W,
    controller: &mut ServiceController,
) -> Result<()> {
    let name = controller.identity().display_name.clone();

    loop {
        writeln!(out)?;
        writeln!(out, "Commands: start | stop | status | exit")?;
        write!(out, "Enter command: ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            // End of input without an explicit exit.
            return Ok(());
        }

        match ReplCommand::parse(&line) {
            Some(ReplCommand::Start) => match controller.start()? {
                StartOutcome::AlreadyRunning => writeln!(out, "{name} is already running.")?,
                StartOutcome::SpawnRequested => writeln!(out, "{name} server started.")?,
            },
            Some(ReplCommand::Stop) => match controller.stop()? {
                StopOutcome::NotRunning => writeln!(out, "{name} is not running.")?,
                StopOutcome::TerminationRequested => writeln!(out, "{name} server stopped.")?,
            },
            Some(ReplCommand::Status) => match controller.status()? {
                RunState::Running => writeln!(out, "{name} server is running.")?,
                RunState::NotRunning => writeln!(out, "{name} server is NOT running.")?,
            },
            Some(ReplCommand::Exit) => {
                writeln!(out, "Exiting. {name} will keep running if started.")?;
                return Ok(());
            }
            None => writeln!(out, "Unknown command.")?,
        }
    }
}
