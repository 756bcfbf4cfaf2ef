//! Line-oriented front end: one command per line, one reply per command.

use super::cli::{parse_line, Command};
use super::context::Context;
use super::dispatch;
use crate::config::Config;
use crate::store::Store;
use chrono::Local;
use log::{debug, info};
use std::io::{self, BufRead, Write};

const PROMPT: &str = "> ";

/// Reads commands from `input` until end of input or `quit`, writing every
/// reply to `output`. Only I/O errors on the two streams end the loop early.
pub fn run<R: BufRead, W: Write>(
    store: &Store,
    config: &Config,
    input: R,
    mut output: W,
) -> io::Result<()> {
    writeln!(output, "Gestion des commandes. Tapez « help » pour l'aide.")?;
    write!(output, "{}", PROMPT)?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() {
            match parse_line(line) {
                Ok(Command::Quit) => break,
                Ok(command) => {
                    debug!("command: {}", line);
                    let ctx = Context {
                        store,
                        config,
                        now: Local::now().naive_local(),
                    };
                    writeln!(output, "{}", dispatch(&ctx, command))?;
                }
                Err(reply) => writeln!(output, "{}", reply)?,
            }
        }
        write!(output, "{}", PROMPT)?;
        output.flush()?;
    }
    info!("Console closed");
    Ok(())
}
