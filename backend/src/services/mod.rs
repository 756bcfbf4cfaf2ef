//! # Console Services
//!
//! Everything behind the console prompt lives here.
//!
//! ## Sub-modules:
//! - `cli`: the command grammar; a line becomes a typed [`cli::Command`].
//! - `context`: what a handler receives and the [`context::Reply`] it returns.
//! - `clients`, `orders`, `statistics`, `reports`: one handler module per command word.
//! - `console`: the read / parse / dispatch / print loop.

pub mod cli;
pub mod clients;
pub mod console;
pub mod context;
pub mod orders;
pub mod reports;
pub mod statistics;

use cli::Command;
use context::{Context, Reply};

/// Hands a parsed command to the module owning its command word.
///
/// # Arguments
/// * `ctx` - Store, configuration and time of the command.
/// * `command` - A line already parsed by [`cli::parse_line`].
///
/// # Returns
/// The reply of the handler. `quit` is answered by the console itself and
/// only gets a plain acknowledgement here.
pub fn dispatch(ctx: &Context<'_>, command: Command) -> Reply {
    match command {
        Command::Client { action } => clients::process(ctx, action),
        Command::Order { action } => orders::process(ctx, action),
        Command::Stats(args) => statistics::process(ctx, &args),
        Command::Export(args) => reports::process(ctx, &args),
        Command::Quit => Reply::Ok("Au revoir".to_string()),
    }
}
