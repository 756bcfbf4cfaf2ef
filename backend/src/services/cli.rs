//! # Command line grammar
//!
//! Each console line is split like a shell would split it (`shlex`), so a
//! value containing spaces is written between quotes, then parsed by `clap`
//! into a [`Command`]:
//!
//! ```text
//! client add --nom "De La Cruz" --prenom Ana --email ana@example.com
//! order search --nom "De La" --statut LIVRE --du 2024-01-01 --tri amount_desc
//! export "rapports/mars 2024.csv" 2024-03
//! ```
//!
//! Value parsers shared by several commands (status, amount, day) live here.
//! Their error texts end up in the warning shown to the user.

use super::clients::ClientAction;
use super::context::Reply;
use super::orders::OrderAction;
use super::reports::ExportArgs;
use super::statistics::StatsArgs;
use chrono::NaiveDate;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use common::model::order::OrderStatus;
use rust_decimal::Decimal;

/// Gestion des clients et de leurs commandes.
#[derive(Debug, Parser)]
#[command(name = "commandes", no_binary_name = true, disable_version_flag = true)]
struct CommandLine {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fiches clients
    Client {
        #[command(subcommand)]
        action: ClientAction,
    },
    /// Commandes : recherche, saisie, modification
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Nombre de commandes et chiffre d'affaires par mois
    Stats(StatsArgs),
    /// Export des commandes d'un mois en PDF ou CSV
    Export(ExportArgs),
    /// Quitte la console
    #[command(alias = "exit")]
    Quit,
}

/// Parses one console line.
///
/// # Returns
/// - `Ok(Command)` when the line is a complete command.
/// - `Err(Reply::Ok(..))` carrying the help text for `help` or an incomplete command.
/// - `Err(Reply::Warning(..))` for anything else, with clap's explanation.
pub fn parse_line(line: &str) -> Result<Command, Reply> {
    let words =
        shlex::split(line).ok_or_else(|| Reply::Warning("Guillemets non fermés".to_string()))?;
    CommandLine::try_parse_from(words)
        .map(|parsed| parsed.command)
        .map_err(|e| {
            let text = e.render().to_string().trim_end().to_string();
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                    Reply::Ok(text)
                }
                _ => Reply::Warning(text),
            }
        })
}

pub(crate) fn parse_status(text: &str) -> Result<OrderStatus, String> {
    text.parse::<OrderStatus>()
        .map_err(|_| format!("Statut invalide : « {} » (EN_COURS, LIVRE ou ANNULE)", text))
}

/// A strictly positive amount with at most two decimals. A decimal comma and
/// a trailing `€` are accepted.
pub(crate) fn parse_amount(text: &str) -> Result<Decimal, String> {
    let cleaned = text.trim().trim_end_matches('€').trim().replace(',', ".");
    match cleaned.parse::<Decimal>() {
        Ok(amount) if amount > Decimal::ZERO && amount.normalize().scale() <= 2 => Ok(amount),
        Ok(amount) if amount > Decimal::ZERO => {
            Err("Montant invalide (deux décimales au plus)".to_string())
        }
        _ => Err("Montant invalide".to_string()),
    }
}

/// `AAAA-MM-JJ` or `JJ/MM/AAAA`.
pub(crate) fn parse_day(text: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(text, "%d/%m/%Y"))
        .map_err(|_| format!("Date invalide : « {} » (AAAA-MM-JJ ou JJ/MM/AAAA)", text))
}
