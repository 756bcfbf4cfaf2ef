//! # Report Export Command
//!
//! `export <fichier.pdf|fichier.csv> [AAAA-MM]` writes the orders of one
//! month, the current one by default, as a report.
//!
//! ## Workflow
//!
//! 1.  **Parsing**: the path is taken as is (quote it when it holds spaces);
//!     the month is checked by `parse_month`.
//! 2.  **Query**: `query::orders_in_month` returns the orders with their
//!     client names, oldest first.
//! 3.  **Rendering**: `report::export` builds the summary and picks the PDF or
//!     CSV writer from the extension. PDF fonts come from the configured
//!     fonts directory.

use super::context::{Context, Reply};
use super::statistics::MONTH_NAMES;
use crate::query::orders_in_month;
use crate::report::{self, Report};
use chrono::Datelike;
use clap::Args;
use std::path::PathBuf;

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Month {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Fichier à écrire ; l'extension .pdf ou .csv choisit le format
    pub fichier: PathBuf,
    /// Mois exporté (AAAA-MM), le mois en cours par défaut
    #[arg(value_parser = parse_month)]
    pub mois: Option<Month>,
}

fn parse_month(text: &str) -> Result<Month, String> {
    let invalid = || format!("Mois invalide : « {} » (AAAA-MM)", text);
    let (year, month) = text.split_once('-').ok_or_else(invalid)?;
    let year = year.parse::<i32>().map_err(|_| invalid())?;
    let month = month.parse::<u32>().map_err(|_| invalid())?;
    if !(1..=9999).contains(&year) || !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok(Month { year, month })
}

/// Exports the chosen month.
///
/// # Returns
/// - `Reply::Ok` naming the file and the number of orders written.
/// - `Reply::Error` with the writer's explanation, e.g. an unsupported
///   extension or missing fonts.
pub fn process(ctx: &Context<'_>, args: &ExportArgs) -> Reply {
    let Month { year, month } = args.mois.unwrap_or(Month {
        year: ctx.now.year(),
        month: ctx.now.month(),
    });

    let rows = orders_in_month(ctx.store, year, month);
    let count = rows.len();
    let title = format!("Commandes de {} {}", MONTH_NAMES[month as usize - 1], year);
    let report = Report::new(title, rows);
    let path = args.fichier.as_path();
    match report::export(&report, &ctx.config.fonts_dir, path) {
        Ok(()) => Reply::Ok(format!(
            "Rapport exporté : {} ({} commande(s))",
            path.display(),
            count
        )),
        Err(e) => Reply::Error(format!("Erreur lors de l'export : {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::cli::{parse_line, Command};
    use crate::services::tests::context_for;
    use crate::store::fixtures::*;
    use crate::store::Store;
    use common::model::order::OrderStatus;

    fn export_args(line: &str) -> ExportArgs {
        match parse_line(line) {
            Ok(Command::Export(args)) => args,
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn month_parsing() {
        assert_eq!(parse_month("2024-03"), Ok(Month { year: 2024, month: 3 }));
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("03/2024").is_err());
        assert!(parse_month("0-01").is_err());
    }

    #[test]
    fn exports_requested_month_to_a_path_with_spaces() {
        let store = Store::open_in_memory().unwrap();
        let id = store.add_client(&client_fields("Dupont", "Jean")).unwrap();
        store
            .add_order(&new_order(id, at(2024, 3, 2, 9, 0, 0), OrderStatus::Delivered, "12"))
            .unwrap();
        store
            .add_order(&new_order(id, at(2024, 4, 2, 9, 0, 0), OrderStatus::Delivered, "99"))
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rapport mars.csv");
        let args = export_args(&format!("export '{}' 2024-03", path.display()));
        assert_eq!(args.fichier, path);

        let reply = context_for(&store, |ctx| process(ctx, &args));
        assert_eq!(
            reply,
            Reply::Ok(format!("Rapport exporté : {} (1 commande(s))", path.display()))
        );
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("12.00"));
        assert!(!content.contains("99.00"));
    }

    #[test]
    fn defaults_to_the_current_month() {
        let store = Store::open_in_memory().unwrap();
        let id = store.add_client(&client_fields("Dupont", "Jean")).unwrap();
        store
            .add_order(&new_order(id, at(2024, 6, 1, 8, 0, 0), OrderStatus::InProgress, "5"))
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let args = ExportArgs {
            fichier: dir.path().join("juin.csv"),
            mois: None,
        };
        let reply = context_for(&store, |ctx| process(ctx, &args));
        assert!(reply.to_string().ends_with("(1 commande(s))"));
    }

    #[test]
    fn bad_arguments() {
        let store = Store::open_in_memory().unwrap();
        assert!(parse_line("export").is_err());
        assert!(matches!(parse_line("export out.csv mars"), Err(Reply::Warning(_))));

        let args = export_args("export out.txt 2024-03");
        assert!(matches!(context_for(&store, |ctx| process(ctx, &args)), Reply::Error(_)));
    }
}
