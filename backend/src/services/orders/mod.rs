//! # Order Commands
//!
//! This module groups every console command acting on orders. The `order`
//! word of a line selects it, the next word picks the action, and `process`
//! routes the parsed arguments to the matching sub-module.
//!
//! ## Sub-modules:
//! - `search`: the multi-criteria search and the result table.
//! - `get`: one order with its client.
//! - `save`: creation and update.
//! - `delete`: removal.
//!
//! ## Workflow of `order add`
//!
//! 1.  **Parsing**: `clap` checks the client id, the status tag and the amount
//!     (strictly positive, two decimals at most) before any handler runs.
//! 2.  **Client check**: the handler makes sure the client exists, so the
//!     user gets a precise message instead of a foreign key failure.
//! 3.  **Dating**: the order takes the day given with `--date`, or today, and
//!     the time of day of the command.
//! 4.  **Insert**: the store writes the row and returns its id.

mod delete;
mod get;
mod save;
mod search;

pub use search::SearchArgs;

use super::cli::{parse_amount, parse_day, parse_status};
use super::context::{Context, Reply};
use chrono::{NaiveDate, NaiveDateTime};
use clap::builder::PossibleValuesParser;
use clap::{Args, Subcommand};
use common::model::order::{NewOrder, OrderStatus, OrderUpdate, PAYMENT_METHODS};
use rust_decimal::Decimal;

#[derive(Debug, Subcommand)]
pub enum OrderAction {
    /// Recherche des commandes ; chaque critère est facultatif
    Search(SearchArgs),
    /// Détail d'une commande
    Show {
        /// Numéro de la commande
        id: i64,
    },
    /// Ajoute une commande à un client existant
    Add {
        /// Numéro du client
        client: i64,
        #[command(flatten)]
        form: OrderForm,
        /// Date de la commande (AAAA-MM-JJ ou JJ/MM/AAAA), aujourd'hui par défaut
        #[arg(long, value_parser = parse_day)]
        date: Option<NaiveDate>,
    },
    /// Remplace statut, montant, moyen de paiement et remarque
    Edit {
        /// Numéro de la commande
        id: i64,
        #[command(flatten)]
        form: OrderForm,
    },
    /// Supprime une commande
    Delete {
        /// Numéro de la commande
        id: i64,
    },
}

/// The editable part of an order.
#[derive(Debug, Clone, Args)]
pub struct OrderForm {
    /// EN_COURS, LIVRE ou ANNULE
    #[arg(long, value_parser = parse_status)]
    pub statut: OrderStatus,
    /// Montant strictement positif, deux décimales au plus
    #[arg(long, value_parser = parse_amount)]
    pub montant: Decimal,
    /// Moyen de paiement
    #[arg(
        long,
        value_parser = PossibleValuesParser::new(PAYMENT_METHODS),
        default_value = PAYMENT_METHODS[0]
    )]
    pub paiement: String,
    #[arg(long, default_value = "")]
    pub remarque: String,
}

impl OrderForm {
    pub(crate) fn update(&self) -> OrderUpdate {
        OrderUpdate {
            status: self.statut,
            total_amount: self.montant,
            payment_method: self.paiement.clone(),
            remark: self.remarque.trim().to_string(),
        }
    }

    pub(crate) fn new_order(&self, client_id: i64, placed_at: NaiveDateTime) -> NewOrder {
        let update = self.update();
        NewOrder {
            client_id,
            placed_at,
            status: update.status,
            total_amount: update.total_amount,
            payment_method: update.payment_method,
            remark: update.remark,
        }
    }
}

/// Timestamp of a new order: the chosen day, or today, at the time of the command.
pub(crate) fn order_time(ctx: &Context<'_>, day: Option<NaiveDate>) -> NaiveDateTime {
    match day {
        Some(day) => day.and_time(ctx.now.time()),
        None => ctx.now,
    }
}

/// Routes a parsed `order ...` line to its handler.
///
/// # Arguments
/// * `ctx` - Store, configuration and time of the command.
/// * `action` - The action and its arguments, as parsed by `clap`.
///
/// # Returns
/// The message to show the user; store failures become `Reply::Error`.
pub fn process(ctx: &Context<'_>, action: OrderAction) -> Reply {
    match action {
        OrderAction::Search(args) => search::process(ctx, &args),
        OrderAction::Show { id } => get::process(ctx, id),
        OrderAction::Add { client, form, date } => save::add(ctx, client, &form, date),
        OrderAction::Edit { id, form } => save::edit(ctx, id, &form),
        OrderAction::Delete { id } => delete::process(ctx, id),
    }
}
