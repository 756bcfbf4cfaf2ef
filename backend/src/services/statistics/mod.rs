//! # Monthly Statistics Command
//!
//! `stats [année]`: orders and revenue per month for one year, every month
//! listed, followed by the year totals. Defaults to the current year.
//!
//! ## Workflow
//!
//! 1.  **Parsing**: `clap` keeps the year between 1 and 9999.
//! 2.  **Query**: `query::orders_per_month` returns only the months that have
//!     orders.
//! 3.  **Filling**: `fill_year` puts them in a twelve-month table, zero for the
//!     others, then the totals are summed from that table.

use super::context::{Context, Reply};
use crate::query::orders_per_month;
use crate::report::display_amount;
use chrono::Datelike;
use clap::Args;
use common::model::statistics::MonthlyOrders;
use rust_decimal::Decimal;
use std::fmt::Write;

pub const MONTH_NAMES: [&str; 12] = [
    "Janvier", "Février", "Mars", "Avril", "Mai", "Juin", "Juillet", "Août", "Septembre",
    "Octobre", "Novembre", "Décembre",
];

#[derive(Debug, Clone, Default, Args)]
pub struct StatsArgs {
    /// Année (1 à 9999), l'année en cours par défaut
    #[arg(value_parser = clap::value_parser!(i32).range(1..=9999))]
    pub annee: Option<i32>,
}

/// Twelve entries, January first; months missing from `months` count zero.
pub fn fill_year(months: &[MonthlyOrders]) -> [MonthlyOrders; 12] {
    let mut year: [MonthlyOrders; 12] = std::array::from_fn(|i| MonthlyOrders::empty(i as u32 + 1));
    for entry in months {
        if let Some(slot) = (entry.month as usize)
            .checked_sub(1)
            .and_then(|i| year.get_mut(i))
        {
            *slot = *entry;
        }
    }
    year
}

/// Builds the yearly table.
///
/// # Arguments
/// * `args` - The year to show; the year of the command when absent.
///
/// # Returns
/// Always `Reply::Ok`: a year without orders, or a query that fails, shows
/// twelve empty months.
pub fn process(ctx: &Context<'_>, args: &StatsArgs) -> Reply {
    let year = args.annee.unwrap_or_else(|| ctx.now.year());

    let months = fill_year(&orders_per_month(ctx.store, year));
    let mut out = format!("Statistiques des commandes - Année {}\n\n", year);
    for entry in &months {
        let _ = writeln!(
            out,
            "{:<10} {:>4} commande(s)  Chiffre d'affaires : {:>12}",
            MONTH_NAMES[entry.month as usize - 1],
            entry.order_count,
            display_amount(entry.revenue)
        );
    }
    let total_orders: i64 = months.iter().map(|m| m.order_count).sum();
    let total_revenue: Decimal = months.iter().map(|m| m.revenue).sum();
    let _ = write!(
        out,
        "\nTotal année : {} commande(s), Chiffre d'affaires total : {}",
        total_orders,
        display_amount(total_revenue)
    );
    Reply::Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::cli::{parse_line, Command};
    use crate::services::tests::context_for;
    use crate::store::fixtures::*;
    use crate::store::Store;
    use common::model::order::OrderStatus;

    #[test]
    fn gaps_are_filled_with_zero() {
        let march = MonthlyOrders {
            month: 3,
            order_count: 3,
            revenue: Decimal::new(6060, 2),
        };
        let year = fill_year(&[march]);
        assert_eq!(year[2], march);
        assert_eq!(year[3], MonthlyOrders::empty(4));
        assert!(year.iter().enumerate().all(|(i, m)| m.month == i as u32 + 1));
        assert_eq!(year.iter().map(|m| m.order_count).sum::<i64>(), 3);
    }

    #[test]
    fn report_lists_every_month_and_totals() {
        let store = Store::open_in_memory().unwrap();
        let id = store.add_client(&client_fields("Dupont", "Jean")).unwrap();
        for (day, amount) in [(1, "10"), (15, "20.25"), (31, "0.75")] {
            store
                .add_order(&new_order(id, at(2024, 3, day, 12, 0, 0), OrderStatus::Delivered, amount))
                .unwrap();
        }

        let args = StatsArgs { annee: Some(2024) };
        let text = context_for(&store, |ctx| process(ctx, &args)).to_string();
        assert!(text.starts_with("Statistiques des commandes - Année 2024"));
        assert_eq!(text.lines().filter(|l| l.contains("commande(s)  Chiffre")).count(), 12);
        assert!(text.contains("Mars          3 commande(s)"));
        assert!(text.contains("Avril         0 commande(s)"));
        assert!(text.ends_with("Total année : 3 commande(s), Chiffre d'affaires total : 31.00 €"));
    }

    #[test]
    fn defaults_to_current_year_and_checks_input() {
        let store = Store::open_in_memory().unwrap();
        let reply = context_for(&store, |ctx| process(ctx, &StatsArgs::default()));
        assert!(reply.to_string().starts_with("Statistiques des commandes - Année 2024"));

        for line in ["stats deux", "stats 0", "stats 10000"] {
            assert!(matches!(parse_line(line), Err(Reply::Warning(_))), "{line}");
        }
        assert!(matches!(
            parse_line("stats 2023"),
            Ok(Command::Stats(StatsArgs { annee: Some(2023) }))
        ));
    }
}
