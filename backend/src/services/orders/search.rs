use crate::query::{search_orders, OrderSearch, SortKey};
use crate::report::display_amount;
use crate::services::cli::{parse_day, parse_status};
use crate::services::context::{Context, Reply};
use chrono::NaiveDate;
use clap::Args;
use common::model::order::{OrderRow, OrderStatus};
use rust_decimal::Decimal;
use std::fmt::Write;

/// Criteria of `order search`. Every option is optional; `nom`, `statut`,
/// `du`, `au` and `tri` also answer to `name`, `status`, `from`, `to` and `sort`.
#[derive(Debug, Clone, Default, Args)]
pub struct SearchArgs {
    /// Partie du nom de famille du client (sensible à la casse)
    #[arg(long, visible_alias = "name")]
    pub nom: Option<String>,
    /// EN_COURS, LIVRE ou ANNULE
    #[arg(long, visible_alias = "status", value_parser = parse_status)]
    pub statut: Option<OrderStatus>,
    /// Premier jour inclus (AAAA-MM-JJ ou JJ/MM/AAAA)
    #[arg(long, visible_alias = "from", value_parser = parse_day)]
    pub du: Option<NaiveDate>,
    /// Dernier jour inclus (AAAA-MM-JJ ou JJ/MM/AAAA)
    #[arg(long, visible_alias = "to", value_parser = parse_day)]
    pub au: Option<NaiveDate>,
    /// date_desc, amount_desc (ou montant_desc) ; date croissante sinon
    #[arg(long, visible_alias = "sort")]
    pub tri: Option<String>,
}

impl SearchArgs {
    pub(crate) fn to_search(&self) -> OrderSearch {
        let mut search = OrderSearch::new()
            .name(self.nom.as_deref().unwrap_or_default())
            .status(self.statut)
            .sort(SortKey::parse(self.tri.as_deref().unwrap_or_default()));
        if let Some(day) = self.du {
            search = search.since(day);
        }
        if let Some(day) = self.au {
            search = search.until(day);
        }
        search
    }
}

pub(crate) fn render_rows(rows: &[OrderRow]) -> String {
    let mut out = format!(
        "{:>5}  {:<28}  {:<16}  {:<8}  {:>12}  {:<15}  {}\n",
        "N°", "Client", "Date", "Statut", "Montant", "Paiement", "Remarque"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:>5}  {:<28}  {:<16}  {:<8}  {:>12}  {:<15}  {}",
            row.order_id,
            row.client_name(),
            row.placed_at.format("%d/%m/%Y %H:%M"),
            row.status,
            display_amount(row.total_amount),
            row.payment_method,
            row.remark
        );
    }
    let total: Decimal = rows.iter().map(|r| r.total_amount).sum();
    let _ = write!(
        out,
        "{} commande(s), total {}",
        rows.len(),
        display_amount(total)
    );
    out
}

/// `order search [--nom ..] [--statut ..] [--du ..] [--au ..] [--tri ..]`
///
/// # Returns
/// - `Reply::Ok` with the matching orders and their total, or
///   "Aucune commande trouvée.". A failing query also ends up here, empty.
pub fn process(ctx: &Context<'_>, args: &SearchArgs) -> Reply {
    let rows = search_orders(ctx.store, &args.to_search());
    if rows.is_empty() {
        return Reply::Ok("Aucune commande trouvée.".to_string());
    }
    Reply::Ok(render_rows(&rows))
}
