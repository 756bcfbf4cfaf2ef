//! # Query Builder
//!
//! Read-only queries over orders joined with their clients:
//!
//! - `search`: the multi-criteria order search. Each criterion is optional and
//!   only adds a `WHERE` clause when present. The sort order is picked from a
//!   closed set, so no caller text ever reaches the SQL string.
//! - `monthly`: per-month aggregation for a year, and the orders of a single
//!   month used by report export.
//!
//! These functions never fail from the caller's point of view. A statement
//! that cannot run is logged at `warn` and yields an empty result.

mod monthly;
mod search;

pub use monthly::{orders_in_month, orders_per_month};
pub use search::{search_orders, OrderSearch, SortKey};

use crate::store::{cents_to_amount, status_column, StoreResult};
use common::model::order::OrderRow;
use rusqlite::Row;

const ORDER_ROW_SELECT: &str = "SELECT co.id_commande, c.id_client, c.nom, c.prenom, co.date_commande, \
            co.statut, co.montant_centimes, co.moyen_paiement, co.remarque \
     FROM commande co JOIN client c ON c.id_client = co.id_client";

fn order_row_from_row(row: &Row<'_>) -> rusqlite::Result<OrderRow> {
    Ok(OrderRow {
        order_id: row.get(0)?,
        client_id: row.get(1)?,
        last_name: row.get(2)?,
        first_name: row.get(3)?,
        placed_at: row.get(4)?,
        status: status_column(row, 5)?,
        total_amount: cents_to_amount(row.get(6)?),
        payment_method: row.get(7)?,
        remark: row.get(8)?,
    })
}

fn or_empty<T>(operation: &str, result: StoreResult<Vec<T>>) -> Vec<T> {
    result.unwrap_or_else(|e| {
        log::warn!("{} failed: {}", operation, e);
        Vec::new()
    })
}
