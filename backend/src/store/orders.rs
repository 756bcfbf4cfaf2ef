use super::clients::insert_client;
use super::{amount_to_cents, cents_to_amount, logged, status_column, Store, StoreResult};
use chrono::NaiveDateTime;
use common::model::client::ClientFields;
use common::model::order::{NewOrder, Order, OrderUpdate};
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Text layout of `date_commande`. Lexical order matches chronological order.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_timestamp(at: &NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

fn order_from_row(row: &Row<'_>) -> rusqlite::Result<Order> {
    Ok(Order {
        id: row.get(0)?,
        client_id: row.get(1)?,
        placed_at: row.get(2)?,
        status: status_column(row, 3)?,
        total_amount: cents_to_amount(row.get(4)?),
        payment_method: row.get(5)?,
        remark: row.get(6)?,
    })
}

impl Store {
    /// Inserts an order for an existing client.
    ///
    /// # Arguments
    /// * `order` - Its timestamp is kept to the second and its amount must be
    ///   a whole number of centimes.
    ///
    /// # Returns
    /// The id of the new order. Fails for an unknown client (foreign key) or an
    /// amount that does not fit in centimes.
    pub fn add_order(&self, order: &NewOrder) -> StoreResult<i64> {
        logged("add_order", insert_order(self.conn(), order))
    }

    pub fn get_order(&self, id: i64) -> StoreResult<Option<Order>> {
        let result = self
            .conn()
            .query_row(
                "SELECT id_commande, id_client, date_commande, statut, montant_centimes, \
                        moyen_paiement, remarque \
                 FROM commande WHERE id_commande = ?1",
                params![id],
                order_from_row,
            )
            .optional()
            .map_err(Into::into);
        logged("get_order", result)
    }

    /// Rewrites status, amount, payment method and remark. `Ok(0)` when the id is unknown.
    pub fn update_order(&self, id: i64, update: &OrderUpdate) -> StoreResult<usize> {
        logged("update_order", self.execute_order_update(id, update))
    }

    /// Deletes an order. `Ok(0)` when the id is unknown.
    pub fn delete_order(&self, id: i64) -> StoreResult<usize> {
        let result = self
            .conn()
            .execute("DELETE FROM commande WHERE id_commande = ?1", params![id])
            .map_err(Into::into);
        logged("delete_order", result)
    }

    /// Creates a client together with its first order, atomically.
    ///
    /// # Arguments
    /// * `fields` - The new client.
    /// * `order` - Its first order. `order.client_id` is ignored and replaced
    ///   by the id of the new client.
    ///
    /// # Returns
    /// `(client_id, order_id)`. On failure the transaction is rolled back, so
    /// either both rows exist afterwards or neither does.
    pub fn add_client_with_order(
        &self,
        fields: &ClientFields,
        order: &NewOrder,
    ) -> StoreResult<(i64, i64)> {
        logged("add_client_with_order", self.insert_client_with_order(fields, order))
    }

    fn execute_order_update(&self, id: i64, update: &OrderUpdate) -> StoreResult<usize> {
        let cents = amount_to_cents(update.total_amount)?;
        let touched = self.conn().execute(
            "UPDATE commande SET statut = ?1, montant_centimes = ?2, moyen_paiement = ?3, \
             remarque = ?4 WHERE id_commande = ?5",
            params![
                update.status.as_str(),
                cents,
                update.payment_method,
                update.remark,
                id
            ],
        )?;
        Ok(touched)
    }

    fn insert_client_with_order(
        &self,
        fields: &ClientFields,
        order: &NewOrder,
    ) -> StoreResult<(i64, i64)> {
        let tx = self.conn().unchecked_transaction()?;
        let client_id = insert_client(&tx, fields)?;
        let order_id = insert_order(
            &tx,
            &NewOrder {
                client_id,
                ..order.clone()
            },
        )?;
        tx.commit()?;
        Ok((client_id, order_id))
    }
}

fn insert_order(conn: &Connection, order: &NewOrder) -> StoreResult<i64> {
    let cents = amount_to_cents(order.total_amount)?;
    conn.execute(
        "INSERT INTO commande (id_client, date_commande, statut, montant_centimes, moyen_paiement, remarque) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            order.client_id,
            format_timestamp(&order.placed_at),
            order.status.as_str(),
            cents,
            order.payment_method,
            order.remark
        ],
    )?;
    Ok(conn.last_insert_rowid())
}
