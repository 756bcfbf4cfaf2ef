use super::{cents_to_amount, logged, Store, StoreResult};
use common::model::client::{Client, ClientFields, ClientOrderCount};
use rusqlite::{params, OptionalExtension, Params, Row};
use rust_decimal::Decimal;

const CLIENT_COLUMNS: &str = "id_client, nom, prenom, email, telephone, adresse";

fn client_from_row(row: &Row<'_>) -> rusqlite::Result<Client> {
    Ok(Client {
        id: row.get(0)?,
        fields: ClientFields {
            last_name: row.get(1)?,
            first_name: row.get(2)?,
            email: row.get(3)?,
            phone: row.get(4)?,
            address: row.get(5)?,
        },
    })
}

impl Store {
    /// Inserts a client.
    ///
    /// # Arguments
    /// * `fields` - Already trimmed and checked by the caller.
    ///
    /// # Returns
    /// The id the database assigned to the client. Fails when the insert is
    /// rejected, e.g. an email that is already taken.
    pub fn add_client(&self, fields: &ClientFields) -> StoreResult<i64> {
        logged("add_client", insert_client(self.conn(), fields))
    }

    /// Looks a client up by id. `Ok(None)` when there is no such client.
    pub fn get_client(&self, id: i64) -> StoreResult<Option<Client>> {
        let result = self
            .conn()
            .query_row(
                &format!("SELECT {CLIENT_COLUMNS} FROM client WHERE id_client = ?1"),
                params![id],
                client_from_row,
            )
            .optional()
            .map_err(Into::into);
        logged("get_client", result)
    }

    /// Overwrites every field of the client. Returns the number of rows touched,
    /// so `Ok(0)` means there is no client with this id.
    pub fn update_client(&self, id: i64, fields: &ClientFields) -> StoreResult<usize> {
        let result = self
            .conn()
            .execute(
                "UPDATE client SET nom = ?1, prenom = ?2, email = ?3, telephone = ?4, adresse = ?5 \
                 WHERE id_client = ?6",
                params![
                    fields.last_name,
                    fields.first_name,
                    fields.email,
                    fields.phone,
                    fields.address,
                    id
                ],
            )
            .map_err(Into::into);
        logged("update_client", result)
    }

    /// Deletes the client.
    ///
    /// # Returns
    /// - `Ok(1)` when the client is gone, `Ok(0)` when the id is unknown.
    /// - `Err` while the client still owns orders: the foreign key refuses it.
    pub fn delete_client(&self, id: i64) -> StoreResult<usize> {
        let result = self
            .conn()
            .execute("DELETE FROM client WHERE id_client = ?1", params![id])
            .map_err(Into::into);
        logged("delete_client", result)
    }

    /// All clients, sorted by last name then first name.
    pub fn list_clients(&self) -> StoreResult<Vec<Client>> {
        let sql = format!("SELECT {CLIENT_COLUMNS} FROM client ORDER BY nom, prenom, id_client");
        logged("list_clients", self.query_clients(&sql, []))
    }

    /// Clients whose last name, first name or email contains `text`.
    ///
    /// # Arguments
    /// * `text` - Searched as is, case-sensitive, after trimming.
    ///
    /// # Returns
    /// The matching clients sorted by name. A blank `text` returns the whole
    /// list, exactly as `list_clients` does.
    pub fn search_clients(&self, text: &str) -> StoreResult<Vec<Client>> {
        let text = text.trim();
        if text.is_empty() {
            return self.list_clients();
        }
        let sql = format!(
            "SELECT {CLIENT_COLUMNS} FROM client \
             WHERE instr(nom, ?1) > 0 OR instr(prenom, ?1) > 0 OR instr(email, ?1) > 0 \
             ORDER BY nom, prenom, id_client"
        );
        logged("search_clients", self.query_clients(&sql, params![text]))
    }

    /// Every client with the number of orders it owns, zero included.
    pub fn clients_with_order_counts(&self) -> StoreResult<Vec<ClientOrderCount>> {
        logged("clients_with_order_counts", self.query_order_counts())
    }

    fn query_clients(&self, sql: &str, params: impl Params) -> StoreResult<Vec<Client>> {
        let mut stmt = self.conn().prepare(sql)?;
        let clients = stmt
            .query_map(params, client_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(clients)
    }

    fn query_order_counts(&self) -> StoreResult<Vec<ClientOrderCount>> {
        let mut stmt = self.conn().prepare(
            "SELECT c.id_client, c.nom, c.prenom, c.email, c.telephone, c.adresse, \
                    COUNT(co.id_commande) \
             FROM client c LEFT JOIN commande co ON co.id_client = c.id_client \
             GROUP BY c.id_client \
             ORDER BY c.nom, c.prenom, c.id_client",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(ClientOrderCount {
                    client: client_from_row(row)?,
                    order_count: row.get(6)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Sum of the amounts of every order of the client; zero when it has none.
    pub fn total_revenue_for_client(&self, id: i64) -> StoreResult<Decimal> {
        let result = self
            .conn()
            .query_row(
                "SELECT COALESCE(SUM(montant_centimes), 0) FROM commande WHERE id_client = ?1",
                params![id],
                |row| row.get::<_, i64>(0),
            )
            .map(cents_to_amount)
            .map_err(Into::into);
        logged("total_revenue_for_client", result)
    }

    pub fn order_count_for_client(&self, id: i64) -> StoreResult<i64> {
        let result = self
            .conn()
            .query_row(
                "SELECT COUNT(*) FROM commande WHERE id_client = ?1",
                params![id],
                |row| row.get(0),
            )
            .map_err(Into::into);
        logged("order_count_for_client", result)
    }
}

pub(super) fn insert_client(conn: &rusqlite::Connection, fields: &ClientFields) -> StoreResult<i64> {
    conn.execute(
        "INSERT INTO client (nom, prenom, email, telephone, adresse) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            fields.last_name,
            fields.first_name,
            fields.email,
            fields.phone,
            fields.address
        ],
    )?;
    Ok(conn.last_insert_rowid())
}
