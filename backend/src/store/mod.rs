//! # Record Store
//!
//! Persistence of clients and orders in a single SQLite connection.
//!
//! Every operation runs exactly one parameterized statement, except
//! `add_client_with_order` which wraps its two inserts in a transaction.
//! Expected outcomes are plain values: a missing row is `Ok(None)` and an
//! update that touches nothing is `Ok(0)`. Only a statement that fails to
//! execute becomes a `StoreError`, and it is logged at `warn` before being
//! returned.
//!
//! ## Tables
//!
//! - `client`: `id_client`, `nom`, `prenom`, `email` (unique), `telephone`, `adresse`
//! - `commande`: `id_commande`, `id_client`, `date_commande`, `statut`,
//!   `montant_centimes`, `moyen_paiement`, `remarque`
//!
//! Amounts are kept as integer centimes so sums stay exact. Deleting a client
//! that still owns orders is rejected by the foreign key.

mod clients;
mod orders;

pub(crate) use orders::format_timestamp;

use common::model::order::OrderStatus;
use log::{debug, info};
use rusqlite::types::Type;
use rusqlite::Connection;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::path::Path;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS client (
    id_client INTEGER PRIMARY KEY AUTOINCREMENT,
    nom       TEXT NOT NULL,
    prenom    TEXT NOT NULL,
    email     TEXT NOT NULL UNIQUE,
    telephone TEXT NOT NULL DEFAULT '',
    adresse   TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS commande (
    id_commande      INTEGER PRIMARY KEY AUTOINCREMENT,
    id_client        INTEGER NOT NULL REFERENCES client (id_client) ON DELETE RESTRICT,
    date_commande    TEXT NOT NULL,
    statut           TEXT NOT NULL,
    montant_centimes INTEGER NOT NULL,
    moyen_paiement   TEXT NOT NULL DEFAULT '',
    remarque         TEXT NOT NULL DEFAULT ''
);

CREATE INDEX IF NOT EXISTS idx_commande_date ON commande (date_commande);
CREATE INDEX IF NOT EXISTS idx_commande_client ON commande (id_client);
";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("amount out of range: {0}")]
    Amount(Decimal),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Handle on the application database.
///
/// Opened once at startup and passed by reference to whatever needs it.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens (or creates) the SQLite file at `path` and makes sure the schema exists.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        let store = Self::init(conn)?;
        info!("Database opened at {}", path.display());
        Ok(store)
    }

    /// A private database living as long as the handle. Used by tests.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> StoreResult<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.execute_batch(SCHEMA)?;
        debug!("Schema ready");
        Ok(Self { conn })
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }
}

/// Logs a failed statement and hands the error back unchanged.
pub(crate) fn logged<T>(operation: &str, result: StoreResult<T>) -> StoreResult<T> {
    if let Err(e) = &result {
        log::warn!("{} failed: {}", operation, e);
    }
    result
}

/// Whole centimes of `amount`. Fractions of a centime are refused, never rounded.
pub(crate) fn amount_to_cents(amount: Decimal) -> StoreResult<i64> {
    if amount.normalize().scale() > 2 {
        return Err(StoreError::Amount(amount));
    }
    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| cents.to_i64())
        .ok_or(StoreError::Amount(amount))
}

pub(crate) fn cents_to_amount(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Reads a `statut` column, failing the row if the tag is unknown.
pub(crate) fn status_column(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<OrderStatus> {
    let tag: String = row.get(idx)?;
    tag.parse::<OrderStatus>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cents_conversion_is_exact() {
        let amount: Decimal = "1234.56".parse().unwrap();
        assert_eq!(amount_to_cents(amount).unwrap(), 123_456);
        assert_eq!(cents_to_amount(123_456), amount);
        assert_eq!(amount_to_cents("12.500".parse().unwrap()).unwrap(), 1_250);
        assert!(amount_to_cents("0.005".parse().unwrap()).is_err());
        assert!(amount_to_cents("0.004".parse().unwrap()).is_err());
        assert!(amount_to_cents("100000000000000000000".parse().unwrap()).is_err());
    }

    #[test]
    fn schema_creation_is_idempotent() {
        let store = Store::open_in_memory().unwrap();
        store.conn().execute_batch(SCHEMA).unwrap();
    }

    #[test]
    fn file_database_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("commandes.sqlite");
        let id = {
            let store = Store::open(&path).unwrap();
            store.add_client(&fixtures::client_fields("Martin", "Léa")).unwrap()
        };
        let store = Store::open(&path).unwrap();
        assert_eq!(store.get_client(id).unwrap().unwrap().fields.last_name, "Martin");
    }
}
