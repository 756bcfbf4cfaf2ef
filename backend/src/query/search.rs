use super::{or_empty, order_row_from_row, ORDER_ROW_SELECT};
use crate::store::{format_timestamp, Store, StoreResult};
use chrono::{NaiveDate, NaiveTime};
use common::model::order::{OrderRow, OrderStatus};
use log::debug;
use rusqlite::params_from_iter;
use rusqlite::types::Value;

/// How search results are ordered. Ties always fall back to the order id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    DateAsc,
    DateDesc,
    AmountDesc,
}

impl SortKey {
    /// `date_desc` and `amount_desc` (or `montant_desc`) are recognised;
    /// anything else sorts by date, oldest first.
    pub fn parse(key: &str) -> Self {
        match key.trim() {
            "date_desc" => Self::DateDesc,
            "amount_desc" | "montant_desc" => Self::AmountDesc,
            _ => Self::DateAsc,
        }
    }

    fn order_by(self) -> &'static str {
        match self {
            Self::DateAsc => "co.date_commande ASC, co.id_commande ASC",
            Self::DateDesc => "co.date_commande DESC, co.id_commande ASC",
            Self::AmountDesc => "co.montant_centimes DESC, co.id_commande ASC",
        }
    }
}

/// Criteria of an order search. An absent criterion does not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderSearch {
    /// Case-sensitive substring of the client's last name.
    pub name: Option<String>,
    pub status: Option<OrderStatus>,
    /// First day included, from midnight.
    pub from: Option<NaiveDate>,
    /// Last day included, up to 23:59:59.
    pub to: Option<NaiveDate>,
    pub sort: SortKey,
}

impl OrderSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty name is the same as no name filter.
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string()).filter(|n| !n.is_empty());
        self
    }

    pub fn status(mut self, status: Option<OrderStatus>) -> Self {
        self.status = status;
        self
    }

    pub fn since(mut self, day: NaiveDate) -> Self {
        self.from = Some(day);
        self
    }

    pub fn until(mut self, day: NaiveDate) -> Self {
        self.to = Some(day);
        self
    }

    pub fn sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// The statement for these criteria, with one bound value per `?`.
    pub(crate) fn to_sql(&self) -> (String, Vec<Value>) {
        let mut clauses: Vec<&str> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Some(name) = &self.name {
            clauses.push("instr(c.nom, ?) > 0");
            values.push(Value::Text(name.clone()));
        }
        if let Some(status) = self.status {
            clauses.push("co.statut = ?");
            values.push(Value::Text(status.as_str().to_string()));
        }
        if let Some(from) = self.from {
            clauses.push("co.date_commande >= ?");
            values.push(Value::Text(format_timestamp(&from.and_time(NaiveTime::MIN))));
        }
        if let Some(to) = self.to {
            let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
            clauses.push("co.date_commande <= ?");
            values.push(Value::Text(format_timestamp(&to.and_time(end_of_day))));
        }

        let mut sql = String::from(ORDER_ROW_SELECT);
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY ");
        sql.push_str(self.sort.order_by());
        (sql, values)
    }
}

/// Runs the search. A failing statement is logged and gives no rows.
pub fn search_orders(store: &Store, search: &OrderSearch) -> Vec<OrderRow> {
    or_empty("search_orders", run_search(store, search))
}

fn run_search(store: &Store, search: &OrderSearch) -> StoreResult<Vec<OrderRow>> {
    let (sql, values) = search.to_sql();
    debug!("search_orders: {} ({} bound values)", sql, values.len());
    let mut stmt = store.conn().prepare(&sql)?;
    let rows = stmt
        .query_map(params_from_iter(values.iter()), order_row_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Three clients, seven orders spread over December 2023 to February 2024.
    fn fixture() -> Store {
        let store = Store::open_in_memory().unwrap();
        let smith = store.add_client(&client_fields("Smith", "John")).unwrap();
        let smithson = store.add_client(&client_fields("Smithson", "Ann")).unwrap();
        let doe = store.add_client(&client_fields("Doe", "Smith")).unwrap();

        let orders = [
            (smith, at(2023, 12, 31, 23, 59, 59), OrderStatus::Delivered, "80"),
            (smith, at(2024, 1, 1, 0, 0, 0), OrderStatus::Delivered, "20"),
            (doe, at(2024, 1, 15, 12, 0, 0), OrderStatus::Delivered, "300"),
            (smithson, at(2024, 1, 20, 9, 30, 0), OrderStatus::InProgress, "55.5"),
            (doe, at(2024, 1, 31, 23, 59, 59), OrderStatus::Delivered, "150"),
            (smithson, at(2024, 2, 1, 0, 0, 0), OrderStatus::Delivered, "999"),
            (smith, at(2024, 2, 10, 8, 0, 0), OrderStatus::Cancelled, "10"),
        ];
        for (client, placed_at, status, amount) in orders {
            store.add_order(&new_order(client, placed_at, status, amount)).unwrap();
        }
        store
    }

    fn amounts(rows: &[OrderRow]) -> Vec<String> {
        rows.iter().map(|r| r.total_amount.normalize().to_string()).collect()
    }

    #[test]
    fn no_criteria_returns_everything_oldest_first() {
        let store = fixture();
        let rows = search_orders(&store, &OrderSearch::new());
        assert_eq!(rows.len(), 7);
        assert!(rows.windows(2).all(|w| w[0].placed_at <= w[1].placed_at));
        assert_eq!(amounts(&rows), ["80", "20", "300", "55.5", "150", "999", "10"]);
    }

    #[test]
    fn name_filter_matches_last_name_substring_only() {
        let store = fixture();
        let search = OrderSearch::new().name("Smith").sort(SortKey::DateDesc);
        let rows = search_orders(&store, &search);

        // Doe's first name is Smith: not matched.
        assert!(rows.iter().all(|r| r.last_name.contains("Smith")));
        assert_eq!(rows.len(), 5);
        assert!(rows.windows(2).all(|w| w[0].placed_at >= w[1].placed_at));
        assert_eq!(amounts(&rows), ["10", "999", "55.5", "20", "80"]);
    }

    #[test]
    fn name_filter_is_case_sensitive() {
        let store = fixture();
        assert!(search_orders(&store, &OrderSearch::new().name("smith")).is_empty());
    }

    #[test]
    fn status_and_inclusive_date_range() {
        let store = fixture();
        let search = OrderSearch::new()
            .name("")
            .status(Some(OrderStatus::Delivered))
            .since(day(2024, 1, 1))
            .until(day(2024, 1, 31))
            .sort(SortKey::AmountDesc);
        let rows = search_orders(&store, &search);

        assert_eq!(amounts(&rows), ["300", "150", "20"]);
        assert!(rows.iter().all(|r| r.status == OrderStatus::Delivered));
    }

    #[test]
    fn open_ended_ranges() {
        let store = fixture();
        let since_february = search_orders(&store, &OrderSearch::new().since(day(2024, 2, 1)));
        assert_eq!(amounts(&since_february), ["999", "10"]);

        let until_new_year = search_orders(&store, &OrderSearch::new().until(day(2023, 12, 31)));
        assert_eq!(amounts(&until_new_year), ["80"]);
    }

    #[test]
    fn rows_carry_client_names_and_all_order_fields() {
        let store = Store::open_in_memory().unwrap();
        let id = store.add_client(&client_fields("Moreau", "Inès")).unwrap();
        let mut order = new_order(id, at(2024, 5, 2, 10, 0, 0), OrderStatus::InProgress, "12.34");
        order.payment_method = "Espèces".to_string();
        order.remark = "à emporter".to_string();
        let order_id = store.add_order(&order).unwrap();

        let rows = search_orders(&store, &OrderSearch::new());
        let row = &rows[0];
        assert_eq!(row.order_id, order_id);
        assert_eq!(row.client_id, id);
        assert_eq!(row.client_name(), "Inès Moreau");
        assert_eq!(row.placed_at, order.placed_at);
        assert_eq!(row.status, OrderStatus::InProgress);
        assert_eq!(row.total_amount, order.total_amount);
        assert_eq!(row.payment_method, "Espèces");
        assert_eq!(row.remark, "à emporter");
    }

    #[test]
    fn criteria_values_are_bound_not_inlined() {
        let search = OrderSearch::new()
            .name("O'Brien'; DROP TABLE client; --")
            .status(Some(OrderStatus::Cancelled));
        let (sql, values) = search.to_sql();
        assert!(!sql.contains("O'Brien"));
        assert_eq!(values.len(), 2);
        assert!(sql.ends_with("ORDER BY co.date_commande ASC, co.id_commande ASC"));

        let store = fixture();
        assert!(search_orders(&store, &search).is_empty());
        assert_eq!(search_orders(&store, &OrderSearch::new()).len(), 7);
    }

    #[test]
    fn sort_key_parsing() {
        assert_eq!(SortKey::parse("date_desc"), SortKey::DateDesc);
        assert_eq!(SortKey::parse("amount_desc"), SortKey::AmountDesc);
        assert_eq!(SortKey::parse("montant_desc"), SortKey::AmountDesc);
        assert_eq!(SortKey::parse(""), SortKey::DateAsc);
        assert_eq!(SortKey::parse("price"), SortKey::DateAsc);
    }
}
