use super::{or_empty, order_row_from_row, ORDER_ROW_SELECT};
use crate::store::{cents_to_amount, format_timestamp, Store, StoreResult};
use chrono::{Months, NaiveDate, NaiveDateTime, NaiveTime};
use common::model::order::OrderRow;
use common::model::statistics::MonthlyOrders;
use rusqlite::params;

/// `[start, end)` of a calendar period, formatted like `date_commande`.
fn bounds(start: NaiveDate, end: NaiveDate) -> (String, String) {
    let midnight = |d: NaiveDate| -> NaiveDateTime { d.and_time(NaiveTime::MIN) };
    (format_timestamp(&midnight(start)), format_timestamp(&midnight(end)))
}

/// Order count and revenue for every month of `year` that has at least one order,
/// January first. Months without orders are absent.
pub fn orders_per_month(store: &Store, year: i32) -> Vec<MonthlyOrders> {
    or_empty("orders_per_month", run_orders_per_month(store, year))
}

fn run_orders_per_month(store: &Store, year: i32) -> StoreResult<Vec<MonthlyOrders>> {
    let (Some(start), Some(end)) = (
        NaiveDate::from_ymd_opt(year, 1, 1),
        year.checked_add(1).and_then(|next| NaiveDate::from_ymd_opt(next, 1, 1)),
    ) else {
        log::warn!("orders_per_month: year {} out of range", year);
        return Ok(Vec::new());
    };
    let (start, end) = bounds(start, end);

    let mut stmt = store.conn().prepare(
        "SELECT CAST(strftime('%m', date_commande) AS INTEGER) AS mois, \
                COUNT(*), COALESCE(SUM(montant_centimes), 0) \
         FROM commande \
         WHERE date_commande >= ?1 AND date_commande < ?2 \
         GROUP BY mois ORDER BY mois",
    )?;
    let rows = stmt
        .query_map(params![start, end], |row| {
            Ok(MonthlyOrders {
                month: row.get(0)?,
                order_count: row.get(1)?,
                revenue: cents_to_amount(row.get(2)?),
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

/// Every order placed during `month` of `year`, oldest first. This is the
/// result set behind the monthly report export.
pub fn orders_in_month(store: &Store, year: i32, month: u32) -> Vec<OrderRow> {
    or_empty("orders_in_month", run_orders_in_month(store, year, month))
}

fn run_orders_in_month(store: &Store, year: i32, month: u32) -> StoreResult<Vec<OrderRow>> {
    let Some((start, end)) = NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|start| start.checked_add_months(Months::new(1)).map(|end| (start, end)))
    else {
        log::warn!("orders_in_month: invalid month {}-{}", year, month);
        return Ok(Vec::new());
    };
    let (start, end) = bounds(start, end);

    let mut stmt = store.conn().prepare(&format!(
        "{ORDER_ROW_SELECT} \
         WHERE co.date_commande >= ?1 AND co.date_commande < ?2 \
         ORDER BY co.date_commande ASC, co.id_commande ASC"
    ))?;
    let rows = stmt
        .query_map(params![start, end], order_row_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::*;
    use common::model::order::OrderStatus;
    use rust_decimal::Decimal;

    fn fixture() -> Store {
        let store = Store::open_in_memory().unwrap();
        let a = store.add_client(&client_fields("Leroy", "Camille")).unwrap();
        let b = store.add_client(&client_fields("Girard", "Noah")).unwrap();
        let orders = [
            (a, at(2023, 3, 15, 10, 0, 0), "1000"),
            (a, at(2024, 1, 31, 23, 59, 59), "5"),
            (a, at(2024, 3, 1, 0, 0, 0), "10.10"),
            (b, at(2024, 3, 14, 12, 0, 0), "20.20"),
            (b, at(2024, 3, 31, 23, 59, 59), "30.30"),
            (b, at(2024, 5, 2, 8, 0, 0), "7"),
            (a, at(2025, 1, 1, 0, 0, 0), "2000"),
        ];
        for (client, placed_at, amount) in orders {
            store
                .add_order(&new_order(client, placed_at, OrderStatus::Delivered, amount))
                .unwrap();
        }
        store
    }

    #[test]
    fn months_with_orders_only() {
        let store = fixture();
        let months = orders_per_month(&store, 2024);
        assert_eq!(
            months,
            vec![
                MonthlyOrders {
                    month: 1,
                    order_count: 1,
                    revenue: Decimal::new(500, 2),
                },
                MonthlyOrders {
                    month: 3,
                    order_count: 3,
                    revenue: "60.60".parse().unwrap(),
                },
                MonthlyOrders {
                    month: 5,
                    order_count: 1,
                    revenue: Decimal::new(700, 2),
                },
            ]
        );
        assert!(months.iter().all(|m| m.month != 4));
    }

    #[test]
    fn year_without_orders_is_empty() {
        assert!(orders_per_month(&fixture(), 2022).is_empty());
    }

    #[test]
    fn years_outside_the_calendar_are_empty() {
        let store = fixture();
        assert!(orders_per_month(&store, i32::MAX).is_empty());
        assert!(orders_per_month(&store, i32::MIN).is_empty());
        assert!(orders_in_month(&store, i32::MAX, 12).is_empty());
    }

    #[test]
    fn orders_of_one_month() {
        let store = fixture();
        let march = orders_in_month(&store, 2024, 3);
        assert_eq!(march.len(), 3);
        assert_eq!(march[0].last_name, "Leroy");
        assert!(march.windows(2).all(|w| w[0].placed_at <= w[1].placed_at));

        assert!(orders_in_month(&store, 2024, 4).is_empty());
        assert!(orders_in_month(&store, 2024, 13).is_empty());
    }

    #[test]
    fn december_ends_at_new_year() {
        let store = Store::open_in_memory().unwrap();
        let id = store.add_client(&client_fields("Faure", "Lina")).unwrap();
        store
            .add_order(&new_order(id, at(2024, 12, 31, 23, 59, 59), OrderStatus::InProgress, "1"))
            .unwrap();
        store
            .add_order(&new_order(id, at(2025, 1, 1, 0, 0, 0), OrderStatus::InProgress, "1"))
            .unwrap();
        assert_eq!(orders_in_month(&store, 2024, 12).len(), 1);
    }
}
