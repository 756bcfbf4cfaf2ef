use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Payment methods offered by the order form. The column itself is free text.
pub const PAYMENT_METHODS: [&str; 4] = ["Carte Bancaire", "Espèces", "Chèque", "Virement"];

/// Lifecycle state of an order.
///
/// Persisted as the tags `EN_COURS`, `LIVRE` and `ANNULE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OrderStatus {
    InProgress,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 3] = [
        OrderStatus::InProgress,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Tag stored in the `statut` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "EN_COURS",
            Self::Delivered => "LIVRE",
            Self::Cancelled => "ANNULE",
        }
    }

    /// Human readable label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            Self::InProgress => "in progress",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order status: {0:?}")]
pub struct ParseStatusError(pub String);

impl FromStr for OrderStatus {
    type Err = ParseStatusError;

    /// Accepts the stored tag or the English label, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "en_cours" | "in_progress" => Ok(Self::InProgress),
            "livre" | "livré" | "delivered" => Ok(Self::Delivered),
            "annule" | "annulé" | "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

/// Values needed to create an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub client_id: i64,
    pub placed_at: NaiveDateTime,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    pub payment_method: String,
    pub remark: String,
}

/// The mutable part of an order. Client and date are fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub status: OrderStatus,
    pub total_amount: Decimal,
    pub payment_method: String,
    pub remark: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub client_id: i64,
    pub placed_at: NaiveDateTime,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    pub payment_method: String,
    pub remark: String,
}

impl Order {
    pub fn update(&self) -> OrderUpdate {
        OrderUpdate {
            status: self.status,
            total_amount: self.total_amount,
            payment_method: self.payment_method.clone(),
            remark: self.remark.clone(),
        }
    }
}

/// An order joined with the name of its client, as returned by order searches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRow {
    pub order_id: i64,
    pub client_id: i64,
    pub last_name: String,
    pub first_name: String,
    pub placed_at: NaiveDateTime,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    pub payment_method: String,
    pub remark: String,
}

impl OrderRow {
    pub fn client_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_tags_and_labels() {
        assert_eq!("LIVRE".parse::<OrderStatus>(), Ok(OrderStatus::Delivered));
        assert_eq!("delivered".parse::<OrderStatus>(), Ok(OrderStatus::Delivered));
        assert_eq!("In Progress".parse::<OrderStatus>(), Ok(OrderStatus::InProgress));
        assert_eq!("en_cours".parse::<OrderStatus>(), Ok(OrderStatus::InProgress));
        assert_eq!("Annulé".parse::<OrderStatus>(), Ok(OrderStatus::Cancelled));
        assert!("shipped".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn stored_tag_parses_back() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }
    }
}
