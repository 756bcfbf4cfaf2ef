use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Orders of one calendar month: how many, and the revenue they add up to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyOrders {
    /// 1 = January.
    pub month: u32,
    pub order_count: i64,
    pub revenue: Decimal,
}

impl MonthlyOrders {
    pub fn empty(month: u32) -> Self {
        Self {
            month,
            order_count: 0,
            revenue: Decimal::ZERO,
        }
    }
}
