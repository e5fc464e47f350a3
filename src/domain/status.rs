use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Titles of the rows seeded into `order_statuses`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatusTitle {
    New,
    Processing,
    Shipped,
    Completed,
    Refunded,
}

impl OrderStatusTitle {
    pub const ALL: [OrderStatusTitle; 5] = [
        OrderStatusTitle::New,
        OrderStatusTitle::Processing,
        OrderStatusTitle::Shipped,
        OrderStatusTitle::Completed,
        OrderStatusTitle::Refunded,
    ];

    /// The status a checked out order moves to. Looked up by title because
    /// `is_default` belongs to `New`.
    pub const CHECKOUT: OrderStatusTitle = OrderStatusTitle::Processing;

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatusTitle::New => "NEW",
            OrderStatusTitle::Processing => "PROCESSING",
            OrderStatusTitle::Shipped => "SHIPPED",
            OrderStatusTitle::Completed => "COMPLETED",
            OrderStatusTitle::Refunded => "REFUNDED",
        }
    }
}

impl fmt::Display for OrderStatusTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatusTitle {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatusTitle::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("unknown order status {s:?}"))
    }
}
