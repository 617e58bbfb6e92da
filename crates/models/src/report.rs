//! Sales aggregation behind the PDF reports and the AI insights

use crate::order::{Order, OrderStatus};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ReportPeriod {
    Today,
    Week,
    Month,
}

impl ReportPeriod {
    /// Number of calendar days covered, today included
    pub fn days(self) -> i64 {
        match self {
            Self::Today => 1,
            Self::Week => 7,
            Self::Month => 30,
        }
    }

    /// Half-open `[start, end)` range ending at the end of `today`
    pub fn bounds(self, today: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
        let first_day = today - Duration::days(self.days() - 1);
        (day_start(first_day), day_start(today) + Duration::days(1))
    }
}

/// Half-open `[start, end)` range covering one UTC calendar day
pub fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = day_start(date);
    (start, start + Duration::days(1))
}

fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ItemSales {
    pub name: String,
    pub quantity: i64,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SalesSummary {
    /// Every order in the range, cancelled ones included
    pub total_orders: usize,
    /// Revenue of non-cancelled orders
    pub total_revenue: Decimal,
    pub average_order_value: Decimal,
    pub top_selling_items: Vec<ItemSales>,
    pub orders_by_status: BTreeMap<String, usize>,
}

impl SalesSummary {
    /// How many entries `top_selling_items` keeps
    pub const TOP_ITEMS: usize = 5;

    pub fn from_orders(orders: &[Order]) -> Self {
        let mut orders_by_status = BTreeMap::new();
        let mut items: HashMap<&str, ItemSales> = HashMap::new();
        let mut total_revenue = Decimal::ZERO;
        let mut billable = 0usize;

        for order in orders {
            *orders_by_status.entry(order.status.to_string()).or_insert(0) += 1;

            if order.status == OrderStatus::Cancelled {
                continue;
            }

            billable += 1;
            total_revenue += order.total;

            for item in &order.items {
                let name = if item.name.is_empty() {
                    "Unknown item"
                } else {
                    item.name.as_str()
                };

                let entry = items.entry(name).or_insert_with(|| ItemSales {
                    name: name.to_string(),
                    quantity: 0,
                    revenue: Decimal::ZERO,
                });
                entry.quantity += i64::from(item.quantity);
                entry.revenue += item.line_total();
            }
        }

        let average_order_value = if billable == 0 {
            Decimal::ZERO
        } else {
            (total_revenue / Decimal::from(billable)).round_dp(2)
        };

        let mut top_selling_items: Vec<ItemSales> = items.into_values().collect();
        top_selling_items.sort_by(|a, b| b.quantity.cmp(&a.quantity).then(a.name.cmp(&b.name)));
        top_selling_items.truncate(Self::TOP_ITEMS);

        Self {
            total_orders: orders.len(),
            total_revenue,
            average_order_value,
            top_selling_items,
            orders_by_status,
        }
    }
}

/// Headline numbers for the admin dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DashboardStats {
    pub total_orders: u64,
    /// Client accounts only
    pub total_users: u64,
    /// Sum over orders that were not cancelled
    pub total_revenue: Decimal,
    pub today_orders: u64,
}
