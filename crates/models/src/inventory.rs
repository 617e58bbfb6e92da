//! Stock levels, movements and threshold alerts

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

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
pub enum MovementType {
    /// Delivery received
    In,
    /// Consumed or wasted
    Out,
    /// Stock count correction; the quantity becomes the new level
    Adjustment,
}

#[cfg(feature = "database")]
string_column!(MovementType);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AlertType {
    OutOfStock,
    LowStock,
    Overstock,
}

/// Alert urgency, ordered most urgent first
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Display, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AlertPriority {
    Critical,
    High,
    Medium,
    Low,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StockError {
    #[error("Quantity must not be negative, got {0}")]
    NegativeQuantity(i32),

    #[error("Insufficient stock: {available} available, {requested} requested")]
    InsufficientStock { available: i32, requested: i32 },

    #[error("Minimum stock level {min} is above maximum {max}")]
    InvalidLevels { min: i32, max: i32 },

    #[error("Receiving {requested} on top of {current} exceeds the largest storable stock level")]
    StockOverflow { current: i32, requested: i32 },
}

/// The three numbers the alert thresholds are computed from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockLevels {
    pub current: i32,
    pub min: i32,
    pub max: i32,
}

impl StockLevels {
    pub fn new(current: i32, min: i32, max: i32) -> Result<Self, StockError> {
        if current < 0 {
            return Err(StockError::NegativeQuantity(current));
        }
        if min > max {
            return Err(StockError::InvalidLevels { min, max });
        }

        Ok(Self { current, min, max })
    }

    /// Compares the current level against the thresholds
    ///
    /// Empty stock is critical, at or below half the minimum is high, at or
    /// below the minimum is medium, and anything above the maximum is a low
    /// priority overstock notice.
    pub fn alert(&self) -> Option<(AlertType, AlertPriority)> {
        if self.current == 0 {
            Some((AlertType::OutOfStock, AlertPriority::Critical))
        } else if self.current <= self.min / 2 {
            Some((AlertType::LowStock, AlertPriority::High))
        } else if self.current <= self.min {
            Some((AlertType::LowStock, AlertPriority::Medium))
        } else if self.current > self.max {
            Some((AlertType::Overstock, AlertPriority::Low))
        } else {
            None
        }
    }
}

/// Returns the stock level after applying a movement
pub fn apply_movement(
    current: i32,
    movement_type: MovementType,
    quantity: i32,
) -> Result<i32, StockError> {
    if quantity < 0 {
        return Err(StockError::NegativeQuantity(quantity));
    }

    match movement_type {
        MovementType::In => current
            .checked_add(quantity)
            .ok_or(StockError::StockOverflow {
                current,
                requested: quantity,
            }),
        MovementType::Out if quantity > current => Err(StockError::InsufficientStock {
            available: current,
            requested: quantity,
        }),
        MovementType::Out => Ok(current - quantity),
        MovementType::Adjustment => Ok(quantity),
    }
}

/// Human readable alert text for an item
pub fn alert_message(name: &str, unit: &str, levels: &StockLevels, alert: AlertType) -> String {
    match alert {
        AlertType::OutOfStock => format!("{name} is out of stock"),
        AlertType::LowStock => format!(
            "{name} is low: {} {unit} left, minimum is {} {unit}",
            levels.current, levels.min
        ),
        AlertType::Overstock => format!(
            "{name} is overstocked: {} {unit} on hand, maximum is {} {unit}",
            levels.current, levels.max
        ),
    }
}

/// New stock entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InventoryItemInput {
    pub name: String,
    pub category: String,
    pub current_stock: i32,
    pub min_stock_level: i32,
    pub max_stock_level: i32,
    pub unit: String,
    pub cost_per_unit: Decimal,
    #[serde(default)]
    pub supplier: String,
}

impl InventoryItemInput {
    pub fn levels(&self) -> Result<StockLevels, StockError> {
        StockLevels::new(self.current_stock, self.min_stock_level, self.max_stock_level)
    }
}

/// Descriptive fields and thresholds; the stock level itself only moves
/// through recorded movements
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InventoryItemUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub min_stock_level: Option<i32>,
    pub max_stock_level: Option<i32>,
    pub unit: Option<String>,
    pub cost_per_unit: Option<Decimal>,
    pub supplier: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StockMovementInput {
    pub movement_type: MovementType,
    pub quantity: i32,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InventoryAlert {
    pub item_id: Uuid,
    pub item_name: String,
    pub alert_type: AlertType,
    pub priority: AlertPriority,
    pub current_stock: i32,
    pub min_stock_level: i32,
    pub max_stock_level: i32,
    pub message: String,
}

impl InventoryAlert {
    /// The alert for one item, if its level crosses a threshold
    pub fn check(item_id: Uuid, name: &str, unit: &str, levels: &StockLevels) -> Option<Self> {
        let (alert_type, priority) = levels.alert()?;

        Some(Self {
            item_id,
            item_name: name.to_string(),
            alert_type,
            priority,
            current_stock: levels.current,
            min_stock_level: levels.min,
            max_stock_level: levels.max,
            message: alert_message(name, unit, levels, alert_type),
        })
    }
}

/// Sorts alerts most urgent first, then by item name
pub fn sort_alerts(alerts: &mut [InventoryAlert]) {
    alerts.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then_with(|| a.item_name.cmp(&b.item_name))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels(current: i32) -> StockLevels {
        StockLevels::new(current, 10, 50).unwrap()
    }

    #[test]
    fn test_alert_thresholds() {
        assert_eq!(
            levels(0).alert(),
            Some((AlertType::OutOfStock, AlertPriority::Critical))
        );
        assert_eq!(
            levels(5).alert(),
            Some((AlertType::LowStock, AlertPriority::High))
        );
        assert_eq!(
            levels(6).alert(),
            Some((AlertType::LowStock, AlertPriority::Medium))
        );
        assert_eq!(
            levels(10).alert(),
            Some((AlertType::LowStock, AlertPriority::Medium))
        );
        assert_eq!(levels(11).alert(), None);
        assert_eq!(levels(50).alert(), None);
        assert_eq!(
            levels(51).alert(),
            Some((AlertType::Overstock, AlertPriority::Low))
        );
    }

    #[test]
    fn test_invalid_levels() {
        assert_eq!(
            StockLevels::new(5, 20, 10),
            Err(StockError::InvalidLevels { min: 20, max: 10 })
        );
        assert_eq!(
            StockLevels::new(-1, 0, 10),
            Err(StockError::NegativeQuantity(-1))
        );
    }

    #[test]
    fn test_receiving_past_max_stock_is_refused() {
        assert_eq!(
            apply_movement(i32::MAX - 1, MovementType::In, 2),
            Err(StockError::StockOverflow {
                current: i32::MAX - 1,
                requested: 2
            })
        );
        assert_eq!(apply_movement(i32::MAX - 1, MovementType::In, 1), Ok(i32::MAX));
    }

    #[test]
    fn test_priority_order() {
        let mut priorities = vec![
            AlertPriority::Low,
            AlertPriority::Critical,
            AlertPriority::Medium,
            AlertPriority::High,
        ];
        priorities.sort();
        assert_eq!(
            priorities,
            vec![
                AlertPriority::Critical,
                AlertPriority::High,
                AlertPriority::Medium,
                AlertPriority::Low
            ]
        );
    }

    #[test]
    fn test_apply_movement() {
        assert_eq!(apply_movement(10, MovementType::In, 5), Ok(15));
        assert_eq!(apply_movement(10, MovementType::Out, 10), Ok(0));
        assert_eq!(apply_movement(10, MovementType::Adjustment, 3), Ok(3));
        assert_eq!(
            apply_movement(10, MovementType::Out, 11),
            Err(StockError::InsufficientStock {
                available: 10,
                requested: 11
            })
        );
        assert_eq!(
            apply_movement(10, MovementType::In, -1),
            Err(StockError::NegativeQuantity(-1))
        );
    }

    #[test]
    fn test_alert_message() {
        let msg = alert_message("Tomatoes", "kg", &levels(4), AlertType::LowStock);
        assert_eq!(msg, "Tomatoes is low: 4 kg left, minimum is 10 kg");
    }

    #[test]
    fn test_alerts_sorted_by_priority() {
        let mut alerts: Vec<InventoryAlert> = [("Wine", 60), ("Flour", 0), ("Basil", 4)]
            .into_iter()
            .filter_map(|(name, current)| {
                InventoryAlert::check(Uuid::new_v4(), name, "kg", &levels(current))
            })
            .collect();
        sort_alerts(&mut alerts);

        let names: Vec<&str> = alerts.iter().map(|a| a.item_name.as_str()).collect();
        assert_eq!(names, vec!["Flour", "Basil", "Wine"]);
        assert_eq!(alerts[0].message, "Flour is out of stock");
    }

    #[test]
    fn test_no_alert_in_range() {
        assert!(InventoryAlert::check(Uuid::new_v4(), "Rice", "kg", &levels(20)).is_none());
    }
}
