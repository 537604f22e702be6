//! Statistics payloads as returned by the remote API.
//!
//! Snapshots only: the gateway deserializes them strictly and hands them to
//! the caller untouched. Durations are seconds, money is in whole roubles.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Unit, UnitId};

/// Unit reference sent to endpoints that echo unit names back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitIdAndName {
    pub id: UnitId,
    pub name: String,
}

impl From<&Unit> for UnitIdAndName {
    fn from(unit: &Unit) -> Self {
        Self {
            id: unit.id,
            name: unit.name.clone(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalesChannel {
    DineIn,
    Delivery,
    Takeaway,
}

impl SalesChannel {
    pub fn as_str(self) -> &'static str {
        match self {
            SalesChannel::DineIn => "dine_in",
            SalesChannel::Delivery => "delivery",
            SalesChannel::Takeaway => "takeaway",
        }
    }
}

/// Per-unit results plus the ids the upstream could not compute.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitsStatistics<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub errors: Vec<UnitId>,
}

impl<T> Default for UnitsStatistics<T> {
    fn default() -> Self {
        Self {
            results: Vec::new(),
            errors: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitKitchenPerformance {
    pub unit_id: UnitId,
    pub revenue_per_hour: i64,
    /// Percent change against the same weekday a week before.
    pub revenue_related_to_week_before: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitKitchenProduction {
    pub unit_id: UnitId,
    pub average_cooking_time: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitDeliveryPerformance {
    pub unit_id: UnitId,
    pub orders_for_courier_count_per_hour_today: f64,
    pub orders_for_courier_count_per_hour_week_before: f64,
    pub delivery_with_courier_app_percent: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitHeatedShelf {
    pub unit_id: UnitId,
    pub average_awaiting_time: u32,
    pub awaiting_orders_count: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitCouriers {
    pub unit_id: UnitId,
    pub in_queue_count: u32,
    pub total_count: u32,
}

pub type KitchenPerformanceStatistics = UnitsStatistics<UnitKitchenPerformance>;
pub type KitchenProductionStatistics = UnitsStatistics<UnitKitchenProduction>;
pub type DeliveryPerformanceStatistics = UnitsStatistics<UnitDeliveryPerformance>;
pub type HeatedShelfStatistics = UnitsStatistics<UnitHeatedShelf>;
pub type CouriersStatistics = UnitsStatistics<UnitCouriers>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitRevenue {
    pub unit_id: UnitId,
    pub today: i64,
    pub week_before: i64,
    pub delta_from_week_before: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TotalRevenue {
    pub today: i64,
    pub week_before: i64,
    pub delta_from_week_before: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RevenueResults {
    pub units: Vec<UnitRevenue>,
    pub total: TotalRevenue,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RevenueStatistics {
    pub results: RevenueResults,
    #[serde(default)]
    pub errors: Vec<UnitId>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitBeingLateCertificatesTodayAndWeekBefore {
    pub unit_id: UnitId,
    pub unit_name: String,
    pub certificates_today_count: u32,
    pub certificates_week_before_count: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitBonusSystem {
    pub unit_id: UnitId,
    pub unit_name: String,
    pub orders_with_phone_numbers_count: u32,
    pub orders_with_phone_numbers_percent: u32,
    pub total_orders_count: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitDeliverySpeed {
    pub unit_uuid: Uuid,
    pub average_cooking_time: u32,
    pub average_delivery_order_fulfillment_time: u32,
    pub average_heated_shelf_time: u32,
    pub average_order_trip_time: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitOrdersHandoverTime {
    pub unit_uuid: Uuid,
    pub average_tracking_pending_time: u32,
    pub average_cooking_time: u32,
    pub average_heated_shelf_time: u32,
}
