use std::{
    collections::BTreeMap,
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::Error;

/// Dodo unit id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(pub i64);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Region key grouping units on configuration screens.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Region(pub String);

impl Region {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A restaurant unit. Identity is `id`; `name` and `uuid` are descriptive.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    /// Required only by the v2 endpoints, which address units by UUID.
    #[serde(default)]
    pub uuid: Option<Uuid>,
}

impl Unit {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: UnitId(id),
            name: name.into(),
            uuid: None,
        }
    }

    pub fn with_uuid(mut self, uuid: Uuid) -> Self {
        self.uuid = Some(uuid);
        self
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Unit {}

impl Hash for Unit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Settings bucket a unit can be enabled in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    StatisticsReports,
    CanceledOrders,
    StopSales,
}

impl ReportType {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportType::StatisticsReports => "statistics_reports",
            ReportType::CanceledOrders => "canceled_orders",
            ReportType::StopSales => "stop_sales",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which credential an endpoint family authenticates with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CredentialKind {
    Cookies,
    AccessToken,
    /// Public endpoint (revenue).
    None,
}

/// Statistics endpoint family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatisticsReportType {
    Revenue,
    KitchenPerformance,
    KitchenProduction,
    DeliveryPerformance,
    HeatedShelf,
    Couriers,
    BeingLateCertificates,
    BonusSystem,
    DeliverySpeed,
    OrdersHandoverTime,
}

impl StatisticsReportType {
    pub const ALL: [StatisticsReportType; 10] = [
        StatisticsReportType::Revenue,
        StatisticsReportType::KitchenPerformance,
        StatisticsReportType::KitchenProduction,
        StatisticsReportType::DeliveryPerformance,
        StatisticsReportType::HeatedShelf,
        StatisticsReportType::Couriers,
        StatisticsReportType::BeingLateCertificates,
        StatisticsReportType::BonusSystem,
        StatisticsReportType::DeliverySpeed,
        StatisticsReportType::OrdersHandoverTime,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StatisticsReportType::Revenue => "revenue",
            StatisticsReportType::KitchenPerformance => "kitchen_performance",
            StatisticsReportType::KitchenProduction => "kitchen_production",
            StatisticsReportType::DeliveryPerformance => "delivery_performance",
            StatisticsReportType::HeatedShelf => "heated_shelf",
            StatisticsReportType::Couriers => "couriers",
            StatisticsReportType::BeingLateCertificates => "being_late_certificates",
            StatisticsReportType::BonusSystem => "bonus_system",
            StatisticsReportType::DeliverySpeed => "delivery_speed",
            StatisticsReportType::OrdersHandoverTime => "orders_handover_time",
        }
    }

    pub fn credential_kind(self) -> CredentialKind {
        match self {
            StatisticsReportType::Revenue => CredentialKind::None,
            StatisticsReportType::DeliverySpeed | StatisticsReportType::OrdersHandoverTime => {
                CredentialKind::AccessToken
            }
            _ => CredentialKind::Cookies,
        }
    }
}

impl fmt::Display for StatisticsReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatisticsReportType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| Error::Config(format!("unknown statistics report: {s}")))
    }
}

/// Bearer token for the v2 endpoint family.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(pub String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Session cookies for the v1 endpoint family (name -> value).
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CookieJar(pub BTreeMap<String, String>);

impl fmt::Debug for CookieJar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Names only; values are session secrets.
        f.debug_tuple("CookieJar")
            .field(&self.0.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credentials {
    AccessToken(AccessToken),
    Cookies(CookieJar),
}
