//! Report orchestration: settings -> unit selection -> credentials -> dispatch.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::{
    credentials::CredentialResolver,
    domain::{
        CredentialKind, Credentials, Region, ReportType, StatisticsReportType, Unit, UnitId,
    },
    errors::Error,
    ports::SettingsStore,
    statistics::{models::*, StatisticsClient},
    units::{resolve_unit_selection, UnitSelection},
    Result,
};

/// Typed result of one statistics report.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "report", content = "data", rename_all = "snake_case")]
pub enum StatisticsPayload {
    Revenue(RevenueStatistics),
    KitchenPerformance(KitchenPerformanceStatistics),
    KitchenProduction(KitchenProductionStatistics),
    DeliveryPerformance(DeliveryPerformanceStatistics),
    HeatedShelf(HeatedShelfStatistics),
    Couriers(CouriersStatistics),
    BeingLateCertificates(Vec<UnitBeingLateCertificatesTodayAndWeekBefore>),
    BonusSystem(Vec<UnitBonusSystem>),
    DeliverySpeed(Vec<UnitDeliverySpeed>),
    OrdersHandoverTime(Vec<UnitOrdersHandoverTime>),
}

impl StatisticsPayload {
    /// Payload for a report with no units to ask about.
    pub fn empty(kind: StatisticsReportType) -> Self {
        match kind {
            StatisticsReportType::Revenue => Self::Revenue(Default::default()),
            StatisticsReportType::KitchenPerformance => Self::KitchenPerformance(Default::default()),
            StatisticsReportType::KitchenProduction => Self::KitchenProduction(Default::default()),
            StatisticsReportType::DeliveryPerformance => {
                Self::DeliveryPerformance(Default::default())
            }
            StatisticsReportType::HeatedShelf => Self::HeatedShelf(Default::default()),
            StatisticsReportType::Couriers => Self::Couriers(Default::default()),
            StatisticsReportType::BeingLateCertificates => Self::BeingLateCertificates(Vec::new()),
            StatisticsReportType::BonusSystem => Self::BonusSystem(Vec::new()),
            StatisticsReportType::DeliverySpeed => Self::DeliverySpeed(Vec::new()),
            StatisticsReportType::OrdersHandoverTime => Self::OrdersHandoverTime(Vec::new()),
        }
    }

    pub fn kind(&self) -> StatisticsReportType {
        match self {
            Self::Revenue(_) => StatisticsReportType::Revenue,
            Self::KitchenPerformance(_) => StatisticsReportType::KitchenPerformance,
            Self::KitchenProduction(_) => StatisticsReportType::KitchenProduction,
            Self::DeliveryPerformance(_) => StatisticsReportType::DeliveryPerformance,
            Self::HeatedShelf(_) => StatisticsReportType::HeatedShelf,
            Self::Couriers(_) => StatisticsReportType::Couriers,
            Self::BeingLateCertificates(_) => StatisticsReportType::BeingLateCertificates,
            Self::BonusSystem(_) => StatisticsReportType::BonusSystem,
            Self::DeliverySpeed(_) => StatisticsReportType::DeliverySpeed,
            Self::OrdersHandoverTime(_) => StatisticsReportType::OrdersHandoverTime,
        }
    }
}

#[derive(Clone)]
pub struct StatisticsReporter {
    settings: Arc<dyn SettingsStore>,
    credentials: CredentialResolver,
    statistics: StatisticsClient,
}

impl StatisticsReporter {
    pub fn new(
        settings: Arc<dyn SettingsStore>,
        credentials: CredentialResolver,
        statistics: StatisticsClient,
    ) -> Self {
        Self {
            settings,
            credentials,
            statistics,
        }
    }

    /// Current enabled/disabled partition for a settings screen.
    pub async fn unit_selection(
        &self,
        report_type: ReportType,
        region: &Region,
    ) -> Result<UnitSelection> {
        let all_units = self.settings.units_in_region(region).await?;
        let enabled = self.settings.enabled_unit_ids(report_type, region).await?;
        Ok(resolve_unit_selection(report_type, region, &enabled, &all_units))
    }

    /// Fetch one statistics report for the units enabled in `region`.
    pub async fn fetch(
        &self,
        kind: StatisticsReportType,
        account_name: &str,
        region: &Region,
    ) -> Result<StatisticsPayload> {
        let selection = self
            .unit_selection(ReportType::StatisticsReports, region)
            .await?;
        let units: Vec<Unit> = selection.enabled_units().cloned().collect();
        if units.is_empty() {
            tracing::info!(report = %kind, %region, "no enabled units, skipping request");
            return Ok(StatisticsPayload::empty(kind));
        }

        let unit_ids: Vec<UnitId> = units.iter().map(|u| u.id).collect();
        let unit_uuids: Vec<Uuid> = units.iter().filter_map(|u| u.uuid).collect();
        let needs_uuids = kind.credential_kind() == CredentialKind::AccessToken;
        if needs_uuids && unit_uuids.len() < units.len() {
            let missing: Vec<String> = units
                .iter()
                .filter(|u| u.uuid.is_none())
                .map(|u| format!("{} ({})", u.name, u.id))
                .collect();
            tracing::warn!(report = %kind, %region, missing = missing.len(), "units without uuid");
            return Err(Error::Settings(format!(
                "{kind} needs unit uuids; missing for: {}",
                missing.join(", ")
            )));
        }
        let id_and_names: Vec<UnitIdAndName> = units.iter().map(UnitIdAndName::from).collect();

        let credentials = self
            .credentials
            .resolve(kind.credential_kind(), account_name)
            .await?;

        use StatisticsReportType as T;
        let payload = match (kind, credentials) {
            (T::Revenue, None) => {
                StatisticsPayload::Revenue(self.statistics.revenue(&unit_ids).await?)
            }
            (T::KitchenPerformance, Some(Credentials::Cookies(c))) => {
                StatisticsPayload::KitchenPerformance(
                    self.statistics.kitchen_performance(&c, &unit_ids).await?,
                )
            }
            (T::KitchenProduction, Some(Credentials::Cookies(c))) => {
                StatisticsPayload::KitchenProduction(
                    self.statistics.kitchen_production(&c, &unit_ids).await?,
                )
            }
            (T::DeliveryPerformance, Some(Credentials::Cookies(c))) => {
                StatisticsPayload::DeliveryPerformance(
                    self.statistics.delivery_performance(&c, &unit_ids).await?,
                )
            }
            (T::HeatedShelf, Some(Credentials::Cookies(c))) => StatisticsPayload::HeatedShelf(
                self.statistics.heated_shelf(&c, &unit_ids).await?,
            ),
            (T::Couriers, Some(Credentials::Cookies(c))) => {
                StatisticsPayload::Couriers(self.statistics.couriers(&c, &unit_ids).await?)
            }
            (T::BeingLateCertificates, Some(Credentials::Cookies(c))) => {
                StatisticsPayload::BeingLateCertificates(
                    self.statistics
                        .being_late_certificates(&c, &id_and_names)
                        .await?,
                )
            }
            (T::BonusSystem, Some(Credentials::Cookies(c))) => StatisticsPayload::BonusSystem(
                self.statistics.bonus_system(&c, &id_and_names).await?,
            ),
            (T::DeliverySpeed, Some(Credentials::AccessToken(t))) => {
                StatisticsPayload::DeliverySpeed(
                    self.statistics.delivery_speed(&t, &unit_uuids).await?,
                )
            }
            (T::OrdersHandoverTime, Some(Credentials::AccessToken(t))) => {
                StatisticsPayload::OrdersHandoverTime(
                    self.statistics.orders_handover_time(&t, &unit_uuids).await?,
                )
            }
            (kind, other) => {
                return Err(Error::Config(format!(
                    "{kind} cannot be requested with {:?}",
                    other.map(|c| match c {
                        Credentials::AccessToken(_) => "an access token",
                        Credentials::Cookies(_) => "cookies",
                    })
                )))
            }
        };

        tracing::debug!(report = %kind, %region, units = units.len(), "statistics fetched");
        Ok(payload)
    }
}
