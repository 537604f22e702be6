use std::collections::HashSet;

use async_trait::async_trait;

use crate::{
    domain::{Region, ReportType, Unit, UnitId},
    Result,
};

/// Read side of the settings/database service the gateway consumes.
///
/// Writes (toggling units, storing credentials) happen elsewhere; values are
/// read per request and not cached.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Unit catalog of a region, in display order.
    async fn units_in_region(&self, region: &Region) -> Result<Vec<Unit>>;

    /// Ids enabled for `report_type` in `region`. May contain stale ids.
    async fn enabled_unit_ids(
        &self,
        report_type: ReportType,
        region: &Region,
    ) -> Result<HashSet<UnitId>>;
}
