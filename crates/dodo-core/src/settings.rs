//! JSON-file settings store.
//!
//! Reads a snapshot exported from the settings service:
//!
//! ```json
//! {
//!   "regions": { "Moscow": [{ "id": 1, "name": "Moscow 4-1", "uuid": "..." }] },
//!   "enabled_units": [
//!     { "report_type": "statistics_reports", "region": "Moscow", "unit_ids": [1] }
//!   ]
//! }
//! ```
//!
//! The file is re-read on every call.

use std::{
    collections::{BTreeMap, HashSet},
    path::PathBuf,
};

use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    domain::{Region, ReportType, Unit, UnitId},
    errors::Error,
    ports::SettingsStore,
    Result,
};

#[derive(Debug, Default, Deserialize)]
struct SettingsFileData {
    #[serde(default)]
    regions: BTreeMap<Region, Vec<Unit>>,
    #[serde(default)]
    enabled_units: Vec<EnabledUnitsEntry>,
}

#[derive(Debug, Deserialize)]
struct EnabledUnitsEntry {
    report_type: ReportType,
    region: Region,
    unit_ids: Vec<UnitId>,
}

#[derive(Clone, Debug)]
pub struct JsonFileSettingsStore {
    path: PathBuf,
}

impl JsonFileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn load(&self) -> Result<SettingsFileData> {
        let txt = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            Error::Settings(format!("cannot read {}: {e}", self.path.display()))
        })?;
        if txt.trim().is_empty() {
            return Ok(SettingsFileData::default());
        }
        serde_json::from_str(&txt)
            .map_err(|e| Error::Settings(format!("invalid {}: {e}", self.path.display())))
    }
}

#[async_trait]
impl SettingsStore for JsonFileSettingsStore {
    async fn units_in_region(&self, region: &Region) -> Result<Vec<Unit>> {
        let mut data = self.load().await?;
        Ok(data.regions.remove(region).unwrap_or_default())
    }

    async fn enabled_unit_ids(
        &self,
        report_type: ReportType,
        region: &Region,
    ) -> Result<HashSet<UnitId>> {
        let data = self.load().await?;
        Ok(data
            .enabled_units
            .into_iter()
            .filter(|e| e.report_type == report_type && &e.region == region)
            .flat_map(|e| e.unit_ids)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_settings(name: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "dodo-settings-{name}-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, body).unwrap();
        path
    }

    const SAMPLE: &str = r#"{
      "regions": {
        "Moscow": [
          {"id": 1, "name": "Moscow 4-1", "uuid": "6f1a3c2e-0b5d-4e7f-9a8b-1c2d3e4f5a6b"},
          {"id": 2, "name": "Moscow 4-2"}
        ],
        "Kazan": [{"id": 5, "name": "Kazan 1"}]
      },
      "enabled_units": [
        {"report_type": "statistics_reports", "region": "Moscow", "unit_ids": [2, 40]},
        {"report_type": "stop_sales", "region": "Moscow", "unit_ids": [1]}
      ]
    }"#;

    #[tokio::test]
    async fn reads_catalog_and_enabled_ids() {
        let path = write_settings("sample", SAMPLE);
        let store = JsonFileSettingsStore::new(&path);
        let moscow = Region::new("Moscow");

        let units = store.units_in_region(&moscow).await.unwrap();
        assert_eq!(units.len(), 2);
        assert!(units[0].uuid.is_some());
        assert!(units[1].uuid.is_none());

        let enabled = store
            .enabled_unit_ids(ReportType::StatisticsReports, &moscow)
            .await
            .unwrap();
        assert_eq!(enabled, HashSet::from([UnitId(2), UnitId(40)]));

        let none = store
            .enabled_unit_ids(ReportType::CanceledOrders, &moscow)
            .await
            .unwrap();
        assert!(none.is_empty());

        assert!(store
            .units_in_region(&Region::new("Nowhere"))
            .await
            .unwrap()
            .is_empty());

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn rereads_file_on_every_call() {
        let path = write_settings("reread", SAMPLE);
        let store = JsonFileSettingsStore::new(&path);
        let kazan = Region::new("Kazan");
        assert_eq!(store.units_in_region(&kazan).await.unwrap().len(), 1);

        std::fs::write(&path, r#"{"regions": {"Kazan": []}}"#).unwrap();
        assert!(store.units_in_region(&kazan).await.unwrap().is_empty());

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn missing_or_invalid_file_is_settings_error() {
        let store = JsonFileSettingsStore::new("/nonexistent/dodo-settings.json");
        let err = store
            .units_in_region(&Region::new("Moscow"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Settings(_)));

        let path = write_settings("invalid", "{not json");
        let err = JsonFileSettingsStore::new(&path)
            .units_in_region(&Region::new("Moscow"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Settings(_)));
        let _ = std::fs::remove_file(&path);
    }
}
