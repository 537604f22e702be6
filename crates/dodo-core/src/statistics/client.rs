use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::{
    config::Config,
    domain::{AccessToken, CookieJar, UnitId},
    errors::Error,
    http::{build_client, endpoint_url},
    Result,
};

use super::{
    endpoints::{self, shape::*, Endpoint, HttpMethod, UuidFormat},
    models::*,
};

/// Request parameters before placement (query for GET, JSON body for POST).
#[derive(Debug, Default)]
struct RequestParams {
    fields: Vec<(&'static str, Value)>,
}

impl RequestParams {
    fn push(&mut self, key: &'static str, value: Value) {
        self.fields.push((key, value));
    }

    fn into_body(self) -> Value {
        Value::Object(
            self.fields
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect::<Map<String, Value>>(),
        )
    }

    /// Flatten into query pairs; arrays become repeated keys.
    fn into_query(self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        for (key, value) in self.fields {
            match value {
                Value::Array(items) => {
                    out.extend(items.into_iter().map(|item| (key, query_scalar(item))))
                }
                other => out.push((key, query_scalar(other))),
            }
        }
        out
    }
}

fn query_scalar(v: Value) -> String {
    match v {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn encode_uuid(uuid: &Uuid, format: UuidFormat) -> String {
    match format {
        UuidFormat::Simple => uuid.simple().to_string(),
        UuidFormat::Hyphenated => uuid.hyphenated().to_string(),
    }
}

/// Statistics request dispatcher.
///
/// Stateless apart from configuration: every call is one exchange over its
/// own connection, bounded by the configured timeout, never retried. Any
/// transport failure, non-success status or payload that does not match the
/// declared type is `Error::RemoteApi`.
#[derive(Clone, Debug)]
pub struct StatisticsClient {
    base_url: Url,
    http: reqwest::Client,
}

impl StatisticsClient {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self> {
        Ok(Self {
            base_url,
            http: build_client(timeout)?,
        })
    }

    pub fn from_config(cfg: &Config) -> Result<Self> {
        Self::new(cfg.api_url.clone(), cfg.request_timeout)
    }

    /// Shape A: cookies + unit ids, for any endpoint declared with that shape.
    pub async fn request<R: DeserializeOwned>(
        &self,
        endpoint: &Endpoint<CookiesAndUnitIds, R>,
        cookies: &CookieJar,
        unit_ids: &[UnitId],
    ) -> Result<R> {
        let mut params = RequestParams::default();
        params.push("cookies", json!(cookies));
        params.push("unit_ids", json!(unit_ids));
        self.call(endpoint, params).await
    }

    pub async fn request_by_unit_ids<R: DeserializeOwned>(
        &self,
        endpoint: &Endpoint<UnitIds, R>,
        unit_ids: &[UnitId],
    ) -> Result<R> {
        let mut params = RequestParams::default();
        params.push("unit_ids", json!(unit_ids));
        self.call(endpoint, params).await
    }

    pub async fn request_by_units<R: DeserializeOwned>(
        &self,
        endpoint: &Endpoint<CookiesAndUnits, R>,
        cookies: &CookieJar,
        units: &[UnitIdAndName],
    ) -> Result<R> {
        let mut params = RequestParams::default();
        params.push("cookies", json!(cookies));
        params.push("units", json!(units));
        self.call(endpoint, params).await
    }

    pub async fn request_by_unit_uuids<R: DeserializeOwned>(
        &self,
        endpoint: &Endpoint<TokenAndUnitUuids, R>,
        token: &AccessToken,
        unit_uuids: &[Uuid],
    ) -> Result<R> {
        let encoded: Vec<String> = unit_uuids
            .iter()
            .map(|u| encode_uuid(u, endpoint.uuid_format))
            .collect();

        let mut params = RequestParams::default();
        params.push("token", json!(token.as_str()));
        params.push("unit_uuids", json!(encoded));
        self.call(endpoint, params).await
    }

    pub async fn kitchen_performance(
        &self,
        cookies: &CookieJar,
        unit_ids: &[UnitId],
    ) -> Result<KitchenPerformanceStatistics> {
        self.request(&endpoints::KITCHEN_PERFORMANCE, cookies, unit_ids)
            .await
    }

    pub async fn kitchen_production(
        &self,
        cookies: &CookieJar,
        unit_ids: &[UnitId],
    ) -> Result<KitchenProductionStatistics> {
        self.request(&endpoints::KITCHEN_PRODUCTION, cookies, unit_ids)
            .await
    }

    pub async fn delivery_performance(
        &self,
        cookies: &CookieJar,
        unit_ids: &[UnitId],
    ) -> Result<DeliveryPerformanceStatistics> {
        self.request(&endpoints::DELIVERY_PERFORMANCE, cookies, unit_ids)
            .await
    }

    pub async fn heated_shelf(
        &self,
        cookies: &CookieJar,
        unit_ids: &[UnitId],
    ) -> Result<HeatedShelfStatistics> {
        self.request(&endpoints::HEATED_SHELF, cookies, unit_ids)
            .await
    }

    pub async fn couriers(
        &self,
        cookies: &CookieJar,
        unit_ids: &[UnitId],
    ) -> Result<CouriersStatistics> {
        self.request(&endpoints::COURIERS, cookies, unit_ids).await
    }

    pub async fn revenue(&self, unit_ids: &[UnitId]) -> Result<RevenueStatistics> {
        self.request_by_unit_ids(&endpoints::REVENUE, unit_ids)
            .await
    }

    pub async fn being_late_certificates(
        &self,
        cookies: &CookieJar,
        units: &[UnitIdAndName],
    ) -> Result<Vec<UnitBeingLateCertificatesTodayAndWeekBefore>> {
        self.request_by_units(&endpoints::BEING_LATE_CERTIFICATES, cookies, units)
            .await
    }

    pub async fn bonus_system(
        &self,
        cookies: &CookieJar,
        units: &[UnitIdAndName],
    ) -> Result<Vec<UnitBonusSystem>> {
        self.request_by_units(&endpoints::BONUS_SYSTEM, cookies, units)
            .await
    }

    pub async fn delivery_speed(
        &self,
        token: &AccessToken,
        unit_uuids: &[Uuid],
    ) -> Result<Vec<UnitDeliverySpeed>> {
        self.request_by_unit_uuids(&endpoints::DELIVERY_SPEED, token, unit_uuids)
            .await
    }

    pub async fn orders_handover_time(
        &self,
        token: &AccessToken,
        unit_uuids: &[Uuid],
    ) -> Result<Vec<UnitOrdersHandoverTime>> {
        self.request_by_unit_uuids(&endpoints::ORDERS_HANDOVER_TIME, token, unit_uuids)
            .await
    }

    /// The one invocation routine every endpoint goes through.
    async fn call<P, R: DeserializeOwned>(
        &self,
        endpoint: &Endpoint<P, R>,
        mut params: RequestParams,
    ) -> Result<R> {
        let path = endpoint.path;
        if !endpoint.sales_channels.is_empty() {
            let channels: Vec<&str> = endpoint.sales_channels.iter().map(|c| c.as_str()).collect();
            params.push("sales_channels", json!(channels));
        }

        let url = endpoint_url(&self.base_url, path)?;
        let req = self.http.request(endpoint.method.as_reqwest(), url);
        let req = match endpoint.method {
            HttpMethod::Get => req.query(&params.into_query()),
            HttpMethod::Post => req.json(&params.into_body()),
        };

        tracing::debug!(path, method = ?endpoint.method, "requesting statistics");

        let resp = req.send().await.map_err(|e| remote_error(path, &e))?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(path, %status, "statistics endpoint returned an error");
            return Err(Error::RemoteApi(format!("{path} returned {status}")));
        }

        let body = resp.bytes().await.map_err(|e| remote_error(path, &e))?;
        serde_json::from_slice::<R>(&body).map_err(|e| {
            tracing::warn!(path, error = %e, "unexpected statistics payload");
            Error::RemoteApi(format!("malformed response from {path}: {e}"))
        })
    }
}

fn remote_error(path: &str, e: &reqwest::Error) -> Error {
    let reason = if e.is_timeout() {
        "timed out".to_string()
    } else {
        e.to_string()
    };
    tracing::warn!(path, error = %reason, "statistics request failed");
    Error::RemoteApi(format!("request to {path} failed: {reason}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_flattens_arrays_into_repeated_keys() {
        let mut params = RequestParams::default();
        params.push("token", json!("abc"));
        params.push("unit_ids", json!([1, 2]));

        assert_eq!(
            params.into_query(),
            vec![
                ("token", "abc".to_string()),
                ("unit_ids", "1".to_string()),
                ("unit_ids", "2".to_string()),
            ]
        );
    }

    #[test]
    fn body_keeps_structure() {
        let cookies = CookieJar([("auth".to_string(), "x".to_string())].into());
        let mut params = RequestParams::default();
        params.push("cookies", json!(cookies));
        params.push("unit_ids", json!([UnitId(3)]));

        assert_eq!(
            params.into_body(),
            json!({"cookies": {"auth": "x"}, "unit_ids": [3]})
        );
    }

    #[test]
    fn uuid_encoding_follows_descriptor() {
        let id = Uuid::parse_str("6f1a3c2e-0b5d-4e7f-9a8b-1c2d3e4f5a6b").unwrap();
        assert_eq!(
            encode_uuid(&id, UuidFormat::Simple),
            "6f1a3c2e0b5d4e7f9a8b1c2d3e4f5a6b"
        );
        assert_eq!(
            encode_uuid(&id, UuidFormat::Hyphenated),
            "6f1a3c2e-0b5d-4e7f-9a8b-1c2d3e4f5a6b"
        );
        assert_eq!(endpoints::DELIVERY_SPEED.uuid_format, UuidFormat::Simple);
    }
}
