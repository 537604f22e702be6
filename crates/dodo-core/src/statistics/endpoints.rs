//! Statistics endpoint table.
//!
//! Each endpoint is a descriptor: method, path, parameter shape (type-level)
//! and response type (type-level), plus the per-endpoint quirks the generic
//! invocation routine applies. Adding a statistics kind means adding a row
//! here and a `StatisticsReportType` case.

use std::marker::PhantomData;

use self::shape::*;
use super::models::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub(crate) fn as_reqwest(self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        }
    }
}

/// How unit UUIDs are written into a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UuidFormat {
    /// `8-4-4-4-12` form.
    Hyphenated,
    /// 32 hex digits, no dashes.
    Simple,
}

/// Parameter shape markers.
pub mod shape {
    /// `{cookies, unit_ids}`.
    pub enum CookiesAndUnitIds {}
    /// `unit_ids` only.
    pub enum UnitIds {}
    /// `{cookies, units: [{id, name}]}`.
    pub enum CookiesAndUnits {}
    /// `token` + `unit_uuids`.
    pub enum TokenAndUnitUuids {}
}

/// Descriptor of one remote statistics endpoint.
///
/// `P` is the parameter shape, `R` the payload it deserializes into.
pub struct Endpoint<P, R> {
    pub method: HttpMethod,
    pub path: &'static str,
    pub uuid_format: UuidFormat,
    /// Fixed filter sent as `sales_channels`; empty means no filter.
    pub sales_channels: &'static [SalesChannel],
    _marker: PhantomData<fn(P) -> R>,
}

impl<P, R> Endpoint<P, R> {
    pub const fn new(
        method: HttpMethod,
        path: &'static str,
        uuid_format: UuidFormat,
        sales_channels: &'static [SalesChannel],
    ) -> Self {
        Self {
            method,
            path,
            uuid_format,
            sales_channels,
            _marker: PhantomData,
        }
    }
}

// Manual impls: derives would bound on `P` and `R`.
impl<P, R> Clone for Endpoint<P, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P, R> Copy for Endpoint<P, R> {}

impl<P, R> std::fmt::Debug for Endpoint<P, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Endpoint")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("uuid_format", &self.uuid_format)
            .field("sales_channels", &self.sales_channels)
            .finish()
    }
}

pub const KITCHEN_PERFORMANCE: Endpoint<CookiesAndUnitIds, KitchenPerformanceStatistics> =
    Endpoint::new(
        HttpMethod::Post,
        "/v1/statistics/kitchen/performance",
        UuidFormat::Hyphenated,
        &[],
    );

pub const KITCHEN_PRODUCTION: Endpoint<CookiesAndUnitIds, KitchenProductionStatistics> =
    Endpoint::new(
        HttpMethod::Post,
        "/v1/statistics/production/kitchen",
        UuidFormat::Hyphenated,
        &[],
    );

pub const DELIVERY_PERFORMANCE: Endpoint<CookiesAndUnitIds, DeliveryPerformanceStatistics> =
    Endpoint::new(
        HttpMethod::Post,
        "/v1/statistics/delivery/performance",
        UuidFormat::Hyphenated,
        &[],
    );

pub const HEATED_SHELF: Endpoint<CookiesAndUnitIds, HeatedShelfStatistics> = Endpoint::new(
    HttpMethod::Post,
    "/v1/statistics/delivery/heated-shelf",
    UuidFormat::Hyphenated,
    &[],
);

pub const COURIERS: Endpoint<CookiesAndUnitIds, CouriersStatistics> = Endpoint::new(
    HttpMethod::Post,
    "/v1/statistics/delivery/couriers",
    UuidFormat::Hyphenated,
    &[],
);

pub const REVENUE: Endpoint<UnitIds, RevenueStatistics> = Endpoint::new(
    HttpMethod::Get,
    "/v1/statistics/revenue",
    UuidFormat::Hyphenated,
    &[],
);

pub const BEING_LATE_CERTIFICATES: Endpoint<
    CookiesAndUnits,
    Vec<UnitBeingLateCertificatesTodayAndWeekBefore>,
> = Endpoint::new(
    HttpMethod::Post,
    "/v1/statistics/being-late-certificates",
    UuidFormat::Hyphenated,
    &[],
);

pub const BONUS_SYSTEM: Endpoint<CookiesAndUnits, Vec<UnitBonusSystem>> = Endpoint::new(
    HttpMethod::Post,
    "/v1/statistics/bonus-system",
    UuidFormat::Hyphenated,
    &[],
);

pub const DELIVERY_SPEED: Endpoint<TokenAndUnitUuids, Vec<UnitDeliverySpeed>> = Endpoint::new(
    HttpMethod::Get,
    "/v2/statistics/delivery/speed",
    UuidFormat::Simple,
    &[],
);

pub const ORDERS_HANDOVER_TIME: Endpoint<TokenAndUnitUuids, Vec<UnitOrdersHandoverTime>> =
    Endpoint::new(
        HttpMethod::Get,
        "/v2/statistics/production/handover-time",
        UuidFormat::Simple,
        &[SalesChannel::DineIn],
    );
