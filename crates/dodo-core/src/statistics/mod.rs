//! Statistics request dispatcher: endpoint table, payload types and the
//! generic invocation routine.

pub mod client;
pub mod endpoints;
pub mod models;

pub use client::StatisticsClient;
