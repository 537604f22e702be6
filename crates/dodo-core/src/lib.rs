//! Statistics access gateway for the Dodo notification bot.
//!
//! Normalizes the remote statistics endpoints behind typed operations,
//! resolves per-account credentials and derives the enabled/disabled unit
//! partition that parameterizes each report. Chat presentation lives outside
//! this crate and talks to it through the types exported here.

pub mod config;
pub mod credentials;
pub mod domain;
pub mod errors;
mod http;
pub mod logging;
pub mod ports;
pub mod report;
pub mod settings;
pub mod statistics;
pub mod units;

pub use errors::{Error, Result};
