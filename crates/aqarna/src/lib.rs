//! Domain core for the Aqarna owners'-association portal.
//!
//! The portal serves three roles over the same data: owners track fees and
//! raise objections, unions manage members and triage disputes, and the
//! regulatory authority reads aggregated national indicators. This crate
//! holds the rule modules behind those views (the objection lifecycle, the
//! delinquency risk model, indicator aggregation, billing rules) plus the
//! configuration, telemetry, and storage plumbing the service binary
//! composes them with.

pub mod config;
pub mod error;
pub mod export;
pub mod portal;
pub mod session;
pub mod storage;
pub mod telemetry;
