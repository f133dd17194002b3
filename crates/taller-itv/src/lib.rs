//! ITV (periodic roadworthiness inspection) tracking for a vehicle repair workshop.
//!
//! The crate derives each vehicle's inspection state from its model year and last
//! inspection date, scans the fleet for vehicles that need a reminder, and hands the
//! resulting alerts to whatever notification transport the host application provides.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
