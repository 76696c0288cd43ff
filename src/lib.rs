//! kiosk-core - citizen-service kiosk core
//!
//! Queue ticket lifecycle, multi-criteria rating aggregation, and
//! office/employee dashboards for a citizen-service kiosk. The hosting
//! presentation layer owns all rendering and transport; this crate
//! exposes plain async services over pluggable entity stores.

pub mod bootstrap;
pub mod config;
pub mod models;
pub mod services;
pub mod storage;
