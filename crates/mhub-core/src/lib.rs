//! Core mhub library (config, logging, platform API).

pub mod api;
pub mod config;
pub mod logging;
