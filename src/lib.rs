#![warn(missing_docs)]
//! Atalaya is a traffic alerting client that periodically reports the device's
//! position to a traffic backend and surfaces the proximity notifications it
//! returns.

pub mod api;
pub mod config;
pub mod http_client;
pub mod models;
pub mod presenter;
pub mod providers;
pub mod test_helpers;
pub mod tracker;
