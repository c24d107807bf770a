//! Garden server.
//!
//! A small web service that answers: "does my garden need watering today?"
//! It resolves the caller's approximate location from their IP address,
//! fetches current weather there, and applies a few fixed watering rules.
//! Both lookups are cached in memory and on disk for a configurable TTL.

pub mod config;
pub mod error;
pub mod freshness;
mod http;
pub mod location;
pub mod weather;
pub mod web;
