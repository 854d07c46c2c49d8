//! # Space Weather Catalog
//!
//! A small REST service over an in-memory catalog of planets, their moons
//! and the weather reported for each.
//!
//! ## Architecture
//!
//! - [`models`]: `Planet`, `Moon`, `Weather` and the seeded catalog
//! - [`db`]: repository trait, in-memory repository and service layer
//! - [`patch`]: JSON-patch style partial updates, applied all-or-nothing
//! - [`validation`]: explicit request body validation
//! - [`config`]: TOML and environment configuration
//! - [`http`]: axum router, handlers and error mapping

pub mod config;
pub mod db;
pub mod models;
pub mod patch;
pub mod validation;

#[cfg(feature = "http-server")]
pub mod http;
