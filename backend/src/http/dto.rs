//! Data Transfer Objects for the HTTP API.
//!
//! Planets and moons are serialised directly from [`crate::models`]; only
//! query strings and service metadata need their own types.

use serde::{Deserialize, Serialize};

pub use crate::models::{Moon, Planet, Weather};

/// Query parameters for the paged planet listing.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PageQuery {
    /// 1-based page number (default: 1)
    #[serde(default, alias = "Page")]
    pub page: Option<i32>,
    /// Planets per page (default: 10)
    #[serde(default, alias = "Size")]
    pub size: Option<i32>,
}

impl PageQuery {
    pub fn is_empty(&self) -> bool {
        self.page.is_none() && self.size.is_none()
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the service
    pub version: String,
    /// Planets currently in the catalog
    pub planets: usize,
}
