//! Catalog storage.
//!
//! This module provides the storage abstraction via the Repository pattern,
//! so handlers never touch the planet list directly.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API)                           │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs)                            │
//! │  - Paging rules                                          │
//! │  - Patch outcome mapping                                 │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Trait (repository/) - Abstract Interface    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌──────────────────────────────────────────────┐
//!     │             Local Repository                  │
//!     │       (in-memory, single RwLock)              │
//!     └──────────────────────────────────────────────┘
//! ```

pub mod repositories;
pub mod repository;
pub mod services;

pub use repositories::LocalRepository;
pub use repository::{CatalogRepository, ErrorContext, RepositoryError, RepositoryResult};
pub use services::PatchOutcome;

use std::sync::Arc;

/// Build the repository the server starts with.
pub fn create_repository(seed: bool) -> Arc<dyn CatalogRepository> {
    let repo = if seed {
        LocalRepository::seeded()
    } else {
        LocalRepository::new()
    };
    log::info!("Catalog initialised with {} planet(s)", repo.len());
    Arc::new(repo)
}
