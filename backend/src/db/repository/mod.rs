//! Repository trait definitions for catalog storage.
//!
//! - [`error`]: Error types for repository operations
//! - [`catalog`]: Planet and moon storage operations

pub mod catalog;
pub mod error;

pub use catalog::CatalogRepository;
pub use error::{ErrorContext, RepositoryError, RepositoryResult};

/// Message used when a planet lookup misses during a moon lookup.
pub const PLANET_NOT_FOUND: &str = "Planet Not Found ";
/// Message used when a planet exists but has no moon with the given name.
pub const MOON_NOT_FOUND: &str = "Moon Not Found ";
