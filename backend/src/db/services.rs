//! High-level catalog service layer.
//!
//! Repository-agnostic operations used by the HTTP handlers. Paging rules
//! and the patch-on-missing-planet outcome live here so that every storage
//! backend behaves the same way.
//!
//! # Usage
//!
//! ```no_run
//! use space_weather::db::{services, repositories::LocalRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = LocalRepository::seeded();
//!     let page = services::list_planets_paged(&repo, Some(1), Some(2)).await?;
//!     println!("First page has {} planets", page.len());
//!     Ok(())
//! }
//! ```

use log::{debug, info};

use super::repository::{CatalogRepository, RepositoryError, RepositoryResult};
use crate::models::{Moon, Planet, PlanetUpdate};
use crate::patch::PatchOperation;

/// Page used when the client does not ask for one.
pub const DEFAULT_PAGE: i32 = 1;
/// Page size used when the client does not ask for one.
pub const DEFAULT_PAGE_SIZE: i32 = 10;

/// Outcome of a patch request.
#[derive(Debug, Clone, PartialEq)]
pub enum PatchOutcome {
    /// The patch was applied; carries the planet as stored.
    Applied(Planet),
    /// No planet has the requested id. Reported as "no content", not as
    /// "not found".
    Missing,
}

// ==================== Health ====================

/// Check if the repository is usable.
pub async fn health_check<R: CatalogRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

pub async fn planet_count<R: CatalogRepository + ?Sized>(repo: &R) -> RepositoryResult<usize> {
    repo.planet_count().await
}

// ==================== Reads ====================

/// All planets in catalog order.
pub async fn list_planets<R: CatalogRepository + ?Sized>(repo: &R) -> RepositoryResult<Vec<Planet>> {
    repo.list_planets().await
}

/// Offset and length of a page, or `None` when the page is necessarily empty.
///
/// `page` is 1-based. Pages below 1 and sizes below 1 select nothing; offsets
/// that overflow select nothing as well.
pub fn page_bounds(page: i32, size: i32) -> Option<(usize, usize)> {
    if page < 1 || size < 1 {
        return None;
    }
    let offset = (i64::from(page) - 1).checked_mul(i64::from(size))?;
    Some((usize::try_from(offset).ok()?, usize::try_from(size).ok()?))
}

/// One page of planets; `None` parameters fall back to page 1 of size 10.
pub async fn list_planets_paged<R: CatalogRepository + ?Sized>(
    repo: &R,
    page: Option<i32>,
    size: Option<i32>,
) -> RepositoryResult<Vec<Planet>> {
    let page = page.unwrap_or(DEFAULT_PAGE);
    let size = size.unwrap_or(DEFAULT_PAGE_SIZE);
    match page_bounds(page, size) {
        Some((offset, limit)) => {
            debug!("Listing planets page {} (size {}, offset {})", page, size, offset);
            repo.list_planets_range(offset, limit).await
        }
        None => {
            debug!("Empty page requested: page={}, size={}", page, size);
            Ok(Vec::new())
        }
    }
}

pub async fn get_planet_by_name<R: CatalogRepository + ?Sized>(
    repo: &R,
    name: &str,
) -> RepositoryResult<Planet> {
    repo.get_planet_by_name(name).await
}

pub async fn get_moon<R: CatalogRepository + ?Sized>(
    repo: &R,
    planet_name: &str,
    moon_name: &str,
) -> RepositoryResult<Moon> {
    repo.get_moon(planet_name, moon_name).await
}

// ==================== Writes ====================

/// Append a planet exactly as given.
pub async fn add_planet<R: CatalogRepository + ?Sized>(
    repo: &R,
    planet: Planet,
) -> RepositoryResult<Planet> {
    repo.add_planet(planet).await
}

/// Replace weather and moons of planet `id`; its id and name never change.
pub async fn update_planet<R: CatalogRepository + ?Sized>(
    repo: &R,
    id: i32,
    update: PlanetUpdate,
) -> RepositoryResult<Planet> {
    repo.update_planet(id, update).await
}

pub async fn delete_planet<R: CatalogRepository + ?Sized>(
    repo: &R,
    name: &str,
) -> RepositoryResult<Planet> {
    repo.delete_planet(name).await
}

/// Patch planet `id`. A missing planet is a [`PatchOutcome::Missing`], not an
/// error; failed operations are [`RepositoryError::ValidationError`]s.
pub async fn patch_planet<R: CatalogRepository + ?Sized>(
    repo: &R,
    id: i32,
    ops: &[PatchOperation],
) -> RepositoryResult<PatchOutcome> {
    match repo.patch_planet(id, ops).await {
        Ok(planet) => Ok(PatchOutcome::Applied(planet)),
        Err(RepositoryError::NotFound { .. }) => {
            info!("Patch for unknown planet id {} ignored", id);
            Ok(PatchOutcome::Missing)
        }
        Err(e) => Err(e),
    }
}
