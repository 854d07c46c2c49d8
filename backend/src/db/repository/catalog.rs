//! Catalog repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{Moon, Planet, PlanetUpdate};
use crate::patch::PatchOperation;

/// Storage operations over the ordered planet catalog.
///
/// Name lookups are case-insensitive and the first match wins, since
/// neither names nor ids are guaranteed unique. Implementations must make
/// every write a single atomic step with respect to concurrent callers.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to be shared across axum handlers.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Whether the backing store is usable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Number of planets currently stored.
    async fn planet_count(&self) -> RepositoryResult<usize>;

    /// Every planet, in catalog order.
    async fn list_planets(&self) -> RepositoryResult<Vec<Planet>>;

    /// Up to `limit` planets starting at position `offset`.
    ///
    /// Offsets past the end yield an empty list.
    async fn list_planets_range(&self, offset: usize, limit: usize)
        -> RepositoryResult<Vec<Planet>>;

    /// First planet named `name`.
    ///
    /// # Returns
    /// * `Ok(Planet)` - The matching planet
    /// * `Err(RepositoryError::NotFound)` - If no planet has that name
    async fn get_planet_by_name(&self, name: &str) -> RepositoryResult<Planet>;

    /// Moon `moon_name` of planet `planet_name`.
    ///
    /// The two not-found cases are told apart by message:
    /// `"Planet Not Found "` and `"Moon Not Found "`.
    async fn get_moon(&self, planet_name: &str, moon_name: &str) -> RepositoryResult<Moon>;

    /// Append `planet` as given. No id is generated and nothing is checked
    /// for uniqueness.
    async fn add_planet(&self, planet: Planet) -> RepositoryResult<Planet>;

    /// Replace weather and moons of the first planet with id `id`.
    async fn update_planet(&self, id: i32, update: PlanetUpdate) -> RepositoryResult<Planet>;

    /// Remove the first planet named `name` and return it.
    async fn delete_planet(&self, name: &str) -> RepositoryResult<Planet>;

    /// Apply `ops` to the first planet with id `id`, all-or-nothing.
    ///
    /// # Returns
    /// * `Ok(Planet)` - The planet as stored after the patch
    /// * `Err(RepositoryError::NotFound)` - If no planet has that id
    /// * `Err(RepositoryError::ValidationError)` - If any operation fails
    async fn patch_planet(&self, id: i32, ops: &[PatchOperation]) -> RepositoryResult<Planet>;
}
