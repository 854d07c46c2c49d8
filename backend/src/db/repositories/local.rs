//! In-memory local repository implementation.
//!
//! The whole catalog lives in a single `Vec<Planet>` behind one
//! `parking_lot::RwLock`. Reads share the lock; every write holds it for the
//! complete find-modify-commit step, so concurrent requests cannot lose
//! each other's updates.

use async_trait::async_trait;
use log::{debug, info, warn};
use parking_lot::RwLock;
use std::sync::Arc;

use crate::db::repository::*;
use crate::models::{seeded_planets, Moon, Planet, PlanetUpdate};
use crate::patch::{patched_copy, PatchOperation};

/// In-memory local repository.
///
/// Cloning is cheap and clones share the same catalog.
///
/// # Example
/// ```
/// use space_weather::db::repositories::LocalRepository;
/// use space_weather::db::repository::CatalogRepository;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let repo = LocalRepository::seeded();
/// let mars = repo.get_planet_by_name("mars").await.unwrap();
/// assert_eq!(mars.id, 1);
/// # });
/// ```
#[derive(Clone, Default)]
pub struct LocalRepository {
    planets: Arc<RwLock<Vec<Planet>>>,
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding the three seeded planets.
    pub fn seeded() -> Self {
        Self::with_planets(seeded_planets())
    }

    pub fn with_planets(planets: Vec<Planet>) -> Self {
        Self {
            planets: Arc::new(RwLock::new(planets)),
        }
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        self.planets.write().clear();
    }

    /// Number of planets stored, without going through the async trait.
    pub fn len(&self) -> usize {
        self.planets.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.planets.read().is_empty()
    }

    fn position_by_name(planets: &[Planet], name: &str) -> Option<usize> {
        planets.iter().position(|p| p.is_named(name))
    }

    fn position_by_id(planets: &[Planet], id: i32) -> Option<usize> {
        planets.iter().position(|p| p.id == id)
    }

    fn planet_not_found(operation: &str, key: impl ToString) -> RepositoryError {
        let key = key.to_string();
        warn!("Planet '{}' not found ({})", key, operation);
        RepositoryError::not_found_with_context(
            format!("Planet '{}' not found", key),
            ErrorContext::new(operation)
                .with_entity("planet")
                .with_entity_id(key),
        )
    }
}

#[async_trait]
impl CatalogRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }

    async fn planet_count(&self) -> RepositoryResult<usize> {
        Ok(self.len())
    }

    async fn list_planets(&self) -> RepositoryResult<Vec<Planet>> {
        Ok(self.planets.read().clone())
    }

    async fn list_planets_range(
        &self,
        offset: usize,
        limit: usize,
    ) -> RepositoryResult<Vec<Planet>> {
        let planets = self.planets.read();
        Ok(planets.iter().skip(offset).take(limit).cloned().collect())
    }

    async fn get_planet_by_name(&self, name: &str) -> RepositoryResult<Planet> {
        debug!("Looking up planet '{}'", name);
        let planets = self.planets.read();
        planets
            .iter()
            .find(|p| p.is_named(name))
            .cloned()
            .ok_or_else(|| Self::planet_not_found("get_planet_by_name", name))
    }

    async fn get_moon(&self, planet_name: &str, moon_name: &str) -> RepositoryResult<Moon> {
        debug!("Looking up moon '{}' of planet '{}'", moon_name, planet_name);
        let planets = self.planets.read();
        let planet = planets.iter().find(|p| p.is_named(planet_name)).ok_or_else(|| {
            warn!("Planet '{}' not found (get_moon)", planet_name);
            RepositoryError::not_found_with_context(
                PLANET_NOT_FOUND,
                ErrorContext::new("get_moon")
                    .with_entity("planet")
                    .with_entity_id(planet_name),
            )
        })?;
        planet.find_moon(moon_name).cloned().ok_or_else(|| {
            warn!("Moon '{}' not found on planet '{}'", moon_name, planet.name);
            RepositoryError::not_found_with_context(
                MOON_NOT_FOUND,
                ErrorContext::new("get_moon")
                    .with_entity("moon")
                    .with_entity_id(moon_name)
                    .with_details(format!("planet={}", planet.name)),
            )
        })
    }

    async fn add_planet(&self, planet: Planet) -> RepositoryResult<Planet> {
        let mut planets = self.planets.write();
        if Self::position_by_name(&planets, &planet.name).is_some() {
            warn!("Adding planet '{}' although one with that name already exists", planet.name);
        }
        info!("Adding planet '{}' (id {})", planet.name, planet.id);
        planets.push(planet.clone());
        Ok(planet)
    }

    async fn update_planet(&self, id: i32, update: PlanetUpdate) -> RepositoryResult<Planet> {
        let mut planets = self.planets.write();
        let index = Self::position_by_id(&planets, id)
            .ok_or_else(|| Self::planet_not_found("update_planet", id))?;
        let planet = &mut planets[index];
        update.apply_to(planet);
        info!(
            "Updated planet '{}' (id {}): {} moons",
            planet.name,
            planet.id,
            planet.moons.len()
        );
        Ok(planet.clone())
    }

    async fn delete_planet(&self, name: &str) -> RepositoryResult<Planet> {
        let mut planets = self.planets.write();
        let index = Self::position_by_name(&planets, name)
            .ok_or_else(|| Self::planet_not_found("delete_planet", name))?;
        let removed = planets.remove(index);
        info!("Deleted planet '{}' (id {})", removed.name, removed.id);
        Ok(removed)
    }

    async fn patch_planet(&self, id: i32, ops: &[PatchOperation]) -> RepositoryResult<Planet> {
        let mut planets = self.planets.write();
        let index = Self::position_by_id(&planets, id)
            .ok_or_else(|| Self::planet_not_found("patch_planet", id))?;
        let patched = patched_copy(&planets[index], ops).map_err(|e| {
            warn!("Rejected patch for planet id {}: {}", id, e);
            RepositoryError::validation_with_context(
                e.to_string(),
                ErrorContext::new("patch_planet")
                    .with_entity("planet")
                    .with_entity_id(id),
            )
        })?;
        info!("Patched planet id {} with {} operation(s)", id, ops.len());
        planets[index] = patched.clone();
        Ok(patched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Weather;
    use parking_lot::Mutex;
    use serde_json::json;
    use std::sync::Once;

    /// Collects every log line emitted by this test binary.
    struct CapturingLogger {
        lines: Mutex<Vec<String>>,
    }

    impl log::Log for CapturingLogger {
        fn enabled(&self, _: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            self.lines
                .lock()
                .push(format!("{} {}", record.level(), record.args()));
        }

        fn flush(&self) {}
    }

    static LOGGER: CapturingLogger = CapturingLogger {
        lines: parking_lot::const_mutex(Vec::new()),
    };
    static INSTALL_LOGGER: Once = Once::new();

    fn captured_warnings(needle: &str) -> Vec<String> {
        LOGGER
            .lines
            .lock()
            .iter()
            .filter(|line| line.starts_with("WARN") && line.contains(needle))
            .cloned()
            .collect()
    }

    #[tokio::test]
    async fn test_health_check() {
        let repo = LocalRepository::new();
        assert!(repo.health_check().await.unwrap());
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_seeded_catalog() {
        let repo = LocalRepository::seeded();
        assert_eq!(repo.planet_count().await.unwrap(), 3);
        let names: Vec<String> = repo
            .list_planets()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Mars", "Jupiter", "Saturn"]);
    }

    #[tokio::test]
    async fn test_get_planet_by_name_any_case() {
        let repo = LocalRepository::seeded();
        for name in ["mars", "MARS", "Mars", "mArS"] {
            assert_eq!(repo.get_planet_by_name(name).await.unwrap().id, 1);
        }
        let err = repo.get_planet_by_name("Pluto").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.context().entity_id.as_deref(), Some("Pluto"));
    }

    #[tokio::test]
    async fn test_first_match_wins_on_duplicates() {
        let repo = LocalRepository::seeded();
        let twin = Planet::new(42, "MARS", Weather::new("Odd", 0.0), vec![]);
        repo.add_planet(twin).await.unwrap();
        assert_eq!(repo.get_planet_by_name("mars").await.unwrap().id, 1);

        repo.delete_planet("Mars").await.unwrap();
        assert_eq!(repo.get_planet_by_name("mars").await.unwrap().id, 42);
    }

    #[tokio::test]
    async fn test_get_moon_messages() {
        let repo = LocalRepository::seeded();
        let phobos = repo.get_moon("Mars", "phobos").await.unwrap();
        assert_eq!(phobos.id, 1);

        let err = repo.get_moon("Pluto", "Charon").await.unwrap_err();
        assert_eq!(err.message(), PLANET_NOT_FOUND);

        let err = repo.get_moon("Mars", "Titan").await.unwrap_err();
        assert_eq!(err.message(), MOON_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_planets_range() {
        let repo = LocalRepository::seeded();
        assert_eq!(repo.list_planets_range(1, 10).await.unwrap().len(), 2);
        assert_eq!(repo.list_planets_range(0, 1).await.unwrap()[0].name, "Mars");
        assert!(repo.list_planets_range(3, 10).await.unwrap().is_empty());
        assert!(repo.list_planets_range(usize::MAX, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_planet() {
        let repo = LocalRepository::seeded();
        let update = PlanetUpdate {
            weather: Weather::new("Hot", 30.0),
            moons: vec![],
        };
        assert!(repo.update_planet(99, update).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_patch_is_atomic() {
        let repo = LocalRepository::seeded();
        let ops = crate::patch::parse_document(&json!([
            { "op": "replace", "path": "/name", "value": "Ares" },
            { "op": "remove", "path": "/moons/9" }
        ]))
        .unwrap();

        let err = repo.patch_planet(1, &ops).await.unwrap_err();
        assert!(matches!(err, RepositoryError::ValidationError { .. }));
        assert_eq!(repo.get_planet_by_name("Mars").await.unwrap().moons.len(), 2);
        assert!(repo.get_planet_by_name("Ares").await.is_err());
    }

    #[tokio::test]
    async fn test_misses_are_logged_as_warnings() {
        INSTALL_LOGGER.call_once(|| {
            let _ = log::set_logger(&LOGGER);
            log::set_max_level(log::LevelFilter::Debug);
        });
        let repo = LocalRepository::seeded();

        assert!(repo.get_planet_by_name("Vulcan").await.is_err());
        assert!(repo.get_moon("Vulcan", "Nowhere").await.is_err());
        assert!(repo.get_moon("Mars", "Ghostmoon").await.is_err());
        assert!(repo.delete_planet("Vulcan").await.is_err());
        let update = PlanetUpdate {
            weather: Weather::new("Hot", 30.0),
            moons: vec![],
        };
        assert!(repo.update_planet(4242, update).await.is_err());

        let vulcan = captured_warnings("'Vulcan' not found");
        assert!(vulcan.iter().any(|l| l.contains("(get_planet_by_name)")));
        assert!(vulcan.iter().any(|l| l.contains("(get_moon)")));
        assert!(vulcan.iter().any(|l| l.contains("(delete_planet)")));
        assert_eq!(captured_warnings("Moon 'Ghostmoon' not found").len(), 1);
        assert_eq!(captured_warnings("Planet '4242' not found (update_planet)").len(), 1);
    }

    #[tokio::test]
    async fn test_clones_share_catalog() {
        let repo = LocalRepository::seeded();
        let other = repo.clone();
        other.delete_planet("saturn").await.unwrap();
        assert_eq!(repo.len(), 2);
        repo.clear();
        assert!(other.is_empty());
    }
}
