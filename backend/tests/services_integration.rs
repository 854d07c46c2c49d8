//! Service layer tests against the in-memory repository.

use std::sync::Arc;

use space_weather::db::repositories::LocalRepository;
use space_weather::db::repository::{CatalogRepository, RepositoryError};
use space_weather::db::services::{self, PatchOutcome};
use space_weather::models::{Moon, Planet, PlanetUpdate, Weather};
use space_weather::patch::parse_document;
use serde_json::json;

fn earth() -> Planet {
    Planet::new(
        4,
        "Earth",
        Weather::new("Mild", 15.0),
        vec![Moon::new(1, "Luna", Weather::new("Grey", -20.0))],
    )
}

#[tokio::test]
async fn test_paged_listing() {
    let repo = LocalRepository::seeded();

    let page = services::list_planets_paged(&repo, Some(1), Some(2)).await.unwrap();
    assert_eq!(page.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2]);

    let page = services::list_planets_paged(&repo, Some(2), Some(2)).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].name, "Saturn");

    let page = services::list_planets_paged(&repo, None, None).await.unwrap();
    assert_eq!(page.len(), 3);

    let page = services::list_planets_paged(&repo, Some(i32::MAX), Some(i32::MAX))
        .await
        .unwrap();
    assert!(page.is_empty());
}

#[tokio::test]
async fn test_add_then_get_round_trip() {
    let repo = LocalRepository::seeded();
    let created = services::add_planet(&repo, earth()).await.unwrap();
    assert_eq!(created, earth());

    let fetched = services::get_planet_by_name(&repo, "earth").await.unwrap();
    assert_eq!(fetched, earth());

    let luna = services::get_moon(&repo, "EARTH", "luna").await.unwrap();
    assert_eq!(luna.weather.condition, "Grey");
}

#[tokio::test]
async fn test_update_only_touches_weather_and_moons() {
    let repo = LocalRepository::seeded();
    let update = PlanetUpdate {
        weather: Weather::new("Hot", 30.0),
        moons: vec![],
    };

    let updated = services::update_planet(&repo, 1, update).await.unwrap();
    assert_eq!(updated.id, 1);
    assert_eq!(updated.name, "Mars");

    let mars = services::get_planet_by_name(&repo, "Mars").await.unwrap();
    assert_eq!(mars.weather, Weather::new("Hot", 30.0));
    assert!(mars.moons.is_empty());
}

#[tokio::test]
async fn test_delete_shrinks_catalog_by_one() {
    let repo = LocalRepository::seeded();
    let before = services::planet_count(&repo).await.unwrap();

    let removed = services::delete_planet(&repo, "Jupiter").await.unwrap();
    assert_eq!(removed.id, 2);
    assert_eq!(services::planet_count(&repo).await.unwrap(), before - 1);

    let err = services::get_planet_by_name(&repo, "Jupiter").await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));

    let err = services::delete_planet(&repo, "Jupiter").await.unwrap_err();
    assert_eq!(err.context().operation.as_deref(), Some("delete_planet"));
}

#[tokio::test]
async fn test_patch_outcomes() {
    let repo = LocalRepository::seeded();
    let ops = parse_document(&json!([
        { "op": "replace", "path": "/moons/1/weather/temperature", "value": -65.5 }
    ]))
    .unwrap();

    match services::patch_planet(&repo, 1, &ops).await.unwrap() {
        PatchOutcome::Applied(planet) => assert_eq!(planet.moons[1].weather.temperature, -65.5),
        PatchOutcome::Missing => panic!("Mars should exist"),
    }

    let outcome = services::patch_planet(&repo, 999, &ops).await.unwrap();
    assert_eq!(outcome, PatchOutcome::Missing);

    let bad = parse_document(&json!([{ "op": "remove", "path": "/moons/5" }])).unwrap();
    let err = services::patch_planet(&repo, 1, &bad).await.unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));
}

#[tokio::test]
async fn test_works_through_trait_object() {
    let repo: Arc<dyn CatalogRepository> = Arc::new(LocalRepository::seeded());
    assert!(services::health_check(repo.as_ref()).await.unwrap());
    assert_eq!(services::list_planets(repo.as_ref()).await.unwrap().len(), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_writes_are_not_lost() {
    let repo = LocalRepository::new();
    let mut handles = Vec::new();

    for i in 0..50 {
        let repo = repo.clone();
        handles.push(tokio::spawn(async move {
            let planet = Planet::new(i, format!("P{}", i), Weather::new("Calm", 0.0), vec![]);
            repo.add_planet(planet).await.unwrap();
            let ops = parse_document(&json!([
                { "op": "replace", "path": "/weather/temperature", "value": i }
            ]))
            .unwrap();
            repo.patch_planet(i, &ops).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let planets = repo.list_planets().await.unwrap();
    assert_eq!(planets.len(), 50);
    assert!(planets
        .iter()
        .all(|p| p.weather.temperature == f64::from(p.id)));
}
