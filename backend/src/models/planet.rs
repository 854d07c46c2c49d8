//! Catalog records: planets, their moons and the weather reported for each.
//!
//! Names are the lookup key for most catalog operations and are always
//! compared case-insensitively. Ids are carried as given by clients and are
//! never generated or checked for uniqueness.

use serde::{Deserialize, Serialize};

/// Weather conditions reported for a planet or a moon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weather {
    pub condition: String,
    /// Degrees Celsius
    pub temperature: f64,
}

impl Weather {
    pub fn new(condition: impl Into<String>, temperature: f64) -> Self {
        Self {
            condition: condition.into(),
            temperature,
        }
    }
}

/// A moon, owned by exactly one planet.
///
/// Moon ids are scoped to the owning planet, so two planets may both have
/// a moon with id 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Moon {
    pub id: i32,
    pub name: String,
    pub weather: Weather,
}

impl Moon {
    pub fn new(id: i32, name: impl Into<String>, weather: Weather) -> Self {
        Self {
            id,
            name: name.into(),
            weather,
        }
    }
}

/// A planet and the moons it owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Planet {
    pub id: i32,
    pub name: String,
    pub weather: Weather,
    pub moons: Vec<Moon>,
}

impl Planet {
    pub fn new(id: i32, name: impl Into<String>, weather: Weather, moons: Vec<Moon>) -> Self {
        Self {
            id,
            name: name.into(),
            weather,
            moons,
        }
    }

    /// Case-insensitive name match used by every name lookup.
    pub fn is_named(&self, name: &str) -> bool {
        names_match(&self.name, name)
    }

    /// First moon whose name matches `moon_name`, ignoring case.
    pub fn find_moon(&self, moon_name: &str) -> Option<&Moon> {
        self.moons.iter().find(|m| names_match(&m.name, moon_name))
    }
}

/// Fields a PUT request is allowed to change on an existing planet.
///
/// `id` and `name` of the stored planet always survive an update.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetUpdate {
    pub weather: Weather,
    pub moons: Vec<Moon>,
}

impl PlanetUpdate {
    pub fn apply_to(self, planet: &mut Planet) {
        planet.weather = self.weather;
        planet.moons = self.moons;
    }
}

pub(crate) fn names_match(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
