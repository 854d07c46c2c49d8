//! Request body validation for catalog writes.
//!
//! Bodies are decoded to a generic JSON document first and then walked
//! against the planet shape, collecting every problem instead of stopping
//! at the first one. Keys are matched case-insensitively so both
//! `{"name": ..}` and `{"Name": ..}` are accepted; unknown keys are ignored
//! and `null` counts as missing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::models::{Moon, Planet, PlanetUpdate, Weather};

/// A single problem found in a request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldIssue {
    /// Dotted path of the offending field, e.g. `moons[1].weather.temperature`
    pub field: String,
    pub message: String,
}

/// All problems found while validating one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<FieldIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldIssue {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Whether any issue was reported for exactly `field`.
    pub fn has_issue(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| {
                if e.field.is_empty() {
                    e.message.clone()
                } else {
                    format!("{} {}", e.field, e.message)
                }
            })
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationReport {}

/// Validate a full planet document (POST bodies, patch results).
pub fn planet_from_value(value: &Value) -> Result<Planet, ValidationReport> {
    let mut validator = Validator::default();
    let planet = validator.planet(value);
    validator.finish(planet)
}

/// Validate a PUT body. Only `weather` and `moons` are required; `id` and
/// `name` are never applied to the stored planet, so they are not checked.
pub fn planet_update_from_value(value: &Value) -> Result<PlanetUpdate, ValidationReport> {
    let mut validator = Validator::default();
    let update = validator.object(value, "").and_then(|obj| {
        let weather = validator
            .required(obj, "", "weather")
            .and_then(|v| validator.weather(v, "weather"));
        let moons = validator
            .required(obj, "", "moons")
            .and_then(|v| validator.moons(v, "moons"));
        Some(PlanetUpdate {
            weather: weather?,
            moons: moons?,
        })
    });
    validator.finish(update)
}

/// Case-insensitive key lookup; an exact match wins over a case-folded one.
pub fn get_field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).or_else(|| {
        obj.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    })
}

fn join(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

#[derive(Default)]
struct Validator {
    report: ValidationReport,
}

impl Validator {
    fn finish<T>(self, value: Option<T>) -> Result<T, ValidationReport> {
        match value {
            Some(v) if self.report.is_valid() => Ok(v),
            _ => Err(self.report),
        }
    }

    fn object<'a>(&mut self, value: &'a Value, path: &str) -> Option<&'a Map<String, Value>> {
        match value.as_object() {
            Some(obj) => Some(obj),
            None => {
                self.report.add_error(path, "must be an object");
                None
            }
        }
    }

    fn required<'a>(
        &mut self,
        obj: &'a Map<String, Value>,
        parent: &str,
        key: &str,
    ) -> Option<&'a Value> {
        match get_field(obj, key) {
            Some(Value::Null) | None => {
                self.report.add_error(join(parent, key), "is required");
                None
            }
            Some(v) => Some(v),
        }
    }

    fn integer(&mut self, obj: &Map<String, Value>, parent: &str, key: &str) -> Option<i32> {
        let value = self.required(obj, parent, key)?;
        match value.as_i64().and_then(|n| i32::try_from(n).ok()) {
            Some(n) => Some(n),
            None => {
                self.report
                    .add_error(join(parent, key), "must be a 32-bit integer");
                None
            }
        }
    }

    fn string(&mut self, obj: &Map<String, Value>, parent: &str, key: &str) -> Option<String> {
        let value = self.required(obj, parent, key)?;
        match value.as_str() {
            Some(s) => Some(s.to_string()),
            None => {
                self.report.add_error(join(parent, key), "must be a string");
                None
            }
        }
    }

    fn number(&mut self, obj: &Map<String, Value>, parent: &str, key: &str) -> Option<f64> {
        let value = self.required(obj, parent, key)?;
        match value.as_f64() {
            Some(n) => Some(n),
            None => {
                self.report.add_error(join(parent, key), "must be a number");
                None
            }
        }
    }

    fn weather(&mut self, value: &Value, path: &str) -> Option<Weather> {
        let obj = self.object(value, path)?;
        let condition = self.string(obj, path, "condition");
        let temperature = self.number(obj, path, "temperature");
        Some(Weather {
            condition: condition?,
            temperature: temperature?,
        })
    }

    fn moon(&mut self, value: &Value, path: &str) -> Option<Moon> {
        let obj = self.object(value, path)?;
        let id = self.integer(obj, path, "id");
        let name = self.string(obj, path, "name");
        let weather = self
            .required(obj, path, "weather")
            .and_then(|v| self.weather(v, &join(path, "weather")));
        Some(Moon {
            id: id?,
            name: name?,
            weather: weather?,
        })
    }

    fn moons(&mut self, value: &Value, path: &str) -> Option<Vec<Moon>> {
        let Some(items) = value.as_array() else {
            self.report.add_error(path, "must be an array");
            return None;
        };
        // Visit every element so all broken moons get reported.
        let moons: Vec<Option<Moon>> = items
            .iter()
            .enumerate()
            .map(|(i, item)| self.moon(item, &format!("{}[{}]", path, i)))
            .collect();
        moons.into_iter().collect()
    }

    fn planet(&mut self, value: &Value) -> Option<Planet> {
        let obj = self.object(value, "")?;
        let id = self.integer(obj, "", "id");
        let name = self.string(obj, "", "name");
        let weather = self
            .required(obj, "", "weather")
            .and_then(|v| self.weather(v, "weather"));
        let moons = self
            .required(obj, "", "moons")
            .and_then(|v| self.moons(v, "moons"));
        Some(Planet {
            id: id?,
            name: name?,
            weather: weather?,
            moons: moons?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepts_pascal_case_keys() {
        let body = json!({
            "Id": 4,
            "Name": "Earth",
            "Weather": { "Condition": "Mild", "Temperature": 15.0 },
            "Moons": []
        });
        let planet = planet_from_value(&body).unwrap();
        assert_eq!(planet.id, 4);
        assert_eq!(planet.name, "Earth");
        assert_eq!(planet.weather, Weather::new("Mild", 15.0));
    }

    #[test]
    fn test_exact_key_wins() {
        let body = json!({
            "id": 1, "Name": "Wrong", "name": "Right",
            "weather": { "condition": "x", "temperature": 1 },
            "moons": []
        });
        assert_eq!(planet_from_value(&body).unwrap().name, "Right");
    }

    #[test]
    fn test_reports_every_missing_field() {
        let body = json!({
            "name": "Earth",
            "weather": { "condition": "Mild" },
            "moons": [
                { "id": 1, "name": "Luna", "weather": { "condition": "Grey", "temperature": -20 } },
                { "name": "Ghost" }
            ]
        });
        let report = planet_from_value(&body).unwrap_err();
        assert!(report.has_issue("id"));
        assert!(report.has_issue("weather.temperature"));
        assert!(report.has_issue("moons[1].id"));
        assert!(report.has_issue("moons[1].weather"));
        assert!(!report.has_issue("moons[0].id"));
        assert_eq!(report.errors.len(), 4);
    }

    #[test]
    fn test_null_counts_as_missing() {
        let body = json!({ "id": 1, "name": null, "weather": null, "moons": [] });
        let report = planet_from_value(&body).unwrap_err();
        assert!(report.has_issue("name"));
        assert!(report.has_issue("weather"));
    }

    #[test]
    fn test_type_errors() {
        let body = json!({
            "id": 1.5,
            "name": 7,
            "weather": { "condition": "x", "temperature": "hot" },
            "moons": {}
        });
        let report = planet_from_value(&body).unwrap_err();
        assert_eq!(
            report.errors,
            vec![
                FieldIssue { field: "id".into(), message: "must be a 32-bit integer".into() },
                FieldIssue { field: "name".into(), message: "must be a string".into() },
                FieldIssue { field: "weather.temperature".into(), message: "must be a number".into() },
                FieldIssue { field: "moons".into(), message: "must be an array".into() },
            ]
        );
    }

    #[test]
    fn test_id_out_of_range() {
        let body = json!({
            "id": 4_000_000_000u64, "name": "Big",
            "weather": { "condition": "x", "temperature": 0 }, "moons": []
        });
        assert!(planet_from_value(&body).unwrap_err().has_issue("id"));
    }

    #[test]
    fn test_non_object_body() {
        let report = planet_from_value(&json!([1, 2])).unwrap_err();
        assert_eq!(report.to_string(), "must be an object");
    }

    #[test]
    fn test_update_ignores_identity_fields() {
        let body = json!({
            "id": "not a number",
            "weather": { "Condition": "Hot", "Temperature": 30.0 },
            "moons": []
        });
        let update = planet_update_from_value(&body).unwrap();
        assert_eq!(update.weather, Weather::new("Hot", 30.0));
        assert!(update.moons.is_empty());
    }

    #[test]
    fn test_update_requires_weather_and_moons() {
        let report = planet_update_from_value(&json!({ "id": 1, "name": "Mars" })).unwrap_err();
        assert!(report.has_issue("weather"));
        assert!(report.has_issue("moons"));
        assert_eq!(report.to_string(), "weather is required; moons is required");
    }
}
