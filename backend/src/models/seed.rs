//! The catalog every fresh server starts with.

use super::planet::{Moon, Planet, Weather};

/// Mars, Jupiter and Saturn, in that order, each with two moons.
pub fn seeded_planets() -> Vec<Planet> {
    vec![
        Planet::new(
            1,
            "Mars",
            Weather::new("Clear", -20.5),
            vec![
                Moon::new(1, "Phobos", Weather::new("Dusty", -40.0)),
                Moon::new(2, "Deimos", Weather::new("Cold", -60.0)),
            ],
        ),
        Planet::new(
            2,
            "Jupiter",
            Weather::new("Stormy", -145.0),
            vec![
                Moon::new(1, "Europa", Weather::new("Icy", -100.0)),
                Moon::new(2, "Io", Weather::new("Volcanic", 150.0)),
            ],
        ),
        Planet::new(
            3,
            "Saturn",
            Weather::new("Stormy", -145.0),
            vec![
                Moon::new(1, "Titan", Weather::new("Icy & Dusty", -179.2)),
                Moon::new(2, "Enceladus", Weather::new("Icy & Foggy", -198.0)),
            ],
        ),
    ]
}
