pub mod planet;
pub mod seed;

pub use planet::*;
pub use seed::seeded_planets;
