//! Domain models for the GeoYIELD farm analytics platform

mod farm;
mod series;

pub use farm::*;
pub use series::*;
