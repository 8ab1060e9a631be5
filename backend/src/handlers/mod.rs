//! HTTP handlers for the GeoYIELD API

pub mod dashboard;
pub mod farms;
pub mod health;
pub mod reporting;
pub mod states;
pub mod trends;

pub use dashboard::*;
pub use farms::*;
pub use health::*;
pub use reporting::*;
pub use states::*;
pub use trends::*;
