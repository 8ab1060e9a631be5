//! Shared core for the GeoYIELD farm analytics platform
//!
//! This crate holds the farm record schema, the synthetic dataset generator
//! and the aggregation pipeline used by the backend, the frontend (via WASM),
//! and the dataset tooling.

pub mod aggregation;
pub mod catalog;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod generator;
pub mod models;
pub mod report;
pub mod types;
pub mod validation;

pub use aggregation::*;
pub use error::{CoreError, CoreResult};
pub use models::*;
pub use types::*;
pub use validation::*;
