//! Core library for the `activity` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather source abstraction and its Weatherstack implementation
//! - Temperature bucketing and activity recommendation
//! - Shared domain models (locations, reports, recommendations)
//!
//! It is used by `activity-cli`, but can also be reused by other binaries or services.

pub mod advisor;
pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod provider;

pub use advisor::{ActivityAdvisor, ActivityBucket, SimpleActivityAdvisor};
pub use config::{Config, WeatherstackConfig};
pub use error::Error;
pub use model::{ConditionsReport, Location, Place, Recommendation};
pub use pipeline::recommend_for;
pub use provider::{WeatherSource, source_from_config};
