//! Core library for the `vane` weather page.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather provider abstraction and its OpenWeatherMap client
//! - One-shot IP-based position lookup
//! - Shared domain models (queries, reports)
//!
//! It is used by `vane-tui`, but can also be reused by other binaries or services.

pub mod config;
pub mod location;
pub mod model;
pub mod provider;

pub use config::Config;
pub use location::{Coordinates, IpLocator, LocateError};
pub use model::{WeatherQuery, WeatherReport};
pub use provider::{ProviderError, WeatherProvider};
