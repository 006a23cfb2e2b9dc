//! Typed client for the PetTracer portal REST API.
//!
//! Authenticates against `portal.pettracer.com`, fetches device status
//! and position history, and maps the JSON responses into typed
//! records. Fully synchronous: every operation is one blocking HTTP
//! round-trip.

mod client;
pub use client::*;

mod error;
pub use error::*;

mod model;
pub use model::*;

pub mod logger;
