//! Credit-gated website generation backend.
//!
//! The domain layer decides when a generation request may run and how its
//! credit is settled; outbound adapters provide in-memory and simulated
//! collaborators until real ones exist.

pub mod config;
pub mod domain;
pub mod outbound;

pub use config::GenerationSettings;
