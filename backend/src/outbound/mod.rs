//! Outbound adapters implementing domain ports.
//!
//! - **credits**: in-memory credit ledger standing in for billing
//! - **generation**: simulated generation engine with fixed latency
//! - **notifications**: tracing and recording notification sinks
//! - **projects**: in-memory project store backing the dashboard
//!
//! Adapters are thin translators between domain types and whatever sits
//! behind them. They contain no business logic.

pub mod credits;
pub mod generation;
pub mod notifications;
pub mod projects;

pub use credits::InMemoryCreditStore;
pub use generation::SimulatedGenerationBackend;
pub use notifications::{RecordingNotificationSink, TracingNotificationSink};
pub use projects::InMemoryProjectRepository;
