//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod credit_store;
mod generation_backend;
mod notification_sink;
mod project_repository;

#[cfg(test)]
pub use credit_store::MockCreditStore;
pub use credit_store::{CreditStore, CreditStoreError, FixtureCreditStore};
#[cfg(test)]
pub use generation_backend::MockGenerationBackend;
pub use generation_backend::{
    FixtureGenerationBackend, GenerationBackend, GenerationBackendError,
};
#[cfg(test)]
pub use notification_sink::MockNotificationSink;
pub use notification_sink::{NoOpNotificationSink, NotificationSink};
#[cfg(test)]
pub use project_repository::MockProjectRepository;
pub use project_repository::{
    FixtureProjectRepository, ProjectRepository, ProjectRepositoryError,
};
