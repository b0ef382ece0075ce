//! Driven port for reading an account's generated projects.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{AccountId, Project};

define_port_error! {
    /// Errors surfaced by the project repository.
    pub enum ProjectRepositoryError {
        /// Storage could not be reached.
        Connection { message: String } => "project repository connection failed: {message}",
        /// Storage answered but the query failed.
        Query { message: String } => "project repository query failed: {message}",
    }
}

/// Read access to persisted projects.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Every project owned by the account, in no particular order.
    async fn list_for_account(
        &self,
        account_id: &AccountId,
    ) -> Result<Vec<Project>, ProjectRepositoryError>;
}

/// Repository double with no projects.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProjectRepository;

#[async_trait]
impl ProjectRepository for FixtureProjectRepository {
    async fn list_for_account(
        &self,
        _account_id: &AccountId,
    ) -> Result<Vec<Project>, ProjectRepositoryError> {
        Ok(Vec::new())
    }
}
