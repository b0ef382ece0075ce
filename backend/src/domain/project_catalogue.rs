//! Dashboard read model over an account's projects.

use std::sync::Arc;

use tracing::debug;

use crate::domain::ports::{ProjectRepository, ProjectRepositoryError};
use crate::domain::{AccountId, DomainError, ProjectListing};

/// Query service listing and searching projects.
#[derive(Clone)]
pub struct ProjectCatalogue<R> {
    repository: Arc<R>,
}

impl<R> ProjectCatalogue<R> {
    /// Create a catalogue over `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> ProjectCatalogue<R>
where
    R: ProjectRepository,
{
    fn map_repository_error(error: ProjectRepositoryError) -> DomainError {
        match error {
            ProjectRepositoryError::Connection { message } => {
                DomainError::service_unavailable(format!(
                    "project repository unavailable: {message}"
                ))
            }
            ProjectRepositoryError::Query { message } => {
                DomainError::internal(format!("project repository error: {message}"))
            }
        }
    }

    /// Projects owned by the account, newest first, optionally filtered by a
    /// case-insensitive search on name or description.
    pub async fn list(
        &self,
        account_id: &AccountId,
        search: Option<&str>,
    ) -> Result<ProjectListing, DomainError> {
        let projects = self
            .repository
            .list_for_account(account_id)
            .await
            .map_err(Self::map_repository_error)?;
        let listing = ProjectListing::new(projects, search);
        debug!(%account_id, listed = listing.len(), "project listing built");
        Ok(listing)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::MockProjectRepository;
    use crate::domain::{ErrorCode, GeneratedSite, Project, ProjectStatus, PromptText};

    fn project(account_id: AccountId, name: &str, status: ProjectStatus, age_days: i64) -> Project {
        let mut project = Project::draft_from_site(
            account_id,
            &PromptText::new(format!("{name} website")).expect("valid prompt"),
            &GeneratedSite {
                name: name.to_owned(),
                url: Some(format!("https://{}.example.com", name.to_lowercase())),
            },
            Utc::now() - Duration::days(age_days),
        );
        project.status = status;
        project
    }

    #[rstest]
    #[tokio::test]
    async fn list_filters_and_counts() {
        let account_id = AccountId::random();
        let stored = vec![
            project(account_id, "Bakery", ProjectStatus::Published, 3),
            project(account_id, "Gym", ProjectStatus::Draft, 1),
            project(account_id, "Bookshop", ProjectStatus::Generating, 2),
        ];
        let mut repo = MockProjectRepository::new();
        repo.expect_list_for_account()
            .times(1)
            .return_once(move |_| Ok(stored));
        let catalogue = ProjectCatalogue::new(Arc::new(repo));

        let listing = catalogue
            .list(&account_id, Some("K"))
            .await
            .expect("listing");

        let names: Vec<_> = listing.projects().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Bookshop", "Bakery"]);
        let stats = listing.stats();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.published, 1);
        assert_eq!(stats.generating, 1);
        assert_eq!(stats.draft, 0);
        assert_eq!(listing.projects()[1].public_url(), Some("https://bakery.example.com"));
    }

    #[rstest]
    #[case(ProjectRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(ProjectRepositoryError::query("bad column"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn repository_errors_map_to_domain_errors(
        #[case] repo_error: ProjectRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        let mut repo = MockProjectRepository::new();
        repo.expect_list_for_account()
            .times(1)
            .return_once(move |_| Err(repo_error));
        let catalogue = ProjectCatalogue::new(Arc::new(repo));

        let err = catalogue
            .list(&AccountId::random(), None)
            .await
            .expect_err("repository failure");

        assert_eq!(err.code(), expected);
    }
}
