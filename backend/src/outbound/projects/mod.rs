//! In-memory project store.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{ProjectRepository, ProjectRepositoryError};
use crate::domain::{AccountId, Project};

/// Project repository backed by a vector in process memory.
#[derive(Debug, Default)]
pub struct InMemoryProjectRepository {
    projects: Mutex<Vec<Project>>,
}

impl InMemoryProjectRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a project.
    pub fn insert(&self, project: Project) {
        self.projects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(project);
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn list_for_account(
        &self,
        account_id: &AccountId,
    ) -> Result<Vec<Project>, ProjectRepositoryError> {
        let projects = self
            .projects
            .lock()
            .map_err(|_| ProjectRepositoryError::query("project store poisoned"))?;
        Ok(projects
            .iter()
            .filter(|project| &project.account_id == account_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rstest::rstest;

    use super::*;
    use crate::domain::{GeneratedSite, PromptText};

    fn project_for(account_id: AccountId, name: &str) -> Project {
        Project::draft_from_site(
            account_id,
            &PromptText::new(name).expect("valid prompt"),
            &GeneratedSite {
                name: name.to_owned(),
                url: None,
            },
            Utc::now(),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn lists_only_the_accounts_projects() {
        let mine = AccountId::random();
        let theirs = AccountId::random();
        let repo = InMemoryProjectRepository::new();
        repo.insert(project_for(mine, "Bakery"));
        repo.insert(project_for(theirs, "Gym"));
        repo.insert(project_for(mine, "Portfolio"));

        let projects = repo.list_for_account(&mine).await.expect("list");

        let names: Vec<_> = projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Bakery", "Portfolio"]);
    }
}
