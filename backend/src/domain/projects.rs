//! Generated projects listed on an account's dashboard.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AccountId, GeneratedSite, PromptText};

/// Stable project identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(Uuid);

impl ProjectId {
    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Publication state of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Draft,
    Published,
    Generating,
}

impl ProjectStatus {
    /// Badge text shown on project cards.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Published => "Published",
            Self::Generating => "Generating...",
        }
    }
}

/// A generated website owned by an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub account_id: AccountId,
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Project {
    /// Record a freshly generated site as a draft project.
    pub fn draft_from_site(
        account_id: AccountId,
        prompt: &PromptText,
        site: &GeneratedSite,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ProjectId::random(),
            account_id,
            name: site.name.clone(),
            description: prompt.to_string(),
            status: ProjectStatus::Draft,
            created_at,
            url: site.url.clone(),
        }
    }

    /// Link to show on the card. Only published projects expose one.
    pub fn public_url(&self) -> Option<&str> {
        match self.status {
            ProjectStatus::Published => self.url.as_deref(),
            ProjectStatus::Draft | ProjectStatus::Generating => None,
        }
    }

    /// Case-insensitive match on name or description.
    ///
    /// `needle` must already be lowercase.
    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

/// Per-status counts shown above the project list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub total: usize,
    pub published: usize,
    pub generating: usize,
    pub draft: usize,
}

/// An account's projects after search filtering, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListing {
    projects: Vec<Project>,
}

impl ProjectListing {
    /// Filter `projects` by `search` and order newest first.
    ///
    /// A blank search keeps every project.
    pub fn new(mut projects: Vec<Project>, search: Option<&str>) -> Self {
        if let Some(needle) = search.map(str::trim).filter(|s| !s.is_empty()) {
            let needle = needle.to_lowercase();
            projects.retain(|project| project.matches(&needle));
        }
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Self { projects }
    }

    /// Projects in display order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Number of listed projects.
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Whether nothing matched.
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Status counts over the listed projects.
    pub fn stats(&self) -> ProjectStats {
        self.projects
            .iter()
            .fold(ProjectStats::default(), |mut stats, project| {
                stats.total += 1;
                match project.status {
                    ProjectStatus::Published => stats.published += 1,
                    ProjectStatus::Generating => stats.generating += 1,
                    ProjectStatus::Draft => stats.draft += 1,
                }
                stats
            })
    }
}
