use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle stage of a project as tracked by the persistence service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    Planning,
    InProgress,
    Completed,
    OnHold,
}

impl ProjectStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Planning => "Planning",
            ProjectStatus::InProgress => "In progress",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::OnHold => "On hold",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Minimal user reference returned alongside projects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRef {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamMember {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user: UserRef,
    pub role: String,
}

/// A project as persisted by the backend.
///
/// Identity, ownership, timestamps, popularity and team membership are owned
/// by the persistence service. The client only reads them back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: ProjectStatus,
    #[serde(default)]
    pub technologies: Vec<String>,
    pub open_positions: u32,
    pub time_commitment: String,
    #[serde(default)]
    pub timeline: String,
    #[serde(default)]
    pub learning_objectives: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    #[serde(default)]
    pub popularity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<UserRef>,
    #[serde(default)]
    pub team_members: Vec<TeamMember>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Project {
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner
            .as_ref()
            .map(|owner| owner.id == user_id)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_in_screaming_snake_case() {
        let json = serde_json::to_string(&ProjectStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");
        let parsed: ProjectStatus = serde_json::from_str("\"ON_HOLD\"").unwrap();
        assert_eq!(parsed, ProjectStatus::OnHold);
    }

    #[test]
    fn project_tolerates_sparse_echo() {
        let payload = serde_json::json!({
            "id": "p-1",
            "title": "Campus Map",
            "description": "Interactive map",
            "category": "Web Development",
            "status": "PLANNING",
            "openPositions": 2,
            "timeCommitment": "5 hours per week"
        });
        let project: Project = serde_json::from_value(payload).unwrap();
        assert!(project.technologies.is_empty());
        assert_eq!(project.timeline, "");
        assert_eq!(project.popularity, 0);
        assert!(project.owner.is_none());
        assert_eq!(project.open_positions, 2);
    }

    #[test]
    fn ownership_follows_owner_id() {
        let owner = UserRef {
            id: "u-1".into(),
            username: "ada".into(),
        };
        let project = Project {
            id: "p-1".into(),
            title: "T".into(),
            description: "D".into(),
            category: "IoT".into(),
            status: ProjectStatus::Planning,
            technologies: vec![],
            open_positions: 0,
            time_commitment: "1 hours per week".into(),
            timeline: "7 days".into(),
            learning_objectives: vec![],
            is_public: Some(true),
            popularity: 0,
            owner: Some(owner.clone()),
            team_members: vec![TeamMember {
                id: None,
                user: owner,
                role: "Owner".into(),
            }],
            created_at: None,
            updated_at: None,
        };
        assert!(project.is_owned_by("u-1"));
        assert!(!project.is_owned_by("u-2"));
    }
}
