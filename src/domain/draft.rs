use std::fmt;

use serde::{Deserialize, Serialize};

use super::catalog::ProjectCategory;
use super::project::ProjectStatus;

/// Names every attribute of a [`ProjectDraft`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    Title,
    Description,
    Category,
    Status,
    Technologies,
    OpenPositions,
    TimeCommitment,
    Timeline,
    LearningObjectives,
    IsPublic,
}

impl FieldKey {
    pub const ALL: [FieldKey; 10] = [
        FieldKey::Title,
        FieldKey::Description,
        FieldKey::Category,
        FieldKey::Status,
        FieldKey::Technologies,
        FieldKey::OpenPositions,
        FieldKey::TimeCommitment,
        FieldKey::Timeline,
        FieldKey::LearningObjectives,
        FieldKey::IsPublic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::Title => "title",
            FieldKey::Description => "description",
            FieldKey::Category => "category",
            FieldKey::Status => "status",
            FieldKey::Technologies => "technologies",
            FieldKey::OpenPositions => "openPositions",
            FieldKey::TimeCommitment => "timeCommitment",
            FieldKey::Timeline => "timeline",
            FieldKey::LearningObjectives => "learningObjectives",
            FieldKey::IsPublic => "isPublic",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client-side project record under construction.
///
/// Every attribute is optional so that "not set yet" is distinguishable from
/// a chosen value. Collections keep set semantics: [`ProjectDraft::apply`]
/// never inserts duplicates or blank entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<ProjectCategory>,
    pub status: Option<ProjectStatus>,
    pub technologies: Vec<String>,
    pub open_positions: Option<u32>,
    pub time_commitment: Option<u32>,
    pub timeline: Option<u32>,
    pub learning_objectives: Vec<String>,
    pub is_public: Option<bool>,
}

/// A single field mutation. Applying one replaces the prior value of
/// exactly one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Title(String),
    Description(String),
    Category(Option<ProjectCategory>),
    Status(Option<ProjectStatus>),
    AddTechnology(String),
    RemoveTechnology(String),
    /// Adds the technology when absent, removes it when present.
    ToggleTechnology(String),
    OpenPositions(Option<u32>),
    TimeCommitment(Option<u32>),
    Timeline(Option<u32>),
    AddLearningObjective(String),
    /// Replaces the objective at `index`; a blank value removes it.
    ReplaceLearningObjective { index: usize, value: String },
    RemoveLearningObjective(usize),
    IsPublic(Option<bool>),
}

impl FieldUpdate {
    pub fn field(&self) -> FieldKey {
        match self {
            FieldUpdate::Title(_) => FieldKey::Title,
            FieldUpdate::Description(_) => FieldKey::Description,
            FieldUpdate::Category(_) => FieldKey::Category,
            FieldUpdate::Status(_) => FieldKey::Status,
            FieldUpdate::AddTechnology(_)
            | FieldUpdate::RemoveTechnology(_)
            | FieldUpdate::ToggleTechnology(_) => FieldKey::Technologies,
            FieldUpdate::OpenPositions(_) => FieldKey::OpenPositions,
            FieldUpdate::TimeCommitment(_) => FieldKey::TimeCommitment,
            FieldUpdate::Timeline(_) => FieldKey::Timeline,
            FieldUpdate::AddLearningObjective(_)
            | FieldUpdate::ReplaceLearningObjective { .. }
            | FieldUpdate::RemoveLearningObjective(_) => FieldKey::LearningObjectives,
            FieldUpdate::IsPublic(_) => FieldKey::IsPublic,
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

impl ProjectDraft {
    /// Returns a new snapshot with `update` applied; `self` is left untouched.
    pub fn apply(&self, update: FieldUpdate) -> ProjectDraft {
        let mut next = self.clone();
        match update {
            FieldUpdate::Title(value) => next.title = non_blank(value),
            FieldUpdate::Description(value) => next.description = non_blank(value),
            FieldUpdate::Category(value) => next.category = value,
            FieldUpdate::Status(value) => next.status = value,
            FieldUpdate::AddTechnology(value) => {
                next.insert_technology(value.trim());
            }
            FieldUpdate::RemoveTechnology(value) => {
                let value = value.trim();
                next.technologies.retain(|existing| existing != value);
            }
            FieldUpdate::ToggleTechnology(value) => {
                let value = value.trim();
                if next.technologies.iter().any(|existing| existing == value) {
                    next.technologies.retain(|existing| existing != value);
                } else {
                    next.insert_technology(value);
                }
            }
            FieldUpdate::OpenPositions(value) => next.open_positions = value,
            FieldUpdate::TimeCommitment(value) => next.time_commitment = value,
            FieldUpdate::Timeline(value) => next.timeline = value,
            FieldUpdate::AddLearningObjective(value) => {
                let value = value.trim();
                if !value.is_empty() && !next.has_objective(value, None) {
                    next.learning_objectives.push(value.to_string());
                }
            }
            FieldUpdate::ReplaceLearningObjective { index, value } => {
                let value = value.trim();
                if index < next.learning_objectives.len() {
                    if value.is_empty() {
                        next.learning_objectives.remove(index);
                    } else if !next.has_objective(value, Some(index)) {
                        next.learning_objectives[index] = value.to_string();
                    }
                }
            }
            FieldUpdate::RemoveLearningObjective(index) => {
                if index < next.learning_objectives.len() {
                    next.learning_objectives.remove(index);
                }
            }
            FieldUpdate::IsPublic(value) => next.is_public = value,
        }
        next
    }

    fn insert_technology(&mut self, value: &str) {
        if !value.is_empty() && !self.technologies.iter().any(|existing| existing == value) {
            self.technologies.push(value.to_string());
        }
    }

    fn has_objective(&self, value: &str, skip: Option<usize>) -> bool {
        self.learning_objectives
            .iter()
            .enumerate()
            .any(|(idx, existing)| Some(idx) != skip && existing == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_returns_new_snapshot() {
        let empty = ProjectDraft::default();
        let titled = empty.apply(FieldUpdate::Title("Campus Map".into()));
        assert!(empty.title.is_none());
        assert_eq!(titled.title.as_deref(), Some("Campus Map"));
    }

    #[test]
    fn blank_text_clears_the_field() {
        let draft = ProjectDraft::default()
            .apply(FieldUpdate::Title("Tracker".into()))
            .apply(FieldUpdate::Title("   ".into()));
        assert!(draft.title.is_none());
    }

    #[test]
    fn technologies_keep_set_semantics() {
        let draft = ProjectDraft::default()
            .apply(FieldUpdate::AddTechnology("React".into()))
            .apply(FieldUpdate::AddTechnology(" React ".into()))
            .apply(FieldUpdate::AddTechnology("My Custom Lib".into()))
            .apply(FieldUpdate::AddTechnology("".into()));
        assert_eq!(draft.technologies, vec!["React", "My Custom Lib"]);

        let toggled = draft.apply(FieldUpdate::ToggleTechnology("React".into()));
        assert_eq!(toggled.technologies, vec!["My Custom Lib"]);
        let toggled = toggled.apply(FieldUpdate::ToggleTechnology("Rust".into()));
        assert_eq!(toggled.technologies, vec!["My Custom Lib", "Rust"]);
    }

    #[test]
    fn learning_objectives_reject_duplicates_and_blanks() {
        let draft = ProjectDraft::default()
            .apply(FieldUpdate::AddLearningObjective("Learn GraphQL".into()))
            .apply(FieldUpdate::AddLearningObjective("Learn GraphQL".into()))
            .apply(FieldUpdate::AddLearningObjective("  ".into()))
            .apply(FieldUpdate::AddLearningObjective("Ship an MVP".into()));
        assert_eq!(draft.learning_objectives, vec!["Learn GraphQL", "Ship an MVP"]);

        let unchanged = draft.apply(FieldUpdate::ReplaceLearningObjective {
            index: 1,
            value: "Learn GraphQL".into(),
        });
        assert_eq!(unchanged, draft);

        let removed = draft.apply(FieldUpdate::ReplaceLearningObjective {
            index: 0,
            value: String::new(),
        });
        assert_eq!(removed.learning_objectives, vec!["Ship an MVP"]);

        let out_of_range = draft.apply(FieldUpdate::RemoveLearningObjective(7));
        assert_eq!(out_of_range, draft);
    }

    #[test]
    fn update_reports_its_field() {
        assert_eq!(
            FieldUpdate::ToggleTechnology("Go".into()).field(),
            FieldKey::Technologies
        );
        assert_eq!(
            FieldUpdate::RemoveLearningObjective(0).field(),
            FieldKey::LearningObjectives
        );
    }
}
