//! Mapping between drafts and the persistence service's input shape.
//!
//! The wizard works in plain numbers; the service stores time commitment and
//! timeline as unit strings. Conversion in both directions happens here.
//! Visibility stays on the client: the service has no field for it.

use serde::{Deserialize, Serialize};

use crate::domain::{FieldKey, FieldUpdate, Project, ProjectCategory, ProjectDraft, ProjectStatus};
use crate::errors::SubmissionError;

/// Input object for the create and update mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: ProjectStatus,
    pub technologies: Vec<String>,
    pub open_positions: u32,
    pub time_commitment: String,
    pub timeline: String,
    pub learning_objectives: Vec<String>,
}

pub fn hours_per_week(hours: u32) -> String {
    format!("{hours} hours per week")
}

pub fn days(count: u32) -> String {
    format!("{count} days")
}

/// Leading integer of a unit string: `"10 hours per week"` gives 10,
/// `"5-10 hours/week"` gives 5.
pub fn leading_number(text: &str) -> Option<u32> {
    let digits: String = text
        .trim_start()
        .chars()
        .take_while(|ch| ch.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Trimmed, non-blank entries in first-seen order without repeats.
fn distinct_entries(items: &[String]) -> Vec<String> {
    let mut entries: Vec<String> = Vec::with_capacity(items.len());
    for item in items.iter().map(|item| item.trim()) {
        if !item.is_empty() && !entries.iter().any(|seen| seen == item) {
            entries.push(item.to_string());
        }
    }
    entries
}

fn required_text(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

impl ProjectInput {
    /// Maps a draft, listing every required field that is still unset.
    ///
    /// Collections are trimmed and de-duplicated here as well, since a
    /// draft restored from storage never went through `apply`.
    pub fn from_draft(draft: &ProjectDraft) -> Result<Self, SubmissionError> {
        let mut missing = Vec::new();

        let title = required_text(&draft.title);
        if title.is_none() {
            missing.push(FieldKey::Title);
        }
        let description = required_text(&draft.description);
        if description.is_none() {
            missing.push(FieldKey::Description);
        }
        if draft.category.is_none() {
            missing.push(FieldKey::Category);
        }
        if draft.status.is_none() {
            missing.push(FieldKey::Status);
        }
        let technologies = distinct_entries(&draft.technologies);
        if technologies.is_empty() {
            missing.push(FieldKey::Technologies);
        }
        if draft.open_positions.is_none() {
            missing.push(FieldKey::OpenPositions);
        }
        if draft.time_commitment.is_none() {
            missing.push(FieldKey::TimeCommitment);
        }
        if draft.timeline.is_none() {
            missing.push(FieldKey::Timeline);
        }
        let learning_objectives = distinct_entries(&draft.learning_objectives);
        if learning_objectives.is_empty() {
            missing.push(FieldKey::LearningObjectives);
        }

        match (
            title,
            description,
            draft.category,
            draft.status,
            draft.open_positions,
            draft.time_commitment,
            draft.timeline,
        ) {
            (
                Some(title),
                Some(description),
                Some(category),
                Some(status),
                Some(open_positions),
                Some(hours),
                Some(timeline),
            ) if missing.is_empty() => Ok(Self {
                title,
                description,
                category: category.label().to_string(),
                status,
                technologies,
                open_positions,
                time_commitment: hours_per_week(hours),
                timeline: days(timeline),
                learning_objectives,
            }),
            _ => Err(SubmissionError::IncompleteDraft(missing)),
        }
    }

    /// True when every mapped field comes back unchanged from the service.
    pub fn echoed_by(&self, project: &Project) -> bool {
        project.title == self.title
            && project.description == self.description
            && project.category == self.category
            && project.status == self.status
            && project.technologies == self.technologies
            && project.open_positions == self.open_positions
            && project.time_commitment == self.time_commitment
            && project.timeline == self.timeline
            && project.learning_objectives == self.learning_objectives
    }
}

/// Rebuilds an editable draft from a persisted project.
///
/// Unknown categories and unit strings without a leading number are left
/// unset so the wizard asks for them again.
pub fn draft_from_project(project: &Project) -> ProjectDraft {
    let seeded = ProjectDraft::default()
        .apply(FieldUpdate::Title(project.title.clone()))
        .apply(FieldUpdate::Description(project.description.clone()))
        .apply(FieldUpdate::Category(ProjectCategory::from_label(
            &project.category,
        )))
        .apply(FieldUpdate::Status(Some(project.status)))
        .apply(FieldUpdate::OpenPositions(Some(project.open_positions)))
        .apply(FieldUpdate::TimeCommitment(leading_number(
            &project.time_commitment,
        )))
        .apply(FieldUpdate::Timeline(leading_number(&project.timeline)))
        .apply(FieldUpdate::IsPublic(Some(project.is_public.unwrap_or(true))));

    let with_technologies = project
        .technologies
        .iter()
        .fold(seeded, |draft, tech| {
            draft.apply(FieldUpdate::AddTechnology(tech.clone()))
        });
    project
        .learning_objectives
        .iter()
        .fold(with_technologies, |draft, objective| {
            draft.apply(FieldUpdate::AddLearningObjective(objective.clone()))
        })
}
