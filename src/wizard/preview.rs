//! Read-only projection of a draft into a human-readable summary.

use crate::domain::{FieldKey, ProjectDraft};

pub const PLACEHOLDER: &str = "Not set yet";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRow {
    pub field: FieldKey,
    pub label: &'static str,
    pub value: String,
    pub is_set: bool,
}

/// Display model for a draft snapshot, one row per field in wizard order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewModel {
    pub rows: Vec<PreviewRow>,
}

impl PreviewModel {
    pub fn row(&self, field: FieldKey) -> Option<&PreviewRow> {
        self.rows.iter().find(|row| row.field == field)
    }

    pub fn to_lines(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| format!("{}: {}", row.label, row.value))
            .collect()
    }
}

fn label_for(field: FieldKey) -> &'static str {
    match field {
        FieldKey::Title => "Title",
        FieldKey::Description => "Vision",
        FieldKey::Category => "Category",
        FieldKey::Status => "Status",
        FieldKey::Technologies => "Technologies",
        FieldKey::OpenPositions => "Open Positions",
        FieldKey::TimeCommitment => "Time Commitment",
        FieldKey::Timeline => "Project Timeline",
        FieldKey::LearningObjectives => "Learning Objectives",
        FieldKey::IsPublic => "Visibility",
    }
}

fn value_for(draft: &ProjectDraft, field: FieldKey) -> Option<String> {
    let text = |value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };
    let list = |items: &[String], separator: &str| {
        if items.is_empty() {
            None
        } else {
            Some(items.join(separator))
        }
    };

    match field {
        FieldKey::Title => text(&draft.title),
        FieldKey::Description => text(&draft.description),
        FieldKey::Category => draft.category.map(|c| c.label().to_string()),
        FieldKey::Status => draft.status.map(|s| s.label().to_string()),
        FieldKey::Technologies => list(&draft.technologies, ", "),
        FieldKey::OpenPositions => draft.open_positions.map(|n| format!("{n} member(s)")),
        FieldKey::TimeCommitment => draft.time_commitment.map(|h| format!("{h} hours/week")),
        FieldKey::Timeline => draft.timeline.map(|d| format!("{d} days")),
        FieldKey::LearningObjectives => list(&draft.learning_objectives, "; "),
        FieldKey::IsPublic => draft
            .is_public
            .map(|public| (if public { "Public" } else { "Private" }).to_string()),
    }
}

/// Renders the latest snapshot. Unset fields show [`PLACEHOLDER`].
pub fn render(draft: &ProjectDraft) -> PreviewModel {
    let rows = FieldKey::ALL
        .iter()
        .map(|field| {
            let value = value_for(draft, *field);
            PreviewRow {
                field: *field,
                label: label_for(*field),
                is_set: value.is_some(),
                value: value.unwrap_or_else(|| PLACEHOLDER.to_string()),
            }
        })
        .collect();
    PreviewModel { rows }
}
