//! Declarative description of every project field: label, default value and
//! validation rule.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{FieldUpdate, ProjectDraft, ProjectStatus};

pub use crate::domain::FieldKey;

pub const TITLE_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 1000;
pub const OPEN_POSITIONS_RANGE: (u32, u32) = (1, 10);
pub const TIME_COMMITMENT_HOURS_RANGE: (u32, u32) = (1, 40);
pub const TIMELINE_DAYS_RANGE: (u32, u32) = (7, 90);

/// Why a field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    Required,
    TooLong,
    TooShort,
    OutOfRange,
    EmptyCollection,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::Required => "required",
            ErrorKind::TooLong => "too long",
            ErrorKind::TooShort => "too short",
            ErrorKind::OutOfRange => "out of range",
            ErrorKind::EmptyCollection => "empty collection",
        };
        f.write_str(label)
    }
}

/// Validation failures keyed by field. Only invalid fields appear.
pub type ErrorMap = BTreeMap<FieldKey, ErrorKind>;

/// Borrowed view of a single draft attribute, as seen by a [`FieldRule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(Option<&'a str>),
    Choice { chosen: bool },
    Items(&'a [String]),
    Number(Option<u32>),
    Flag(Option<bool>),
}

impl<'a> FieldValue<'a> {
    pub fn of(draft: &'a ProjectDraft, key: FieldKey) -> Self {
        match key {
            FieldKey::Title => FieldValue::Text(draft.title.as_deref()),
            FieldKey::Description => FieldValue::Text(draft.description.as_deref()),
            FieldKey::Category => FieldValue::Choice {
                chosen: draft.category.is_some(),
            },
            FieldKey::Status => FieldValue::Choice {
                chosen: draft.status.is_some(),
            },
            FieldKey::Technologies => FieldValue::Items(&draft.technologies),
            FieldKey::OpenPositions => FieldValue::Number(draft.open_positions),
            FieldKey::TimeCommitment => FieldValue::Number(draft.time_commitment),
            FieldKey::Timeline => FieldValue::Number(draft.timeline),
            FieldKey::LearningObjectives => FieldValue::Items(&draft.learning_objectives),
            FieldKey::IsPublic => FieldValue::Flag(draft.is_public),
        }
    }
}

/// Built-in validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Required text measured in characters after trimming.
    Text { min: usize, max: usize },
    /// Required selection from a fixed set.
    Choice,
    /// At least one entry.
    Collection,
    /// Required number within inclusive bounds.
    Range { min: u32, max: u32 },
    /// Required yes/no answer.
    Flag,
}

impl FieldRule {
    pub fn check(&self, value: FieldValue<'_>) -> Option<ErrorKind> {
        match (self, value) {
            (FieldRule::Text { min, max }, FieldValue::Text(text)) => {
                let trimmed = text.map(str::trim).unwrap_or_default();
                let length = trimmed.chars().count();
                if length == 0 {
                    Some(ErrorKind::Required)
                } else if length < *min {
                    Some(ErrorKind::TooShort)
                } else if length > *max {
                    Some(ErrorKind::TooLong)
                } else {
                    None
                }
            }
            (FieldRule::Choice, FieldValue::Choice { chosen }) => {
                (!chosen).then_some(ErrorKind::Required)
            }
            (FieldRule::Collection, FieldValue::Items(items)) => {
                let filled = items.iter().any(|item| !item.trim().is_empty());
                (!filled).then_some(ErrorKind::EmptyCollection)
            }
            (FieldRule::Range { min, max }, FieldValue::Number(number)) => match number {
                None => Some(ErrorKind::Required),
                Some(n) if n < *min || n > *max => Some(ErrorKind::OutOfRange),
                Some(_) => None,
            },
            (FieldRule::Flag, FieldValue::Flag(flag)) => {
                flag.is_none().then_some(ErrorKind::Required)
            }
            // A rule paired with the wrong value shape is a registry defect.
            _ => Some(ErrorKind::Required),
        }
    }
}

/// Declarative description of a single draft field.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub key: FieldKey,
    pub label: &'static str,
    pub rule: FieldRule,
    pub default: Option<FieldUpdate>,
    /// Singular noun used in collection messages ("technology").
    pub item_noun: Option<&'static str>,
}

impl FieldDescriptor {
    pub fn new(key: FieldKey, label: &'static str, rule: FieldRule) -> Self {
        Self {
            key,
            label,
            rule,
            default: None,
            item_noun: None,
        }
    }

    pub fn with_default(mut self, default: FieldUpdate) -> Self {
        debug_assert_eq!(default.field(), self.key);
        self.default = Some(default);
        self
    }

    pub fn with_item_noun(mut self, noun: &'static str) -> Self {
        self.item_noun = Some(noun);
        self
    }

    pub fn validate(&self, draft: &ProjectDraft) -> Option<ErrorKind> {
        self.rule.check(FieldValue::of(draft, self.key))
    }

    /// User-facing explanation for `kind` on this field.
    pub fn message(&self, kind: ErrorKind) -> String {
        match (kind, self.rule) {
            (ErrorKind::TooLong, FieldRule::Text { max, .. }) => {
                format!("{} must be {} characters or less", self.label, max)
            }
            (ErrorKind::TooShort, FieldRule::Text { min, .. }) => {
                format!("{} must be at least {} characters", self.label, min)
            }
            (ErrorKind::OutOfRange, FieldRule::Range { min, max }) => {
                format!("{} must be between {} and {}", self.label, min, max)
            }
            (ErrorKind::EmptyCollection, _) => format!(
                "At least one {} is required",
                self.item_noun.unwrap_or("entry")
            ),
            _ => format!("{} is required", self.label),
        }
    }
}

/// Ordered set of field descriptors covering every [`FieldKey`].
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    fields: Vec<FieldDescriptor>,
}

impl FieldRegistry {
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        Self { fields }
    }

    /// Registry for project creation and editing.
    pub fn standard() -> Self {
        let (positions_min, positions_max) = OPEN_POSITIONS_RANGE;
        let (hours_min, hours_max) = TIME_COMMITMENT_HOURS_RANGE;
        let (days_min, days_max) = TIMELINE_DAYS_RANGE;
        Self::new(vec![
            FieldDescriptor::new(
                FieldKey::Title,
                "Title",
                FieldRule::Text {
                    min: 1,
                    max: TITLE_MAX_CHARS,
                },
            ),
            FieldDescriptor::new(
                FieldKey::Description,
                "Description",
                FieldRule::Text {
                    min: 1,
                    max: DESCRIPTION_MAX_CHARS,
                },
            ),
            FieldDescriptor::new(FieldKey::Category, "Category", FieldRule::Choice),
            FieldDescriptor::new(FieldKey::Status, "Status", FieldRule::Choice)
                .with_default(FieldUpdate::Status(Some(ProjectStatus::Planning))),
            FieldDescriptor::new(FieldKey::Technologies, "Technologies", FieldRule::Collection)
                .with_item_noun("technology"),
            FieldDescriptor::new(
                FieldKey::OpenPositions,
                "Team size",
                FieldRule::Range {
                    min: positions_min,
                    max: positions_max,
                },
            )
            .with_default(FieldUpdate::OpenPositions(Some(1))),
            FieldDescriptor::new(
                FieldKey::TimeCommitment,
                "Time commitment",
                FieldRule::Range {
                    min: hours_min,
                    max: hours_max,
                },
            )
            .with_default(FieldUpdate::TimeCommitment(Some(10))),
            FieldDescriptor::new(
                FieldKey::Timeline,
                "Timeline",
                FieldRule::Range {
                    min: days_min,
                    max: days_max,
                },
            )
            .with_default(FieldUpdate::Timeline(Some(30))),
            FieldDescriptor::new(
                FieldKey::LearningObjectives,
                "Learning objectives",
                FieldRule::Collection,
            )
            .with_item_noun("learning objective"),
            FieldDescriptor::new(FieldKey::IsPublic, "Visibility", FieldRule::Flag)
                .with_default(FieldUpdate::IsPublic(Some(true))),
        ])
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn get(&self, key: FieldKey) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = FieldKey> + '_ {
        self.fields.iter().map(|field| field.key)
    }

    /// Validates the given fields only. Keys absent from the registry are
    /// ignored.
    pub fn validate_fields(&self, draft: &ProjectDraft, keys: &[FieldKey]) -> ErrorMap {
        keys.iter()
            .filter_map(|key| self.get(*key))
            .filter_map(|field| field.validate(draft).map(|kind| (field.key, kind)))
            .collect()
    }

    pub fn validate_all(&self, draft: &ProjectDraft) -> ErrorMap {
        self.fields
            .iter()
            .filter_map(|field| field.validate(draft).map(|kind| (field.key, kind)))
            .collect()
    }

    /// Empty draft seeded with every declared default.
    pub fn default_draft(&self) -> ProjectDraft {
        self.fields
            .iter()
            .filter_map(|field| field.default.clone())
            .fold(ProjectDraft::default(), |draft, update| draft.apply(update))
    }

    /// Renders messages for an error map, in field order.
    pub fn messages(&self, errors: &ErrorMap) -> Vec<(FieldKey, String)> {
        errors
            .iter()
            .filter_map(|(key, kind)| self.get(*key).map(|field| (*key, field.message(*kind))))
            .collect()
    }
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
