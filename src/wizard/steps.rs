//! Static partition of the field registry into ordered wizard steps.

use std::collections::BTreeSet;

use thiserror::Error;

use super::fields::{FieldKey, FieldRegistry};

/// One page of the wizard and the fields validated before leaving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDescriptor {
    pub id: &'static str,
    pub title: &'static str,
    pub field_keys: Vec<FieldKey>,
}

impl StepDescriptor {
    pub fn new(id: &'static str, title: &'static str, field_keys: Vec<FieldKey>) -> Self {
        Self {
            id,
            title,
            field_keys,
        }
    }
}

/// Defects in a step layout. These are programming errors, never user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PartitionError {
    #[error("no steps defined")]
    Empty,
    #[error("fields not assigned to any step: {0:?}")]
    Unassigned(Vec<FieldKey>),
    #[error("fields assigned to more than one step: {0:?}")]
    Duplicated(Vec<FieldKey>),
    #[error("steps reference fields missing from the registry: {0:?}")]
    Unknown(Vec<FieldKey>),
}

/// Ordered steps for the project wizard.
pub fn steps_of(registry: &FieldRegistry) -> Vec<StepDescriptor> {
    let layout = [
        StepDescriptor::new(
            "concept",
            "Concept",
            vec![FieldKey::Title, FieldKey::Description, FieldKey::Category],
        ),
        StepDescriptor::new(
            "tech-stack",
            "Tech Stack",
            vec![FieldKey::Technologies, FieldKey::Status],
        ),
        StepDescriptor::new(
            "team",
            "Team",
            vec![
                FieldKey::OpenPositions,
                FieldKey::TimeCommitment,
                FieldKey::Timeline,
                FieldKey::LearningObjectives,
            ],
        ),
        StepDescriptor::new("launch", "Launch", vec![FieldKey::IsPublic]),
    ];

    // Steps never mention fields the registry does not declare.
    let known: BTreeSet<FieldKey> = registry.keys().collect();
    layout
        .into_iter()
        .map(|mut step| {
            step.field_keys.retain(|key| known.contains(key));
            step
        })
        .collect()
}

/// Checks that every registry field belongs to exactly one step.
pub fn check_partition(
    registry: &FieldRegistry,
    steps: &[StepDescriptor],
) -> Result<(), PartitionError> {
    if steps.is_empty() {
        return Err(PartitionError::Empty);
    }

    let known: BTreeSet<FieldKey> = registry.keys().collect();
    let mut seen = BTreeSet::new();
    let mut duplicated = BTreeSet::new();
    let mut unknown = BTreeSet::new();

    for key in steps.iter().flat_map(|step| step.field_keys.iter().copied()) {
        if !known.contains(&key) {
            unknown.insert(key);
        } else if !seen.insert(key) {
            duplicated.insert(key);
        }
    }

    if !unknown.is_empty() {
        return Err(PartitionError::Unknown(unknown.into_iter().collect()));
    }
    if !duplicated.is_empty() {
        return Err(PartitionError::Duplicated(duplicated.into_iter().collect()));
    }
    let unassigned: Vec<FieldKey> = known.difference(&seen).copied().collect();
    if !unassigned.is_empty() {
        return Err(PartitionError::Unassigned(unassigned));
    }
    Ok(())
}

/// Percentage of the wizard completed when `index` is the active step.
pub fn progress(index: usize, total: usize) -> u8 {
    if total <= 1 {
        return 100;
    }
    let clamped = index.min(total - 1);
    ((clamped * 100) / (total - 1)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::fields::{FieldDescriptor, FieldRule};

    #[test]
    fn standard_layout_covers_registry() {
        let registry = FieldRegistry::standard();
        let steps = steps_of(&registry);
        assert_eq!(steps.len(), 4);
        assert_eq!(
            steps.iter().map(|s| s.id).collect::<Vec<_>>(),
            vec!["concept", "tech-stack", "team", "launch"]
        );
        assert_eq!(check_partition(&registry, &steps), Ok(()));
    }

    #[test]
    fn missing_field_is_reported() {
        let registry = FieldRegistry::standard();
        let mut steps = steps_of(&registry);
        steps[3].field_keys.clear();
        assert_eq!(
            check_partition(&registry, &steps),
            Err(PartitionError::Unassigned(vec![FieldKey::IsPublic]))
        );
    }

    #[test]
    fn duplicate_and_unknown_fields_are_reported() {
        let registry = FieldRegistry::standard();
        let mut steps = steps_of(&registry);
        steps[0].field_keys.push(FieldKey::IsPublic);
        assert_eq!(
            check_partition(&registry, &steps),
            Err(PartitionError::Duplicated(vec![FieldKey::IsPublic]))
        );

        let small = FieldRegistry::new(vec![FieldDescriptor::new(
            FieldKey::Title,
            "Title",
            FieldRule::Text { min: 1, max: 10 },
        )]);
        let layout = vec![StepDescriptor::new(
            "only",
            "Only",
            vec![FieldKey::Title, FieldKey::Category],
        )];
        assert_eq!(
            check_partition(&small, &layout),
            Err(PartitionError::Unknown(vec![FieldKey::Category]))
        );
    }

    #[test]
    fn layout_drops_fields_missing_from_registry() {
        let small = FieldRegistry::new(vec![FieldDescriptor::new(
            FieldKey::Title,
            "Title",
            FieldRule::Text { min: 1, max: 10 },
        )]);
        let steps = steps_of(&small);
        assert_eq!(steps[0].field_keys, vec![FieldKey::Title]);
        assert!(steps[1].field_keys.is_empty());
        assert_eq!(check_partition(&small, &steps), Ok(()));
    }

    #[test]
    fn progress_spans_first_to_last_step() {
        assert_eq!(progress(0, 4), 0);
        assert_eq!(progress(1, 4), 33);
        assert_eq!(progress(3, 4), 100);
        assert_eq!(progress(9, 4), 100);
        assert_eq!(progress(0, 1), 100);
    }
}
