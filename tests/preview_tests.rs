mod common;

use common::{complete_updates, wizard_with, RecordingGateway};
use insta::assert_snapshot;
use projectivity_core::{
    domain::{FieldUpdate, ProjectDraft},
    wizard::{render, FieldKey, PLACEHOLDER},
};

#[test]
fn empty_draft_preview_is_all_placeholders() {
    let preview = render(&ProjectDraft::default());
    for row in &preview.rows {
        assert_eq!(row.value, PLACEHOLDER, "row {}", row.label);
        assert!(!row.is_set);
    }
}

#[test]
fn controller_preview_tracks_latest_snapshot() {
    let (wizard, _) = wizard_with(RecordingGateway::echoing());
    let before = wizard.preview();
    assert_eq!(before.row(FieldKey::Title).unwrap().value, PLACEHOLDER);
    // Registry defaults are visible from the start.
    assert_eq!(before.row(FieldKey::Timeline).unwrap().value, "30 days");

    wizard.update(FieldUpdate::Title("X".into())).unwrap();
    let after = wizard.preview();
    assert_eq!(after.row(FieldKey::Title).unwrap().value, "X");
    let changed: Vec<_> = before
        .rows
        .iter()
        .zip(&after.rows)
        .filter(|(old, new)| old != new)
        .map(|(_, new)| new.field)
        .collect();
    assert_eq!(changed, vec![FieldKey::Title]);
}

#[test]
fn complete_draft_preview_text() {
    let draft = complete_updates()
        .into_iter()
        .fold(ProjectDraft::default(), |draft, update| draft.apply(update));
    let text = render(&draft).to_lines().join("\n");
    assert_snapshot!(text, @r"
    Title: Study Planner
    Vision: Plan and share study sessions
    Category: Web Development
    Status: Planning
    Technologies: React, Node.js
    Open Positions: 3 member(s)
    Time Commitment: 10 hours/week
    Project Timeline: 30 days
    Learning Objectives: Learn React
    Visibility: Public
    ");
}
