//! Multi-step project form: field rules, step layout, controller and preview.

pub mod controller;
pub mod fields;
pub mod preview;
pub mod steps;

pub use controller::{SubmitOutcome, Transition, WizardController, WizardPhase, WizardSnapshot};
pub use fields::{ErrorKind, ErrorMap, FieldDescriptor, FieldKey, FieldRegistry, FieldRule};
pub use preview::{render, PreviewModel, PreviewRow, PLACEHOLDER};
pub use steps::{check_partition, progress, steps_of, PartitionError, StepDescriptor};
