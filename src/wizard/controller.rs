use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::fields::{ErrorMap, FieldKey, FieldRegistry};
use super::preview::{self, PreviewModel};
use super::steps::{self, StepDescriptor};
use crate::domain::{suggest_technologies, FieldUpdate, Project, ProjectDraft, TechnologySuggestion};
use crate::errors::{SubmissionError, WizardError};
use crate::routing::{Navigator, Route};
use crate::session::Session;
use crate::submission::{draft_from_project, SubmissionAdapter, SubmissionTarget};

/// Where the wizard currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardPhase {
    Step(usize),
    Submitted(Project),
}

/// Result of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Moved { from: usize, to: usize },
    /// Already at the boundary in the requested direction.
    Unchanged,
    /// The current step has invalid fields; nothing moved.
    Blocked(ErrorMap),
}

/// Result of a submission attempt that reached validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted(Project),
    Invalid(ErrorMap),
    Failed(SubmissionError),
}

/// Point-in-time copy of the controller state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardSnapshot {
    pub draft: ProjectDraft,
    pub phase: WizardPhase,
    pub errors: ErrorMap,
    pub furthest_step: usize,
    pub submission_error: Option<SubmissionError>,
    pub is_submitting: bool,
}

#[derive(Debug)]
struct WizardState {
    draft: ProjectDraft,
    phase: WizardPhase,
    errors: ErrorMap,
    furthest_step: usize,
    submission_error: Option<SubmissionError>,
}

/// Holds the in-flight flag for the lifetime of one `submit` call.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, WizardError> {
        if flag.swap(true, Ordering::AcqRel) {
            Err(WizardError::SubmissionInFlight)
        } else {
            Ok(Self(flag))
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Multi-step project form.
///
/// Owns one draft for its lifetime. All methods take `&self`, so a
/// controller can be shared behind an `Arc` between the UI and the task
/// driving a submission. Navigation and edits are refused while a
/// submission is outstanding.
pub struct WizardController {
    id: Uuid,
    registry: FieldRegistry,
    steps: Vec<StepDescriptor>,
    target: SubmissionTarget,
    adapter: SubmissionAdapter,
    navigator: Arc<dyn Navigator>,
    state: Mutex<WizardState>,
    submitting: AtomicBool,
}

impl WizardController {
    /// Wizard for a new project, seeded with the registry defaults.
    pub fn new(
        registry: FieldRegistry,
        adapter: SubmissionAdapter,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, WizardError> {
        let steps = steps::steps_of(&registry);
        Self::with_steps(registry, steps, adapter, navigator)
    }

    /// Wizard over a custom step layout. The layout must partition the
    /// registry exactly.
    pub fn with_steps(
        registry: FieldRegistry,
        steps: Vec<StepDescriptor>,
        adapter: SubmissionAdapter,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, WizardError> {
        let draft = registry.default_draft();
        Self::build(
            registry,
            steps,
            draft,
            SubmissionTarget::Create,
            0,
            adapter,
            navigator,
        )
    }

    /// Wizard editing an existing project. Every step is reachable from
    /// the start and submission goes through the update mutation.
    pub fn for_edit(
        project: &Project,
        registry: FieldRegistry,
        adapter: SubmissionAdapter,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, WizardError> {
        let steps = steps::steps_of(&registry);
        let furthest = steps.len().saturating_sub(1);
        let target = SubmissionTarget::Update {
            project_id: project.id.clone(),
            owner_id: project.owner.as_ref().map(|owner| owner.id.clone()),
        };
        Self::build(
            registry,
            steps,
            draft_from_project(project),
            target,
            furthest,
            adapter,
            navigator,
        )
    }

    /// Fetches `project_id` and opens it for editing. Fails when the
    /// project is missing or owned by someone other than the session user.
    pub async fn load_for_edit(
        project_id: &str,
        session: &Session,
        registry: FieldRegistry,
        adapter: SubmissionAdapter,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, WizardError> {
        let project = adapter
            .load_editable(session, project_id)
            .await
            .map_err(WizardError::Load)?;
        Self::for_edit(&project, registry, adapter, navigator)
    }

    fn build(
        registry: FieldRegistry,
        steps: Vec<StepDescriptor>,
        draft: ProjectDraft,
        target: SubmissionTarget,
        furthest_step: usize,
        adapter: SubmissionAdapter,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, WizardError> {
        if let Err(err) = steps::check_partition(&registry, &steps) {
            error!(error = %err, "Wizard step layout is invalid");
            debug_assert!(false, "invalid wizard step layout: {err}");
            return Err(err.into());
        }

        let id = Uuid::new_v4();
        debug!(wizard = %id, steps = steps.len(), ?target, "Wizard created");
        Ok(Self {
            id,
            registry,
            steps,
            target,
            adapter,
            navigator,
            state: Mutex::new(WizardState {
                draft,
                phase: WizardPhase::Step(0),
                errors: ErrorMap::new(),
                furthest_step,
                submission_error: None,
            }),
            submitting: AtomicBool::new(false),
        })
    }

    fn state(&self) -> MutexGuard<'_, WizardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// State guard for a mutation. The in-flight flag is only ever set
    /// while this lock is held, so checking it under the guard cannot race
    /// with a submission taking its snapshot.
    fn idle_state(&self) -> Result<MutexGuard<'_, WizardState>, WizardError> {
        let state = self.state();
        if self.submitting.load(Ordering::Acquire) {
            Err(WizardError::SubmissionInFlight)
        } else {
            Ok(state)
        }
    }

    fn last_step(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    fn active_step(state: &WizardState) -> Result<usize, WizardError> {
        match state.phase {
            WizardPhase::Step(index) => Ok(index),
            WizardPhase::Submitted(_) => Err(WizardError::AlreadySubmitted),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    pub fn steps(&self) -> &[StepDescriptor] {
        &self.steps
    }

    pub fn target(&self) -> &SubmissionTarget {
        &self.target
    }

    pub fn snapshot(&self) -> WizardSnapshot {
        let state = self.state();
        WizardSnapshot {
            draft: state.draft.clone(),
            phase: state.phase.clone(),
            errors: state.errors.clone(),
            furthest_step: state.furthest_step,
            submission_error: state.submission_error.clone(),
            is_submitting: self.is_submitting(),
        }
    }

    pub fn draft(&self) -> ProjectDraft {
        self.state().draft.clone()
    }

    /// Active step index, `None` once submitted.
    pub fn current_step(&self) -> Option<usize> {
        match self.state().phase {
            WizardPhase::Step(index) => Some(index),
            WizardPhase::Submitted(_) => None,
        }
    }

    pub fn errors(&self) -> ErrorMap {
        self.state().errors.clone()
    }

    /// Inline messages for the current error map.
    pub fn error_messages(&self) -> Vec<(FieldKey, String)> {
        let errors = self.errors();
        self.registry.messages(&errors)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self.state().phase, WizardPhase::Submitted(_))
    }

    pub fn submitted_project(&self) -> Option<Project> {
        match &self.state().phase {
            WizardPhase::Submitted(project) => Some(project.clone()),
            WizardPhase::Step(_) => None,
        }
    }

    pub fn submission_error(&self) -> Option<SubmissionError> {
        self.state().submission_error.clone()
    }

    pub fn dismiss_submission_error(&self) {
        self.state().submission_error = None;
    }

    /// Completion percentage for the progress indicator.
    pub fn progress(&self) -> u8 {
        match self.state().phase {
            WizardPhase::Step(index) => steps::progress(index, self.steps.len()),
            WizardPhase::Submitted(_) => 100,
        }
    }

    pub fn preview(&self) -> PreviewModel {
        preview::render(&self.state().draft)
    }

    /// Technology suggestions for the chosen category.
    pub fn suggestions(&self, search: &str) -> Vec<TechnologySuggestion> {
        let state = self.state();
        suggest_technologies(state.draft.category, search, &state.draft.technologies)
    }

    /// Applies one field mutation and returns the new snapshot. Any stale
    /// error for that field is cleared.
    pub fn update(&self, update: FieldUpdate) -> Result<ProjectDraft, WizardError> {
        let mut state = self.idle_state()?;
        Self::active_step(&state)?;

        let field = update.field();
        state.draft = state.draft.apply(update);
        state.errors.remove(&field);
        debug!(wizard = %self.id, field = %field, "Field updated");
        Ok(state.draft.clone())
    }

    /// Advances one step if the current step's fields are valid.
    pub fn next(&self) -> Result<Transition, WizardError> {
        let mut state = self.idle_state()?;
        let from = Self::active_step(&state)?;

        let keys = self
            .steps
            .get(from)
            .map(|step| step.field_keys.as_slice())
            .unwrap_or_default();
        let errors = self.registry.validate_fields(&state.draft, keys);
        if !errors.is_empty() {
            debug!(
                wizard = %self.id,
                step = from,
                invalid = errors.len(),
                "Step advance blocked"
            );
            state.errors = errors.clone();
            return Ok(Transition::Blocked(errors));
        }

        state.errors.clear();
        let to = (from + 1).min(self.last_step());
        if to == from {
            return Ok(Transition::Unchanged);
        }
        state.phase = WizardPhase::Step(to);
        state.furthest_step = state.furthest_step.max(to);
        debug!(wizard = %self.id, from, to, "Step advanced");
        Ok(Transition::Moved { from, to })
    }

    /// Goes back one step. Never validates.
    pub fn previous(&self) -> Result<Transition, WizardError> {
        let mut state = self.idle_state()?;
        let from = Self::active_step(&state)?;

        if from == 0 {
            return Ok(Transition::Unchanged);
        }
        let to = from - 1;
        state.phase = WizardPhase::Step(to);
        debug!(wizard = %self.id, from, to, "Step reverted");
        Ok(Transition::Moved { from, to })
    }

    /// Jumps to a step that has already been reached. Never validates.
    pub fn go_to(&self, index: usize) -> Result<Transition, WizardError> {
        let mut state = self.idle_state()?;
        let from = Self::active_step(&state)?;

        if index >= self.steps.len() || index > state.furthest_step {
            return Err(WizardError::StepOutOfReach { requested: index });
        }
        if index == from {
            return Ok(Transition::Unchanged);
        }
        state.phase = WizardPhase::Step(index);
        debug!(wizard = %self.id, from, to = index, "Step selected");
        Ok(Transition::Moved { from, to: index })
    }

    /// Validates every field and, if clean, performs one submission.
    ///
    /// Only one call may be in flight; a concurrent call returns
    /// [`WizardError::SubmissionInFlight`] without touching the gateway.
    /// On failure the draft is kept as-is so the user can resubmit.
    pub async fn submit(&self, session: &Session) -> Result<SubmitOutcome, WizardError> {
        let (_in_flight, draft) = {
            let mut state = self.state();
            let in_flight = InFlight::acquire(&self.submitting)?;
            let current = Self::active_step(&state)?;
            if current != self.last_step() {
                return Err(WizardError::NotOnLastStep { current });
            }

            let errors = self.registry.validate_all(&state.draft);
            if !errors.is_empty() {
                debug!(wizard = %self.id, invalid = errors.len(), "Submission blocked by validation");
                state.errors = errors.clone();
                return Ok(SubmitOutcome::Invalid(errors));
            }
            state.errors.clear();
            state.submission_error = None;
            (in_flight, state.draft.clone())
        };

        info!(wizard = %self.id, target = ?self.target, "Submitting project");
        let result = self.adapter.submit(session, &self.target, &draft).await;

        match result {
            Ok(project) => {
                self.state().phase = WizardPhase::Submitted(project.clone());
                info!(wizard = %self.id, project_id = %project.id, "Project submitted");
                self.navigator
                    .navigate(Route::ProjectDetail(project.id.clone()));
                Ok(SubmitOutcome::Submitted(project))
            }
            Err(err) => {
                warn!(wizard = %self.id, kind = %err.kind(), error = %err, "Submission failed");
                self.state().submission_error = Some(err.clone());
                Ok(SubmitOutcome::Failed(err))
            }
        }
    }
}
