#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;
use projectivity_core::{
    domain::{FieldUpdate, Project, ProjectCategory, ProjectStatus, UserRef},
    errors::GatewayError,
    routing::RecordingNavigator,
    session::{Session, SessionUser},
    submission::{ProjectGateway, ProjectInput, SubmissionAdapter},
    wizard::{FieldRegistry, Transition, WizardController},
};

/// What the recording gateway answers with.
#[derive(Debug, Clone)]
pub enum Reply {
    Echo,
    Fail(GatewayError),
}

/// Parks create/update calls until the test lets them finish.
struct Hold {
    entered: Notify,
    release: Notify,
}

/// Counts calls and echoes inputs back as persisted projects. Echoed
/// projects can be looked up again by id.
pub struct RecordingGateway {
    reply: Reply,
    hold: Option<Hold>,
    calls: AtomicUsize,
    lookups: AtomicUsize,
    inputs: Mutex<Vec<ProjectInput>>,
    deleted: Mutex<Vec<String>>,
    stored: Mutex<HashMap<String, Project>>,
}

impl RecordingGateway {
    pub fn echoing() -> Arc<Self> {
        Self::replying(Reply::Echo, None)
    }

    pub fn failing(err: GatewayError) -> Arc<Self> {
        Self::replying(Reply::Fail(err), None)
    }

    /// Echoes, but each create/update waits for [`release`](Self::release).
    pub fn holding() -> Arc<Self> {
        Self::replying(
            Reply::Echo,
            Some(Hold {
                entered: Notify::new(),
                release: Notify::new(),
            }),
        )
    }

    fn replying(reply: Reply, hold: Option<Hold>) -> Arc<Self> {
        Arc::new(Self {
            reply,
            hold,
            calls: AtomicUsize::new(0),
            lookups: AtomicUsize::new(0),
            inputs: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
            stored: Mutex::new(HashMap::new()),
        })
    }

    /// Makes `project` available to lookups.
    pub fn seed(&self, project: Project) {
        self.stored
            .lock()
            .expect("stored lock")
            .insert(project.id.clone(), project);
    }

    /// Resolves once a held call has reached the gateway.
    pub async fn entered(&self) {
        if let Some(hold) = &self.hold {
            hold.entered.notified().await;
        }
    }

    pub fn release(&self) {
        if let Some(hold) = &self.hold {
            hold.release.notify_one();
        }
    }

    /// Create, update and delete calls. Lookups are counted separately.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn inputs(&self) -> Vec<ProjectInput> {
        self.inputs.lock().expect("inputs lock").clone()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().expect("deleted lock").clone()
    }

    async fn answer(&self, id: &str, input: &ProjectInput) -> Result<Project, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inputs.lock().expect("inputs lock").push(input.clone());
        match &self.hold {
            Some(hold) => {
                hold.entered.notify_one();
                hold.release.notified().await;
            }
            // Give a concurrent caller the chance to run while this call is pending.
            None => tokio::task::yield_now().await,
        }
        match &self.reply {
            Reply::Echo => {
                let project = persisted(id, input);
                self.seed(project.clone());
                Ok(project)
            }
            Reply::Fail(err) => Err(err.clone()),
        }
    }
}

#[async_trait]
impl ProjectGateway for RecordingGateway {
    async fn get_project(&self, _token: &str, id: &str) -> Result<Option<Project>, GatewayError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Reply::Echo => Ok(self.stored.lock().expect("stored lock").get(id).cloned()),
            Reply::Fail(err) => Err(err.clone()),
        }
    }

    async fn create_project(
        &self,
        _token: &str,
        input: &ProjectInput,
    ) -> Result<Project, GatewayError> {
        self.answer("proj-1", input).await
    }

    async fn update_project(
        &self,
        _token: &str,
        id: &str,
        input: &ProjectInput,
    ) -> Result<Project, GatewayError> {
        self.answer(id, input).await
    }

    async fn delete_project(&self, _token: &str, id: &str) -> Result<bool, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.deleted.lock().expect("deleted lock").push(id.to_string());
        match &self.reply {
            Reply::Echo => Ok(true),
            Reply::Fail(err) => Err(err.clone()),
        }
    }
}

pub fn persisted(id: &str, input: &ProjectInput) -> Project {
    Project {
        id: id.to_string(),
        title: input.title.clone(),
        description: input.description.clone(),
        category: input.category.clone(),
        status: input.status,
        technologies: input.technologies.clone(),
        open_positions: input.open_positions,
        time_commitment: input.time_commitment.clone(),
        timeline: input.timeline.clone(),
        learning_objectives: input.learning_objectives.clone(),
        is_public: None,
        popularity: 0,
        owner: Some(owner()),
        team_members: vec![],
        created_at: None,
        updated_at: None,
    }
}

pub fn owner() -> UserRef {
    UserRef {
        id: "user-1".into(),
        username: "ada".into(),
    }
}

pub fn signed_in() -> Session {
    Session::authenticated(
        SessionUser {
            id: "user-1".into(),
            username: "ada".into(),
            email: Some("ada@example.test".into()),
        },
        "token-abc",
    )
}

pub fn someone_else() -> Session {
    Session::authenticated(
        SessionUser {
            id: "user-2".into(),
            username: "grace".into(),
            email: None,
        },
        "token-xyz",
    )
}

pub fn wizard_with(
    gateway: Arc<RecordingGateway>,
) -> (Arc<WizardController>, Arc<RecordingNavigator>) {
    let navigator = Arc::new(RecordingNavigator::new());
    let wizard = WizardController::new(
        FieldRegistry::standard(),
        SubmissionAdapter::new(gateway),
        navigator.clone(),
    )
    .expect("standard layout is valid");
    (Arc::new(wizard), navigator)
}

/// Updates that make every field valid.
pub fn complete_updates() -> Vec<FieldUpdate> {
    vec![
        FieldUpdate::Title("Study Planner".into()),
        FieldUpdate::Description("Plan and share study sessions".into()),
        FieldUpdate::Category(Some(ProjectCategory::WebDevelopment)),
        FieldUpdate::AddTechnology("React".into()),
        FieldUpdate::AddTechnology("Node.js".into()),
        FieldUpdate::Status(Some(ProjectStatus::Planning)),
        FieldUpdate::OpenPositions(Some(3)),
        FieldUpdate::TimeCommitment(Some(10)),
        FieldUpdate::Timeline(Some(30)),
        FieldUpdate::AddLearningObjective("Learn React".into()),
        FieldUpdate::IsPublic(Some(true)),
    ]
}

/// Fills every field and walks forward to the last step.
pub fn fill_and_advance(wizard: &WizardController) {
    for update in complete_updates() {
        wizard.update(update).expect("update while idle");
    }
    while let Transition::Moved { .. } = wizard.next().expect("next while idle") {}
    assert_eq!(wizard.current_step(), Some(wizard.steps().len() - 1));
}
