//! Boundary between the wizard and the persistence service.

pub mod input;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::{Project, ProjectDraft};
use crate::errors::{GatewayError, SubmissionError};
use crate::session::Session;

pub use input::{days, draft_from_project, hours_per_week, leading_number, ProjectInput};

/// Remote store for projects. One call per method invocation.
#[async_trait]
pub trait ProjectGateway: Send + Sync {
    /// `None` when no project has that id.
    async fn get_project(&self, token: &str, id: &str) -> Result<Option<Project>, GatewayError>;

    async fn create_project(&self, token: &str, input: &ProjectInput)
        -> Result<Project, GatewayError>;

    async fn update_project(
        &self,
        token: &str,
        id: &str,
        input: &ProjectInput,
    ) -> Result<Project, GatewayError>;

    async fn delete_project(&self, token: &str, id: &str) -> Result<bool, GatewayError>;
}

/// Which mutation a submission performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionTarget {
    Create,
    Update {
        project_id: String,
        /// Known owner; submissions from anyone else are refused locally.
        owner_id: Option<String>,
    },
}

#[derive(Clone)]
pub struct SubmissionAdapter {
    gateway: Arc<dyn ProjectGateway>,
}

impl SubmissionAdapter {
    pub fn new(gateway: Arc<dyn ProjectGateway>) -> Self {
        Self { gateway }
    }

    /// Fetches one project with its owner and team.
    pub async fn load(&self, session: &Session, id: &str) -> Result<Project, SubmissionError> {
        let token = require_token(session)?;
        match self.gateway.get_project(token, id).await {
            Ok(Some(project)) => {
                debug!(project_id = %project.id, "Project loaded");
                Ok(project)
            }
            Ok(None) => {
                warn!(project_id = %id, "Project not found");
                Err(SubmissionError::NotFound(id.to_string()))
            }
            Err(err) => {
                warn!(project_id = %id, error = %err, "Project load failed");
                Err(err.into())
            }
        }
    }

    /// Like [`load`](Self::load), but refuses projects the session does not own.
    pub async fn load_editable(
        &self,
        session: &Session,
        id: &str,
    ) -> Result<Project, SubmissionError> {
        let project = self.load(session, id).await?;
        if project.owner.is_some() {
            require_owner(session, &project)?;
        }
        Ok(project)
    }

    /// Maps `draft` and performs exactly one create or update call.
    ///
    /// Auth, ownership and completeness are checked before the gateway is
    /// touched; failures there never reach the network.
    pub async fn submit(
        &self,
        session: &Session,
        target: &SubmissionTarget,
        draft: &ProjectDraft,
    ) -> Result<Project, SubmissionError> {
        let token = require_token(session)?;
        if let SubmissionTarget::Update {
            owner_id: Some(owner),
            ..
        } = target
        {
            if session.user_id() != Some(owner.as_str()) {
                return Err(SubmissionError::Forbidden);
            }
        }
        let input = ProjectInput::from_draft(draft)?;

        let result = match target {
            SubmissionTarget::Create => self.gateway.create_project(token, &input).await,
            SubmissionTarget::Update { project_id, .. } => {
                self.gateway.update_project(token, project_id, &input).await
            }
        };

        match result {
            Ok(project) => {
                info!(project_id = %project.id, title = %project.title, "Project saved");
                Ok(project)
            }
            Err(err) => {
                warn!(error = %err, "Project submission failed");
                Err(err.into())
            }
        }
    }

    /// Deletes `project`. Only its owner may do so.
    pub async fn delete(&self, session: &Session, project: &Project) -> Result<(), SubmissionError> {
        let token = require_token(session)?;
        if project.owner.is_some() {
            require_owner(session, project)?;
        }

        match self.gateway.delete_project(token, &project.id).await {
            Ok(true) => {
                info!(project_id = %project.id, "Project deleted");
                Ok(())
            }
            Ok(false) => {
                warn!(project_id = %project.id, "Delete was not acknowledged");
                Err(SubmissionError::ValidationRejected(format!(
                    "project {} was not deleted",
                    project.id
                )))
            }
            Err(err) => {
                warn!(project_id = %project.id, error = %err, "Project delete failed");
                Err(err.into())
            }
        }
    }
}

fn require_token(session: &Session) -> Result<&str, SubmissionError> {
    match (session.is_authenticated(), session.bearer_token()) {
        (true, Some(token)) => Ok(token),
        _ => Err(SubmissionError::Unauthenticated(
            "sign in to save projects".to_string(),
        )),
    }
}

fn require_owner(session: &Session, project: &Project) -> Result<(), SubmissionError> {
    match session.user_id() {
        Some(user_id) if project.is_owned_by(user_id) => Ok(()),
        _ => Err(SubmissionError::Forbidden),
    }
}
