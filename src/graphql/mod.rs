//! HTTP client for the project GraphQL API.
//!
//! Sends `{query, variables}` envelopes with a bearer token and classifies
//! whatever comes back into [`GatewayError`] variants.

pub mod documents;

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::Config;
use crate::domain::Project;
use crate::errors::GatewayError;
use crate::submission::{ProjectGateway, ProjectInput};

const UNAUTHENTICATED_CODE: &str = "UNAUTHENTICATED";
const BODY_SNIPPET_CHARS: usize = 200;

#[derive(Debug, Serialize)]
pub struct GraphqlRequest<'a> {
    pub query: &'a str,
    pub variables: Value,
}

#[derive(Debug, Default, Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphqlErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorEntry {
    message: String,
    #[serde(default)]
    extensions: Option<ErrorExtensions>,
}

#[derive(Debug, Deserialize)]
struct ErrorExtensions {
    #[serde(default)]
    code: Option<String>,
}

impl GraphqlErrorEntry {
    fn is_unauthenticated(&self) -> bool {
        let coded = self
            .extensions
            .as_ref()
            .and_then(|ext| ext.code.as_deref())
            .is_some_and(|code| code.eq_ignore_ascii_case(UNAUTHENTICATED_CODE));
        let message = self.message.to_ascii_lowercase();
        coded || message.contains("unauthorized") || message.contains("not authenticated")
    }
}

fn joined(errors: &[GraphqlErrorEntry]) -> String {
    errors
        .iter()
        .map(|entry| entry.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

fn snippet(body: &str) -> String {
    body.trim().chars().take(BODY_SNIPPET_CHARS).collect()
}

/// Classifies one HTTP response and returns `data.<field>`, `None` when
/// the field is absent or null.
fn extract(status: u16, body: &str, field: &str) -> Result<Option<Value>, GatewayError> {
    let parsed = serde_json::from_str::<GraphqlResponse>(body);

    if status == 401 || status == 403 {
        let message = match &parsed {
            Ok(response) if !response.errors.is_empty() => joined(&response.errors),
            _ if !body.trim().is_empty() => snippet(body),
            _ => format!("HTTP {status}"),
        };
        return Err(GatewayError::Unauthorized(message));
    }

    let response = match parsed {
        Ok(response) => response,
        Err(_) if (400..500).contains(&status) => {
            return Err(GatewayError::Rejected(format!(
                "HTTP {status}: {}",
                snippet(body)
            )));
        }
        Err(err) => {
            return Err(GatewayError::Transport(format!(
                "unreadable response (HTTP {status}): {err}"
            )));
        }
    };

    if status >= 500 {
        let detail = if response.errors.is_empty() {
            format!("HTTP {status}")
        } else {
            format!("HTTP {status}: {}", joined(&response.errors))
        };
        return Err(GatewayError::Transport(detail));
    }

    if !response.errors.is_empty() {
        let message = joined(&response.errors);
        return if response.errors.iter().any(GraphqlErrorEntry::is_unauthenticated) {
            Err(GatewayError::Unauthorized(message))
        } else {
            Err(GatewayError::Rejected(message))
        };
    }

    if (400..500).contains(&status) {
        return Err(GatewayError::Rejected(format!("HTTP {status}")));
    }

    Ok(response
        .data
        .and_then(|data| match data {
            Value::Object(mut fields) => fields.remove(field),
            _ => None,
        })
        .filter(|value| !value.is_null()))
}

fn decode<T: DeserializeOwned>(payload: Value, field: &str) -> Result<T, GatewayError> {
    serde_json::from_value(payload)
        .map_err(|err| GatewayError::Transport(format!("unexpected `{field}` payload: {err}")))
}

/// Classifies one HTTP response and decodes `data.<field>`.
///
/// 401/403 and `UNAUTHENTICATED` errors become `Unauthorized`; other
/// GraphQL errors and 4xx statuses become `Rejected`; 5xx statuses,
/// unreadable bodies and missing data become `Transport`.
pub fn interpret_response<T: DeserializeOwned>(
    status: u16,
    body: &str,
    field: &str,
) -> Result<T, GatewayError> {
    let payload = extract(status, body, field)?
        .ok_or_else(|| GatewayError::Transport(format!("response has no `{field}` data")))?;
    decode(payload, field)
}

/// Same classification as [`interpret_response`], but a null `data.<field>`
/// is a valid answer for lookups and comes back as `None`.
pub fn interpret_optional<T: DeserializeOwned>(
    status: u16,
    body: &str,
    field: &str,
) -> Result<Option<T>, GatewayError> {
    extract(status, body, field)?
        .map(|payload| decode(payload, field))
        .transpose()
}

/// [`ProjectGateway`] backed by a GraphQL endpoint.
pub struct GraphqlGateway {
    client: reqwest::Client,
    endpoint: String,
}

impl GraphqlGateway {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, endpoint))
    }

    pub fn from_config(config: &Config) -> Result<Self, GatewayError> {
        Self::new(config.graphql_endpoint.clone(), config.request_timeout())
    }

    /// Reuses an existing client, keeping its connection pool.
    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Posts one operation and returns the HTTP status with the raw body.
    async fn send(
        &self,
        token: &str,
        query: &str,
        variables: Value,
        field: &str,
    ) -> Result<(u16, String), GatewayError> {
        tracing::debug!(endpoint = %self.endpoint, operation = field, "Sending GraphQL request");
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(&GraphqlRequest { query, variables })
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok((status, body))
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        token: &str,
        query: &str,
        variables: Value,
        field: &str,
    ) -> Result<T, GatewayError> {
        let (status, body) = self.send(token, query, variables, field).await?;
        interpret_response(status, &body, field)
    }
}

#[async_trait]
impl ProjectGateway for GraphqlGateway {
    async fn get_project(&self, token: &str, id: &str) -> Result<Option<Project>, GatewayError> {
        let field = documents::GET_PROJECT_FIELD;
        let (status, body) = self
            .send(token, documents::GET_PROJECT, json!({ "id": id }), field)
            .await?;
        interpret_optional(status, &body, field)
    }

    async fn create_project(
        &self,
        token: &str,
        input: &ProjectInput,
    ) -> Result<Project, GatewayError> {
        self.execute(
            token,
            documents::CREATE_PROJECT,
            json!({ "input": input }),
            documents::CREATE_PROJECT_FIELD,
        )
        .await
    }

    async fn update_project(
        &self,
        token: &str,
        id: &str,
        input: &ProjectInput,
    ) -> Result<Project, GatewayError> {
        self.execute(
            token,
            documents::UPDATE_PROJECT,
            json!({ "id": id, "input": input }),
            documents::UPDATE_PROJECT_FIELD,
        )
        .await
    }

    async fn delete_project(&self, token: &str, id: &str) -> Result<bool, GatewayError> {
        self.execute(
            token,
            documents::DELETE_PROJECT,
            json!({ "id": id }),
            documents::DELETE_PROJECT_FIELD,
        )
        .await
    }
}
