//! Operation documents sent to the project API.

pub const GET_PROJECT: &str = r#"
query GetProject($id: ID!) {
  project(id: $id) {
    id
    title
    description
    category
    status
    technologies
    openPositions
    timeCommitment
    learningObjectives
    timeline
    popularity
    owner {
      id
      username
    }
    teamMembers {
      id
      user {
        id
        username
      }
      role
    }
    createdAt
    updatedAt
  }
}
"#;

pub const CREATE_PROJECT: &str = r#"
mutation CreateProject($input: CreateProjectInput!) {
  createProject(input: $input) {
    id
    title
    description
    category
    status
    technologies
    openPositions
    timeCommitment
    learningObjectives
    timeline
    popularity
    owner {
      id
      username
    }
    teamMembers {
      id
      user {
        id
        username
      }
      role
    }
    createdAt
  }
}
"#;

pub const UPDATE_PROJECT: &str = r#"
mutation UpdateProject($id: ID!, $input: UpdateProjectInput!) {
  updateProject(id: $id, input: $input) {
    id
    title
    description
    category
    status
    technologies
    openPositions
    timeCommitment
    learningObjectives
    timeline
    popularity
    owner {
      id
      username
    }
    teamMembers {
      id
      user {
        id
        username
      }
      role
    }
    updatedAt
  }
}
"#;

pub const DELETE_PROJECT: &str = r#"
mutation DeleteProject($id: ID!) {
  deleteProject(id: $id)
}
"#;

/// Name of the top-level field each operation returns under `data`.
pub const GET_PROJECT_FIELD: &str = "project";
pub const CREATE_PROJECT_FIELD: &str = "createProject";
pub const UPDATE_PROJECT_FIELD: &str = "updateProject";
pub const DELETE_PROJECT_FIELD: &str = "deleteProject";
