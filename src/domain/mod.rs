pub mod catalog;
pub mod draft;
pub mod project;

pub use catalog::{suggest_technologies, ProjectCategory, TechnologySuggestion};
pub use draft::{FieldKey, FieldUpdate, ProjectDraft};
pub use project::{Project, ProjectStatus, TeamMember, UserRef};
