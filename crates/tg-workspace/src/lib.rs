pub mod agent;
pub mod chat;
pub mod ids;
pub mod project;
pub mod theme;

pub use agent::{Agent, AgentSession, ViewMode};
pub use chat::{ChatLog, ChatMessage, USER_SENDER};
pub use ids::IdGenerator;
pub use project::{extract_repo_name, readme_url, Project, ProjectRepository, ValidationError};
pub use theme::Theme;
