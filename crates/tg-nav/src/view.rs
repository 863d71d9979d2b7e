use tg_workspace::{Agent, ChatMessage, Project, ViewMode};

use crate::route::Route;

/// What could not be resolved when a route was entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Missing {
    Project(String),
    Agent { project_id: String, agent_id: String },
}

/// Snapshot of what the current route shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Login,
    Dashboard {
        projects: Vec<Project>,
        last_visited: Option<Project>,
    },
    Workspace {
        project: Project,
        preview_url: String,
        agents: Vec<Agent>,
        selected_agent_id: String,
        view_mode: ViewMode,
    },
    AgentFocus {
        project: Project,
        preview_url: String,
        agent: Agent,
        messages: Vec<ChatMessage>,
    },
    /// Terminal state with a single way out.
    NotFound { missing: Missing, recovery: Route },
}

impl View {
    pub fn is_not_found(&self) -> bool {
        matches!(self, View::NotFound { .. })
    }
}
