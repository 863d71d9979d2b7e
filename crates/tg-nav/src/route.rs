use std::fmt;

/// Logical location within the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`, redirects according to the authentication flag.
    Root,
    Login,
    Dashboard,
    Project { project_id: String },
    Agent { project_id: String, agent_id: String },
}

impl Route {
    pub fn project(project_id: impl Into<String>) -> Self {
        Route::Project {
            project_id: project_id.into(),
        }
    }

    pub fn agent(project_id: impl Into<String>, agent_id: impl Into<String>) -> Self {
        Route::Agent {
            project_id: project_id.into(),
            agent_id: agent_id.into(),
        }
    }

    /// Parse a path such as `/project/17/agent/18`. Query strings and
    /// fragments are ignored; anything unrecognised maps to `Root`.
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            ["login"] => Route::Login,
            ["dashboard"] => Route::Dashboard,
            ["project", id] => Route::project(*id),
            ["project", id, "agent", agent_id] => Route::agent(*id, *agent_id),
            _ => Route::Root,
        }
    }

    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Route::Dashboard | Route::Project { .. } | Route::Agent { .. }
        )
    }

    pub fn project_id(&self) -> Option<&str> {
        match self {
            Route::Project { project_id } | Route::Agent { project_id, .. } => Some(project_id),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Root => write!(f, "/"),
            Route::Login => write!(f, "/login"),
            Route::Dashboard => write!(f, "/dashboard"),
            Route::Project { project_id } => write!(f, "/project/{project_id}"),
            Route::Agent {
                project_id,
                agent_id,
            } => write!(f, "/project/{project_id}/agent/{agent_id}"),
        }
    }
}
