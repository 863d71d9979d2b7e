use tg_config::AppConfig;
use tg_store::SharedStore;
use tg_workspace::{
    readme_url, Agent, AgentSession, ChatLog, IdGenerator, Project, ProjectRepository, Theme,
    ViewMode,
};

use crate::error::NavError;
use crate::route::Route;
use crate::session::{AuthError, AuthMode, SessionContext};
use crate::view::{Missing, View};

/// Agent session bound to the project it was opened for.
struct Workspace {
    project_id: String,
    agents: AgentSession,
}

/// Resolves routes to views and routes every mutation to the component
/// that owns the state.
///
/// The agent workspace lives while the route stays on `Project(id)` or
/// `Agent(id, _)` for the same `id`; entering it from anywhere else starts a
/// new one. The chat log lives exactly as long as the focused agent view.
pub struct NavigationController {
    session: SessionContext,
    projects: ProjectRepository,
    agent_ids: IdGenerator,
    agent_name_prefix: String,
    route: Route,
    workspace: Option<Workspace>,
    chat: Option<ChatLog>,
}

impl NavigationController {
    pub fn new(
        store: SharedStore,
        host_marker: impl Into<String>,
        agent_name_prefix: impl Into<String>,
    ) -> Self {
        Self {
            session: SessionContext::new(store.clone()),
            projects: ProjectRepository::new(store, host_marker),
            agent_ids: IdGenerator::new(),
            agent_name_prefix: agent_name_prefix.into(),
            route: Route::Login,
            workspace: None,
            chat: None,
        }
    }

    pub fn from_config(store: SharedStore, config: &AppConfig) -> Self {
        Self::new(store, config.host_marker.clone(), config.agent_name_prefix.clone())
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn theme(&self) -> Theme {
        self.session.theme()
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.session.toggle_theme()
    }

    // ── Navigation ──────────────────────────────────────────────────────

    pub fn navigate(&mut self, target: Route) -> View {
        let resolved = self.guard(target.clone());
        if resolved != target {
            tracing::debug!(from = %target, to = %resolved, "Redirected");
        }
        self.enter(resolved);
        self.current_view()
    }

    pub fn login(&mut self, mode: AuthMode, email: &str, password: &str) -> Result<View, AuthError> {
        self.session.authenticate(mode, email, password)?;
        Ok(self.navigate(Route::Login))
    }

    /// Clears the authentication flag only; stored data is left alone.
    pub fn logout(&mut self) -> View {
        self.session.sign_out();
        self.navigate(Route::Login)
    }

    pub fn open_project(&mut self, project_id: &str) -> View {
        self.navigate(Route::project(project_id))
    }

    /// Focus one agent of the open workspace.
    pub fn open_agent(&mut self, agent_id: &str) -> Result<View, NavError> {
        self.require_auth()?;
        let project_id = self
            .route
            .project_id()
            .map(str::to_string)
            .ok_or(NavError::NoActiveWorkspace)?;
        if !matches!(&self.workspace, Some(w) if w.project_id == project_id) {
            return Err(NavError::NoActiveWorkspace);
        }
        Ok(self.navigate(Route::agent(project_id, agent_id)))
    }

    /// Focus whichever agent is currently selected in the workspace.
    pub fn focus_selected(&mut self) -> Result<View, NavError> {
        let agent_id = self.workspace_mut()?.selected_id().to_string();
        self.open_agent(&agent_id)
    }

    /// Agent goes back to its project, a project to the dashboard. The
    /// recovery action of a not-found view is the same step.
    pub fn back(&mut self) -> View {
        let target = match &self.route {
            Route::Agent { project_id, .. } => Route::project(project_id.clone()),
            Route::Project { .. } => Route::Dashboard,
            other => other.clone(),
        };
        self.navigate(target)
    }

    pub fn current_view(&mut self) -> View {
        match self.route.clone() {
            Route::Root | Route::Login => View::Login,
            Route::Dashboard => View::Dashboard {
                projects: self.projects.list_projects().to_vec(),
                last_visited: self.projects.last_visited().cloned(),
            },
            Route::Project { project_id } => {
                let Some(project) = self.projects.get_project(&project_id).cloned() else {
                    return View::NotFound {
                        missing: Missing::Project(project_id),
                        recovery: Route::Dashboard,
                    };
                };
                let preview_url = readme_url(&project.repo_url, self.projects.host_marker());
                let agents = self.open_workspace(&project_id);
                View::Workspace {
                    project,
                    preview_url,
                    agents: agents.agents().to_vec(),
                    selected_agent_id: agents.selected_id().to_string(),
                    view_mode: agents.view_mode(),
                }
            }
            Route::Agent {
                project_id,
                agent_id,
            } => {
                let recovery = Route::project(project_id.clone());
                let Some(project) = self.projects.get_project(&project_id).cloned() else {
                    return View::NotFound {
                        missing: Missing::Project(project_id),
                        recovery,
                    };
                };
                let preview_url = readme_url(&project.repo_url, self.projects.host_marker());
                let Some(agent) = self.open_workspace(&project_id).get(&agent_id).cloned() else {
                    return View::NotFound {
                        missing: Missing::Agent {
                            project_id,
                            agent_id,
                        },
                        recovery,
                    };
                };
                let messages = match &self.chat {
                    Some(chat) if chat.agent_id() == agent_id => chat.messages().to_vec(),
                    _ => Vec::new(),
                };
                View::AgentFocus {
                    project,
                    preview_url,
                    agent,
                    messages,
                }
            }
        }
    }

    // ── Projects ────────────────────────────────────────────────────────

    pub fn add_project(&mut self, repo_url: &str) -> Result<Project, NavError> {
        self.require_auth()?;
        Ok(self.projects.add_project(repo_url)?)
    }

    /// Delete a project the user already confirmed. If its workspace is
    /// open the controller falls back to the dashboard.
    pub fn delete_project(&mut self, project_id: &str) -> Result<Option<Project>, NavError> {
        self.require_auth()?;
        let removed = self.projects.delete_project(project_id);
        if removed.is_some() && self.route.project_id() == Some(project_id) {
            self.navigate(Route::Dashboard);
        }
        Ok(removed)
    }

    /// Re-read the durable store and re-resolve the current route against it.
    pub fn reload(&mut self) -> View {
        self.projects.reload();
        let route = self.route.clone();
        self.enter(route);
        self.current_view()
    }

    // ── Agents ──────────────────────────────────────────────────────────

    pub fn add_agent(&mut self) -> Result<Agent, NavError> {
        Ok(self.workspace_mut()?.add_agent())
    }

    pub fn close_agent(&mut self, agent_id: &str) -> Result<bool, NavError> {
        Ok(self.workspace_mut()?.close_agent(agent_id))
    }

    pub fn select_agent(&mut self, agent_id: &str) -> Result<bool, NavError> {
        Ok(self.workspace_mut()?.select_agent(agent_id))
    }

    pub fn toggle_view_mode(&mut self) -> Result<ViewMode, NavError> {
        Ok(self.workspace_mut()?.toggle_view_mode())
    }

    // ── Chat ────────────────────────────────────────────────────────────

    /// Append to the focused agent's chat. Returns `false` for blank input.
    pub fn send_message(&mut self, text: &str) -> Result<bool, NavError> {
        self.require_auth()?;
        let Route::Agent {
            project_id,
            agent_id,
        } = &self.route
        else {
            return Err(NavError::NoFocusedAgent);
        };
        let focused = matches!(
            &self.workspace,
            Some(w) if &w.project_id == project_id && w.agents.get(agent_id).is_some()
        );
        if !focused {
            return Err(NavError::NoFocusedAgent);
        }
        if self.chat.as_ref().map(ChatLog::agent_id) != Some(agent_id.as_str()) {
            self.chat = Some(ChatLog::new(agent_id.clone()));
        }
        Ok(self
            .chat
            .as_mut()
            .map(|chat| chat.send_message(text).is_some())
            .unwrap_or(false))
    }

    // ── Internals ───────────────────────────────────────────────────────

    fn require_auth(&self) -> Result<(), NavError> {
        if self.session.is_authenticated() {
            Ok(())
        } else {
            Err(NavError::Unauthenticated)
        }
    }

    fn guard(&self, target: Route) -> Route {
        let authenticated = self.session.is_authenticated();
        match target {
            Route::Root if authenticated => Route::Dashboard,
            Route::Root => Route::Login,
            Route::Login if authenticated => Route::Dashboard,
            route if route.requires_auth() && !authenticated => Route::Login,
            route => route,
        }
    }

    fn enter(&mut self, route: Route) {
        match &route {
            Route::Root | Route::Login | Route::Dashboard => {
                self.workspace = None;
                self.chat = None;
            }
            Route::Project { project_id } => {
                self.chat = None;
                if self.projects.get_project(project_id).is_some() {
                    self.open_workspace(project_id);
                    self.projects.record_visit(project_id);
                } else {
                    tracing::debug!(project_id = %project_id, "Project not found");
                    self.workspace = None;
                }
            }
            Route::Agent {
                project_id,
                agent_id,
            } => {
                if self.projects.get_project(project_id).is_none() {
                    tracing::debug!(project_id = %project_id, "Project not found");
                    self.workspace = None;
                    self.chat = None;
                } else if self.open_workspace(project_id).select_agent(agent_id) {
                    let remount = self.route != route
                        || self.chat.as_ref().map(ChatLog::agent_id) != Some(agent_id.as_str());
                    if remount {
                        self.chat = Some(ChatLog::new(agent_id.clone()));
                    }
                } else {
                    tracing::debug!(project_id = %project_id, agent_id = %agent_id, "Agent not found");
                    self.chat = None;
                }
            }
        }
        self.route = route;
    }

    fn open_workspace(&mut self, project_id: &str) -> &mut AgentSession {
        if !matches!(&self.workspace, Some(w) if w.project_id == project_id) {
            self.workspace = None;
        }
        let ids = self.agent_ids.clone();
        let prefix = self.agent_name_prefix.clone();
        let workspace = self.workspace.get_or_insert_with(|| {
            tracing::debug!(project_id = %project_id, "Opening project workspace");
            Workspace {
                project_id: project_id.to_string(),
                agents: AgentSession::initialize(ids, prefix),
            }
        });
        &mut workspace.agents
    }

    fn workspace_mut(&mut self) -> Result<&mut AgentSession, NavError> {
        self.require_auth()?;
        let Route::Project { project_id } = &self.route else {
            return Err(NavError::NoActiveWorkspace);
        };
        match &mut self.workspace {
            Some(w) if &w.project_id == project_id => Ok(&mut w.agents),
            _ => Err(NavError::NoActiveWorkspace),
        }
    }
}
