use serde::{Deserialize, Serialize};

use crate::ids::IdGenerator;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    Single,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Grid => ViewMode::Single,
            ViewMode::Single => ViewMode::Grid,
        }
    }
}

/// Agents of one open project workspace plus the current selection.
///
/// Never empty: it starts with one agent and refuses to close the last one.
/// The selection is kept as an index so it always resolves.
#[derive(Debug, Clone)]
pub struct AgentSession {
    agents: Vec<Agent>,
    selected: usize,
    view_mode: ViewMode,
    ids: IdGenerator,
    name_prefix: String,
    next_ordinal: usize,
}

impl AgentSession {
    /// Fresh session holding a single default agent.
    pub fn initialize(ids: IdGenerator, name_prefix: impl Into<String>) -> Self {
        let mut session = Self {
            agents: Vec::with_capacity(1),
            selected: 0,
            view_mode: ViewMode::default(),
            ids,
            name_prefix: name_prefix.into(),
            next_ordinal: 1,
        };
        let first = session.make_agent();
        session.agents.push(first);
        session
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn get(&self, id: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    pub fn selected(&self) -> &Agent {
        &self.agents[self.selected]
    }

    pub fn selected_id(&self) -> &str {
        &self.selected().id
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn toggle_view_mode(&mut self) -> ViewMode {
        self.view_mode = self.view_mode.toggled();
        self.view_mode
    }

    /// Append a new agent and select it.
    pub fn add_agent(&mut self) -> Agent {
        let agent = self.make_agent();
        self.agents.push(agent.clone());
        self.selected = self.agents.len() - 1;
        tracing::debug!(agent_id = %agent.id, count = self.agents.len(), "Agent added");
        agent
    }

    /// Close `id`. Returns `false` when it is unknown or is the last agent.
    /// Closing the selected agent moves the selection to its predecessor, or
    /// to the first agent when it had none.
    pub fn close_agent(&mut self, id: &str) -> bool {
        if self.agents.len() <= 1 {
            return false;
        }
        let Some(index) = self.agents.iter().position(|a| a.id == id) else {
            return false;
        };
        self.agents.remove(index);
        if index < self.selected {
            self.selected -= 1;
        } else if index == self.selected {
            self.selected = index.saturating_sub(1);
        }
        tracing::debug!(agent_id = %id, count = self.agents.len(), "Agent closed");
        true
    }

    /// Select `id`; unknown ids leave the selection alone.
    pub fn select_agent(&mut self, id: &str) -> bool {
        match self.agents.iter().position(|a| a.id == id) {
            Some(index) => {
                self.selected = index;
                true
            }
            None => false,
        }
    }

    fn make_agent(&mut self) -> Agent {
        let agent = Agent {
            id: self.ids.next_id(),
            name: format!("{} {}", self.name_prefix, self.next_ordinal),
        };
        self.next_ordinal += 1;
        agent
    }
}
