use std::fmt::Write;

use tg_nav::{Missing, View};
use tg_workspace::{Agent, ChatMessage, Project, Theme, ViewMode};

/// Plain-text rendering of a view.
pub fn render_view(view: &View, theme: Theme) -> String {
    let mut out = String::new();
    let result = match view {
        View::Login => render_login(&mut out),
        View::Dashboard {
            projects,
            last_visited,
        } => render_dashboard(&mut out, theme, projects, last_visited.as_ref()),
        View::Workspace {
            project,
            preview_url,
            agents,
            selected_agent_id,
            view_mode,
        } => render_workspace(
            &mut out,
            theme,
            project,
            preview_url,
            agents,
            selected_agent_id,
            *view_mode,
        ),
        View::AgentFocus {
            project,
            preview_url,
            agent,
            messages,
        } => render_agent(&mut out, theme, project, preview_url, agent, messages),
        View::NotFound { missing, recovery } => {
            render_not_found(&mut out, missing, &recovery.to_string())
        }
    };
    // Writing into a String cannot fail.
    debug_assert!(result.is_ok());
    out.trim_end().to_string()
}

fn render_login(out: &mut String) -> std::fmt::Result {
    writeln!(out, "Welcome back. Sign in to your account.")?;
    writeln!(out, "Demo: use any email and password: login <email> <password>")
}

fn render_dashboard(
    out: &mut String,
    theme: Theme,
    projects: &[Project],
    last_visited: Option<&Project>,
) -> std::fmt::Result {
    writeln!(out, "touchgrass [{}]", theme.as_str())?;
    if projects.is_empty() {
        writeln!(out, "Welcome! You have no projects yet.")?;
        return writeln!(out, "Add one with: add https://github.com/<owner>/<repo>");
    }
    writeln!(out, "Your projects:")?;
    let last_id = last_visited.map(|p| p.id.as_str());
    for project in projects {
        let marker = if Some(project.id.as_str()) == last_id { "*" } else { " " };
        writeln!(
            out,
            "{marker} [{}] {}  {}",
            project.id, project.name, project.repo_url
        )?;
    }
    Ok(())
}

fn render_workspace(
    out: &mut String,
    theme: Theme,
    project: &Project,
    preview_url: &str,
    agents: &[Agent],
    selected_agent_id: &str,
    view_mode: ViewMode,
) -> std::fmt::Result {
    let mode = match view_mode {
        ViewMode::Grid => "grid",
        ViewMode::Single => "single",
    };
    writeln!(out, "{} [{}] ({mode} view)", project.name, theme.as_str())?;
    writeln!(out, "preview: {preview_url}")?;
    for agent in agents {
        let marker = if agent.id == selected_agent_id { ">" } else { " " };
        writeln!(out, "{marker} [{}] {}", agent.id, agent.name)?;
    }
    Ok(())
}

fn render_agent(
    out: &mut String,
    theme: Theme,
    project: &Project,
    preview_url: &str,
    agent: &Agent,
    messages: &[ChatMessage],
) -> std::fmt::Result {
    writeln!(out, "{} / {} [{}]", project.name, agent.name, theme.as_str())?;
    writeln!(out, "preview: {preview_url}")?;
    for message in messages {
        writeln!(out, "{}: {}", message.sender, message.text)?;
    }
    Ok(())
}

fn render_not_found(out: &mut String, missing: &Missing, recovery: &str) -> std::fmt::Result {
    match missing {
        Missing::Project(id) => writeln!(out, "Project not found: {id}")?,
        Missing::Agent {
            project_id,
            agent_id,
        } => writeln!(out, "Agent {agent_id} not found in project {project_id}")?,
    }
    writeln!(out, "back -> {recovery}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tg_nav::Route;

    fn project(id: &str) -> Project {
        Project {
            id: id.to_string(),
            repo_url: format!("https://github.com/acme/{id}"),
            name: format!("acme/{id}"),
        }
    }

    #[test]
    fn empty_dashboard_shows_welcome() {
        let view = View::Dashboard {
            projects: vec![],
            last_visited: None,
        };
        assert!(render_view(&view, Theme::Light).contains("no projects yet"));
    }

    #[test]
    fn dashboard_marks_last_visited() {
        let view = View::Dashboard {
            projects: vec![project("a"), project("b")],
            last_visited: Some(project("b")),
        };
        let text = render_view(&view, Theme::Dark);
        assert!(text.contains("[dark]"));
        assert!(text.contains("  [a] acme/a"));
        assert!(text.contains("* [b] acme/b"));
    }

    #[test]
    fn workspace_marks_selected_agent() {
        let view = View::Workspace {
            project: project("a"),
            preview_url: "https://github.com/acme/a#readme".to_string(),
            agents: vec![
                Agent {
                    id: "1".into(),
                    name: "Agent 1".into(),
                },
                Agent {
                    id: "2".into(),
                    name: "Agent 2".into(),
                },
            ],
            selected_agent_id: "2".to_string(),
            view_mode: ViewMode::Single,
        };
        let text = render_view(&view, Theme::Light);
        assert!(text.contains("(single view)"));
        assert!(text.contains("> [2] Agent 2"));
        assert!(text.contains("  [1] Agent 1"));
    }

    #[test]
    fn agent_focus_lists_messages() {
        let view = View::AgentFocus {
            project: project("a"),
            preview_url: "u".to_string(),
            agent: Agent {
                id: "1".into(),
                name: "Agent 1".into(),
            },
            messages: vec![ChatMessage {
                sender: "You".into(),
                text: "hi".into(),
            }],
        };
        let text = render_view(&view, Theme::Light);
        assert!(text.starts_with("acme/a / Agent 1"));
        assert!(text.ends_with("You: hi"));
    }

    #[test]
    fn not_found_names_recovery() {
        let view = View::NotFound {
            missing: Missing::Project("p2".to_string()),
            recovery: Route::Dashboard,
        };
        let text = render_view(&view, Theme::Light);
        assert!(text.contains("Project not found: p2"));
        assert!(text.contains("back -> /dashboard"));
    }

    #[test]
    fn missing_agent_names_project_and_recovery() {
        let view = View::NotFound {
            missing: Missing::Agent {
                project_id: "p1".to_string(),
                agent_id: "a9".to_string(),
            },
            recovery: Route::project("p1"),
        };
        assert_eq!(
            render_view(&view, Theme::Light),
            "Agent a9 not found in project p1\nback -> /project/p1"
        );
    }

    #[test]
    fn login_view_has_no_trailing_newline() {
        let text = render_view(&View::Login, Theme::Dark);
        assert!(text.starts_with("Welcome back."));
        assert!(!text.ends_with('\n'));
    }
}
