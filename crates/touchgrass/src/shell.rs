use clap::{Parser, Subcommand};
use tg_nav::{AuthMode, NavError, NavigationController, Route};

use crate::render::render_view;

/// One shell input line.
#[derive(Parser, Debug)]
#[command(name = "touchgrass", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ShellCommand {
    /// Sign in with any non-empty email and password
    Login { email: String, password: String },
    /// Create an account (not available)
    Register { email: String, password: String },
    /// Sign out; stored projects are kept
    Logout,
    /// Navigate to a path such as /dashboard or /project/<id>
    Go { path: String },
    /// Add a project from a repository URL
    Add { url: String },
    /// Delete a project
    Delete {
        id: String,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Open a project workspace
    Open { id: String },
    /// Manage agents of the open workspace
    Agent {
        #[command(subcommand)]
        command: AgentCommand,
    },
    /// Switch between grid and single agent layout
    Mode,
    /// Send a chat message to the focused agent
    Say {
        #[arg(required = true, allow_hyphen_values = true)]
        text: String,
    },
    /// Go back one level
    Back,
    /// Toggle light/dark theme
    Theme,
    /// Re-read the durable store
    Reload,
    /// Print the current view
    Show,
    /// Leave the shell
    Quit,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum AgentCommand {
    /// Add an agent and select it
    Add,
    /// Close an agent (the last one stays open)
    Close { id: String },
    /// Select an agent
    Select { id: String },
    /// Focus an agent, the selected one by default
    Focus { id: Option<String> },
}

pub enum Outcome {
    Continue(String),
    Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`. The text after
/// `say` is passed through as typed.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, clap::Error> {
    let line = line.trim_start();
    let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    if head == "say" {
        let text = rest.trim_start();
        let args = if text.is_empty() { vec![head] } else { vec![head, text] };
        return ShellLine::try_parse_from(args).map(|parsed| Some(parsed.command));
    }

    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return Ok(None);
    }
    ShellLine::try_parse_from(words).map(|parsed| Some(parsed.command))
}

pub fn execute(nav: &mut NavigationController, command: ShellCommand) -> Outcome {
    let result: Result<String, NavError> = match command {
        ShellCommand::Login { email, password } => {
            match nav.login(AuthMode::Login, &email, &password) {
                Ok(view) => Ok(render_view(&view, nav.theme())),
                Err(e) => return Outcome::Continue(format!("error [{}]: {e}", e.error_code())),
            }
        }
        ShellCommand::Register { email, password } => {
            match nav.login(AuthMode::Register, &email, &password) {
                Ok(view) => Ok(render_view(&view, nav.theme())),
                Err(e) => return Outcome::Continue(format!("error [{}]: {e}", e.error_code())),
            }
        }
        ShellCommand::Logout => {
            let view = nav.logout();
            Ok(render_view(&view, nav.theme()))
        }
        ShellCommand::Go { path } => {
            let view = nav.navigate(Route::parse(&path));
            Ok(format!("{}\n{}", nav.route(), render_view(&view, nav.theme())))
        }
        ShellCommand::Add { url } => nav
            .add_project(&url)
            .map(|p| format!("Added [{}] {}", p.id, p.name)),
        ShellCommand::Delete { id, yes } => {
            if !yes {
                Ok(format!("Refusing to delete {id} without --yes"))
            } else {
                nav.delete_project(&id).map(|removed| match removed {
                    Some(p) => format!("Deleted [{}] {}", p.id, p.name),
                    None => format!("No project {id}"),
                })
            }
        }
        ShellCommand::Open { id } => {
            let view = nav.open_project(&id);
            Ok(render_view(&view, nav.theme()))
        }
        ShellCommand::Agent { command } => match command {
            AgentCommand::Add => nav
                .add_agent()
                .map(|a| format!("Added [{}] {}", a.id, a.name)),
            AgentCommand::Close { id } => nav.close_agent(&id).map(|closed| {
                if closed {
                    format!("Closed {id}")
                } else {
                    format!("Cannot close {id}")
                }
            }),
            AgentCommand::Select { id } => nav.select_agent(&id).map(|selected| {
                if selected {
                    format!("Selected {id}")
                } else {
                    format!("No agent {id}")
                }
            }),
            AgentCommand::Focus { id } => {
                let view = match id {
                    Some(id) => nav.open_agent(&id),
                    None => nav.focus_selected(),
                };
                view.map(|v| render_view(&v, nav.theme()))
            }
        },
        ShellCommand::Mode => nav
            .toggle_view_mode()
            .map(|mode| format!("View mode: {mode:?}").to_lowercase()),
        ShellCommand::Say { text } => nav.send_message(&text).map(|sent| {
            if sent {
                render_view(&nav.current_view(), nav.theme())
            } else {
                String::new()
            }
        }),
        ShellCommand::Back => {
            let view = nav.back();
            Ok(render_view(&view, nav.theme()))
        }
        ShellCommand::Theme => Ok(format!("Theme: {}", nav.toggle_theme().as_str())),
        ShellCommand::Reload => {
            let view = nav.reload();
            Ok(render_view(&view, nav.theme()))
        }
        ShellCommand::Show => {
            let view = nav.current_view();
            Ok(render_view(&view, nav.theme()))
        }
        ShellCommand::Quit => return Outcome::Quit,
    };

    match result {
        Ok(text) => Outcome::Continue(text),
        Err(e) => Outcome::Continue(format!("error [{}]: {e}", e.error_code())),
    }
}
