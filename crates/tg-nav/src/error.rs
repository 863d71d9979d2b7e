use tg_workspace::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum NavError {
    #[error("Authentication required")]
    Unauthenticated,
    #[error("No project workspace is open")]
    NoActiveWorkspace,
    #[error("No agent is focused")]
    NoFocusedAgent,
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl NavError {
    pub fn error_code(&self) -> &'static str {
        match self {
            NavError::Unauthenticated => "UNAUTHORIZED",
            NavError::NoActiveWorkspace => "NO_ACTIVE_WORKSPACE",
            NavError::NoFocusedAgent => "NO_FOCUSED_AGENT",
            NavError::Validation(e) => e.error_code(),
        }
    }
}
